//! Query types
//!
//! The property-filter query as edited by a search bar, the sort state of a
//! table, and the wire tokens the list API expects for both.

use crate::types::SortDirection;
use serde::{Deserialize, Serialize};

/// How the tokens of a filter query are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinOperation {
    #[default]
    And,
    Or,
}

/// A single `property operator value` filter as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilterToken {
    /// Property key, e.g. `SessionNames`
    pub property_key: String,
    /// UI operator, e.g. `=`, `!=`, `:` or `>=`
    pub operator: String,
    /// Raw value
    pub value: String,
}

impl PropertyFilterToken {
    /// Create a new token
    pub fn new(
        property_key: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            property_key: property_key.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Filter query: a list of tokens and the join operation between them
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PropertyFilterQuery {
    /// Tokens in entry order
    pub tokens: Vec<PropertyFilterToken>,
    /// Join operation
    pub operation: JoinOperation,
}

impl PropertyFilterQuery {
    /// Empty query joined with `and`
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token
    #[must_use]
    pub fn with_token(mut self, token: PropertyFilterToken) -> Self {
        self.tokens.push(token);
        self
    }

    /// Set the join operation
    #[must_use]
    pub fn with_operation(mut self, operation: JoinOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Check whether the query filters anything
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Sort state of a table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortingState {
    /// Sorting field of the column
    pub column: String,
    /// Descending order
    pub descending: bool,
}

impl SortingState {
    /// Ascending sort on `column`
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    /// Descending sort on `column`
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    /// Wire token for this sort state
    pub fn to_sort_token(&self) -> SortToken {
        SortToken {
            key: self.column.clone(),
            operator: SortDirection::from_descending(self.descending),
        }
    }
}

/// Sort token as sent to the list API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortToken {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Operator")]
    pub operator: SortDirection,
}

/// Filter token as sent to the list API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFilterToken {
    #[serde(rename = "Operator")]
    pub operator: String,
    #[serde(rename = "Value")]
    pub value: String,
}
