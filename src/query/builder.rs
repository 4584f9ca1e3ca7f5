//! Filter query building
//!
//! Turns search-bar input into a `PropertyFilterQuery` and a validated query
//! into the per-property token arrays of a list request.

use super::types::{ApiFilterToken, JoinOperation, PropertyFilterQuery, PropertyFilterToken};
use crate::error::{Error, Result};
use crate::resource::Resource;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Regex for `Key<op>Value`; longer operators are listed first
static FILTER_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9]*)\s*(!=|!:|>=|<=|=|:|<|>)\s*(.*?)\s*$").unwrap()
});

/// Operators the search bar exposes
pub const UI_OPERATORS: &[&str] = &["=", "!=", ":", "!:", "<", "<=", ">", ">="];

/// Map a search-bar operator to the list API operator
///
/// `:` and `!:` become `CONTAINS` / `NOT_CONTAINS`; every other operator is
/// sent as typed.
pub fn api_operator(operator: &str) -> &str {
    match operator {
        ":" => "CONTAINS",
        "!:" => "NOT_CONTAINS",
        other => other,
    }
}

/// Parse a `Key<op>Value` expression, e.g. `SessionNames:dev` or `NumOfConnections>=2`
pub fn parse_filter_expression(expression: &str) -> Result<PropertyFilterToken> {
    let caps = FILTER_EXPRESSION.captures(expression).ok_or_else(|| {
        Error::invalid_filter(expression, "expected <Property><operator><value>")
    })?;

    let value = &caps[3];
    if value.is_empty() {
        return Err(Error::invalid_filter(expression, "missing value"));
    }

    Ok(PropertyFilterToken::new(&caps[1], &caps[2], value))
}

/// Complete a date filter value to a full RFC 3339 date-time
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or a full RFC 3339 value. A
/// missing time defaults to midnight and a missing offset to `offset`.
pub fn normalize_date_value(value: &str, offset: FixedOffset) -> Result<String> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.to_rfc3339());
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|e| Error::invalid_filter(value, format!("not a date: {e}")))?;

    naive
        .and_local_timezone(offset)
        .single()
        .map(|datetime| datetime.to_rfc3339())
        .ok_or_else(|| Error::invalid_filter(value, "ambiguous local time"))
}

/// Offset of the local time zone
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Group a query's tokens into the per-property arrays of a list request
///
/// Tokens sharing a property key keep their entry order. The join operation
/// has no wire field; the list API combines property arrays itself.
pub fn group_filter_tokens(query: &PropertyFilterQuery) -> BTreeMap<String, Vec<ApiFilterToken>> {
    let mut grouped: BTreeMap<String, Vec<ApiFilterToken>> = BTreeMap::new();
    for token in &query.tokens {
        grouped
            .entry(token.property_key.clone())
            .or_default()
            .push(ApiFilterToken {
                operator: api_operator(&token.operator).to_string(),
                value: token.value.clone(),
            });
    }
    grouped
}

/// Builder for validated filter queries
#[derive(Debug)]
pub struct FilterQueryBuilder {
    resource: Option<Resource>,
    date_offset: FixedOffset,
    query: PropertyFilterQuery,
    errors: Vec<Error>,
}

impl Default for FilterQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterQueryBuilder {
    /// Builder without property validation
    pub fn new() -> Self {
        Self {
            resource: None,
            date_offset: local_offset(),
            query: PropertyFilterQuery::default(),
            errors: Vec::new(),
        }
    }

    /// Builder validating property keys against `resource`
    pub fn for_resource(resource: Resource) -> Self {
        Self {
            resource: Some(resource),
            ..Self::new()
        }
    }

    /// Offset used to complete date values
    #[must_use]
    pub fn date_offset(mut self, offset: FixedOffset) -> Self {
        self.date_offset = offset;
        self
    }

    /// Add a token
    #[must_use]
    pub fn token(
        mut self,
        property_key: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let token = PropertyFilterToken::new(property_key, operator, value);
        match self.check(token) {
            Ok(token) => self.query.tokens.push(token),
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Add a token from a `Key<op>Value` expression
    #[must_use]
    pub fn expression(mut self, expression: &str) -> Self {
        match parse_filter_expression(expression).and_then(|t| self.check(t)) {
            Ok(token) => self.query.tokens.push(token),
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Join tokens with `or`
    #[must_use]
    pub fn or(mut self) -> Self {
        self.query.operation = JoinOperation::Or;
        self
    }

    /// Finish, returning the first error encountered
    pub fn build(mut self) -> Result<PropertyFilterQuery> {
        if self.errors.is_empty() {
            Ok(self.query)
        } else {
            Err(self.errors.remove(0))
        }
    }

    fn check(&self, mut token: PropertyFilterToken) -> Result<PropertyFilterToken> {
        if !UI_OPERATORS.contains(&token.operator.as_str()) {
            return Err(Error::invalid_filter(
                format!("{}{}{}", token.property_key, token.operator, token.value),
                format!("unsupported operator '{}'", token.operator),
            ));
        }

        if let Some(resource) = self.resource {
            resource.validate_property(&token.property_key)?;
            if resource.is_date_property(&token.property_key) {
                token.value = normalize_date_value(&token.value, self.date_offset)?;
            }
        }
        Ok(token)
    }
}
