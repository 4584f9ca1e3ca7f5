//! List API request and response types

use crate::error::{Error, Result};
use crate::query::{ApiFilterToken, SortToken};
use crate::types::{JsonObject, JsonValue, StringMap};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// One request to a paged list endpoint
///
/// Serialises to the console's PascalCase body:
///
/// ```json
/// {
///   "MaxResults": 20,
///   "NextToken": "abc",
///   "SortToken": {"Key": "Name", "Operator": "asc"},
///   "SessionNames": [{"Operator": "CONTAINS", "Value": "dev"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListRequest {
    /// Page size
    pub max_results: usize,
    /// Continuation token; `None` for the first page
    pub next_token: Option<String>,
    /// Sort token
    pub sort_token: Option<SortToken>,
    /// Filter token arrays keyed by property
    pub filters: BTreeMap<String, Vec<ApiFilterToken>>,
    /// Extra top-level string parameters, written last
    pub extra_params: StringMap,
}

impl ListRequest {
    /// Request for the first page
    pub fn first_page(max_results: usize) -> Self {
        Self {
            max_results,
            ..Default::default()
        }
    }

    /// Build the JSON body
    pub fn to_body(&self) -> JsonObject {
        let mut body = JsonObject::new();
        body.insert("MaxResults".to_string(), JsonValue::from(self.max_results));

        if let Some(ref token) = self.next_token {
            body.insert("NextToken".to_string(), JsonValue::from(token.clone()));
        }

        if let Some(ref sort) = self.sort_token {
            let value = serde_json::to_value(sort).unwrap_or(JsonValue::Null);
            body.insert("SortToken".to_string(), value);
        }

        for (property, tokens) in &self.filters {
            let value = serde_json::to_value(tokens).unwrap_or(JsonValue::Null);
            body.insert(property.clone(), value);
        }

        for (key, value) in &self.extra_params {
            body.insert(key.clone(), JsonValue::from(value.clone()));
        }

        body
    }
}

impl Serialize for ListRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_body().serialize(serializer)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<T> {
    /// Items of the page
    pub items: Vec<T>,
    /// Token for the following page; `None` at the end of the collection
    pub next_token: Option<String>,
}

impl<T> ListPage<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// Final page of a collection
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

/// Parse a list response body
///
/// A missing or null items array is an empty page. A non-null `Error` object
/// becomes `Error::Api`.
pub fn parse_list_response<T: DeserializeOwned>(
    body: JsonValue,
    items_key: &str,
) -> Result<ListPage<T>> {
    let JsonValue::Object(mut object) = body else {
        return Err(Error::decode("list response is not a JSON object"));
    };

    if let Some(error) = api_error(&JsonValue::Object(object.clone())) {
        return Err(error);
    }

    let items = match object.remove(items_key) {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(values)) => values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(|e| Error::decode(format!("invalid item in '{items_key}': {e}")))?,
        Some(other) => {
            return Err(Error::decode(format!(
                "expected '{items_key}' to be an array, got {other}"
            )))
        }
    };

    let next_token = match object.remove("NextToken") {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(token)) => Some(token),
        Some(other) => {
            return Err(Error::decode(format!(
                "expected 'NextToken' to be a string, got {other}"
            )))
        }
    };

    Ok(ListPage::new(items, next_token))
}

/// Extract the `Error` object of a response body, if any
pub fn api_error(body: &JsonValue) -> Option<Error> {
    let error = body.get("Error")?.as_object()?;
    let code = match error.get("code") {
        Some(JsonValue::String(code)) => code.clone(),
        Some(JsonValue::Number(code)) => code.to_string(),
        _ => String::new(),
    };
    let message = error
        .get("message")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string();
    Some(Error::api(code, message))
}
