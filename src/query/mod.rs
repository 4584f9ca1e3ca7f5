//! Query module
//!
//! Filter and sort state of a list view and its translation into list API
//! request fields.
//!
//! # Overview
//!
//! A search bar produces `PropertyFilterToken`s (`SessionNames : dev`). The
//! list API expects, for every property key, an array of
//! `{"Operator", "Value"}` objects, with the substring operators spelled out
//! (`CONTAINS`, `NOT_CONTAINS`). Sorting is a single `{"Key", "Operator"}`
//! token.

mod builder;
mod types;

pub use builder::{
    api_operator, group_filter_tokens, local_offset, normalize_date_value,
    parse_filter_expression, FilterQueryBuilder, UI_OPERATORS,
};
pub use types::{
    ApiFilterToken, JoinOperation, PropertyFilterQuery, PropertyFilterToken, SortToken,
    SortingState,
};
