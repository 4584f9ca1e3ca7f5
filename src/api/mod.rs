//! List API module
//!
//! The contract every paged list endpoint follows: a request carries
//! `MaxResults`, an optional `NextToken`, an optional `SortToken`, filter
//! token arrays and extra parameters; a response carries the page items and
//! a `NextToken` that is `null` at the end of the collection.

mod client;
mod types;

pub use client::{ConsoleApi, ListSource};
pub use types::{api_error, parse_list_response, ListPage, ListRequest};
