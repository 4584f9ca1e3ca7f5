//! Pagination module
//!
//! Cursor pagination over list endpoints that only return a continuation
//! token for the following page.
//!
//! # Overview
//!
//! `PaginationController` is a synchronous state machine: it remembers the
//! tokens seen so far, decides which page to fetch and turns each result
//! into a `TableView`. `PagedTable` drives a controller against a
//! `ListSource`.

mod controller;
mod table;
mod types;

pub use controller::PaginationController;
pub use table::PagedTable;
pub use types::{
    FetchParams, FetchRequest, PaginationParams, PaginationView, TableView, DEFAULT_PAGE_SIZE,
};
