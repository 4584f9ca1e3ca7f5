//! Pagination types
//!
//! Fetch parameters emitted by the controller and the display state it
//! produces.

use crate::api::ListRequest;
use crate::query::{group_filter_tokens, PropertyFilterQuery, SortingState};
use crate::types::StringMap;
use serde::Serialize;

/// Default page size of a paginated table
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pagination part of the fetch parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// 1-based page being fetched
    pub current_page_index: usize,
    /// Page size
    pub page_size: usize,
    /// Token for the page; `None` for the first page
    pub next_token: Option<String>,
}

/// Everything a list source needs to fetch one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub pagination: PaginationParams,
    pub sorting: SortingState,
    pub filtering: PropertyFilterQuery,
    pub refresh_key: u64,
    pub extra_params: StringMap,
}

impl FetchParams {
    /// Translate into a list API request
    pub fn to_list_request(&self) -> ListRequest {
        ListRequest {
            max_results: self.pagination.page_size,
            next_token: self.pagination.next_token.clone(),
            sort_token: Some(self.sorting.to_sort_token()),
            filters: group_filter_tokens(&self.filtering),
            extra_params: self.extra_params.clone(),
        }
    }
}

/// A fetch the controller wants performed
///
/// The result must be handed back to `PaginationController::complete` with
/// the same `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Tag identifying this fetch
    pub generation: u64,
    /// Fetch parameters
    pub params: FetchParams,
}

/// Values whose change triggers a fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FetchKey {
    pub page: usize,
    pub sorting: SortingState,
    pub filtering: PropertyFilterQuery,
    pub refresh_key: u64,
}

/// State of the pagination widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page_index: usize,
    pub pages_count: usize,
    /// More pages may exist after `pages_count`
    pub open_end: bool,
    /// Navigation is disabled while a fetch is in flight
    pub disabled: bool,
}

/// Display state of a paginated table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<'a, T> {
    pub items: &'a [T],
    pub loading: bool,
    pub total_count: usize,
    pub pages_count: usize,
    pub current_page_index: usize,
    pub next_token: Option<&'a str>,
    pub error: bool,
    pub error_message: Option<&'a str>,
    pub open_end: bool,
}

impl<T> TableView<'_, T> {
    /// Pagination widget state
    pub fn pagination(&self) -> PaginationView {
        PaginationView {
            current_page_index: self.current_page_index,
            pages_count: self.pages_count,
            open_end: self.open_end,
            disabled: self.loading,
        }
    }

    /// Header counter, `(N)` or `(N+)` while more pages may exist
    pub fn counter(&self) -> String {
        if self.open_end {
            format!("({}+)", self.total_count)
        } else {
            format!("({})", self.total_count)
        }
    }
}
