//! Cursor pagination controller
//!
//! Turns `{items, next_token}` page results into numbered-page table state.
//! The list API only hands out an opaque token for the page after the one
//! just fetched, so the controller remembers every token it has seen:
//! `page_tokens[i]` fetches page `i + 1`, and `page_tokens[0]` is always
//! `None`. The number of pages is discovered one page at a time; until the
//! server answers with a `None` token the pagination stays open-ended.
//!
//! The controller never performs I/O. Callers drive it with
//! [`PaginationController::next_fetch`] and feed the outcome back through
//! [`PaginationController::complete`].

use super::types::{
    FetchKey, FetchParams, FetchRequest, PaginationParams, TableView, DEFAULT_PAGE_SIZE,
};
use crate::api::ListPage;
use crate::error::{Error, Result};
use crate::query::{PropertyFilterQuery, SortingState};
use crate::types::StringMap;
use tracing::{debug, warn};

/// Pagination state machine for one table
#[derive(Debug)]
pub struct PaginationController<T> {
    page_size: usize,
    sorting: SortingState,
    filtering: PropertyFilterQuery,
    extra_params: StringMap,

    page_tokens: Vec<Option<String>>,
    current_page_index: usize,
    pages_count: usize,
    open_end: bool,
    total_count: usize,
    refresh_key: u64,

    items: Vec<T>,
    loading: bool,
    error: bool,
    error_message: Option<String>,

    generation: u64,
    in_flight: Option<u64>,
    last_key: Option<FetchKey>,
}

impl<T> PaginationController<T> {
    /// Create a controller positioned on page 1
    ///
    /// A zero page size falls back to the default of 20.
    pub fn new(page_size: usize, sorting: SortingState) -> Self {
        Self {
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            sorting,
            filtering: PropertyFilterQuery::default(),
            extra_params: StringMap::new(),
            page_tokens: vec![None],
            current_page_index: 1,
            pages_count: 1,
            open_end: true,
            total_count: 0,
            refresh_key: 0,
            items: Vec::new(),
            loading: false,
            error: false,
            error_message: None,
            generation: 0,
            in_flight: None,
            last_key: None,
        }
    }

    /// Start with a filter query
    #[must_use]
    pub fn with_query(mut self, query: PropertyFilterQuery) -> Self {
        self.filtering = query;
        self
    }

    /// Extra parameters sent with every request
    #[must_use]
    pub fn with_extra_params(mut self, extra_params: StringMap) -> Self {
        self.extra_params = extra_params;
        self
    }

    // ========================================================================
    // Fetch cycle
    // ========================================================================

    /// The fetch required by the current state, if any
    ///
    /// Returns `None` when the sort, filter, refresh key and page index are
    /// unchanged since the last issued fetch. Issuing a fetch supersedes any
    /// fetch still in flight.
    pub fn next_fetch(&mut self) -> Option<FetchRequest> {
        let key = self.fetch_key();
        if self.last_key.as_ref() == Some(&key) {
            return None;
        }
        self.last_key = Some(key);

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.loading = true;

        let request = FetchRequest {
            generation: self.generation,
            params: self.fetch_params(),
        };

        debug!(
            generation = request.generation,
            page = self.current_page_index,
            known_pages = self.page_tokens.len(),
            "Issuing page fetch"
        );

        Some(request)
    }

    /// Apply the outcome of a fetch
    ///
    /// Returns `false` when `generation` is not the latest issued fetch, or
    /// when the page, sort, filter or refresh key changed after it was
    /// issued; the result is then discarded.
    pub fn complete(&mut self, generation: u64, result: Result<ListPage<T>>) -> bool {
        if self.in_flight != Some(generation) {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale page result"
            );
            return false;
        }
        // Superseded by an event; the next fetch replaces it
        if self.last_key.as_ref() != Some(&self.fetch_key()) {
            debug!(
                generation,
                page = self.current_page_index,
                "Discarding page result for superseded state"
            );
            return false;
        }
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(page) => self.apply_page(page),
            Err(e) => {
                warn!(page = self.current_page_index, "Page fetch failed: {}", e);
                self.error = true;
                self.error_message = Some(e.to_string());
            }
        }

        true
    }

    fn apply_page(&mut self, page: ListPage<T>) {
        self.error = false;
        self.error_message = None;

        let index = self.current_page_index;
        let count = page.items.len();
        self.items = page.items;

        if count == 0 {
            if index > 1 {
                // Later tokens were derived from this page's token, so
                // they go with it
                self.page_tokens.truncate(index - 1);
                self.pages_count = self.page_tokens.len();
                self.current_page_index = index - 1;
                self.open_end = false;
                self.total_count = self.current_page_index * self.page_size;
                debug!(
                    page = index,
                    "Empty page, stepping back to page {}", self.current_page_index
                );
            } else {
                self.page_tokens.truncate(1);
                self.pages_count = 1;
                self.open_end = false;
                self.total_count = 0;
            }
            return;
        }

        if index != self.page_tokens.len() {
            return;
        }

        // Unresolved token, wait for a later fetch
        if page.next_token.as_deref() == Some("") {
            return;
        }

        if self.open_end {
            match page.next_token {
                None => {
                    self.pages_count = self.page_tokens.len();
                    self.open_end = false;
                    debug!(pages = self.pages_count, "Reached the last page");
                }
                Some(token) => {
                    self.page_tokens.push(Some(token));
                    self.pages_count = self.page_tokens.len();
                }
            }
        }

        self.total_count = (index - 1) * self.page_size + count;
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Move to `page`
    ///
    /// Only pages with a known token can be reached.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        let known = self.page_tokens.len();
        if page == 0 || page > known {
            return Err(Error::InvalidPage { page, known });
        }
        self.current_page_index = page;
        Ok(())
    }

    /// Move one page forward
    pub fn next_page(&mut self) -> Result<()> {
        self.set_page(self.current_page_index + 1)
    }

    /// Move one page back
    pub fn previous_page(&mut self) -> Result<()> {
        self.set_page(self.current_page_index.saturating_sub(1))
    }

    /// Change the sort column or direction
    ///
    /// Known tokens are kept; the current page is fetched again.
    pub fn set_sorting(&mut self, sorting: SortingState) {
        self.sorting = sorting;
    }

    /// Replace the filter query, resetting pagination when it differs
    pub fn set_query(&mut self, query: PropertyFilterQuery) {
        if query == self.filtering {
            return;
        }
        self.filtering = query;
        self.reset_pagination();
    }

    /// Change the page size, resetting pagination when it differs
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be positive"));
        }
        if page_size == self.page_size {
            return Ok(());
        }
        self.page_size = page_size;
        self.reset_pagination();
        Ok(())
    }

    /// Forget every known token and go back to page 1
    ///
    /// Exactly one fetch follows: on page 1 the refresh key is bumped,
    /// elsewhere the page index changes.
    pub fn reset_pagination(&mut self) {
        debug!(page = self.current_page_index, "Resetting pagination");
        self.page_tokens = vec![None];
        self.open_end = true;
        self.total_count = 0;
        self.pages_count = 1;

        if self.current_page_index == 1 {
            self.refresh_key += 1;
        } else {
            self.current_page_index = 1;
        }
    }

    /// Fetch the current page again
    ///
    /// On the last known page the pagination is re-opened so that data
    /// appended since can be discovered.
    pub fn refresh(&mut self) {
        self.refresh_key += 1;
        if self.current_page_index == self.page_tokens.len() {
            self.open_end = true;
        }
    }

    /// Items of the current page were deleted
    ///
    /// Tokens after the current page are invalidated and the current page is
    /// fetched again.
    pub fn items_deleted(&mut self) {
        let index = self.current_page_index;
        if index < self.page_tokens.len() {
            self.open_end = true;
        }
        self.total_count = (index - 1) * self.page_size + self.items.len();
        self.page_tokens.truncate(index);
        self.pages_count = self.page_tokens.len();
        self.refresh_key += 1;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Display state
    pub fn view(&self) -> TableView<'_, T> {
        TableView {
            items: &self.items,
            loading: self.loading,
            total_count: self.total_count,
            pages_count: self.pages_count,
            current_page_index: self.current_page_index,
            next_token: self.current_token(),
            error: self.error,
            error_message: self.error_message.as_deref(),
            open_end: self.open_end,
        }
    }

    pub fn page_tokens(&self) -> &[Option<String>] {
        &self.page_tokens
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    pub fn pages_count(&self) -> usize {
        self.pages_count
    }

    pub fn open_end(&self) -> bool {
        self.open_end
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sorting(&self) -> &SortingState {
        &self.sorting
    }

    pub fn query(&self) -> &PropertyFilterQuery {
        &self.filtering
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh_key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn current_token(&self) -> Option<&str> {
        self.page_tokens
            .get(self.current_page_index - 1)
            .and_then(|token| token.as_deref())
    }

    fn fetch_key(&self) -> FetchKey {
        FetchKey {
            page: self.current_page_index,
            sorting: self.sorting.clone(),
            filtering: self.filtering.clone(),
            refresh_key: self.refresh_key,
        }
    }

    fn fetch_params(&self) -> FetchParams {
        FetchParams {
            pagination: PaginationParams {
                current_page_index: self.current_page_index,
                page_size: self.page_size,
                next_token: self.current_token().map(str::to_string),
            },
            sorting: self.sorting.clone(),
            filtering: self.filtering.clone(),
            refresh_key: self.refresh_key,
            extra_params: self.extra_params.clone(),
        }
    }
}
