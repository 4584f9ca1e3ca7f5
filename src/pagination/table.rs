//! Paged table driver
//!
//! Owns a controller and a list source. Every event method updates the
//! controller and then performs the fetches it asks for, so that the table
//! is settled when the method returns.

use super::controller::PaginationController;
use super::types::TableView;
use crate::api::ListSource;
use crate::error::Result;
use crate::preferences::{PageSizePreference, Preferences};
use crate::query::{PropertyFilterQuery, SortingState};
use std::marker::PhantomData;
use tracing::{debug, info};

/// A paginated table backed by a list source
pub struct PagedTable<T, S> {
    source: S,
    controller: PaginationController<T>,
    preferences: Preferences,
    page_sizes: PageSizePreference,
    _item: PhantomData<fn() -> T>,
}

impl<T, S> PagedTable<T, S>
where
    T: Send,
    S: ListSource<T>,
{
    /// Create a table with default preferences
    pub fn new(source: S, sorting: SortingState) -> Self {
        let preferences = Preferences::default();
        let controller = PaginationController::new(preferences.page_size, sorting);
        Self::with_controller(source, controller, preferences)
    }

    /// Create a table around an existing controller
    pub fn with_controller(
        source: S,
        controller: PaginationController<T>,
        preferences: Preferences,
    ) -> Self {
        Self {
            source,
            controller,
            preferences,
            page_sizes: PageSizePreference::default(),
            _item: PhantomData,
        }
    }

    /// Offer a custom set of page sizes
    #[must_use]
    pub fn with_page_sizes(mut self, page_sizes: PageSizePreference) -> Self {
        self.page_sizes = page_sizes;
        self
    }

    /// Fetch the initial page
    pub async fn load(&mut self) -> usize {
        self.settle().await
    }

    /// Go to `page`
    pub async fn change_page(&mut self, page: usize) -> Result<usize> {
        self.controller.set_page(page)?;
        Ok(self.settle().await)
    }

    /// Go one page forward
    pub async fn next_page(&mut self) -> Result<usize> {
        self.controller.next_page()?;
        Ok(self.settle().await)
    }

    /// Go one page back
    pub async fn previous_page(&mut self) -> Result<usize> {
        self.controller.previous_page()?;
        Ok(self.settle().await)
    }

    /// Change sorting
    pub async fn change_sorting(&mut self, sorting: SortingState) -> usize {
        self.controller.set_sorting(sorting);
        self.settle().await
    }

    /// Replace the filter query
    pub async fn change_query(&mut self, query: PropertyFilterQuery) -> usize {
        self.controller.set_query(query);
        self.settle().await
    }

    /// Confirm new preferences
    ///
    /// A different page size resets pagination.
    pub async fn confirm_preferences(&mut self, preferences: Preferences) -> Result<usize> {
        preferences.validate(&self.page_sizes)?;
        self.controller.set_page_size(preferences.page_size)?;
        self.preferences = preferences;
        Ok(self.settle().await)
    }

    /// Reset to page 1 and forget every known token
    pub async fn reset_pagination(&mut self) -> usize {
        self.controller.reset_pagination();
        self.settle().await
    }

    /// Fetch the current page again
    pub async fn refresh(&mut self) -> usize {
        self.controller.refresh();
        self.settle().await
    }

    /// Items of the current page were deleted elsewhere
    pub async fn items_deleted(&mut self) -> usize {
        self.controller.items_deleted();
        self.settle().await
    }

    /// Display state
    pub fn view(&self) -> TableView<'_, T> {
        self.controller.view()
    }

    pub fn controller(&self) -> &PaginationController<T> {
        &self.controller
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn page_sizes(&self) -> &PageSizePreference {
        &self.page_sizes
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Perform fetches until the controller asks for none; returns how many
    /// were made
    async fn settle(&mut self) -> usize {
        let mut fetches = 0;
        while let Some(request) = self.controller.next_fetch() {
            let list_request = request.params.to_list_request();
            debug!(
                generation = request.generation,
                page = request.params.pagination.current_page_index,
                "Fetching page"
            );
            let result = self.source.list(&list_request).await;
            self.controller.complete(request.generation, result);
            fetches += 1;
        }

        if fetches > 0 {
            let view = self.controller.view();
            info!(
                page = view.current_page_index,
                pages = view.pages_count,
                open_end = view.open_end,
                items = view.items.len(),
                "Table updated"
            );
        }
        fetches
    }
}
