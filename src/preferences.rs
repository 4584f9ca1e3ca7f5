//! Table preferences
//!
//! The preferences payload a table confirms: page size, column visibility
//! and order, and an optional custom value (e.g. a view mode).

use crate::error::{Error, Result};
use crate::pagination::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Visibility of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDisplayItem {
    pub id: String,
    pub visible: bool,
}

impl ContentDisplayItem {
    pub fn new(id: impl Into<String>, visible: bool) -> Self {
        Self {
            id: id.into(),
            visible,
        }
    }
}

/// A column that can be shown or hidden
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDisplayOption {
    pub id: String,
    pub label: String,
    /// Column that can never be hidden
    #[serde(default, rename = "alwaysVisible")]
    pub always_visible: bool,
}

impl ContentDisplayOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            always_visible: false,
        }
    }
}

/// One selectable page size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeOption {
    pub value: usize,
    pub label: String,
}

/// Page sizes offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizePreference {
    pub title: String,
    pub options: Vec<PageSizeOption>,
}

impl PageSizePreference {
    /// Offer the given sizes, labelled `N resources`
    pub fn from_sizes(sizes: &[usize]) -> Self {
        Self {
            title: "Page size".to_string(),
            options: sizes
                .iter()
                .map(|&value| PageSizeOption {
                    value,
                    label: format!("{value} resources"),
                })
                .collect(),
        }
    }

    /// Check whether `page_size` is offered
    pub fn contains(&self, page_size: usize) -> bool {
        self.options.iter().any(|option| option.value == page_size)
    }
}

impl Default for PageSizePreference {
    fn default() -> Self {
        Self::from_sizes(&[5, 10, 20, 50, 100])
    }
}

/// Preferences of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub page_size: usize,
    #[serde(default)]
    pub content_display: Vec<ContentDisplayItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            content_display: Vec::new(),
            custom: None,
        }
    }
}

impl Preferences {
    /// Default preferences showing every option, in order
    pub fn for_columns(options: &[ContentDisplayOption]) -> Self {
        Self {
            content_display: options
                .iter()
                .map(|option| ContentDisplayItem::new(&option.id, true))
                .collect(),
            ..Default::default()
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Check the preferences against the offered page sizes
    pub fn validate(&self, page_sizes: &PageSizePreference) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be positive"));
        }
        if !page_sizes.options.is_empty() && !page_sizes.contains(self.page_size) {
            return Err(Error::invalid_value(
                "page_size",
                format!("{} is not an offered page size", self.page_size),
            ));
        }

        let mut seen = HashSet::new();
        for item in &self.content_display {
            if !seen.insert(item.id.as_str()) {
                return Err(Error::invalid_value(
                    "content_display",
                    format!("duplicate column '{}'", item.id),
                ));
            }
        }
        Ok(())
    }

    /// Ids of the visible columns, in display order
    ///
    /// Without a content display every column is visible. Columns marked
    /// always-visible are kept even when hidden.
    pub fn visible_columns<'a>(&'a self, options: &'a [ContentDisplayOption]) -> Vec<&'a str> {
        if self.content_display.is_empty() {
            return options.iter().map(|option| option.id.as_str()).collect();
        }

        self.content_display
            .iter()
            .filter(|item| {
                item.visible
                    || options
                        .iter()
                        .any(|option| option.id == item.id && option.always_visible)
            })
            .map(|item| item.id.as_str())
            .collect()
    }
}
