// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # console-pager
//!
//! Cursor pagination for the paged list endpoints of a remote-desktop access
//! console: sessions, servers, session templates, users and user groups.
//!
//! ## Features
//!
//! - **Numbered pages over continuation tokens**: remembers every token seen
//!   and discovers the page count one page at a time
//! - **Filter and sort queries**: search-bar tokens translated into the list
//!   API's per-property operator arrays
//! - **Table preferences**: page size and column display payload
//! - **Rate-limited HTTP client**: bearer token pass-through and governor
//!   throttling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use console_pager::{ConsoleApi, HttpClient, PagedTable, Resource, SortingState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> console_pager::Result<()> {
//!     let config = console_pager::load_config("console.yaml")?;
//!     let http = Arc::new(HttpClient::with_config(config.http_config()?)?);
//!     let api: ConsoleApi = ConsoleApi::new(http, Resource::Sessions);
//!
//!     let mut table = PagedTable::new(api, SortingState::ascending("Name"));
//!     table.load().await;
//!     while table.controller().open_end() {
//!         table.next_page().await?;
//!     }
//!     println!("{} sessions", table.view().total_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  FetchRequest  ┌──────────────┐  POST /describeX  ┌──────────┐
//! │  PagedTable  │───────────────▶│  ListSource  │──────────────────▶│ list API │
//! │ (controller) │◀───────────────│ (ConsoleApi) │◀──────────────────│          │
//! └──────────────┘  ListPage<T>   └──────────────┘ {Items, NextToken}└──────────┘
//!        │
//!        ▼
//!   TableView<T>: items, pagination widget, counter, error
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with rate limiting
pub mod http;

/// List API contract and client
pub mod api;

/// Resource catalogue
pub mod resource;

/// Filter and sort queries
pub mod query;

/// Cursor pagination controller and table driver
pub mod pagination;

/// Table preferences
pub mod preferences;

/// Console configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{ConsoleApi, ListPage, ListRequest, ListSource};
pub use config::{load_config, load_config_from_str, ConsoleConfig};
pub use http::{HttpClient, HttpClientConfig};
pub use pagination::{PagedTable, PaginationController, TableView};
pub use preferences::Preferences;
pub use query::{PropertyFilterQuery, PropertyFilterToken, SortingState};
pub use resource::Resource;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
