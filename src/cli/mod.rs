//! CLI module
//!
//! Command-line interface for browsing console resources.
//!
//! # Commands
//!
//! - `resources` - List the browsable resources
//! - `list` - Walk pages forward and print their items
//! - `browse` - Page through a resource interactively

mod commands;
mod runner;

pub use commands::{parse_param, BrowseCommand, Cli, Commands, OutputFormat, QueryArgs};
pub use runner::Runner;
