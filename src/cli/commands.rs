//! CLI commands and argument parsing

use crate::error::{Error, Result};
use crate::resource::Resource;
use crate::types::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse the paged list endpoints of a remote-desktop access console
#[derive(Parser, Debug)]
#[command(name = "console-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the list API (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer access token (overrides the config file)
    #[arg(long, global = true)]
    pub access_token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LogLevel,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the browsable resources
    Resources,

    /// Walk pages forward and print their items
    List {
        /// Resource to list
        resource: Resource,

        #[command(flatten)]
        query: QueryArgs,

        /// Number of pages to print
        #[arg(long, default_value = "1")]
        pages: usize,

        /// Print every page
        #[arg(long, conflicts_with = "pages")]
        all: bool,
    },

    /// Page through a resource interactively
    ///
    /// Reads commands from stdin: n (next), p (previous), g N (go to page),
    /// r (refresh), d (items deleted), s KEY [desc] (sort), f EXPR... (filter),
    /// size N (page size), q (quit).
    Browse {
        /// Resource to browse
        resource: Resource,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Filter, sort and paging options shared by `list` and `browse`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Filter expression `<Property><op><value>`, e.g. `SessionNames:dev`
    #[arg(long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Join filters with `or` instead of `and`
    #[arg(long)]
    pub or: bool,

    /// Sort column (defaults to the resource's name column)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page size (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Extra request parameter `KEY=VALUE`
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// A command read by `browse`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Go(usize),
    Refresh,
    Deleted,
    Sort { column: String, descending: bool },
    Filter(Vec<String>),
    PageSize(usize),
    Quit,
}

impl BrowseCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let parsed = match (command, rest.as_slice()) {
            ("n" | "next", []) => Self::Next,
            ("p" | "prev", []) => Self::Previous,
            ("g" | "go", [page]) => Self::Go(parse_number(page)?),
            ("r" | "refresh", []) => Self::Refresh,
            ("d" | "deleted", []) => Self::Deleted,
            ("s" | "sort", [column]) => Self::Sort {
                column: (*column).to_string(),
                descending: false,
            },
            ("s" | "sort", [column, "desc"]) => Self::Sort {
                column: (*column).to_string(),
                descending: true,
            },
            ("s" | "sort", [column, "asc"]) => Self::Sort {
                column: (*column).to_string(),
                descending: false,
            },
            ("f" | "filter", expressions) => {
                Self::Filter(expressions.iter().map(|e| (*e).to_string()).collect())
            }
            ("size", [size]) => Self::PageSize(parse_number(size)?),
            ("q" | "quit", []) => Self::Quit,
            _ => return Err(Error::Other(format!("Unknown command: {}", line.trim()))),
        };
        Ok(Some(parsed))
    }
}

fn parse_number(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| Error::Other(format!("Expected a number, got '{value}'")))
}

/// Parse a `KEY=VALUE` request parameter
pub fn parse_param(param: &str) -> Result<(String, String)> {
    match param.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::invalid_value(
            "param",
            format!("'{param}' is not KEY=VALUE"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::try_parse_from([
            "console-pager",
            "list",
            "sessions",
            "--filter",
            "SessionNames:dev",
            "--filter",
            "State=READY",
            "--or",
            "--sort",
            "CreationTime",
            "--desc",
            "--page-size",
            "50",
            "--pages",
            "3",
            "--param",
            "Owner=alice",
        ])
        .unwrap();

        match cli.command {
            Commands::List {
                resource,
                query,
                pages,
                all,
            } => {
                assert_eq!(resource, Resource::Sessions);
                assert_eq!(query.filters, vec!["SessionNames:dev", "State=READY"]);
                assert!(query.or);
                assert_eq!(query.sort.as_deref(), Some("CreationTime"));
                assert!(query.desc);
                assert_eq!(query.page_size, Some(50));
                assert_eq!(query.params, vec!["Owner=alice"]);
                assert_eq!(pages, 3);
                assert!(!all);
            }
            other => panic!("Expected List, got {other:?}"),
        }
    }

    #[test]
    fn test_all_conflicts_with_pages() {
        let result = Cli::try_parse_from([
            "console-pager",
            "list",
            "users",
            "--all",
            "--pages",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "console-pager",
            "browse",
            "session-templates",
            "--format",
            "pretty",
            "-v",
            "--base-url",
            "https://console.example.com",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Pretty);
        assert_eq!(cli.log_level(), LogLevel::Debug);
        assert_eq!(cli.base_url.as_deref(), Some("https://console.example.com"));
        assert!(matches!(
            cli.command,
            Commands::Browse {
                resource: Resource::SessionTemplates,
                ..
            }
        ));
    }

    #[test_case("n", BrowseCommand::Next ; "next")]
    #[test_case("prev", BrowseCommand::Previous ; "previous")]
    #[test_case("g 3", BrowseCommand::Go(3) ; "go")]
    #[test_case("r", BrowseCommand::Refresh ; "refresh")]
    #[test_case("d", BrowseCommand::Deleted ; "deleted")]
    #[test_case("size 50", BrowseCommand::PageSize(50) ; "page size")]
    #[test_case("q", BrowseCommand::Quit ; "quit")]
    fn test_parse_browse_command(line: &str, expected: BrowseCommand) {
        assert_eq!(BrowseCommand::parse(line).unwrap(), Some(expected));
    }

    #[test]
    fn test_parse_browse_sort_and_filter() {
        assert_eq!(
            BrowseCommand::parse("s Name desc").unwrap(),
            Some(BrowseCommand::Sort {
                column: "Name".to_string(),
                descending: true
            })
        );
        assert_eq!(
            BrowseCommand::parse("f SessionNames:dev Owner=bob").unwrap(),
            Some(BrowseCommand::Filter(vec![
                "SessionNames:dev".to_string(),
                "Owner=bob".to_string()
            ]))
        );
        assert_eq!(
            BrowseCommand::parse("f").unwrap(),
            Some(BrowseCommand::Filter(Vec::new()))
        );
    }

    #[test]
    fn test_parse_browse_invalid() {
        assert_eq!(BrowseCommand::parse("   ").unwrap(), None);
        assert!(BrowseCommand::parse("g two").is_err());
        assert!(BrowseCommand::parse("jump").is_err());
        assert!(BrowseCommand::parse("n 2").is_err());
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("Owner=alice").unwrap(),
            ("Owner".to_string(), "alice".to_string())
        );
        assert_eq!(
            parse_param("Expr=a=b").unwrap(),
            ("Expr".to_string(), "a=b".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }
}
