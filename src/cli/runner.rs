//! CLI runner - executes commands

use crate::api::ConsoleApi;
use crate::cli::commands::{parse_param, BrowseCommand, Cli, Commands, OutputFormat, QueryArgs};
use crate::config::{load_config, ConsoleConfig};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{PagedTable, PaginationController, TableView};
use crate::preferences::Preferences;
use crate::query::{FilterQueryBuilder, PropertyFilterQuery, SortingState};
use crate::resource::Resource;
use crate::types::{JsonValue, StringMap};
use serde_json::json;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

type ConsoleTable = PagedTable<JsonValue, ConsoleApi<JsonValue>>;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Resources => {
                self.resources();
                Ok(())
            }
            Commands::List {
                resource,
                query,
                pages,
                all,
            } => {
                let limit = if *all { None } else { Some(*pages) };
                self.list(*resource, query, limit).await
            }
            Commands::Browse { resource, query } => self.browse(*resource, query).await,
        }
    }

    /// Load configuration, applying command-line overrides
    fn load_config(&self) -> Result<ConsoleConfig> {
        let mut config = match (&self.cli.config, &self.cli.base_url) {
            (Some(path), _) => load_config(path)?,
            (None, Some(base_url)) => ConsoleConfig::new(base_url),
            (None, None) => {
                return Err(Error::config(
                    "No console configured (use -C <file> or --base-url)",
                ))
            }
        };

        if let Some(ref base_url) = self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(ref token) = self.cli.access_token {
            config.access_token = Some(token.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a table for `resource` from the query options
    fn build_table(&self, resource: Resource, args: &QueryArgs) -> Result<ConsoleTable> {
        let config = self.load_config()?;
        let http = Arc::new(HttpClient::with_config(config.http_config()?)?);
        let api = ConsoleApi::new(http, resource);

        let query = build_query(resource, &args.filters, args.or)?;
        let sorting = SortingState {
            column: args
                .sort
                .clone()
                .unwrap_or_else(|| resource.default_sort_column().to_string()),
            descending: args.desc,
        };

        let page_size = args.page_size.unwrap_or(config.page_size);
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be positive"));
        }

        let mut extra_params = StringMap::new();
        for param in &args.params {
            let (key, value) = parse_param(param)?;
            extra_params.insert(key, value);
        }

        debug!(
            resource = %resource,
            page_size,
            filters = query.tokens.len(),
            "Building table"
        );

        let controller = PaginationController::new(page_size, sorting)
            .with_query(query)
            .with_extra_params(extra_params);
        let preferences = Preferences::default().with_page_size(page_size);

        Ok(PagedTable::with_controller(api, controller, preferences)
            .with_page_sizes(config.page_sizes()))
    }

    /// Print the resource catalogue
    fn resources(&self) {
        let resources: Vec<JsonValue> = Resource::ALL
            .iter()
            .map(|resource| {
                let date_properties: Vec<&str> = resource
                    .filter_properties()
                    .iter()
                    .copied()
                    .filter(|property| resource.is_date_property(property))
                    .collect();

                json!({
                    "name": resource.name(),
                    "endpoint": resource.endpoint(),
                    "items_key": resource.items_key(),
                    "default_sort": resource.default_sort_column(),
                    "properties": resource.filter_properties(),
                    "date_properties": date_properties
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "RESOURCES",
            "resources": resources
        }));
    }

    /// Walk pages forward, printing each one
    async fn list(&self, resource: Resource, args: &QueryArgs, limit: Option<usize>) -> Result<()> {
        let mut table = self.build_table(resource, args)?;
        table.load().await;

        let mut printed = 0;
        let mut records = 0;
        loop {
            let view = table.view();
            if view.error {
                return Err(page_error(&view));
            }

            // A step back lands on a page already printed
            if view.current_page_index > printed {
                self.output_page(resource, &view);
                printed = view.current_page_index;
                records += view.items.len();
            }

            let more = table.controller().current_page_index()
                < table.controller().page_tokens().len();
            if !more || limit.is_some_and(|limit| printed >= limit) {
                break;
            }
            table.next_page().await?;
        }

        let view = table.view();
        info!(resource = %resource, pages = printed, records, "Listing complete");
        self.output_message(&json!({
            "type": "SUMMARY",
            "resource": resource.name(),
            "pages": printed,
            "records": records,
            "total_count": view.total_count,
            "counter": view.counter()
        }));
        Ok(())
    }

    /// Interactive paging driven by stdin commands
    async fn browse(&self, resource: Resource, args: &QueryArgs) -> Result<()> {
        let mut table = self.build_table(resource, args)?;
        table.load().await;
        self.output_page(resource, &table.view());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let command = match BrowseCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    self.output_error(&e);
                    continue;
                }
            };

            if command == BrowseCommand::Quit {
                break;
            }

            match self.apply(&mut table, resource, command).await {
                Ok(()) => self.output_page(resource, &table.view()),
                Err(e) => self.output_error(&e),
            }
        }
        Ok(())
    }

    /// Apply one browse command to the table
    async fn apply(
        &self,
        table: &mut ConsoleTable,
        resource: Resource,
        command: BrowseCommand,
    ) -> Result<()> {
        match command {
            BrowseCommand::Next => table.next_page().await.map(drop),
            BrowseCommand::Previous => table.previous_page().await.map(drop),
            BrowseCommand::Go(page) => table.change_page(page).await.map(drop),
            BrowseCommand::Refresh => {
                table.refresh().await;
                Ok(())
            }
            BrowseCommand::Deleted => {
                table.items_deleted().await;
                Ok(())
            }
            BrowseCommand::Sort { column, descending } => {
                table.change_sorting(SortingState { column, descending }).await;
                Ok(())
            }
            BrowseCommand::Filter(expressions) => {
                let or = table.controller().query().operation == crate::query::JoinOperation::Or;
                let query = build_query(resource, &expressions, or)?;
                table.change_query(query).await;
                Ok(())
            }
            BrowseCommand::PageSize(page_size) => {
                let preferences = table.preferences().clone().with_page_size(page_size);
                table.confirm_preferences(preferences).await.map(drop)
            }
            BrowseCommand::Quit => Ok(()),
        }
    }

    /// Output the items and pagination state of the current page
    fn output_page(&self, resource: Resource, view: &TableView<'_, JsonValue>) {
        for item in view.items {
            self.output_message(&json!({
                "type": "RECORD",
                "resource": resource.name(),
                "page": view.current_page_index,
                "record": item
            }));
        }

        self.output_message(&json!({
            "type": "PAGE",
            "resource": resource.name(),
            "pagination": view.pagination(),
            "items": view.items.len(),
            "total_count": view.total_count,
            "counter": view.counter(),
            "error": view.error_message
        }));
    }

    /// Output an error without stopping
    fn output_error(&self, error: &Error) {
        self.output_message(&json!({
            "type": "ERROR",
            "message": error.to_string()
        }));
    }

    /// Output a message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Build a validated filter query from expressions
fn build_query(resource: Resource, expressions: &[String], or: bool) -> Result<PropertyFilterQuery> {
    let mut builder = FilterQueryBuilder::for_resource(resource);
    for expression in expressions {
        builder = builder.expression(expression);
    }
    if or {
        builder = builder.or();
    }
    builder.build()
}

fn page_error(view: &TableView<'_, JsonValue>) -> Error {
    Error::Other(format!(
        "Failed to fetch page {}: {}",
        view.current_page_index,
        view.error_message.unwrap_or("unknown error")
    ))
}
