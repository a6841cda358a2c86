//! catsearch: Command-line interface for the product catalog search MCP server

use anyhow::Result;
use catsearch::config::{app_config::AppConfig, path_resolver};
use catsearch::engine::EngineClient;
use catsearch::projection::{format_for_human, format_for_toolcall};
use catsearch::query::{build_query, SearchParameters};
use clap::{Parser, Subcommand};
use rmcp::{
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{stdin, stdout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// Configuration Loading
// ============================================================================

/// Load configuration: config file (if present) overridden by environment
fn load_config(config_override: Option<&str>) -> Result<AppConfig> {
    let file_config = match config_override {
        Some(path) => AppConfig::from_file(&path_resolver::resolve_path(path)?)?,
        None => {
            let config_path = path_resolver::get_default_config_path();
            if config_path.exists() {
                AppConfig::from_file(&config_path)?
            } else {
                AppConfig::default()
            }
        }
    };
    Ok(file_config.merge_with(&AppConfig::from_env()))
}

/// Build an engine client from configuration plus CLI overrides
fn build_client(config: &AppConfig, engine_url: Option<String>, index: Option<String>) -> EngineClient {
    EngineClient::with_config(
        index.unwrap_or_else(|| config.index().to_string()),
        Some(engine_url.unwrap_or_else(|| config.engine_url().to_string())),
        config.engine_api_key(),
        Some(Duration::from_secs(30)),
        None,
    )
}

// ============================================================================
// MCP Server Implementation
// ============================================================================

/// MCP Server for product catalog search
#[derive(Clone)]
struct CatalogMcpServer {
    client: Arc<EngineClient>,
}

/// Request parameters for the search_catalog tool
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchCatalogParams {
    /// The search query to match against product names and descriptions
    query_string: String,
    /// Filter results by availability (exact match)
    availability: Option<String>,
    /// Filter results by product class. Use exact string matches from the
    /// product_class facet of a preliminary query_string-only search.
    product_class: Option<String>,
    /// Filter results by minimum average rating, a number between 0 and 5
    min_average_rating: Option<f64>,
    /// Number of results to return (default: 10)
    #[serde(default = "default_num_results")]
    num_results: usize,
}

fn default_num_results() -> usize {
    10
}

#[tool(tool_box)]
impl CatalogMcpServer {
    fn new(client: EngineClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Search the product catalog with optional filters
    #[tool(
        description = "Search for products in the catalog using various filters. Sometimes the results will be an imperfect match for the query. If you feel that the results can be improved, refine the query by adding a product_class filter or by modifying the query string to use different search terms."
    )]
    async fn search_catalog(
        &self,
        #[tool(aggr)] params: SearchCatalogParams,
    ) -> Result<CallToolResult, rmcp::Error> {
        let search_params = SearchParameters::new(params.query_string)
            .with_availability(params.availability)
            .with_product_class(params.product_class)
            .with_min_average_rating(params.min_average_rating)
            .with_num_results(params.num_results);

        let body = build_query(&search_params)
            .map_err(|e| rmcp::Error::invalid_params(e.to_string(), None))?;

        tracing::debug!("Issuing catalog search: {}", body);

        let response = self
            .client
            .search(&body)
            .await
            .map_err(|e| rmcp::Error::internal_error(e.to_string(), None))?;

        let output = format_for_toolcall(&response)
            .map_err(|e| rmcp::Error::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }
}

#[tool(tool_box)]
impl ServerHandler for CatalogMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Product catalog search server. Results include a product_class facet; \
                 use its values to refine follow-up searches."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// CLI Implementation
// ============================================================================

/// catsearch: MCP server and CLI for product catalog search
#[derive(Parser)]
#[command(name = "catsearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a configuration file (default: XDG config dir)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize catsearch configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Start the MCP server
    Serve {
        /// Base URL of the search engine
        #[arg(long)]
        engine_url: Option<String>,

        /// Name of the catalog index
        #[arg(long)]
        index: Option<String>,
    },
    /// Search the catalog (for testing)
    Search {
        /// Search query
        query_string: String,

        /// Filter by availability (exact match)
        #[arg(long)]
        availability: Option<String>,

        /// Filter by product class (exact match)
        #[arg(long)]
        product_class: Option<String>,

        /// Filter by minimum average rating (0 to 5)
        #[arg(long)]
        min_rating: Option<f64>,

        /// Number of results to return
        #[arg(short, long)]
        num_results: Option<usize>,

        /// Print the tool-call view with facet counts instead of the human view
        #[arg(long)]
        facets: bool,

        /// Base URL of the search engine
        #[arg(long)]
        engine_url: Option<String>,

        /// Name of the catalog index
        #[arg(long)]
        index: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (to stderr to not interfere with MCP stdio)
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Init { force } => {
            let config_dir = path_resolver::get_config_dir();
            let config_path = config_dir.join("config.toml");

            eprintln!("Initializing catsearch configuration...");
            eprintln!("Config directory: {}", config_dir.display());

            if !config_dir.exists() {
                std::fs::create_dir_all(&config_dir)?;
                eprintln!("Created config directory");
            }

            if config_path.exists() && !force {
                eprintln!("Configuration file already exists: {}", config_path.display());
                eprintln!("Use --force to overwrite");
                return Ok(());
            }

            let default_config = AppConfig::default();
            let toml_content = default_config.to_toml()?;
            std::fs::write(&config_path, &toml_content)?;

            eprintln!("Created configuration file: {}", config_path.display());
            eprintln!("\nConfiguration initialized successfully!");
            eprintln!("Edit {} to customize settings.", config_path.display());

            Ok(())
        }
        Commands::Serve { engine_url, index } => {
            let config = load_config(cli.config.as_deref())?;
            config.validate()?;
            let client = build_client(&config, engine_url, index);

            tracing::info!(
                "Starting MCP server against {} (index: {})",
                client.base_url(),
                client.index()
            );
            eprintln!(
                "catsearch MCP server starting... (engine: {}, index: {})",
                client.base_url(),
                client.index()
            );

            let server = CatalogMcpServer::new(client);

            // Serve via stdio transport
            let transport = (stdin(), stdout());
            let service = server.serve(transport).await?;

            let _quit_reason = service.waiting().await?;
            Ok(())
        }
        Commands::Search {
            query_string,
            availability,
            product_class,
            min_rating,
            num_results,
            facets,
            engine_url,
            index,
        } => {
            let config = load_config(cli.config.as_deref())?;
            config.validate()?;
            let client = build_client(&config, engine_url, index);

            let params = SearchParameters::new(query_string)
                .with_availability(availability)
                .with_product_class(product_class)
                .with_min_average_rating(min_rating)
                .with_num_results(num_results.unwrap_or_else(|| config.default_num_results()));

            let body = build_query(&params)?;
            let response = client.search(&body).await?;

            let output = if facets {
                format_for_toolcall(&response)?
            } else {
                format_for_human(&response)?
            };
            println!("{}", output);

            Ok(())
        }
    }
}
