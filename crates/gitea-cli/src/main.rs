mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitea_api::Pagination;

use commands::api::Body;
use config::{default_config_path, Config};

#[derive(Parser)]
#[command(name = "gitea")]
#[command(about = "Authenticated requests against a Gitea API", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/gitea-api/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// GET an endpoint and print the JSON response
    Get {
        /// API path, e.g. /repos/owner/name
        path: String,
        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query")]
        query: Vec<String>,
    },
    /// POST a JSON body to an endpoint
    Post {
        /// API path, e.g. /repos/owner/name/issues
        path: String,
        /// Inline JSON body
        #[arg(short, long, conflicts_with = "file")]
        data: Option<String>,
        /// Read the JSON body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// GET a list endpoint, following pages via x-total-count
    List {
        /// API path, e.g. /repos/owner/name/issues
        path: String,
        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query")]
        query: Vec<String>,
        /// Fetch only this page (fetches all pages when omitted)
        #[arg(short, long)]
        page: Option<u32>,
        /// Page size (default: 100)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Show the effective configuration (file + environment)
    Show,
    /// Check that both the API URL and key are configured
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)?.with_env();

    match cli.command {
        Commands::Get { path, query } => commands::api::handle_get(&config, &path, &query).await,
        Commands::Post { path, data, file } => {
            let body = match (data, file) {
                (Some(data), _) => Body::Inline(data),
                (None, Some(file)) => Body::File(file),
                (None, None) => Body::Empty,
            };
            commands::api::handle_post(&config, &path, body).await
        }
        Commands::List {
            path,
            query,
            page,
            limit,
        } => {
            let pagination = Pagination { page, limit };
            commands::api::handle_list(&config, &path, &query, pagination).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::handle_config_path(&config_path);
                Ok(())
            }
            ConfigAction::Show => {
                commands::config::handle_config_show(&config_path, &config);
                Ok(())
            }
            ConfigAction::Check => commands::config::handle_config_check(&config),
        },
    }
}
