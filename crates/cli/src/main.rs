mod config;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use client::MetricoolClient;
use mcp::{Server, ToolHost};
use serde_json::Value;
use tools::Dispatcher;
use tracing_subscriber::EnvFilter;

use config::{Config, SETTINGS_FILE, Settings};
use error::{Error, Result};

const SERVER_NAME: &str = "metricool-mcp";

#[derive(Parser)]
#[command(name = "metricool-mcp")]
#[command(about = "MCP server exposing the Metricool social media API as tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./metricool-mcp.toml when it exists)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over stdio (default)
    Serve,
    /// Print the tool catalog as JSON
    Tools,
    /// Invoke one tool and print its result
    Call {
        /// Tool name, e.g. list_brands
        name: String,
        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Delete a scheduled post
    DeletePost {
        /// Post id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the protocol.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tools) => cmd_tools(),
        Some(Commands::Serve) | None => cmd_serve(open_client(cli.config.as_deref())?).await,
        Some(Commands::Call { name, args }) => {
            cmd_call(open_client(cli.config.as_deref())?, &name, &args).await
        }
        Some(Commands::DeletePost { id }) => {
            cmd_delete_post(open_client(cli.config.as_deref())?, &id).await
        }
    }
}

async fn cmd_serve(client: MetricoolClient) -> Result<()> {
    let server = Server::new(SERVER_NAME, env!("CARGO_PKG_VERSION"), Dispatcher::new(client));
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        tools = server.host().tools().len(),
        "starting"
    );
    server.serve_stdio().await?;
    Ok(())
}

fn cmd_tools() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&tools::catalog())?);
    Ok(())
}

async fn cmd_call(client: MetricoolClient, name: &str, args: &str) -> Result<()> {
    let arguments = parse_arguments(args)?;
    let result = Dispatcher::new(client).dispatch(name, arguments).await;

    println!("{}", result.joined_text());
    if result.is_error {
        return Err(Error::ToolFailed(name.to_string()));
    }
    Ok(())
}

async fn cmd_delete_post(client: MetricoolClient, id: &str) -> Result<()> {
    client.delete_scheduled_post(id).await?;
    println!("Deleted scheduled post {id}");
    Ok(())
}

fn parse_arguments(raw: &str) -> Result<Value> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| Error::InvalidArguments(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::InvalidArguments("expected a JSON object".to_string()));
    }
    Ok(value)
}

fn open_client(path: Option<&Path>) -> Result<MetricoolClient> {
    let config = Config::from_env(load_settings(path)?)?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config.client()?)
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    if let Some(path) = path {
        return Ok(Settings::load(path)?);
    }

    let default_path = Path::new(SETTINGS_FILE);
    if default_path.exists() {
        Ok(Settings::load(default_path)?)
    } else {
        Ok(Settings::default())
    }
}
