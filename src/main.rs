//! `file-router` command line.
//!
//! - `routes <DIR>`: print the route table a directory translates to
//! - `serve <DIR>`: serve placeholder handlers for every route file

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;

use file_router::config::{load_config, FileRouterConfig};
use file_router::http::{shutdown_signal, PreviewServer};
use file_router::observability::logging::init_logging;
use file_router::routing::{discover, Discovery, RouteFile};

#[derive(Parser)]
#[command(name = "file-router")]
#[command(about = "Translate a directory tree into an axum route table", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log loader progress at info level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table derived from a directory
    Routes {
        /// Root of the route tree
        dir: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Serve preview handlers for every route file
    Serve {
        /// Root of the route tree
        dir: PathBuf,

        /// Bind address, overrides the config file
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FileRouterConfig::default(),
    };
    if cli.verbose {
        config.loader.verbose = true;
    }

    init_logging(&config.observability)?;

    match cli.command {
        Commands::Routes { dir, json } => print_routes(&dir, &config, json)?,
        Commands::Serve { dir, bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            serve(&dir, config).await?;
        }
    }

    Ok(())
}

/// One line of the `routes` output.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct RouteRow {
    route: String,
    kind: &'static str,
    tag: String,
    params: Vec<String>,
    source: PathBuf,
}

impl From<&RouteFile> for RouteRow {
    fn from(file: &RouteFile) -> Self {
        Self {
            route: file.display_prefix().to_string(),
            kind: if file.dynamic { "dynamic" } else { "static" },
            tag: file.tag(),
            params: file.params.clone(),
            source: file.relative.clone(),
        }
    }
}

fn print_routes(
    dir: &Path,
    config: &FileRouterConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Discovery { files, skipped } = discover(dir, &config.loader)?;
    let rows: Vec<RouteRow> = files.iter().map(RouteRow::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let route_width = column_width("ROUTE", rows.iter().map(|r| r.route.len()));
    let tag_width = column_width("TAG", rows.iter().map(|r| r.tag.len()));
    let params: Vec<String> = rows.iter().map(|r| r.params.join(",")).collect();
    let params_width = column_width("PARAMS", params.iter().map(String::len));

    println!(
        "{:<route_width$}  {:<7}  {:<tag_width$}  {:<params_width$}  SOURCE",
        "ROUTE", "KIND", "TAG", "PARAMS"
    );
    for (row, params) in rows.iter().zip(&params) {
        println!(
            "{:<route_width$}  {:<7}  {:<tag_width$}  {:<params_width$}  {}",
            row.route,
            row.kind,
            row.tag,
            params,
            row.source.display()
        );
    }

    for skip in &skipped {
        eprintln!("skipped {} ({})", skip.path.display(), skip.reason);
    }
    Ok(())
}

fn column_width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.max().unwrap_or(0).max(header.len())
}

async fn serve(dir: &Path, config: FileRouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let server = PreviewServer::from_directory(dir, &config)?;
    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
