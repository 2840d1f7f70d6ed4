//! EKS Anywhere Manifests
//!
//! Command line host for the manifest data sources: list them, print their
//! schemas, read a configuration file into a manifest, or serve the HTTP API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

use eksa_manifests::{config::load_config, ApiServer, ApiServerConfig, Error, Provider, Result};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Render EKS Anywhere custom resources as Kubernetes manifests
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every data source type name
    List,

    /// Print the schema of a data source as JSON
    Schema {
        /// Data source type name
        type_name: String,
    },

    /// Read a configuration file and print the resulting state
    Read {
        /// Data source type name
        type_name: String,

        /// YAML or JSON file with metadata and spec
        #[arg(long, short)]
        config: PathBuf,

        /// Print only the rendered manifest
        #[arg(long)]
        yaml_only: bool,
    },

    /// Serve the HTTP API
    Serve {
        /// REST API bind address
        #[arg(long, env = "API_ADDR", default_value = "0.0.0.0:8090")]
        addr: String,
    },
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            for line in error_lines(&e) {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    init_logging(&args)?;

    let provider = Provider::new()?;

    match args.command {
        Command::List => {
            for info in provider.data_sources() {
                println!("{}\t{}", info.type_name, info.kind);
            }
            Ok(())
        }
        Command::Schema { type_name } => {
            let schema = provider.schema(&type_name)?;
            println!("{}", serde_json::to_string_pretty(schema)?);
            Ok(())
        }
        Command::Read {
            type_name,
            config,
            yaml_only,
        } => read(&provider, &type_name, config, yaml_only),
        Command::Serve { addr } => serve(provider, &addr).await,
    }
}

fn read(provider: &Provider, type_name: &str, path: PathBuf, yaml_only: bool) -> Result<()> {
    let config = load_config(&path)?;
    let state = provider.read_state(type_name, config)?;

    if yaml_only {
        print!("{}", state["yaml"].as_str().unwrap_or_default());
    } else {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}

/// Lines printed to stderr for a failed command
fn error_lines(e: &Error) -> Vec<String> {
    match e.diagnostics() {
        Some(diagnostics) => diagnostics.iter().map(ToString::to_string).collect(),
        None => vec![format!("error: {}", e)],
    }
}

async fn serve(provider: Provider, addr: &str) -> Result<()> {
    info!("Starting EKS Anywhere manifests API");
    info!("  Version: {}", eksa_manifests::VERSION);
    info!("  REST API: {}", addr);

    let config = ApiServerConfig {
        rest_addr: addr
            .parse()
            .map_err(|e| Error::Configuration(format!("Invalid REST API address: {}", e)))?,
        ..Default::default()
    };

    let server = ApiServer::new(config, Arc::new(provider))?;
    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    for directive in ["hyper=warn", "tower=warn", "axum=info"] {
        filter = filter.add_directive(parse_directive(directive)?);
    }

    // stdout carries manifests and schemas
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn parse_directive(directive: &str) -> Result<Directive> {
    directive
        .parse()
        .map_err(|e| Error::Configuration(format!("Invalid log directive {}: {}", directive, e)))
}
