use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mergington::config::{Config, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "mergington",
    version,
    about = "Extracurricular activity signups for Mergington High School",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json). Overrides the configured format.
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the activity signup server
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed file with the initial activities (TOML or JSON)
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Directory served under /static
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Disable CORS headers
        #[arg(long, default_value = "false")]
        no_cors: bool,

        /// Disable per-request logging
        #[arg(long, default_value = "false")]
        no_request_logging: bool,
    },

    /// Print the activities the server would start with
    Activities {
        /// Seed file with the initial activities (TOML or JSON)
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Print as JSON, in the same shape as GET /activities
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    setup_tracing(&config.logging, cli.log_format.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            seed,
            static_dir,
            no_cors,
            no_request_logging,
        } => {
            tracing::info!(
                host = ?host,
                port = ?port,
                seed = ?seed,
                "Starting serve command"
            );
            let params = commands::ServeParams {
                host,
                port,
                seed,
                static_dir,
                disable_cors: no_cors,
                disable_request_logging: no_request_logging,
            };
            commands::activity_server(config, params).await?;
        }

        Commands::Activities { seed, json } => {
            let seed = seed.or(config.seed.path);
            commands::list_activities(seed.as_deref(), json).await?;
        }
    }

    Ok(())
}

fn setup_tracing(logging: &LoggingConfig, format_override: Option<&str>, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("mergington={level},tower_http={level},warn"))
        });

    match format_override.unwrap_or(logging.format.as_str()) {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
        "text" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        other => anyhow::bail!("Unknown log format: {other} (expected text or json)"),
    }

    Ok(())
}
