use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use mergington::config::Config;
use mergington::metrics;
use mergington::server::{ActivityServer, ServerConfigBuilder};

use super::load_registry;

/// Command-line overrides for the activity server
#[derive(Debug, Default)]
pub struct ServeParams {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub seed: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub disable_cors: bool,
    pub disable_request_logging: bool,
}

/// Start the activity server
pub async fn activity_server(config: Config, params: ServeParams) -> Result<()> {
    let mut bind_address = config.server.bind_address;
    if let Some(host) = params.host {
        bind_address.set_ip(host);
    }
    if let Some(port) = params.port {
        bind_address.set_port(port);
    }

    let mut builder = ServerConfigBuilder::from_config(&config.server).bind_address(bind_address);
    if let Some(dir) = params.static_dir {
        builder = builder.static_dir(dir);
    }
    if params.disable_cors {
        builder = builder.enable_cors(false);
    }
    if params.disable_request_logging {
        builder = builder.enable_request_logging(false);
    }
    let server_config = builder.build()?;

    let seed = params.seed.or(config.seed.path);
    let registry = load_registry(seed.as_deref())?;

    if !metrics::init_metrics() {
        tracing::warn!("Continuing without metrics");
    }

    let server =
        ActivityServer::new(server_config, registry).context("Failed to create activity server")?;

    println!("{}", server.info().display());
    println!();
    println!("API Endpoints:");
    println!("  GET    /activities                      - List all activities");
    println!("  GET    /activities/{{name}}               - Get one activity");
    println!("  POST   /activities/{{name}}/signup        - Sign up ?email=");
    println!("  DELETE /activities/{{name}}/unregister    - Unregister ?email=");
    println!("  GET    /health                          - Health check");
    println!("  GET    /metrics                         - Prometheus metrics endpoint");
    println!();
    println!("Open http://{bind_address}/ in a browser.");
    println!("Press Ctrl+C to stop.\n");

    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Activity server stopped.");
    Ok(())
}
