//! HTTP server for the orphanage registry.
//!
//! Opens the volatile store, builds the router and serves until Ctrl+C.
//! The store and its data live exactly as long as the process.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use orphanage_api::{config::ApiConfig, router::Router, server::Server};
use orphanage_store::{Store, StoreConfig};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the orphanage server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Largest accepted JSON request body in bytes
    #[arg(long, default_value_t = 100 * 1024)]
    max_body_bytes: usize,

    /// Maximum pending store requests
    #[arg(long, default_value_t = 1000)]
    queue_capacity: usize,
}

impl Args {
    fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            queue_capacity: self.queue_capacity,
        }
    }

    fn api_config(&self) -> ApiConfig {
        ApiConfig {
            max_body_bytes: self.max_body_bytes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Store::open(&args.store_config()).context("Failed to open store")?;
    let router = Router::new(store, args.api_config());

    let server = Server::bind(args.addr()?, router)
        .await
        .with_context(|| format!("Failed to bind {}:{}", args.host, args.port))?;

    tracing::info!(
        port = args.port,
        host = %args.host,
        max_body_bytes = args.max_body_bytes,
        "Starting orphanage server"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c")?;
    tracing::info!("Shutting down server");
    server_handle.abort();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases touch process environment, so they share one test.
    #[test]
    fn port_defaults_to_3000_and_reads_port_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("HOST");
        let args = Args::try_parse_from(["orphanage-server"]).unwrap();
        assert_eq!(args.port, 3000);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.addr().unwrap(), "0.0.0.0:3000".parse().unwrap());

        std::env::set_var("PORT", "8081");
        let args = Args::try_parse_from(["orphanage-server"]);
        std::env::remove_var("PORT");
        assert_eq!(args.unwrap().port, 8081);
    }

    #[test]
    fn explicit_port_and_host_build_the_listen_address() {
        let args =
            Args::try_parse_from(["orphanage-server", "--port", "4000", "--host", "127.0.0.1"])
                .unwrap();
        assert_eq!(args.addr().unwrap(), "127.0.0.1:4000".parse().unwrap());
    }

    #[test]
    fn limits_flow_into_library_configs() {
        let args = Args::try_parse_from([
            "orphanage-server",
            "--max-body-bytes",
            "512",
            "--queue-capacity",
            "8",
        ])
        .unwrap();
        assert_eq!(args.api_config().max_body_bytes, 512);
        assert_eq!(args.store_config().queue_capacity, 8);
    }

    #[test]
    fn invalid_host_is_rejected() {
        let args = Args::try_parse_from(["orphanage-server", "--host", "not a host"]).unwrap();
        assert!(args.addr().is_err());
    }
}
