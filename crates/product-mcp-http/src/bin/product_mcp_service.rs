//! # Product Search MCP Service
//!
//! Serves the seeded catalog over the message endpoint and the REST routes.
//!
//! ## Usage
//! ```bash
//! cargo run --bin product-mcp-service -- --port 8000 --log-level debug
//! ```

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use product_mcp_http::HttpProductServer;

#[derive(Parser)]
#[command(name = "product-mcp-service")]
#[command(about = "Product search service speaking id/method/params envelopes over HTTP")]
struct Args {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Prefix for the message and REST endpoints
    #[arg(long, default_value = "/api/v1")]
    api_prefix: String,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Maximum request body size in bytes
    #[arg(long, default_value = "1048576")]
    max_body_size: usize,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bind_address = SocketAddr::new(args.host, args.port);
    let server = HttpProductServer::builder()
        .bind_address(bind_address)
        .api_prefix(args.api_prefix)
        .cors(!args.no_cors)
        .max_body_size(args.max_body_size)
        .build();

    info!("Starting product search service on {}", bind_address);

    let listener = TcpListener::bind(bind_address).await?;
    server
        .serve_with_shutdown(listener, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", err);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("Product search service stopped");
    Ok(())
}
