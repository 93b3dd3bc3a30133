//! # Product Search Demo
//!
//! Walks through the service: capability discovery, a category search, product details and an
//! inventory check.
//!
//! ## Usage
//! ```bash
//! cargo run --bin product-mcp-service &
//! cargo run --bin product-mcp-demo -- --base-url http://localhost:8000
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use product_mcp_client::{ClientConfig, ProductClient};

#[derive(Parser)]
#[command(name = "product-mcp-demo")]
#[command(about = "Demo client for the product search service")]
struct Args {
    /// Service base URL
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,

    /// API prefix the service is mounted under
    #[arg(long, default_value = "/api/v1")]
    api_prefix: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = ClientConfig::new(&args.base_url)
        .with_api_prefix(args.api_prefix)
        .with_timeout(Duration::from_secs(args.timeout));
    let client = ProductClient::new(config)?;

    info!("Connecting to {}", args.base_url);

    println!("\n1. Discovering server capabilities...");
    let capabilities = client
        .discover_capabilities()
        .await
        .with_context(|| format!("Is the service running on {}?", args.base_url))?;
    let tools = capabilities["capabilities"]["tools"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    println!("   Found {} tools:", tools.len());
    for tool in &tools {
        println!(
            "   - {}: {}",
            tool["name"].as_str().unwrap_or_default(),
            tool["description"].as_str().unwrap_or_default()
        );
    }

    println!("\n2. Searching for electronics...");
    let electronics = client.search_products("", "Electronics").await?;
    println!("   Found {} electronics:", electronics["count"]);
    for product in electronics["products"].as_array().into_iter().flatten() {
        println!(
            "   - {}: ${}",
            product["name"].as_str().unwrap_or_default(),
            product["price"]
        );
    }

    println!("\n3. Getting iPhone details...");
    let iphone = client.get_product_details("1").await?;
    if let Some(error) = iphone.get("error") {
        println!("   Lookup failed: {}", error);
    } else {
        println!("   Product: {}", iphone["name"].as_str().unwrap_or_default());
        println!(
            "   Description: {}",
            iphone["description"].as_str().unwrap_or_default()
        );
        println!("   Price: ${}", iphone["price"]);
        println!("   Stock: {} units", iphone["stock"]);
    }

    println!("\n4. Checking Nike shoes inventory...");
    let inventory = client.check_inventory("3").await?;
    if let Some(error) = inventory.get("error") {
        println!("   Lookup failed: {}", error);
    } else {
        println!(
            "   Product: {}",
            inventory["product_name"].as_str().unwrap_or_default()
        );
        println!("   Stock: {} units", inventory["stock"]);
        let available = if inventory["in_stock"].as_bool().unwrap_or(false) {
            "Yes"
        } else {
            "No"
        };
        println!("   Available: {}", available);
    }

    println!("\nDemo completed successfully!");
    Ok(())
}
