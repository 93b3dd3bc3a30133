//! # Product Search Client
//!
//! Async client for the product search service's message endpoint.
//!
//! ```rust,no_run
//! use product_mcp_client::ProductClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ProductClient::connect("http://localhost:8000")?;
//!
//!     let electronics = client.search_products("", "Electronics").await?;
//!     println!("Found {} products", electronics["count"]);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::ProductClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
