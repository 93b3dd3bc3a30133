//! # Product Search Message Service
//!
//! Wires the read-only [`CatalogStore`] into a fixed dispatch table and answers message
//! envelopes with the product search protocol:
//!
//! | Method | Required params | Result |
//! |---|---|---|
//! | `ping` | - | `{message: "pong", timestamp}` |
//! | `capabilities` | - | `{capabilities: {tools: [...]}}` |
//! | `search_products` | - | `{products: [...], count}` |
//! | `get_product_details` | `product_id` | product, or `{error: "Product not found"}` |
//! | `check_inventory` | `product_id` | inventory status, or `{error: "Product not found"}` |
//!
//! Unknown products are a domain outcome reported inside `result`; unknown methods, missing
//! parameters and internal failures are envelope-level errors.

pub mod capabilities;
pub mod error;
pub mod handlers;
pub mod methods;
pub mod service;

pub use capabilities::CapabilityDescriptor;
pub use error::{ServiceError, ServiceResult};
pub use service::ProductService;

pub use product_mcp_catalog::CatalogStore;
pub use product_mcp_json_rpc::{JsonRpcMessage, JsonRpcRequest, RequestId};

/// Human-readable service name
pub const SERVICE_NAME: &str = "Product Search MCP Service";

/// Service identifier used by health reporting
pub const SERVICE_ID: &str = "product-search-mcp-service";

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
