//! # Product Catalog
//!
//! Read-only, in-memory product dataset with the lookups the product search service exposes.
//!
//! ```rust
//! use product_mcp_catalog::CatalogStore;
//!
//! let store = CatalogStore::seeded();
//! let electronics = store.search("", "electronics");
//! assert_eq!(electronics.len(), 2);
//! assert!(store.get_inventory("3").unwrap().in_stock);
//! ```
//!
//! The store is built once at startup and never mutated, so a single instance can be shared
//! behind an `Arc` by any number of concurrent readers.

pub mod error;
pub mod model;
pub mod seed;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use model::{InventoryStatus, Product, ProductSummary};
pub use store::CatalogStore;
