//! Method handlers for the product search dispatch table.
//!
//! Each handler owns a shared reference to the catalog and reads its parameters through the
//! typed accessors on [`RequestParams`]. Required parameters are already known to be present
//! when a handler runs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use product_mcp_catalog::{CatalogStore, ProductSummary};
use product_mcp_json_rpc::{JsonRpcHandler, RequestParams};

use crate::capabilities::CapabilityDescriptor;
use crate::error::{ServiceError, ServiceResult};

/// `ping`: `{message: "pong", timestamp}` with the timestamp passed through untouched
pub fn ping(params: &RequestParams) -> ServiceResult<Value> {
    let timestamp = params.get("timestamp").cloned().unwrap_or(Value::Null);
    Ok(json!({ "message": "pong", "timestamp": timestamp }))
}

/// `capabilities`: serves a listing computed once at startup
pub struct CapabilitiesHandler {
    listing: Value,
}

impl CapabilitiesHandler {
    pub fn new(capabilities: &CapabilityDescriptor) -> Self {
        Self {
            listing: capabilities.to_result(),
        }
    }
}

#[async_trait]
impl JsonRpcHandler for CapabilitiesHandler {
    type Error = ServiceError;

    async fn handle(&self, _method: &str, _params: &RequestParams) -> ServiceResult<Value> {
        Ok(self.listing.clone())
    }
}

#[derive(Serialize)]
struct SearchResult {
    products: Vec<ProductSummary>,
    count: usize,
}

/// `search_products`: optional `query` and `category`, both defaulting to match-all
pub struct SearchProductsHandler {
    store: Arc<CatalogStore>,
}

impl SearchProductsHandler {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JsonRpcHandler for SearchProductsHandler {
    type Error = ServiceError;

    async fn handle(&self, _method: &str, params: &RequestParams) -> ServiceResult<Value> {
        let query = params.get_str_or_default("query")?;
        let category = params.get_str_or_default("category")?;

        let products = self.store.search(query, category);
        debug!(query, category, hits = products.len(), "Product search");

        let count = products.len();
        Ok(serde_json::to_value(SearchResult { products, count })?)
    }
}

/// `get_product_details`: full product record for `product_id`
pub struct ProductDetailsHandler {
    store: Arc<CatalogStore>,
}

impl ProductDetailsHandler {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JsonRpcHandler for ProductDetailsHandler {
    type Error = ServiceError;

    async fn handle(&self, _method: &str, params: &RequestParams) -> ServiceResult<Value> {
        let product_id = params.require_str("product_id")?;
        let product = self.store.get_details(product_id)?;
        Ok(serde_json::to_value(product)?)
    }
}

/// `check_inventory`: stock level and availability for `product_id`
pub struct InventoryHandler {
    store: Arc<CatalogStore>,
}

impl InventoryHandler {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JsonRpcHandler for InventoryHandler {
    type Error = ServiceError;

    async fn handle(&self, _method: &str, params: &RequestParams) -> ServiceResult<Value> {
        let product_id = params.require_str("product_id")?;
        let inventory = self.store.get_inventory(product_id)?;
        Ok(serde_json::to_value(inventory)?)
    }
}
