//! Plain REST access to the catalog, plus service metadata endpoints.
//!
//! Unlike the message endpoint, a missing product here is a `404`.

use std::collections::HashMap;

use hyper::StatusCode;
use serde_json::json;

use product_mcp_server::{ProductService, SERVICE_ID, SERVICE_NAME, SERVICE_VERSION};

use crate::{HttpResponse, json_response};

const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Clone)]
pub struct RestHandler {
    service: ProductService,
    api_prefix: String,
}

impl RestHandler {
    pub fn new(service: ProductService, api_prefix: impl Into<String>) -> Self {
        Self {
            service,
            api_prefix: api_prefix.into(),
        }
    }

    /// `GET /products/search?query=&category=`
    pub fn search_products(&self, query_string: Option<&str>) -> HttpResponse {
        let params = parse_query(query_string.unwrap_or(""));
        let query = params.get("query").map(String::as_str).unwrap_or("");
        let category = params.get("category").map(String::as_str).unwrap_or("");

        let results = self.service.store().search(query, category);
        json_response(StatusCode::OK, &results)
    }

    /// `GET /products/{id}`
    pub fn get_product(&self, product_id: &str) -> HttpResponse {
        match self.service.store().get_details(product_id) {
            Ok(product) => json_response(StatusCode::OK, &product),
            Err(_) => not_found(PRODUCT_NOT_FOUND),
        }
    }

    /// `GET /products/{id}/inventory`
    pub fn check_inventory(&self, product_id: &str) -> HttpResponse {
        match self.service.store().get_inventory(product_id) {
            Ok(inventory) => json_response(StatusCode::OK, &inventory),
            Err(_) => not_found(PRODUCT_NOT_FOUND),
        }
    }

    /// `GET /categories`
    pub fn categories(&self) -> HttpResponse {
        json_response(
            StatusCode::OK,
            &json!({ "categories": self.service.store().list_categories() }),
        )
    }

    /// `GET /mcp/capabilities`
    pub fn capabilities(&self) -> HttpResponse {
        json_response(
            StatusCode::OK,
            &json!({
                "service": SERVICE_NAME,
                "version": SERVICE_VERSION,
                "capabilities": self.service.capabilities().summary(),
                "available_categories": self.service.store().list_categories(),
            }),
        )
    }

    /// `GET /`
    pub fn root(&self) -> HttpResponse {
        json_response(
            StatusCode::OK,
            &json!({
                "message": format!("{} is running", SERVICE_NAME),
                "version": SERVICE_VERSION,
                "service": SERVICE_NAME,
                "endpoints": {
                    "mcp": format!("{}/mcp/message", self.api_prefix),
                    "capabilities": format!("{}/mcp/capabilities", self.api_prefix),
                },
            }),
        )
    }

    /// `GET /health`
    pub fn health(&self) -> HttpResponse {
        json_response(
            StatusCode::OK,
            &json!({
                "status": "healthy",
                "service": SERVICE_ID,
                "version": SERVICE_VERSION,
            }),
        )
    }
}

pub fn not_found(detail: &str) -> HttpResponse {
    json_response(StatusCode::NOT_FOUND, &json!({ "detail": detail }))
}

/// Decode an `application/x-www-form-urlencoded` query string. Later keys win.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Percent-decode one query or path component, treating `+` as a space.
/// Invalid UTF-8 after decoding falls back to the raw text.
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
