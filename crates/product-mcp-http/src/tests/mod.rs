//! Test modules for product-mcp-http
//!
//! Requests are driven straight through [`RequestRouter`](crate::RequestRouter) with in-memory
//! bodies; socket-level coverage lives in the workspace `tests` crate.

pub mod rest_endpoint_tests;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request};
use serde_json::Value;

use crate::{HttpResponse, RequestRouter, ServerConfig};
use product_mcp_server::ProductService;

pub(crate) fn router(config: ServerConfig) -> RequestRouter {
    RequestRouter::new(&config, ProductService::seeded())
}

pub(crate) fn default_router() -> RequestRouter {
    router(ServerConfig::default())
}

pub(crate) fn get(path: &str) -> Request<Full<Bytes>> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Full::new(Bytes::new()))
        .unwrap()
}

pub(crate) fn post_json(path: &str, body: impl Into<Bytes>) -> Request<Full<Bytes>> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Full::new(body.into()))
        .unwrap()
}

pub(crate) async fn body_bytes(response: HttpResponse) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub(crate) async fn body_json(response: HttpResponse) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
