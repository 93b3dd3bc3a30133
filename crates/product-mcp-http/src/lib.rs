//! # Product Search HTTP Server
//!
//! HTTP transport for the product search message service. One hyper connection task per
//! client, all sharing a single [`ProductService`](product_mcp_server::ProductService).
//!
//! ## Endpoints
//! - `POST {prefix}/mcp/message`: message envelopes
//! - `GET {prefix}/mcp/capabilities`: service metadata and tool summary
//! - `GET {prefix}/products/search?query=&category=`, `GET {prefix}/products/{id}`,
//!   `GET {prefix}/products/{id}/inventory`, `GET {prefix}/categories`: REST access to the
//!   same catalog, with `404` for unknown products
//! - `GET /`, `GET /health`: service banner and health check

pub mod cors;
pub mod handler;
pub mod rest;
pub mod server;

#[cfg(test)]
mod tests;

// Re-export main types
pub use cors::CorsLayer;
pub use handler::McpMessageHandler;
pub use rest::RestHandler;
pub use server::{HttpProductServer, HttpProductServerBuilder, RequestRouter, ServerConfig};

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::error;

/// Result type for HTTP server operations
pub type Result<T> = std::result::Result<T, HttpServerError>;

/// HTTP transport errors
#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpServerError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            HttpServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HttpServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Response body type used by every route
pub type HttpResponse = Response<Full<Bytes>>;

/// Plain-text response
pub fn text_response(status: StatusCode, body: impl Into<Bytes>) -> HttpResponse {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

/// JSON response; serialization failures degrade to a plain 500
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let mut response = Response::new(Full::new(Bytes::from(bytes)));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(err) => {
            error!("Failed to serialize response body: {}", err);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
