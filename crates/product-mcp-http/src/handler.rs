//! HTTP request handler for the message endpoint

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Request, StatusCode};
use tracing::{debug, warn};

use product_mcp_json_rpc::dispatch::parse_json_rpc_message;
use product_mcp_server::ProductService;

use crate::{HttpResponse, HttpServerError, Result, json_response, text_response};

/// Turns HTTP POST bodies into envelopes for the [`ProductService`] and serializes the answer.
///
/// Every envelope that parses gets a `200` with either a success or an error envelope;
/// only transport-level problems (content type, size, encoding, malformed JSON) use 4xx codes.
#[derive(Clone)]
pub struct McpMessageHandler {
    service: ProductService,
    max_body_size: usize,
}

impl McpMessageHandler {
    pub fn new(service: ProductService, max_body_size: usize) -> Self {
        Self {
            service,
            max_body_size,
        }
    }

    /// Handle a message envelope sent over HTTP POST
    pub async fn handle_message<B>(&self, req: Request<B>) -> HttpResponse
    where
        B: Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("");

        if !is_json_media_type(content_type) {
            warn!("Invalid content type: {:?}", content_type);
            return text_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json",
            );
        }

        let body_bytes = match self.read_body(req).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("Rejected request body: {}", err);
                return text_response(err.status_code(), err.to_string());
            }
        };

        let body_str = match std::str::from_utf8(&body_bytes) {
            Ok(s) => s,
            Err(err) => {
                warn!("Invalid UTF-8 in request body: {}", err);
                return text_response(StatusCode::BAD_REQUEST, "Request body must be valid UTF-8");
            }
        };

        debug!("Received message: {}", body_str);

        let request = match parse_json_rpc_message(body_str) {
            Ok(request) => request,
            Err(rpc_err) => {
                warn!("Malformed envelope: {}", rpc_err);
                return json_response(StatusCode::BAD_REQUEST, &rpc_err);
            }
        };

        let response = self.service.handle(request).await;
        json_response(StatusCode::OK, &response)
    }

    async fn read_body<B>(&self, req: Request<B>) -> Result<Bytes>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let limit = self.max_body_size;

        let declared_length = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|len| len.to_str().ok())
            .and_then(|len| len.parse::<usize>().ok());
        if declared_length.is_some_and(|len| len > limit) {
            return Err(HttpServerError::PayloadTooLarge { limit });
        }

        match Limited::new(req.into_body(), limit).collect().await {
            Ok(collected) => Ok(collected.to_bytes()),
            Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
                Err(HttpServerError::PayloadTooLarge { limit })
            }
            Err(err) => Err(HttpServerError::InvalidRequest(format!(
                "Failed to read request body: {}",
                err
            ))),
        }
    }
}

/// `application/json`, ignoring case, surrounding whitespace and any parameters
fn is_json_media_type(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    media_type.eq_ignore_ascii_case("application/json")
}
