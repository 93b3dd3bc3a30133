//! Envelope parsing for transports.

use serde_json::{Value, json};

use crate::error::JsonRpcError;
use crate::request::JsonRpcRequest;
use crate::types::RequestId;

/// Parse a raw body into a request envelope.
///
/// Bodies that are not JSON yield a parse error with a null id. JSON that is not an envelope
/// (missing `id` or `method`, wrong member types) yields an invalid-request error that echoes
/// the id when one can be recovered.
pub fn parse_json_rpc_message(body: &str) -> Result<JsonRpcRequest, JsonRpcError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| JsonRpcError::parse_error(Some(json!(e.to_string()))))?;

    parse_json_rpc_value(value)
}

/// Same as [`parse_json_rpc_message`] for an already decoded JSON value
pub fn parse_json_rpc_value(value: Value) -> Result<JsonRpcRequest, JsonRpcError> {
    let id = value
        .get("id")
        .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());

    serde_json::from_value::<JsonRpcRequest>(value)
        .map_err(|e| JsonRpcError::invalid_request(id, Some(json!(e.to_string()))))
}
