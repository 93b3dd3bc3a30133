use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

use crate::types::RequestId;

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => crate::error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => crate::error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => crate::error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => crate::error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => crate::error_codes::INTERNAL_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
        }
    }
}

/// Error object carried in the `error` member of a response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: JsonRpcErrorCode, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: message.unwrap_or_else(|| code.message().to_string()),
            data,
        }
    }

    pub fn parse_error(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::ParseError, None, data)
    }

    pub fn invalid_request(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::InvalidRequest, None, data)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::MethodNotFound,
            Some(format!("Method not found: {}", method)),
            None,
        )
    }

    pub fn invalid_params(message: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::InvalidParams,
            Some(message.to_string()),
            None,
        )
    }

    pub fn missing_param(name: &str) -> Self {
        Self::invalid_params(&format!("Missing required parameter: {}", name))
    }

    pub fn internal_error(details: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::InternalError,
            Some(format!("Internal error: {}", details)),
            None,
        )
    }
}

/// Error response envelope: `{"id": ..., "error": {...}}`
///
/// `id` is `None` only when the transport could not recover one from a malformed body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub id: Option<RequestId>,
    pub error: JsonRpcErrorObject,
}

impl JsonRpcError {
    pub fn new(id: Option<RequestId>, error: JsonRpcErrorObject) -> Self {
        Self { id, error }
    }

    pub fn parse_error(data: Option<Value>) -> Self {
        Self::new(None, JsonRpcErrorObject::parse_error(data))
    }

    pub fn invalid_request(id: Option<RequestId>, data: Option<Value>) -> Self {
        Self::new(id, JsonRpcErrorObject::invalid_request(data))
    }

    pub fn method_not_found(id: RequestId, method: &str) -> Self {
        Self::new(Some(id), JsonRpcErrorObject::method_not_found(method))
    }

    pub fn missing_param(id: RequestId, name: &str) -> Self {
        Self::new(Some(id), JsonRpcErrorObject::missing_param(name))
    }

    pub fn internal_error(id: RequestId, details: &str) -> Self {
        Self::new(Some(id), JsonRpcErrorObject::internal_error(details))
    }

    pub fn code(&self) -> i64 {
        self.error.code
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON-RPC Error {}: {}",
            self.error.code, self.error.message
        )
    }
}

impl std::error::Error for JsonRpcError {}

/// How a handler fault is surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum FaultDisposition {
    /// Business-level miss, returned inside a success `result`
    Domain(Value),
    /// Request-shape or execution failure, returned as the envelope `error`
    Protocol(JsonRpcErrorObject),
}

impl FaultDisposition {
    /// Domain fault in the `{"error": "<message>"}` shape callers inspect for
    pub fn domain_message(message: impl Into<String>) -> Self {
        FaultDisposition::Domain(json!({ "error": message.into() }))
    }
}

/// Trait for handler errors; each error decides whether it is a domain or a protocol fault
pub trait ToJsonRpcError: std::error::Error + Send + Sync + 'static {
    fn disposition(&self) -> FaultDisposition;
}

/// Protocol-level faults raised while validating or executing a call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolFault {
    #[error("Missing required parameter: {0}")]
    MissingParam(String),

    #[error("Invalid parameter: {name} must be a {expected}")]
    InvalidParam { name: String, expected: String },

    #[error("{0}")]
    Internal(String),
}

impl ProtocolFault {
    pub fn to_error_object(&self) -> JsonRpcErrorObject {
        match self {
            ProtocolFault::MissingParam(name) => JsonRpcErrorObject::missing_param(name),
            ProtocolFault::InvalidParam { .. } => {
                JsonRpcErrorObject::invalid_params(&self.to_string())
            }
            ProtocolFault::Internal(details) => JsonRpcErrorObject::internal_error(details),
        }
    }
}

impl ToJsonRpcError for ProtocolFault {
    fn disposition(&self) -> FaultDisposition {
        FaultDisposition::Protocol(self.to_error_object())
    }
}
