//! # Message Envelope Dispatch
//!
//! A transport-agnostic implementation of the JSON-RPC style message protocol used by the
//! product search service: an inbound envelope `{id, method, params}` is resolved against a
//! fixed dispatch table and always answered with either `{id, result}` or `{id, error}`.
//!
//! ## Features
//! - Dispatch table as data: method descriptors carry the required-parameter contract
//! - Domain faults are embedded in `result`, protocol faults surface as envelope errors
//! - Panicking handlers are converted to internal errors instead of unwinding into the transport
//! - Async/await support with the `async` feature

pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod response;
pub mod types;

#[cfg(feature = "async")]
pub mod r#async;

pub mod prelude;

// Re-export main types
pub use descriptor::{MethodDescriptor, ParamDescriptor, ParamType};
pub use error::{
    FaultDisposition, JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject, ProtocolFault,
    ToJsonRpcError,
};
pub use request::{JsonRpcRequest, RequestParams};
pub use response::{JsonRpcMessage, JsonRpcResponse};
pub use types::RequestId;

#[cfg(feature = "async")]
pub use r#async::{FunctionHandler, JsonRpcDispatcher, JsonRpcHandler};

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}
