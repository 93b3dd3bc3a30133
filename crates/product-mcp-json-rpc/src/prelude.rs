//! # Message Dispatch Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use product_mcp_json_rpc::prelude::*;
//! ```

pub use crate::descriptor::{MethodDescriptor, ParamDescriptor, ParamType};
pub use crate::error::{
    FaultDisposition, JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject, ProtocolFault,
    ToJsonRpcError,
};
pub use crate::request::{JsonRpcRequest, RequestParams};
pub use crate::response::{JsonRpcMessage, JsonRpcResponse};
pub use crate::types::RequestId;

#[cfg(feature = "async")]
pub use crate::r#async::{FunctionHandler, JsonRpcDispatcher, JsonRpcHandler};

pub use crate::error_codes::*;
