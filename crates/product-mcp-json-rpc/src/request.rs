use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ProtocolFault;
use crate::types::RequestId;

/// Parameters for a message envelope
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequestParams {
    /// Positional parameters as an array
    Array(Vec<Value>),
    /// Named parameters as an object
    Object(HashMap<String, Value>),
}

impl Default for RequestParams {
    fn default() -> Self {
        RequestParams::Object(HashMap::new())
    }
}

/// `null`, `""`, `[]` and `{}` count as absent for required-parameter checks.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

impl RequestParams {
    /// Get a parameter by name (object params only)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            RequestParams::Object(map) => map.get(key),
            RequestParams::Array(_) => None,
        }
    }

    /// True when the named parameter is present and not blank
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !is_blank(value))
    }

    /// Typed string accessor: `Ok(None)` when absent or null, an error for any other JSON type
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ProtocolFault> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ProtocolFault::InvalidParam {
                name: key.to_string(),
                expected: "string".to_string(),
            }),
        }
    }

    /// Optional string parameter defaulting to `""`
    pub fn get_str_or_default(&self, key: &str) -> Result<&str, ProtocolFault> {
        Ok(self.get_str(key)?.unwrap_or(""))
    }

    /// Required string parameter; blank values are reported as missing
    pub fn require_str(&self, key: &str) -> Result<&str, ProtocolFault> {
        match self.get_str(key)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(ProtocolFault::MissingParam(key.to_string())),
        }
    }
}

impl From<HashMap<String, Value>> for RequestParams {
    fn from(map: HashMap<String, Value>) -> Self {
        RequestParams::Object(map)
    }
}

impl From<Vec<Value>> for RequestParams {
    fn from(vec: Vec<Value>) -> Self {
        RequestParams::Array(vec)
    }
}

/// An inbound message envelope: `{"id": ..., "method": ..., "params": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: String, params: Option<RequestParams>) -> Self {
        Self { id, method, params }
    }

    /// Create a new request with no parameters
    pub fn new_no_params(id: RequestId, method: String) -> Self {
        Self::new(id, method, None)
    }

    /// Create a new request with object parameters
    pub fn new_with_object_params(
        id: RequestId,
        method: String,
        params: HashMap<String, Value>,
    ) -> Self {
        Self::new(id, method, Some(RequestParams::Object(params)))
    }

    /// Get a parameter by name (if params are an object)
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.as_ref()?.get(name)
    }
}
