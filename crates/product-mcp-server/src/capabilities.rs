//! Capability listing derived from the dispatch table.

use serde_json::{Value, json};

use product_mcp_json_rpc::{JsonRpcDispatcher, MethodDescriptor, ToJsonRpcError};

/// Snapshot of the advertised methods, taken once when the service is built
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityDescriptor {
    tools: Vec<MethodDescriptor>,
}

impl CapabilityDescriptor {
    pub fn from_dispatcher<E: ToJsonRpcError>(dispatcher: &JsonRpcDispatcher<E>) -> Self {
        Self {
            tools: dispatcher.advertised_descriptors().cloned().collect(),
        }
    }

    pub fn tools(&self) -> &[MethodDescriptor] {
        &self.tools
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    /// Full listing with parameter schemas, as returned by the `capabilities` method
    pub fn to_result(&self) -> Value {
        let tools: Vec<Value> = self.tools.iter().map(MethodDescriptor::to_capability).collect();
        json!({ "capabilities": { "tools": tools } })
    }

    /// Name and description only, for the service metadata endpoint
    pub fn summary(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|tool| json!({ "name": tool.name, "description": tool.description }))
            .collect();
        json!({ "tools": tools })
    }
}
