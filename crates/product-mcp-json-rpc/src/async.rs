use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;

use crate::{
    descriptor::MethodDescriptor,
    error::{FaultDisposition, JsonRpcError, ToJsonRpcError},
    request::{JsonRpcRequest, RequestParams},
    response::JsonRpcMessage,
};

/// Trait for handling a dispatched method call
#[async_trait]
pub trait JsonRpcHandler: Send + Sync {
    /// The error type returned by this handler
    type Error: ToJsonRpcError;

    /// Handle a call whose required parameters have already been checked.
    /// Returns domain errors only - the dispatcher decides how each one is surfaced.
    async fn handle(&self, method: &str, params: &RequestParams) -> Result<Value, Self::Error>;
}

/// A handler backed by a plain function over the parameter bag
pub struct FunctionHandler<F, E> {
    handler_fn: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> FunctionHandler<F, E>
where
    E: ToJsonRpcError,
    F: Fn(&RequestParams) -> Result<Value, E> + Send + Sync,
{
    pub fn new(handler_fn: F) -> Self {
        Self {
            handler_fn,
            _error: PhantomData,
        }
    }
}

#[async_trait]
impl<F, E> JsonRpcHandler for FunctionHandler<F, E>
where
    E: ToJsonRpcError,
    F: Fn(&RequestParams) -> Result<Value, E> + Send + Sync,
{
    type Error = E;

    async fn handle(&self, _method: &str, params: &RequestParams) -> Result<Value, Self::Error> {
        (self.handler_fn)(params)
    }
}

/// One row of the dispatch table
pub struct MethodEntry<E>
where
    E: ToJsonRpcError,
{
    pub descriptor: MethodDescriptor,
    pub handler: Arc<dyn JsonRpcHandler<Error = E>>,
}

/// Method dispatcher: a fixed table from method name to descriptor + handler
pub struct JsonRpcDispatcher<E>
where
    E: ToJsonRpcError,
{
    entries: HashMap<String, MethodEntry<E>>,
    order: Vec<String>,
}

impl<E> JsonRpcDispatcher<E>
where
    E: ToJsonRpcError,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a handler under the descriptor's method name, replacing any previous entry
    pub fn register_method<H>(&mut self, descriptor: MethodDescriptor, handler: H)
    where
        H: JsonRpcHandler<Error = E> + 'static,
    {
        let name = descriptor.name.clone();
        let entry = MethodEntry {
            descriptor,
            handler: Arc::new(handler),
        };
        if self.entries.insert(name.clone(), entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn contains(&self, method: &str) -> bool {
        self.entries.contains_key(method)
    }

    pub fn descriptor(&self, method: &str) -> Option<&MethodDescriptor> {
        self.entries.get(method).map(|entry| &entry.descriptor)
    }

    /// Descriptors of every registered method, in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name))
            .map(|entry| &entry.descriptor)
    }

    /// Descriptors that belong in the capability listing, in registration order
    pub fn advertised_descriptors(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.descriptors().filter(|descriptor| descriptor.advertised)
    }

    /// Get all registered methods, in registration order
    pub fn registered_methods(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Process a request envelope and return exactly one response envelope.
    ///
    /// The id is echoed on every path. Nothing a handler does, including panicking,
    /// escapes as anything other than a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcMessage {
        let JsonRpcRequest { id, method, params } = request;
        let params = params.unwrap_or_default();

        let Some(entry) = self.entries.get(&method) else {
            return JsonRpcMessage::error(JsonRpcError::method_not_found(id, &method));
        };

        if let Some(missing) = entry.descriptor.first_missing_param(&params) {
            return JsonRpcMessage::error(JsonRpcError::missing_param(id, missing));
        }

        let outcome = AssertUnwindSafe(entry.handler.handle(&method, &params))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => JsonRpcMessage::success(id, result),
            Ok(Err(fault)) => match fault.disposition() {
                FaultDisposition::Domain(result) => JsonRpcMessage::success(id, result),
                FaultDisposition::Protocol(error_object) => {
                    JsonRpcMessage::error(JsonRpcError::new(Some(id), error_object))
                }
            },
            Err(panic) => JsonRpcMessage::error(JsonRpcError::internal_error(
                id,
                &panic_details(panic.as_ref()),
            )),
        }
    }
}

impl<E> Default for JsonRpcDispatcher<E>
where
    E: ToJsonRpcError,
{
    fn default() -> Self {
        Self::new()
    }
}

fn panic_details(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
