//! The product search message service.

use std::sync::Arc;

use tracing::{debug, error};

use product_mcp_catalog::CatalogStore;
use product_mcp_json_rpc::error_codes::INTERNAL_ERROR;
use product_mcp_json_rpc::{FunctionHandler, JsonRpcDispatcher, JsonRpcMessage, JsonRpcRequest};

use crate::capabilities::CapabilityDescriptor;
use crate::error::ServiceError;
use crate::handlers::{
    CapabilitiesHandler, InventoryHandler, ProductDetailsHandler, SearchProductsHandler, ping,
};
use crate::methods;

/// Stateless message handler over a shared, read-only catalog.
///
/// Cloning is cheap; every clone shares the same dispatch table and store.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<CatalogStore>,
    dispatcher: Arc<JsonRpcDispatcher<ServiceError>>,
    capabilities: Arc<CapabilityDescriptor>,
}

impl ProductService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        let mut dispatcher = JsonRpcDispatcher::new();

        dispatcher.register_method(
            methods::search_products(),
            SearchProductsHandler::new(Arc::clone(&store)),
        );
        dispatcher.register_method(
            methods::get_product_details(),
            ProductDetailsHandler::new(Arc::clone(&store)),
        );
        dispatcher.register_method(
            methods::check_inventory(),
            InventoryHandler::new(Arc::clone(&store)),
        );

        // Snapshot the advertised methods before the built-ins join the table
        let capabilities = CapabilityDescriptor::from_dispatcher(&dispatcher);

        dispatcher.register_method(methods::ping(), FunctionHandler::new(ping));
        dispatcher.register_method(
            methods::capabilities(),
            CapabilitiesHandler::new(&capabilities),
        );

        debug!(
            methods = ?dispatcher.registered_methods(),
            products = store.len(),
            "Product service ready"
        );

        Self {
            store,
            dispatcher: Arc::new(dispatcher),
            capabilities: Arc::new(capabilities),
        }
    }

    /// Service over the built-in catalog
    pub fn seeded() -> Self {
        Self::new(Arc::new(CatalogStore::seeded()))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn capabilities(&self) -> &CapabilityDescriptor {
        &self.capabilities
    }

    pub fn registered_methods(&self) -> Vec<String> {
        self.dispatcher.registered_methods()
    }

    /// Answer one envelope. Always returns a response carrying the request's id.
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcMessage {
        debug!(method = %request.method, id = %request.id, "Dispatching message");

        let response = self.dispatcher.handle_request(request).await;

        if let Some(error) = response.error_object() {
            if error.code == INTERNAL_ERROR {
                error!(code = error.code, message = %error.message, "Dispatch failed");
            } else {
                debug!(code = error.code, message = %error.message, "Protocol fault");
            }
        }

        response
    }
}

impl Default for ProductService {
    fn default() -> Self {
        Self::seeded()
    }
}
