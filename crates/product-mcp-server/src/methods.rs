//! Method names and parameter contracts of the dispatch table.

use product_mcp_json_rpc::{MethodDescriptor, ParamDescriptor, ParamType};

pub const PING: &str = "ping";
pub const CAPABILITIES: &str = "capabilities";
pub const SEARCH_PRODUCTS: &str = "search_products";
pub const GET_PRODUCT_DETAILS: &str = "get_product_details";
pub const CHECK_INVENTORY: &str = "check_inventory";

pub fn ping() -> MethodDescriptor {
    MethodDescriptor::new(PING, "Liveness check that echoes an optional timestamp")
        .with_param(ParamDescriptor::optional(
            "timestamp",
            ParamType::String,
            "Opaque value returned unchanged",
        ))
        .unadvertised()
}

pub fn capabilities() -> MethodDescriptor {
    MethodDescriptor::new(CAPABILITIES, "List the tools this service provides").unadvertised()
}

pub fn search_products() -> MethodDescriptor {
    MethodDescriptor::new(SEARCH_PRODUCTS, "Search for products by name or category")
        .with_param(ParamDescriptor::optional(
            "query",
            ParamType::String,
            "Search query for product name",
        ))
        .with_param(ParamDescriptor::optional(
            "category",
            ParamType::String,
            "Product category filter",
        ))
}

pub fn get_product_details() -> MethodDescriptor {
    MethodDescriptor::new(
        GET_PRODUCT_DETAILS,
        "Get detailed information about a specific product",
    )
    .with_param(ParamDescriptor::required(
        "product_id",
        ParamType::String,
        "Product ID",
    ))
}

pub fn check_inventory() -> MethodDescriptor {
    MethodDescriptor::new(CHECK_INVENTORY, "Check stock levels for a product").with_param(
        ParamDescriptor::required("product_id", ParamType::String, "Product ID"),
    )
}
