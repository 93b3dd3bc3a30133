//! End-to-end tests for `ProductClient` against a running server

mod test_helpers;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use product_mcp_catalog::{CatalogStore, seed::seed_products};
use product_mcp_client::{ClientConfig, ClientError, ProductClient};
use product_mcp_http::HttpProductServer;
use product_mcp_server::ProductService;
use test_helpers::TestServer;

#[tokio::test]
async fn test_demo_walkthrough() {
    let server = TestServer::start().await;
    let client = ProductClient::connect(server.base_url()).unwrap();

    let capabilities = client.discover_capabilities().await.unwrap();
    let tools = capabilities["capabilities"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 3);

    let electronics = client.search_products("", "Electronics").await.unwrap();
    assert_eq!(electronics["count"], 2);

    let iphone = client.get_product_details("1").await.unwrap();
    assert_eq!(iphone["name"], "iPhone 15 Pro");
    assert_eq!(iphone["description"], "Latest iPhone with titanium design");

    let inventory = client.check_inventory("3").await.unwrap();
    assert_eq!(inventory["product_name"], "Nike Air Max");
    assert_eq!(inventory["in_stock"], true);
}

#[tokio::test]
async fn test_domain_fault_is_a_result() {
    let server = TestServer::start().await;
    let client = ProductClient::connect(server.base_url()).unwrap();

    let result = client.get_product_details("999").await.unwrap();
    assert_eq!(result, json!({"error": "Product not found"}));
}

#[tokio::test]
async fn test_protocol_faults_are_server_errors() {
    let server = TestServer::start().await;
    let client = ProductClient::connect(server.base_url()).unwrap();

    let err = client.call("foo", json!({})).await.unwrap_err();
    assert_eq!(err.code(), Some(-32601));

    let err = client.get_product_details("").await.unwrap_err();
    match err {
        ClientError::ServerError { code, message, .. } => {
            assert_eq!(code, -32602);
            assert!(message.contains("product_id"));
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ping_and_health() {
    let server = TestServer::start().await;
    let client = ProductClient::connect(server.base_url()).unwrap();

    let pong = client.ping(Some(json!("2024-05-01T12:00:00Z"))).await.unwrap();
    assert_eq!(pong, json!({"message": "pong", "timestamp": "2024-05-01T12:00:00Z"}));

    let health = client.health().await.unwrap();
    assert_eq!(health["service"], "product-search-mcp-service");
}

#[tokio::test]
async fn test_custom_catalog_and_prefix() {
    let mut products = seed_products();
    products[0].stock = 0;
    let service = ProductService::new(Arc::new(CatalogStore::new(products)));
    let server = TestServer::start_with(
        HttpProductServer::builder()
            .api_prefix("/catalog")
            .service(service),
    )
    .await;

    let client = ProductClient::new(
        ClientConfig::new(server.base_url())
            .with_api_prefix("/catalog")
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap();

    let inventory = client.check_inventory("1").await.unwrap();
    assert_eq!(inventory["stock"], 0);
    assert_eq!(inventory["in_stock"], false);
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    let server = TestServer::start().await;
    let base_url = server.base_url();
    server.stop().await;

    let client = ProductClient::new(
        ClientConfig::new(base_url).with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.discover_capabilities().await.unwrap_err();
    assert!(matches!(err, ClientError::Connection(_)));
}

#[tokio::test]
async fn test_wrong_prefix_is_http_error() {
    let server = TestServer::start().await;
    let client = ProductClient::new(
        ClientConfig::new(server.base_url()).with_api_prefix("/nowhere"),
    )
    .unwrap();

    let err = client.discover_capabilities().await.unwrap_err();
    match err {
        ClientError::Http { status, .. } => assert_eq!(status, 404),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}
