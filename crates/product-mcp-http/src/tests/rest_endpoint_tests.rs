//! REST endpoint, CORS and routing tests

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, StatusCode};
use serde_json::json;

use super::{body_json, default_router, get, router};
use crate::ServerConfig;

#[tokio::test]
async fn test_search_by_query_string() {
    let router = default_router();

    let response = router
        .route(get("/api/v1/products/search?query=air+max"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Nike Air Max");

    let response = router
        .route(get("/api/v1/products/search?category=electronics"))
        .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = router.route(get("/api/v1/products/search")).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_product_details() {
    let router = default_router();

    let response = router.route(get("/api/v1/products/2")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "MacBook Air M3");
    assert_eq!(body["stock"], 25);

    let response = router.route(get("/api/v1/products/999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Product not found"})
    );
}

#[tokio::test]
async fn test_inventory() {
    let router = default_router();

    let response = router.route(get("/api/v1/products/4/inventory")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["product_id"], "4");
    assert_eq!(body["in_stock"], true);

    let response = router.route(get("/api/v1/products/999/inventory")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_sorted() {
    let router = default_router();

    let response = router.route(get("/api/v1/categories")).await;
    assert_eq!(
        body_json(response).await,
        json!({"categories": ["Appliances", "Electronics", "Footwear"]})
    );
}

#[tokio::test]
async fn test_capabilities_metadata() {
    let router = default_router();

    let response = router.route(get("/api/v1/mcp/capabilities")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["service"], "Product Search MCP Service");
    assert_eq!(body["version"], "0.1.0");
    let tools = body["capabilities"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 3);
    assert_eq!(tools[0]["name"], "search_products");
    assert!(tools[0].get("parameters").is_none());
    assert_eq!(
        body["available_categories"],
        json!(["Appliances", "Electronics", "Footwear"])
    );
}

#[tokio::test]
async fn test_root_and_health() {
    let router = default_router();

    let body = body_json(router.route(get("/")).await).await;
    assert_eq!(body["message"], "Product Search MCP Service is running");
    assert_eq!(body["endpoints"]["mcp"], "/api/v1/mcp/message");
    assert_eq!(body["endpoints"]["capabilities"], "/api/v1/mcp/capabilities");

    let body = body_json(router.route(get("/health")).await).await;
    assert_eq!(
        body,
        json!({"status": "healthy", "service": "product-search-mcp-service", "version": "0.1.0"})
    );
}

#[tokio::test]
async fn test_unknown_path() {
    let router = default_router();

    let response = router.route(get("/api/v1/orders")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn test_post_on_rest_path_is_method_not_allowed() {
    let router = default_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/categories")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = router.route(request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get("Allow").unwrap(), "GET");
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let router = default_router();

    for path in ["/health", "/api/v1/products/999", "/nowhere"] {
        let response = router.route(get(path)).await;
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*",
            "path {}",
            path
        );
    }
}

#[tokio::test]
async fn test_options_preflight() {
    let router = default_router();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/mcp/message")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = router.route(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get("Access-Control-Allow-Methods").unwrap(),
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        response.headers().get("Access-Control-Max-Age").unwrap(),
        "86400"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let router = router(ServerConfig {
        enable_cors: false,
        ..ServerConfig::default()
    });

    let response = router.route(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
}
