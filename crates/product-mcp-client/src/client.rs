//! Typed access to the message endpoint

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use product_mcp_json_rpc::JsonRpcMessage;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Client for the product search service.
///
/// Each call returns the envelope's `result` as-is. Domain outcomes such as an unknown product
/// arrive as `{"error": "..."}` inside that result; only envelope-level errors become
/// [`ClientError::ServerError`].
pub struct ProductClient {
    http: Client,
    config: ClientConfig,
    message_url: Url,
    request_counter: AtomicU64,
}

impl ProductClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let message_url = config.message_url()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("product-mcp-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config,
            message_url,
            request_counter: AtomicU64::new(0),
        })
    }

    /// Client for `base_url` with the default prefix and timeout
    pub fn connect(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one envelope and unwrap its result
    pub async fn call(&self, method: &str, params: Value) -> ClientResult<Value> {
        let id = self.next_request_id();
        let envelope = json!({ "id": id, "method": method, "params": params });

        debug!(method, id = %id, "Sending request");

        let response = self
            .http
            .post(self.message_url.clone())
            .header(ACCEPT, "application/json")
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<JsonRpcMessage>(&body) {
            Ok(JsonRpcMessage::Response(response)) => Ok(response.result),
            Ok(JsonRpcMessage::Error(error)) => {
                debug!(code = error.error.code, "Service returned an error envelope");
                Err(ClientError::ServerError {
                    code: error.error.code,
                    message: error.error.message,
                    data: error.error.data,
                })
            }
            Err(err) if status.is_success() => Err(err.into()),
            Err(_) => Err(ClientError::Http {
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Tools the service advertises
    pub async fn discover_capabilities(&self) -> ClientResult<Value> {
        self.call("capabilities", json!({})).await
    }

    pub async fn search_products(&self, query: &str, category: &str) -> ClientResult<Value> {
        self.call(
            "search_products",
            json!({ "query": query, "category": category }),
        )
        .await
    }

    pub async fn get_product_details(&self, product_id: &str) -> ClientResult<Value> {
        self.call("get_product_details", json!({ "product_id": product_id }))
            .await
    }

    pub async fn check_inventory(&self, product_id: &str) -> ClientResult<Value> {
        self.call("check_inventory", json!({ "product_id": product_id }))
            .await
    }

    /// Liveness probe; `timestamp` is echoed back untouched
    pub async fn ping(&self, timestamp: Option<Value>) -> ClientResult<Value> {
        let params = match timestamp {
            Some(timestamp) => json!({ "timestamp": timestamp }),
            None => json!({}),
        };
        self.call("ping", params).await
    }

    /// `GET /health`
    pub async fn health(&self) -> ClientResult<Value> {
        let response = self.http.get(self.config.url("health")?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: response.text().await?,
            });
        }
        Ok(response.json().await?)
    }

    fn next_request_id(&self) -> String {
        let counter = self.request_counter.fetch_add(1, Ordering::SeqCst);
        format!("req_{}", counter)
    }
}
