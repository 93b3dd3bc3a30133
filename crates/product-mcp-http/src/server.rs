//! HTTP server for the product search service

use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use hyper::body::Body;
use hyper::header::{ALLOW, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use product_mcp_server::ProductService;

use crate::rest::not_found;
use crate::{CorsLayer, HttpResponse, McpMessageHandler, RestHandler, Result, text_response};

/// Pause after an accept error that is not tied to a single connection (e.g. EMFILE)
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_address: SocketAddr,
    /// Prefix for the message and REST endpoints
    pub api_prefix: String,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum request body size
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8000)),
            api_prefix: "/api/v1".to_string(),
            enable_cors: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ServerConfig {
    /// `api_prefix` with a leading slash and no trailing slash. `""` and `"/"` both map to `""`.
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}

/// Builder for the HTTP product server
pub struct HttpProductServerBuilder {
    config: ServerConfig,
    service: Option<ProductService>,
}

impl HttpProductServerBuilder {
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            service: None,
        }
    }

    /// Set the bind address
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.config.bind_address = addr;
        self
    }

    /// Set the API prefix
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.api_prefix = prefix.into();
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enable: bool) -> Self {
        self.config.enable_cors = enable;
        self
    }

    /// Set maximum request body size
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Serve a specific service instead of the seeded catalog
    pub fn service(mut self, service: ProductService) -> Self {
        self.service = Some(service);
        self
    }

    pub fn build(self) -> HttpProductServer {
        let service = self.service.unwrap_or_else(ProductService::seeded);
        let router = RequestRouter::new(&self.config, service);

        HttpProductServer {
            config: self.config,
            router,
        }
    }
}

impl Default for HttpProductServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP front end over a [`ProductService`]
#[derive(Clone)]
pub struct HttpProductServer {
    config: ServerConfig,
    router: RequestRouter,
}

impl HttpProductServer {
    pub fn builder() -> HttpProductServerBuilder {
        HttpProductServerBuilder::new()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> &RequestRouter {
        &self.router
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_address).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already-bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        self.serve_with_shutdown(listener, std::future::pending()).await
    }

    /// Serve until `shutdown` resolves. In-flight connections are left to finish on their own.
    ///
    /// Accept errors are logged and never end the loop; only `shutdown` does.
    pub async fn serve_with_shutdown<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr()?;
        info!("Product search server listening on {}", local_addr);
        info!(
            "Message endpoint available at: {}/mcp/message",
            self.router.prefix
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received, no longer accepting connections");
                    return Ok(());
                }
                accepted = listener.accept() => {
                    let (stream, peer_addr) = match accepted {
                        Ok(conn) => conn,
                        Err(err) => {
                            match accept_error_backoff(&err) {
                                None => debug!("Connection dropped during accept: {}", err),
                                Some(backoff) => {
                                    warn!("Error accepting connection, retrying in {:?}: {}", backoff, err);
                                    tokio::time::sleep(backoff).await;
                                }
                            }
                            continue;
                        }
                    };
                    debug!("New connection from {}", peer_addr);

                    let router = self.router.clone();
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        let service = service_fn(move |req| {
                            let router = router.clone();
                            async move { Ok::<_, Infallible>(router.route(req).await) }
                        });

                        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                            let err_str = err.to_string();
                            if err_str.contains("connection closed before message completed") {
                                debug!("Client disconnected (normal): {}", err);
                            } else {
                                error!("Error serving connection: {}", err);
                            }
                        }
                    });
                }
            }
        }
    }
}

/// `None` for errors scoped to one connection, which are retried at once
fn accept_error_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::Interrupted => None,
        _ => Some(ACCEPT_ERROR_BACKOFF),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Root,
    Health,
    Message,
    Capabilities,
    Search,
    Categories,
    Product(String),
    Inventory(String),
}

impl Route {
    fn allowed_method(&self) -> Method {
        match self {
            Route::Message => Method::POST,
            _ => Method::GET,
        }
    }
}

/// Maps requests onto the message handler and REST handler
#[derive(Clone)]
pub struct RequestRouter {
    prefix: String,
    enable_cors: bool,
    messages: McpMessageHandler,
    rest: RestHandler,
}

impl RequestRouter {
    pub fn new(config: &ServerConfig, service: ProductService) -> Self {
        let prefix = config.normalized_prefix();
        Self {
            messages: McpMessageHandler::new(service.clone(), config.max_body_size),
            rest: RestHandler::new(service, prefix.clone()),
            prefix,
            enable_cors: config.enable_cors,
        }
    }

    pub async fn route<B>(&self, req: Request<B>) -> HttpResponse
    where
        B: Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let method = req.method().clone();
        debug!("Handling {} {}", method, req.uri().path());

        let mut response = if method == Method::OPTIONS {
            text_response(StatusCode::NO_CONTENT, Bytes::new())
        } else {
            match self.resolve(req.uri().path()) {
                None => not_found("Not Found"),
                Some(route) if route.allowed_method() != method => {
                    let allowed = route.allowed_method();
                    let mut response =
                        text_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
                    if let Ok(value) = HeaderValue::from_str(allowed.as_str()) {
                        response.headers_mut().insert(ALLOW, value);
                    }
                    response
                }
                Some(Route::Message) => self.messages.handle_message(req).await,
                Some(route) => {
                    let query = req.uri().query().map(str::to_string);
                    self.handle_rest(route, query.as_deref())
                }
            }
        };

        if self.enable_cors {
            CorsLayer::apply_cors_headers(response.headers_mut());
        }
        response
    }

    fn handle_rest(&self, route: Route, query: Option<&str>) -> HttpResponse {
        match route {
            Route::Root => self.rest.root(),
            Route::Health => self.rest.health(),
            Route::Capabilities => self.rest.capabilities(),
            Route::Search => self.rest.search_products(query),
            Route::Categories => self.rest.categories(),
            Route::Product(id) => self.rest.get_product(&id),
            Route::Inventory(id) => self.rest.check_inventory(&id),
            Route::Message => not_found("Not Found"),
        }
    }

    fn resolve(&self, path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => return Some(Route::Root),
            "/health" => return Some(Route::Health),
            _ => {}
        }

        let rest = path.strip_prefix(self.prefix.as_str())?;
        let segments: Vec<&str> = rest.strip_prefix('/')?.split('/').collect();

        match segments.as_slice() {
            ["mcp", "message"] => Some(Route::Message),
            ["mcp", "capabilities"] => Some(Route::Capabilities),
            ["categories"] => Some(Route::Categories),
            ["products", "search"] => Some(Route::Search),
            ["products", id] if !id.is_empty() => Some(Route::Product(decode_segment(id))),
            ["products", id, "inventory"] if !id.is_empty() => {
                Some(Route::Inventory(decode_segment(id)))
            }
            _ => None,
        }
    }
}

fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router_with_prefix(prefix: &str) -> RequestRouter {
        let config = ServerConfig {
            api_prefix: prefix.to_string(),
            ..ServerConfig::default()
        };
        RequestRouter::new(&config, ProductService::seeded())
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8000");
        assert_eq!(config.api_prefix, "/api/v1");
        assert!(config.enable_cors);
        assert_eq!(config.max_body_size, 1024 * 1024);
    }

    #[test]
    fn test_normalized_prefix() {
        let mut config = ServerConfig::default();
        for (raw, expected) in [
            ("/api/v1", "/api/v1"),
            ("api/v1/", "/api/v1"),
            ("/", ""),
            ("", ""),
        ] {
            config.api_prefix = raw.to_string();
            assert_eq!(config.normalized_prefix(), expected, "prefix {:?}", raw);
        }
    }

    #[test]
    fn test_builder() {
        let server = HttpProductServer::builder()
            .bind_address(SocketAddr::from(([0, 0, 0, 0], 9000)))
            .api_prefix("/v2")
            .cors(false)
            .max_body_size(512)
            .build();

        let config = server.config();
        assert_eq!(config.bind_address.port(), 9000);
        assert_eq!(config.api_prefix, "/v2");
        assert!(!config.enable_cors);
        assert_eq!(config.max_body_size, 512);
    }

    #[test]
    fn test_accept_error_backoff() {
        for kind in [
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::Interrupted,
        ] {
            assert_eq!(accept_error_backoff(&io::Error::from(kind)), None);
        }

        // EMFILE surfaces as an uncategorized OS error
        let exhausted = io::Error::from_raw_os_error(24);
        assert_eq!(accept_error_backoff(&exhausted), Some(ACCEPT_ERROR_BACKOFF));
        let other = io::Error::other("out of buffers");
        assert_eq!(accept_error_backoff(&other), Some(ACCEPT_ERROR_BACKOFF));
    }

    #[tokio::test]
    async fn test_serve_with_shutdown_stops_on_signal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = HttpProductServer::builder().build();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            server.serve_with_shutdown(listener, async {}),
        )
        .await;
        assert!(matches!(result, Ok(Ok(()))));
    }

    #[test]
    fn test_resolve_routes() {
        let router = router_with_prefix("/api/v1");

        assert_eq!(router.resolve("/"), Some(Route::Root));
        assert_eq!(router.resolve("/health/"), Some(Route::Health));
        assert_eq!(router.resolve("/api/v1/mcp/message"), Some(Route::Message));
        assert_eq!(
            router.resolve("/api/v1/mcp/capabilities"),
            Some(Route::Capabilities)
        );
        assert_eq!(router.resolve("/api/v1/products/search"), Some(Route::Search));
        assert_eq!(router.resolve("/api/v1/categories"), Some(Route::Categories));
        assert_eq!(
            router.resolve("/api/v1/products/2"),
            Some(Route::Product("2".to_string()))
        );
        assert_eq!(
            router.resolve("/api/v1/products/a%20b/inventory"),
            Some(Route::Inventory("a b".to_string()))
        );

        assert_eq!(router.resolve("/mcp/message"), None);
        assert_eq!(router.resolve("/api/v1x/categories"), None);
        assert_eq!(router.resolve("/api/v1/products"), None);
        assert_eq!(router.resolve("/api/v1/products/1/price"), None);
    }

    #[test]
    fn test_resolve_with_empty_prefix() {
        let router = router_with_prefix("");

        assert_eq!(router.resolve("/mcp/message"), Some(Route::Message));
        assert_eq!(router.resolve("/health"), Some(Route::Health));
        assert_eq!(
            router.resolve("/products/4"),
            Some(Route::Product("4".to_string()))
        );
    }
}
