//! Integration tests for Maintained.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p maintained-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_scenario` - A user's full project/badge lifecycle against the store
//! - `api_routes` - The HTTP surface, driven in-process through the router
//! - `render_live_value` - Live badge values served by a throwaway local server
//!
//! Nothing here needs network access beyond `127.0.0.1`.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use maintained_server::config::ServerConfig;
use maintained_server::routes;
use maintained_server::state::AppState;

/// Bearer token authorized by [`TestContext::new`].
pub const TOKEN: &str = "test-token";

/// Largest response body the helpers will buffer.
const BODY_LIMIT: usize = 1 << 20;

/// A router with one authorized user.
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
    pub user: String,
}

impl TestContext {
    /// Build the application and authorize [`TOKEN`] for `user`.
    ///
    /// # Panics
    ///
    /// Panics if the application state cannot be built.
    pub async fn new(user: &str) -> Self {
        let config = ServerConfig {
            fetch_timeout: Duration::from_millis(500),
            ..ServerConfig::default()
        };
        let state = AppState::new(config).expect("failed to build application state");
        state.identity().authorize_token(TOKEN, user).await;

        Self {
            app: routes::app(state.clone()),
            state,
            user: user.to_string(),
        }
    }

    /// Send one request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails, which it never does for well-formed requests.
    pub async fn send(&self, request: Request<Body>) -> Response {
        use tower::ServiceExt;

        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

/// A request carrying the test bearer token.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
pub fn authed(method: &str, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json")
        .body(body)
        .expect("valid request")
}

/// Buffer a response body as UTF-8 text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("UTF-8 body")
}

/// Buffer a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("JSON body")
}

/// Serve `router` on an ephemeral local port for the rest of the test.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}
