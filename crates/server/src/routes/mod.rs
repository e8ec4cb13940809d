//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Health check
//!
//! # Badge images (public)
//! GET  /badge/{user}/{project}/{id}    - Rendered SVG (`{id}` may end in `.svg`)
//!
//! # User (requires bearer token)
//! GET  /api/user/data                  - Full project/badge tree
//! POST /api/user/welcome               - Mark onboarding complete
//!
//! # Projects (requires bearer token)
//! POST /api/projects/create?project=   - Create project
//! POST /api/projects/delete?project=   - Delete project
//!
//! # Badges (requires bearer token)
//! POST /api/badges/create?project=             - Append a badge
//! POST /api/badges/delete?project=&id=         - Delete a badge
//! POST /api/badges/update?project=&id=&key=&val=[&key_width=][&val_width=]
//!                                              - Edit badge text
//! POST /api/badges/configure                   - Edit colors/style/source (JSON body)
//! ```
//!
//! Mutations return the affected entity (or nothing); clients re-fetch
//! `/api/user/data` to refresh their view.

pub mod badges;
pub mod image;
pub mod projects;
pub mod user;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(user::data))
        .route("/welcome", post(user::welcome))
}

/// Create the project routes router.
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(projects::create))
        .route("/delete", post(projects::delete))
}

/// Create the badge routes router.
pub fn badge_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(badges::create))
        .route("/delete", post(badges::delete))
        .route("/update", post(badges::update))
        .route("/configure", post(badges::configure))
}

/// Create all routes, bound to `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/badge/{user}/{project}/{id}", get(image::show))
        .nest("/api/user", user_routes())
        .nest("/api/projects", project_routes())
        .nest("/api/badges", badge_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;

    async fn app_with_token(token: &str, user: &str) -> Router {
        let state = AppState::new(ServerConfig::default()).unwrap();
        state.identity().authorize_token(token, user).await;
        app(state)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with_token("t", "alice").await;
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_user_data_requires_token() {
        let app = app_with_token("t", "alice").await;
        let request = Request::builder()
            .uri("/api/user/data")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_data_seeds_user() {
        let app = app_with_token("t", "alice").await;
        let request = Request::builder()
            .uri("/api/user/data")
            .header("authorization", "Bearer t")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let user: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(user["projects"][0]["title"], "alice");
    }
}
