//! Unified error handling with Sentry integration.
//!
//! Store operations never fail; they report absence. Route handlers turn
//! absence and bad input into an `AppError`, and server-side failures are
//! captured to Sentry before responding to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::render::RenderError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Badge rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// User, project or badge not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request collides with existing state (e.g. a duplicate project title).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, unknown or expired bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Render(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Render(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the authenticated user.
pub fn set_sentry_user(user_id: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}
