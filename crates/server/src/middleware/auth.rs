//! Bearer token authentication extractor.
//!
//! Resolves `Authorization: Bearer <token>` through the [`IdentityGate`] and
//! makes sure the user exists in the store before the handler runs.
//!
//! [`IdentityGate`]: crate::services::IdentityGate

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Rejects with `401 Unauthorized` before the handler (and the store) is
/// reached when the token is missing, unknown or expired.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     AuthenticatedUser(user): AuthenticatedUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {user}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let user = state
            .identity()
            .resolve(token)
            .await
            .ok_or_else(|| AppError::Unauthorized("invalid or expired token".to_string()))?;

        // First contact creates the user with their starter project.
        state.store().ensure_user(&user).await;
        set_sentry_user(&user);

        Ok(Self(user))
    }
}

/// Extract the token from an `Authorization: Bearer` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/user/data");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc123"))), Some("abc123"));
        assert_eq!(bearer_token(&parts_with(Some("bearer  abc123 "))), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcjpwYXNz"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with(Some("abc123"))), None);
    }
}
