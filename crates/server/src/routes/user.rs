//! Current-user route handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use maintained_core::User;

use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// The caller's full project/badge tree.
#[instrument(skip_all, fields(user = %user))]
pub async fn data(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<User>> {
    state
        .store()
        .get_user(&user)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {user}")))
}

/// Mark onboarding as complete so the welcome screen is not shown again.
#[instrument(skip_all, fields(user = %user))]
pub async fn welcome(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<StatusCode> {
    if state.store().clear_first_visit(&user).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("user {user}")))
    }
}
