//! Project route handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use maintained_core::Project;

use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Query parameters naming a project.
#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub project: String,
}

/// Create a project.
///
/// Responds `400` for an empty title and `409` when the title is taken.
#[instrument(skip_all, fields(user = %user, project = %query.project))]
pub async fn create(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ProjectQuery>,
) -> Result<(StatusCode, Json<Project>)> {
    if query.project.trim().is_empty() {
        return Err(AppError::BadRequest("project title cannot be empty".to_string()));
    }

    state
        .store()
        .create_project(&user, &query.project)
        .await
        .map(|project| (StatusCode::CREATED, Json(project)))
        .ok_or_else(|| AppError::Conflict(format!("project {} already exists", query.project)))
}

/// Delete a project and its badges. Deleting a missing project succeeds.
#[instrument(skip_all, fields(user = %user, project = %query.project))]
pub async fn delete(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ProjectQuery>,
) -> StatusCode {
    state.store().delete_project(&user, &query.project).await;
    StatusCode::NO_CONTENT
}
