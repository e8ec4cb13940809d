//! Badge editing route handlers.

use axum::{
    Json,
    extract::{Query, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use maintained_core::{Badge, BadgeAppearance, BadgeId};

use super::projects::ProjectQuery;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::render::estimate_text_width;
use crate::state::AppState;
use crate::store::{BadgeUpdate, percent_decode};

/// Query parameters naming one badge.
#[derive(Debug, Deserialize)]
pub struct BadgeQuery {
    pub project: String,
    pub id: BadgeId,
}

/// Query parameters of a text edit, besides the raw `key`/`val` text.
#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    pub project: String,
    pub id: BadgeId,
    pub key_width: Option<f64>,
    pub val_width: Option<f64>,
}

/// JSON body of an appearance edit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureRequest {
    pub project: String,
    pub id: BadgeId,
    #[serde(flatten)]
    pub appearance: BadgeAppearance,
}

/// Append a blank badge to a project.
#[instrument(skip_all, fields(user = %user, project = %query.project))]
pub async fn create(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ProjectQuery>,
) -> Result<(StatusCode, Json<Badge>)> {
    state
        .store()
        .create_badge(&user, &query.project)
        .await
        .map(|badge| (StatusCode::CREATED, Json(badge)))
        .ok_or_else(|| AppError::NotFound(format!("project {}", query.project)))
}

/// Delete a badge. Deleting a missing badge succeeds.
#[instrument(skip_all, fields(user = %user, project = %query.project, badge_id = %query.id))]
pub async fn delete(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<BadgeQuery>,
) -> StatusCode {
    state
        .store()
        .delete_badge(&user, &query.project, query.id)
        .await;
    StatusCode::NO_CONTENT
}

/// Edit a badge's title (`key`) and/or value (`val`).
///
/// The text is read from the raw query string so that it reaches the store
/// still percent-encoded and is decoded exactly once. Omitted widths are
/// estimated from the decoded text.
#[instrument(skip_all, fields(user = %user, project = %query.project, badge_id = %query.id))]
pub async fn update(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<UpdateQuery>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Badge>> {
    let raw = raw.unwrap_or_default();
    let title = raw_param(&raw, "key").filter(|t| !t.is_empty());
    let value = raw_param(&raw, "val").filter(|v| !v.is_empty());

    let update = BadgeUpdate {
        title_width: title.map(|t| {
            query
                .key_width
                .unwrap_or_else(|| estimate_text_width(&percent_decode(t)))
        }),
        value_width: value.map(|v| {
            query
                .val_width
                .unwrap_or_else(|| estimate_text_width(&percent_decode(v)))
        }),
        title: title.map(str::to_string),
        value: value.map(str::to_string),
    };

    state
        .store()
        .update_badge(&user, &query.project, query.id, update)
        .await
        .map(Json)
        .ok_or_else(|| not_found(&query.project, query.id))
}

/// Replace a badge's colors, style, live value source and mono flag.
#[instrument(skip_all, fields(user = %user, project = %request.project, badge_id = %request.id))]
pub async fn configure(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<Badge>> {
    if let Some(source) = request.appearance.value_source.as_deref() {
        validate_value_source(source)?;
    }

    state
        .store()
        .configure_badge(&user, &request.project, request.id, request.appearance)
        .await
        .map(Json)
        .ok_or_else(|| not_found(&request.project, request.id))
}

fn not_found(project: &str, id: BadgeId) -> AppError {
    AppError::NotFound(format!("badge {id} in project {project}"))
}

/// Find a parameter in a raw query string without decoding it.
fn raw_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then_some(value)
    })
}

/// A value source must be an absolute HTTP(S) URL; blank clears it.
fn validate_value_source(source: &str) -> Result<()> {
    let source = source.trim();
    if source.is_empty() {
        return Ok(());
    }

    let url = Url::parse(source)
        .map_err(|e| AppError::BadRequest(format!("invalid value source: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::BadRequest(format!(
            "value source must use http or https, not {scheme}"
        ))),
    }
}
