//! Public badge image route handler.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use maintained_core::BadgeId;

use crate::error::{AppError, Result};
use crate::render::SVG_CONTENT_TYPE;
use crate::state::AppState;

/// Render a badge as SVG for embedding in READMEs and web pages.
///
/// No authentication: badge URLs are meant to be public. Responses are
/// marked `no-cache` because live values change without the badge changing.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((user, project, id)): Path<(String, String, String)>,
) -> Result<Response> {
    let id = parse_badge_id(&id)?;

    let badge = state
        .store()
        .get_badge(&user, &project, id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("badge {id} in project {project}")))?;

    let svg = state.renderer().render(&badge).await?;

    Ok((
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        svg,
    )
        .into_response())
}

/// Parse `3` or `3.svg`.
fn parse_badge_id(segment: &str) -> Result<BadgeId> {
    segment
        .strip_suffix(".svg")
        .unwrap_or(segment)
        .parse::<i32>()
        .map(BadgeId::new)
        .map_err(|_| AppError::BadRequest(format!("invalid badge id: {segment}")))
}
