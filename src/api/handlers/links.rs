//! Handlers for link management endpoints (list, create, inspect, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, CreateLinkResponse, DeleteLinkQuery, DeleteLinkResponse, LinkResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.registry.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a/b", "code": "PROMO1" }
/// ```
///
/// `code` is optional; without it a random 7-character code is generated.
///
/// # Errors
///
/// - 400 — missing/invalid URL, invalid custom-code format
/// - 409 — custom code already taken
/// - 500 — code generation exhausted or store failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let url = payload
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::bad_request("missing_url", "Valid URL is required", json!({})))?;

    let link = state.registry.create_link(url, payload.code).await?;
    let short_url = state.registry.short_url(&link.code);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            code: link.code,
            short_url,
            target_url: link.target_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }),
    ))
}

/// Returns a single link with its click statistics.
///
/// Read-only: inspecting a link does not count as a click.
///
/// # Endpoint
///
/// `GET /links/{code}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.registry.lookup(&code).await?;

    Ok(Json(LinkResponse::from(link)))
}

/// Deletes a link permanently.
///
/// # Endpoint
///
/// `DELETE /links?code={code}`
///
/// # Errors
///
/// - 400 — `code` missing from the query string
/// - 404 — no link with that code (deleting twice reports this, not a crash)
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Query(query): Query<DeleteLinkQuery>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let code = query
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::bad_request("missing_code", "Code is required", json!({})))?;

    state.registry.delete_link(code).await?;

    Ok(Json(DeleteLinkResponse {
        success: true,
        message: "Link deleted".to_string(),
    }))
}
