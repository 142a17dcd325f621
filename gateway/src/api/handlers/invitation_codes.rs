//! Invitation codes for administrator registration.

use crate::api::models::invitation_codes::InvitationCode;
use crate::errors::{ErrorResponse, OperationContext, Result};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Looks up an invitation code. Answers `302 Found` with the code in the body.
#[utoipa::path(
    get,
    path = "/code/get/{code}",
    tag = "invitation_codes",
    summary = "Get invitation code",
    params(("code" = String, Path, description = "Invitation code")),
    responses(
        (status = 302, description = "Invitation code found", body = InvitationCode),
        (status = 400, description = "Rejected by the invitation codes service", body = ErrorResponse),
        (status = 500, description = "Invitation codes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(code = %code))]
pub async fn find_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<(StatusCode, Json<InvitationCode>)> {
    let invitation = state.clients.invitation_codes.find_by_code(&code).await.when("fetching code")?;
    Ok((StatusCode::FOUND, Json(invitation)))
}

#[utoipa::path(
    get,
    path = "/code/generate",
    tag = "invitation_codes",
    summary = "Generate invitation code",
    responses(
        (status = 201, description = "Invitation code generated", body = InvitationCode),
        (status = 400, description = "Rejected by the invitation codes service", body = ErrorResponse),
        (status = 500, description = "Invitation codes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn generate_invitation_code(State(state): State<AppState>) -> Result<(StatusCode, Json<InvitationCode>)> {
    let invitation = state
        .clients
        .invitation_codes
        .generate_invitation_code()
        .await
        .when("generating invitation code")?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

#[utoipa::path(
    delete,
    path = "/code/delete/{code}",
    tag = "invitation_codes",
    summary = "Delete invitation code",
    params(("code" = String, Path, description = "Invitation code")),
    responses(
        (status = 200, description = "Invitation code deleted"),
        (status = 400, description = "Rejected by the invitation codes service", body = ErrorResponse),
        (status = 500, description = "Invitation codes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(code = %code))]
pub async fn delete_by_code(State(state): State<AppState>, Path(code): Path<String>) -> Result<()> {
    state.clients.invitation_codes.delete_by_code(&code).await.when("deleting code")
}

#[utoipa::path(
    post,
    path = "/code/use/{code}",
    tag = "invitation_codes",
    summary = "Mark invitation code as used",
    params(("code" = String, Path, description = "Invitation code")),
    responses(
        (status = 200, description = "Invitation code marked as used", body = InvitationCode),
        (status = 400, description = "Rejected by the invitation codes service", body = ErrorResponse),
        (status = 500, description = "Invitation codes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(code = %code))]
pub async fn mark_as_used(State(state): State<AppState>, Path(code): Path<String>) -> Result<Json<InvitationCode>> {
    let invitation = state
        .clients
        .invitation_codes
        .mark_as_used(&code)
        .await
        .when("marking code as used")?;
    Ok(Json(invitation))
}
