//! Administrator account management, forwarded to the administrators service.
//!
//! Credentials are checked for shape before forwarding; see [`AdministratorRequest::validate`].

use crate::api::extract::JsonBody;
use crate::api::models::administrators::{AdministratorRequest, AdministratorResponse};
use crate::errors::{ErrorResponse, OperationContext, Result};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    post,
    path = "/admin/register",
    tag = "administrators",
    summary = "Register administrator",
    request_body = AdministratorRequest,
    responses(
        (status = 200, description = "Administrator registered", body = AdministratorResponse),
        (status = 400, description = "Invalid credentials or rejected by the administrators service", body = ErrorResponse),
        (status = 500, description = "Administrators service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(email = %request.email))]
pub async fn create_administrator(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AdministratorRequest>,
) -> Result<Json<AdministratorResponse>> {
    request.validate()?;
    let administrator = state
        .clients
        .administrators
        .create_administrator(&request)
        .await
        .when("registering administrator")?;
    Ok(Json(administrator))
}

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "administrators",
    summary = "Sign in administrator",
    request_body = AdministratorRequest,
    responses(
        (status = 200, description = "Signed in", body = AdministratorResponse),
        (status = 400, description = "Invalid credentials or rejected by the administrators service", body = ErrorResponse),
        (status = 500, description = "Administrators service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(email = %request.email))]
pub async fn sign_in_administrator(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AdministratorRequest>,
) -> Result<Json<AdministratorResponse>> {
    request.validate()?;
    let administrator = state
        .clients
        .administrators
        .sign_in_administrator(&request)
        .await
        .when("signing in")?;
    Ok(Json(administrator))
}

#[utoipa::path(
    post,
    path = "/admin/get/{email}",
    tag = "administrators",
    summary = "Get administrator",
    params(("email" = String, Path, description = "Administrator email")),
    responses(
        (status = 200, description = "Administrator details", body = AdministratorResponse),
        (status = 400, description = "Rejected by the administrators service", body = ErrorResponse),
        (status = 500, description = "Administrators service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(email = %email))]
pub async fn find_administrator_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AdministratorResponse>> {
    let administrator = state
        .clients
        .administrators
        .find_administrator_by_email(&email)
        .await
        .when(format_args!("fetching administrator with email {email}"))?;
    Ok(Json(administrator))
}

#[utoipa::path(
    delete,
    path = "/admin/delete/{email}",
    tag = "administrators",
    summary = "Delete administrator",
    params(("email" = String, Path, description = "Administrator email")),
    responses(
        (status = 200, description = "Administrator deleted"),
        (status = 400, description = "Rejected by the administrators service", body = ErrorResponse),
        (status = 500, description = "Administrators service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(email = %email))]
pub async fn delete_administrator_by_email(State(state): State<AppState>, Path(email): Path<String>) -> Result<()> {
    state
        .clients
        .administrators
        .delete_administrator_by_email(&email)
        .await
        .when(format_args!("deleting administrator with email {email}"))
}

#[utoipa::path(
    put,
    path = "/admin/update",
    tag = "administrators",
    summary = "Update administrator",
    request_body = AdministratorRequest,
    responses(
        (status = 200, description = "Administrator updated", body = AdministratorResponse),
        (status = 400, description = "Invalid credentials or rejected by the administrators service", body = ErrorResponse),
        (status = 500, description = "Administrators service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(email = %request.email))]
pub async fn update_administrator(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AdministratorRequest>,
) -> Result<Json<AdministratorResponse>> {
    request.validate()?;
    let administrator = state
        .clients
        .administrators
        .update_administrator(&request)
        .await
        .when("updating administrator")?;
    Ok(Json(administrator))
}

#[utoipa::path(
    get,
    path = "/admin/getall",
    tag = "administrators",
    summary = "List administrators",
    responses(
        (status = 200, description = "All administrators", body = Vec<AdministratorResponse>),
        (status = 400, description = "Rejected by the administrators service", body = ErrorResponse),
        (status = 500, description = "Administrators service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_administrator_list(State(state): State<AppState>) -> Result<Json<Vec<AdministratorResponse>>> {
    let administrators = state
        .clients
        .administrators
        .get_administrator_list()
        .await
        .when("fetching administrator list")?;
    Ok(Json(administrators))
}
