//! Problems reported on a vehicle's route.

use crate::api::extract::JsonBody;
use crate::api::models::routes::Problem;
use crate::errors::{ErrorResponse, OperationContext, Result};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    post,
    path = "/route/problem/assign",
    tag = "problems",
    summary = "Report problem",
    description = "Reports a problem on the route of a vehicle.",
    request_body = Problem,
    responses(
        (status = 200, description = "Problem reported", body = Problem),
        (status = 400, description = "Invalid problem or rejected by the problems service", body = ErrorResponse),
        (status = 500, description = "Problems service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %problem.vin))]
pub async fn assign_problem(State(state): State<AppState>, JsonBody(problem): JsonBody<Problem>) -> Result<Json<Problem>> {
    let problem = state.clients.problems.assign_problem(&problem).await.when("assigning problem")?;
    Ok(Json(problem))
}

#[utoipa::path(
    put,
    path = "/route/problem/update",
    tag = "problems",
    summary = "Update problem",
    request_body = Problem,
    responses(
        (status = 200, description = "Problem updated", body = Problem),
        (status = 400, description = "Invalid problem or rejected by the problems service", body = ErrorResponse),
        (status = 500, description = "Problems service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %problem.vin))]
pub async fn update_problem(State(state): State<AppState>, JsonBody(problem): JsonBody<Problem>) -> Result<Json<Problem>> {
    let problem = state.clients.problems.update_problem(&problem).await.when("updating problem")?;
    Ok(Json(problem))
}

#[utoipa::path(
    delete,
    path = "/route/problem/delete/{vin}",
    tag = "problems",
    summary = "Delete problem",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Problem deleted"),
        (status = 400, description = "Rejected by the problems service", body = ErrorResponse),
        (status = 500, description = "Problems service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vin))]
pub async fn delete_problem(State(state): State<AppState>, Path(vin): Path<String>) -> Result<()> {
    state.clients.problems.delete_problem(&vin).await.when("deleting problem")
}

#[utoipa::path(
    get,
    path = "/route/problem/get/{vin}",
    tag = "problems",
    summary = "Get problem",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Problem details", body = Problem),
        (status = 400, description = "Rejected by the problems service", body = ErrorResponse),
        (status = 500, description = "Problems service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vin))]
pub async fn get_problem(State(state): State<AppState>, Path(vin): Path<String>) -> Result<Json<Problem>> {
    let problem = state.clients.problems.get_problem(&vin).await.when("fetching problem")?;
    Ok(Json(problem))
}
