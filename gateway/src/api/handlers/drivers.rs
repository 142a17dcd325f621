//! Driver records, forwarded to the drivers service.

use crate::api::extract::JsonBody;
use crate::api::models::drivers::Driver;
use crate::errors::{ErrorResponse, OperationContext, Result};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    post,
    path = "/driver/create",
    tag = "drivers",
    summary = "Create driver",
    request_body = Driver,
    responses(
        (status = 200, description = "Driver created", body = Driver),
        (status = 400, description = "Invalid driver or rejected by the drivers service", body = ErrorResponse),
        (status = 500, description = "Drivers service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(curp = %driver.curp))]
pub async fn create_driver(State(state): State<AppState>, JsonBody(driver): JsonBody<Driver>) -> Result<Json<Driver>> {
    let created = state.clients.drivers.create_driver(&driver).await.when("creating driver")?;
    Ok(Json(created))
}

#[utoipa::path(
    put,
    path = "/driver/update",
    tag = "drivers",
    summary = "Update driver",
    request_body = Driver,
    responses(
        (status = 200, description = "Driver updated", body = Driver),
        (status = 400, description = "Invalid driver or rejected by the drivers service", body = ErrorResponse),
        (status = 500, description = "Drivers service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(curp = %driver.curp))]
pub async fn update_driver(State(state): State<AppState>, JsonBody(driver): JsonBody<Driver>) -> Result<Json<Driver>> {
    let updated = state.clients.drivers.update_driver(&driver).await.when("updating driver")?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/driver/delete/{curp}",
    tag = "drivers",
    summary = "Delete driver",
    params(("curp" = String, Path, description = "Driver CURP")),
    responses(
        (status = 200, description = "Driver deleted"),
        (status = 400, description = "Rejected by the drivers service", body = ErrorResponse),
        (status = 500, description = "Drivers service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(curp = %curp))]
pub async fn delete_driver(State(state): State<AppState>, Path(curp): Path<String>) -> Result<()> {
    state.clients.drivers.delete_driver(&curp).await.when("deleting driver")
}

#[utoipa::path(
    get,
    path = "/driver/get/{curp}",
    tag = "drivers",
    summary = "Get driver",
    params(("curp" = String, Path, description = "Driver CURP")),
    responses(
        (status = 200, description = "Driver details", body = Driver),
        (status = 400, description = "Rejected by the drivers service", body = ErrorResponse),
        (status = 500, description = "Drivers service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(curp = %curp))]
pub async fn get_driver_by_curp(State(state): State<AppState>, Path(curp): Path<String>) -> Result<Json<Driver>> {
    let driver = state.clients.drivers.get_driver_by_curp(&curp).await.when("fetching driver by CURP")?;
    Ok(Json(driver))
}

#[utoipa::path(
    get,
    path = "/driver/getall",
    tag = "drivers",
    summary = "List drivers",
    responses(
        (status = 200, description = "All drivers", body = Vec<Driver>),
        (status = 400, description = "Rejected by the drivers service", body = ErrorResponse),
        (status = 500, description = "Drivers service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_all_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>> {
    let drivers = state.clients.drivers.get_all_drivers().await.when("fetching driver list")?;
    Ok(Json(drivers))
}
