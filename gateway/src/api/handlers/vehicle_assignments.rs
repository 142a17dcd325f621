//! Assigning vehicles to drivers and the history of those assignments.

use crate::api::extract::JsonBody;
use crate::api::models::assignments::VehicleAssignment;
use crate::errors::{ErrorResponse, OperationContext, Result};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    get,
    path = "/vehicle/assignment/status/{status}",
    tag = "vehicle_assignments",
    summary = "List assignments by status",
    params(("status" = String, Path, description = "Assignment status, e.g. ASSIGNED or RELEASED")),
    responses(
        (status = 200, description = "Assignments with the given status", body = Vec<VehicleAssignment>),
        (status = 400, description = "Rejected by the vehicle assignments service", body = ErrorResponse),
        (status = 500, description = "Vehicle assignments service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(status = %status))]
pub async fn find_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<VehicleAssignment>>> {
    let assignments = state
        .clients
        .vehicle_assignments
        .find_by_status(&status)
        .await
        .when("searching by status")?;
    Ok(Json(assignments))
}

#[utoipa::path(
    get,
    path = "/vehicle/assignment/history",
    tag = "vehicle_assignments",
    summary = "Assignment history",
    responses(
        (status = 200, description = "Every assignment ever made", body = Vec<VehicleAssignment>),
        (status = 400, description = "Rejected by the vehicle assignments service", body = ErrorResponse),
        (status = 500, description = "Vehicle assignments service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn assignments_history(State(state): State<AppState>) -> Result<Json<Vec<VehicleAssignment>>> {
    let assignments = state
        .clients
        .vehicle_assignments
        .assignments_history()
        .await
        .when("fetching assignments history")?;
    Ok(Json(assignments))
}

#[utoipa::path(
    get,
    path = "/vehicle/assignment/vin/{vin}",
    tag = "vehicle_assignments",
    summary = "Get assignment by VIN",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Current assignment of the vehicle", body = VehicleAssignment),
        (status = 400, description = "Rejected by the vehicle assignments service", body = ErrorResponse),
        (status = 500, description = "Vehicle assignments service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vin))]
pub async fn find_by_vin(State(state): State<AppState>, Path(vin): Path<String>) -> Result<Json<VehicleAssignment>> {
    let assignment = state
        .clients
        .vehicle_assignments
        .find_by_vin(&vin)
        .await
        .when("searching by VIN")?;
    Ok(Json(assignment))
}

#[utoipa::path(
    post,
    path = "/vehicle/assignment/assign",
    tag = "vehicle_assignments",
    summary = "Assign vehicle to driver",
    request_body = VehicleAssignment,
    responses(
        (status = 200, description = "Vehicle assigned", body = VehicleAssignment),
        (status = 400, description = "Invalid assignment or rejected by the vehicle assignments service", body = ErrorResponse),
        (status = 500, description = "Vehicle assignments service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %assignment.vin, curp = %assignment.curp))]
pub async fn assign_vehicle_to_driver(
    State(state): State<AppState>,
    JsonBody(assignment): JsonBody<VehicleAssignment>,
) -> Result<Json<VehicleAssignment>> {
    let assignment = state
        .clients
        .vehicle_assignments
        .assign_vehicle_to_driver(&assignment)
        .await
        .when("assigning vehicle to driver")?;
    Ok(Json(assignment))
}

#[utoipa::path(
    post,
    path = "/vehicle/assignment/release",
    tag = "vehicle_assignments",
    summary = "Release vehicle from driver",
    request_body = VehicleAssignment,
    responses(
        (status = 200, description = "Vehicle released", body = VehicleAssignment),
        (status = 400, description = "Invalid assignment or rejected by the vehicle assignments service", body = ErrorResponse),
        (status = 500, description = "Vehicle assignments service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %assignment.vin, curp = %assignment.curp))]
pub async fn release_vehicle_from_driver(
    State(state): State<AppState>,
    JsonBody(assignment): JsonBody<VehicleAssignment>,
) -> Result<Json<VehicleAssignment>> {
    let assignment = state
        .clients
        .vehicle_assignments
        .release_vehicle_from_driver(&assignment)
        .await
        .when("releasing vehicle from driver")?;
    Ok(Json(assignment))
}

#[utoipa::path(
    put,
    path = "/vehicle/assignment/change",
    tag = "vehicle_assignments",
    summary = "Change driver",
    description = "Moves a vehicle to another driver.",
    request_body = VehicleAssignment,
    responses(
        (status = 200, description = "Driver changed", body = VehicleAssignment),
        (status = 400, description = "Invalid assignment or rejected by the vehicle assignments service", body = ErrorResponse),
        (status = 500, description = "Vehicle assignments service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %assignment.vin, curp = %assignment.curp))]
pub async fn change_driver(
    State(state): State<AppState>,
    JsonBody(assignment): JsonBody<VehicleAssignment>,
) -> Result<Json<VehicleAssignment>> {
    let assignment = state
        .clients
        .vehicle_assignments
        .change_driver(&assignment)
        .await
        .when("changing driver")?;
    Ok(Json(assignment))
}

#[cfg(test)]
mod tests {
    use crate::api::models::assignments::VehicleAssignment;
    use crate::test_utils::{assert_error, create_test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use wiremock::matchers::{any, body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn assignment_json() -> serde_json::Value {
        json!({
            "vin": "1HGCM82633A004352",
            "curp": "LOAA900101HDFPRN09",
            "status": "ASSIGNED",
            "assignedAt": "2025-03-01T07:00:00"
        })
    }

    #[tokio::test]
    async fn test_find_by_status() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("GET"))
            .and(path("/vehicle/assignment/status/ASSIGNED"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([assignment_json()])))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.get("/vehicle/assignment/status/ASSIGNED").await;

        response.assert_status_ok();
        let assignments: Vec<VehicleAssignment> = response.json();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].curp, "LOAA900101HDFPRN09");
        assert!(!assignments[0].extra.contains_key("releasedAt"));
    }

    #[tokio::test]
    async fn test_find_by_vin_returns_backend_timestamps_verbatim() {
        let (server, backend) = create_test_app().await;
        let stored = json!({
            "vin": "1HGCM82633A004352",
            "curp": "LOAA900101HDFPRN09",
            "assignedAt": "2025-03-01T10:00:00Z",
            "releasedAt": null
        });
        Mock::given(method("GET"))
            .and(path("/vehicle/assignment/vin/1HGCM82633A004352"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.get("/vehicle/assignment/vin/1HGCM82633A004352").await;

        response.assert_status_ok();
        response.assert_json(&stored);
    }

    #[tokio::test]
    async fn test_release_vehicle_forwards_assignment() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("POST"))
            .and(path("/vehicle/assignment/release"))
            .and(body_json(assignment_json()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "vin": "1HGCM82633A004352",
                "curp": "LOAA900101HDFPRN09",
                "status": "RELEASED",
                "assignedAt": "2025-03-01T07:00:00",
                "releasedAt": "2025-03-01T19:00:00"
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.post("/vehicle/assignment/release").json(&assignment_json()).await;

        response.assert_status_ok();
        let assignment: VehicleAssignment = response.json();
        assert_eq!(assignment.extra["status"], "RELEASED");
        assert_eq!(assignment.extra["releasedAt"], "2025-03-01T19:00:00");
    }

    #[tokio::test]
    async fn test_assignment_requires_vin_and_curp() {
        let (server, backend) = create_test_app().await;

        let response = server
            .post("/vehicle/assignment/assign")
            .json(&json!({"vin": "1HGCM82633A004352"}))
            .await;
        response.assert_status_bad_request();

        assert!(backend.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_every_route_rewords_backend_errors() {
        let cases = [
            (Method::GET, "/vehicle/assignment/status/ASSIGNED", "searching by status"),
            (Method::GET, "/vehicle/assignment/history", "fetching assignments history"),
            (Method::GET, "/vehicle/assignment/vin/1HGCM82633A004352", "searching by VIN"),
            (Method::POST, "/vehicle/assignment/assign", "assigning vehicle to driver"),
            (Method::POST, "/vehicle/assignment/release", "releasing vehicle from driver"),
            (Method::PUT, "/vehicle/assignment/change", "changing driver"),
        ];

        for (backend_status, expected, kind) in [
            (400, StatusCode::BAD_REQUEST, "Bad request"),
            (500, StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        ] {
            let (server, backend) = create_test_app().await;
            Mock::given(any())
                .respond_with(
                    ResponseTemplate::new(backend_status).set_body_json(json!({"message": "driver already has a vehicle"})),
                )
                .mount(&backend)
                .await;

            for (http_method, uri, operation) in &cases {
                let response = server.method(http_method.clone(), uri).json(&assignment_json()).await;
                assert_error(
                    &response,
                    expected,
                    &format!("{kind} when {operation}: driver already has a vehicle"),
                );
            }
        }
    }
}
