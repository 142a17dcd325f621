//! Vehicle routes, keyed by VIN.

use crate::api::extract::JsonBody;
use crate::api::models::routes::Route;
use crate::errors::{ErrorResponse, OperationContext, Result};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    post,
    path = "/route/create",
    tag = "routes",
    summary = "Create route",
    request_body = Route,
    responses(
        (status = 200, description = "Route created", body = Route),
        (status = 400, description = "Invalid route or rejected by the routes service", body = ErrorResponse),
        (status = 500, description = "Routes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %route.vin))]
pub async fn create_route(State(state): State<AppState>, JsonBody(route): JsonBody<Route>) -> Result<Json<Route>> {
    let route = state.clients.routes.create_route(&route).await.when("creating route")?;
    Ok(Json(route))
}

#[utoipa::path(
    put,
    path = "/route/update",
    tag = "routes",
    summary = "Update route",
    request_body = Route,
    responses(
        (status = 200, description = "Route updated", body = Route),
        (status = 400, description = "Invalid route or rejected by the routes service", body = ErrorResponse),
        (status = 500, description = "Routes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %route.vin))]
pub async fn update_route(State(state): State<AppState>, JsonBody(route): JsonBody<Route>) -> Result<Json<Route>> {
    let route = state.clients.routes.update_route(&route).await.when("updating route")?;
    Ok(Json(route))
}

/// Deletes the route of a vehicle and returns it as it was before deletion.
#[utoipa::path(
    delete,
    path = "/route/delete/{vin}",
    tag = "routes",
    summary = "Delete route",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Deleted route", body = Route),
        (status = 400, description = "Rejected by the routes service", body = ErrorResponse),
        (status = 500, description = "Routes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vin))]
pub async fn delete_route(State(state): State<AppState>, Path(vin): Path<String>) -> Result<Json<Route>> {
    let route = state.clients.routes.delete_route(&vin).await.when("deleting route")?;
    Ok(Json(route))
}

#[utoipa::path(
    get,
    path = "/route/getall",
    tag = "routes",
    summary = "List routes",
    responses(
        (status = 200, description = "All routes", body = Vec<Route>),
        (status = 400, description = "Rejected by the routes service", body = ErrorResponse),
        (status = 500, description = "Routes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_all_routes(State(state): State<AppState>) -> Result<Json<Vec<Route>>> {
    let routes = state.clients.routes.get_all_routes().await.when("fetching all routes")?;
    Ok(Json(routes))
}

#[utoipa::path(
    get,
    path = "/route/get/{vin}",
    tag = "routes",
    summary = "Get route",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Route details", body = Route),
        (status = 400, description = "Rejected by the routes service", body = ErrorResponse),
        (status = 500, description = "Routes service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vin))]
pub async fn get_route_by_vin(State(state): State<AppState>, Path(vin): Path<String>) -> Result<Json<Route>> {
    let route = state.clients.routes.get_route_by_vin(&vin).await.when("fetching route by VIN")?;
    Ok(Json(route))
}

#[cfg(test)]
mod tests {
    use crate::api::models::routes::Route;
    use crate::test_utils::{assert_error, create_test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn route_json() -> serde_json::Value {
        json!({
            "vin": "1HGCM82633A004352",
            "origin": "Chihuahua",
            "destination": "Ciudad Juárez",
            "distanceKm": 372.5,
            "status": "IN_PROGRESS",
            "startDate": "2025-03-01"
        })
    }

    #[tokio::test]
    async fn test_delete_route_returns_deleted_route() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("DELETE"))
            .and(path("/route/delete/1HGCM82633A004352"))
            .respond_with(ResponseTemplate::new(200).set_body_json(route_json()))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.delete("/route/delete/1HGCM82633A004352").await;

        response.assert_status_ok();
        let route: Route = response.json();
        assert_eq!(route.vin, "1HGCM82633A004352");
        assert_eq!(route.extra["distanceKm"], 372.5);
    }

    #[tokio::test]
    async fn test_get_all_routes() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("GET"))
            .and(path("/route/getall"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([route_json()])))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.get("/route/getall").await;

        response.assert_status_ok();
        response.assert_json(&json!([route_json()]));
    }

    #[tokio::test]
    async fn test_every_route_rewords_backend_errors() {
        let cases = [
            (Method::POST, "/route/create", "creating route"),
            (Method::PUT, "/route/update", "updating route"),
            (Method::DELETE, "/route/delete/1HGCM82633A004352", "deleting route"),
            (Method::GET, "/route/getall", "fetching all routes"),
            (Method::GET, "/route/get/1HGCM82633A004352", "fetching route by VIN"),
        ];

        for (backend_status, expected, kind) in [
            (422, StatusCode::BAD_REQUEST, "Bad request"),
            (504, StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        ] {
            let (server, backend) = create_test_app().await;
            Mock::given(any())
                .respond_with(ResponseTemplate::new(backend_status).set_body_string("  vehicle has no route \n"))
                .mount(&backend)
                .await;

            for (http_method, uri, operation) in &cases {
                let response = server.method(http_method.clone(), uri).json(&route_json()).await;
                assert_error(&response, expected, &format!("{kind} when {operation}: vehicle has no route"));
            }
        }
    }
}
