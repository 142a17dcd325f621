//! Vehicle management. Creation takes a multipart form and sends the image to the vehicles
//! service base64-encoded; image views are relayed byte for byte.

use crate::api::extract::JsonBody;
use crate::api::models::vehicles::{Vehicle, VehicleCreateForm};
use crate::clients::ForwardedResponse;
use crate::errors::{Error, ErrorResponse, OperationContext, Result};
use crate::services::ImageUpload;
use crate::AppState;
use axum::{
    Json,
    extract::{
        Path, State,
        multipart::{Multipart, MultipartError, MultipartRejection},
    },
    http::StatusCode,
};

/// Multipart field carrying the vehicle as JSON.
const VEHICLE_FIELD: &str = "vehicle";
/// Multipart field carrying the image file.
const IMAGE_FIELD: &str = "imageFile";

/// Reading a field fails with 413 once the body limit is hit; anything else is malformed input.
fn multipart_error(e: MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge { message: e.body_text() }
    } else {
        Error::BadRequest {
            message: format!("Failed to parse multipart data: {}", e.body_text()),
        }
    }
}

#[utoipa::path(
    post,
    path = "/vehicle/create",
    tag = "vehicles",
    summary = "Create vehicle",
    description = "Creates a vehicle from a multipart form with a `vehicle` JSON part and an `imageFile` part. The image is sent to the vehicles service base64-encoded.",
    request_body(content = VehicleCreateForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Vehicle created", body = Vehicle),
        (status = 400, description = "Invalid form, invalid image or rejected by the vehicles service", body = ErrorResponse),
        (status = 413, description = "Request body over the configured limit", body = ErrorResponse),
        (status = 500, description = "Vehicles service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Vehicle>> {
    let mut multipart = multipart?;
    let mut vehicle: Option<Vehicle> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            VEHICLE_FIELD => {
                let data = field.bytes().await.map_err(multipart_error)?;
                let parsed = serde_json::from_slice(&data).map_err(|e| Error::BadRequest {
                    message: format!("Invalid '{VEHICLE_FIELD}' part: {e}"),
                })?;
                vehicle = Some(parsed);
            }
            IMAGE_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;

                tracing::debug!(file_name = ?file_name, content_type = ?content_type, size = data.len(), "Received vehicle image");
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            other => {
                tracing::debug!(field = other, "Ignoring unexpected multipart field");
            }
        }
    }

    let vehicle = vehicle.ok_or_else(|| Error::BadRequest {
        message: format!("Required part '{VEHICLE_FIELD}' is missing"),
    })?;
    let image = image.ok_or_else(|| Error::BadRequest {
        message: format!("Required part '{IMAGE_FIELD}' is missing"),
    })?;

    let created = state
        .vehicle_images
        .create_vehicle_with_image_encoded(vehicle, image)
        .await
        .when("creating vehicle")?;
    Ok(Json(created))
}

#[utoipa::path(
    put,
    path = "/vehicle/update",
    tag = "vehicles",
    summary = "Update vehicle",
    request_body = Vehicle,
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle),
        (status = 400, description = "Invalid vehicle or rejected by the vehicles service", body = ErrorResponse),
        (status = 500, description = "Vehicles service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vehicle.vin))]
pub async fn update_vehicle(State(state): State<AppState>, JsonBody(vehicle): JsonBody<Vehicle>) -> Result<Json<Vehicle>> {
    let vehicle = state.clients.vehicles.update_vehicle(&vehicle).await.when("updating vehicle")?;
    Ok(Json(vehicle))
}

#[utoipa::path(
    delete,
    path = "/vehicle/delete/{vin}",
    tag = "vehicles",
    summary = "Delete vehicle",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Vehicle deleted"),
        (status = 400, description = "Rejected by the vehicles service", body = ErrorResponse),
        (status = 500, description = "Vehicles service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vin))]
pub async fn delete_vehicle(State(state): State<AppState>, Path(vin): Path<String>) -> Result<()> {
    state.clients.vehicles.delete_vehicle(&vin).await.when("deleting vehicle")
}

#[utoipa::path(
    get,
    path = "/vehicle/get/{vin}",
    tag = "vehicles",
    summary = "Get vehicle",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Vehicle details", body = Vehicle),
        (status = 400, description = "Rejected by the vehicles service", body = ErrorResponse),
        (status = 500, description = "Vehicles service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(vin = %vin))]
pub async fn get_vehicle_by_vin(State(state): State<AppState>, Path(vin): Path<String>) -> Result<Json<Vehicle>> {
    let vehicle = state.clients.vehicles.get_vehicle_by_vin(&vin).await.when("fetching vehicle by VIN")?;
    Ok(Json(vehicle))
}

#[utoipa::path(
    get,
    path = "/vehicle/model/{model}",
    tag = "vehicles",
    summary = "List vehicles by model",
    params(("model" = String, Path, description = "Vehicle model")),
    responses(
        (status = 200, description = "Vehicles of the given model", body = Vec<Vehicle>),
        (status = 400, description = "Rejected by the vehicles service", body = ErrorResponse),
        (status = 500, description = "Vehicles service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(model = %model))]
pub async fn get_all_vehicles_by_model(
    State(state): State<AppState>,
    Path(model): Path<String>,
) -> Result<Json<Vec<Vehicle>>> {
    let vehicles = state
        .clients
        .vehicles
        .get_all_vehicles_by_model(&model)
        .await
        .when("fetching vehicles by model")?;
    Ok(Json(vehicles))
}

#[utoipa::path(
    get,
    path = "/vehicle/getall",
    tag = "vehicles",
    summary = "List vehicles",
    responses(
        (status = 200, description = "All vehicles", body = Vec<Vehicle>),
        (status = 400, description = "Rejected by the vehicles service", body = ErrorResponse),
        (status = 500, description = "Vehicles service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_all_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>> {
    let vehicles = state.clients.vehicles.get_all_vehicles().await.when("fetching all vehicles")?;
    Ok(Json(vehicles))
}

#[utoipa::path(
    get,
    path = "/vehicle/view/{filename}",
    tag = "vehicles",
    summary = "View vehicle image",
    params(("filename" = String, Path, description = "Stored image file name")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 400, description = "Rejected by the vehicles service", body = ErrorResponse),
        (status = 500, description = "Vehicles service failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(filename = %filename))]
pub async fn view_image(State(state): State<AppState>, Path(filename): Path<String>) -> Result<ForwardedResponse> {
    state.clients.vehicles.view_image(&filename).await.when("viewing image")
}

#[cfg(test)]
mod tests {
    use crate::api::models::vehicles::Vehicle;
    use crate::errors::ErrorResponse;
    use crate::test_utils::{assert_error, create_test_app};
    use axum::http::{Method, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;
    use wiremock::matchers::{any, body_json, body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn vehicle_json() -> serde_json::Value {
        json!({
            "vin": "1HGCM82633A004352",
            "brand": "Nissan",
            "model": "NP300",
            "licensePlate": "EXX-123-A",
            "color": "white",
            "purchaseDate": "2024-06-15",
            "cost": 415000.0,
            "status": "AVAILABLE"
        })
    }

    fn vehicle_part() -> Part {
        Part::text(vehicle_json().to_string()).mime_type("application/json")
    }

    fn image_part(data: &'static [u8]) -> Part {
        Part::bytes(data).file_name("truck.png").mime_type("image/png")
    }

    #[test_log::test(tokio::test)]
    async fn test_create_vehicle_submits_encoded_image_once() {
        let (server, backend) = create_test_app().await;
        let mut stored = vehicle_json();
        stored["image"] = json!("aGVsbG8=");

        Mock::given(method("POST"))
            .and(path("/vehicle/create"))
            .and(body_partial_json(json!({
                "vin": "1HGCM82633A004352",
                "brand": "Nissan",
                "image": "aGVsbG8="
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
            .expect(1)
            .mount(&backend)
            .await;

        let form = MultipartForm::new()
            .add_part("vehicle", vehicle_part())
            .add_part("imageFile", image_part(b"hello"));
        let response = server.post("/vehicle/create").multipart(form).await;

        response.assert_status_ok();
        let vehicle: Vehicle = response.json();
        assert_eq!(vehicle.image.as_deref(), Some("aGVsbG8="));
        assert_eq!(vehicle.extra["licensePlate"], "EXX-123-A");
    }

    #[tokio::test]
    async fn test_create_vehicle_missing_parts() {
        let (server, backend) = create_test_app().await;

        let form = MultipartForm::new().add_part("vehicle", vehicle_part());
        let response = server.post("/vehicle/create").multipart(form).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "Required part 'imageFile' is missing");

        let form = MultipartForm::new().add_part("imageFile", image_part(b"hello"));
        let response = server.post("/vehicle/create").multipart(form).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "Required part 'vehicle' is missing");

        let response = server.post("/vehicle/create").json(&vehicle_json()).await;
        response.assert_status_bad_request();

        assert!(backend.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_create_vehicle_truncated_form_is_bad_request() {
        let (server, backend) = create_test_app().await;

        let body = "--XYZ\r\nContent-Disposition: form-data; name=\"vehicle\"\r\n\r\n{\"vin\":";
        let response = server
            .post("/vehicle/create")
            .bytes(bytes::Bytes::from_static(body.as_bytes()))
            .content_type("multipart/form-data; boundary=XYZ")
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert!(error.message.starts_with("Failed to parse multipart data: "), "{}", error.message);
        assert!(backend.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_create_vehicle_rejects_non_image() {
        let (server, backend) = create_test_app().await;

        let form = MultipartForm::new().add_part("vehicle", vehicle_part()).add_part(
            "imageFile",
            Part::bytes(b"%PDF-1.7".as_slice())
                .file_name("invoice.pdf")
                .mime_type("application/pdf"),
        );
        let response = server.post("/vehicle/create").multipart(form).await;

        assert_error(
            &response,
            StatusCode::BAD_REQUEST,
            "Bad request when creating vehicle: image file must be an image, got application/pdf",
        );
        assert!(backend.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_create_vehicle_backend_error_is_reworded() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("POST"))
            .and(path("/vehicle/create"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "storage unavailable"})))
            .expect(1)
            .mount(&backend)
            .await;

        let form = MultipartForm::new()
            .add_part("vehicle", vehicle_part())
            .add_part("imageFile", image_part(b"hello"));
        let response = server.post("/vehicle/create").multipart(form).await;

        assert_error(
            &response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error when creating vehicle: storage unavailable",
        );
    }

    #[tokio::test]
    async fn test_get_vehicles_by_model_uses_path_value() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("GET"))
            .and(path("/vehicle/model/NP300"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([vehicle_json()])))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.get("/vehicle/model/NP300").await;

        response.assert_status_ok();
        let vehicles: Vec<Vehicle> = response.json();
        assert_eq!(vehicles[0].extra["model"], "NP300");
    }

    #[tokio::test]
    async fn test_update_vehicle_keeps_unknown_fields() {
        let (server, backend) = create_test_app().await;
        let request = json!({"vin": "1HGCM82633A004352", "year": 2024, "brand": "Nissan"});
        let stored = json!({
            "id": 42,
            "vin": "1HGCM82633A004352",
            "year": 2024,
            "brand": "Nissan",
            "updatedAt": "2025-03-01T10:00:00.000+00:00"
        });

        Mock::given(method("PUT"))
            .and(path("/vehicle/update"))
            .and(body_json(&request))
            .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.put("/vehicle/update").json(&request).await;

        response.assert_status_ok();
        response.assert_json(&stored);
    }

    #[tokio::test]
    async fn test_view_image_forwards_bytes() {
        let (server, backend) = create_test_app().await;
        Mock::given(method("GET"))
            .and(path("/vehicle/view/truck.png"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"\x89PNG".to_vec(), "image/png"))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server.get("/vehicle/view/truck.png").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "image/png");
        assert_eq!(response.as_bytes().as_ref(), b"\x89PNG");
    }

    #[tokio::test]
    async fn test_every_route_rewords_backend_errors() {
        let cases = [
            (Method::PUT, "/vehicle/update", "updating vehicle"),
            (Method::DELETE, "/vehicle/delete/1HGCM82633A004352", "deleting vehicle"),
            (Method::GET, "/vehicle/get/1HGCM82633A004352", "fetching vehicle by VIN"),
            (Method::GET, "/vehicle/model/NP300", "fetching vehicles by model"),
            (Method::GET, "/vehicle/getall", "fetching all vehicles"),
            (Method::GET, "/vehicle/view/truck.png", "viewing image"),
        ];

        for (backend_status, expected, kind) in [
            (400, StatusCode::BAD_REQUEST, "Bad request"),
            (500, StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        ] {
            let (server, backend) = create_test_app().await;
            Mock::given(any())
                .respond_with(ResponseTemplate::new(backend_status).set_body_json(json!({"message": "vin not found"})))
                .mount(&backend)
                .await;

            for (http_method, uri, operation) in &cases {
                let response = server.method(http_method.clone(), uri).json(&vehicle_json()).await;
                assert_error(&response, expected, &format!("{kind} when {operation}: vin not found"));
            }
        }
    }
}
