use super::{DownstreamClient, ForwardedResponse};
use crate::api::models::vehicles::Vehicle;
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::{HeaderValue, Method, header};

/// Operations of the vehicles service.
#[async_trait]
pub trait VehicleClient: Send + Sync {
    /// Creates a vehicle whose `image` already holds the encoded picture.
    async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle>;
    async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle>;
    async fn delete_vehicle(&self, vin: &str) -> Result<()>;
    async fn get_vehicle_by_vin(&self, vin: &str) -> Result<Vehicle>;
    async fn get_all_vehicles_by_model(&self, model: &str) -> Result<Vec<Vehicle>>;
    async fn get_all_vehicles(&self) -> Result<Vec<Vehicle>>;
    async fn view_image(&self, filename: &str) -> Result<ForwardedResponse>;
}

pub struct VehicleClientReqwest {
    client: DownstreamClient,
}

impl VehicleClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VehicleClient for VehicleClientReqwest {
    async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        self.client.send(Method::POST, &["vehicle", "create"], vehicle).await
    }

    async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        self.client.send(Method::PUT, &["vehicle", "update"], vehicle).await
    }

    async fn delete_vehicle(&self, vin: &str) -> Result<()> {
        self.client.execute(Method::DELETE, &["vehicle", "delete", vin]).await
    }

    async fn get_vehicle_by_vin(&self, vin: &str) -> Result<Vehicle> {
        self.client.fetch(Method::GET, &["vehicle", "get", vin]).await
    }

    async fn get_all_vehicles_by_model(&self, model: &str) -> Result<Vec<Vehicle>> {
        self.client.fetch(Method::GET, &["vehicle", "model", model]).await
    }

    async fn get_all_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.client.fetch(Method::GET, &["vehicle", "getall"]).await
    }

    async fn view_image(&self, filename: &str) -> Result<ForwardedResponse> {
        let mut image = self
            .client
            .forward::<()>(Method::GET, &["vehicle", "view", filename], None)
            .await?;

        if image.content_type().is_none() {
            let guessed = mime_guess::from_path(filename).first_or_octet_stream();
            if let Ok(value) = HeaderValue::from_str(guessed.essence_str()) {
                image.headers.insert(header::CONTENT_TYPE, value);
            }
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceEndpoint;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn vehicles_client(uri: &str) -> VehicleClientReqwest {
        let endpoint = ServiceEndpoint {
            url: uri.parse().unwrap(),
            timeout: Duration::from_secs(5),
        };
        VehicleClientReqwest::new(DownstreamClient::new("vehicles", &endpoint).unwrap())
    }

    #[tokio::test]
    async fn test_view_image_keeps_declared_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vehicle/view/truck.png"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/webp"))
            .mount(&mock_server)
            .await;

        let image = vehicles_client(&mock_server.uri()).view_image("truck.png").await.unwrap();
        assert_eq!(image.content_type(), Some("image/webp"));
        assert_eq!(image.body.as_ref(), &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_view_image_guesses_missing_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vehicle/view/truck.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&mock_server)
            .await;

        let image = vehicles_client(&mock_server.uri()).view_image("truck.jpg").await.unwrap();
        assert_eq!(image.content_type(), Some("image/jpeg"));
    }
}
