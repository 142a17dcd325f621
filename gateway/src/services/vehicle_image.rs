//! Encodes uploaded vehicle images before they are handed to the vehicles service.

use crate::api::models::vehicles::Vehicle;
use crate::clients::VehicleClient;
use crate::errors::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, instrument};

/// An image file received in a multipart upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    /// The declared content type, or one guessed from the file name.
    fn media_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
            .map(str::to_string)
            .or_else(|| {
                self.file_name
                    .as_deref()
                    .and_then(|name| mime_guess::from_path(name).first())
                    .map(|mime| mime.essence_str().to_string())
            })
    }
}

/// Creates vehicles whose image travels to the vehicles service as base64 text.
#[derive(Clone)]
pub struct VehicleImageEncodingService {
    vehicles: Arc<dyn VehicleClient>,
    max_image_size: usize,
}

impl VehicleImageEncodingService {
    pub fn new(vehicles: Arc<dyn VehicleClient>, max_image_size: usize) -> Self {
        Self {
            vehicles,
            max_image_size,
        }
    }

    /// Checks the upload is a non-empty image within the size limit and returns its base64 form.
    pub fn encode_image(&self, image: &ImageUpload) -> Result<String> {
        if image.data.is_empty() {
            return Err(Error::BadRequest {
                message: "image file is empty".to_string(),
            });
        }

        if image.data.len() > self.max_image_size {
            return Err(Error::BadRequest {
                message: format!(
                    "image file is {} bytes, the maximum allowed size is {} bytes",
                    image.data.len(),
                    self.max_image_size
                ),
            });
        }

        match image.media_type() {
            Some(media_type) if media_type.starts_with("image/") => {}
            Some(media_type) => {
                return Err(Error::BadRequest {
                    message: format!("image file must be an image, got {media_type}"),
                });
            }
            None => {
                return Err(Error::BadRequest {
                    message: "image file type could not be determined".to_string(),
                });
            }
        }

        Ok(STANDARD.encode(&image.data))
    }

    /// Stores the encoded image on the vehicle and submits it to the vehicles service once.
    #[instrument(skip_all, fields(vin = %vehicle.vin, image_size = image.data.len()))]
    pub async fn create_vehicle_with_image_encoded(&self, mut vehicle: Vehicle, image: ImageUpload) -> Result<Vehicle> {
        let encoded = self.encode_image(&image)?;
        debug!(encoded_size = encoded.len(), "Encoded vehicle image");

        vehicle.image = Some(encoded);
        self.vehicles.create_vehicle(&vehicle).await
    }
}
