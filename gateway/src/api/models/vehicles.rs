//! API request/response models for vehicles.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A fleet vehicle, keyed by VIN.
///
/// Only the fields the gateway reads are typed. Everything else the caller or the vehicles
/// service sends is kept in `extra` and forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[schema(example = "1HGCM82633A004352")]
    pub vin: String,
    /// Base64-encoded image, filled in by the gateway on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Multipart form accepted by `POST /vehicle/create`. Documentation only.
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCreateForm {
    /// Vehicle fields as a JSON document
    pub vehicle: Vehicle,
    /// Image of the vehicle
    #[schema(value_type = String, format = Binary)]
    pub image_file: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_round_trip() {
        let input = json!({
            "vin": "1HGCM82633A004352",
            "brand": "Nissan",
            "year": 2024,
            "purchaseDate": "2024-02-29T00:00:00-06:00",
            "specs": {"axles": 2}
        });

        let vehicle: Vehicle = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(vehicle.vin, "1HGCM82633A004352");
        assert!(vehicle.image.is_none());
        assert_eq!(serde_json::to_value(&vehicle).unwrap(), input);
    }
}
