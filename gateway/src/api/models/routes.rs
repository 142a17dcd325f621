//! API request/response models for routes and the problems reported on them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A route driven by a vehicle. A vehicle has at most one route, so the VIN is the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[schema(example = "1HGCM82633A004352")]
    pub vin: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A problem reported on the route of a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[schema(example = "1HGCM82633A004352")]
    pub vin: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
