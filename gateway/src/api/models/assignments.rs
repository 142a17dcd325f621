//! API request/response models for vehicle assignments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Binding of a vehicle to a driver. Status and timestamps stay in `extra` as the backend
/// wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleAssignment {
    #[schema(example = "1HGCM82633A004352")]
    pub vin: String,
    #[schema(example = "LOAA900101HDFPRN09")]
    pub curp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
