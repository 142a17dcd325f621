//! API request/response models for drivers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A driver, keyed by CURP (the Mexican personal identity code). Other fields pass through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[schema(example = "LOAA900101HDFPRN09")]
    pub curp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
