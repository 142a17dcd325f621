//! API response models for administrator invitation codes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Single-use code that allows a new administrator to register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationCode {
    #[schema(example = "7F3K9Q")]
    pub code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
