//! API request/response models for administrators.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Credentials used to register, sign in or update an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorRequest {
    #[schema(example = "ana.lopez@chiops.mx")]
    pub email: String,
    #[schema(example = "s3cr3t-pass")]
    pub password: String,
    /// Invitation code, required by the backend when registering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "7F3K9Q")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdministratorRequest {
    /// Rejects credentials that the backend would never accept.
    pub fn validate(&self) -> Result<(), Error> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(Error::BadRequest {
                message: "email must not be blank".to_string(),
            });
        }
        if !email.contains('@') {
            return Err(Error::BadRequest {
                message: format!("email '{email}' is not a valid email address"),
            });
        }
        if self.password.trim().is_empty() {
            return Err(Error::BadRequest {
                message: "password must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

/// Administrator as returned by the backend, relayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorResponse {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> AdministratorRequest {
        AdministratorRequest {
            email: email.to_string(),
            password: password.to_string(),
            code: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_credentials() {
        assert!(request("ana@chiops.mx", "pw").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_credentials() {
        for (email, password) in [("", "pw"), ("   ", "pw"), ("not-an-email", "pw"), ("ana@chiops.mx", " ")] {
            let err = request(email, password).validate().unwrap_err();
            assert!(matches!(err, Error::BadRequest { .. }), "{email:?}/{password:?}");
        }
    }

    #[test]
    fn test_code_is_omitted_when_absent() {
        let json = serde_json::to_value(request("ana@chiops.mx", "pw")).unwrap();
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let input = serde_json::json!({
            "email": "ana@chiops.mx",
            "password": "pw",
            "code": "7F3K9Q",
            "fullName": "Ana López"
        });
        let parsed: AdministratorRequest = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(parsed.code.as_deref(), Some("7F3K9Q"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), input);
    }
}
