use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error as ThisError;
use utoipa::ToSchema;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Client input rejected, either here or by a backend service
    #[error("{message}")]
    BadRequest { message: String },

    /// A backend service failed while handling the request
    #[error("{message}")]
    InternalServer { message: String },

    /// Request body over the configured limit
    #[error("{message}")]
    PayloadTooLarge { message: String },

    /// No route matched the request path
    #[error("{message}")]
    NotFound { message: String },

    /// A route matched the path but not the method
    #[error("{message}")]
    MethodNotAllowed { message: String },

    /// Unexpected error with full context chain (transport failures, undecodable bodies)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// HTTP reason phrase for the status code
    pub error: String,
    pub message: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::InternalServer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message }
            | Error::InternalServer { message }
            | Error::PayloadTooLarge { message }
            | Error::NotFound { message }
            | Error::MethodNotAllowed { message } => message.clone(),
            Error::Other(_) => "Internal server error".to_string(),
        }
    }

    /// Re-wraps a backend error with the operation that was being performed.
    ///
    /// Only `BadRequest` and `InternalServer` are re-worded; the kind is preserved.
    /// Every other variant is returned untouched.
    pub fn when(self, operation: impl Display) -> Self {
        match self {
            Error::BadRequest { message } => Error::BadRequest {
                message: format!("Bad request when {operation}: {message}"),
            },
            Error::InternalServer { message } => Error::InternalServer {
                message: format!("Internal error when {operation}: {message}"),
            },
            other => other,
        }
    }
}

/// Attaches the failing operation to a backend error, see [`Error::when`].
pub trait OperationContext<T> {
    fn when(self, operation: impl Display) -> Result<T>;
}

impl<T> OperationContext<T> for Result<T> {
    fn when(self, operation: impl Display) -> Result<T> {
        self.map_err(|e| e.when(operation))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::InternalServer { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::BadRequest { .. } | Error::PayloadTooLarge { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            Error::NotFound { .. } | Error::MethodNotAllowed { .. } => {
                tracing::debug!("Routing error: {}", self);
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for gateway operation results
pub type Result<T> = std::result::Result<T, Error>;
