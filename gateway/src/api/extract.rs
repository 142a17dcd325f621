//! Extractors that reject malformed input with the gateway's JSON error body.
//!
//! axum's own extractors answer with plain text and, for well-formed JSON of the wrong
//! shape, with 422. Input that cannot be forwarded is a 400 here, rendered like every
//! other [`Error`].

use crate::errors::Error;
use axum::extract::{FromRequest, multipart::MultipartRejection, rejection::JsonRejection};

/// JSON request body. Syntax and shape errors both become [`Error::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for Error {
    fn from(rejection: MultipartRejection) -> Self {
        Error::BadRequest {
            message: rejection.body_text(),
        }
    }
}
