//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers, one module per backend service
//! - **[`models`]**: Request/response records forwarded to and from the backend services
//! - **[`extract`]**: Extractors that report malformed input as gateway errors
//!
//! # API Structure
//!
//! - **Administrators** (`/admin/*`)
//! - **Authentication** (`/auth/*`): responses forwarded verbatim
//! - **Drivers** (`/driver/*`)
//! - **Invitation codes** (`/code/*`)
//! - **Routes** (`/route/*`) and the problems reported on them (`/route/problem/*`)
//! - **Vehicles** (`/vehicle/*`) and their assignments (`/vehicle/assignment/*`)
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. API documentation is available at `/docs`
//! when the server is running.

pub mod extract;
pub mod handlers;
pub mod models;
