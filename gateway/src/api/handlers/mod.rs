//! HTTP request handlers, one module per backend service.
//!
//! Every handler validates the shape of its input, calls exactly one client operation and
//! returns the result. A `BadRequest` or `InternalServer` error from the client is re-worded
//! with the operation being performed (see [`crate::errors::OperationContext`]); any other
//! error passes through untouched.
//!
//! - [`administrators`]: administrator accounts (`/admin/*`)
//! - [`auth`]: login and registration, forwarded verbatim (`/auth/*`)
//! - [`drivers`]: drivers (`/driver/*`)
//! - [`invitation_codes`]: administrator invitation codes (`/code/*`)
//! - [`problems`]: problems reported on routes (`/route/problem/*`)
//! - [`routes`]: routes (`/route/*`)
//! - [`vehicle_assignments`]: vehicle to driver assignments (`/vehicle/assignment/*`)
//! - [`vehicles`]: vehicles and their images (`/vehicle/*`)
//! - [`fallback`]: 404 and 405 responses for unrouted requests

pub mod administrators;
pub mod auth;
pub mod drivers;
pub mod fallback;
pub mod invitation_codes;
pub mod problems;
pub mod routes;
pub mod vehicle_assignments;
pub mod vehicles;
