//! API request and response data models.
//!
//! These are plain records passed through to the backend services. Only the keys the gateway
//! reads (VIN, CURP, code, email) are typed; every other field lands in a flattened `extra`
//! map, so records reach the backend and come back to the caller with their fields and values
//! unchanged. Timestamps are never parsed.

pub mod administrators;
pub mod assignments;
pub mod drivers;
pub mod invitation_codes;
pub mod routes;
pub mod vehicles;
