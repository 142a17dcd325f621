//! Gateway-side processing that happens before a request is forwarded.

pub mod vehicle_image;

pub use vehicle_image::{ImageUpload, VehicleImageEncodingService};
