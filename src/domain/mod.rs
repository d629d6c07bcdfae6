//! Domain models for nvml-enterprise-check

pub mod brand;
pub mod gpu;

pub use brand::BrandType;
pub use gpu::{CheckReport, DeviceReport, UnsupportedCall};
