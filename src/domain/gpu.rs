//! GPU report domain types
//!
//! What the check learned about each device, collected for JSON output.

use crate::domain::BrandType;
use crate::nvml::check::CallSite;

use serde::Serialize;
use std::fmt;

/// What the check learned about one GPU
///
/// Fields are `None` when the query was not supported by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    /// GPU index (0-based)
    pub index: u32,
    /// GPU name (e.g., "NVIDIA RTX A6000")
    pub name: Option<String>,
    /// Product brand
    pub brand: Option<BrandType>,
    /// Raw `nvmlBrandType_t` value
    pub brand_code: Option<u32>,
    /// Whether the brand counts as Enterprise/Quadro
    pub enterprise: Option<bool>,
}

impl DeviceReport {
    /// Create an empty report for a device index
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: None,
            brand: None,
            brand_code: None,
            enterprise: None,
        }
    }

    /// Record the brand and its classification
    pub fn set_brand(&mut self, brand: BrandType) {
        self.brand = Some(brand);
        self.brand_code = Some(brand.as_raw());
        self.enterprise = Some(brand.is_enterprise());
    }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.index,
            self.name.as_deref().unwrap_or("<unknown>")
        )
    }
}

/// A not-supported query noted during the check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedCall {
    /// Device the query was made for, if any
    pub device: Option<u32>,
    pub call: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl UnsupportedCall {
    pub fn new(device: Option<u32>, site: &CallSite) -> Self {
        Self {
            device,
            call: site.call,
            file: site.file,
            line: site.line,
        }
    }
}

/// Full result of a check run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of devices NVML reported
    pub device_count: u32,
    pub devices: Vec<DeviceReport>,
    pub unsupported: Vec<UnsupportedCall>,
}

impl CheckReport {
    /// Number of devices classified as Enterprise/Quadro
    pub fn enterprise_count(&self) -> usize {
        self.devices
            .iter()
            .filter(|d| d.enterprise == Some(true))
            .count()
    }
}
