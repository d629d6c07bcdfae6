//! Mock implementations for testing
//!
//! Provides mock GPU device and manager for unit testing without real hardware.

use crate::domain::BrandType;
use crate::error::NvmlFailure;
use crate::nvml::{GpuDevice, GpuManager, ReturnCode};

/// Message used for failures configured by code
const MOCK_FAILURE: &str = "Mock failure";

/// Mock GPU device for testing
#[derive(Debug, Clone)]
pub struct MockDevice {
    index: u32,
    name: Result<String, NvmlFailure>,
    brand: Result<BrandType, NvmlFailure>,
}

impl MockDevice {
    /// Create a new mock device with default values
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: Ok(format!("Mock GPU {}", index)),
            brand: Ok(BrandType::GeForce),
        }
    }

    /// Builder: set name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Ok(name.into());
        self
    }

    /// Builder: make the name query fail
    pub fn with_name_error(mut self, code: ReturnCode) -> Self {
        self.name = Err(NvmlFailure::new(code, MOCK_FAILURE));
        self
    }

    /// Builder: set brand
    pub fn with_brand(mut self, brand: BrandType) -> Self {
        self.brand = Ok(brand);
        self
    }

    /// Builder: make the brand query fail
    pub fn with_brand_error(mut self, code: ReturnCode) -> Self {
        self.brand = Err(NvmlFailure::new(code, MOCK_FAILURE));
        self
    }
}

impl GpuDevice for MockDevice {
    fn index(&self) -> u32 {
        self.index
    }

    fn name(&self) -> Result<String, NvmlFailure> {
        self.name.clone()
    }

    fn brand(&self) -> Result<BrandType, NvmlFailure> {
        self.brand.clone()
    }
}

/// Mock NVML session for testing
#[derive(Debug, Default)]
pub struct MockManager {
    devices: Vec<MockDevice>,
    count_error: Option<NvmlFailure>,
    shutdown_error: Option<NvmlFailure>,
}

impl MockManager {
    /// Create a manager with the given devices
    pub fn new(devices: Vec<MockDevice>) -> Self {
        Self {
            devices,
            ..Default::default()
        }
    }

    /// Builder: make the device count query fail
    pub fn with_count_error(mut self, failure: NvmlFailure) -> Self {
        self.count_error = Some(failure);
        self
    }

    /// Builder: make shutdown fail
    pub fn with_shutdown_error(mut self, code: ReturnCode) -> Self {
        self.shutdown_error = Some(NvmlFailure::new(code, MOCK_FAILURE));
        self
    }
}

impl GpuManager for MockManager {
    type Device<'a> = MockDevice;

    fn device_count(&self) -> Result<u32, NvmlFailure> {
        match &self.count_error {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.devices.len() as u32),
        }
    }

    fn device_by_index(&self, index: u32) -> Result<Self::Device<'_>, NvmlFailure> {
        self.devices
            .get(index as usize)
            .cloned()
            .ok_or_else(|| NvmlFailure::new(ReturnCode::INVALID_ARGUMENT, "Invalid Argument"))
    }

    fn shutdown(self) -> Result<(), NvmlFailure> {
        match self.shutdown_error {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_manager_devices() {
        let manager = MockManager::new(vec![MockDevice::new(0), MockDevice::new(1)]);
        assert_eq!(manager.device_count().unwrap(), 2);

        let device = manager.device_by_index(1).unwrap();
        assert_eq!(device.index(), 1);
        assert_eq!(device.name().unwrap(), "Mock GPU 1");
    }

    #[test]
    fn test_mock_manager_out_of_range() {
        let manager = MockManager::new(vec![]);
        let err = manager.device_by_index(0).unwrap_err();
        assert_eq!(err.code, ReturnCode::INVALID_ARGUMENT);
    }

    #[test]
    fn test_mock_device_errors() {
        let device = MockDevice::new(0).with_brand_error(ReturnCode::NOT_SUPPORTED);
        assert!(device.brand().unwrap_err().is_not_supported());
    }
}
