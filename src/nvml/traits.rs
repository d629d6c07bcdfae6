//! Trait definitions for GPU operations
//!
//! These traits abstract over NVML to enable testing with mocks.

use crate::domain::BrandType;
use crate::error::NvmlFailure;

/// Trait for GPU device queries
pub trait GpuDevice {
    /// Get the GPU index
    fn index(&self) -> u32;

    /// Get the GPU name (`nvmlDeviceGetName`)
    fn name(&self) -> Result<String, NvmlFailure>;

    /// Get the product brand (`nvmlDeviceGetBrand`)
    fn brand(&self) -> Result<BrandType, NvmlFailure>;
}

/// Trait for an initialized NVML session
///
/// Devices borrow the manager, so they cannot outlive the session.
pub trait GpuManager {
    /// The device type returned by this manager
    type Device<'a>: GpuDevice
    where
        Self: 'a;

    /// Get the number of GPU devices (`nvmlDeviceGetCount`)
    fn device_count(&self) -> Result<u32, NvmlFailure>;

    /// Get a device handle by index (`nvmlDeviceGetHandleByIndex`)
    fn device_by_index(&self, index: u32) -> Result<Self::Device<'_>, NvmlFailure>;

    /// Shut the session down (`nvmlShutdown`)
    fn shutdown(self) -> Result<(), NvmlFailure>
    where
        Self: Sized;
}
