//! NVML abstraction layer
//!
//! Library discovery, session management and uniform result checking, with
//! trait-based abstractions for testability.

pub mod check;
pub mod device;
#[cfg(windows)]
mod driver_store;
pub mod loader;
pub mod return_code;
pub mod traits;
pub mod wrapper;

pub use check::{CallSite, Checked};
pub use device::NvmlDevice;
pub use loader::{load_imports, NvmlLibrary};
pub use return_code::ReturnCode;
pub use traits::{GpuDevice, GpuManager};
pub use wrapper::{InitFailure, NvmlManager};
