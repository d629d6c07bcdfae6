//! NVML manager implementation
//!
//! Provides the main interface for NVML initialization and device discovery.

use crate::error::{InitError, LoadError, NvmlFailure};
use crate::nvml::device::NvmlDevice;
use crate::nvml::loader::{NvmlLibrary, LIBRARY_NAME};
use crate::nvml::traits::GpuManager;

use nvml_wrapper::error::NvmlError as BindingError;
use nvml_wrapper::Nvml;
use std::ffi::OsString;

/// Why `NvmlManager::init` failed
#[derive(Debug)]
pub enum InitFailure {
    /// The binding could not open the library
    Load(LoadError),
    /// `nvmlInit` itself failed
    Init(InitError),
}

impl From<InitFailure> for crate::error::AppError {
    fn from(err: InitFailure) -> Self {
        match err {
            InitFailure::Load(e) => e.into(),
            InitFailure::Init(e) => e.into(),
        }
    }
}

/// NVML session for GPU discovery
pub struct NvmlManager {
    nvml: Nvml,
    library: OsString,
}

impl NvmlManager {
    /// Initialize NVML from a loaded library
    pub fn init(library: &NvmlLibrary) -> Result<Self, InitFailure> {
        let result = match library.path() {
            Some(path) => {
                log::debug!(
                    "Initializing NVML from {} (held open: {})",
                    path.to_string_lossy(),
                    library.is_resident()
                );
                Nvml::builder().lib_path(path).init()
            }
            None => {
                log::debug!("Initializing NVML from the default search path");
                Nvml::init()
            }
        };

        let nvml = result.map_err(classify_init_error)?;
        let library = library
            .path()
            .map_or_else(|| OsString::from(LIBRARY_NAME), |p| p.to_os_string());
        Ok(Self { nvml, library })
    }
}

fn classify_init_error(err: BindingError) -> InitFailure {
    match err {
        BindingError::LibloadingError(e) => InitFailure::Load(LoadError::Binding(e.to_string())),
        BindingError::FailedToLoadSymbol(s) => InitFailure::Load(LoadError::Binding(s)),
        BindingError::DriverNotLoaded => InitFailure::Init(InitError::DriverNotLoaded),
        BindingError::NoPermission => InitFailure::Init(InitError::NoPermission),
        other => InitFailure::Init(InitError::Other((&other).into())),
    }
}

impl GpuManager for NvmlManager {
    type Device<'a> = NvmlDevice<'a>;

    fn device_count(&self) -> Result<u32, NvmlFailure> {
        self.nvml.device_count().map_err(NvmlFailure::from)
    }

    fn device_by_index(&self, index: u32) -> Result<Self::Device<'_>, NvmlFailure> {
        let device = self
            .nvml
            .device_by_index(index)
            .map_err(NvmlFailure::from)?;
        Ok(NvmlDevice::new(device, index, &self.library))
    }

    fn shutdown(self) -> Result<(), NvmlFailure> {
        self.nvml.shutdown().map_err(NvmlFailure::from)
    }
}
