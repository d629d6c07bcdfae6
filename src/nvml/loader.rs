//! NVML library discovery
//!
//! On Windows the library that matches the installed driver lives in the
//! driver's DriverStore directory, which is not on the default DLL search
//! path. [`load_imports`] finds that directory, loads `nvml.dll` from it and
//! checks every import the check needs before NVML is initialized. Everywhere
//! else the library is resident on the default search path and nothing needs
//! to happen here.

use crate::error::LoadError;

use libloading::Library;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// File name of the NVML library
#[cfg(windows)]
pub const LIBRARY_NAME: &str = "nvml.dll";
#[cfg(not(windows))]
pub const LIBRARY_NAME: &str = "libnvidia-ml.so.1";

/// Every NVML entry point the check calls
pub const REQUIRED_IMPORTS: [&str; 7] = [
    "nvmlInit_v2",
    "nvmlShutdown",
    "nvmlErrorString",
    "nvmlDeviceGetCount_v2",
    "nvmlDeviceGetHandleByIndex_v2",
    "nvmlDeviceGetName",
    "nvmlDeviceGetBrand",
];

/// A located NVML library
///
/// When the library was opened here it stays loaded for as long as this value
/// lives, so the binding's own open of the same module resolves to it.
pub struct NvmlLibrary {
    path: Option<OsString>,
    library: Option<Library>,
}

impl NvmlLibrary {
    /// The library is expected on the default search path
    pub fn system() -> Self {
        Self {
            path: None,
            library: None,
        }
    }

    /// A library opened and checked by the loader
    pub fn resident(path: Option<OsString>, library: Library) -> Self {
        Self {
            path,
            library: Some(library),
        }
    }

    /// Path the binding should open, if not the default
    pub fn path(&self) -> Option<&OsStr> {
        self.path.as_deref()
    }

    /// Whether the loader holds the library open
    pub fn is_resident(&self) -> bool {
        self.library.is_some()
    }
}

/// Locate the NVML library and resolve its imports
///
/// An explicit path is opened as-is on every OS. Otherwise Windows searches
/// the DriverStore and other systems return immediately.
pub fn load_imports(explicit_path: Option<&Path>) -> Result<NvmlLibrary, LoadError> {
    if let Some(path) = explicit_path {
        log::debug!("Using NVML library at {}", path.display());
        let library = open_and_resolve(path.as_os_str())?;
        return Ok(NvmlLibrary::resident(
            Some(path.as_os_str().to_os_string()),
            library,
        ));
    }

    load_platform_imports()
}

#[cfg(windows)]
fn load_platform_imports() -> Result<NvmlLibrary, LoadError> {
    crate::nvml::driver_store::load_imports()
}

#[cfg(not(windows))]
fn load_platform_imports() -> Result<NvmlLibrary, LoadError> {
    log::debug!("{} is loaded from the default search path", LIBRARY_NAME);
    Ok(NvmlLibrary::system())
}

/// Open a library and make sure every required import is present
pub fn open_and_resolve(name: &OsStr) -> Result<Library, LoadError> {
    // SAFETY: NVML runs no initialization routines that depend on our state
    let library = unsafe { Library::new(name) }.map_err(|source| LoadError::Open {
        name: name.to_string_lossy().into_owned(),
        source,
    })?;

    resolve_imports(&library)?;
    Ok(library)
}

fn resolve_imports(library: &Library) -> Result<(), LoadError> {
    for symbol in REQUIRED_IMPORTS {
        // SAFETY: the symbol is only looked up here, never called through this type
        unsafe { library.get::<unsafe extern "C" fn()>(symbol.as_bytes()) }
            .map_err(|source| LoadError::MissingSymbol { symbol, source })?;
        log::debug!("Resolved {}", symbol);
    }
    Ok(())
}

/// Split a double-NUL-terminated list of UTF-16 strings
///
/// Used for configuration manager device id lists and `REG_MULTI_SZ` values.
/// Stops at the first empty string.
pub fn split_multi_sz(buffer: &[u16]) -> Vec<String> {
    buffer
        .split(|&c| c == 0)
        .take_while(|s| !s.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}

/// Directory part of a Windows driver path (everything before the last `\`)
pub fn driver_directory(driver_path: &str) -> Option<&str> {
    driver_path.rfind('\\').map(|pos| &driver_path[..pos])
}
