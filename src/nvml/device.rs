//! NVML device implementation
//!
//! Real implementation of GpuDevice trait using nvml-wrapper.

use crate::domain::BrandType;
use crate::error::{LoadError, NvmlFailure};
use crate::nvml::return_code::ReturnCode;
use crate::nvml::traits::GpuDevice;

use nvml_wrapper::error::nvml_try;
use nvml_wrapper::Device;
use nvml_wrapper_sys::bindings::{nvmlDevice_t, nvmlReturn_enum_NVML_SUCCESS};
use std::ffi::OsStr;
use std::os::raw::c_uint;

/// NVML device wrapper implementing GpuDevice trait
pub struct NvmlDevice<'a> {
    device: Device<'a>,
    index: u32,
    library: &'a OsStr,
}

impl<'a> NvmlDevice<'a> {
    /// Create a new NVML device wrapper
    ///
    /// `library` names the NVML library the session was initialized from.
    pub fn new(device: Device<'a>, index: u32, library: &'a OsStr) -> Self {
        Self {
            device,
            index,
            library,
        }
    }
}

impl GpuDevice for NvmlDevice<'_> {
    fn index(&self) -> u32 {
        self.index
    }

    fn name(&self) -> Result<String, NvmlFailure> {
        self.device.name().map_err(NvmlFailure::from)
    }

    fn brand(&self) -> Result<BrandType, NvmlFailure> {
        // nvml-wrapper rejects brand codes it does not know, so read the raw value
        // SAFETY: handle() is safe to call within the lifetime of the Device
        let (code, raw) = get_brand_raw(self.library, unsafe { self.device.handle() })?;
        brand_from_raw(code, raw)
    }
}

/// Turn the outcome of `nvmlDeviceGetBrand` into a brand
///
/// Any brand value is accepted; codes newer than this tool become
/// [`BrandType::Other`].
pub fn brand_from_raw(code: c_uint, raw: c_uint) -> Result<BrandType, NvmlFailure> {
    if code == nvmlReturn_enum_NVML_SUCCESS {
        return Ok(BrandType::from_raw(raw));
    }
    let message = match nvml_try(code) {
        Err(err) => err.to_string(),
        Ok(()) => String::new(),
    };
    Err(NvmlFailure::new(ReturnCode::new(code), message))
}

/// Call `nvmlDeviceGetBrand` directly, returning the return code and brand
fn get_brand_raw(library: &OsStr, handle: nvmlDevice_t) -> Result<(c_uint, c_uint), NvmlFailure> {
    use libloading::{Library, Symbol};

    type GetBrandFn = unsafe extern "C" fn(nvmlDevice_t, *mut c_uint) -> c_uint;

    // The session already holds this library, so this only takes another reference
    let lib = unsafe { Library::new(library) }.map_err(|source| {
        let err = LoadError::Open {
            name: library.to_string_lossy().into_owned(),
            source,
        };
        NvmlFailure::new(ReturnCode::LIBRARY_NOT_FOUND, err.to_string())
    })?;

    let func: Symbol<GetBrandFn> = unsafe { lib.get(b"nvmlDeviceGetBrand") }.map_err(|source| {
        let err = LoadError::MissingSymbol {
            symbol: "nvmlDeviceGetBrand",
            source,
        };
        NvmlFailure::new(ReturnCode::FUNCTION_NOT_FOUND, err.to_string())
    })?;

    let mut brand: c_uint = 0;
    let code = unsafe { func(handle, &mut brand) };
    Ok((code, brand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvml_wrapper_sys::bindings::{
        nvmlReturn_enum_NVML_ERROR_GPU_IS_LOST, nvmlReturn_enum_NVML_ERROR_NOT_SUPPORTED,
    };

    #[test]
    fn test_brand_from_raw_known() {
        assert_eq!(
            brand_from_raw(nvmlReturn_enum_NVML_SUCCESS, 1).unwrap(),
            BrandType::Quadro
        );
    }

    #[test]
    fn test_brand_from_raw_unrecognised_code_is_kept() {
        let brand = brand_from_raw(nvmlReturn_enum_NVML_SUCCESS, 17).unwrap();
        assert_eq!(brand, BrandType::Other(17));
        assert!(!brand.is_enterprise());
    }

    #[test]
    fn test_brand_from_raw_not_supported() {
        let err = brand_from_raw(nvmlReturn_enum_NVML_ERROR_NOT_SUPPORTED, 0).unwrap_err();
        assert!(err.is_not_supported());
    }

    #[test]
    fn test_brand_from_raw_failure_keeps_code() {
        let err = brand_from_raw(nvmlReturn_enum_NVML_ERROR_GPU_IS_LOST, 0).unwrap_err();
        assert_eq!(err.code, ReturnCode::GPU_IS_LOST);
        assert!(!err.message.is_empty());
    }
}
