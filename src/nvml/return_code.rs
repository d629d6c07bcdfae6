//! NVML return codes
//!
//! nvml-wrapper turns every `nvmlReturn_t` into an error variant. The report
//! prints the numeric code the library produced, so map the variants back.

use nvml_wrapper::error::NvmlError as BindingError;
use nvml_wrapper_sys::bindings::{
    nvmlReturn_enum_NVML_ERROR_DRIVER_NOT_LOADED, nvmlReturn_enum_NVML_ERROR_NOT_SUPPORTED,
    nvmlReturn_enum_NVML_ERROR_NO_PERMISSION, nvmlReturn_enum_NVML_ERROR_UNKNOWN,
    nvmlReturn_enum_NVML_SUCCESS,
};
use serde::Serialize;
use std::fmt;

/// Numeric `nvmlReturn_t` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReturnCode(u32);

impl ReturnCode {
    pub const SUCCESS: Self = Self(nvmlReturn_enum_NVML_SUCCESS);
    pub const UNINITIALIZED: Self = Self(1);
    pub const INVALID_ARGUMENT: Self = Self(2);
    pub const NOT_SUPPORTED: Self = Self(nvmlReturn_enum_NVML_ERROR_NOT_SUPPORTED);
    pub const NO_PERMISSION: Self = Self(nvmlReturn_enum_NVML_ERROR_NO_PERMISSION);
    pub const ALREADY_INITIALIZED: Self = Self(5);
    pub const NOT_FOUND: Self = Self(6);
    pub const INSUFFICIENT_SIZE: Self = Self(7);
    pub const INSUFFICIENT_POWER: Self = Self(8);
    pub const DRIVER_NOT_LOADED: Self = Self(nvmlReturn_enum_NVML_ERROR_DRIVER_NOT_LOADED);
    pub const TIMEOUT: Self = Self(10);
    pub const IRQ_ISSUE: Self = Self(11);
    pub const LIBRARY_NOT_FOUND: Self = Self(12);
    pub const FUNCTION_NOT_FOUND: Self = Self(13);
    pub const CORRUPTED_INFOROM: Self = Self(14);
    pub const GPU_IS_LOST: Self = Self(15);
    pub const RESET_REQUIRED: Self = Self(16);
    pub const OPERATING_SYSTEM: Self = Self(17);
    pub const LIB_RM_VERSION_MISMATCH: Self = Self(18);
    pub const IN_USE: Self = Self(19);
    pub const UNKNOWN: Self = Self(nvmlReturn_enum_NVML_ERROR_UNKNOWN);

    /// Wrap a raw return code
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Symbolic name as spelled in `nvml.h`
    pub fn name(self) -> &'static str {
        match self {
            Self::SUCCESS => "NVML_SUCCESS",
            Self::UNINITIALIZED => "NVML_ERROR_UNINITIALIZED",
            Self::INVALID_ARGUMENT => "NVML_ERROR_INVALID_ARGUMENT",
            Self::NOT_SUPPORTED => "NVML_ERROR_NOT_SUPPORTED",
            Self::NO_PERMISSION => "NVML_ERROR_NO_PERMISSION",
            Self::ALREADY_INITIALIZED => "NVML_ERROR_ALREADY_INITIALIZED",
            Self::NOT_FOUND => "NVML_ERROR_NOT_FOUND",
            Self::INSUFFICIENT_SIZE => "NVML_ERROR_INSUFFICIENT_SIZE",
            Self::INSUFFICIENT_POWER => "NVML_ERROR_INSUFFICIENT_POWER",
            Self::DRIVER_NOT_LOADED => "NVML_ERROR_DRIVER_NOT_LOADED",
            Self::TIMEOUT => "NVML_ERROR_TIMEOUT",
            Self::IRQ_ISSUE => "NVML_ERROR_IRQ_ISSUE",
            Self::LIBRARY_NOT_FOUND => "NVML_ERROR_LIBRARY_NOT_FOUND",
            Self::FUNCTION_NOT_FOUND => "NVML_ERROR_FUNCTION_NOT_FOUND",
            Self::CORRUPTED_INFOROM => "NVML_ERROR_CORRUPTED_INFOROM",
            Self::GPU_IS_LOST => "NVML_ERROR_GPU_IS_LOST",
            Self::RESET_REQUIRED => "NVML_ERROR_RESET_REQUIRED",
            Self::OPERATING_SYSTEM => "NVML_ERROR_OPERATING_SYSTEM",
            Self::LIB_RM_VERSION_MISMATCH => "NVML_ERROR_LIB_RM_VERSION_MISMATCH",
            Self::IN_USE => "NVML_ERROR_IN_USE",
            _ => "NVML_ERROR_UNKNOWN",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[allow(deprecated)]
impl From<&BindingError> for ReturnCode {
    fn from(err: &BindingError) -> Self {
        match err {
            BindingError::Uninitialized => Self::UNINITIALIZED,
            BindingError::InvalidArg => Self::INVALID_ARGUMENT,
            BindingError::NotSupported => Self::NOT_SUPPORTED,
            BindingError::NoPermission => Self::NO_PERMISSION,
            BindingError::AlreadyInitialized => Self::ALREADY_INITIALIZED,
            BindingError::NotFound => Self::NOT_FOUND,
            BindingError::InsufficientSize(_) => Self::INSUFFICIENT_SIZE,
            BindingError::InsufficientPower => Self::INSUFFICIENT_POWER,
            BindingError::DriverNotLoaded => Self::DRIVER_NOT_LOADED,
            BindingError::Timeout => Self::TIMEOUT,
            BindingError::IrqIssue => Self::IRQ_ISSUE,
            BindingError::LibraryNotFound | BindingError::LibloadingError(_) => {
                Self::LIBRARY_NOT_FOUND
            }
            BindingError::FunctionNotFound | BindingError::FailedToLoadSymbol(_) => {
                Self::FUNCTION_NOT_FOUND
            }
            BindingError::CorruptedInfoROM => Self::CORRUPTED_INFOROM,
            BindingError::GpuLost => Self::GPU_IS_LOST,
            BindingError::ResetRequired => Self::RESET_REQUIRED,
            BindingError::OperatingSystem => Self::OPERATING_SYSTEM,
            BindingError::LibRmVersionMismatch => Self::LIB_RM_VERSION_MISMATCH,
            BindingError::InUse => Self::IN_USE,
            // Binding-side failures (unknown enum values, string conversion
            // and the like) have no NVML code of their own
            _ => Self::UNKNOWN,
        }
    }
}
