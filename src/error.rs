//! Unified error types for nvml-enterprise-check
//!
//! Each layer has its own error type; `AppError` ties them together so the
//! binary can pick a diagnostic and an exit code in one place.

use crate::nvml::check::CallSite;
use crate::nvml::ReturnCode;

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The NVML library could not be located or loaded
    #[error("{0}")]
    Load(#[from] LoadError),

    /// `nvmlInit` returned something other than success
    #[error("{0}")]
    Init(#[from] InitError),

    /// A checked NVML call failed with an unrecoverable result
    #[error("{0}")]
    Call(#[from] CallError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to serialize the JSON report
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (writing the report)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while locating the NVML library and resolving its imports
#[derive(Error, Debug)]
pub enum LoadError {
    /// The configuration manager could not list display adapters
    #[error("Failed to enumerate display adapters (CONFIGRET {0})")]
    DeviceList(u32),

    /// Adding the driver directory to the DLL search path failed
    #[error("Failed to add '{path}' to the DLL search path: {message}")]
    SearchPath { path: String, message: String },

    /// The library file itself could not be opened
    #[error("Failed to open NVML library '{name}': {source}")]
    Open {
        name: String,
        #[source]
        source: libloading::Error,
    },

    /// The library opened but an import is missing
    #[error("NVML library is missing '{symbol}': {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// The NVML binding could not open the library during initialization
    #[error("NVML binding could not load the library: {0}")]
    Binding(String),
}

/// Errors from `nvmlInit`
///
/// No other NVML function is valid after a failed init, so these messages
/// never go through `nvmlErrorString`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("nvmlInit() failed: Driver not loaded.")]
    DriverNotLoaded,

    #[error("nvmlInit() failed: NVML does not have permission to talk to the driver.")]
    NoPermission,

    #[error("nvmlInit() failed: Error code was {0}")]
    Other(ReturnCode),
}

/// A non-success result reported by NVML
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} ({code})")]
pub struct NvmlFailure {
    /// Numeric NVML return code
    pub code: ReturnCode,
    /// Library-provided description of the code
    pub message: String,
}

impl NvmlFailure {
    pub fn new(code: ReturnCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Whether this failure only means the device lacks the feature
    pub fn is_not_supported(&self) -> bool {
        self.code == ReturnCode::NOT_SUPPORTED
    }
}

impl From<nvml_wrapper::error::NvmlError> for NvmlFailure {
    fn from(err: nvml_wrapper::error::NvmlError) -> Self {
        let code = ReturnCode::from(&err);
        Self::new(code, err.to_string())
    }
}

/// An NVML call that failed, with the place it was made from
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "NVML error! Result = {} ({}) at {} : {} '{}'",
    .failure.code,
    .failure.message,
    .site.file,
    .site.line,
    .site.call
)]
pub struct CallError {
    pub site: CallSite,
    pub failure: NvmlFailure,
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
