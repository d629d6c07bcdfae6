//! Uniform checking of NVML call results
//!
//! Every query goes through [`nvml_check!`](crate::nvml_check), which records
//! the call text and source location so a failure can say exactly which call
//! went wrong.

use crate::error::{CallError, NvmlFailure};

use serde::Serialize;
use std::fmt;

/// Where a checked call was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallSite {
    /// Source text of the call
    pub call: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(call: &'static str, file: &'static str, line: u32) -> Self {
        Self { call, file, line }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} returned NVML_ERROR_NOT_SUPPORTED at {} : {}",
            self.call, self.file, self.line
        )
    }
}

/// Outcome of a call that did not fail fatally
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checked<T> {
    /// The call succeeded
    Value(T),
    /// The device does not support the query; enumeration carries on
    NotSupported(CallSite),
}

/// Classify a call result
///
/// `NVML_ERROR_NOT_SUPPORTED` is not fatal. Anything else that is not a
/// success becomes a [`CallError`] carrying the call site.
pub fn check<T>(result: Result<T, NvmlFailure>, site: CallSite) -> Result<Checked<T>, CallError> {
    match result {
        Ok(value) => Ok(Checked::Value(value)),
        Err(failure) if failure.is_not_supported() => {
            log::debug!("{}", site);
            Ok(Checked::NotSupported(site))
        }
        Err(failure) => {
            log::debug!("{} failed with {}", site.call, failure.code.name());
            Err(CallError { site, failure })
        }
    }
}

/// Check an NVML call, capturing its source text, file and line
#[macro_export]
macro_rules! nvml_check {
    ($call:expr) => {
        $crate::nvml::check::check(
            $call,
            $crate::nvml::check::CallSite::new(stringify!($call), file!(), line!()),
        )
    };
}
