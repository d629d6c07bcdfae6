//! nvml-enterprise-check - NVML-based Enterprise/Quadro GPU check
//!
//! This library locates and loads NVIDIA's NVML library, enumerates the
//! installed GPUs and classifies each one by its NVML brand.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions and report output
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Brand classification and report types
//! - [`error`]: Error types
//! - [`nvml`]: NVML discovery and abstraction layer

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod nvml;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
