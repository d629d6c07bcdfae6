//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;

pub use check::run_check;
