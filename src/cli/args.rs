//! CLI argument definitions using clap derive
//!
//! Every argument is optional; running with none performs the check.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report whether installed NVIDIA GPUs are Enterprise/Quadro GPUs
///
/// Uses nvmlDeviceGetBrand, which is more robust than matching on the
/// GPU name.
#[derive(Parser, Debug)]
#[command(name = "nvml-enterprise-check")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "NVML_ENTERPRISE_CHECK_CONFIG")]
    pub config: Option<String>,

    /// Load NVML from this file instead of searching for it
    #[arg(long, global = true, env = "NVML_LIBRARY_PATH", value_name = "PATH")]
    pub nvml_library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every GPU (the default)
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report, printed as each query completes
    #[default]
    Table,
    /// JSON report for machine parsing
    Json,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_arguments_runs_check() {
        let args = Cli::try_parse_from(["nvml-enterprise-check"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.verbose);
        assert!(args.format.is_none());
    }

    #[test]
    fn test_cli_parse_check() {
        let args = Cli::try_parse_from(["nvml-enterprise-check", "check"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Check)));
    }

    #[test]
    fn test_cli_parse_verbose_and_format() {
        let args =
            Cli::try_parse_from(["nvml-enterprise-check", "-v", "--format", "json"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_parse_library_path() {
        let args = Cli::try_parse_from([
            "nvml-enterprise-check",
            "--nvml-library",
            "/opt/nvidia/libnvidia-ml.so.1",
        ])
        .unwrap();
        assert_eq!(
            args.nvml_library,
            Some(PathBuf::from("/opt/nvidia/libnvidia-ml.so.1"))
        );
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["nvml-enterprise-check", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_completions() {
        let args = Cli::try_parse_from(["nvml-enterprise-check", "completions", "bash"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Completions { shell: Shell::Bash })
        ));
    }
}
