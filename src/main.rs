//! nvml-enterprise-check - reports whether each GPU is an Enterprise/Quadro GPU
//!
//! Loads NVML, lists the GPUs, and classifies each one from its NVML brand.

use clap::Parser;
use nvml_enterprise_check::cli::args::{generate_completions, Cli, Commands};
use nvml_enterprise_check::commands::run_check;
use nvml_enterprise_check::config::{Config, ConfigBuilder};
use nvml_enterprise_check::error::AppError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();
    let config = load_config(&cli);

    // Initialize logging; the verbose flag may come from the CLI or the config
    let verbose = cli.verbose || config.as_ref().is_ok_and(|c| c.general.verbose);
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .format_timestamp(None)
    .init();

    let result = config.and_then(|config| run(&cli, &config));

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    Ok(ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose)
        .with_format(cli.format)
        .with_library_path(cli.nvml_library.clone())
        .build())
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    match &cli.command {
        None | Some(Commands::Check) => run_check(config).map(|report| {
            for device in &report.devices {
                log::debug!("{}: enterprise = {:?}", device, device.enterprise);
            }
            log::debug!(
                "{} of {} device(s) are Enterprise/Quadro GPUs",
                report.enterprise_count(),
                report.device_count
            );
        }),

        Some(Commands::Completions { shell }) => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

/// Report a failure the way the check reports everything else: on stdout
fn print_error(err: &AppError) {
    match err {
        AppError::Load(_) => {
            println!("Failed to find or load the NVML library! Is an NVIDIA driver installed?");
        }
        AppError::Init(_) | AppError::Call(_) => println!("{}", err),
        _ => eprintln!("Error: {}", err),
    }
}
