//! Check command implementation
//!
//! Counts the GPUs and reports, for each one, its name and whether its
//! brand makes it an Enterprise/Quadro GPU.

use crate::cli::output::ReportWriter;
use crate::config::Config;
use crate::domain::CheckReport;
use crate::error::Result;
use crate::nvml::{load_imports, Checked, GpuDevice, GpuManager, NvmlManager};
use crate::nvml_check;

use std::io::{self, Write};

/// Execute the check command
pub fn run_check(config: &Config) -> Result<CheckReport> {
    let library = load_imports(config.library.path.as_deref())?;
    let manager = NvmlManager::init(&library)?;

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), config.output.format);

    check_devices(&manager, &mut writer)?;
    shutdown(manager, &mut writer)?;

    writer.finish()
}

/// Query and report every device
///
/// A not-supported query is reported and skipped. Any other failure stops the
/// enumeration; dropping the manager then shuts NVML down.
pub fn check_devices<M, W>(manager: &M, writer: &mut ReportWriter<W>) -> Result<()>
where
    M: GpuManager,
    W: Write,
{
    let count = match nvml_check!(manager.device_count())? {
        Checked::Value(count) => count,
        Checked::NotSupported(site) => {
            writer.not_supported(&site, None)?;
            0
        }
    };
    log::debug!("NVML reports {} device(s)", count);
    writer.device_count(count)?;

    for index in 0..count {
        writer.begin_device(index)?;

        let device = match nvml_check!(manager.device_by_index(index))? {
            Checked::Value(device) => device,
            Checked::NotSupported(site) => {
                writer.not_supported(&site, Some(index))?;
                continue;
            }
        };

        match nvml_check!(device.name())? {
            Checked::Value(name) => writer.name(&name)?,
            Checked::NotSupported(site) => writer.not_supported(&site, Some(device.index()))?,
        }

        match nvml_check!(device.brand())? {
            Checked::Value(brand) => {
                log::debug!(
                    "Device {}: brand {} ({})",
                    device.index(),
                    brand,
                    brand.as_raw()
                );
                writer.brand(brand)?;
            }
            Checked::NotSupported(site) => writer.not_supported(&site, Some(device.index()))?,
        }
    }

    Ok(())
}

/// Shut NVML down, checked like any other call
pub fn shutdown<M, W>(manager: M, writer: &mut ReportWriter<W>) -> Result<()>
where
    M: GpuManager,
    W: Write,
{
    if let Checked::NotSupported(site) = nvml_check!(manager.shutdown())? {
        writer.not_supported(&site, None)?;
    }
    Ok(())
}
