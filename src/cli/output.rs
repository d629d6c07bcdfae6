//! Report output
//!
//! The table format streams each line as soon as its query completes, so the
//! lines printed before a fatal error stay on screen. The JSON format collects
//! everything and prints once at the end.

use crate::cli::args::OutputFormat;
use crate::domain::{BrandType, CheckReport, DeviceReport, UnsupportedCall};
use crate::error::Result;
use crate::nvml::CallSite;

use std::io::Write;

/// Writes the check report in the selected format
pub struct ReportWriter<W: Write> {
    out: W,
    format: OutputFormat,
    report: CheckReport,
}

impl<W: Write> ReportWriter<W> {
    /// Create a writer over any output stream
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            report: CheckReport::default(),
        }
    }

    /// Number of devices found
    pub fn device_count(&mut self, count: u32) -> Result<()> {
        self.report.device_count = count;
        self.line(format_args!("{} device(s).", count))
    }

    /// Start the section for a device
    pub fn begin_device(&mut self, index: u32) -> Result<()> {
        self.report.devices.push(DeviceReport::new(index));
        self.line(format_args!("Device {}:", index))
    }

    /// Name of the current device
    pub fn name(&mut self, name: &str) -> Result<()> {
        if let Some(device) = self.report.devices.last_mut() {
            device.name = Some(name.to_string());
        }
        self.line(format_args!("\tName: {}", name))
    }

    /// Brand classification of the current device
    pub fn brand(&mut self, brand: BrandType) -> Result<()> {
        if let Some(device) = self.report.devices.last_mut() {
            device.set_brand(brand);
        }
        self.line(format_args!(
            "\tIs Enterprise/Quadro GPU: {}",
            yes_no(brand.is_enterprise())
        ))
    }

    /// A query the device did not support
    ///
    /// Recorded against the current device, or against no device once the
    /// enumeration is over.
    pub fn not_supported(&mut self, site: &CallSite, device: Option<u32>) -> Result<()> {
        self.report
            .unsupported
            .push(UnsupportedCall::new(device, site));
        self.line(format_args!("{}", site))
    }

    /// Flush the report; JSON is written here
    pub fn finish(mut self) -> Result<CheckReport> {
        if self.format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(&self.report)?;
            writeln!(self.out, "{}", json)?;
        }
        self.out.flush()?;
        Ok(self.report)
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        if self.format == OutputFormat::Table {
            writeln!(self.out, "{}", args)?;
        }
        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lines() {
        let mut buf = Vec::new();
        let mut writer = ReportWriter::new(&mut buf, OutputFormat::Table);
        writer.device_count(1).unwrap();
        writer.begin_device(0).unwrap();
        writer.name("Quadro RTX 8000").unwrap();
        writer.brand(BrandType::QuadroRtx).unwrap();
        let report = writer.finish().unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "1 device(s).\nDevice 0:\n\tName: Quadro RTX 8000\n\tIs Enterprise/Quadro GPU: Yes\n"
        );
        assert_eq!(report.devices[0].enterprise, Some(true));
    }

    #[test]
    fn test_table_not_supported_line() {
        let mut buf = Vec::new();
        let mut writer = ReportWriter::new(&mut buf, OutputFormat::Table);
        writer.begin_device(0).unwrap();
        let site = CallSite::new("device.brand()", "src/commands/check.rs", 10);
        writer.not_supported(&site, Some(0)).unwrap();
        let report = writer.finish().unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Device 0:\ndevice.brand() returned NVML_ERROR_NOT_SUPPORTED at src/commands/check.rs : 10\n"
        );
        assert_eq!(report.unsupported[0].device, Some(0));
        assert_eq!(report.devices[0].enterprise, None);
    }

    #[test]
    fn test_json_is_written_once_at_finish() {
        let mut buf = Vec::new();
        let mut writer = ReportWriter::new(&mut buf, OutputFormat::Json);
        writer.device_count(1).unwrap();
        writer.begin_device(0).unwrap();
        writer.name("NVIDIA GeForce RTX 4090").unwrap();
        writer.brand(BrandType::GeForceRtx).unwrap();
        assert!(writer.out.is_empty());
        let report = writer.finish().unwrap();
        assert_eq!(report.devices.len(), 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["device_count"], 1);
        assert_eq!(value["devices"][0]["name"], "NVIDIA GeForce RTX 4090");
        assert_eq!(value["devices"][0]["brand"], "GeForce RTX");
        assert_eq!(value["devices"][0]["brand_code"], 15);
        assert_eq!(value["devices"][0]["enterprise"], false);
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }
}
