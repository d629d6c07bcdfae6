//! GPU brand domain type
//!
//! Mirrors `nvmlBrandType_t`. Classifying by brand is more robust than
//! looking for "Quadro" in the device name.

use serde::{Serialize, Serializer};
use std::fmt;

/// Product brand reported by `nvmlDeviceGetBrand`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrandType {
    Unknown,
    Quadro,
    Tesla,
    Nvs,
    Grid,
    GeForce,
    Titan,
    NvidiaVApps,
    NvidiaVpc,
    NvidiaVcs,
    NvidiaVws,
    NvidiaCloudGaming,
    QuadroRtx,
    NvidiaRtx,
    Nvidia,
    GeForceRtx,
    TitanRtx,
    /// A code newer than this build knows about
    Other(u32),
}

impl BrandType {
    /// Convert from the raw `nvmlBrandType_t` value
    pub fn from_raw(value: u32) -> Self {
        match value {
            0 => Self::Unknown,
            1 => Self::Quadro,
            2 => Self::Tesla,
            3 => Self::Nvs,
            4 => Self::Grid,
            5 => Self::GeForce,
            6 => Self::Titan,
            7 => Self::NvidiaVApps,
            8 => Self::NvidiaVpc,
            9 => Self::NvidiaVcs,
            10 => Self::NvidiaVws,
            11 => Self::NvidiaCloudGaming,
            12 => Self::QuadroRtx,
            13 => Self::NvidiaRtx,
            14 => Self::Nvidia,
            15 => Self::GeForceRtx,
            16 => Self::TitanRtx,
            other => Self::Other(other),
        }
    }

    /// The raw `nvmlBrandType_t` value
    pub fn as_raw(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Quadro => 1,
            Self::Tesla => 2,
            Self::Nvs => 3,
            Self::Grid => 4,
            Self::GeForce => 5,
            Self::Titan => 6,
            Self::NvidiaVApps => 7,
            Self::NvidiaVpc => 8,
            Self::NvidiaVcs => 9,
            Self::NvidiaVws => 10,
            Self::NvidiaCloudGaming => 11,
            Self::QuadroRtx => 12,
            Self::NvidiaRtx => 13,
            Self::Nvidia => 14,
            Self::GeForceRtx => 15,
            Self::TitanRtx => 16,
            Self::Other(v) => v,
        }
    }

    /// Whether this brand counts as an Enterprise/Quadro GPU
    ///
    /// Only Quadro, NVIDIA Virtual Applications and Quadro RTX qualify.
    pub fn is_enterprise(self) -> bool {
        matches!(self, Self::Quadro | Self::NvidiaVApps | Self::QuadroRtx)
    }

    /// Human-readable brand name
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Quadro => "Quadro",
            Self::Tesla => "Tesla",
            Self::Nvs => "NVS",
            Self::Grid => "GRID",
            Self::GeForce => "GeForce",
            Self::Titan => "Titan",
            Self::NvidiaVApps => "NVIDIA Virtual Applications",
            Self::NvidiaVpc => "NVIDIA Virtual PC",
            Self::NvidiaVcs => "NVIDIA Virtual Compute Server",
            Self::NvidiaVws => "NVIDIA RTX Virtual Workstation",
            Self::NvidiaCloudGaming => "NVIDIA Cloud Gaming",
            Self::QuadroRtx => "Quadro RTX",
            Self::NvidiaRtx => "NVIDIA RTX",
            Self::Nvidia => "NVIDIA",
            Self::GeForceRtx => "GeForce RTX",
            Self::TitanRtx => "Titan RTX",
            Self::Other(_) => "Unrecognized",
        }
    }
}

impl fmt::Display for BrandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(v) => write!(f, "Unrecognized ({})", v),
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl Serialize for BrandType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_brands() {
        assert!(BrandType::Quadro.is_enterprise());
        assert!(BrandType::NvidiaVApps.is_enterprise());
        assert!(BrandType::QuadroRtx.is_enterprise());
    }

    #[test]
    fn test_consumer_and_datacenter_brands_are_not_enterprise() {
        for brand in [
            BrandType::Unknown,
            BrandType::GeForce,
            BrandType::GeForceRtx,
            BrandType::Tesla,
            BrandType::NvidiaRtx,
            BrandType::NvidiaVws,
            BrandType::Other(99),
        ] {
            assert!(!brand.is_enterprise(), "{} should not be enterprise", brand);
        }
    }

    #[test]
    fn test_from_raw_matches_header_values() {
        assert_eq!(BrandType::from_raw(1), BrandType::Quadro);
        assert_eq!(BrandType::from_raw(7), BrandType::NvidiaVApps);
        assert_eq!(BrandType::from_raw(12), BrandType::QuadroRtx);
        assert_eq!(BrandType::from_raw(17), BrandType::Other(17));
        assert_eq!(BrandType::from_raw(12).as_raw(), 12);
    }

    #[test]
    fn test_display() {
        assert_eq!(BrandType::QuadroRtx.to_string(), "Quadro RTX");
        assert_eq!(BrandType::Other(40).to_string(), "Unrecognized (40)");
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&BrandType::GeForce).unwrap();
        assert_eq!(json, "\"GeForce\"");
    }
}
