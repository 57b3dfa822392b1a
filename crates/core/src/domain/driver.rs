//! Driver API enumeration and buffer size whitelist
//!
//! The persisted payload stores the driver API as a bare ordinal (0/1/2) and
//! the device scan keys it by lowercase name. Both mappings are closed here so
//! no other module hard-codes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Buffer sizes the settings panel offers, in frames
pub const SUPPORTED_BUFFER_SIZES: [u32; 6] = [64, 128, 256, 512, 1024, 2048];

/// Buffer size used when no persisted configuration exists
pub const DEFAULT_BUFFER_SIZE: u32 = 256;

/// Audio driver API backing the device enumeration
///
/// Serialized as its ordinal in the persisted payload. An out-of-range
/// ordinal falls back to [`DriverApi::Mme`], the documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum DriverApi {
    Mme,
    Asio,
    Wasapi,
}

impl DriverApi {
    pub const ALL: [DriverApi; 3] = [DriverApi::Mme, DriverApi::Asio, DriverApi::Wasapi];

    /// Key under which the device scan stores this API's listing
    pub fn key(&self) -> &'static str {
        match self {
            DriverApi::Mme => "mme",
            DriverApi::Asio => "asio",
            DriverApi::Wasapi => "wasapi",
        }
    }

    /// Human-readable label as shown by the settings panel
    pub fn label(&self) -> &'static str {
        match self {
            DriverApi::Mme => "MME",
            DriverApi::Asio => "ASIO",
            DriverApi::Wasapi => "WASAPI",
        }
    }

    /// Ordinal used by the persisted payload
    pub fn index(&self) -> i64 {
        match self {
            DriverApi::Mme => 0,
            DriverApi::Asio => 1,
            DriverApi::Wasapi => 2,
        }
    }

    /// ASIO exposes one unified device list serving both directions
    pub fn has_unified_device_list(&self) -> bool {
        matches!(self, DriverApi::Asio)
    }
}

impl Default for DriverApi {
    fn default() -> Self {
        DriverApi::Mme
    }
}

impl From<i64> for DriverApi {
    fn from(index: i64) -> Self {
        match index {
            1 => DriverApi::Asio,
            2 => DriverApi::Wasapi,
            _ => DriverApi::Mme,
        }
    }
}

impl From<DriverApi> for i64 {
    fn from(api: DriverApi) -> Self {
        api.index()
    }
}

impl fmt::Display for DriverApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DriverApi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mme" => Ok(DriverApi::Mme),
            "asio" => Ok(DriverApi::Asio),
            "wasapi" => Ok(DriverApi::Wasapi),
            other => Err(format!("unknown driver API: {other}")),
        }
    }
}

/// Check a buffer size against the supported set
pub fn is_supported_buffer_size(size: u32) -> bool {
    SUPPORTED_BUFFER_SIZES.contains(&size)
}
