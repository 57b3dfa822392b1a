//! Device catalog resolution
//!
//! Stateless rules deciding which devices a settings panel may offer for a
//! given driver API. ASIO exposes one unified list serving both directions;
//! MME and WASAPI split the full list into input candidates (everything) and
//! output candidates (a name-based subsequence).

use crate::domain::driver::DriverApi;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Substrings marking a device name as output-capable
///
/// A heuristic over human-readable names, kept for compatibility with the
/// naming conventions of existing device scans. Case-sensitive.
const OUTPUT_NAME_MARKERS: [&str; 2] = ["Output", "Speakers"];

/// Opaque device label as reported by the enumeration source
///
/// Unique only within one API's listing; the core never interprets it beyond
/// the output-marker substring check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceName(String);

impl DeviceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn looks_like_output(&self) -> bool {
        OUTPUT_NAME_MARKERS.iter().any(|m| self.0.contains(m))
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Per-API device listing from the external scan
///
/// Owned by the configuration payload; the catalog only reads it. An API with
/// no entry yields an empty listing rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceListing(BTreeMap<String, Vec<DeviceName>>);

impl DeviceListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing for one API
    pub fn set_devices(&mut self, api: DriverApi, devices: Vec<DeviceName>) {
        self.0.insert(api.key().to_string(), devices);
    }

    /// Devices scanned under the given API, empty if never scanned
    pub fn devices_for(&self, api: DriverApi) -> &[DeviceName] {
        self.0.get(api.key()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// Result of resolving the selectable devices for one driver API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDevices {
    /// Every device the API exposes, in scan order
    pub all: Vec<DeviceName>,
    /// Output candidates; equals `all` when `unified`
    pub outputs: Vec<DeviceName>,
    /// True iff the API serves input and output from one list (ASIO)
    pub unified: bool,
}

impl ResolvedDevices {
    /// Restore a stored input selection if it is still listed
    ///
    /// Returns `None` for a stale name; the caller leaves the selection
    /// unset in that case.
    pub fn restore_input<'a>(&'a self, stored: &DeviceName) -> Option<&'a DeviceName> {
        self.all.iter().find(|d| *d == stored)
    }

    /// Restore a stored output selection if it is still an output candidate
    pub fn restore_output<'a>(&'a self, stored: &DeviceName) -> Option<&'a DeviceName> {
        self.outputs.iter().find(|d| *d == stored)
    }
}

/// Resolve the selectable device lists for a driver API
///
/// Pure and deterministic: identical inputs give identical outputs and the
/// listing is never mutated. A missing listing entry resolves to empty lists.
pub fn resolve(api: DriverApi, listing: &DeviceListing) -> ResolvedDevices {
    let all = listing.devices_for(api).to_vec();
    let unified = api.has_unified_device_list();

    let outputs = if unified {
        all.clone()
    } else {
        all.iter()
            .filter(|d| d.looks_like_output())
            .cloned()
            .collect()
    };

    debug!(
        api = api.label(),
        devices = all.len(),
        outputs = outputs.len(),
        unified,
        "Resolved device catalog"
    );

    ResolvedDevices { all, outputs, unified }
}
