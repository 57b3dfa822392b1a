//! Configuration store: single source of truth for the last user selections
//!
//! The store owns the live [`Selection`] for the process lifetime. Callers
//! read through accessors and mutate through setters; every successful
//! mutation emits a [`ChangeEvent`] on a broadcast channel so a presentation
//! layer can refresh what it displays. The store never touches the device
//! catalog and never performs I/O; re-resolving device lists after an API
//! switch and saving the payload are the caller's job.

use crate::domain::catalog::DeviceName;
use crate::domain::config::AudioSettings;
use crate::domain::driver::{self, DriverApi, DEFAULT_BUFFER_SIZE};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, trace};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from store mutations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Buffer size outside the supported set
    #[error("Unsupported buffer size: {0}")]
    UnsupportedBufferSize(u32),
}

/// Persisted user choice: driver, buffer, and last device per direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub api: DriverApi,
    pub buffer_size: u32,
    pub input_device: DeviceName,
    pub output_device: DeviceName,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            api: DriverApi::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            input_device: DeviceName::new(""),
            output_device: DeviceName::new(""),
        }
    }
}

/// Notification sent after every successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    DriverApiChanged(DriverApi),
    BufferSizeChanged(u32),
    InputDeviceChanged(DeviceName),
    OutputDeviceChanged(DeviceName),
}

/// Owner of the live selection state
pub struct ConfigStore {
    selection: Selection,
    change_tx: broadcast::Sender<ChangeEvent>,
}

impl ConfigStore {
    /// Create a store holding the given selection
    pub fn new(selection: Selection) -> Self {
        let (change_tx, _) = broadcast::channel(32);
        Self { selection, change_tx }
    }

    /// Create a store from a loaded payload's audio section
    pub fn from_settings(settings: &AudioSettings) -> Self {
        Self::new(Selection {
            api: settings.api,
            buffer_size: settings.buffer_size,
            input_device: settings.last_input_device.clone(),
            output_device: settings.last_output_device.clone(),
        })
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.change_tx.subscribe()
    }

    pub fn driver_api(&self) -> DriverApi {
        self.selection.api
    }

    pub fn buffer_size(&self) -> u32 {
        self.selection.buffer_size
    }

    pub fn last_input_device(&self) -> &DeviceName {
        &self.selection.input_device
    }

    pub fn last_output_device(&self) -> &DeviceName {
        &self.selection.output_device
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Switch the active driver API
    ///
    /// Does not re-resolve device lists; call `catalog::resolve` afterwards.
    pub fn set_driver_api(&mut self, api: DriverApi) {
        self.selection.api = api;
        debug!(api = api.label(), "Driver API changed");
        self.notify(ChangeEvent::DriverApiChanged(api));
    }

    /// Set the buffer size, rejecting values outside the supported set
    ///
    /// On rejection the stored value is untouched and no event is emitted.
    pub fn set_buffer_size(&mut self, size: u32) -> Result<()> {
        if !driver::is_supported_buffer_size(size) {
            return Err(StoreError::UnsupportedBufferSize(size));
        }
        self.selection.buffer_size = size;
        debug!(size, "Buffer size changed");
        self.notify(ChangeEvent::BufferSizeChanged(size));
        Ok(())
    }

    /// Remember the last input device
    ///
    /// Any name is accepted; whether it is still listed is checked at restore
    /// time against a freshly resolved catalog.
    pub fn set_last_input_device(&mut self, name: DeviceName) {
        self.selection.input_device = name.clone();
        debug!(device = %name, "Input device changed");
        self.notify(ChangeEvent::InputDeviceChanged(name));
    }

    /// Remember the last output device
    pub fn set_last_output_device(&mut self, name: DeviceName) {
        self.selection.output_device = name.clone();
        debug!(device = %name, "Output device changed");
        self.notify(ChangeEvent::OutputDeviceChanged(name));
    }

    /// Stamp the current selection into a payload's audio section for saving
    pub fn write_to(&self, settings: &mut AudioSettings) {
        settings.api = self.selection.api;
        settings.buffer_size = self.selection.buffer_size;
        settings.last_input_device = self.selection.input_device.clone();
        settings.last_output_device = self.selection.output_device.clone();
    }

    fn notify(&self, event: ChangeEvent) {
        // zero subscribers is normal for headless callers
        if self.change_tx.send(event).is_err() {
            trace!("No change subscribers");
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}
