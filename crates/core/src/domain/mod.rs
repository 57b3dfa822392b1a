//! Domain entities and business rules

pub mod catalog;
pub mod config;
pub mod driver;
pub mod store;

// Re-export specific items to avoid ambiguous glob imports
pub use catalog::{resolve, DeviceListing, DeviceName, ResolvedDevices};
pub use config::{AudioSettings, ConfigError, ConfigManager, ConfigPayload};
pub use driver::{DriverApi, DEFAULT_BUFFER_SIZE, SUPPORTED_BUFFER_SIZES};
pub use store::{ChangeEvent, ConfigStore, Selection, StoreError};
