//! Core state model for the Soundpanel audio settings harness
//!
//! The interesting logic lives in [`domain`]: driver API resolution, device
//! catalog filtering, and the configuration store that owns the user's last
//! selections. Presentation is deliberately absent; a UI (or the CLI harness
//! in `soundpanel-app`) drives this crate through plain method calls.

pub mod domain;
