//! Configuration module.
//!
//! Handles render layout and placeholder settings.

mod settings;

pub use settings::{RenderSettings, Settings, SettingsError};
