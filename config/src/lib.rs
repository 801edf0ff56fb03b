//! # Thermal Recorder Configuration
//!
//! Configuration loading and validation for the thermal camera recorder.
//!
//! This crate provides:
//! - The resolved recorder configuration ([`Config`]) and its defaults
//! - Building it from the behaviour and identity YAML documents
//! - Cross-field validation of the recording window
//! - Hardware settings read from the device configuration store
//!
//! Configuration is read once at startup. Every error is returned to the
//! caller, which is expected to abort and print it.

pub mod config;
pub mod document;
pub mod file_loader;
pub mod hardware;
pub mod loader;
pub mod store;
pub mod validator;
pub mod window;

pub use config::{Config, MotionConfig, ServoConfig, TurretConfig};
pub use file_loader::{load_default, load_from_files, DEFAULT_CONFIG_PATH, DEFAULT_IDENTITY_PATH};
pub use hardware::{
    read_hardware_config, read_hardware_config_from, GpioConfig, HardwareConfig, LeptonConfig
};
pub use loader::parse_config;
pub use store::{ConfigStore, TomlStore};
pub use thermal_errors::{ConfigError, StoreError, ValidationError};
pub use validator::validate;
pub use window::parse_time_of_day;
