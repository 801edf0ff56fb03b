//! # Configuration File Loading
//!
//! Reads the behaviour and identity documents from disk and hands them to
//! [`parse_config`].

use crate::config::Config;
use crate::loader::parse_config;
use std::io::ErrorKind;
use std::path::Path;
use thermal_errors::ConfigError;
use tracing::debug;

/// Where the recorder's behaviour document lives on the device.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/thermal-recorder.yaml";

/// Where the uploader's document, which names the device, lives.
pub const DEFAULT_IDENTITY_PATH: &str = "/etc/cacophony/uploader.yaml";

/// Load configuration from the behaviour and identity documents on disk.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Reads both files and builds the `Config` from their contents.
///
/// ## Usage
/// ```rust,no_run
/// use thermal_config::load_from_files;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_files(
///         Path::new("/etc/thermal-recorder.yaml"),
///         Path::new("/etc/cacophony/uploader.yaml"),
///     )?;
///     println!("Recording to {}", config.output_dir.display());
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// Returns `ConfigError` for:
/// - Behaviour document not found
/// - Any other read failure
/// - Decode and validation failures from [`parse_config`]
///
/// A missing identity document is read as empty: an unregistered device has
/// no name yet.
pub fn load_from_files(behaviour_path: &Path, identity_path: &Path) -> Result<Config, ConfigError> {
    let behaviour = std::fs::read(behaviour_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound {
            path: behaviour_path.display().to_string()
        },
        _ => ConfigError::Io {
            path: behaviour_path.display().to_string(),
            reason: e.to_string()
        }
    })?;

    let identity = match std::fs::read(identity_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(
                path = %identity_path.display(),
                "Identity document not found, device name left unset"
            );
            Vec::new()
        }
        Err(e) => {
            return Err(ConfigError::Io {
                path: identity_path.display().to_string(),
                reason: e.to_string()
            });
        }
    };

    debug!(
        behaviour = %behaviour_path.display(),
        identity = %identity_path.display(),
        "Loading recorder configuration"
    );

    parse_config(&behaviour, &identity)
}

/// Load configuration from the standard device locations.
pub fn load_default() -> Result<Config, ConfigError> {
    load_from_files(
        Path::new(DEFAULT_CONFIG_PATH),
        Path::new(DEFAULT_IDENTITY_PATH)
    )
}
