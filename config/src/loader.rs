//! # Recorder Configuration Builder
//!
//! Builds a validated [`Config`] from the behaviour and identity documents.
//!
//! # Pipeline
//! 1. Decode both documents into all-optional structures
//! 2. Fill omitted fields with defaults, field by field
//! 3. Parse the recording window times
//! 4. Run the cross-field checks

use crate::config::Config;
use crate::document::{RawConfig, RawIdentity};
use crate::window::parse_time_of_day;
use chrono::NaiveTime;
use serde::de::DeserializeOwned;
use thermal_errors::{ConfigError, ValidationError};
use tracing::debug;

pub(crate) const BEHAVIOUR_DOCUMENT: &str = "behaviour";
pub(crate) const IDENTITY_DOCUMENT: &str = "identity";

/// Build the recorder configuration from its two source documents.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Turns the raw bytes of the behaviour document (thresholds, timing, paths)
/// and the identity document (device name) into one fully populated,
/// validated `Config`. Either document may be empty.
///
/// ## Usage
/// ```rust,no_run
/// use thermal_config::parse_config;
///
/// let config = parse_config(
///     b"window-start: \"22:00\"\nwindow-end: \"06:00\"",
///     b"device-name: \"north-paddock\"",
/// )
/// .unwrap();
/// assert!(config.has_window());
/// ```
///
/// ## Error Handling
/// Returns `ConfigError` for:
/// - `Decode`: malformed YAML or a value of the wrong type
/// - `Validation`: a bad window time, or only one window endpoint set
pub fn parse_config(behaviour: &[u8], identity: &[u8]) -> Result<Config, ConfigError> {
    let raw: RawConfig = decode(BEHAVIOUR_DOCUMENT, behaviour)?;
    let raw_identity: RawIdentity = decode(IDENTITY_DOCUMENT, identity)?;

    let window_start = parse_window_time(
        raw.window_start.as_deref(),
        ValidationError::InvalidWindowStart
    )?;
    let window_end =
        parse_window_time(raw.window_end.as_deref(), ValidationError::InvalidWindowEnd)?;

    let config = Config {
        device_name: raw_identity.device_name.unwrap_or_default(),
        frame_input: raw.frame_input(),
        output_dir: raw.output_dir(),
        min_secs: raw.min_secs(),
        max_secs: raw.max_secs(),
        preview_secs: raw.preview_secs(),
        window_start,
        window_end,
        min_disk_space: raw.min_disk_space(),
        motion: raw.motion(),
        turret: raw.turret()
    };

    config.validate()?;

    debug!(
        device_name = %config.device_name,
        has_window = config.has_window(),
        turret_active = config.turret.active,
        "Recorder configuration built"
    );

    Ok(config)
}

/// Decode a YAML document; an empty or blank document means "all omitted".
fn decode<T>(document: &'static str, bytes: &[u8]) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_yaml::from_slice(bytes).map_err(|e| ConfigError::Decode {
        document,
        reason: e.to_string()
    })
}

fn parse_window_time(
    value: Option<&str>,
    invalid: ValidationError
) -> Result<Option<NaiveTime>, ValidationError> {
    value
        .map(|value| parse_time_of_day(value).ok_or(invalid))
        .transpose()
}
