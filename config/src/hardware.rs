//! # Hardware Configuration
//!
//! Resolves the settings the thermal camera daemon needs to talk to the
//! sensor: SPI speed, the GPIO powering the camera, the frame output socket
//! and the flat-field correction period.
//!
//! Each store section has a library default that stored values are overlaid
//! onto. No validation happens here beyond decoding.

use crate::store::{ConfigStore, TomlStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thermal_errors::StoreError;
use tracing::debug;

/// Store key of the GPIO pin mapping.
pub const GPIO_KEY: &str = "gpio";

/// Store key of the Lepton sensor settings.
pub const LEPTON_KEY: &str = "lepton";

/// GPIO pin mapping.
///
/// ## Fields
/// - `thermal_camera_power`: Pin switching camera power (default: "GPIO23")
/// - `modem_power`: Pin switching modem power (default: "GPIO22")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GpioConfig {
    #[serde(default = "default_thermal_camera_power")]
    pub thermal_camera_power: String,

    #[serde(default = "default_modem_power")]
    pub modem_power: String
}

fn default_thermal_camera_power() -> String {
    "GPIO23".to_string()
}

fn default_modem_power() -> String {
    "GPIO22".to_string()
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            thermal_camera_power: default_thermal_camera_power(),
            modem_power: default_modem_power()
        }
    }
}

/// Lepton sensor settings.
///
/// ## Fields
/// - `spi_speed`: SPI bus speed in Hz (default: 2000000)
/// - `frame_output`: Socket decoded frames are written to
///   (default: "/var/run/lepton-frames")
/// - `ffc_period`: Time between flat-field corrections (default: 1m)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LeptonConfig {
    #[serde(default = "default_spi_speed")]
    pub spi_speed: i64,

    #[serde(default = "default_frame_output")]
    pub frame_output: PathBuf,

    #[serde(default = "default_ffc_period", with = "humantime_serde")]
    pub ffc_period: Duration
}

fn default_spi_speed() -> i64 {
    2_000_000
}

fn default_frame_output() -> PathBuf {
    PathBuf::from("/var/run/lepton-frames")
}

fn default_ffc_period() -> Duration {
    Duration::from_secs(60)
}

impl Default for LeptonConfig {
    fn default() -> Self {
        Self {
            spi_speed: default_spi_speed(),
            frame_output: default_frame_output(),
            ffc_period: default_ffc_period()
        }
    }
}

/// The hardware settings the sensor layer needs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct HardwareConfig {
    pub spi_speed: i64,
    pub power_pin: String,
    pub frame_output: PathBuf,
    #[serde(with = "humantime_serde")]
    pub ffc_period: Duration
}

impl HardwareConfig {
    fn project(gpio: GpioConfig, lepton: LeptonConfig) -> Self {
        Self {
            spi_speed: lepton.spi_speed,
            power_pin: gpio.thermal_camera_power,
            frame_output: lepton.frame_output,
            ffc_period: lepton.ffc_period
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self::project(GpioConfig::default(), LeptonConfig::default())
    }
}

/// Read the hardware configuration from a device configuration store.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Overlays the `gpio` and `lepton` store sections onto their library
/// defaults and keeps the four fields the sensor layer uses.
///
/// ## Usage
/// ```rust,no_run
/// use thermal_config::{read_hardware_config, TomlStore};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = TomlStore::open("/etc/cacophony")?;
///     let hardware = read_hardware_config(&store)?;
///     println!("SPI speed: {}", hardware.spi_speed);
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// Returns `StoreError` when a section cannot be read or holds a value of
/// the wrong type.
pub fn read_hardware_config<S: ConfigStore>(store: &S) -> Result<HardwareConfig, StoreError> {
    let mut gpio = GpioConfig::default();
    let gpio_stored = store.unmarshal(GPIO_KEY, &mut gpio)?;

    let mut lepton = LeptonConfig::default();
    let lepton_stored = store.unmarshal(LEPTON_KEY, &mut lepton)?;

    debug!(gpio_stored, lepton_stored, "Hardware configuration resolved");

    Ok(HardwareConfig::project(gpio, lepton))
}

/// Open the store in `folder` and read the hardware configuration from it.
pub fn read_hardware_config_from(folder: impl AsRef<Path>) -> Result<HardwareConfig, StoreError> {
    let store = TomlStore::open(folder)?;
    read_hardware_config(&store)
}
