//! # Configuration Structures
//!
//! This module defines the resolved configuration consumed by the thermal
//! recorder.
//!
//! All configuration structures:
//! - Are fully resolved: every field holds a concrete value
//! - Declare their defaults in `Default` impls
//! - Serialize with the same kebab-case keys the behaviour document uses

use crate::window::hhmm;
use chrono::NaiveTime;
use serde::Serialize;
use std::path::PathBuf;
use thermal_errors::ValidationError;

/// Main configuration structure for the thermal recorder.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Aggregates recording limits, paths, the recording window, motion
/// detection tuning and turret settings into one read-only snapshot built at
/// startup.
///
/// ## Usage
/// ```rust,no_run
/// use thermal_config::parse_config;
///
/// let config = parse_config(b"min-secs: 5", b"").unwrap();
/// assert_eq!(config.min_secs, 5);
/// assert_eq!(config.max_secs, 600);
/// ```
///
/// ## Fields
/// - `device_name`: Name from the identity document (default: "")
/// - `frame_input`: Socket thermal frames arrive on
///   (default: "/var/run/lepton-frames")
/// - `output_dir`: Where recordings are written (default: "/var/spool/cptv")
/// - `min_secs` / `max_secs`: Recording length bounds (default: 10 / 600)
/// - `preview_secs`: Seconds kept before a trigger (default: 3)
/// - `window_start` / `window_end`: Daily recording window (default: unset)
/// - `min_disk_space`: Megabytes that must stay free (default: 200)
///
/// ## Validation
/// `window_start` and `window_end` are either both set or both unset.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Device name from the identity document
    pub device_name: String,

    /// Path the decoded thermal frames arrive on
    pub frame_input: PathBuf,

    /// Directory recordings are written to
    pub output_dir: PathBuf,

    /// Minimum recording length in seconds
    pub min_secs: u32,

    /// Maximum recording length in seconds
    pub max_secs: u32,

    /// Seconds of footage kept from before the trigger
    pub preview_secs: u32,

    /// Start of the daily recording window
    #[serde(with = "hhmm")]
    pub window_start: Option<NaiveTime>,

    /// End of the daily recording window
    #[serde(with = "hhmm")]
    pub window_end: Option<NaiveTime>,

    /// Free disk space to preserve, in megabytes
    pub min_disk_space: u64,

    /// Motion detection tuning
    pub motion: MotionConfig,

    /// Pan/tilt turret configuration
    pub turret: TurretConfig
}

pub(crate) fn default_frame_input() -> PathBuf {
    PathBuf::from("/var/run/lepton-frames")
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("/var/spool/cptv")
}

pub(crate) const DEFAULT_MIN_SECS: u32 = 10;
pub(crate) const DEFAULT_MAX_SECS: u32 = 600;
pub(crate) const DEFAULT_PREVIEW_SECS: u32 = 3;
pub(crate) const DEFAULT_MIN_DISK_SPACE: u64 = 200;

impl Default for Config {
    fn default() -> Self {
        Self {
            device_name: String::new(),
            frame_input: default_frame_input(),
            output_dir: default_output_dir(),
            min_secs: DEFAULT_MIN_SECS,
            max_secs: DEFAULT_MAX_SECS,
            preview_secs: DEFAULT_PREVIEW_SECS,
            window_start: None,
            window_end: None,
            min_disk_space: DEFAULT_MIN_DISK_SPACE,
            motion: MotionConfig::default(),
            turret: TurretConfig::default()
        }
    }
}

impl Config {
    /// Checks the cross-field rules.
    ///
    /// Pure and idempotent, so it can be applied to a `Config` built by any
    /// means, not just [`crate::parse_config`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validator::validate(self)
    }

    /// Whether recording is restricted to a daily window.
    pub fn has_window(&self) -> bool {
        self.window_start.is_some() && self.window_end.is_some()
    }

    /// The daily recording window as `(start, end)`.
    ///
    /// The end may be earlier than the start, in which case the window runs
    /// over midnight.
    pub fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.window_start.zip(self.window_end)
    }
}

/// Motion detection tuning.
///
/// # M-CANONICAL-DOCS
///
/// ## Fields
/// - `temp_thresh`: Minimum raw sensor value counted as warm (default: 2900)
/// - `delta_thresh`: Minimum change between compared frames (default: 50)
/// - `count_thresh`: Changed pixels needed to count as motion (default: 3)
/// - `nonzero_max_percent`: Changed-pixel percentage above which the frame
///   is treated as noise (default: 50)
/// - `frame_compare_gap`: Frames between compared frames (default: 45)
/// - `use_one_diff_only`: Compare against one frame only (default: true)
/// - `verbose`: Log detection decisions (default: false)
/// - `trigger_frames`: Consecutive motion frames needed (default: 2)
/// - `warmer_only`: Only count pixels that got warmer (default: true)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct MotionConfig {
    pub temp_thresh: u16,
    pub delta_thresh: u16,
    pub count_thresh: u32,
    pub nonzero_max_percent: u32,
    pub frame_compare_gap: u32,
    #[serde(rename = "one-diff-only")]
    pub use_one_diff_only: bool,
    pub verbose: bool,
    pub trigger_frames: u32,
    pub warmer_only: bool
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            temp_thresh: 2900,
            delta_thresh: 50,
            count_thresh: 3,
            nonzero_max_percent: 50,
            frame_compare_gap: 45,
            use_one_diff_only: true,
            verbose: false,
            trigger_frames: 2,
            warmer_only: true
        }
    }
}

/// Pan/tilt turret configuration.
///
/// `pid` holds the proportional, integral and derivative gains in that
/// order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TurretConfig {
    pub active: bool,
    pub pid: [f64; 3],
    pub servo_x: ServoConfig,
    pub servo_y: ServoConfig
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            active: false,
            pid: [0.05, 0.0, 0.0],
            servo_x: ServoConfig::with_pin("17"),
            servo_y: ServoConfig::with_pin("18")
        }
    }
}

/// A single turret axis.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ServoConfig {
    pub active: bool,
    /// GPIO identifier driving the servo
    pub pin: String,
    pub max_ang: f64,
    pub min_ang: f64,
    pub start_ang: f64
}

impl ServoConfig {
    /// Default servo settings on the given pin.
    pub fn with_pin(pin: &str) -> Self {
        Self {
            active: false,
            pin: pin.to_string(),
            max_ang: 160.0,
            min_ang: 20.0,
            start_ang: 90.0
        }
    }
}
