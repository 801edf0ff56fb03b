//! # Document Structures
//!
//! Decoding targets for the behaviour and identity documents.
//!
//! Every field is optional so that "absent" stays distinguishable from an
//! explicit value that happens to equal the zero value (`active: false`).
//! The raw structures are resolved against the defaults in
//! [`crate::config`] only after decoding succeeds. Unknown keys are ignored.

use crate::config::{
    default_frame_input, default_output_dir, MotionConfig, ServoConfig, TurretConfig,
    DEFAULT_MAX_SECS, DEFAULT_MIN_DISK_SPACE, DEFAULT_MIN_SECS, DEFAULT_PREVIEW_SECS
};
use serde::Deserialize;
use std::path::PathBuf;

/// The behaviour document as written.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    #[serde(default)]
    pub frame_input: Option<PathBuf>,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub min_secs: Option<u32>,

    #[serde(default)]
    pub max_secs: Option<u32>,

    #[serde(default)]
    pub preview_secs: Option<u32>,

    /// Unparsed `HH:MM`
    #[serde(default)]
    pub window_start: Option<String>,

    /// Unparsed `HH:MM`
    #[serde(default)]
    pub window_end: Option<String>,

    #[serde(default)]
    pub min_disk_space: Option<u64>,

    #[serde(default)]
    pub motion: Option<RawMotion>,

    #[serde(default)]
    pub turret: Option<RawTurret>
}

impl RawConfig {
    pub fn frame_input(&self) -> PathBuf {
        self.frame_input.clone().unwrap_or_else(default_frame_input)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(default_output_dir)
    }

    pub fn min_secs(&self) -> u32 {
        self.min_secs.unwrap_or(DEFAULT_MIN_SECS)
    }

    pub fn max_secs(&self) -> u32 {
        self.max_secs.unwrap_or(DEFAULT_MAX_SECS)
    }

    pub fn preview_secs(&self) -> u32 {
        self.preview_secs.unwrap_or(DEFAULT_PREVIEW_SECS)
    }

    pub fn min_disk_space(&self) -> u64 {
        self.min_disk_space.unwrap_or(DEFAULT_MIN_DISK_SPACE)
    }

    pub fn motion(&self) -> MotionConfig {
        self.motion
            .as_ref()
            .map(RawMotion::resolve)
            .unwrap_or_default()
    }

    pub fn turret(&self) -> TurretConfig {
        self.turret
            .as_ref()
            .map(RawTurret::resolve)
            .unwrap_or_default()
    }
}

/// The `motion:` block.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RawMotion {
    #[serde(default)]
    pub temp_thresh: Option<u16>,
    #[serde(default)]
    pub delta_thresh: Option<u16>,
    #[serde(default)]
    pub count_thresh: Option<u32>,
    #[serde(default)]
    pub nonzero_max_percent: Option<u32>,
    #[serde(default)]
    pub frame_compare_gap: Option<u32>,
    #[serde(default)]
    pub one_diff_only: Option<bool>,
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub trigger_frames: Option<u32>,
    #[serde(default)]
    pub warmer_only: Option<bool>
}

impl RawMotion {
    pub fn resolve(&self) -> MotionConfig {
        let defaults = MotionConfig::default();
        MotionConfig {
            temp_thresh: self.temp_thresh.unwrap_or(defaults.temp_thresh),
            delta_thresh: self.delta_thresh.unwrap_or(defaults.delta_thresh),
            count_thresh: self.count_thresh.unwrap_or(defaults.count_thresh),
            nonzero_max_percent: self
                .nonzero_max_percent
                .unwrap_or(defaults.nonzero_max_percent),
            frame_compare_gap: self.frame_compare_gap.unwrap_or(defaults.frame_compare_gap),
            use_one_diff_only: self.one_diff_only.unwrap_or(defaults.use_one_diff_only),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            trigger_frames: self.trigger_frames.unwrap_or(defaults.trigger_frames),
            warmer_only: self.warmer_only.unwrap_or(defaults.warmer_only)
        }
    }
}

/// The `turret:` block.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RawTurret {
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub pid: Option<[f64; 3]>,
    #[serde(default)]
    pub servo_x: Option<RawServo>,
    #[serde(default)]
    pub servo_y: Option<RawServo>
}

impl RawTurret {
    pub fn resolve(&self) -> TurretConfig {
        let defaults = TurretConfig::default();
        TurretConfig {
            active: self.active.unwrap_or(defaults.active),
            pid: self.pid.unwrap_or(defaults.pid),
            servo_x: resolve_servo(self.servo_x.as_ref(), defaults.servo_x),
            servo_y: resolve_servo(self.servo_y.as_ref(), defaults.servo_y)
        }
    }
}

fn resolve_servo(raw: Option<&RawServo>, defaults: ServoConfig) -> ServoConfig {
    match raw {
        Some(raw) => raw.resolve(defaults),
        None => defaults
    }
}

/// A `servo-x:` or `servo-y:` block.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RawServo {
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub max_ang: Option<f64>,
    #[serde(default)]
    pub min_ang: Option<f64>,
    #[serde(default)]
    pub start_ang: Option<f64>
}

impl RawServo {
    /// Overlays the set fields onto `defaults`, which differ per axis.
    pub fn resolve(&self, defaults: ServoConfig) -> ServoConfig {
        ServoConfig {
            active: self.active.unwrap_or(defaults.active),
            pin: self.pin.clone().unwrap_or(defaults.pin),
            max_ang: self.max_ang.unwrap_or(defaults.max_ang),
            min_ang: self.min_ang.unwrap_or(defaults.min_ang),
            start_ang: self.start_ang.unwrap_or(defaults.start_ang)
        }
    }
}

/// The identity document. Only the device name is read from it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RawIdentity {
    #[serde(default)]
    pub device_name: Option<String>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_raw_config_resolves_to_defaults() {
        let raw = RawConfig::default();
        assert_eq!(raw.min_secs(), 10);
        assert_eq!(raw.max_secs(), 600);
        assert_eq!(raw.preview_secs(), 3);
        assert_eq!(raw.min_disk_space(), 200);
        assert_eq!(raw.motion(), MotionConfig::default());
        assert_eq!(raw.turret(), TurretConfig::default());
    }

    #[test]
    fn test_raw_motion_partial_override() {
        let raw = RawMotion {
            temp_thresh: Some(3100),
            verbose: Some(true),
            ..RawMotion::default()
        };
        let motion = raw.resolve();
        assert_eq!(motion.temp_thresh, 3100);
        assert!(motion.verbose);
        assert_eq!(motion.delta_thresh, 50);
        assert!(motion.warmer_only);
    }

    #[test]
    fn test_raw_servo_keeps_axis_default_pin() {
        let raw = RawTurret {
            servo_y: Some(RawServo {
                active: Some(true),
                ..RawServo::default()
            }),
            ..RawTurret::default()
        };
        let turret = raw.resolve();
        assert_eq!(turret.servo_x.pin, "17");
        assert_eq!(turret.servo_y.pin, "18");
        assert!(turret.servo_y.active);
        assert!(!turret.servo_x.active);
    }

    #[test]
    fn test_explicit_false_distinct_from_absent() {
        let raw: RawMotion = serde_yaml::from_str("warmer-only: false").unwrap();
        assert_eq!(raw.warmer_only, Some(false));
        assert_eq!(raw.one_diff_only, None);
        assert!(!raw.resolve().warmer_only);
        assert!(raw.resolve().use_one_diff_only);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let raw: RawConfig =
            serde_yaml::from_str("leds:\n  recording: \"RecordingPIN\"\nmin-secs: 4\n").unwrap();
        assert_eq!(raw.min_secs, Some(4));
    }

    #[test]
    fn test_pid_must_be_a_triple() {
        let result: Result<RawTurret, _> = serde_yaml::from_str("pid: [1, 2]");
        assert!(result.is_err());
    }
}
