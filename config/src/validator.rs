//! # Configuration Validation
//!
//! Cross-field checks over a fully resolved [`Config`].

use crate::config::Config;
use thermal_errors::ValidationError;

/// Validate configuration structure.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Checks the rules that span more than one field. Runs as the last step of
/// [`crate::parse_config`] and can be called again on any `Config`, however
/// it was built.
///
/// ## Usage
/// ```rust,no_run
/// use thermal_config::{Config, validate};
///
/// let config = Config::default();
/// match validate(&config) {
///     Ok(()) => println!("Configuration is valid"),
///     Err(err) => println!("Invalid configuration: {}", err),
/// }
/// ```
///
/// ## Validation Rules
/// - `window_start` and `window_end` are both set or both unset
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    match (config.window_start, config.window_end) {
        (None, Some(_)) => Err(ValidationError::WindowEndWithoutStart),
        (Some(_), None) => Err(ValidationError::WindowStartWithoutEnd),
        _ => Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn time(hour: u32, minute: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_full_window() {
        let mut config = Config::default();
        config.window_start = time(17, 10);
        config.window_end = time(7, 20);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_end_without_start() {
        let mut config = Config::default();
        config.window_end = time(9, 10);
        assert_eq!(
            validate(&config),
            Err(ValidationError::WindowEndWithoutStart)
        );
    }

    #[test]
    fn test_validate_start_without_end() {
        let mut config = Config::default();
        config.window_start = time(9, 10);
        assert_eq!(
            validate(&config),
            Err(ValidationError::WindowStartWithoutEnd)
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut config = Config::default();
        config.window_end = time(9, 10);
        let before = config.clone();

        let first = config.validate();
        let second = config.validate();
        assert_eq!(first, second);
        assert_eq!(config, before);
    }
}
