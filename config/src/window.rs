//! # Recording Window Times
//!
//! Parses the `HH:MM` time-of-day values used by `window-start` and
//! `window-end`.

use chrono::NaiveTime;

const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Parse a 24-hour `HH:MM` time of day.
///
/// Returns `None` when the hour is outside 0-23, the minute is outside 0-59,
/// or the value is not in `HH:MM` form. The result has no date component;
/// the window recurs daily.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT).ok()
}

/// Serializes optional window times back to `HH:MM`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match value {
            Some(time) => {
                serializer.serialize_some(&time.format(super::TIME_OF_DAY_FORMAT).to_string())
            }
            None => serializer.serialize_none()
        }
    }
}
