//! Time period values (`retry_cooldown`, `update_interval`)
//!
//! Accepted forms:
//! - `"<number><unit>"`, e.g. `"1h"`, `"1.5 s"`, `"250ms"`
//! - `"HH:MM"` or `"HH:MM:SS"`
//! - a mapping of `days`, `hours`, `minutes`, `seconds`, `milliseconds`, `microseconds`
//!
//! Values are kept at millisecond precision, which is what the driver works in.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::coerce::{self, Fields};
use super::ConfigError;

const MICROS_PER_MILLI: u64 = 1_000;

const UNITS: [(&[&str], f64); 6] = [
    (&["us", "µs", "microsecond", "microseconds"], 1.0),
    (&["ms", "millisecond", "milliseconds"], 1e3),
    (&["s", "sec", "secs", "second", "seconds"], 1e6),
    (&["min", "mins", "minute", "minutes"], 60e6),
    (&["h", "hr", "hrs", "hour", "hours"], 3_600e6),
    (&["d", "day", "days"], 86_400e6),
];

const MAPPING_KEYS: [(&str, f64); 6] = [
    ("days", 86_400e6),
    ("hours", 3_600e6),
    ("minutes", 60e6),
    ("seconds", 1e6),
    ("milliseconds", 1e3),
    ("microseconds", 1.0),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimePeriod {
    millis: u64,
}

impl TimePeriod {
    pub const fn from_millis(millis: u64) -> Self {
        TimePeriod { millis }
    }

    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl From<Duration> for TimePeriod {
    fn from(duration: Duration) -> Self {
        TimePeriod::from_millis(duration.as_millis() as u64)
    }
}

/// Compact form using the largest unit that divides the period evenly.
impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const STEPS: [(u64, &str); 4] = [
            (86_400_000, "d"),
            (3_600_000, "h"),
            (60_000, "min"),
            (1_000, "s"),
        ];
        if self.millis == 0 {
            return write!(f, "0s");
        }
        for (size, unit) in STEPS {
            if self.millis % size == 0 {
                return write!(f, "{}{unit}", self.millis / size);
            }
        }
        write!(f, "{}ms", self.millis)
    }
}

/// Polling interval of the component; `never` disables polling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateInterval {
    Never,
    Every(TimePeriod),
}

impl Default for UpdateInterval {
    fn default() -> Self {
        UpdateInterval::Every(crate::constants::defaults::UPDATE_INTERVAL.into())
    }
}

impl fmt::Display for UpdateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateInterval::Never => write!(f, "never"),
            UpdateInterval::Every(period) => fmt::Display::fmt(period, f),
        }
    }
}

impl Serialize for UpdateInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UpdateInterval::Never => serializer.serialize_str("never"),
            UpdateInterval::Every(period) => period.serialize(serializer),
        }
    }
}

/// Parse a non-negative time period, rejecting anything finer than a millisecond.
pub(crate) fn parse_time_period(key: &str, value: &Value) -> Result<TimePeriod, ConfigError> {
    let micros = match value {
        Value::String(s) => parse_str(key, s)?,
        Value::Object(map) => parse_mapping(key, &Fields::new(map, Some(key)))?,
        Value::Number(n) if n.as_f64() == Some(0.0) => 0.0,
        Value::Number(n) => {
            return Err(invalid(
                key,
                format!("don't know what '{n}' means as it has no time unit, did you mean '{n}s'?"),
            ))
        }
        other => {
            return Err(ConfigError::InvalidType {
                key: key.to_string(),
                expected: "a time period",
                found: coerce::describe(other),
            })
        }
    };

    if micros < 0.0 {
        return Err(invalid(key, "negative time periods are not allowed"));
    }
    if micros >= u64::MAX as f64 {
        return Err(invalid(key, "time period is too long"));
    }
    // Allow for float noise only; real fractions of a microsecond are rejected.
    let rounded = micros.round();
    if (micros - rounded).abs() > (micros * f64::EPSILON * 8.0).max(1e-6) {
        return Err(invalid(key, "maximum precision is milliseconds"));
    }
    let micros = rounded as u64;
    if micros % MICROS_PER_MILLI != 0 {
        return Err(invalid(key, "maximum precision is milliseconds"));
    }
    Ok(TimePeriod::from_millis(micros / MICROS_PER_MILLI))
}

/// Like [`parse_time_period`], bounded by `max_millis`.
pub(crate) fn parse_bounded_time_period(
    key: &str,
    value: &Value,
    max_millis: u64,
) -> Result<TimePeriod, ConfigError> {
    let period = parse_time_period(key, value)?;
    if period.as_millis() > max_millis {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: format!("{}ms", period.as_millis()),
            min: "0ms".into(),
            max: format!("{max_millis}ms"),
        });
    }
    Ok(period)
}

/// `never`, or a time period that fits the scheduler's 32-bit counter.
///
/// `u32::MAX` itself is reserved by the scheduler to mean "never".
pub(crate) fn parse_update_interval(key: &str, value: &Value) -> Result<UpdateInterval, ConfigError> {
    if let Value::String(s) = value {
        if s.trim().eq_ignore_ascii_case("never") {
            return Ok(UpdateInterval::Never);
        }
    }
    parse_bounded_time_period(key, value, u64::from(u32::MAX) - 1).map(UpdateInterval::Every)
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_str(key: &str, raw: &str) -> Result<f64, ConfigError> {
    let s = raw.trim();
    if s.contains(':') {
        return parse_colon(key, s);
    }

    let split = s
        .find(|c: char| c.is_alphabetic())
        .unwrap_or(s.len());
    let (number, unit) = (s[..split].trim(), s[split..].trim());

    let amount: f64 = number
        .parse()
        .map_err(|_| invalid(key, format!("'{raw}' is not a valid time period")))?;

    if unit.is_empty() {
        if amount == 0.0 {
            return Ok(0.0);
        }
        return Err(invalid(
            key,
            format!("don't know what '{raw}' means as it has no time unit, did you mean '{number}s'?"),
        ));
    }

    let unit_lower = unit.to_lowercase();
    let scale = UNITS
        .iter()
        .find(|(names, _)| names.contains(&unit_lower.as_str()))
        .map(|(_, scale)| *scale)
        .ok_or_else(|| invalid(key, format!("unknown time unit '{unit}'")))?;

    Ok(amount * scale)
}

fn parse_colon(key: &str, s: &str) -> Result<f64, ConfigError> {
    let parts = s
        .split(':')
        .map(|p| p.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid(key, format!("'{s}' is not a valid HH:MM[:SS] time period")))?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [hours, minutes] => (*hours, *minutes, 0),
        [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return Err(invalid(key, format!("'{s}' is not a valid HH:MM[:SS] time period"))),
    };
    Ok((hours as f64 * 3_600.0 + minutes as f64 * 60.0 + seconds as f64) * 1e6)
}

fn parse_mapping(key: &str, fields: &Fields) -> Result<f64, ConfigError> {
    let allowed: Vec<&str> = MAPPING_KEYS.iter().map(|(k, _)| *k).collect();
    fields.reject_unknown(&allowed)?;

    let mut total = 0.0;
    for (name, scale) in MAPPING_KEYS {
        if let Some(amount) = fields.optional(name, coerce::float)? {
            if amount < 0.0 {
                return Err(invalid(
                    &fields.path(name),
                    "negative time periods are not allowed",
                ));
            }
            total += amount * scale;
        }
    }
    log::trace!("Parsed {key} mapping as {total}us");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn millis(value: Value) -> Result<u64, ConfigError> {
        parse_time_period("retry_cooldown", &value).map(|p| p.as_millis())
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(millis(json!("1h")).unwrap(), 3_600_000);
        assert_eq!(millis(json!("1.5s")).unwrap(), 1_500);
        assert_eq!(millis(json!("0.1s")).unwrap(), 100);
        assert_eq!(millis(json!("1.1 s")).unwrap(), 1_100);
        assert_eq!(millis(json!("250 ms")).unwrap(), 250);
        assert_eq!(millis(json!("2min")).unwrap(), 120_000);
        assert_eq!(millis(json!("1d")).unwrap(), 86_400_000);
        assert_eq!(millis(json!("3 Hours")).unwrap(), 10_800_000);
        assert_eq!(millis(json!("5000us")).unwrap(), 5);
    }

    #[test]
    fn test_colon_form() {
        assert_eq!(millis(json!("01:30")).unwrap(), 5_400_000);
        assert_eq!(millis(json!("00:00:45")).unwrap(), 45_000);
        assert!(millis(json!("1:2:3:4")).is_err());
    }

    #[test]
    fn test_mapping_form() {
        assert_eq!(millis(json!({"hours": 1, "minutes": 30})).unwrap(), 5_400_000);
        assert_eq!(millis(json!({"milliseconds": 20})).unwrap(), 20);
        match millis(json!({"weeks": 1})) {
            Err(ConfigError::UnknownKey(key)) => assert_eq!(key, "retry_cooldown.weeks"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejections() {
        assert!(millis(json!("500us")).is_err());
        assert!(millis(json!("-5s")).is_err());
        assert!(millis(json!("5 fortnights")).is_err());
        assert!(millis(json!(true)).is_err());
        assert!(millis(json!("0.4us")).is_err());
        assert!(millis(json!("1.0000004s")).is_err());
        assert!(millis(json!("0.0004ms")).is_err());
        assert!(millis(json!({"microseconds": 0.5})).is_err());

        let err = millis(json!(5)).unwrap_err();
        assert!(err.to_string().contains("did you mean '5s'"));
        let err = millis(json!("5")).unwrap_err();
        assert!(err.to_string().contains("did you mean '5s'"));
    }

    #[test]
    fn test_zero_without_unit() {
        assert_eq!(millis(json!(0)).unwrap(), 0);
        assert_eq!(millis(json!("0")).unwrap(), 0);
    }

    #[test]
    fn test_update_interval() {
        assert_eq!(
            parse_update_interval("update_interval", &json!("never")).unwrap(),
            UpdateInterval::Never
        );
        assert_eq!(
            parse_update_interval("update_interval", &json!("24h")).unwrap(),
            UpdateInterval::Every(TimePeriod::from_millis(86_400_000))
        );
        assert!(matches!(
            parse_update_interval("update_interval", &json!("50d")),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(TimePeriod::from_millis(3_600_000).to_string(), "1h");
        assert_eq!(TimePeriod::from_millis(90_000).to_string(), "90s");
        assert_eq!(TimePeriod::from_millis(1_500).to_string(), "1500ms");
        assert_eq!(UpdateInterval::Never.to_string(), "never");
    }
}
