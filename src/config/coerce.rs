//! Field readers and value coercion for the configuration schema
//!
//! Values are accepted in the same loose forms the host firmware tooling
//! accepts them (numeric strings, `yes`/`no` booleans, ...), but every
//! failure is reported against the full key path.

use itertools::Itertools;
use serde_json::{Map, Value};

use super::ConfigError;

/// A view over one JSON object of the configuration, with the key path
/// prefix used when reporting errors for nested objects.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    prefix: Option<&'a str>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Map<String, Value>, prefix: Option<&'a str>) -> Self {
        Fields { map, prefix }
    }

    pub fn path(&self, key: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.to_string(),
        }
    }

    /// Fail on the first key that is not in `allowed`.
    pub fn reject_unknown(&self, allowed: &[&str]) -> Result<(), ConfigError> {
        match self.map.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(unknown) => Err(ConfigError::UnknownKey(self.path(unknown))),
            None => Ok(()),
        }
    }

    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    pub fn required<T, F>(&self, key: &str, parse: F) -> Result<T, ConfigError>
    where
        F: FnOnce(&str, &Value) -> Result<T, ConfigError>,
    {
        match self.map.get(key) {
            Some(Value::Null) | None => Err(ConfigError::MissingKey(self.path(key))),
            Some(value) => parse(&self.path(key), value),
        }
    }

    /// Explicit `null` counts as unset.
    pub fn optional<T, F>(&self, key: &str, parse: F) -> Result<Option<T>, ConfigError>
    where
        F: FnOnce(&str, &Value) -> Result<T, ConfigError>,
    {
        match self.map.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => parse(&self.path(key), value).map(Some),
        }
    }
}

pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string '{s}'"),
        Value::Array(_) => "a list".into(),
        Value::Object(_) => "a mapping".into(),
    }
}

fn invalid_type(key: &str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::InvalidType {
        key: key.to_string(),
        expected,
        found: describe(value),
    }
}

pub(crate) fn integer(key: &str, value: &Value) -> Result<i64, ConfigError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                // Larger than i64::MAX; no field accepts that.
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("integer {n} is too large"),
                });
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("expected an integer, got {n}"),
                }),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid_type(key, "an integer", value)),
        _ => Err(invalid_type(key, "an integer", value)),
    }
}

pub(crate) fn int_in_range(key: &str, value: &Value, min: i64, max: i64) -> Result<i64, ConfigError> {
    let i = integer(key, value)?;
    if i < min || i > max {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: i.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(i)
}

pub(crate) fn float(key: &str, value: &Value) -> Result<f64, ConfigError> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match f {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(invalid_type(key, "a number", value)),
    }
}

pub(crate) fn float_in_range(
    key: &str,
    value: &Value,
    min: f64,
    max: f64,
) -> Result<f64, ConfigError> {
    let f = float(key, value)?;
    if f < min || f > max {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: f.to_string(),
            min: format!("{min:.1}"),
            max: format!("{max:.1}"),
        });
    }
    Ok(f)
}

pub(crate) fn boolean(key: &str, value: &Value) -> Result<bool, ConfigError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "enable" => Ok(true),
            "false" | "no" | "off" | "disable" => Ok(false),
            _ => Err(invalid_type(key, "a boolean", value)),
        },
        _ => Err(invalid_type(key, "a boolean", value)),
    }
}

pub(crate) fn string(key: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "auto-converted this value to a boolean, please wrap the value in quotes"
                .into(),
        }),
        _ => Err(invalid_type(key, "a string", value)),
    }
}

/// How a value is compared against enum options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Case {
    Exact,
    /// The value is lowercased first; options are lowercase.
    Lower,
}

/// Match against a fixed set of options.
pub(crate) fn one_of(
    key: &str,
    value: &Value,
    options: &[&'static str],
    case: Case,
) -> Result<&'static str, ConfigError> {
    let raw = string(key, value)?;
    let wanted = match case {
        Case::Exact => raw.clone(),
        Case::Lower => raw.to_lowercase(),
    };
    options
        .iter()
        .find(|o| **o == wanted)
        .copied()
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!(
                "unknown value '{raw}', valid options are {}",
                options.iter().map(|o| format!("'{o}'")).join(", ")
            ),
        })
}

/// Identifiers end up as variable names in generated code.
pub(crate) fn identifier(key: &str, value: &Value) -> Result<String, ConfigError> {
    let id = string(key, value)?;
    let mut chars = id.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("'{id}' is not a valid ID, use only letters, digits and underscores"),
        });
    }
    Ok(id)
}
