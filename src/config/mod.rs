//! Meter component configuration
//!
//! The configuration is a single JSON object. It is validated against a
//! fixed schema and turned into a [`MeterConfig`] with every default filled
//! in; any error names the key it was raised for.

mod coerce;
pub mod entities;
pub mod time_period;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::constants::{defaults, keys};
use coerce::{Case, Fields};

pub use entities::{EntityBinding, EntityCategory, EntityConfig, EntityKind, StateClass};
pub use time_period::{TimePeriod, UpdateInterval};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config must be a JSON object, got {0}")]
    NotAnObject(String),
    #[error("[{0}] is required")]
    MissingKey(String),
    #[error("[{key}] expected {expected}, got {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: String,
    },
    #[error("[{key}] value {value} is out of range, must be between {min} and {max}")]
    OutOfRange {
        key: String,
        value: String,
        min: String,
        max: String,
    },
    #[error("[{key}] {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("[{0}] is an invalid option")]
    UnknownKey(String),
}

impl ConfigError {
    /// Key path the error was raised for, if it concerns a single key.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::MissingKey(key) | ConfigError::UnknownKey(key) => Some(key),
            ConfigError::InvalidType { key, .. }
            | ConfigError::OutOfRange { key, .. }
            | ConfigError::InvalidValue { key, .. } => Some(key),
            ConfigError::ParseJson(_) | ConfigError::Io { .. } | ConfigError::NotAnObject(_) => {
                None
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterType {
    #[default]
    Water,
    Gas,
}

impl MeterType {
    pub fn is_gas(&self) -> bool {
        *self == MeterType::Gas
    }

    fn parse(key: &str, value: &Value) -> Result<Self, ConfigError> {
        Ok(match coerce::one_of(key, value, &["water", "gas"], Case::Exact)? {
            "gas" => MeterType::Gas,
            _ => MeterType::Water,
        })
    }
}

/// Validated configuration of one meter component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeterConfig {
    pub id: String,
    pub time_id: String,
    pub update_interval: UpdateInterval,
    pub meter_year: u8,
    pub meter_serial: u32,
    pub gdo0_pin: u8,
    pub meter_type: MeterType,
    pub gas_volume_divisor: u16,
    pub frequency: f32,
    pub auto_scan: bool,
    pub reading_schedule: String,
    pub read_hour: u8,
    pub read_minute: u8,
    pub timezone_offset: i16,
    pub auto_align_time: bool,
    pub auto_align_midpoint: bool,
    pub max_retries: u8,
    pub retry_cooldown: TimePeriod,
    pub initial_read_on_boot: bool,
    pub debug_cc1101: bool,
    pub entities: Vec<EntityBinding>,
}

const BASIC_KEYS: [&str; 20] = [
    keys::ID,
    keys::TIME_ID,
    keys::UPDATE_INTERVAL,
    keys::METER_YEAR,
    keys::METER_SERIAL,
    keys::GDO0_PIN,
    keys::METER_TYPE,
    keys::GAS_VOLUME_DIVISOR,
    keys::FREQUENCY,
    keys::AUTO_SCAN,
    keys::READING_SCHEDULE,
    keys::READ_HOUR,
    keys::READ_MINUTE,
    keys::TIMEZONE_OFFSET,
    keys::AUTO_ALIGN_TIME,
    keys::AUTO_ALIGN_MIDPOINT,
    keys::MAX_RETRIES,
    keys::RETRY_COOLDOWN,
    keys::INITIAL_READ_ON_BOOT,
    keys::DEBUG_CC1101,
];

fn ranged<T: TryFrom<i64>>(min: i64, max: i64) -> impl Fn(&str, &Value) -> Result<T, ConfigError> {
    move |key, value| {
        let i = coerce::int_in_range(key, value, min, max)?;
        T::try_from(i).map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("{i} does not fit the target type"),
        })
    }
}

impl MeterConfig {
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let map = value
            .as_object()
            .ok_or_else(|| ConfigError::NotAnObject(coerce::describe(value)))?;
        let fields = Fields::new(map, None);

        let allowed: Vec<&str> = BASIC_KEYS
            .iter()
            .copied()
            .chain(entities::ENTITY_SPECS.iter().map(|spec| spec.key))
            .collect();
        fields.reject_unknown(&allowed)?;

        let id = fields
            .optional(keys::ID, coerce::identifier)?
            .unwrap_or_else(|| defaults::COMPONENT_ID.to_string());

        let reading_schedule = fields
            .optional(keys::READING_SCHEDULE, coerce::string)?
            .unwrap_or_else(|| defaults::READING_SCHEDULE.to_string());
        if !defaults::KNOWN_READING_SCHEDULES.contains(&reading_schedule.as_str()) {
            log::warn!(
                "Reading schedule '{}' is not one of {:?}, passing it to the driver unchanged",
                reading_schedule,
                defaults::KNOWN_READING_SCHEDULES
            );
        }

        let config = MeterConfig {
            time_id: fields.required(keys::TIME_ID, coerce::identifier)?,
            update_interval: fields
                .optional(keys::UPDATE_INTERVAL, time_period::parse_update_interval)?
                .unwrap_or_default(),
            meter_year: fields.required(keys::METER_YEAR, ranged(0, 99))?,
            meter_serial: fields.required(keys::METER_SERIAL, ranged(0, u32::MAX.into()))?,
            gdo0_pin: fields.required(keys::GDO0_PIN, ranged(0, 39))?,
            meter_type: fields
                .optional(keys::METER_TYPE, MeterType::parse)?
                .unwrap_or_default(),
            gas_volume_divisor: fields
                .optional(keys::GAS_VOLUME_DIVISOR, ranged(1, 1000))?
                .unwrap_or(defaults::GAS_VOLUME_DIVISOR),
            frequency: fields
                .optional(keys::FREQUENCY, |k, v| coerce::float_in_range(k, v, 300.0, 928.0))?
                .map(|f| f as f32)
                .unwrap_or(defaults::FREQUENCY_MHZ),
            auto_scan: fields
                .optional(keys::AUTO_SCAN, coerce::boolean)?
                .unwrap_or(defaults::AUTO_SCAN),
            reading_schedule,
            read_hour: fields
                .optional(keys::READ_HOUR, ranged(0, 23))?
                .unwrap_or(defaults::READ_HOUR),
            read_minute: fields
                .optional(keys::READ_MINUTE, ranged(0, 59))?
                .unwrap_or(defaults::READ_MINUTE),
            timezone_offset: fields
                .optional(keys::TIMEZONE_OFFSET, ranged(-720, 720))?
                .unwrap_or(defaults::TIMEZONE_OFFSET_MINUTES),
            auto_align_time: fields
                .optional(keys::AUTO_ALIGN_TIME, coerce::boolean)?
                .unwrap_or(defaults::AUTO_ALIGN_TIME),
            auto_align_midpoint: fields
                .optional(keys::AUTO_ALIGN_MIDPOINT, coerce::boolean)?
                .unwrap_or(defaults::AUTO_ALIGN_MIDPOINT),
            max_retries: fields
                .optional(keys::MAX_RETRIES, ranged(1, 50))?
                .unwrap_or(defaults::MAX_RETRIES),
            // The driver keeps the cooldown in a 32-bit millisecond counter.
            retry_cooldown: fields
                .optional(keys::RETRY_COOLDOWN, |k, v| {
                    time_period::parse_bounded_time_period(k, v, u32::MAX.into())
                })?
                .unwrap_or_else(|| defaults::RETRY_COOLDOWN.into()),
            initial_read_on_boot: fields
                .optional(keys::INITIAL_READ_ON_BOOT, coerce::boolean)?
                .unwrap_or(defaults::INITIAL_READ_ON_BOOT),
            debug_cc1101: fields
                .optional(keys::DEBUG_CC1101, coerce::boolean)?
                .unwrap_or(defaults::DEBUG_CC1101),
            entities: entities::parse_entities(&fields, &id)?,
            id,
        };

        config.check_unique_ids()?;
        log::debug!(
            "Validated config for meter {:02}-{:07} with {} entities",
            config.meter_year,
            config.meter_serial,
            config.entities.len()
        );
        Ok(config)
    }

    fn check_unique_ids(&self) -> Result<(), ConfigError> {
        let mut seen = vec![self.id.as_str(), self.time_id.as_str()];
        if self.id == self.time_id {
            return Err(ConfigError::InvalidValue {
                key: keys::TIME_ID.to_string(),
                reason: format!("ID '{}' is already used by the meter component", self.id),
            });
        }
        for binding in &self.entities {
            let id = binding.config.id.as_str();
            if seen.contains(&id) {
                return Err(ConfigError::InvalidValue {
                    key: format!("{}.{}", binding.key, keys::ID),
                    reason: format!("ID '{id}' redefined"),
                });
            }
            seen.push(id);
        }
        Ok(())
    }

    pub fn entity(&self, key: &str) -> Option<&EntityBinding> {
        self.entities.iter().find(|binding| binding.key == key)
    }
}

pub fn from_str(config_raw: &str) -> Result<MeterConfig, ConfigError> {
    let value: Value = serde_json::from_str(config_raw)?;
    MeterConfig::from_value(&value)
}

pub fn from_path(path: impl AsRef<Path>) -> Result<MeterConfig, ConfigError> {
    let path = path.as_ref();
    log::debug!("Loading meter config from {}", path.display());
    let config_raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    from_str(&config_raw)
}
