//! Optional output entities the meter component can publish to
//!
//! Every entity key has a fixed kind, a set of defaults that describe how
//! the value should be presented, and a bind function that hands the
//! validated entity to the matching driver setter.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::coerce::{self, Case, Fields};
use super::ConfigError;
use crate::constants::keys;
use crate::driver::{BinarySensor, MeterDriver, Sensor, TextSensor, TriggerButton};

const COMMON_OPTIONS: [&str; 7] = [
    keys::ID,
    keys::NAME,
    keys::ICON,
    keys::INTERNAL,
    keys::DISABLED_BY_DEFAULT,
    keys::ENTITY_CATEGORY,
    keys::DEVICE_CLASS,
];

const SENSOR_OPTIONS: [&str; 3] = [
    keys::UNIT_OF_MEASUREMENT,
    keys::ACCURACY_DECIMALS,
    keys::STATE_CLASS,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sensor,
    TextSensor,
    BinarySensor,
    Button,
}

impl EntityKind {
    fn accepts_option(&self, option: &str) -> bool {
        COMMON_OPTIONS.contains(&option)
            || (*self == EntityKind::Sensor && SENSOR_OPTIONS.contains(&option))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

impl StateClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateClass::Measurement => "measurement",
            StateClass::Total => "total",
            StateClass::TotalIncreasing => "total_increasing",
        }
    }

    fn parse(key: &str, value: &Value) -> Result<Self, ConfigError> {
        Ok(
            match coerce::one_of(
                key,
                value,
                &["measurement", "total", "total_increasing"],
                Case::Lower,
            )? {
                "measurement" => StateClass::Measurement,
                "total" => StateClass::Total,
                _ => StateClass::TotalIncreasing,
            },
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

impl EntityCategory {
    fn parse(key: &str, value: &Value) -> Result<Self, ConfigError> {
        Ok(match coerce::one_of(key, value, &["config", "diagnostic"], Case::Lower)? {
            "config" => EntityCategory::Config,
            _ => EntityCategory::Diagnostic,
        })
    }
}

/// Presentation defaults applied when the user leaves an option unset.
#[derive(Clone, Copy, Debug)]
pub struct EntityDefaults {
    pub unit_of_measurement: Option<&'static str>,
    pub accuracy_decimals: Option<i32>,
    pub state_class: Option<StateClass>,
    pub device_class: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub entity_category: Option<EntityCategory>,
}

impl EntityDefaults {
    const NONE: Self = EntityDefaults {
        unit_of_measurement: None,
        accuracy_decimals: None,
        state_class: None,
        device_class: None,
        icon: None,
        entity_category: None,
    };

    const fn icon(icon: &'static str) -> Self {
        EntityDefaults {
            icon: Some(icon),
            ..Self::NONE
        }
    }

    const fn sensor(
        unit: Option<&'static str>,
        accuracy_decimals: i32,
        state_class: Option<StateClass>,
        icon: Option<&'static str>,
    ) -> Self {
        EntityDefaults {
            unit_of_measurement: unit,
            accuracy_decimals: Some(accuracy_decimals),
            state_class,
            icon,
            ..Self::NONE
        }
    }
}

pub type BindFn = fn(&mut dyn MeterDriver, EntityConfig, &str);

pub struct EntitySpec {
    pub key: &'static str,
    pub kind: EntityKind,
    pub setter: &'static str,
    pub defaults: EntityDefaults,
    pub bind: BindFn,
}

// Keys are unique within the table, so a row is identified by its key.
impl PartialEq for EntitySpec {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl fmt::Debug for EntitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySpec")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("setter", &self.setter)
            .finish_non_exhaustive()
    }
}

use StateClass::{Measurement, TotalIncreasing};

/// All entity keys, in the order their bindings are emitted.
pub static ENTITY_SPECS: [EntitySpec; 21] = [
    EntitySpec {
        key: keys::VOLUME,
        kind: EntityKind::Sensor,
        setter: "set_volume_sensor",
        defaults: EntityDefaults::sensor(Some("L"), 0, Some(TotalIncreasing), Some("mdi:water")),
        bind: |d, e, _| d.set_volume_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::BATTERY,
        kind: EntityKind::Sensor,
        setter: "set_battery_sensor",
        defaults: EntityDefaults::sensor(Some("years"), 1, Some(Measurement), Some("mdi:battery")),
        bind: |d, e, _| d.set_battery_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::COUNTER,
        kind: EntityKind::Sensor,
        setter: "set_counter_sensor",
        defaults: EntityDefaults::sensor(None, 0, Some(TotalIncreasing), Some("mdi:counter")),
        bind: |d, e, _| d.set_counter_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::RSSI,
        kind: EntityKind::Sensor,
        setter: "set_rssi_sensor",
        defaults: EntityDefaults {
            device_class: Some("signal_strength"),
            ..EntityDefaults::sensor(Some("dBm"), 0, Some(Measurement), None)
        },
        bind: |d, e, _| d.set_rssi_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::RSSI_PERCENTAGE,
        kind: EntityKind::Sensor,
        setter: "set_rssi_percentage_sensor",
        defaults: EntityDefaults::sensor(Some("%"), 0, Some(Measurement), Some("mdi:signal")),
        bind: |d, e, _| d.set_rssi_percentage_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::LQI,
        kind: EntityKind::Sensor,
        setter: "set_lqi_sensor",
        defaults: EntityDefaults::sensor(None, 0, Some(Measurement), Some("mdi:wifi-strength-4")),
        bind: |d, e, _| d.set_lqi_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::LQI_PERCENTAGE,
        kind: EntityKind::Sensor,
        setter: "set_lqi_percentage_sensor",
        defaults: EntityDefaults::sensor(
            Some("%"),
            0,
            Some(Measurement),
            Some("mdi:wifi-strength-4"),
        ),
        bind: |d, e, _| d.set_lqi_percentage_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::TIME_START,
        kind: EntityKind::Sensor,
        setter: "set_time_start_sensor",
        defaults: EntityDefaults::sensor(Some("h"), 0, None, Some("mdi:clock-start")),
        bind: |d, e, _| d.set_time_start_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::TIME_END,
        kind: EntityKind::Sensor,
        setter: "set_time_end_sensor",
        defaults: EntityDefaults::sensor(Some("h"), 0, None, Some("mdi:clock-end")),
        bind: |d, e, _| d.set_time_end_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::TOTAL_ATTEMPTS,
        kind: EntityKind::Sensor,
        setter: "set_total_attempts_sensor",
        defaults: EntityDefaults::sensor(None, 0, Some(TotalIncreasing), Some("mdi:counter")),
        bind: |d, e, _| d.set_total_attempts_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::SUCCESSFUL_READS,
        kind: EntityKind::Sensor,
        setter: "set_successful_reads_sensor",
        defaults: EntityDefaults::sensor(None, 0, Some(TotalIncreasing), Some("mdi:check-circle")),
        bind: |d, e, _| d.set_successful_reads_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::FAILED_READS,
        kind: EntityKind::Sensor,
        setter: "set_failed_reads_sensor",
        defaults: EntityDefaults::sensor(None, 0, Some(TotalIncreasing), Some("mdi:alert-circle")),
        bind: |d, e, _| d.set_failed_reads_sensor(Sensor::new(e)),
    },
    EntitySpec {
        key: keys::STATUS,
        kind: EntityKind::TextSensor,
        setter: "set_status_sensor",
        defaults: EntityDefaults::icon("mdi:information"),
        bind: |d, e, _| d.set_status_sensor(TextSensor::new(e)),
    },
    EntitySpec {
        key: keys::ERROR,
        kind: EntityKind::TextSensor,
        setter: "set_error_sensor",
        defaults: EntityDefaults::icon("mdi:alert"),
        bind: |d, e, _| d.set_error_sensor(TextSensor::new(e)),
    },
    EntitySpec {
        key: keys::RADIO_STATE,
        kind: EntityKind::TextSensor,
        setter: "set_radio_state_sensor",
        defaults: EntityDefaults::icon("mdi:radio-tower"),
        bind: |d, e, _| d.set_radio_state_sensor(TextSensor::new(e)),
    },
    EntitySpec {
        key: keys::TIMESTAMP,
        kind: EntityKind::TextSensor,
        setter: "set_timestamp_sensor",
        defaults: EntityDefaults {
            device_class: Some("timestamp"),
            ..EntityDefaults::icon("mdi:clock")
        },
        bind: |d, e, _| d.set_timestamp_sensor(TextSensor::new(e)),
    },
    EntitySpec {
        key: keys::HISTORY_JSON,
        kind: EntityKind::TextSensor,
        setter: "set_history_sensor",
        defaults: EntityDefaults::icon("mdi:history"),
        bind: |d, e, _| d.set_history_sensor(TextSensor::new(e)),
    },
    EntitySpec {
        key: keys::ACTIVE_READING,
        kind: EntityKind::BinarySensor,
        setter: "set_active_reading_sensor",
        defaults: EntityDefaults::icon("mdi:radio"),
        bind: |d, e, _| d.set_active_reading_sensor(BinarySensor::new(e)),
    },
    EntitySpec {
        key: keys::RADIO_CONNECTED,
        kind: EntityKind::BinarySensor,
        setter: "set_radio_connected_sensor",
        defaults: EntityDefaults {
            device_class: Some("connectivity"),
            entity_category: Some(EntityCategory::Diagnostic),
            ..EntityDefaults::icon("mdi:radio-tower")
        },
        bind: |d, e, _| d.set_radio_connected_sensor(BinarySensor::new(e)),
    },
    EntitySpec {
        key: keys::REQUEST_READING_BUTTON,
        kind: EntityKind::Button,
        setter: "set_parent",
        defaults: EntityDefaults::NONE,
        bind: |d, e, parent| {
            let mut button = TriggerButton::new(e);
            button.set_parent(parent);
            button.set_frequency_scan(false);
            d.register_trigger_button(button)
        },
    },
    EntitySpec {
        key: keys::FREQUENCY_SCAN_BUTTON,
        kind: EntityKind::Button,
        setter: "set_parent",
        defaults: EntityDefaults::NONE,
        bind: |d, e, parent| {
            let mut button = TriggerButton::new(e);
            button.set_parent(parent);
            button.set_frequency_scan(true);
            d.register_trigger_button(button)
        },
    },
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub internal: bool,
    pub disabled_by_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_decimals: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_class: Option<StateClass>,
}

/// A validated entity, tagged with the key it was configured under.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityBinding {
    pub key: &'static str,
    pub kind: EntityKind,
    #[serde(flatten)]
    pub config: EntityConfig,
    #[serde(skip)]
    spec: &'static EntitySpec,
}

impl EntityBinding {
    /// Table row this entity was validated against.
    pub fn spec(&self) -> &'static EntitySpec {
        self.spec
    }
}

fn icon(key: &str, value: &Value) -> Result<String, ConfigError> {
    let icon = coerce::string(key, value)?;
    if !icon.contains(':') {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("icons should be formatted like 'mdi:home-assistant', got '{icon}'"),
        });
    }
    Ok(icon)
}

fn accuracy_decimals(key: &str, value: &Value) -> Result<i32, ConfigError> {
    coerce::int_in_range(key, value, i64::from(i32::MIN), i64::from(i32::MAX)).map(|d| d as i32)
}

/// Validate every entity key present in the top-level object, in table order.
pub(crate) fn parse_entities(
    fields: &Fields,
    component_id: &str,
) -> Result<Vec<EntityBinding>, ConfigError> {
    ENTITY_SPECS
        .iter()
        .filter_map(|spec| fields.raw(spec.key).map(|value| (spec, value)))
        .map(|(spec, value)| parse_entity(spec, value, component_id))
        .collect()
}

/// An explicit `null` binds the entity with all defaults.
fn parse_entity(
    spec: &'static EntitySpec,
    value: &Value,
    component_id: &str,
) -> Result<EntityBinding, ConfigError> {
    let empty = Map::new();
    let map = match value {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(ConfigError::InvalidType {
                key: spec.key.to_string(),
                expected: "a mapping",
                found: coerce::describe(other),
            })
        }
    };
    let fields = Fields::new(map, Some(spec.key));
    if let Some(unknown) = map.keys().find(|k| !spec.kind.accepts_option(k)) {
        return Err(ConfigError::UnknownKey(fields.path(unknown)));
    }

    let defaults = &spec.defaults;
    let config = EntityConfig {
        id: fields
            .optional(keys::ID, coerce::identifier)?
            .unwrap_or_else(|| format!("{component_id}_{}", spec.key)),
        name: fields.optional(keys::NAME, coerce::string)?,
        icon: fields
            .optional(keys::ICON, icon)?
            .or_else(|| defaults.icon.map(String::from)),
        internal: fields.optional(keys::INTERNAL, coerce::boolean)?.unwrap_or(false),
        disabled_by_default: fields
            .optional(keys::DISABLED_BY_DEFAULT, coerce::boolean)?
            .unwrap_or(false),
        entity_category: fields
            .optional(keys::ENTITY_CATEGORY, EntityCategory::parse)?
            .or(defaults.entity_category),
        device_class: fields
            .optional(keys::DEVICE_CLASS, coerce::string)?
            .or_else(|| defaults.device_class.map(String::from)),
        unit_of_measurement: fields
            .optional(keys::UNIT_OF_MEASUREMENT, coerce::string)?
            .or_else(|| defaults.unit_of_measurement.map(String::from)),
        accuracy_decimals: fields
            .optional(keys::ACCURACY_DECIMALS, accuracy_decimals)?
            .or(defaults.accuracy_decimals),
        state_class: fields
            .optional(keys::STATE_CLASS, StateClass::parse)?
            .or(defaults.state_class),
    };

    Ok(EntityBinding {
        key: spec.key,
        kind: spec.kind,
        config,
        spec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec_for(key: &str) -> &'static EntitySpec {
        ENTITY_SPECS.iter().find(|spec| spec.key == key).unwrap()
    }

    fn parse(key: &str, value: Value) -> Result<EntityBinding, ConfigError> {
        parse_entity(spec_for(key), &value, "everblu_meter")
    }

    #[test]
    fn test_binding_keeps_its_table_row() {
        let binding = parse("lqi", json!({})).unwrap();
        assert_eq!(binding.spec().setter, "set_lqi_sensor");
        assert!(std::ptr::eq(binding.spec(), spec_for("lqi")));
    }

    #[test]
    fn test_table_keys_are_unique() {
        assert_eq!(ENTITY_SPECS.len(), 21);
        for (i, spec) in ENTITY_SPECS.iter().enumerate() {
            assert!(
                ENTITY_SPECS[i + 1..].iter().all(|other| other.key != spec.key),
                "duplicate entity key {}",
                spec.key
            );
            assert!(spec.setter.starts_with("set_"));
        }
    }

    #[test]
    fn test_volume_defaults() {
        let binding = parse(keys::VOLUME, json!({"name": "Water volume"})).unwrap();
        assert_eq!(binding.kind, EntityKind::Sensor);
        assert_eq!(binding.config.id, "everblu_meter_volume");
        assert_eq!(binding.config.name.as_deref(), Some("Water volume"));
        assert_eq!(binding.config.unit_of_measurement.as_deref(), Some("L"));
        assert_eq!(binding.config.accuracy_decimals, Some(0));
        assert_eq!(binding.config.state_class, Some(StateClass::TotalIncreasing));
        assert_eq!(binding.config.icon.as_deref(), Some("mdi:water"));
    }

    #[test]
    fn test_overrides_win() {
        let binding = parse(
            keys::BATTERY,
            json!({"id": "bat", "accuracy_decimals": 2, "icon": "mdi:battery-50", "state_class": "total"}),
        )
        .unwrap();
        assert_eq!(binding.config.id, "bat");
        assert_eq!(binding.config.accuracy_decimals, Some(2));
        assert_eq!(binding.config.icon.as_deref(), Some("mdi:battery-50"));
        assert_eq!(binding.config.state_class, Some(StateClass::Total));
        assert_eq!(binding.config.unit_of_measurement.as_deref(), Some("years"));
    }

    #[test]
    fn test_radio_connected_is_diagnostic() {
        let binding = parse(keys::RADIO_CONNECTED, Value::Null).unwrap();
        assert_eq!(binding.kind, EntityKind::BinarySensor);
        assert_eq!(binding.config.entity_category, Some(EntityCategory::Diagnostic));
        assert_eq!(binding.config.device_class.as_deref(), Some("connectivity"));
    }

    #[test]
    fn test_buttons_have_no_icon() {
        let binding = parse(keys::FREQUENCY_SCAN_BUTTON, json!({"name": "Scan"})).unwrap();
        assert_eq!(binding.kind, EntityKind::Button);
        assert_eq!(binding.config.icon, None);
    }

    #[test]
    fn test_sensor_options_rejected_on_text_sensor() {
        match parse(keys::STATUS, json!({"unit_of_measurement": "L"})) {
            Err(ConfigError::UnknownKey(key)) => assert_eq!(key, "status.unit_of_measurement"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_entity_values() {
        assert!(parse(keys::VOLUME, json!("Volume")).is_err());
        assert!(parse(keys::VOLUME, json!({"icon": "water"})).is_err());
        assert!(parse(keys::VOLUME, json!({"state_class": "sometimes"})).is_err());
        assert_eq!(
            parse(keys::VOLUME, json!({"state_class": "Measurement"}))
                .unwrap()
                .config
                .state_class,
            Some(StateClass::Measurement)
        );
        assert!(parse(keys::VOLUME, json!({"id": "bad id"})).is_err());
    }
}
