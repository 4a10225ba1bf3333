//! Wiring a validated [`MeterConfig`] into the firmware build
//!
//! `to_code` runs once per build. It never fails: everything that could go
//! wrong has already been rejected by config validation.

mod build_context;

pub use build_context::{BuildContext, Define, Library};

use crate::config::MeterConfig;
use crate::driver::MeterDriver;

pub const SPI_LIBRARY: &str = "SPI";
pub const DEFINE_USE_ESPHOME: &str = "USE_ESPHOME";
pub const DEFINE_WIFI_SERIAL_NO_REMAP: &str = "WIFI_SERIAL_NO_REMAP";

pub fn to_code<D: MeterDriver>(config: &MeterConfig, ctx: &mut BuildContext, driver: &mut D) {
    ctx.register_component(&config.id);
    ctx.add_library(SPI_LIBRARY, None);

    ctx.add_define(DEFINE_USE_ESPHOME, None);
    ctx.add_define(DEFINE_WIFI_SERIAL_NO_REMAP, None);
    // The driver's radio code reads these as preprocessor constants in every translation unit.
    ctx.add_build_flag(format!("-DMETER_YEAR={}", config.meter_year));
    ctx.add_build_flag(format!("-DMETER_SERIAL={}", config.meter_serial));
    ctx.add_build_flag(format!("-DGDO0={}", config.gdo0_pin));

    driver.set_meter_year(config.meter_year);
    driver.set_meter_serial(config.meter_serial);
    driver.set_meter_type(config.meter_type.is_gas());
    driver.set_gas_volume_divisor(config.gas_volume_divisor);
    driver.set_frequency(config.frequency);
    driver.set_auto_scan(config.auto_scan);
    driver.set_reading_schedule(&config.reading_schedule);
    driver.set_read_hour(config.read_hour);
    driver.set_read_minute(config.read_minute);
    driver.set_timezone_offset(config.timezone_offset);
    driver.set_auto_align_time(config.auto_align_time);
    driver.set_auto_align_midpoint(config.auto_align_midpoint);
    driver.set_max_retries(config.max_retries);
    driver.set_retry_cooldown(config.retry_cooldown.as_duration());
    driver.set_initial_read_on_boot(config.initial_read_on_boot);

    if config.debug_cc1101 {
        ctx.add_build_flag("-DDEBUG_CC1101=1");
    }

    driver.set_time_component(&config.time_id);
    driver.set_update_interval(config.update_interval);

    for binding in &config.entities {
        let spec = binding.spec();
        log::debug!("Binding {} '{}' via {}", spec.key, binding.config.id, spec.setter);
        (spec.bind)(&mut *driver, binding.config.clone(), &config.id);
    }

    log::info!(
        "Wired meter {:02}-{:07} ({} entities, {} build flags)",
        config.meter_year,
        config.meter_serial,
        config.entities.len(),
        ctx.build_flags().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::config::EntityKind;
    use crate::driver::{EverbluMeterComponent, SetterCall, SetterLog};
    use serde_json::json;

    fn config_with(extra: serde_json::Value) -> MeterConfig {
        let mut value = json!({
            "time_id": "sntp_time",
            "meter_year": 21,
            "meter_serial": 1234567,
            "gdo0_pin": 4
        });
        for (k, v) in extra.as_object().unwrap() {
            value[k] = v.clone();
        }
        MeterConfig::from_value(&value).unwrap()
    }

    #[test]
    fn test_numeric_defines_always_emitted() {
        let mut ctx = BuildContext::new();
        to_code(&config_with(json!({})), &mut ctx, &mut SetterLog::new());
        let flags = ctx.build_flags();
        assert!(flags.contains(&"-DMETER_YEAR=21".to_string()));
        assert!(flags.contains(&"-DMETER_SERIAL=1234567".to_string()));
        assert!(flags.contains(&"-DGDO0=4".to_string()));
        assert!(flags.contains(&"-DUSE_ESPHOME".to_string()));
        assert!(!flags.iter().any(|f| f.contains("DEBUG_CC1101")));
        assert_eq!(ctx.libraries()[0].name, SPI_LIBRARY);
        assert_eq!(ctx.components(), ["everblu_meter".to_string()]);
    }

    #[test]
    fn test_debug_flag() {
        let mut ctx = BuildContext::new();
        to_code(
            &config_with(json!({"debug_cc1101": true})),
            &mut ctx,
            &mut SetterLog::new(),
        );
        assert!(ctx.build_flags().contains(&"-DDEBUG_CC1101=1".to_string()));
    }

    #[test]
    fn test_every_basic_setter_called_once() {
        let mut log = SetterLog::new();
        to_code(&config_with(json!({})), &mut BuildContext::new(), &mut log);
        for setter in [
            "set_meter_year",
            "set_meter_serial",
            "set_meter_type",
            "set_gas_volume_divisor",
            "set_frequency",
            "set_auto_scan",
            "set_reading_schedule",
            "set_read_hour",
            "set_read_minute",
            "set_timezone_offset",
            "set_auto_align_time",
            "set_auto_align_midpoint",
            "set_max_retries",
            "set_retry_cooldown",
            "set_initial_read_on_boot",
            "set_time_component",
            "set_update_interval",
        ] {
            assert_eq!(log.count(setter), 1, "{setter}");
        }
        assert_eq!(log.calls().len(), 17);
        assert_eq!(log.argument("set_retry_cooldown"), Some("3600000"));
        assert_eq!(log.argument("set_reading_schedule"), Some("\"Monday-Friday\""));
        assert_eq!(log.argument("set_time_component"), Some("sntp_time"));
    }

    #[test]
    fn test_each_entity_binds_exactly_once() {
        for spec in config::entities::ENTITY_SPECS.iter() {
            let mut log = SetterLog::new();
            let config = config_with(json!({ spec.key: {} }));
            to_code(&config, &mut BuildContext::new(), &mut log);

            for other in config::entities::ENTITY_SPECS.iter() {
                let expected = usize::from(other.setter == spec.setter);
                assert_eq!(log.count(other.setter), expected, "{} -> {}", spec.key, other.setter);
            }

            let entity_id = format!("everblu_meter_{}", spec.key);
            let entity_calls: Vec<&SetterCall> = log.calls().iter().skip(17).collect();
            match spec.kind {
                EntityKind::Button => {
                    assert_eq!(entity_calls.len(), 2, "{}", spec.key);
                    assert!(entity_calls
                        .iter()
                        .all(|c| c.target.as_deref() == Some(entity_id.as_str())));
                }
                _ => {
                    assert_eq!(entity_calls.len(), 1, "{}", spec.key);
                    assert_eq!(entity_calls[0].argument, entity_id);
                }
            }
        }
    }

    #[test]
    fn test_button_calls_match_firmware() {
        let mut log = SetterLog::new();
        let config = config_with(json!({
            "request_reading_button": {},
            "frequency_scan_button": null
        }));
        to_code(&config, &mut BuildContext::new(), &mut log);

        let lines: Vec<String> = log.calls().iter().skip(17).map(SetterCall::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "everblu_meter_request_reading_button.set_parent(everblu_meter)",
                "everblu_meter_request_reading_button.set_frequency_scan(false)",
                "everblu_meter_frequency_scan_button.set_parent(everblu_meter)",
                "everblu_meter_frequency_scan_button.set_frequency_scan(true)",
            ]
        );
    }

    #[test]
    fn test_buttons_point_at_component() {
        let mut component = EverbluMeterComponent::new("cellar");
        let config = config_with(json!({
            "id": "cellar",
            "request_reading_button": {"name": "Read now"},
            "frequency_scan_button": {"name": "Scan"}
        }));
        to_code(&config, &mut BuildContext::new(), &mut component);

        let read = component.request_reading_button().unwrap();
        assert_eq!(read.parent(), Some("cellar"));
        assert!(!read.is_frequency_scan());
        let scan = component.frequency_scan_button().unwrap();
        assert_eq!(scan.parent(), Some("cellar"));
        assert!(scan.is_frequency_scan());
    }

    #[test]
    fn test_component_receives_values() {
        let mut component = EverbluMeterComponent::default();
        let config = config_with(json!({
            "meter_type": "gas",
            "frequency": 433.8,
            "retry_cooldown": "30min",
            "reading_schedule": "Everyday"
        }));
        to_code(&config, &mut BuildContext::new(), &mut component);
        assert_eq!(component.meter_year(), 21);
        assert_eq!(component.meter_serial(), 1234567);
        assert!(component.is_gas());
        assert_eq!(component.frequency(), 433.8);
        assert_eq!(component.retry_cooldown().as_secs(), 1800);
        assert_eq!(component.reading_schedule(), "Everyday");
        assert_eq!(component.time_component(), Some("sntp_time"));
    }
}
