use std::fmt;
use std::time::Duration;

use super::{BinarySensor, MeterDriver, Sensor, TextSensor, TriggerButton};
use crate::config::UpdateInterval;

/// One recorded call. `target` is set for calls made on an entity rather
/// than on the component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetterCall {
    pub target: Option<String>,
    pub setter: &'static str,
    pub argument: String,
}

impl fmt::Display for SetterCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(target) = &self.target {
            write!(f, "{target}.")?;
        }
        write!(f, "{}({})", self.setter, self.argument)
    }
}

/// Driver that only records which setters were called, in order.
#[derive(Clone, Debug, Default)]
pub struct SetterLog {
    calls: Vec<SetterCall>,
}

impl SetterLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SetterCall] {
        &self.calls
    }

    /// Number of calls made to `setter`.
    pub fn count(&self, setter: &str) -> usize {
        self.calls.iter().filter(|c| c.setter == setter).count()
    }

    pub fn argument(&self, setter: &str) -> Option<&str> {
        self.calls
            .iter()
            .find(|c| c.setter == setter)
            .map(|c| c.argument.as_str())
    }

    /// Calls made on `target`, in order.
    pub fn calls_on<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a SetterCall> + 'a {
        self.calls
            .iter()
            .filter(move |c| c.target.as_deref() == Some(target))
    }

    fn record(&mut self, setter: &'static str, argument: impl fmt::Display) {
        self.push(SetterCall {
            target: None,
            setter,
            argument: argument.to_string(),
        });
    }

    fn record_on(&mut self, target: &str, setter: &'static str, argument: impl fmt::Display) {
        self.push(SetterCall {
            target: Some(target.to_string()),
            setter,
            argument: argument.to_string(),
        });
    }

    fn push(&mut self, call: SetterCall) {
        log::trace!("{call}");
        self.calls.push(call);
    }
}

impl MeterDriver for SetterLog {
    fn set_meter_year(&mut self, year: u8) {
        self.record("set_meter_year", year);
    }

    fn set_meter_serial(&mut self, serial: u32) {
        self.record("set_meter_serial", serial);
    }

    fn set_meter_type(&mut self, is_gas: bool) {
        self.record("set_meter_type", is_gas);
    }

    fn set_gas_volume_divisor(&mut self, divisor: u16) {
        self.record("set_gas_volume_divisor", divisor);
    }

    fn set_frequency(&mut self, mhz: f32) {
        self.record("set_frequency", mhz);
    }

    fn set_auto_scan(&mut self, enabled: bool) {
        self.record("set_auto_scan", enabled);
    }

    fn set_reading_schedule(&mut self, schedule: &str) {
        self.record("set_reading_schedule", format!("{schedule:?}"));
    }

    fn set_read_hour(&mut self, hour: u8) {
        self.record("set_read_hour", hour);
    }

    fn set_read_minute(&mut self, minute: u8) {
        self.record("set_read_minute", minute);
    }

    fn set_timezone_offset(&mut self, minutes: i16) {
        self.record("set_timezone_offset", minutes);
    }

    fn set_auto_align_time(&mut self, enabled: bool) {
        self.record("set_auto_align_time", enabled);
    }

    fn set_auto_align_midpoint(&mut self, enabled: bool) {
        self.record("set_auto_align_midpoint", enabled);
    }

    fn set_max_retries(&mut self, retries: u8) {
        self.record("set_max_retries", retries);
    }

    fn set_retry_cooldown(&mut self, cooldown: Duration) {
        self.record("set_retry_cooldown", cooldown.as_millis());
    }

    fn set_initial_read_on_boot(&mut self, enabled: bool) {
        self.record("set_initial_read_on_boot", enabled);
    }

    fn set_time_component(&mut self, time_id: &str) {
        self.record("set_time_component", time_id);
    }

    fn set_update_interval(&mut self, interval: UpdateInterval) {
        match interval {
            UpdateInterval::Never => self.record("set_update_interval", "never"),
            UpdateInterval::Every(period) => self.record("set_update_interval", period.as_millis()),
        }
    }

    fn set_volume_sensor(&mut self, sensor: Sensor) {
        self.record("set_volume_sensor", sensor.id());
    }

    fn set_battery_sensor(&mut self, sensor: Sensor) {
        self.record("set_battery_sensor", sensor.id());
    }

    fn set_counter_sensor(&mut self, sensor: Sensor) {
        self.record("set_counter_sensor", sensor.id());
    }

    fn set_rssi_sensor(&mut self, sensor: Sensor) {
        self.record("set_rssi_sensor", sensor.id());
    }

    fn set_rssi_percentage_sensor(&mut self, sensor: Sensor) {
        self.record("set_rssi_percentage_sensor", sensor.id());
    }

    fn set_lqi_sensor(&mut self, sensor: Sensor) {
        self.record("set_lqi_sensor", sensor.id());
    }

    fn set_lqi_percentage_sensor(&mut self, sensor: Sensor) {
        self.record("set_lqi_percentage_sensor", sensor.id());
    }

    fn set_time_start_sensor(&mut self, sensor: Sensor) {
        self.record("set_time_start_sensor", sensor.id());
    }

    fn set_time_end_sensor(&mut self, sensor: Sensor) {
        self.record("set_time_end_sensor", sensor.id());
    }

    fn set_total_attempts_sensor(&mut self, sensor: Sensor) {
        self.record("set_total_attempts_sensor", sensor.id());
    }

    fn set_successful_reads_sensor(&mut self, sensor: Sensor) {
        self.record("set_successful_reads_sensor", sensor.id());
    }

    fn set_failed_reads_sensor(&mut self, sensor: Sensor) {
        self.record("set_failed_reads_sensor", sensor.id());
    }

    fn set_status_sensor(&mut self, sensor: TextSensor) {
        self.record("set_status_sensor", sensor.id());
    }

    fn set_error_sensor(&mut self, sensor: TextSensor) {
        self.record("set_error_sensor", sensor.id());
    }

    fn set_radio_state_sensor(&mut self, sensor: TextSensor) {
        self.record("set_radio_state_sensor", sensor.id());
    }

    fn set_timestamp_sensor(&mut self, sensor: TextSensor) {
        self.record("set_timestamp_sensor", sensor.id());
    }

    fn set_history_sensor(&mut self, sensor: TextSensor) {
        self.record("set_history_sensor", sensor.id());
    }

    fn set_active_reading_sensor(&mut self, sensor: BinarySensor) {
        self.record("set_active_reading_sensor", sensor.id());
    }

    fn set_radio_connected_sensor(&mut self, sensor: BinarySensor) {
        self.record("set_radio_connected_sensor", sensor.id());
    }

    fn register_trigger_button(&mut self, button: TriggerButton) {
        self.record_on(button.id(), "set_parent", button.parent().unwrap_or("none"));
        self.record_on(button.id(), "set_frequency_scan", button.is_frequency_scan());
    }
}
