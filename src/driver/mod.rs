//! Setter surface of the meter driver
//!
//! The RADIAN reader itself lives in the firmware. This module describes
//! what the configuration can hand to it: one setter per configuration
//! field and one per output entity.

mod component;
mod entities;
mod setter_log;

use std::time::Duration;

use crate::config::UpdateInterval;

pub use component::{EverbluMeterComponent, LinkedEntityCounts, ReadRequest};
pub use entities::{BinarySensor, Sensor, TextSensor, TriggerButton};
pub use setter_log::{SetterCall, SetterLog};

pub trait MeterDriver {
    fn set_meter_year(&mut self, year: u8);
    fn set_meter_serial(&mut self, serial: u32);
    fn set_meter_type(&mut self, is_gas: bool);
    fn set_gas_volume_divisor(&mut self, divisor: u16);
    fn set_frequency(&mut self, mhz: f32);
    fn set_auto_scan(&mut self, enabled: bool);
    fn set_reading_schedule(&mut self, schedule: &str);
    fn set_read_hour(&mut self, hour: u8);
    fn set_read_minute(&mut self, minute: u8);
    /// Offset from UTC in minutes.
    fn set_timezone_offset(&mut self, minutes: i16);
    fn set_auto_align_time(&mut self, enabled: bool);
    fn set_auto_align_midpoint(&mut self, enabled: bool);
    fn set_max_retries(&mut self, retries: u8);
    fn set_retry_cooldown(&mut self, cooldown: Duration);
    fn set_initial_read_on_boot(&mut self, enabled: bool);
    fn set_time_component(&mut self, time_id: &str);
    fn set_update_interval(&mut self, interval: UpdateInterval);

    fn set_volume_sensor(&mut self, sensor: Sensor);
    fn set_battery_sensor(&mut self, sensor: Sensor);
    fn set_counter_sensor(&mut self, sensor: Sensor);
    fn set_rssi_sensor(&mut self, sensor: Sensor);
    fn set_rssi_percentage_sensor(&mut self, sensor: Sensor);
    fn set_lqi_sensor(&mut self, sensor: Sensor);
    fn set_lqi_percentage_sensor(&mut self, sensor: Sensor);
    fn set_time_start_sensor(&mut self, sensor: Sensor);
    fn set_time_end_sensor(&mut self, sensor: Sensor);
    fn set_total_attempts_sensor(&mut self, sensor: Sensor);
    fn set_successful_reads_sensor(&mut self, sensor: Sensor);
    fn set_failed_reads_sensor(&mut self, sensor: Sensor);

    fn set_status_sensor(&mut self, sensor: TextSensor);
    fn set_error_sensor(&mut self, sensor: TextSensor);
    fn set_radio_state_sensor(&mut self, sensor: TextSensor);
    fn set_timestamp_sensor(&mut self, sensor: TextSensor);
    fn set_history_sensor(&mut self, sensor: TextSensor);

    fn set_active_reading_sensor(&mut self, sensor: BinarySensor);
    fn set_radio_connected_sensor(&mut self, sensor: BinarySensor);

    /// Buttons are not set on the component; they arrive already pointed at
    /// it through `TriggerButton::set_parent` and `set_frequency_scan`.
    fn register_trigger_button(&mut self, button: TriggerButton);
}
