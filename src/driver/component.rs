use std::time::Duration;

use super::{BinarySensor, MeterDriver, Sensor, TextSensor, TriggerButton};
use crate::config::{EntityConfig, UpdateInterval};
use crate::constants::defaults;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadRequest {
    ManualRead,
    FrequencyScan,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkedEntityCounts {
    pub numeric: usize,
    pub text: usize,
    pub binary: usize,
}

#[derive(Clone, Debug, Default)]
struct Sensors {
    volume: Option<Sensor>,
    battery: Option<Sensor>,
    counter: Option<Sensor>,
    rssi: Option<Sensor>,
    rssi_percentage: Option<Sensor>,
    lqi: Option<Sensor>,
    lqi_percentage: Option<Sensor>,
    time_start: Option<Sensor>,
    time_end: Option<Sensor>,
    total_attempts: Option<Sensor>,
    successful_reads: Option<Sensor>,
    failed_reads: Option<Sensor>,

    status: Option<TextSensor>,
    error: Option<TextSensor>,
    radio_state: Option<TextSensor>,
    timestamp: Option<TextSensor>,
    history: Option<TextSensor>,

    active_reading: Option<BinarySensor>,
    radio_connected: Option<BinarySensor>,
}

impl Sensors {
    fn numeric(&self) -> [(&'static str, Option<&Sensor>); 12] {
        [
            ("Volume", self.volume.as_ref()),
            ("Battery", self.battery.as_ref()),
            ("Counter", self.counter.as_ref()),
            ("RSSI", self.rssi.as_ref()),
            ("RSSI Percentage", self.rssi_percentage.as_ref()),
            ("LQI", self.lqi.as_ref()),
            ("LQI Percentage", self.lqi_percentage.as_ref()),
            ("Time Start", self.time_start.as_ref()),
            ("Time End", self.time_end.as_ref()),
            ("Total Attempts", self.total_attempts.as_ref()),
            ("Successful Reads", self.successful_reads.as_ref()),
            ("Failed Reads", self.failed_reads.as_ref()),
        ]
    }

    fn text(&self) -> [(&'static str, Option<&TextSensor>); 5] {
        [
            ("Status", self.status.as_ref()),
            ("Error", self.error.as_ref()),
            ("Radio State", self.radio_state.as_ref()),
            ("Timestamp", self.timestamp.as_ref()),
            ("History", self.history.as_ref()),
        ]
    }

    fn binary(&self) -> [(&'static str, Option<&BinarySensor>); 2] {
        [
            ("Active Reading", self.active_reading.as_ref()),
            ("Radio Connected", self.radio_connected.as_ref()),
        ]
    }
}

/// In-process handle of the EverBlu meter driver.
///
/// Holds everything the configuration forwards, starting from the driver's
/// own defaults, and answers read requests coming from trigger buttons.
#[derive(Clone, Debug)]
pub struct EverbluMeterComponent {
    id: String,

    meter_year: u8,
    meter_serial: u32,
    is_gas: bool,
    gas_volume_divisor: u16,
    frequency: f32,
    auto_scan: bool,
    reading_schedule: String,
    read_hour: u8,
    read_minute: u8,
    timezone_offset: i16,
    auto_align_time: bool,
    auto_align_midpoint: bool,
    max_retries: u8,
    retry_cooldown: Duration,
    initial_read_on_boot: bool,
    update_interval: UpdateInterval,
    time_component: Option<String>,

    sensors: Sensors,
    request_reading_button: Option<TriggerButton>,
    frequency_scan_button: Option<TriggerButton>,

    ready: bool,
    pending_request: Option<ReadRequest>,
}

impl Default for EverbluMeterComponent {
    fn default() -> Self {
        EverbluMeterComponent::new(defaults::COMPONENT_ID)
    }
}

impl EverbluMeterComponent {
    pub fn new(id: impl Into<String>) -> Self {
        EverbluMeterComponent {
            id: id.into(),
            meter_year: 0,
            meter_serial: 0,
            is_gas: false,
            gas_volume_divisor: defaults::GAS_VOLUME_DIVISOR,
            frequency: defaults::FREQUENCY_MHZ,
            auto_scan: defaults::AUTO_SCAN,
            reading_schedule: defaults::READING_SCHEDULE.to_string(),
            read_hour: defaults::READ_HOUR,
            read_minute: defaults::READ_MINUTE,
            timezone_offset: defaults::TIMEZONE_OFFSET_MINUTES,
            auto_align_time: defaults::AUTO_ALIGN_TIME,
            auto_align_midpoint: defaults::AUTO_ALIGN_MIDPOINT,
            max_retries: defaults::MAX_RETRIES,
            retry_cooldown: defaults::RETRY_COOLDOWN,
            initial_read_on_boot: defaults::INITIAL_READ_ON_BOOT,
            update_interval: UpdateInterval::default(),
            time_component: None,
            sensors: Sensors::default(),
            request_reading_button: None,
            frequency_scan_button: None,
            ready: false,
            pending_request: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn meter_year(&self) -> u8 {
        self.meter_year
    }

    pub fn meter_serial(&self) -> u32 {
        self.meter_serial
    }

    pub fn is_gas(&self) -> bool {
        self.is_gas
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn reading_schedule(&self) -> &str {
        &self.reading_schedule
    }

    pub fn retry_cooldown(&self) -> Duration {
        self.retry_cooldown
    }

    pub fn time_component(&self) -> Option<&str> {
        self.time_component.as_deref()
    }

    pub fn request_reading_button(&self) -> Option<&TriggerButton> {
        self.request_reading_button.as_ref()
    }

    pub fn frequency_scan_button(&self) -> Option<&TriggerButton> {
        self.frequency_scan_button.as_ref()
    }

    pub fn linked_entity_counts(&self) -> LinkedEntityCounts {
        LinkedEntityCounts {
            numeric: self.sensors.numeric().iter().filter(|(_, s)| s.is_some()).count(),
            text: self.sensors.text().iter().filter(|(_, s)| s.is_some()).count(),
            binary: self.sensors.binary().iter().filter(|(_, s)| s.is_some()).count(),
        }
    }

    pub fn setup(&mut self) {
        log::info!("Setting up EverBlu Meter...");
        if self.time_component.is_none() {
            log::warn!("No time component configured, some features may not work correctly");
        }
        let counts = self.linked_entity_counts();
        log::debug!(
            "Linked sensors -> numeric: {}, text: {}, binary: {}",
            counts.numeric,
            counts.text,
            counts.binary
        );
        self.ready = true;
        log::info!("EverBlu Meter setup complete");
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn request_manual_read(&mut self) {
        if !self.is_ready() {
            log::warn!("Manual read ignored: meter reader not ready");
            return;
        }
        log::info!("Manual read requested via button");
        self.pending_request = Some(ReadRequest::ManualRead);
    }

    pub fn request_frequency_scan(&mut self) {
        if !self.is_ready() {
            log::warn!("Frequency scan ignored: meter reader not ready");
            return;
        }
        log::info!("Frequency scan requested via button");
        self.pending_request = Some(ReadRequest::FrequencyScan);
    }

    pub fn pending_request(&self) -> Option<ReadRequest> {
        self.pending_request
    }

    /// Hand the pending request over to the reader loop.
    pub fn take_pending_request(&mut self) -> Option<ReadRequest> {
        self.pending_request.take()
    }

    /// Human readable configuration, one line per entry.
    pub fn config_summary(&self) -> Vec<String> {
        let enabled = |flag: bool| if flag { "Enabled" } else { "Disabled" };
        let mut lines = vec![
            "EverBlu Meter:".to_string(),
            format!("  Meter Year: {}", self.meter_year),
            format!("  Meter Serial: {}", self.meter_serial),
            format!("  Meter Type: {}", if self.is_gas { "Gas" } else { "Water" }),
        ];
        if self.is_gas {
            lines.push(format!("  Gas Volume Divisor: {}", self.gas_volume_divisor));
        }
        lines.extend([
            format!("  Frequency: {:.2} MHz", self.frequency),
            format!("  Auto Scan: {}", enabled(self.auto_scan)),
            format!("  Reading Schedule: {}", self.reading_schedule),
            format!("  Read Time: {:02}:{:02}", self.read_hour, self.read_minute),
            format!("  Timezone Offset: {}", self.timezone_offset),
            format!("  Auto Align Time: {}", enabled(self.auto_align_time)),
            format!("  Auto Align Midpoint: {}", enabled(self.auto_align_midpoint)),
            format!("  Max Retries: {}", self.max_retries),
            format!("  Retry Cooldown: {} ms", self.retry_cooldown.as_millis()),
            format!("  Initial Read On Boot: {}", enabled(self.initial_read_on_boot)),
            format!("  Update Interval: {}", self.update_interval),
            format!(
                "  Time Component: {}",
                self.time_component.as_deref().unwrap_or("none")
            ),
            "  Sensors:".to_string(),
        ]);

        for (label, sensor) in self.sensors.numeric() {
            if let Some(sensor) = sensor {
                push_entity(&mut lines, label, sensor.config());
            }
        }
        for (label, sensor) in self.sensors.text() {
            if let Some(sensor) = sensor {
                push_entity(&mut lines, label, sensor.config());
            }
        }
        for (label, sensor) in self.sensors.binary() {
            if let Some(sensor) = sensor {
                push_entity(&mut lines, label, sensor.config());
            }
        }
        for (label, button) in [
            ("Request Reading", self.request_reading_button.as_ref()),
            ("Frequency Scan", self.frequency_scan_button.as_ref()),
        ] {
            if let Some(button) = button {
                push_entity(&mut lines, label, button.config());
            }
        }
        lines
    }

    pub fn dump_config(&self) {
        for line in self.config_summary() {
            log::info!("{line}");
        }
    }
}

fn push_entity(lines: &mut Vec<String>, label: &str, config: &EntityConfig) {
    match &config.name {
        Some(name) => lines.push(format!("    {label} '{name}' ({})", config.id)),
        None => lines.push(format!("    {label} ({})", config.id)),
    }
    if let Some(state_class) = config.state_class {
        lines.push(format!("      State Class: '{}'", state_class.as_str()));
    }
    if let Some(unit) = &config.unit_of_measurement {
        lines.push(format!("      Unit of Measurement: '{unit}'"));
    }
    if let Some(decimals) = config.accuracy_decimals {
        lines.push(format!("      Accuracy Decimals: {decimals}"));
    }
    if let Some(device_class) = &config.device_class {
        lines.push(format!("      Device Class: '{device_class}'"));
    }
    if let Some(icon) = &config.icon {
        lines.push(format!("      Icon: '{icon}'"));
    }
}

impl MeterDriver for EverbluMeterComponent {
    fn set_meter_year(&mut self, year: u8) {
        self.meter_year = year;
    }

    fn set_meter_serial(&mut self, serial: u32) {
        self.meter_serial = serial;
    }

    fn set_meter_type(&mut self, is_gas: bool) {
        self.is_gas = is_gas;
    }

    fn set_gas_volume_divisor(&mut self, divisor: u16) {
        self.gas_volume_divisor = divisor;
    }

    fn set_frequency(&mut self, mhz: f32) {
        self.frequency = mhz;
    }

    fn set_auto_scan(&mut self, enabled: bool) {
        self.auto_scan = enabled;
    }

    fn set_reading_schedule(&mut self, schedule: &str) {
        self.reading_schedule = schedule.to_string();
    }

    fn set_read_hour(&mut self, hour: u8) {
        self.read_hour = hour;
    }

    fn set_read_minute(&mut self, minute: u8) {
        self.read_minute = minute;
    }

    fn set_timezone_offset(&mut self, minutes: i16) {
        self.timezone_offset = minutes;
    }

    fn set_auto_align_time(&mut self, enabled: bool) {
        self.auto_align_time = enabled;
    }

    fn set_auto_align_midpoint(&mut self, enabled: bool) {
        self.auto_align_midpoint = enabled;
    }

    fn set_max_retries(&mut self, retries: u8) {
        self.max_retries = retries;
    }

    fn set_retry_cooldown(&mut self, cooldown: Duration) {
        self.retry_cooldown = cooldown;
    }

    fn set_initial_read_on_boot(&mut self, enabled: bool) {
        self.initial_read_on_boot = enabled;
    }

    fn set_time_component(&mut self, time_id: &str) {
        self.time_component = Some(time_id.to_string());
    }

    fn set_update_interval(&mut self, interval: UpdateInterval) {
        self.update_interval = interval;
    }

    fn set_volume_sensor(&mut self, sensor: Sensor) {
        self.sensors.volume = Some(sensor);
    }

    fn set_battery_sensor(&mut self, sensor: Sensor) {
        self.sensors.battery = Some(sensor);
    }

    fn set_counter_sensor(&mut self, sensor: Sensor) {
        self.sensors.counter = Some(sensor);
    }

    fn set_rssi_sensor(&mut self, sensor: Sensor) {
        self.sensors.rssi = Some(sensor);
    }

    fn set_rssi_percentage_sensor(&mut self, sensor: Sensor) {
        self.sensors.rssi_percentage = Some(sensor);
    }

    fn set_lqi_sensor(&mut self, sensor: Sensor) {
        self.sensors.lqi = Some(sensor);
    }

    fn set_lqi_percentage_sensor(&mut self, sensor: Sensor) {
        self.sensors.lqi_percentage = Some(sensor);
    }

    fn set_time_start_sensor(&mut self, sensor: Sensor) {
        self.sensors.time_start = Some(sensor);
    }

    fn set_time_end_sensor(&mut self, sensor: Sensor) {
        self.sensors.time_end = Some(sensor);
    }

    fn set_total_attempts_sensor(&mut self, sensor: Sensor) {
        self.sensors.total_attempts = Some(sensor);
    }

    fn set_successful_reads_sensor(&mut self, sensor: Sensor) {
        self.sensors.successful_reads = Some(sensor);
    }

    fn set_failed_reads_sensor(&mut self, sensor: Sensor) {
        self.sensors.failed_reads = Some(sensor);
    }

    fn set_status_sensor(&mut self, sensor: TextSensor) {
        self.sensors.status = Some(sensor);
    }

    fn set_error_sensor(&mut self, sensor: TextSensor) {
        self.sensors.error = Some(sensor);
    }

    fn set_radio_state_sensor(&mut self, sensor: TextSensor) {
        self.sensors.radio_state = Some(sensor);
    }

    fn set_timestamp_sensor(&mut self, sensor: TextSensor) {
        self.sensors.timestamp = Some(sensor);
    }

    fn set_history_sensor(&mut self, sensor: TextSensor) {
        self.sensors.history = Some(sensor);
    }

    fn set_active_reading_sensor(&mut self, sensor: BinarySensor) {
        self.sensors.active_reading = Some(sensor);
    }

    fn set_radio_connected_sensor(&mut self, sensor: BinarySensor) {
        self.sensors.radio_connected = Some(sensor);
    }

    fn register_trigger_button(&mut self, button: TriggerButton) {
        if button.parent() != Some(self.id.as_str()) {
            log::warn!(
                "Trigger button '{}' is not parented to '{}', presses will be ignored",
                button.id(),
                self.id
            );
        }
        if button.is_frequency_scan() {
            self.frequency_scan_button = Some(button);
        } else {
            self.request_reading_button = Some(button);
        }
    }
}
