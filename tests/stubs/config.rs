#![allow(dead_code)]
// Each test binary only uses some of these payloads

pub const MINIMAL_PAYLOAD: &str = r#"
{
    "time_id": "sntp_time",
    "meter_year": 21,
    "meter_serial": 1234567,
    "gdo0_pin": 4
}
"#;

pub const FULL_PAYLOAD: &str = r#"
{
    "id": "garden_meter",
    "time_id": "sntp_time",
    "update_interval": "never",
    "meter_year": 16,
    "meter_serial": 8354291,
    "gdo0_pin": 5,
    "meter_type": "gas",
    "gas_volume_divisor": 250,
    "frequency": 433.76,
    "auto_scan": "no",
    "reading_schedule": "Everyday",
    "read_hour": 6,
    "read_minute": 30,
    "timezone_offset": 120,
    "auto_align_time": false,
    "auto_align_midpoint": false,
    "max_retries": 5,
    "retry_cooldown": "15min",
    "initial_read_on_boot": true,
    "debug_cc1101": true,
    "volume": {"name": "Gas volume", "unit_of_measurement": "m³", "accuracy_decimals": 3},
    "battery": {"name": "Battery"},
    "counter": {"name": "Read counter"},
    "rssi": {"name": "RSSI"},
    "rssi_percentage": {"name": "RSSI %"},
    "lqi": {"name": "LQI"},
    "lqi_percentage": {"name": "LQI %"},
    "time_start": {"name": "Window start"},
    "time_end": {"name": "Window end"},
    "total_attempts": {"name": "Attempts"},
    "successful_reads": {"name": "Successful reads"},
    "failed_reads": {"name": "Failed reads"},
    "status": {"name": "Status"},
    "error": {"name": "Last error"},
    "radio_state": {"name": "Radio state"},
    "timestamp": {"name": "Last reading"},
    "history_json": {"name": "History", "internal": true},
    "active_reading": {"name": "Reading"},
    "radio_connected": {"name": "Radio connected"},
    "request_reading_button": {"name": "Read now"},
    "frequency_scan_button": {"name": "Scan frequency", "entity_category": "config"}
}
"#;

pub const OUT_OF_RANGE_PAYLOAD: &str = r#"
{
    "time_id": "sntp_time",
    "meter_year": 100,
    "meter_serial": 1234567,
    "gdo0_pin": 4
}
"#;

pub const UNKNOWN_ENTITY_OPTION_PAYLOAD: &str = r#"
{
    "time_id": "sntp_time",
    "meter_year": 21,
    "meter_serial": 1234567,
    "gdo0_pin": 4,
    "status": {"name": "Status", "accuracy_decimals": 2}
}
"#;

pub const INVALID_JSON: &str = "blah";
