pub const ID: &str = "id";
pub const TIME_ID: &str = "time_id";
pub const UPDATE_INTERVAL: &str = "update_interval";

pub const METER_YEAR: &str = "meter_year";
pub const METER_SERIAL: &str = "meter_serial";
pub const GDO0_PIN: &str = "gdo0_pin";
pub const METER_TYPE: &str = "meter_type";
pub const GAS_VOLUME_DIVISOR: &str = "gas_volume_divisor";
pub const FREQUENCY: &str = "frequency";
pub const AUTO_SCAN: &str = "auto_scan";
pub const READING_SCHEDULE: &str = "reading_schedule";
pub const READ_HOUR: &str = "read_hour";
pub const READ_MINUTE: &str = "read_minute";
pub const TIMEZONE_OFFSET: &str = "timezone_offset";
pub const AUTO_ALIGN_TIME: &str = "auto_align_time";
pub const AUTO_ALIGN_MIDPOINT: &str = "auto_align_midpoint";
pub const MAX_RETRIES: &str = "max_retries";
pub const RETRY_COOLDOWN: &str = "retry_cooldown";
pub const INITIAL_READ_ON_BOOT: &str = "initial_read_on_boot";
pub const DEBUG_CC1101: &str = "debug_cc1101";

// Entity bindings
pub const VOLUME: &str = "volume";
pub const BATTERY: &str = "battery";
pub const COUNTER: &str = "counter";
pub const RSSI: &str = "rssi";
pub const RSSI_PERCENTAGE: &str = "rssi_percentage";
pub const LQI: &str = "lqi";
pub const LQI_PERCENTAGE: &str = "lqi_percentage";
pub const TIME_START: &str = "time_start";
pub const TIME_END: &str = "time_end";
pub const TOTAL_ATTEMPTS: &str = "total_attempts";
pub const SUCCESSFUL_READS: &str = "successful_reads";
pub const FAILED_READS: &str = "failed_reads";
pub const STATUS: &str = "status";
pub const ERROR: &str = "error";
pub const RADIO_STATE: &str = "radio_state";
pub const TIMESTAMP: &str = "timestamp";
pub const HISTORY_JSON: &str = "history_json";
pub const ACTIVE_READING: &str = "active_reading";
pub const RADIO_CONNECTED: &str = "radio_connected";
pub const REQUEST_READING_BUTTON: &str = "request_reading_button";
pub const FREQUENCY_SCAN_BUTTON: &str = "frequency_scan_button";

// Entity options
pub const NAME: &str = "name";
pub const ICON: &str = "icon";
pub const INTERNAL: &str = "internal";
pub const DISABLED_BY_DEFAULT: &str = "disabled_by_default";
pub const ENTITY_CATEGORY: &str = "entity_category";
pub const DEVICE_CLASS: &str = "device_class";
pub const UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";
pub const ACCURACY_DECIMALS: &str = "accuracy_decimals";
pub const STATE_CLASS: &str = "state_class";
