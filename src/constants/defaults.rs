use std::time::Duration;

pub const LOG_LEVEL: &str = "info";
pub const CONFIG_FILE: &str = "everblu_meter.json";

pub const COMPONENT_ID: &str = "everblu_meter";
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

pub const GAS_VOLUME_DIVISOR: u16 = 100;
pub const FREQUENCY_MHZ: f32 = 433.82;
pub const AUTO_SCAN: bool = true;
pub const READING_SCHEDULE: &str = "Monday-Friday";
pub const READ_HOUR: u8 = 10;
pub const READ_MINUTE: u8 = 0;
pub const TIMEZONE_OFFSET_MINUTES: i16 = 0;
pub const AUTO_ALIGN_TIME: bool = true;
pub const AUTO_ALIGN_MIDPOINT: bool = true;
pub const MAX_RETRIES: u8 = 10;
pub const RETRY_COOLDOWN: Duration = Duration::from_secs(60 * 60);
pub const INITIAL_READ_ON_BOOT: bool = false;
pub const DEBUG_CC1101: bool = false;

/// Schedule names the driver knows how to interpret.
pub const KNOWN_READING_SCHEDULES: [&str; 4] = ["Monday-Friday", "Saturday", "Sunday", "Everyday"];
