pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Environment variable overriding `upload.base_url`.
pub const BASE_URL_ENV: &str = "SENSOR_UPLINK_BASE_URL";

pub const DEFAULT_LOG_FILTER: &str = "info";

pub(crate) const STAGING_PROBE_FILE: &str = ".staging-probe";
pub(crate) const STAGING_EXTENSION: &str = "csv";

// Rough width of one serialized row, used to size the output buffer.
pub(crate) const ROW_CAPACITY_HINT: usize = 48;
