use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCHEMA_PATH: &str = "expected schema.json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The first vendor product shipped in 1986 (1986-01-01T00:00:00Z).
pub const FIRST_PRODUCT_RELEASE: i64 = 504_921_600;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    pub schema_path: PathBuf,
    /// Upper bound for every network request made by a check.
    pub timeout: Duration,
    /// Releases at or before this timestamp are rejected.
    pub release_floor: i64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            timeout: DEFAULT_TIMEOUT,
            release_floor: FIRST_PRODUCT_RELEASE,
        }
    }
}
