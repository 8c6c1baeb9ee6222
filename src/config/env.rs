//! Environment-variable helpers.
//!
//! Small wrappers over `std::env` so call sites stay declarative: defaults
//! are explicit, parsing failures fall back instead of panicking, and the
//! `APP_ENV` convention lives in one place.

use std::env;
use std::str::FromStr;

use crate::config::loader::ConfigError;
use crate::config::schema::MonitorConfig;

/// Read an environment variable, falling back to `default` when unset or
/// empty.
pub fn get_env_var(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read a required environment variable.
pub fn require_env_var(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv(key.to_string()))
}

/// Read a boolean environment variable. Accepts `1`/`true`/`yes`/`on`
/// (case-insensitive); anything else yields `default`.
pub fn env_var_as_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

/// Parse an environment variable into a number, returning `None` when the
/// variable is unset or does not parse.
pub fn env_var_as_number<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}

fn app_env() -> String {
    get_env_var("APP_ENV", "development")
}

pub fn is_development() -> bool {
    app_env() == "development"
}

pub fn is_production() -> bool {
    app_env() == "production"
}

pub fn is_test() -> bool {
    app_env() == "test"
}

impl MonitorConfig {
    /// Apply `CHAIN_MONITOR_*` environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(interval) = env_var_as_number("CHAIN_MONITOR_POLLING_INTERVAL_MS") {
            self.polling.polling_interval_ms = interval;
        }
        if let Some(timeout) = env_var_as_number("CHAIN_MONITOR_TIMEOUT_MS") {
            self.polling.timeout_ms = timeout;
        }
        if let Some(max) = env_var_as_number("CHAIN_MONITOR_MAX_ATTEMPTS") {
            self.polling.max_attempts = Some(max);
        }
        let level = get_env_var("CHAIN_MONITOR_LOG_LEVEL", "");
        if !level.is_empty() {
            self.observability.log_level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests share process state; each test uses its own keys.

    #[test]
    fn test_get_env_var_default() {
        assert_eq!(get_env_var("CM_TEST_UNSET", "fallback"), "fallback");

        env::set_var("CM_TEST_SET", "value");
        assert_eq!(get_env_var("CM_TEST_SET", "fallback"), "value");
        env::remove_var("CM_TEST_SET");
    }

    #[test]
    fn test_require_env_var() {
        let err = require_env_var("CM_TEST_REQUIRED_UNSET").unwrap_err();
        assert!(err.to_string().contains("CM_TEST_REQUIRED_UNSET"));

        env::set_var("CM_TEST_REQUIRED", "present");
        assert_eq!(require_env_var("CM_TEST_REQUIRED").unwrap(), "present");
        env::remove_var("CM_TEST_REQUIRED");
    }

    #[test]
    fn test_env_var_as_bool() {
        env::set_var("CM_TEST_BOOL", "TRUE");
        assert!(env_var_as_bool("CM_TEST_BOOL", false));
        env::set_var("CM_TEST_BOOL", "0");
        assert!(!env_var_as_bool("CM_TEST_BOOL", true));
        env::remove_var("CM_TEST_BOOL");
        assert!(env_var_as_bool("CM_TEST_BOOL", true));
    }

    #[test]
    fn test_env_var_as_number() {
        env::set_var("CM_TEST_NUM", "42");
        assert_eq!(env_var_as_number::<u64>("CM_TEST_NUM"), Some(42));
        env::set_var("CM_TEST_NUM", "not-a-number");
        assert_eq!(env_var_as_number::<u64>("CM_TEST_NUM"), None);
        env::remove_var("CM_TEST_NUM");
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("CHAIN_MONITOR_POLLING_INTERVAL_MS", "1234");
        let mut config = MonitorConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.polling.polling_interval_ms, 1234);
        env::remove_var("CHAIN_MONITOR_POLLING_INTERVAL_MS");
    }
}
