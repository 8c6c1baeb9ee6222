//! Semantic configuration checks.

use std::fmt;

use crate::config::schema::MonitorConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem rather than stopping
/// at the first.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.polling.polling_interval_ms == 0 {
        errors.push(ValidationError {
            field: "polling.polling_interval_ms",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.polling.timeout_ms < config.polling.polling_interval_ms {
        errors.push(ValidationError {
            field: "polling.timeout_ms",
            message: format!(
                "must be at least the polling interval ({}ms)",
                config.polling.polling_interval_ms
            ),
        });
    }

    if config.polling.max_attempts == Some(0) {
        errors.push(ValidationError {
            field: "polling.max_attempts",
            message: "must be greater than zero when set".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: format!(
                "unknown level {:?}, expected one of {:?}",
                config.observability.log_level, LOG_LEVELS
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
