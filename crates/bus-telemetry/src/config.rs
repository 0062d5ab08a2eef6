//! Telemetry configuration from environment variables.

use std::env;

/// Default service name when none is configured.
pub const DEFAULT_SERVICE_NAME: &str = "typed-bus";

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Filter directives (`info`, `typed_bus=debug,warn`, ...)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// Whether to emit JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BUS_SERVICE_NAME`: Service name (default: typed-bus)
    /// - `BUS_LOG_LEVEL` or `RUST_LOG`: Filter directives (default: info)
    /// - `BUS_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `BUS_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: env::var("BUS_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("BUS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: parse_flag(env::var("BUS_CONSOLE_OUTPUT").ok(), defaults.console_output),

            json_logs: parse_flag(env::var("BUS_JSON_LOGS").ok(), defaults.json_logs),
        }
    }

    /// Environment configuration with the service name replaced.
    pub fn for_service(service_name: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = service_name.to_string();
        config
    }
}

/// Interpret a boolean environment value; unset or unrecognised keeps `default`.
fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim).map(str::to_ascii_lowercase) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
