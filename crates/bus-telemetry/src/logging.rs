//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber with:
//! - an `EnvFilter` built from [`TelemetryConfig::log_level`]
//! - a JSON `fmt` layer (file, line and target included) when `json_logs` is set
//! - a compact human-readable `fmt` layer otherwise

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter for `config`.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("invalid log filter {:?}: {e}", config.log_level)))
}

/// Install the global subscriber.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let json_layer = (config.console_output && config.json_logs).then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });

    let pretty_layer = (config.console_output && !config.json_logs).then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Structured logging initialized"
    );

    Ok(())
}

/// Log an event tagged with the component that produced it.
///
/// ```rust,ignore
/// log_event!(info, "demo", "Subscriptions ready", tags = 3);
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}
