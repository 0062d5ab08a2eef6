//! # Bus Telemetry
//!
//! Logging setup for binaries built on `typed-bus`.
//!
//! The library crates only emit `tracing` events; installing a subscriber
//! is left to the final binary through [`init_telemetry`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bus_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::for_service("bus-demo"))?;
//!     // Application code here
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BUS_SERVICE_NAME` | `typed-bus` | Service name in log lines |
//! | `BUS_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directives |
//! | `BUS_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `BUS_JSON_LOGS` | `false` | JSON lines instead of text |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::init_logging;

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The configuration could not be turned into a subscriber.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A global subscriber was already installed, or installation failed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Install logging for the whole process.
///
/// Returns a guard to hold for the lifetime of the application; dropping
/// it logs shutdown.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    tracing::info!(service = %config.service_name, "Telemetry initialized");

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the guard was created for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
