//! # Ledger Exchange Telemetry
//!
//! Structured logging and Prometheus metrics shared by every subsystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lx_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LX_SERVICE_NAME` | `ledger-exchange` | Service name in logs |
//! | `LX_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `LX_JSON_LOGS` | `false` | JSON log lines |
//! | `LX_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, redact};
pub use metrics::{
    gather_metrics, register_metrics, CONFIRMATION_LATENCY, ORCHESTRATION_REQUESTS,
    POLL_ATTEMPTS, TOKENS_ISSUED, TOKENS_SWEPT, TOKEN_VALIDATIONS, TRANSACTIONS_SUBMITTED,
    TRANSACTION_OUTCOMES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the logging subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
