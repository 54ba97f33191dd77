//! # Blue Carbon Telemetry
//!
//! Structured logging and Prometheus metrics for the registry service.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bc_telemetry::{init_logging, register_metrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! register_metrics()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BC_JSON_LOGS` | `false` | JSON formatted logs |
//! | `BC_SERVICE_NAME` | `blue-carbon-registry` | Service name attached to startup logs |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, ANALYSIS_FALLBACKS, LEDGER_CALLS,
    RESULTS_STORED, SUBMISSIONS, SUBMISSION_DURATION,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("logging setup failed: {0}")]
    LoggingInit(String),

    #[error("metric registration failed: {0}")]
    MetricsInit(String),

    #[error("metrics encoding failed: {0}")]
    Encode(String),
}

/// Increment a counter, optionally selecting label values first.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
