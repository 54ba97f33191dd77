//! Prometheus metrics for the registry.
//!
//! All metrics follow the naming convention: `bc_<metric>_<unit>`

use std::time::Instant;

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, IntCounter, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Submissions by final outcome
    pub static ref SUBMISSIONS: CounterVec = CounterVec::new(
        Opts::new("bc_submissions_total", "Submissions handled by the orchestrator"),
        &["outcome"]  // outcome: registered/credits-issued/.../rejected-input/persistence-error
    ).expect("metric creation failed");

    /// Fallback analyses by reason
    pub static ref ANALYSIS_FALLBACKS: CounterVec = CounterVec::new(
        Opts::new("bc_analysis_fallbacks_total", "Analyses resolved by the deterministic fallback"),
        &["reason"]  // reason: timeout/scorer-failed/malformed-output
    ).expect("metric creation failed");

    /// Ledger calls by operation and result
    pub static ref LEDGER_CALLS: CounterVec = CounterVec::new(
        Opts::new("bc_ledger_calls_total", "Ledger write calls"),
        &["operation", "result"]  // operation: register/issue, result: ok/<failure kind>
    ).expect("metric creation failed");

    /// Results written to the store
    pub static ref RESULTS_STORED: IntCounter = IntCounter::new(
        "bc_results_stored_total",
        "Analysis results persisted (including idempotent re-puts)"
    ).expect("metric creation failed");

    /// End-to-end submission duration
    pub static ref SUBMISSION_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "bc_submission_duration_seconds",
            "Time spent handling one submission"
        ).buckets(exponential_buckets(0.01, 2.0, 14).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SUBMISSIONS.clone()),
        Box::new(ANALYSIS_FALLBACKS.clone()),
        Box::new(LEDGER_CALLS.clone()),
        Box::new(RESULTS_STORED.clone()),
        Box::new(SUBMISSION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Render the registry in the text exposition format served at `/metrics`.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let mut out = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut out)
        .map_err(|e| TelemetryError::Encode(e.to_string()))?;
    String::from_utf8(out).map_err(|e| TelemetryError::Encode(e.to_string()))
}

/// Observes the elapsed seconds into `histogram` when dropped, so early
/// returns and cancelled futures are timed too.
pub struct HistogramTimer<'a> {
    histogram: &'a Histogram,
    started: Instant,
}

impl<'a> HistogramTimer<'a> {
    pub fn new(histogram: &'a Histogram) -> Self {
        Self {
            histogram,
            started: Instant::now(),
        }
    }
}

impl Drop for HistogramTimer<'_> {
    fn drop(&mut self) {
        self.histogram
            .observe(self.started.elapsed().as_secs_f64());
    }
}
