//! Prometheus metrics for the orchestration engine.
//!
//! All metrics follow the naming convention: `lx_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // EXECUTOR METRICS (Subsystem 4)
    // =========================================================================

    /// Transactions submitted to the network
    pub static ref TRANSACTIONS_SUBMITTED: Counter = Counter::new(
        "lx_executor_transactions_submitted_total",
        "Total transactions submitted to the ledger network"
    ).expect("metric creation failed");

    /// Terminal outcomes by kind
    pub static ref TRANSACTION_OUTCOMES: CounterVec = CounterVec::new(
        Opts::new("lx_executor_outcomes_total", "Terminal transaction outcomes"),
        &["outcome"]  // outcome: success/failed/timeout
    ).expect("metric creation failed");

    /// Status polls issued while waiting for a result
    pub static ref POLL_ATTEMPTS: Counter = Counter::new(
        "lx_executor_poll_attempts_total",
        "Total transaction status polls"
    ).expect("metric creation failed");

    /// Time from submission to terminal outcome
    pub static ref CONFIRMATION_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "lx_executor_confirmation_latency_seconds",
            "Time from submission to terminal outcome"
        ).buckets(exponential_buckets(0.05, 2.0, 12).expect("bucket layout"))
    ).expect("metric creation failed");

    // =========================================================================
    // CONFIRMATION TOKEN METRICS (Subsystem 3)
    // =========================================================================

    /// Tokens issued by previews
    pub static ref TOKENS_ISSUED: Counter = Counter::new(
        "lx_confirmation_tokens_issued_total",
        "Total confirmation tokens issued"
    ).expect("metric creation failed");

    /// Token validations by result
    pub static ref TOKEN_VALIDATIONS: CounterVec = CounterVec::new(
        Opts::new("lx_confirmation_validations_total", "Confirmation token validations"),
        &["result"]  // result: accepted/missing/expired/consumed/mismatch
    ).expect("metric creation failed");

    /// Expired tokens removed by the sweeper
    pub static ref TOKENS_SWEPT: Counter = Counter::new(
        "lx_confirmation_tokens_swept_total",
        "Total expired confirmation tokens removed"
    ).expect("metric creation failed");

    // =========================================================================
    // ORCHESTRATION METRICS (Subsystem 5)
    // =========================================================================

    /// Orchestration requests by operation and phase
    pub static ref ORCHESTRATION_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("lx_orchestration_requests_total", "Orchestration requests"),
        &["operation", "phase", "status"]  // phase: preview/execute
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already-registered collectors are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Executor
        Box::new(TRANSACTIONS_SUBMITTED.clone()),
        Box::new(TRANSACTION_OUTCOMES.clone()),
        Box::new(POLL_ATTEMPTS.clone()),
        Box::new(CONFIRMATION_LATENCY.clone()),
        // Confirmation
        Box::new(TOKENS_ISSUED.clone()),
        Box::new(TOKEN_VALIDATIONS.clone()),
        Box::new(TOKENS_SWEPT.clone()),
        // Orchestration
        Box::new(ORCHESTRATION_REQUESTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
