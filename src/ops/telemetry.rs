// * Telemetry - JSON Logging and Prometheus Metrics
// * Structured logging setup plus process-wide counters for pipeline runs

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter, CounterVec, Encoder,
    HistogramVec, IntCounter, TextEncoder,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    // * Documents seen by kind: unique, exact_duplicate, malformed, query
    pub static ref DOCUMENTS_TOTAL: CounterVec = register_counter_vec!(
        "lsh_documents_total",
        "Documents processed by kind",
        &["kind"]
    ).unwrap();

    // * Candidate pairs emitted by banding
    pub static ref CANDIDATE_PAIRS_TOTAL: IntCounter = register_int_counter!(
        "lsh_candidate_pairs_total",
        "Candidate pairs emitted by LSH banding"
    ).unwrap();

    // * Clusters read off the disjoint-set forest
    pub static ref CLUSTERS_TOTAL: IntCounter = register_int_counter!(
        "lsh_clusters_total",
        "Clusters formed by union-find"
    ).unwrap();

    // * Per-stage wall time
    pub static ref STAGE_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "lsh_stage_duration_seconds",
        "Pipeline stage duration in seconds",
        &["stage"],
        vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 120.0]
    ).unwrap();
}

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use lsh_dedup::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(documents = 300, "Corpus loaded");
/// ```
pub fn init_tracing() {
    init_tracing_with_level("info");
}

/// Initializes JSON tracing with a custom default level; `RUST_LOG` still wins
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // * A second init (tests, embedding) is ignored
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .try_init();
}

/// Returns the current metrics in Prometheus text format
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Adds `count` documents of the given kind
pub fn record_documents(kind: &str, count: usize) {
    DOCUMENTS_TOTAL
        .with_label_values(&[kind])
        .inc_by(count as f64);
}

pub fn record_candidate_pairs(count: usize) {
    CANDIDATE_PAIRS_TOTAL.inc_by(count as u64);
}

pub fn record_clusters(count: usize) {
    CLUSTERS_TOTAL.inc_by(count as u64);
}

/// Observes one stage's wall time
pub fn record_stage_duration(stage: &str, seconds: f64) {
    STAGE_DURATION_SECONDS
        .with_label_values(&[stage])
        .observe(seconds);
}
