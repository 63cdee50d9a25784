// * Operations: logging, metrics and run instrumentation

pub mod profiler;
pub mod telemetry;

// * Re-exports for convenient access
pub use profiler::{Instrumented, RunMetrics, StageProfiler, StageTiming};
pub use telemetry::{
    get_metrics_string, init_tracing, init_tracing_pretty, init_tracing_with_level,
    record_candidate_pairs, record_clusters, record_documents, record_stage_duration,
};
