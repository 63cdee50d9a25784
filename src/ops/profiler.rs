// * Run instrumentation: wall time and peak resident memory, sampled at stage boundaries
// * Returned alongside pipeline results instead of living in process-wide toggles

use serde::Serialize;
use std::time::{Duration, Instant};
use sysinfo::{Pid, System};

use super::telemetry::record_stage_duration;

/// Wall time of one pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub stage: &'static str,
    pub elapsed: Duration,
}

/// Metrics record for one pipeline invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    pub elapsed: Duration,
    /// Highest resident set size observed at a stage boundary, 0 if unavailable
    pub peak_memory_bytes: u64,
    pub stages: Vec<StageTiming>,
}

impl RunMetrics {
    pub fn peak_memory_mb(&self) -> f64 {
        self.peak_memory_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn stage(&self, name: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|timing| timing.stage == name)
    }
}

/// A pipeline result paired with the metrics of the run that produced it
#[derive(Debug, Clone)]
pub struct Instrumented<T> {
    pub result: T,
    pub metrics: RunMetrics,
}

/// Stage clock and memory sampler
pub struct StageProfiler {
    label: &'static str,
    system: System,
    pid: Option<Pid>,
    started: Instant,
    stage_started: Instant,
    peak_memory_bytes: u64,
    stages: Vec<StageTiming>,
}

impl StageProfiler {
    /// Starts timing a run; `label` names it in logs
    pub fn start(label: &'static str) -> Self {
        tracing::info!(run = label, "Starting run with memory and time tracking");

        let now = Instant::now();
        let mut profiler = Self {
            label,
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
            started: now,
            stage_started: now,
            peak_memory_bytes: 0,
            stages: Vec::new(),
        };
        profiler.sample_memory();
        profiler
    }

    fn sample_memory(&mut self) {
        let Some(pid) = self.pid else {
            return;
        };
        if !self.system.refresh_process(pid) {
            return;
        }
        if let Some(process) = self.system.process(pid) {
            self.peak_memory_bytes = self.peak_memory_bytes.max(process.memory());
        }
    }

    /// Closes the current stage and opens the next one
    pub fn finish_stage(&mut self, stage: &'static str) {
        let elapsed = self.stage_started.elapsed();
        self.sample_memory();
        record_stage_duration(stage, elapsed.as_secs_f64());
        tracing::debug!(
            run = self.label,
            stage = stage,
            elapsed_ms = elapsed.as_millis() as u64,
            "Stage finished"
        );

        self.stages.push(StageTiming { stage, elapsed });
        self.stage_started = Instant::now();
    }

    /// Wraps `result` with the collected metrics
    pub fn finish<T>(mut self, result: T) -> Instrumented<T> {
        self.sample_memory();
        let metrics = RunMetrics {
            elapsed: self.started.elapsed(),
            peak_memory_bytes: self.peak_memory_bytes,
            stages: self.stages,
        };

        tracing::info!(
            run = self.label,
            elapsed_secs = metrics.elapsed.as_secs_f64(),
            peak_memory_mb = metrics.peak_memory_mb(),
            "Run finished"
        );

        Instrumented { result, metrics }
    }
}
