use thiserror::Error;

use crate::config::ConfigError;
use crate::persistence::CorpusError;

// * Unified Error type for pipeline runs.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
