use std::path::PathBuf;

use thiserror::Error;

/// A model- or call-contract violation that aborts the current call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A state reachable during generation has no emission distribution.
    #[error("no emission probabilities defined for state '{state}'")]
    MissingEmissions { state: String },
    /// A row that must be sampled from carries no weight at all.
    #[error("row of state '{state}' has zero total weight")]
    ZeroWeight { state: String },
    /// Viterbi needs at least one time step to tabulate.
    #[error("empty observation sequence")]
    EmptySequence,
    /// The requested state universe has no members.
    #[error("no candidate states to decode with")]
    NoCandidateStates,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
