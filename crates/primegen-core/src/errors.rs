//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Error types for prime generation runs."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use primegen_persistence::PersistenceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("step size must be positive")]
    InvalidStepSize,
    #[error("window of {step_size} candidates after {from} exceeds u64 range")]
    WindowOverflow { from: u64, step_size: u64 },
    #[error("value {value} does not extend prime list ending at {last}")]
    NotIncreasing { last: u64, value: u64 },
    #[error(transparent)]
    Store(#[from] PersistenceError),
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
