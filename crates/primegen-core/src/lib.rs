//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Incremental prime generation seeded by persisted knowledge."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
//! Incremental prime discovery.
//!
//! Each run scans a fixed-size window of integers beyond the largest known
//! prime, trial-dividing every candidate by the known primes up to its square
//! root, and appends the primes it finds to the store.

pub mod errors;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod trial;

pub use errors::{GeneratorError, Result};
pub use generator::{generate_window, scan_window, PrimeGenerator};
pub use metrics::RunMetrics;
pub use model::{CandidateWindow, PrimeList};
pub use pipeline::{RunPhase, RunPipeline, RunReport, StoreStatus};
pub use trial::{is_prime, is_prime_by};
