//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Windowed incremental prime search."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use primegen_common::config::GeneratorConfig;
use tracing::trace;

use crate::errors::{GeneratorError, Result};
use crate::model::{CandidateWindow, PrimeList};
use crate::trial::is_prime_by;

/// Primes in the window of `step_size` candidates after the last of `existing`.
///
/// Primes found earlier in the window act as divisors for later candidates.
/// The result is increasing and may be empty.
pub fn generate_window(existing: &[u64], step_size: u64) -> Result<Vec<u64>> {
    let window = CandidateWindow::after(existing.last().copied(), step_size)?;
    Ok(scan_window(existing, window))
}

/// Test every candidate of `window` against `existing` plus the primes already
/// found in this window.
pub fn scan_window(existing: &[u64], window: CandidateWindow) -> Vec<u64> {
    let mut found = Vec::new();
    for n in window {
        if is_prime_by(n, existing.iter().chain(found.iter())) {
            found.push(n);
        }
    }
    trace!(window = %window, found = found.len(), "window scanned");
    found
}

/// Stateless search for new primes beyond a [`PrimeList`]'s checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeGenerator {
    step_size: u64,
}

impl PrimeGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Self::with_step_size(config.step_size)
    }

    pub fn with_step_size(step_size: u64) -> Result<Self> {
        if step_size == 0 {
            return Err(GeneratorError::InvalidStepSize);
        }
        Ok(Self { step_size })
    }

    pub fn step_size(&self) -> u64 {
        self.step_size
    }

    /// The window the next run over `known` will scan.
    pub fn window_for(&self, known: &PrimeList) -> Result<CandidateWindow> {
        CandidateWindow::after(known.checkpoint(), self.step_size)
    }

    pub fn scan(&self, known: &PrimeList, window: CandidateWindow) -> Vec<u64> {
        scan_window(known.as_slice(), window)
    }

    pub fn generate(&self, known: &PrimeList) -> Result<Vec<u64>> {
        generate_window(known.as_slice(), self.step_size)
    }
}

impl Default for PrimeGenerator {
    fn default() -> Self {
        Self {
            step_size: GeneratorConfig::default().step_size,
        }
    }
}
