//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Single-run lock, load, scan, and append pipeline."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use primegen_common::config::AppConfig;
use primegen_common::time::{monotonic_now, seconds_rounded};
use primegen_logging::{log_run_event, pg_debug, pg_info, LogContext, RunEventOutcome};
use primegen_persistence::PrimeStore;
use serde::Serialize;
use serde_with::{serde_as, DurationSecondsWithFrac};

use crate::errors::{GeneratorError, Result};
use crate::generator::PrimeGenerator;
use crate::metrics::RunMetrics;
use crate::model::{CandidateWindow, PrimeList};

/// Stages of a run. Every run goes `Idle → Locking → Loading → Scanning → Appending → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Idle,
    Locking,
    Loading,
    Scanning,
    Appending,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Locking => "locking",
            RunPhase::Loading => "loading",
            RunPhase::Scanning => "scanning",
            RunPhase::Appending => "appending",
        }
    }
}

/// Everything a caller needs to report on a completed run.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub store: PathBuf,
    pub previous_count: usize,
    pub previous_largest: Option<u64>,
    pub window: CandidateWindow,
    pub new_primes: Vec<u64>,
    #[serde(rename = "elapsed_seconds")]
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub elapsed: Duration,
}

impl RunReport {
    pub fn found(&self) -> usize {
        self.new_primes.len()
    }

    pub fn largest_new(&self) -> Option<u64> {
        self.new_primes.last().copied()
    }

    /// Largest prime known once this run is committed.
    pub fn checkpoint(&self) -> Option<u64> {
        self.largest_new().or(self.previous_largest)
    }

    pub fn total_known(&self) -> usize {
        self.previous_count + self.found()
    }
}

/// Snapshot of the store without running a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub store: PathBuf,
    pub count: usize,
    pub largest: Option<u64>,
    pub skipped_lines: usize,
}

/// Runs one generation pass against a store.
#[derive(Debug, Clone)]
pub struct RunPipeline {
    store: PrimeStore,
    generator: PrimeGenerator,
    metrics: Option<RunMetrics>,
}

impl RunPipeline {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::from_parts(
            PrimeStore::new(&config.store),
            PrimeGenerator::new(&config.generator)?,
        ))
    }

    pub fn from_parts(store: PrimeStore, generator: PrimeGenerator) -> Self {
        Self {
            store,
            generator,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: RunMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn store(&self) -> &PrimeStore {
        &self.store
    }

    pub fn generator(&self) -> &PrimeGenerator {
        &self.generator
    }

    /// Lock the store, load it, scan the next window, and append what was found.
    ///
    /// The lock is held until the append commits or the run fails. Primes
    /// found by a run whose append fails are discarded; the next run finds
    /// them again because the stored checkpoint did not move.
    pub fn run(&self) -> Result<RunReport> {
        let outcome = self.execute();
        if let Some(metrics) = &self.metrics {
            match &outcome {
                Ok(report) => metrics.record_run(report),
                Err(_) => metrics.record_failure(),
            }
        }
        outcome
    }

    fn execute(&self) -> Result<RunReport> {
        let started = monotonic_now();
        let started_at = Utc::now();
        let store_label = self.store.path().display().to_string();
        let ctx = LogContext::new().with_store(&store_label);

        pg_info!(context = ctx, "Starting prime generation");

        let _lock = self
            .store
            .lock()
            .map_err(|err| fault(&ctx, RunPhase::Locking, err))?;

        let loaded = self
            .store
            .load_report()
            .map_err(|err| fault(&ctx, RunPhase::Loading, err))?;
        if loaded.skipped_lines > 0 {
            pg_debug!(
                context = ctx.clone().with_phase(RunPhase::Loading.as_str()),
                "Ignored {} blank or malformed lines",
                loaded.skipped_lines
            );
        }
        let known = PrimeList::from(loaded.primes);
        match known.checkpoint() {
            Some(largest) => pg_info!(
                context = ctx.clone().with_phase(RunPhase::Loading.as_str()),
                "Loaded {} existing primes. Largest = {}",
                known.len(),
                largest
            ),
            None => pg_info!(
                context = ctx.clone().with_phase(RunPhase::Loading.as_str()),
                "No existing primes found. Starting fresh."
            ),
        }

        let window = self
            .generator
            .window_for(&known)
            .map_err(|err| fault(&ctx, RunPhase::Scanning, err))?;
        let window_ctx = ctx.clone().with_window(window.start(), window.end());
        pg_info!(
            context = window_ctx.clone().with_phase(RunPhase::Scanning.as_str()),
            "Checking numbers {} to {}",
            window.start(),
            window.end()
        );
        let new_primes = self.generator.scan(&known, window);

        let append_ctx = window_ctx.clone().with_phase(RunPhase::Appending.as_str());
        match new_primes.last() {
            Some(largest) => {
                self.store
                    .append(&new_primes)
                    .map_err(|err| fault(&window_ctx, RunPhase::Appending, err))?;
                pg_info!(context = append_ctx, "Found {} new primes.", new_primes.len());
                pg_info!(context = append_ctx, "Largest new prime = {}", largest);
            }
            None => pg_info!(context = append_ctx, "No new primes found during this run."),
        }

        let report = RunReport {
            started_at,
            store: self.store.path().to_path_buf(),
            previous_count: known.len(),
            previous_largest: known.checkpoint(),
            window,
            new_primes,
            elapsed: started.elapsed(),
        };
        log_run_event(
            Some(&window_ctx.with_phase(RunPhase::Idle.as_str())),
            "run.complete",
            &format!(
                "Prime generation complete in {} seconds.",
                seconds_rounded(report.elapsed)
            ),
            RunEventOutcome::Success,
        );
        Ok(report)
    }

    /// Count and largest value of the store, read under the run lock.
    pub fn status(&self) -> Result<StoreStatus> {
        let store_label = self.store.path().display().to_string();
        let ctx = LogContext::new().with_store(&store_label);
        let _lock = self
            .store
            .lock()
            .map_err(|err| fault(&ctx, RunPhase::Locking, err))?;
        let loaded = self
            .store
            .load_report()
            .map_err(|err| fault(&ctx, RunPhase::Loading, err))?;
        Ok(StoreStatus {
            store: self.store.path().to_path_buf(),
            count: loaded.primes.len(),
            largest: loaded.primes.last().copied(),
            skipped_lines: loaded.skipped_lines,
        })
    }
}

fn fault<E: Into<GeneratorError>>(ctx: &LogContext<'_>, phase: RunPhase, err: E) -> GeneratorError {
    let err = err.into();
    let ctx = ctx.clone().with_phase(phase.as_str());
    log_run_event(Some(&ctx), "run.failed", &err.to_string(), RunEventOutcome::Fault);
    err
}
