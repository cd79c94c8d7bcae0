//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Prometheus metrics for generation runs."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::sync::Arc;

use chrono::Utc;
use prometheus::{Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Opts, Registry};

use crate::errors::Result;
use crate::pipeline::RunReport;

/// Metrics recorded per generation run.
#[derive(Clone)]
pub struct RunMetrics {
    candidates_scanned: IntCounter,
    primes_found: IntCounter,
    checkpoint: Gauge,
    run_seconds: Histogram,
    run_failures: IntCounter,
    last_run_success: IntGauge,
    last_run_timestamp: Gauge,
}

impl RunMetrics {
    pub fn new(registry: Arc<Registry>) -> Result<Self> {
        let candidates_scanned = IntCounter::with_opts(Opts::new(
            "primegen_candidates_scanned_total",
            "Candidates tested by trial division",
        ))?;
        registry.register(Box::new(candidates_scanned.clone()))?;

        let primes_found = IntCounter::with_opts(Opts::new(
            "primegen_primes_found_total",
            "New primes discovered by completed runs",
        ))?;
        registry.register(Box::new(primes_found.clone()))?;

        let checkpoint = Gauge::with_opts(Opts::new(
            "primegen_checkpoint",
            "Largest prime known after the last completed run",
        ))?;
        registry.register(Box::new(checkpoint.clone()))?;

        let run_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "primegen_run_seconds",
                "Wall-clock duration of completed runs",
            )
            .buckets(prometheus::exponential_buckets(0.01, 2.0, 16)?),
        )?;
        registry.register(Box::new(run_seconds.clone()))?;

        let run_failures = IntCounter::with_opts(Opts::new(
            "primegen_run_failures_total",
            "Runs that ended with an error",
        ))?;
        registry.register(Box::new(run_failures.clone()))?;

        let last_run_success = IntGauge::with_opts(Opts::new(
            "primegen_last_run_success",
            "1 if the most recent run completed, 0 if it failed",
        ))?;
        registry.register(Box::new(last_run_success.clone()))?;

        let last_run_timestamp = Gauge::with_opts(Opts::new(
            "primegen_last_run_timestamp_seconds",
            "Unix time at which the most recent run finished",
        ))?;
        registry.register(Box::new(last_run_timestamp.clone()))?;

        Ok(Self {
            candidates_scanned,
            primes_found,
            checkpoint,
            run_seconds,
            run_failures,
            last_run_success,
            last_run_timestamp,
        })
    }

    pub fn record_run(&self, report: &RunReport) {
        self.candidates_scanned.inc_by(report.window.len());
        self.primes_found.inc_by(report.new_primes.len() as u64);
        if let Some(checkpoint) = report.checkpoint() {
            self.checkpoint.set(checkpoint as f64);
        }
        self.run_seconds.observe(report.elapsed.as_secs_f64());
        self.last_run_success.set(1);
        self.mark_finished();
    }

    pub fn record_failure(&self) {
        self.run_failures.inc();
        self.last_run_success.set(0);
        self.mark_finished();
    }

    fn mark_finished(&self) {
        self.last_run_timestamp
            .set(Utc::now().timestamp_millis() as f64 / 1000.0);
    }
}

impl std::fmt::Debug for RunMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunMetrics").finish_non_exhaustive()
    }
}
