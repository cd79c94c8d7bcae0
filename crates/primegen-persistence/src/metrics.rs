//! ---
//! pg_section: "03-persistence-logging"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Prometheus metrics for prime store activity."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::sync::Arc;

use prometheus::{self, Histogram, HistogramOpts, IntCounter, Opts, Registry};

use crate::Result;

/// Metrics published by the prime store.
#[derive(Clone)]
pub struct StoreMetrics {
    primes_appended: IntCounter,
    bytes_appended: IntCounter,
    malformed_lines: IntCounter,
    load_duration: Histogram,
}

impl StoreMetrics {
    /// Register all store metrics with the provided registry.
    pub fn new(registry: Arc<Registry>) -> Result<Self> {
        let primes_appended = IntCounter::with_opts(Opts::new(
            "primegen_primes_appended_total",
            "Total number of primes durably appended to the store",
        ))?;
        registry.register(Box::new(primes_appended.clone()))?;

        let bytes_appended = IntCounter::with_opts(Opts::new(
            "primegen_store_bytes_appended_total",
            "Total bytes appended to the prime store",
        ))?;
        registry.register(Box::new(bytes_appended.clone()))?;

        let malformed_lines = IntCounter::with_opts(Opts::new(
            "primegen_store_malformed_lines_total",
            "Blank or malformed store lines skipped while loading",
        ))?;
        registry.register(Box::new(malformed_lines.clone()))?;

        let load_duration = Histogram::with_opts(
            HistogramOpts::new(
                "primegen_store_load_seconds",
                "Time spent reading the prime store",
            )
            .buckets(prometheus::exponential_buckets(0.001, 2.0, 12)?),
        )?;
        registry.register(Box::new(load_duration.clone()))?;

        Ok(Self {
            primes_appended,
            bytes_appended,
            malformed_lines,
            load_duration,
        })
    }

    /// Record a completed load.
    pub fn record_load(&self, skipped_lines: usize, seconds: f64) {
        self.malformed_lines.inc_by(skipped_lines as u64);
        self.load_duration.observe(seconds);
    }

    /// Record a committed append.
    pub fn record_append(&self, primes: usize, bytes: usize) {
        self.primes_appended.inc_by(primes as u64);
        self.bytes_appended.inc_by(bytes as u64);
    }
}

impl std::fmt::Debug for StoreMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreMetrics").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_fails() {
        let registry = Arc::new(Registry::new());
        StoreMetrics::new(registry.clone()).unwrap();
        assert!(StoreMetrics::new(registry).is_err());
    }
}
