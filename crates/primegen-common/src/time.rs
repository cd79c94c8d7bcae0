//! ---
//! pg_section: "01-core-functionality"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Wall-clock helpers for run timing."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::time::{Duration, Instant};

/// Capture an instant suitable for elapsed-time measurement.
pub fn monotonic_now() -> Instant {
    Instant::now()
}

/// Seconds rounded to millisecond precision, as shown in run reports.
pub fn seconds_rounded(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 1_000.0).round() / 1_000.0
}
