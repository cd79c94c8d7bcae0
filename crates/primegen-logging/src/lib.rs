//! ---
//! pg_section: "03-persistence-logging"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Run-scoped structured logging helpers."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Structured logging for prime generation runs.
//!
//! Every event carries the `prime-generator` service tag together with
//! whatever [`LogContext`] the caller knows: the store path, the candidate
//! window, and the run phase.

use tracing::Level;

pub mod macros;

/// Service tag attached to every run event.
pub const SERVICE: &str = "prime-generator";

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Store path the run operates on.
    pub store: Option<&'a str>,
    /// First candidate of the window being scanned.
    pub window_start: Option<u64>,
    /// Last candidate (inclusive) of the window being scanned.
    pub window_end: Option<u64>,
    /// Run phase (`loading`, `scanning`, `appending`, ...).
    pub phase: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the store path.
    pub fn with_store(mut self, store: &'a str) -> Self {
        self.store = Some(store);
        self
    }

    /// Attach inclusive window bounds.
    pub fn with_window(mut self, start: u64, end: u64) -> Self {
        self.window_start = Some(start);
        self.window_end = Some(end);
        self
    }

    /// Attach a run phase.
    pub fn with_phase(mut self, phase: &'a str) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// High-level outcome used when emitting run lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEventOutcome {
    /// The step completed.
    Success,
    /// The step failed and the run aborts.
    Fault,
}

impl RunEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            RunEventOutcome::Success => "success",
            RunEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized run event with a success/fault outcome.
pub fn log_run_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: RunEventOutcome,
) {
    let default_ctx = LogContext::default();
    let ctx = context.unwrap_or(&default_ctx);
    // `tracing::event!` needs a constant level.
    match outcome {
        RunEventOutcome::Success => tracing::event!(
            Level::INFO,
            service = SERVICE,
            event,
            outcome = outcome.as_str(),
            store = ctx.store.unwrap_or(""),
            window_start = ctx.window_start.unwrap_or_default(),
            window_end = ctx.window_end.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %message
        ),
        RunEventOutcome::Fault => tracing::event!(
            Level::ERROR,
            service = SERVICE,
            event,
            outcome = outcome.as_str(),
            store = ctx.store.unwrap_or(""),
            window_start = ctx.window_start.unwrap_or_default(),
            window_end = ctx.window_end.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %message
        ),
    }
}
