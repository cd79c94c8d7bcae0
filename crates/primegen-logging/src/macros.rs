//! ---
//! pg_section: "03-persistence-logging"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Run-scoped structured logging macros."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
/// Emit an informational log enriched with run context.
#[macro_export]
macro_rules! pg_info {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::INFO,
            service = $crate::SERVICE,
            store = ctx.store.unwrap_or(""),
            window_start = ctx.window_start.unwrap_or_default(),
            window_end = ctx.window_end.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::INFO,
            service = $crate::SERVICE,
            store = ctx.store.unwrap_or(""),
            window_start = ctx.window_start.unwrap_or_default(),
            window_end = ctx.window_end.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit a debug log enriched with run context.
#[macro_export]
macro_rules! pg_debug {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::DEBUG,
            service = $crate::SERVICE,
            store = ctx.store.unwrap_or(""),
            window_start = ctx.window_start.unwrap_or_default(),
            window_end = ctx.window_end.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::DEBUG,
            service = $crate::SERVICE,
            store = ctx.store.unwrap_or(""),
            window_start = ctx.window_start.unwrap_or_default(),
            window_end = ctx.window_end.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}
