//! ---
//! pg_section: "01-core-functionality"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Shared primitives and utilities for prime generation."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
//! Shared primitives for the primegen workspace.
//! This crate exposes configuration loading, tracing initialisation, and
//! timing helpers consumed by the store, the generator, and the CLI.

pub mod config;
pub mod logging;
pub mod time;

pub use config::{
    AppConfig, GeneratorConfig, LoadedAppConfig, LoggingConfig, MetricsConfig, StoreConfig,
    DEFAULT_CONFIG_FILE, DEFAULT_STEP_SIZE, DEFAULT_STORE_PATH,
};
pub use logging::{init_tracing, LogFormat, TracingGuard};
