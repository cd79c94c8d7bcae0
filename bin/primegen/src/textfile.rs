//! ---
//! pg_section: "05-external-interfaces"
//! pg_subsection: "binary"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Prometheus textfile export for scheduled runs."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use prometheus::{Registry, TextEncoder};
use tracing::debug;

/// Write the registry in text exposition format, replacing `path` atomically
/// so a collector never reads a half-written file.
pub fn write(registry: &Registry, path: &Path) -> Result<()> {
    let body = TextEncoder::new()
        .encode_to_string(&registry.gather())
        .context("failed to encode metrics")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("unable to create metrics directory {}", parent.display())
            })?;
        }
    }

    let mut staging = path.as_os_str().to_os_string();
    staging.push(".tmp");
    fs::write(&staging, body)
        .with_context(|| format!("unable to write metrics to {}", path.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("unable to move metrics into {}", path.display()))?;
    debug!(metrics_path = %path.display(), "metrics textfile written");
    Ok(())
}
