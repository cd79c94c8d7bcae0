//! ---
//! pg_section: "01-core-functionality"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Configuration model and loading for prime generation runs."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

/// Default location of the prime list, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "primes.txt";
/// Default number of candidates examined per run.
pub const DEFAULT_STEP_SIZE: u64 = 100_000;
/// Config file looked up in the working directory when nothing else is named.
pub const DEFAULT_CONFIG_FILE: &str = "primegen.toml";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_true() -> bool {
    true
}

fn default_step_size() -> u64 {
    DEFAULT_STEP_SIZE
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for a prime generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
///
/// `source` is `None` when no file was found and built-in defaults apply.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "PRIMEGEN_CONFIG";

    /// Load configuration, respecting the `PRIMEGEN_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        let env_override = std::env::var(Self::ENV_CONFIG_PATH)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self::resolve(env_override, candidates)
    }

    fn resolve<P: AsRef<Path>>(
        env_override: Option<PathBuf>,
        candidates: &[P],
    ) -> Result<LoadedAppConfig> {
        if let Some(path) = env_override {
            let config = Self::from_path(&path)?;
            return Ok(LoadedAppConfig {
                config,
                source: Some(path),
            });
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_path(path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(LoadedAppConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Read and validate a single configuration file. A missing file is an error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.generator.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Where and how the prime list is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Reject stores whose values are not strictly increasing.
    #[serde(default = "default_true")]
    pub validate_order: bool,
    /// Hold an exclusive advisory lock on `<path>.lock` for the whole run.
    #[serde(default = "default_true")]
    pub lock: bool,
    /// `fsync` the store after every append.
    #[serde(default = "default_true")]
    pub sync: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            validate_order: true,
            lock: true,
            sync: true,
        }
    }
}

impl StoreConfig {
    /// Sidecar file used for run serialisation.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(anyhow!("store path cannot be empty"));
        }
        if self.path.file_name().is_none() {
            return Err(anyhow!(
                "store path {} must name a file",
                self.path.display()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    #[serde(default = "default_step_size")]
    pub step_size: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            step_size: default_step_size(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.step_size == 0 {
            return Err(anyhow!("generator step_size must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directory for daily-rolling JSON log files; stderr only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Write Prometheus text exposition here after each run.
    #[serde(default)]
    pub textfile: Option<PathBuf>,
}
