//! ---
//! pg_section: "03-persistence-logging"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Append-only prime list persistence."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use primegen_common::config::StoreConfig;
use tracing::{debug, warn};

use crate::lock::StoreLock;
use crate::metrics::StoreMetrics;
use crate::{PersistenceError, Result};

/// Primes read from the store plus bookkeeping about skipped lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Accepted values in file order.
    pub primes: Vec<u64>,
    /// Blank or malformed lines that were ignored.
    pub skipped_lines: usize,
}

/// Outcome of a committed append.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendReceipt {
    /// Number of values written.
    pub written: usize,
    /// Bytes added to the store, newlines included.
    pub bytes: usize,
}

/// Append-only text store holding one prime per line.
#[derive(Debug, Clone)]
pub struct PrimeStore {
    path: PathBuf,
    lock_path: PathBuf,
    validate_order: bool,
    locking: bool,
    sync: bool,
    metrics: Option<StoreMetrics>,
}

impl PrimeStore {
    /// Build a store from configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.path.clone(),
            lock_path: config.lock_path(),
            validate_order: config.validate_order,
            locking: config.lock,
            sync: config.sync,
            metrics: None,
        }
    }

    /// Build a store at `path` with default settings.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(&StoreConfig {
            path: path.into(),
            ..StoreConfig::default()
        })
    }

    /// Record load and append activity in `metrics`.
    pub fn with_metrics(mut self, metrics: StoreMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Location of the store on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the lock sidecar.
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Take the exclusive run lock. Fails immediately if another run holds it.
    ///
    /// With locking disabled the returned guard is inert.
    pub fn lock(&self) -> Result<StoreLock> {
        if self.locking {
            StoreLock::acquire(&self.lock_path)
        } else {
            Ok(StoreLock::disabled(&self.lock_path))
        }
    }

    /// Read every accepted prime in file order.
    ///
    /// A missing store is a fresh start and yields an empty list.
    pub fn load(&self) -> Result<Vec<u64>> {
        Ok(self.load_report()?.primes)
    }

    /// Like [`PrimeStore::load`], also reporting how many lines were skipped.
    pub fn load_report(&self) -> Result<LoadReport> {
        let started = Instant::now();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(store = %self.path.display(), "prime store absent, starting fresh");
                return Ok(LoadReport::default());
            }
            Err(source) => return Err(self.access_error(source)),
        };

        let report = self.parse(BufReader::new(file))?;
        if let Some(metrics) = &self.metrics {
            metrics.record_load(report.skipped_lines, started.elapsed().as_secs_f64());
        }
        debug!(
            store = %self.path.display(),
            primes = report.primes.len(),
            skipped = report.skipped_lines,
            "prime store loaded"
        );
        Ok(report)
    }

    fn parse<R: BufRead>(&self, reader: R) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut previous: Option<u64> = None;

        for (index, raw) in reader.split(b'\n').enumerate() {
            let raw = raw.map_err(|source| self.access_error(source))?;
            let line = index + 1;
            let trimmed = raw.trim_ascii();
            if trimmed.is_empty() || !trimmed.iter().all(u8::is_ascii_digit) {
                if !trimmed.is_empty() {
                    debug!(store = %self.path.display(), line, "skipping malformed line");
                }
                report.skipped_lines += 1;
                continue;
            }

            let value = std::str::from_utf8(trimmed)
                .ok()
                .and_then(|digits| digits.parse::<u64>().ok())
                .ok_or(PersistenceError::ValueOutOfRange { line })?;

            if self.validate_order {
                if let Some(previous) = previous.filter(|previous| value <= *previous) {
                    return Err(PersistenceError::OutOfOrder {
                        line,
                        previous,
                        value,
                    });
                }
            }
            previous = Some(value);
            report.primes.push(value);
        }

        Ok(report)
    }

    /// Append `primes` to the end of the store, one decimal value per line.
    ///
    /// Existing content is never rewritten. The batch must be strictly
    /// increasing. An empty batch is a no-op and does not create the file.
    /// A store whose last line lacks a newline, such as one left by a torn
    /// write, is terminated first so the batch starts on a fresh line.
    pub fn append(&self, primes: &[u64]) -> Result<AppendReceipt> {
        if primes.is_empty() {
            return Ok(AppendReceipt::default());
        }
        if let Some(index) = primes.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(PersistenceError::UnorderedBatch { index: index + 1 });
        }

        let mut buffer = String::with_capacity(primes.len() * 8);
        for prime in primes {
            // Writing into a String cannot fail.
            let _ = writeln!(buffer, "{prime}");
        }

        let bytes = match self.write_all(buffer.as_bytes()) {
            Ok(bytes) => bytes,
            Err(source) => {
                warn!(store = %self.path.display(), error = %source, "append failed");
                return Err(PersistenceError::Write {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let receipt = AppendReceipt {
            written: primes.len(),
            bytes,
        };
        if let Some(metrics) = &self.metrics {
            metrics.record_append(receipt.written, receipt.bytes);
        }
        debug!(
            store = %self.path.display(),
            written = receipt.written,
            bytes = receipt.bytes,
            "appended primes"
        );
        Ok(receipt)
    }

    fn write_all(&self, bytes: &[u8]) -> io::Result<usize> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let mut written = 0;
        if has_unterminated_tail(&mut file)? {
            debug!(store = %self.path.display(), "terminating unfinished last line");
            file.write_all(b"\n")?;
            written += 1;
        }
        file.write_all(bytes)?;
        file.flush()?;
        if self.sync {
            file.sync_data()?;
        }
        Ok(written + bytes.len())
    }

    fn access_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Access {
            path: self.path.clone(),
            source,
        }
    }
}

/// True when the file is non-empty and its last byte is not a newline.
fn has_unterminated_tail(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
