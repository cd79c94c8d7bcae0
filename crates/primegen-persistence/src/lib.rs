//! ---
//! pg_section: "03-persistence-logging"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Append-only prime list persistence."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Durable storage for the prime list.
//!
//! The store is a plain text file with one decimal prime per line. It is
//! only ever appended to; readers skip blank and malformed lines.

use std::path::PathBuf;

/// Result alias used throughout the persistence crate.
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Error type for the persistence subsystem.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The store exists but could not be read.
    #[error("unable to read prime store {}: {source}", path.display())]
    Access {
        /// Store or lock file that failed.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Appending to the store failed; the run's primes are not committed.
    #[error("unable to append to prime store {}: {source}", path.display())]
    Write {
        /// Store file that failed.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Another run currently holds the store lock.
    #[error("prime store {} is locked by another run", path.display())]
    Locked {
        /// Lock file that is held elsewhere.
        path: PathBuf,
    },
    /// A stored value is not greater than the one before it.
    #[error("prime store line {line}: value {value} does not follow {previous}")]
    OutOfOrder {
        /// 1-based line number of the offending value.
        line: usize,
        /// Last accepted value.
        previous: u64,
        /// Offending value.
        value: u64,
    },
    /// A numeric line does not fit in the supported integer range.
    #[error("prime store line {line}: value exceeds u64 range")]
    ValueOutOfRange {
        /// 1-based line number of the offending value.
        line: usize,
    },
    /// An append batch was not strictly increasing.
    #[error("append batch is not strictly increasing at index {index}")]
    UnorderedBatch {
        /// Index of the first value not greater than its predecessor.
        index: usize,
    },
    /// Wrapper for Prometheus metrics registration failures.
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

pub mod lock;
pub mod metrics;
pub mod store;

pub use lock::StoreLock;
pub use metrics::StoreMetrics;
pub use store::{AppendReceipt, LoadReport, PrimeStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_problem() {
        let err = PersistenceError::OutOfOrder {
            line: 4,
            previous: 7,
            value: 5,
        };
        assert_eq!(
            format!("{err}"),
            "prime store line 4: value 5 does not follow 7"
        );

        let err = PersistenceError::Locked {
            path: PathBuf::from("primes.txt.lock"),
        };
        assert_eq!(
            format!("{err}"),
            "prime store primes.txt.lock is locked by another run"
        );
    }
}
