//! ---
//! pg_section: "03-persistence-logging"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Exclusive advisory lock serialising runs against one store."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::{PersistenceError, Result};

/// Guard for the store's run lock. The lock is released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    file: Option<File>,
}

impl StoreLock {
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let access = |source: io::Error| PersistenceError::Access {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(access)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(access)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!(lock = %path.display(), "store lock acquired");
                Ok(Self {
                    path: path.to_path_buf(),
                    file: Some(file),
                })
            }
            Err(err) if is_contended(&err) => Err(PersistenceError::Locked {
                path: path.to_path_buf(),
            }),
            Err(err) => Err(access(err)),
        }
    }

    pub(crate) fn disabled(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file: None,
        }
    }

    /// Whether this guard actually holds an OS lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Lock file backing this guard.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            // Closing the handle releases the lock as well.
            let _ = FileExt::unlock(&file);
            debug!(lock = %self.path.display(), "store lock released");
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
