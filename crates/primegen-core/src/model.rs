//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Prime list and candidate window types."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::{GeneratorError, Result};

/// First candidate examined when no primes are known.
pub const FIRST_CANDIDATE: u64 = 2;

/// Ordered, strictly increasing list of known primes.
///
/// Only grows at the end. Values coming from the store are trusted to be
/// ordered; the store validates that on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimeList(Vec<u64>);

impl PrimeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest known prime, the point the next window starts after.
    pub fn checkpoint(&self) -> Option<u64> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }

    /// Append `more`, which must continue the list in strictly increasing order.
    ///
    /// Nothing is appended when the check fails.
    pub fn extend_checked(&mut self, more: &[u64]) -> Result<()> {
        let mut last = self.checkpoint();
        for &value in more {
            if let Some(last) = last.filter(|last| value <= *last) {
                return Err(GeneratorError::NotIncreasing { last, value });
            }
            last = Some(value);
        }
        self.0.extend_from_slice(more);
        Ok(())
    }
}

impl From<Vec<u64>> for PrimeList {
    fn from(values: Vec<u64>) -> Self {
        Self(values)
    }
}

impl AsRef<[u64]> for PrimeList {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a PrimeList {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Inclusive range of candidates examined in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateWindow {
    start: u64,
    end: u64,
}

impl CandidateWindow {
    /// Window of `step_size` candidates beginning right after `checkpoint`,
    /// or at 2 when nothing is known yet.
    pub fn after(checkpoint: Option<u64>, step_size: u64) -> Result<Self> {
        if step_size == 0 {
            return Err(GeneratorError::InvalidStepSize);
        }
        let overflow = || GeneratorError::WindowOverflow {
            from: checkpoint.unwrap_or(FIRST_CANDIDATE - 1),
            step_size,
        };
        let start = match checkpoint {
            Some(last) => last.checked_add(1).ok_or_else(overflow)?,
            None => FIRST_CANDIDATE,
        };
        let end = start.checked_add(step_size - 1).ok_or_else(overflow)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of candidates in the window.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, n: u64) -> bool {
        (self.start..=self.end).contains(&n)
    }

    pub fn candidates(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl IntoIterator for CandidateWindow {
    type Item = u64;
    type IntoIter = RangeInclusive<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates()
    }
}

impl std::fmt::Display for CandidateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
