//! Batching and the single-name fallback.
//!
//! Names are passed to MAME in batches to keep argument lists bounded and
//! to give progress something to count. Old MAME versions cannot handle
//! several names per invocation: `-verifyroms` then reports nothing and
//! `-listxml` emits XML that does not parse. A pass that hits either
//! condition asks to be rerun one name at a time.

use std::fmt;

use mamecat_core::{BuildPhase, CatalogError};

/// Names per invocation unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Why a pass wants to be rerun with single-name batches.
#[derive(Debug)]
pub enum RetryReason {
    /// Verification found no good sets at all.
    EmptyVerificationResult,
    /// Tool output did not parse.
    MalformedToolOutput(String),
}

impl RetryReason {
    /// The error reported when the single-name rerun fails the same way.
    pub fn into_error(self) -> CatalogError {
        match self {
            Self::EmptyVerificationResult => CatalogError::EmptyVerificationResult,
            Self::MalformedToolOutput(msg) => CatalogError::MalformedToolOutput(msg),
        }
    }
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVerificationResult => write!(f, "no ROM sets verified"),
            Self::MalformedToolOutput(msg) => write!(f, "malformed output ({msg})"),
        }
    }
}

/// Result of one pass over all batches of a phase.
#[derive(Debug)]
pub enum BatchOutcome<T> {
    Success(T),
    RetryAtSmallerBatch(RetryReason),
    Fatal(CatalogError),
}

impl<T> BatchOutcome<T> {
    /// Malformed output asks for a retry; any other error is fatal.
    pub fn from_result(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(CatalogError::MalformedToolOutput(msg)) => {
                Self::RetryAtSmallerBatch(RetryReason::MalformedToolOutput(msg))
            }
            Err(e) => Self::Fatal(e),
        }
    }
}

/// Run `pass` with `batch_size`, rerunning it once with a batch size of 1
/// if it asks for a retry. A retry request from the single-name pass, or
/// from a first pass that already used single names, becomes an error.
pub fn run_with_fallback<T>(
    phase: BuildPhase,
    batch_size: usize,
    mut pass: impl FnMut(usize) -> BatchOutcome<T>,
) -> Result<T, CatalogError> {
    let batch_size = batch_size.max(1);
    match pass(batch_size) {
        BatchOutcome::Success(value) => Ok(value),
        BatchOutcome::Fatal(e) => Err(e),
        BatchOutcome::RetryAtSmallerBatch(reason) if batch_size > 1 => {
            log::warn!(
                "MAME {} pass failed: {}; retrying one ROM at a time",
                phase.name(),
                reason
            );
            match pass(1) {
                BatchOutcome::Success(value) => Ok(value),
                BatchOutcome::Fatal(e) => Err(e),
                BatchOutcome::RetryAtSmallerBatch(reason) => Err(reason.into_error()),
            }
        }
        BatchOutcome::RetryAtSmallerBatch(reason) => Err(reason.into_error()),
    }
}

/// Argument vector for `flag` followed by every name in `batch`.
pub(crate) fn tool_args(flag: &str, batch: &[String]) -> Vec<String> {
    let mut args = Vec::with_capacity(batch.len() + 1);
    args.push(flag.to_string());
    args.extend(batch.iter().cloned());
    args
}

#[cfg(test)]
#[path = "tests/batch_tests.rs"]
mod tests;
