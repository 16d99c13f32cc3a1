//! Error types for matmul-loops

use std::borrow::Cow;
use thiserror::Error;

/// Result type alias using the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before any timed or arithmetic work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operand shapes are incompatible
    #[error("dimension mismatch in {op}: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Operation that rejected the operands
        op: &'static str,
        /// Shape the operation required
        expected: (usize, usize),
        /// Shape it was given
        got: (usize, usize),
    },

    /// Benchmark configuration cannot be run
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with it
        reason: Cow<'static, str>,
    },
}

impl Error {
    pub(crate) fn mismatch(op: &'static str, expected: (usize, usize), got: (usize, usize)) -> Self {
        Error::DimensionMismatch { op, expected, got }
    }

    pub(crate) fn config(reason: impl Into<Cow<'static, str>>) -> Self {
        Error::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
