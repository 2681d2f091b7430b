#![forbid(unsafe_code)]

//! Engine errors.

use std::collections::TryReserveError;
use std::fmt;

/// Errors raised while building a field, a scale set, or an engine.
///
/// Once an engine exists, stepping and randomizing cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Width or height is zero.
    ZeroDimension { width: usize, height: usize },
    /// `width * height` does not fit in `usize`.
    DimensionOverflow { width: usize, height: usize },
    /// Supplied values do not match `width * height`.
    LengthMismatch { expected: usize, actual: usize },
    /// Supplied value at `index` is NaN or infinite.
    NonFiniteValue { index: usize },
    /// A field or scratch buffer of `len` elements could not be allocated.
    Allocation { len: usize, source: TryReserveError },
    /// Scale at `index` cannot drive the simulation.
    InvalidScale { index: usize, reason: &'static str },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "field dimensions must be non-zero (got {width}x{height})")
            }
            Self::DimensionOverflow { width, height } => {
                write!(f, "field dimensions {width}x{height} overflow usize")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} field values, got {actual}")
            }
            Self::NonFiniteValue { index } => {
                write!(f, "field value #{index} is not finite")
            }
            Self::Allocation { len, source } => {
                write!(f, "failed to allocate {len} field elements: {source}")
            }
            Self::InvalidScale { index, reason } => {
                write!(f, "invalid scale #{index}: {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation { source, .. } => Some(source),
            _ => None,
        }
    }
}
