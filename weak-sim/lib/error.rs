//! Failure modes of the numerical stages.

use thiserror::Error;

/// Errors raised by the numerical pipeline.
///
/// None of these are recoverable where they occur: the orchestrator surfaces
/// the error and halts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A parameter is outside its valid range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Arrays that must be aligned index-for-index have different lengths.
    #[error("length mismatch in {context}: expected {expected}, got {found}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// The interaction branch token is not one of the accepted values.
    #[error("invalid branch selector {0:?}: expected one of \"H\", \"h\", \"V\", \"v\", \"0\"")]
    InvalidBranchSelector(String),

    /// A normalization denominator vanished.
    #[error("degenerate state: {0}")]
    DegenerateState(&'static str),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid<R>(name: &'static str, reason: R) -> Self
    where R: Into<String>
    {
        Self::InvalidArgument { name, reason: reason.into() }
    }

    /// Fail unless `x` is finite and strictly positive.
    pub(crate) fn check_positive(name: &'static str, x: f64)
        -> Result<f64, Self>
    {
        if x.is_finite() && x > 0.0 {
            Ok(x)
        } else {
            Err(Self::invalid(name, format!("must be finite and > 0; got {x}")))
        }
    }

    /// Fail unless `x` is finite.
    pub(crate) fn check_finite(name: &'static str, x: f64)
        -> Result<f64, Self>
    {
        if x.is_finite() {
            Ok(x)
        } else {
            Err(Self::invalid(name, format!("must be finite; got {x}")))
        }
    }

    pub(crate) fn check_len(
        context: &'static str,
        expected: usize,
        found: usize,
    ) -> Result<(), Self>
    {
        if expected == found {
            Ok(())
        } else {
            Err(Self::LengthMismatch { context, expected, found })
        }
    }
}
