//! Error taxonomy for forest sampling.
//!
//! Sampling has no partial-failure or retry concept. Either the parameters
//! are rejected up front ([`RsfError::InvalidParameter`]) or a walk blows
//! through its step budget ([`RsfError::UnreachableState`]). Retrying the
//! latter with the same seed reproduces the same failure, so callers should
//! fix the input instead.

use thiserror::Error;

/// Errors surfaced by grid construction and forest sampling.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RsfError {
    /// A parameter was rejected before any walk was attempted.
    ///
    /// Raised for a killing probability outside `[0, 1)`, zero grid
    /// dimensions, grids too large for `u32` vertex ids, a zero step budget,
    /// or `q = 0` on a topology that is not connected.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// A walk did not terminate within its step budget.
    ///
    /// The forest is left exactly as it was before the failing walk started.
    #[error("walk from vertex {start} did not terminate after {steps} steps")]
    UnreachableState {
        /// Vertex the failing walk started from.
        start: u32,
        /// Number of neighbor draws performed before giving up.
        steps: u64,
    },
}

impl RsfError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        RsfError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
