// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type shared by all geometry constructors and queries.

use thiserror::Error;

/// Errors emitted by geometry operations.
///
/// Every variant carries a static description of the violated precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeomError {
    /// A numeric input (or the result of arithmetic on valid inputs) was not
    /// finite, or a structural argument had the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The operation needs a non-zero vector or line direction.
    #[error("degenerate state: {0}")]
    DegenerateState(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = GeomError> = core::result::Result<T, E>;

impl GeomError {
    /// Builds an [`GeomError::InvalidArgument`], reporting it at severe level first.
    pub(crate) fn invalid(op: &'static str, reason: &'static str) -> Self {
        tracing::error!(op, reason, "{op}: invalid argument");
        Self::InvalidArgument(reason)
    }

    /// Builds a [`GeomError::DegenerateState`], reporting it at severe level first.
    pub(crate) fn degenerate(op: &'static str, reason: &'static str) -> Self {
        tracing::error!(op, reason, "{op}: degenerate state");
        Self::DegenerateState(reason)
    }
}
