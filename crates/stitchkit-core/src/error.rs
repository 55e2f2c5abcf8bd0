//! Error handling for Stitchkit
//!
//! Provides the engine-wide error type. Every failure is recoverable:
//! invalid requests come back as typed errors and the caller decides
//! any user-visible messaging.
//!
//! Uses `thiserror` for ergonomic error handling.

use crate::id::{AnchorId, LayerId, PathId};
use thiserror::Error;

/// Vector engine error type
///
/// Covers lookup failures, operations that violate a documented
/// invariant, and state-machine misuse (calling a Drawing-only
/// operation while Idle and the like).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorError {
    /// Referenced layer does not exist
    #[error("Layer {id} not found")]
    LayerNotFound {
        /// The missing layer id.
        id: LayerId,
    },

    /// Referenced path does not exist
    #[error("Path {id} not found")]
    PathNotFound {
        /// The missing path id.
        id: PathId,
    },

    /// Referenced anchor does not exist
    #[error("Anchor {id} not found")]
    AnchorNotFound {
        /// The missing anchor id.
        id: AnchorId,
    },

    /// Operation would violate a documented invariant
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// Why the operation was rejected.
        reason: String,
    },

    /// Operation called from the wrong state-machine state
    #[error("Invalid state transition from {current} to {requested}")]
    StateConflict {
        /// The current state name.
        current: String,
        /// The requested state name.
        requested: String,
    },
}

impl VectorError {
    /// Create an `InvalidOperation` error from a message.
    pub fn invalid(reason: impl Into<String>) -> Self {
        VectorError::InvalidOperation {
            reason: reason.into(),
        }
    }

    /// Create a `StateConflict` error from state names.
    pub fn state_conflict(current: impl Into<String>, requested: impl Into<String>) -> Self {
        VectorError::StateConflict {
            current: current.into(),
            requested: requested.into(),
        }
    }

    /// Check if this is a lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VectorError::LayerNotFound { .. }
                | VectorError::PathNotFound { .. }
                | VectorError::AnchorNotFound { .. }
        )
    }
}

/// Result type using VectorError
pub type Result<T> = std::result::Result<T, VectorError>;
