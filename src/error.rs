//! Error taxonomy for the merge engine and its session orchestration.
//!
//! Only [`EngineError::InvariantViolation`] is a genuine failure. The remaining variants describe
//! routine conditions that the session reports back to the caller as no-op results.

use thiserror::Error;

use crate::tile::Coordinate;

/// Errors raised by the core game components.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A snapshot broke the grid invariants.
    ///
    /// This variant is raised when two visible tiles claim the same cell or a tile lies outside of
    /// the grid. It is a programmer error and never occurs for snapshots produced by the engine.
    #[error("invariant violation at {coordinate}: {reason}")]
    InvariantViolation {
        /// Cell at which the violation was detected.
        coordinate: Coordinate,
        /// Human-readable description of the broken invariant.
        reason: &'static str,
    },
    /// The spawn policy was asked to place a tile on a full grid.
    #[error("no empty cell available to spawn a tile")]
    NoEmptyCellAvailable,
    /// The history cursor already points at the oldest snapshot.
    #[error("nothing to undo")]
    CannotUndo,
    /// The history cursor already points at the newest snapshot.
    #[error("nothing to redo")]
    CannotRedo,
    /// A direction symbol outside of the four cardinal moves was received.
    #[error("illegal direction `{0}`")]
    IllegalDirection(String),
    /// Session construction parameters were rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Builds an [`EngineError::InvariantViolation`] for the given cell.
    pub(crate) const fn invariant(coordinate: Coordinate, reason: &'static str) -> Self {
        Self::InvariantViolation { coordinate, reason }
    }
}
