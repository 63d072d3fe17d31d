//! Errors raised while producing levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Piece the generator was placing when it gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementKind {
    /// Goal cells.
    Pot,
    /// Interior blockers.
    Obstacle,
    /// The ghost's start cell.
    Ghost,
}

impl fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pot => "pots",
            Self::Obstacle => "obstacles",
            Self::Ghost => "the ghost",
        };
        f.write_str(label)
    }
}

/// Unsatisfiable level parameters.
///
/// Returned instead of looping forever when the grid cannot hold the pieces a
/// level asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum GenerationError {
    /// The grid region reserved for the piece is smaller than the requested count.
    #[error("level {level}: cannot place {requested} {kind}, only {available} cells available")]
    InsufficientCells {
        /// Level being generated.
        level: u32,
        /// Piece being placed.
        kind: PlacementKind,
        /// Number of pieces requested.
        requested: u32,
        /// Number of free cells the piece may use.
        available: u64,
    },
    /// Rejection sampling did not find a free cell within the attempt cap.
    #[error("level {level}: gave up placing {kind} after {attempts} attempts")]
    AttemptsExhausted {
        /// Level being generated.
        level: u32,
        /// Piece being placed.
        kind: PlacementKind,
        /// Samples drawn before giving up.
        attempts: u32,
    },
}

impl GenerationError {
    /// Level number whose generation failed.
    #[must_use]
    pub const fn level(&self) -> u32 {
        match self {
            Self::InsufficientCells { level, .. } | Self::AttemptsExhausted { level, .. } => *level,
        }
    }
}
