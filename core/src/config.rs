//! Session configuration shared by the world, the systems and the adapters.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, TOTAL_LEVELS};

/// Tunables that shape a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid columns of every level.
    pub columns: u32,
    /// Number of grid rows of every level.
    pub rows: u32,
    /// Number of levels that must be completed before the game is over.
    pub total_levels: u32,
    /// Ghost behaviour knobs.
    pub ghost_ai: GhostAiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
            total_levels: TOTAL_LEVELS,
            ghost_ai: GhostAiConfig::default(),
        }
    }
}

/// Ghost behaviour knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostAiConfig {
    /// Number of turns the ghost is meant to look ahead.
    ///
    /// Accepted for compatibility but currently inert: the ghost always plans
    /// exactly one step.
    pub pathfinding_depth: u32,
}

impl Default for GhostAiConfig {
    fn default() -> Self {
        Self {
            pathfinding_depth: 3,
        }
    }
}
