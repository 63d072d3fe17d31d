#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ghost Catcher engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intents, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! views such as [`GridView`], and respond exclusively with new command batches.

mod config;
mod difficulty;
mod error;

use serde::{Deserialize, Serialize};

pub use config::{GameConfig, GhostAiConfig};
pub use difficulty::{DifficultyTier, LevelParameters};
pub use error::{GenerationError, PlacementKind};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Ghost Catcher.";

/// Number of grid columns used when no configuration overrides it.
pub const DEFAULT_GRID_COLUMNS: u32 = 20;

/// Number of grid rows used when no configuration overrides it.
pub const DEFAULT_GRID_ROWS: u32 = 22;

/// Number of levels in a full campaign.
pub const TOTAL_LEVELS: u32 = 99;

/// Discrete states of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen; no level is being played.
    #[default]
    Menu,
    /// A level is active and accepts talisman placements.
    Playing,
    /// The ghost reached a pot; waiting for the player to advance.
    LevelComplete,
    /// The ghost escaped or the talisman budget ran out; waiting for a retry.
    LevelFailed,
    /// Every level of the campaign has been completed.
    GameOver,
    /// Play is suspended; placements are ignored until resumed.
    Paused,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Leaves the menu and requests the first level.
    StartGame,
    /// Places a talisman on the provided cell of the active level.
    PlaceTalisman {
        /// Cell that should receive the talisman.
        position: Position,
    },
    /// Suspends an active level.
    Pause,
    /// Resumes a paused level.
    Resume,
    /// Requests a fresh layout of a failed level.
    RetryLevel,
    /// Requests a fresh layout of the current level from any state.
    ResetLevel,
    /// Moves on from a completed level.
    AdvanceLevel,
    /// Returns to the menu from any state.
    ReturnToMenu,
    /// Installs a generated level, replacing the previous one wholesale.
    LoadLevel {
        /// Layout produced by the level generator.
        layout: LevelLayout,
    },
    /// Resolves the ghost's turn after a talisman placement.
    StepGhost {
        /// Cell the ghost moves to, or `None` when it has no legal move.
        destination: Option<Position>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Announces that the session entered a new state.
    StateChanged {
        /// State that was active before the transition.
        from: GameState,
        /// State that is active after the transition.
        to: GameState,
    },
    /// Asks the level generator for a layout.
    LevelRequested {
        /// Level number that should be generated.
        level: u32,
        /// Zero-based index of this load of the level within the session.
        attempt: u32,
    },
    /// Confirms that a generated level was installed.
    LevelLoaded {
        /// Level number that became active.
        level: u32,
        /// Attempt index of the installed layout.
        attempt: u32,
        /// Talisman budget of the level.
        max_talismans: u32,
    },
    /// Confirms that a talisman was placed and the ghost now owes a move.
    TalismanPlaced {
        /// Cell that received the talisman.
        position: Position,
        /// Talismans placed in the current attempt, including this one.
        talismans_used: u32,
    },
    /// Confirms that the ghost moved a single step.
    GhostMoved {
        /// Cell the ghost occupied before moving.
        from: Position,
        /// Cell the ghost occupies after moving.
        to: Position,
    },
    /// Reports that the ghost had no legal move and stayed in place.
    GhostTrapped {
        /// Cell the ghost remains on.
        at: Position,
    },
    /// Reports that the ghost reached a pot.
    LevelCompleted {
        /// Level number that was completed.
        level: u32,
        /// Points awarded for the unused talisman budget.
        awarded: u32,
        /// Cumulative score after the award.
        score: u32,
    },
    /// Reports that the level was lost.
    LevelFailed {
        /// Level number that was lost.
        level: u32,
        /// Condition that ended the level.
        reason: FailureReason,
    },
}

/// Conditions that end a level in failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// The ghost left the grid. The movement rule never proposes such a step,
    /// so this outcome is only reachable through a hand-crafted command.
    Escaped,
    /// Every talisman of the level budget was spent without a capture.
    BudgetExhausted,
}

/// Location of a single grid cell expressed as signed column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    column: i32,
    row: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column of the position; zero is the left edge.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row of the position; zero is the top edge.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.column
            .abs_diff(other.column)
            .saturating_add(self.row.abs_diff(other.row))
    }

    /// Returns the neighbouring position one step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (column_delta, row_delta) = direction.offset();
        Self {
            column: self.column.saturating_add(column_delta),
            row: self.row.saturating_add(row_delta),
        }
    }
}

/// Cardinal movement directions available to the ghost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in candidate enumeration order.
    ///
    /// Ghost movement ties resolve to the earliest direction in this list, so
    /// the order is part of the game rules and must not change.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Column and row delta applied by a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Down => (0, 1),
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
        }
    }

    /// Direction that leads from `from` to the adjacent cell `to`, if any.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| from.step(*direction) == to)
    }
}

/// Contents of a single grid cell.
///
/// The ghost is not a cell state; its presence is derived from its own position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Nothing occupies the cell.
    #[default]
    Empty,
    /// Player-placed blocker.
    Talisman,
    /// Pre-placed blocker.
    Obstacle,
    /// Goal cell that captures the ghost.
    Pot,
}

impl CellState {
    /// Reports whether the ghost is barred from entering the cell.
    #[must_use]
    pub const fn blocks_ghost(self) -> bool {
        matches!(self, Self::Talisman | Self::Obstacle)
    }
}

/// Row-major index of `position` within a grid of the provided dimensions.
///
/// Returns `None` for positions outside `[0, columns) x [0, rows)`.
#[must_use]
pub fn grid_index(position: Position, columns: u32, rows: u32) -> Option<usize> {
    let column = u32::try_from(position.column()).ok()?;
    let row = u32::try_from(position.row()).ok()?;
    if column >= columns || row >= rows {
        return None;
    }

    let width = usize::try_from(columns).ok()?;
    let row = usize::try_from(row).ok()?;
    let column = usize::try_from(column).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

/// Read-only view into the dense cell grid of a level.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellState],
    columns: u32,
    rows: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellState], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        grid_index(position, self.columns, self.rows).is_some()
    }

    /// Returns the state of the cell, or [`CellState::Empty`] when out of bounds.
    #[must_use]
    pub fn get(&self, position: Position) -> CellState {
        grid_index(position, self.columns, self.rows)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or_default()
    }

    /// Reports whether a talisman may be placed on the cell.
    #[must_use]
    pub fn is_valid_placement(&self, position: Position) -> bool {
        self.contains(position) && self.get(position) == CellState::Empty
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellState> + 'a {
        self.cells.iter().copied()
    }
}

/// Complete description of a generated level, ready to be installed by the world.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Level number the layout was generated for.
    pub level: u32,
    /// Attempt index the layout was generated for.
    pub attempt: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Goal cells, in placement order.
    pub pots: Vec<Position>,
    /// Pre-placed blockers, in placement order.
    pub obstacles: Vec<Position>,
    /// Cell the ghost starts on.
    pub ghost_start: Position,
    /// Talisman budget of the level.
    pub max_talismans: u32,
}
