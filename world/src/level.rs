//! Per-level state owned by the world.

use ghost_catcher_core::{CellState, DifficultyTier, LevelLayout, Position};

use crate::grid::Grid;

/// The mobile occupant the player must corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ghost {
    position: Position,
    start: Position,
}

impl Ghost {
    pub(crate) const fn spawn(start: Position) -> Self {
        Self {
            position: start,
            start,
        }
    }

    /// Cell the ghost currently occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Cell the ghost started the level on.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    pub(crate) fn move_to(&mut self, destination: Position) {
        self.position = destination;
    }
}

/// A single attempt at a level.
#[derive(Clone, Debug)]
pub struct Level {
    number: u32,
    attempt: u32,
    grid: Grid,
    pots: Vec<Position>,
    obstacles: Vec<Position>,
    ghost: Ghost,
    talismans_used: u32,
    max_talismans: u32,
    awaiting_ghost: bool,
}

impl Level {
    /// Builds a fresh level from a generated layout.
    ///
    /// Pots are written before obstacles, so an obstacle listed on a pot cell
    /// replaces it in the grid.
    pub(crate) fn from_layout(layout: LevelLayout) -> Self {
        let mut grid = Grid::new(layout.columns, layout.rows);
        for pot in &layout.pots {
            grid.set(*pot, CellState::Pot);
        }
        for obstacle in &layout.obstacles {
            grid.set(*obstacle, CellState::Obstacle);
        }

        Self {
            number: layout.level,
            attempt: layout.attempt,
            grid,
            pots: layout.pots,
            obstacles: layout.obstacles,
            ghost: Ghost::spawn(layout.ghost_start),
            talismans_used: 0,
            max_talismans: layout.max_talismans,
            awaiting_ghost: false,
        }
    }

    /// Level number, starting at one.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Zero-based index of this load of the level number.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Difficulty band the level belongs to.
    #[must_use]
    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::for_level(self.number)
    }

    /// Cell contents of the level.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Goal cells of the level.
    #[must_use]
    pub fn pots(&self) -> &[Position] {
        &self.pots
    }

    /// Pre-placed blockers of the level.
    #[must_use]
    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    /// The level's ghost.
    #[must_use]
    pub const fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    /// Talismans placed during this attempt.
    #[must_use]
    pub const fn talismans_used(&self) -> u32 {
        self.talismans_used
    }

    /// Talisman budget of the level.
    #[must_use]
    pub const fn max_talismans(&self) -> u32 {
        self.max_talismans
    }

    /// Reports whether a placement was accepted and the ghost has yet to move.
    #[must_use]
    pub const fn awaiting_ghost(&self) -> bool {
        self.awaiting_ghost
    }

    /// Unused portion of the talisman budget.
    #[must_use]
    pub const fn remaining_talismans(&self) -> u32 {
        self.max_talismans.saturating_sub(self.talismans_used)
    }

    pub(crate) fn place_talisman(&mut self, position: Position) -> bool {
        if self.awaiting_ghost || !self.grid.is_valid_placement(position) {
            return false;
        }

        self.grid.set(position, CellState::Talisman);
        self.talismans_used = self.talismans_used.saturating_add(1);
        self.awaiting_ghost = true;
        true
    }

    pub(crate) fn take_ghost_turn(&mut self) -> bool {
        std::mem::replace(&mut self.awaiting_ghost, false)
    }

    pub(crate) fn ghost_mut(&mut self) -> &mut Ghost {
        &mut self.ghost
    }
}
