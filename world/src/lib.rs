#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Ghost Catcher.

mod grid;
mod level;

use std::collections::BTreeMap;

use ghost_catcher_core::{
    Command, Direction, Event, FailureReason, GameConfig, GameState, LevelLayout, Position,
    WELCOME_BANNER,
};
use tracing::{debug, info, warn};

pub use grid::Grid;
pub use level::{Ghost, Level};

/// Represents the authoritative Ghost Catcher session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    state: GameState,
    level_number: u32,
    attempt: u32,
    last_attempts: BTreeMap<u32, u32>,
    level: Option<Level>,
    score: u32,
}

impl World {
    /// Creates a new world sitting at the menu with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Creates a new world sitting at the menu with the provided configuration.
    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            state: GameState::Menu,
            level_number: 1,
            attempt: 0,
            last_attempts: BTreeMap::new(),
            level: None,
            score: 0,
        }
    }

    fn transition(&mut self, to: GameState, out_events: &mut Vec<Event>) {
        if self.state == to {
            return;
        }

        let from = std::mem::replace(&mut self.state, to);
        debug!(?from, ?to, "state changed");
        out_events.push(Event::StateChanged { from, to });
    }

    fn request_level(&self, level: u32, out_events: &mut Vec<Event>) {
        let attempt = self
            .last_attempts
            .get(&level)
            .map_or(0, |last| last.saturating_add(1));
        debug!(level, attempt, "level requested");
        out_events.push(Event::LevelRequested { level, attempt });
    }

    fn install_level(&mut self, layout: LevelLayout, out_events: &mut Vec<Event>) {
        let level = Level::from_layout(layout);
        info!(
            level = level.number(),
            attempt = level.attempt(),
            pots = level.pots().len(),
            obstacles = level.obstacles().len(),
            max_talismans = level.max_talismans(),
            "level loaded"
        );
        out_events.push(Event::LevelLoaded {
            level: level.number(),
            attempt: level.attempt(),
            max_talismans: level.max_talismans(),
        });

        self.level_number = level.number();
        self.attempt = level.attempt();
        let _ = self.last_attempts.insert(level.number(), level.attempt());
        self.level = Some(level);
        self.transition(GameState::Playing, out_events);
    }

    fn place_talisman(&mut self, position: Position, out_events: &mut Vec<Event>) {
        if self.state != GameState::Playing {
            debug!(?position, state = ?self.state, "placement ignored outside play");
            return;
        }

        let Some(level) = self.level.as_mut() else {
            return;
        };

        if !level.place_talisman(position) {
            debug!(?position, "placement ignored");
            return;
        }

        out_events.push(Event::TalismanPlaced {
            position,
            talismans_used: level.talismans_used(),
        });
    }

    fn resolve_ghost_turn(&mut self, destination: Option<Position>, out_events: &mut Vec<Event>) {
        if self.state != GameState::Playing {
            return;
        }

        let Some(level) = self.level.as_mut() else {
            return;
        };

        if !level.take_ghost_turn() {
            debug!("ghost step ignored without a pending turn");
            return;
        }

        let from = level.ghost().position();
        match destination {
            Some(to) if Direction::between(from, to).is_some() => {
                level.ghost_mut().move_to(to);
                out_events.push(Event::GhostMoved { from, to });
            }
            Some(to) => {
                warn!(?from, ?to, "ghost step rejected: destination is not adjacent");
            }
            None => {
                debug!(at = ?from, "ghost trapped");
                out_events.push(Event::GhostTrapped { at: from });
            }
        }

        self.evaluate_turn(out_events);
    }

    fn evaluate_turn(&mut self, out_events: &mut Vec<Event>) {
        let Some(level) = self.level.as_ref() else {
            return;
        };

        let ghost = level.ghost().position();
        let number = level.number();

        if level.pots().contains(&ghost) {
            let awarded = level.remaining_talismans();
            self.score = self.score.saturating_add(awarded);
            info!(level = number, awarded, score = self.score, "ghost captured");
            out_events.push(Event::LevelCompleted {
                level: number,
                awarded,
                score: self.score,
            });
            self.transition(GameState::LevelComplete, out_events);
            return;
        }

        let reason = if !level.grid().contains(ghost) {
            FailureReason::Escaped
        } else if level.talismans_used() >= level.max_talismans() {
            FailureReason::BudgetExhausted
        } else {
            return;
        };

        info!(level = number, ?reason, "level failed");
        out_events.push(Event::LevelFailed {
            level: number,
            reason,
        });
        self.transition(GameState::LevelFailed, out_events);
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        if self.level_number < self.config.total_levels {
            self.request_level(self.level_number.saturating_add(1), out_events);
        } else {
            info!(score = self.score, "campaign complete");
            self.transition(GameState::GameOver, out_events);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that are not valid in the current state leave the world untouched
/// and emit no events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartGame => {
            if world.state == GameState::Menu {
                world.request_level(1, out_events);
            }
        }
        Command::LoadLevel { layout } => world.install_level(layout, out_events),
        Command::PlaceTalisman { position } => world.place_talisman(position, out_events),
        Command::StepGhost { destination } => world.resolve_ghost_turn(destination, out_events),
        Command::Pause => {
            if world.state == GameState::Playing {
                world.transition(GameState::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.state == GameState::Paused {
                world.transition(GameState::Playing, out_events);
            }
        }
        Command::RetryLevel => {
            if world.state == GameState::LevelFailed {
                world.request_level(world.level_number, out_events);
            }
        }
        Command::ResetLevel => world.request_level(world.level_number, out_events),
        Command::AdvanceLevel => {
            if world.state == GameState::LevelComplete {
                world.advance(out_events);
            }
        }
        Command::ReturnToMenu => world.transition(GameState::Menu, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use ghost_catcher_core::{
        CellState, DifficultyTier, GameConfig, GameState, GridView, Position,
    };

    use super::{Level, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Current state of the session.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.state
    }

    /// Cumulative score of the session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Level number of the current or most recently installed level.
    #[must_use]
    pub fn level_number(world: &World) -> u32 {
        world.level_number
    }

    /// Attempt index of the installed level.
    #[must_use]
    pub fn attempt(world: &World) -> u32 {
        world.attempt
    }

    /// Provides read-only access to the installed level, if any.
    #[must_use]
    pub fn level(world: &World) -> Option<&Level> {
        world.level.as_ref()
    }

    /// Exposes a read-only view of the installed level's grid.
    #[must_use]
    pub fn grid_view(world: &World) -> Option<GridView<'_>> {
        world.level.as_ref().map(|level| level.grid().view())
    }

    /// Current cell of the ghost, if a level is installed.
    #[must_use]
    pub fn ghost_position(world: &World) -> Option<Position> {
        world.level.as_ref().map(|level| level.ghost().position())
    }

    /// Goal cells of the installed level; empty when no level is installed.
    #[must_use]
    pub fn pots(world: &World) -> &[Position] {
        match world.level.as_ref() {
            Some(level) => level.pots(),
            None => &[],
        }
    }

    /// Captures an owned snapshot of the installed level for presentation.
    #[must_use]
    pub fn level_snapshot(world: &World) -> Option<LevelSnapshot> {
        world.level.as_ref().map(|level| {
            let grid = level.grid();
            LevelSnapshot {
                level: level.number(),
                attempt: level.attempt(),
                tier: level.tier(),
                columns: grid.columns(),
                rows: grid.rows(),
                cells: grid.view().iter().collect(),
                pots: level.pots().to_vec(),
                obstacles: level.obstacles().to_vec(),
                ghost: level.ghost().position(),
                ghost_start: level.ghost().start(),
                talismans_used: level.talismans_used(),
                max_talismans: level.max_talismans(),
            }
        })
    }

    /// Immutable copy of a level's presentation-relevant state.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct LevelSnapshot {
        /// Level number.
        pub level: u32,
        /// Attempt index of the layout.
        pub attempt: u32,
        /// Difficulty band of the level.
        pub tier: DifficultyTier,
        /// Number of grid columns.
        pub columns: u32,
        /// Number of grid rows.
        pub rows: u32,
        /// Cell states in row-major order.
        pub cells: Vec<CellState>,
        /// Goal cells.
        pub pots: Vec<Position>,
        /// Pre-placed blockers.
        pub obstacles: Vec<Position>,
        /// Current cell of the ghost.
        pub ghost: Position,
        /// Start cell of the ghost.
        pub ghost_start: Position,
        /// Talismans placed during this attempt.
        pub talismans_used: u32,
        /// Talisman budget of the level.
        pub max_talismans: u32,
    }

    impl LevelSnapshot {
        /// Cell state at the provided position, or [`CellState::Empty`] when out of bounds.
        #[must_use]
        pub fn cell(&self, position: Position) -> CellState {
            GridView::new(&self.cells, self.columns, self.rows).get(position)
        }
    }
}
