#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shell-facing facade that owns the world and drives its systems.
//!
//! Every intent is applied to the world and the resulting events are pumped
//! through the movement and level generation systems until no further
//! commands are produced, so callers observe each intent atomically.

use ghost_catcher_core::{
    Command, Event, GameConfig, GameState, GenerationError, LevelParameters, Position,
};
use ghost_catcher_system_level_generation::{self as level_generation, LevelGeneration};
use ghost_catcher_system_movement::Movement;
use ghost_catcher_world::{self as world, query, query::LevelSnapshot, World};
use tracing::{debug, info};

/// A single play-through: one world, its systems, and the seed its levels derive from.
#[derive(Debug)]
pub struct Session {
    world: World,
    movement: Movement,
    generation: LevelGeneration,
}

impl Session {
    /// Creates a session sitting at the menu.
    ///
    /// When no seed is provided one is drawn from the operating system and
    /// logged so the session can be replayed.
    #[must_use]
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let drawn = rand::random();
            info!(seed = drawn, "drew session seed from entropy");
            drawn
        });

        let generation = LevelGeneration::new(level_generation::Config {
            seed,
            columns: config.columns,
            rows: config.rows,
        });
        let movement = Movement::new(config.ghost_ai);

        Self {
            world: World::with_config(config),
            movement,
            generation,
        }
    }

    /// Leaves the menu and loads the first level.
    pub fn start_game(&mut self) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::StartGame)
    }

    /// Places a talisman and resolves the ghost's reply.
    pub fn place_talisman(&mut self, position: Position) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::PlaceTalisman { position })
    }

    /// Suspends play.
    pub fn pause(&mut self) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::Pause)
    }

    /// Continues suspended play.
    pub fn resume(&mut self) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::Resume)
    }

    /// Regenerates the failed level.
    pub fn retry_level(&mut self) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::RetryLevel)
    }

    /// Regenerates the current level from any state.
    pub fn reset_level(&mut self) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::ResetLevel)
    }

    /// Moves on from a completed level.
    pub fn advance_level(&mut self) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::AdvanceLevel)
    }

    /// Returns to the menu.
    pub fn return_to_menu(&mut self) -> Result<Vec<Event>, GenerationError> {
        self.submit(Command::ReturnToMenu)
    }

    /// Applies a command and pumps the systems until the world settles.
    ///
    /// Returns every event emitted along the way. A level that cannot be
    /// generated aborts the pump and leaves the previously installed level in
    /// place.
    pub fn submit(&mut self, command: Command) -> Result<Vec<Event>, GenerationError> {
        debug!(?command, "submitting command");
        let mut log = Vec::new();
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        while !events.is_empty() {
            log.extend(events.iter().cloned());

            let mut commands = Vec::new();
            self.generation.handle(&events, &mut commands)?;
            if let Some(grid) = query::grid_view(&self.world) {
                self.movement.handle(
                    &events,
                    grid,
                    query::ghost_position(&self.world),
                    query::pots(&self.world),
                    &mut commands,
                );
            }

            events.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }

        Ok(log)
    }

    /// Current state of the session.
    #[must_use]
    pub fn state(&self) -> GameState {
        query::state(&self.world)
    }

    /// Cumulative score of the session.
    #[must_use]
    pub fn score(&self) -> u32 {
        query::score(&self.world)
    }

    /// Seed every level layout of this session derives from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.generation.seed()
    }

    /// Level number the session is on.
    #[must_use]
    pub fn level_number(&self) -> u32 {
        query::level_number(&self.world)
    }

    /// Snapshot of the installed level, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<LevelSnapshot> {
        query::level_snapshot(&self.world)
    }

    /// Read-only access to the underlying world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }
}

/// Difficulty parameters of a level number, available without an active level.
#[must_use]
pub fn difficulty(level: u32) -> LevelParameters {
    LevelParameters::for_level(level)
}
