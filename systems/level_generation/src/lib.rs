#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural level generation driven by the difficulty table.
//!
//! Pieces are placed by rejection sampling in a fixed order: pots anywhere on
//! the grid, obstacles inside a one-cell margin, then the ghost on any cell left
//! free. Every layout is a pure function of the random source handed in, so a
//! session seeded once replays identically.

use ghost_catcher_core::{
    Command, Event, GenerationError, LevelLayout, LevelParameters, PlacementKind, Position,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Number of samples drawn for a single piece before generation gives up.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Configuration for the level generation system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Session seed every level layout is derived from.
    pub seed: u64,
    /// Number of grid columns in generated levels.
    pub columns: u32,
    /// Number of grid rows in generated levels.
    pub rows: u32,
}

/// Pure system that answers level requests with freshly generated layouts.
#[derive(Debug)]
pub struct LevelGeneration {
    config: Config,
}

impl LevelGeneration {
    /// Creates a new level generation system.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Session seed the system derives layouts from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Consumes `LevelRequested` events and emits `LoadLevel` commands.
    ///
    /// Stops at the first request whose parameters cannot be satisfied; commands
    /// pushed for earlier requests stay in `out`.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) -> Result<(), GenerationError> {
        for event in events {
            if let Event::LevelRequested { level, attempt } = event {
                let seed = derive_level_seed(self.config.seed, *level, *attempt);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut layout =
                    generate(*level, self.config.columns, self.config.rows, &mut rng)?;
                layout.attempt = *attempt;
                out.push(Command::LoadLevel { layout });
            }
        }

        Ok(())
    }
}

/// Generates the layout of a level from the provided random source.
///
/// The returned layout carries attempt index 0; callers that track attempts
/// overwrite it.
pub fn generate<R>(
    level: u32,
    columns: u32,
    rows: u32,
    rng: &mut R,
) -> Result<LevelLayout, GenerationError>
where
    R: Rng + ?Sized,
{
    let parameters = LevelParameters::for_level(level);
    check_feasibility(&parameters, columns, rows)?;

    let full = Region::full(columns, rows);
    let interior = Region::interior(columns, rows);

    let mut pots = Vec::with_capacity(parameters.pots as usize);
    for _ in 0..parameters.pots {
        let pot = sample_free(level, PlacementKind::Pot, full, rng, |candidate| {
            pots.contains(&candidate)
        })?;
        pots.push(pot);
    }

    let pots_inside = pots.iter().filter(|pot| interior.contains(**pot)).count() as u64;
    let interior_free = interior.area().saturating_sub(pots_inside);
    if u64::from(parameters.obstacles) > interior_free {
        return Err(GenerationError::InsufficientCells {
            level,
            kind: PlacementKind::Obstacle,
            requested: parameters.obstacles,
            available: interior_free,
        });
    }

    let mut obstacles = Vec::with_capacity(parameters.obstacles as usize);
    for _ in 0..parameters.obstacles {
        let obstacle = sample_free(level, PlacementKind::Obstacle, interior, rng, |candidate| {
            pots.contains(&candidate) || obstacles.contains(&candidate)
        })?;
        obstacles.push(obstacle);
    }

    let ghost_start = sample_free(level, PlacementKind::Ghost, full, rng, |candidate| {
        pots.contains(&candidate) || obstacles.contains(&candidate)
    })?;

    debug!(
        level,
        pots = pots.len(),
        obstacles = obstacles.len(),
        ?ghost_start,
        "level generated"
    );

    Ok(LevelLayout {
        level,
        attempt: 0,
        columns,
        rows,
        pots,
        obstacles,
        ghost_start,
        max_talismans: parameters.max_talismans,
    })
}

/// Generates the layout of a level from a generator seeded by the operating system.
pub fn generate_with_entropy(
    level: u32,
    columns: u32,
    rows: u32,
) -> Result<LevelLayout, GenerationError> {
    let mut rng = ChaCha8Rng::from_entropy();
    generate(level, columns, rows, &mut rng)
}

/// Derives the seed for one load of a level from the session seed.
#[must_use]
pub fn derive_level_seed(session_seed: u64, level: u32, attempt: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(session_seed.to_le_bytes());
    hasher.update(level.to_le_bytes());
    hasher.update(attempt.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let seed = u64::from_le_bytes(bytes);
    debug!(session_seed, level, attempt, seed, "derived level seed");
    seed
}

fn check_feasibility(
    parameters: &LevelParameters,
    columns: u32,
    rows: u32,
) -> Result<(), GenerationError> {
    let level = parameters.level;
    let total = Region::full(columns, rows).area();
    let interior = Region::interior(columns, rows).area();

    if u64::from(parameters.pots) > total {
        return Err(GenerationError::InsufficientCells {
            level,
            kind: PlacementKind::Pot,
            requested: parameters.pots,
            available: total,
        });
    }

    if u64::from(parameters.obstacles) > interior {
        return Err(GenerationError::InsufficientCells {
            level,
            kind: PlacementKind::Obstacle,
            requested: parameters.obstacles,
            available: interior,
        });
    }

    let ghost_free = total
        .saturating_sub(u64::from(parameters.pots))
        .saturating_sub(u64::from(parameters.obstacles));
    if ghost_free == 0 {
        return Err(GenerationError::InsufficientCells {
            level,
            kind: PlacementKind::Ghost,
            requested: 1,
            available: 0,
        });
    }

    Ok(())
}

fn sample_free<R, F>(
    level: u32,
    kind: PlacementKind,
    region: Region,
    rng: &mut R,
    is_taken: F,
) -> Result<Position, GenerationError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = region.sample(rng);
        if !is_taken(candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::AttemptsExhausted {
        level,
        kind,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Inclusive rectangle of cells a piece may be placed in.
#[derive(Clone, Copy, Debug)]
struct Region {
    min_column: i32,
    max_column: i32,
    min_row: i32,
    max_row: i32,
}

impl Region {
    fn full(columns: u32, rows: u32) -> Self {
        Self::inset(columns, rows, 0)
    }

    fn interior(columns: u32, rows: u32) -> Self {
        Self::inset(columns, rows, 1)
    }

    fn inset(columns: u32, rows: u32, margin: i32) -> Self {
        let last_column = i32::try_from(columns).unwrap_or(i32::MAX) - 1;
        let last_row = i32::try_from(rows).unwrap_or(i32::MAX) - 1;
        Self {
            min_column: margin,
            max_column: last_column - margin,
            min_row: margin,
            max_row: last_row - margin,
        }
    }

    fn is_empty(self) -> bool {
        self.min_column > self.max_column || self.min_row > self.max_row
    }

    fn area(self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let width = u64::from((self.max_column - self.min_column + 1).unsigned_abs());
        let height = u64::from((self.max_row - self.min_row + 1).unsigned_abs());
        width * height
    }

    fn contains(self, position: Position) -> bool {
        (self.min_column..=self.max_column).contains(&position.column())
            && (self.min_row..=self.max_row).contains(&position.row())
    }

    fn sample<R>(self, rng: &mut R) -> Position
    where
        R: Rng + ?Sized,
    {
        Position::new(
            rng.gen_range(self.min_column..=self.max_column),
            rng.gen_range(self.min_row..=self.max_row),
        )
    }
}
