#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that decides the ghost's next step.
//!
//! The rule is a single-ply greedy heuristic: every legal neighbour is scored
//! by how far it keeps the ghost from the nearest pot and how close it brings
//! the ghost to the grid edge, and the best-scoring neighbour wins.

use ghost_catcher_core::{Command, Direction, Event, GhostAiConfig, GridView, Position};
use tracing::debug;

/// Weight applied to the distance between a candidate and the nearest pot.
pub const POT_AVOIDANCE_WEIGHT: i64 = 2;

/// Weight applied to the distance between a candidate and the nearest edge.
pub const EDGE_ATTRACTION_WEIGHT: i64 = 1;

/// Pure system that reacts to talisman placements and emits ghost steps.
#[derive(Debug, Default)]
pub struct Movement {
    config: GhostAiConfig,
}

impl Movement {
    /// Creates a movement system with the provided AI configuration.
    #[must_use]
    pub const fn new(config: GhostAiConfig) -> Self {
        Self { config }
    }

    /// Configured search depth.
    ///
    /// The rule never looks further than one step ahead regardless of this value.
    #[must_use]
    pub const fn pathfinding_depth(&self) -> u32 {
        self.config.pathfinding_depth
    }

    /// Consumes world events and the level view to emit one ghost step per placement.
    pub fn handle(
        &mut self,
        events: &[Event],
        grid: GridView<'_>,
        ghost: Option<Position>,
        pots: &[Position],
        out: &mut Vec<Command>,
    ) {
        let Some(current) = ghost else {
            return;
        };

        for event in events {
            if let Event::TalismanPlaced { position, .. } = event {
                let destination = next_move(current, grid, pots);
                debug!(placed = ?position, from = ?current, to = ?destination, "ghost step planned");
                out.push(Command::StepGhost { destination });
            }
        }
    }
}

/// Selects the ghost's next cell, or `None` when every neighbour is blocked.
///
/// Candidates are visited in [`Direction::ALL`] order and only a strictly
/// better score replaces the current best, so ties go to the earlier direction.
#[must_use]
pub fn next_move(current: Position, grid: GridView<'_>, goals: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, i64)> = None;

    for candidate in legal_moves(current, grid) {
        let score = score_move(candidate, grid, goals);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(position, _)| position)
}

/// Enumerates the in-bounds neighbours of `current` that the ghost may enter.
pub fn legal_moves(current: Position, grid: GridView<'_>) -> impl Iterator<Item = Position> + '_ {
    Direction::ALL
        .into_iter()
        .map(move |direction| current.step(direction))
        .filter(move |candidate| grid.contains(*candidate) && !grid.get(*candidate).blocks_ghost())
}

/// Scores a candidate cell; higher is better for the ghost.
///
/// An empty goal set contributes nothing to the score.
#[must_use]
pub fn score_move(candidate: Position, grid: GridView<'_>, goals: &[Position]) -> i64 {
    let nearest_pot = goals
        .iter()
        .map(|goal| i64::from(candidate.manhattan_distance(*goal)))
        .min()
        .unwrap_or(0);

    POT_AVOIDANCE_WEIGHT * nearest_pot - EDGE_ATTRACTION_WEIGHT * edge_distance(candidate, grid)
}

fn edge_distance(position: Position, grid: GridView<'_>) -> i64 {
    let column = i64::from(position.column());
    let row = i64::from(position.row());
    let last_column = i64::from(grid.columns()) - 1;
    let last_row = i64::from(grid.rows()) - 1;

    column.min(row).min(last_column - column).min(last_row - row)
}
