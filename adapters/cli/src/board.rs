//! ASCII rendering of a level snapshot.

use ghost_catcher_core::{CellState, Position};
use ghost_catcher_world::query::LevelSnapshot;

const GHOST: char = 'G';

fn glyph(cell: CellState) -> char {
    match cell {
        CellState::Empty => '.',
        CellState::Obstacle => '#',
        CellState::Talisman => 'T',
        CellState::Pot => 'U',
    }
}

/// Draws the grid one row per line, top row first.
pub(crate) fn render(snapshot: &LevelSnapshot) -> String {
    let columns = i32::try_from(snapshot.columns).unwrap_or(i32::MAX);
    let rows = i32::try_from(snapshot.rows).unwrap_or(i32::MAX);
    let mut board = String::with_capacity((snapshot.columns as usize + 1) * snapshot.rows as usize);

    for row in 0..rows {
        for column in 0..columns {
            let position = Position::new(column, row);
            if position == snapshot.ghost {
                board.push(GHOST);
            } else {
                board.push(glyph(snapshot.cell(position)));
            }
        }
        board.push('\n');
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_catcher_core::DifficultyTier;

    #[test]
    fn ghost_is_drawn_over_its_cell() {
        let snapshot = LevelSnapshot {
            level: 1,
            attempt: 0,
            tier: DifficultyTier::Easy,
            columns: 3,
            rows: 2,
            cells: vec![
                CellState::Pot,
                CellState::Empty,
                CellState::Obstacle,
                CellState::Talisman,
                CellState::Empty,
                CellState::Empty,
            ],
            pots: vec![Position::new(0, 0)],
            obstacles: vec![Position::new(2, 0)],
            ghost: Position::new(1, 1),
            ghost_start: Position::new(2, 1),
            talismans_used: 1,
            max_talismans: 22,
        };

        assert_eq!(render(&snapshot), "U.#\nTG.\n");
    }
}
