//! Detection of boards on which no move is left.

use crate::{
    error::EngineError,
    grid::{Grid, Snapshot},
    tile::Coordinate,
};

/// Returns whether no move can change the board any more.
///
/// A move exists as soon as one cell is empty or two orthogonally adjacent cells share a value.
/// Every cell is visited once and compared against its right and lower neighbours only, which
/// covers each adjacent pair exactly once.
///
/// # Errors
///
/// This function returns [`EngineError::InvariantViolation`] if `snapshot` does not fit on a board
/// of the given edge length.
pub fn is_game_over(snapshot: &Snapshot, field_size: usize) -> Result<bool, EngineError> {
    let grid = Grid::from_snapshot(snapshot, field_size)?;
    Ok(!has_move(&grid))
}

/// Returns whether any move on `grid` would be effective.
#[must_use]
pub fn has_move(grid: &Grid) -> bool {
    let size = grid.size();
    for row in 0..size {
        for column in 0..size {
            let Some(tile) = grid.get(Coordinate::new(row, column)) else {
                return true;
            };

            let right = grid.get(Coordinate::new(row, column + 1));
            let down = grid.get(Coordinate::new(row + 1, column));
            if [right, down]
                .into_iter()
                .flatten()
                .any(|neighbour| neighbour.value == tile.value)
            {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Tile, TileId};

    fn snapshot(rows: &[&[u32]]) -> Snapshot {
        rows.iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| **value != 0)
                    .map(move |(column, value)| (row, column, *value))
            })
            .zip(1..)
            .map(|((row, column, value), id)| {
                Tile::new(TileId::new(id), value, Coordinate::new(row, column))
            })
            .collect()
    }

    #[test]
    fn test_full_distinct_board_is_over() {
        let board = snapshot(&[&[2, 4], &[8, 16]]);

        assert!(is_game_over(&board, 2).expect("board should be valid"));
    }

    #[test]
    fn test_empty_cell_keeps_game_alive() {
        let board = snapshot(&[&[2, 4], &[8, 0]]);

        assert!(!is_game_over(&board, 2).expect("board should be valid"));
    }

    #[test]
    fn test_horizontal_pair_keeps_game_alive() {
        let board = snapshot(&[&[2, 4, 8], &[16, 32, 32], &[2, 4, 8]]);

        assert!(!is_game_over(&board, 3).expect("board should be valid"));
    }

    #[test]
    fn test_vertical_pair_keeps_game_alive() {
        let board = snapshot(&[&[2, 4, 8], &[16, 32, 8], &[2, 4, 16]]);

        assert!(!is_game_over(&board, 3).expect("board should be valid"));
    }

    #[test]
    fn test_checkerboard_is_over() {
        let board = snapshot(&[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]]);

        assert!(is_game_over(&board, 4).expect("board should be valid"));
    }

    #[test]
    fn test_hidden_tiles_are_ignored() {
        let hidden = Tile::new(TileId::new(9), 2, Coordinate::new(1, 1))
            .retired_at(Coordinate::new(1, 1));
        let board = snapshot(&[&[2, 4], &[8, 0]]).with_tile(hidden);

        assert!(!is_game_over(&board, 2).expect("board should be valid"));
    }

    #[test]
    fn test_invalid_board_is_reported() {
        let board = snapshot(&[&[2, 4, 8]]);

        assert!(is_game_over(&board, 2).is_err());
    }
}
