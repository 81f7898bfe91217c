//! Board model and immutable game-state snapshots.
//!
//! A [`Snapshot`] is the persistent, id-keyed record of one game state. A [`Grid`] is the
//! coordinate-indexed scratch view built from a snapshot whenever a component needs to reason
//! about neighbouring cells. Grids are never kept between moves.

use std::collections::BTreeMap;

use crate::{
    error::EngineError,
    tile::{Coordinate, Tile, TileId},
};

/// Complete set of tiles needed to render one game state.
///
/// Tiles are keyed by identifier and iterated in ascending identifier order. Besides the visible
/// occupants of the board, a snapshot may hold the hidden records of tiles consumed by the move
/// that produced it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Every tile of the state keyed by its identifier.
    tiles: BTreeMap<TileId, Tile>,
}

impl FromIterator<Tile> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().map(|tile| (tile.id, tile)).collect(),
        }
    }
}

impl Snapshot {
    /// Creates a snapshot without any tiles.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tiles: BTreeMap::new(),
        }
    }

    /// Returns the tile recorded under the given identifier, visible or not.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Iterates over every tile in ascending identifier order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Iterates over the tiles currently on the board.
    pub fn visible(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(|tile| tile.visible)
    }

    /// Iterates over the hidden records of tiles consumed by the last move.
    pub fn hidden(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(|tile| !tile.visible)
    }

    /// Returns the total number of records, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns whether the snapshot holds no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the largest identifier recorded in the snapshot.
    #[must_use]
    pub fn max_id(&self) -> Option<TileId> {
        self.tiles.keys().next_back().copied()
    }

    /// Returns a copy of the snapshot with `tile` added or replaced.
    #[must_use]
    pub fn with_tile(&self, tile: Tile) -> Self {
        let mut tiles = self.tiles.clone();
        let _ = tiles.insert(tile.id, tile);
        Self { tiles }
    }

    /// Returns the working copy a move is computed against.
    ///
    /// Hidden records are dropped and the per-move flags of the visible tiles are cleared. The
    /// snapshot itself is left untouched.
    #[must_use]
    pub fn prepared_for_move(&self) -> Self {
        self.visible().map(|tile| tile.settled()).collect()
    }

    /// Returns the `(coordinate, value)` pairs of the visible tiles in row-major order.
    ///
    /// Identifiers and flags are ignored, which makes two layouts comparable by what a player
    /// would see on the board.
    #[must_use]
    pub fn layout(&self) -> Vec<(Coordinate, u32)> {
        let mut layout: Vec<(Coordinate, u32)> = self
            .visible()
            .map(|tile| (tile.coordinate, tile.value))
            .collect();
        layout.sort_unstable();
        layout
    }
}

/// Fixed-size square board holding at most one visible tile per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Edge length of the board.
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates an empty board with the given edge length.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Places every visible tile of `snapshot` on a board of the given edge length.
    ///
    /// Hidden records are ignored.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if a tile lies outside of the
    /// board, two tiles claim the same cell or a value is not a power of two.
    pub fn from_snapshot(snapshot: &Snapshot, size: usize) -> Result<Self, EngineError> {
        let mut grid = Self::empty(size);
        for tile in snapshot.visible() {
            grid.place(*tile)?;
        }

        Ok(grid)
    }

    /// Returns the edge length of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the tile occupying the given cell, if any.
    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> Option<&Tile> {
        self.index(coordinate)
            .and_then(|idx| self.cells.get(idx))
            .and_then(Option::as_ref)
    }

    /// Puts a tile on the cell named by its own coordinate.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if the value is not a power of
    /// two, the coordinate lies outside of the board or the cell is already taken.
    pub(crate) fn place(&mut self, tile: Tile) -> Result<(), EngineError> {
        if !tile.value.is_power_of_two() {
            return Err(EngineError::invariant(
                tile.coordinate,
                "tile value is not a power of two",
            ));
        }

        let cell = self
            .index(tile.coordinate)
            .and_then(|idx| self.cells.get_mut(idx))
            .ok_or_else(|| EngineError::invariant(tile.coordinate, "coordinate out of bounds"))?;

        if cell.is_some() {
            return Err(EngineError::invariant(
                tile.coordinate,
                "two tiles claim the same cell",
            ));
        }
        *cell = Some(tile);

        Ok(())
    }

    /// Enumerates the unoccupied cells in row-major order.
    #[must_use]
    pub fn empty_coordinates(&self) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| self.coordinate(idx))
            .collect()
    }

    /// Iterates over the occupants of the board in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Returns the values of one row, `None` marking empty cells.
    #[must_use]
    pub fn row_values(&self, row: usize) -> Vec<Option<u32>> {
        (0..self.size)
            .map(|column| self.get(Coordinate::new(row, column)).map(|tile| tile.value))
            .collect()
    }

    /// Turns the board back into a snapshot, adding `retired` as hidden records.
    #[must_use]
    pub fn into_snapshot(self, retired: Vec<Tile>) -> Snapshot {
        self.cells
            .into_iter()
            .flatten()
            .chain(retired.into_iter().map(|tile| Tile {
                visible: false,
                ..tile
            }))
            .collect()
    }

    /// Maps a coordinate to its offset in [`cells`](Grid::cells).
    const fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if coordinate.within(self.size) {
            Some(coordinate.row * self.size + coordinate.column)
        } else {
            None
        }
    }

    /// Maps an offset in [`cells`](Grid::cells) back to its coordinate.
    const fn coordinate(&self, index: usize) -> Coordinate {
        Coordinate::new(index / self.size, index % self.size)
    }
}
