//! Tile data model and identity allocation.
//!
//! A [`Tile`] is a plain value. Moving a tile produces a new [`Tile`] in the next snapshot instead
//! of mutating a shared object, which keeps every snapshot in the history independent.

use std::fmt;

/// Position of a cell on the board as `(row, column)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Zero-based row index, growing downwards.
    pub row: usize,
    /// Zero-based column index, growing rightwards.
    pub column: usize,
}

impl Coordinate {
    /// Creates a coordinate from its row and column.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Returns whether the coordinate lies within a board of the given edge length.
    #[must_use]
    pub const fn within(self, field_size: usize) -> bool {
        self.row < field_size && self.column < field_size
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.column)
    }
}

/// Opaque tile identifier.
///
/// Identifiers are unique within a game session. A tile keeps its identifier while it slides and
/// loses it when it is consumed by a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u64);

impl TileId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Issuer of fresh tile identifiers.
///
/// The allocator is owned by a game session and handed to the components that create tiles, so
/// no identifier state is shared between sessions. Once the identifier space is used up, the
/// allocator hands out nothing rather than repeating an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdAllocator {
    /// Raw value of the next identifier to hand out, `None` once exhausted.
    next: Option<u64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Creates an allocator whose first identifier is `#1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Creates an allocator that only hands out identifiers greater than `last`.
    #[must_use]
    pub const fn after(last: TileId) -> Self {
        Self {
            next: last.0.checked_add(1),
        }
    }

    /// Hands out a fresh identifier, or `None` if every identifier has been used.
    pub fn allocate(&mut self) -> Option<TileId> {
        let raw = self.next?;
        self.next = raw.checked_add(1);
        Some(TileId(raw))
    }
}

/// Single numbered piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Identity of the tile, stable across slides.
    pub id: TileId,
    /// Face value of the tile, always a power of two.
    pub value: u32,
    /// Cell occupied by the tile, or the merge location for a retired tile.
    pub coordinate: Coordinate,
    /// Set only during the move in which this tile was produced by a merge.
    pub merged: bool,
    /// Cleared once the tile has been consumed by a merge.
    pub visible: bool,
    /// Set only during the move in which this tile was spawned.
    pub spawned: bool,
}

impl Tile {
    /// Creates a visible tile with cleared move flags.
    #[must_use]
    pub const fn new(id: TileId, value: u32, coordinate: Coordinate) -> Self {
        Self {
            id,
            value,
            coordinate,
            merged: false,
            visible: true,
            spawned: false,
        }
    }

    /// Returns the same tile placed on another cell.
    #[must_use]
    pub const fn moved_to(self, coordinate: Coordinate) -> Self {
        Self { coordinate, ..self }
    }

    /// Returns the same tile with its per-move flags cleared.
    #[must_use]
    pub const fn settled(self) -> Self {
        Self {
            merged: false,
            spawned: false,
            ..self
        }
    }

    /// Returns the hidden record left behind once this tile is consumed at `coordinate`.
    #[must_use]
    pub const fn retired_at(self, coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            visible: false,
            ..self
        }
    }
}
