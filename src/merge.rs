//! Slide-and-merge engine.
//!
//! A single line algorithm handles every direction. Each [`Direction`] resolves to an [`Axis`]
//! that picks rows or columns and a [`Scan`] that picks which end of the line is the leading
//! edge. The line is then read from the leading edge onwards, so sliding always happens towards
//! offset zero.

use std::{fmt, str::FromStr};

use crate::{
    error::EngineError,
    grid::{Grid, Snapshot},
    tile::{Coordinate, IdAllocator, Tile},
};

/// Cardinal move direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Slide every row towards column zero.
    Left,
    /// Slide every row towards the last column.
    Right,
    /// Slide every column towards row zero.
    Up,
    /// Slide every column towards the last row.
    Down,
}

/// Board axis along which a move slides tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Lines are rows.
    Horizontal,
    /// Lines are columns.
    Vertical,
}

/// Order in which the cells of a line are read, starting from the leading edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scan {
    /// The leading edge is index zero.
    Ascending,
    /// The leading edge is the last index.
    Descending,
}

impl Direction {
    /// Every direction, in the order the terminal front end lists them.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Returns the axis the direction slides along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Returns the order in which a line is read for this direction.
    #[must_use]
    pub const fn scan(self) -> Scan {
        match self {
            Self::Left | Self::Up => Scan::Ascending,
            Self::Right | Self::Down => Scan::Descending,
        }
    }

    /// Maps the `offset`-th cell of line `line`, counted from the leading edge, to a coordinate.
    #[must_use]
    pub const fn cell(self, line: usize, offset: usize, size: usize) -> Coordinate {
        let position = match self.scan() {
            Scan::Ascending => offset,
            Scan::Descending => size - 1 - offset,
        };

        match self.axis() {
            Axis::Horizontal => Coordinate::new(line, position),
            Axis::Vertical => Coordinate::new(position, line),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        formatter.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Parses a direction name or an arrow-key name, ignoring ASCII case.
    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        let symbol = symbol.trim();
        let name = symbol
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("arrow"))
            .and_then(|_| symbol.get(5..))
            .unwrap_or(symbol);

        Self::ALL
            .into_iter()
            .find(|direction| direction.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::IllegalDirection(symbol.to_owned()))
    }
}

/// Result of sliding a whole board in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Board after the move, merged tiles carrying fresh identifiers.
    pub grid: Grid,
    /// Tiles consumed by merges, placed on the cell they merged into.
    pub retired: Vec<Tile>,
    /// Number of merges performed.
    pub merges: usize,
}

impl MergeOutcome {
    /// Turns the outcome into a snapshot that keeps the consumed tiles as hidden records.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.grid.into_snapshot(self.retired)
    }
}

/// Tiles of one line after sliding, positioned by offset from the leading edge.
struct LineOutcome {
    /// Surviving tiles; the tile at index `n` ends up at offset `n`.
    packed: Vec<Tile>,
    /// Consumed tiles with the offset they merged into.
    retired: Vec<(usize, Tile)>,
}

/// Slides and merges the tiles of a single line.
///
/// `tiles` must be ordered from the leading edge. Each tile either joins the last packed tile,
/// when both share a value and neither is the product of a merge in this move, or takes the next
/// free offset. With `chaining_allowed` the merge-product restriction is lifted. `locate` maps an
/// offset back to its board cell for error reports.
fn slide_line<I, F>(
    tiles: I,
    chaining_allowed: bool,
    ids: &mut IdAllocator,
    locate: F,
) -> Result<LineOutcome, EngineError>
where
    I: IntoIterator<Item = Tile>,
    F: Fn(usize) -> Coordinate,
{
    let mut packed: Vec<Tile> = Vec::new();
    let mut retired = Vec::new();

    for tile in tiles {
        let offset = packed.len().saturating_sub(1);
        match packed.last_mut() {
            Some(front)
                if front.value == tile.value
                    && (chaining_allowed || !(front.merged || tile.merged)) =>
            {
                let value = front
                    .value
                    .checked_add(tile.value)
                    .ok_or_else(|| EngineError::invariant(locate(offset), "merged value overflows"))?;
                let id = ids.allocate().ok_or_else(|| {
                    EngineError::invariant(locate(offset), "tile identifiers exhausted")
                })?;

                retired.push((offset, *front));
                retired.push((offset, tile));
                *front = Tile {
                    id,
                    value,
                    merged: true,
                    spawned: false,
                    ..tile
                };
            }
            _ => packed.push(tile),
        }
    }

    Ok(LineOutcome { packed, retired })
}

/// Slides every line of `grid` in `direction`.
///
/// The input grid is left untouched. Identifiers are allocated only for merge products, so a
/// move that changes nothing consumes no identifiers.
///
/// # Errors
///
/// This function returns [`EngineError::InvariantViolation`] if the rebuilt board breaks the grid
/// invariants, if a merged value does not fit in a `u32` or if `ids` runs out of identifiers.
/// `ids` may have advanced when an error is returned.
pub fn slide(
    grid: &Grid,
    direction: Direction,
    chaining_allowed: bool,
    ids: &mut IdAllocator,
) -> Result<MergeOutcome, EngineError> {
    let size = grid.size();
    let mut result = Grid::empty(size);
    let mut retired = Vec::new();
    let mut merges = 0;

    for line in 0..size {
        let tiles = (0..size).filter_map(|offset| grid.get(direction.cell(line, offset, size)));
        let outcome = slide_line(tiles.copied(), chaining_allowed, ids, |offset| {
            direction.cell(line, offset, size)
        })?;

        merges += outcome.retired.len() / 2;
        for (offset, tile) in outcome.packed.into_iter().enumerate() {
            result.place(tile.moved_to(direction.cell(line, offset, size)))?;
        }
        retired.extend(
            outcome
                .retired
                .into_iter()
                .map(|(offset, tile)| tile.retired_at(direction.cell(line, offset, size))),
        );
    }

    Ok(MergeOutcome {
        grid: result,
        retired,
        merges,
    })
}

/// Slides the visible tiles of `snapshot` in `direction` and rebuilds a snapshot.
///
/// # Errors
///
/// This function returns [`EngineError::InvariantViolation`] if `snapshot` does not fit on a board
/// of the given edge length, or for the failures described on [`slide`].
pub fn slide_snapshot(
    snapshot: &Snapshot,
    size: usize,
    direction: Direction,
    chaining_allowed: bool,
    ids: &mut IdAllocator,
) -> Result<Snapshot, EngineError> {
    let grid = Grid::from_snapshot(snapshot, size)?;
    Ok(slide(&grid, direction, chaining_allowed, ids)?.into_snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileId;

    /// Builds a board from rows of values, `0` marking an empty cell.
    fn board(rows: &[&[u32]]) -> (Grid, IdAllocator) {
        let mut ids = IdAllocator::new();
        let tiles: Snapshot = rows
            .iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| **value != 0)
                    .map(move |(column, value)| (Coordinate::new(row, column), *value))
            })
            .map(|(coordinate, value)| {
                let id = ids.allocate().expect("test boards are small");
                Tile::new(id, value, coordinate)
            })
            .collect();

        (
            Grid::from_snapshot(&tiles, rows.len()).expect("test board should be valid"),
            ids,
        )
    }

    fn values(grid: &Grid) -> Vec<Vec<u32>> {
        (0..grid.size())
            .map(|row| {
                grid.row_values(row)
                    .into_iter()
                    .map(|value| value.unwrap_or(0))
                    .collect()
            })
            .collect()
    }

    fn slid(rows: &[&[u32]], direction: Direction) -> Vec<Vec<u32>> {
        let (grid, mut ids) = board(rows);
        let outcome = slide(&grid, direction, false, &mut ids).expect("slide should succeed");
        values(&outcome.grid)
    }

    #[test]
    fn test_direction_strategy() {
        assert_eq!(Direction::Left.axis(), Axis::Horizontal);
        assert_eq!(Direction::Down.axis(), Axis::Vertical);
        assert_eq!(Direction::Right.scan(), Scan::Descending);
        assert_eq!(Direction::Up.scan(), Scan::Ascending);

        assert_eq!(Direction::Left.cell(1, 0, 4), Coordinate::new(1, 0));
        assert_eq!(Direction::Right.cell(1, 0, 4), Coordinate::new(1, 3));
        assert_eq!(Direction::Up.cell(1, 0, 4), Coordinate::new(0, 1));
        assert_eq!(Direction::Down.cell(1, 0, 4), Coordinate::new(3, 1));
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("ArrowRight".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(" UP ".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("arrowdown".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(
            "diagonal".parse::<Direction>(),
            Err(EngineError::IllegalDirection("diagonal".to_owned()))
        );
        assert!("arrow".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn test_merge_then_slide_left() {
        let first = slid(&[&[2, 2, 4, 0], &[0; 4], &[0; 4], &[0; 4]], Direction::Left);
        assert_eq!(first.first(), Some(&vec![4, 4, 0, 0]));
    }

    #[test]
    fn test_merge_allowed_on_next_move() {
        let (grid, mut ids) = board(&[&[2, 2, 4, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let first = slide(&grid, Direction::Left, false, &mut ids).expect("slide should succeed");
        let settled: Snapshot = first
            .grid
            .tiles()
            .map(|tile| tile.settled())
            .collect();
        let grid = Grid::from_snapshot(&settled, 4).expect("slid board should be valid");

        let second = slide(&grid, Direction::Left, false, &mut ids).expect("slide should succeed");

        assert_eq!(values(&second.grid).first(), Some(&vec![8, 0, 0, 0]));
    }

    #[test]
    fn test_each_pair_merges_once() {
        assert_eq!(
            slid(&[&[2, 2, 2, 2], &[0; 4], &[0; 4], &[0; 4]], Direction::Left).first(),
            Some(&vec![4, 4, 0, 0])
        );
        assert_eq!(
            slid(&[&[2, 2, 2, 0], &[0; 4], &[0; 4], &[0; 4]], Direction::Right).first(),
            Some(&vec![0, 0, 2, 4])
        );
        assert_eq!(
            slid(&[&[2, 2, 2, 0], &[0; 4], &[0; 4], &[0; 4]], Direction::Left).first(),
            Some(&vec![4, 2, 0, 0])
        );
    }

    #[test]
    fn test_merge_across_gaps() {
        assert_eq!(
            slid(&[&[2, 0, 0, 2], &[0; 4], &[0; 4], &[0; 4]], Direction::Left).first(),
            Some(&vec![4, 0, 0, 0])
        );
        assert_eq!(
            slid(&[&[4, 0, 2, 2], &[0; 4], &[0; 4], &[0; 4]], Direction::Left).first(),
            Some(&vec![4, 4, 0, 0])
        );
    }

    #[test]
    fn test_different_value_blocks() {
        let rows: &[&[u32]] = &[&[2, 4, 2, 0], &[0; 4], &[0; 4], &[0; 4]];
        assert_eq!(slid(rows, Direction::Left).first(), Some(&vec![2, 4, 2, 0]));
        assert_eq!(slid(rows, Direction::Right).first(), Some(&vec![0, 2, 4, 2]));
    }

    #[test]
    fn test_vertical_moves() {
        let rows: &[&[u32]] = &[&[2, 0, 0], &[2, 4, 0], &[4, 4, 8]];

        assert_eq!(
            slid(rows, Direction::Up),
            vec![vec![4, 8, 8], vec![4, 0, 0], vec![0, 0, 0]]
        );
        assert_eq!(
            slid(rows, Direction::Down),
            vec![vec![0, 0, 0], vec![4, 0, 0], vec![4, 8, 8]]
        );
    }

    #[test]
    fn test_lines_are_independent() {
        let rows: &[&[u32]] = &[&[2, 0, 0], &[2, 0, 0], &[0, 0, 2]];

        assert_eq!(
            slid(rows, Direction::Left),
            vec![vec![2, 0, 0], vec![2, 0, 0], vec![2, 0, 0]]
        );
    }

    #[test]
    fn test_identity_across_slide_and_merge() {
        let (grid, mut ids) = board(&[&[0, 8, 2, 2], &[0; 4], &[0; 4], &[0; 4]]);
        let eight = grid
            .get(Coordinate::new(0, 1))
            .expect("board should hold an eight")
            .id;

        let outcome = slide(&grid, Direction::Left, false, &mut ids).expect("slide should succeed");

        let slid_eight = outcome
            .grid
            .get(Coordinate::new(0, 0))
            .expect("eight should reach the edge");
        assert_eq!(slid_eight.id, eight);
        assert!(!slid_eight.merged);

        let product = outcome
            .grid
            .get(Coordinate::new(0, 1))
            .expect("merge product should follow the eight");
        assert_eq!(product.value, 4);
        assert!(product.merged);
        assert_eq!(product.id, TileId::new(4));

        assert_eq!(outcome.merges, 1);
        assert_eq!(outcome.retired.len(), 2);
        assert!(outcome
            .retired
            .iter()
            .all(|tile| !tile.visible && tile.coordinate == Coordinate::new(0, 1)));
    }

    #[test]
    fn test_noop_allocates_nothing() {
        let (grid, mut ids) = board(&[&[2, 4], &[4, 2]]);
        let expected = ids.clone();

        let outcome = slide(&grid, Direction::Left, false, &mut ids).expect("slide should succeed");

        assert_eq!(outcome.grid, grid);
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_no_double_merge_on_rerun() {
        let (grid, mut ids) = board(&[&[2, 2, 4, 0], &[4, 4, 8, 8], &[0; 4], &[2, 0, 2, 4]]);
        let first = slide(&grid, Direction::Left, false, &mut ids).expect("slide should succeed");

        let second =
            slide(&first.grid, Direction::Left, false, &mut ids).expect("slide should succeed");

        assert_eq!(second.grid, first.grid);
        assert_eq!(second.merges, 0);
    }

    #[test]
    fn test_chaining_policy() {
        let (grid, mut ids) = board(&[&[2, 2, 4, 0], &[0; 4], &[0; 4], &[0; 4]]);

        let outcome = slide(&grid, Direction::Left, true, &mut ids).expect("slide should succeed");

        assert_eq!(values(&outcome.grid).first(), Some(&vec![8, 0, 0, 0]));
        assert_eq!(outcome.merges, 2);
        assert_eq!(outcome.retired.len(), 4);
    }

    #[test]
    fn test_slide_snapshot_keeps_hidden_records() {
        let (grid, mut ids) = board(&[&[2, 2], &[0, 0]]);
        let snapshot = grid.into_snapshot(Vec::new());

        let result = slide_snapshot(&snapshot, 2, Direction::Up, false, &mut ids)
            .expect("slide should succeed");

        assert_eq!(result.visible().count(), 2);
        assert_eq!(result.hidden().count(), 0);

        let merged = slide_snapshot(&snapshot, 2, Direction::Right, false, &mut ids)
            .expect("slide should succeed");
        assert_eq!(merged.visible().count(), 1);
        assert_eq!(merged.hidden().count(), 2);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_overflow_is_rejected() {
        let (grid, mut ids) = board(&[&[1 << 31, 1 << 31], &[0, 0]]);

        let result = slide(&grid, Direction::Right, false, &mut ids);

        assert!(matches!(
            result,
            Err(EngineError::InvariantViolation { coordinate, .. }) if coordinate == Coordinate::new(0, 1)
        ));
    }

    #[test]
    fn test_merge_without_free_ids_is_rejected() {
        let (grid, _) = board(&[&[2, 2], &[0, 0]]);
        let mut ids = IdAllocator::after(TileId::new(u64::MAX));

        let merged = slide(&grid, Direction::Left, false, &mut ids);
        let slid = slide(&grid, Direction::Down, false, &mut ids);

        assert!(matches!(
            merged,
            Err(EngineError::InvariantViolation { .. })
        ));
        assert!(slid.is_ok());
    }
}
