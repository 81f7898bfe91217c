//! Placement of new tiles after an effective move.

use rand::{seq::SliceRandom as _, Rng};

use crate::{
    error::EngineError,
    grid::{Grid, Snapshot},
    tile::{IdAllocator, Tile},
};

/// Value of an ordinary spawned tile.
pub const LOW_VALUE: u32 = 2;

/// Value of a rare spawned tile.
pub const HIGH_VALUE: u32 = 4;

/// Default probability of spawning [`HIGH_VALUE`] instead of [`LOW_VALUE`].
pub const DEFAULT_HIGH_VALUE_PROBABILITY: f64 = 0.1;

/// Chooses where new tiles appear and what value they carry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPolicy {
    /// Probability of spawning [`HIGH_VALUE`], within `[0, 1]`.
    high_value_probability: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            high_value_probability: DEFAULT_HIGH_VALUE_PROBABILITY,
        }
    }
}

impl SpawnPolicy {
    /// Creates a policy spawning [`HIGH_VALUE`] with the given probability.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvalidConfig`] if the probability is not a number
    /// within `[0, 1]`.
    pub fn new(high_value_probability: f64) -> Result<Self, EngineError> {
        if (0.0..=1.0).contains(&high_value_probability) {
            Ok(Self {
                high_value_probability,
            })
        } else {
            Err(EngineError::InvalidConfig(format!(
                "spawn probability {high_value_probability} is outside of [0, 1]"
            )))
        }
    }

    /// Returns the probability of spawning [`HIGH_VALUE`].
    #[must_use]
    pub const fn high_value_probability(&self) -> f64 {
        self.high_value_probability
    }

    /// Creates one new tile on a uniformly chosen empty cell of `snapshot`.
    ///
    /// The tile is returned rather than inserted; the caller decides when it joins the working
    /// snapshot.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::NoEmptyCellAvailable`] if the board is full and
    /// [`EngineError::InvariantViolation`] if `snapshot` does not fit on the board or `ids` has no
    /// identifier left.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        snapshot: &Snapshot,
        field_size: usize,
        ids: &mut IdAllocator,
        rng: &mut R,
    ) -> Result<Tile, EngineError> {
        let grid = Grid::from_snapshot(snapshot, field_size)?;
        let coordinate = *grid
            .empty_coordinates()
            .choose(rng)
            .ok_or(EngineError::NoEmptyCellAvailable)?;
        let value = if rng.gen_bool(self.high_value_probability) {
            HIGH_VALUE
        } else {
            LOW_VALUE
        };

        let id = ids
            .allocate()
            .ok_or_else(|| EngineError::invariant(coordinate, "tile identifiers exhausted"))?;

        Ok(Tile {
            spawned: true,
            ..Tile::new(id, value, coordinate)
        })
    }
}
