//! Session configuration and its command-line front.

use clap::Parser;

use crate::{
    error::EngineError,
    spawn::{SpawnPolicy, DEFAULT_HIGH_VALUE_PROBABILITY},
};

/// Smallest accepted board edge length.
pub const MIN_FIELD_SIZE: usize = 2;

/// Board edge length of the classic game.
pub const DEFAULT_FIELD_SIZE: usize = 4;

/// Command-line arguments of the terminal game.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Edge length of the square board.
    #[arg(short, long, default_value_t = DEFAULT_FIELD_SIZE)]
    pub size: usize,
    /// Probability of spawning a 4 instead of a 2.
    #[arg(long, default_value_t = DEFAULT_HIGH_VALUE_PROBABILITY)]
    pub four_probability: f64,
    /// Seed for the tile spawner, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Let a tile produced by a merge merge again within the same move.
    #[arg(long, hide = true)]
    pub merge_chaining: bool,
}

/// Validated parameters of a game session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Edge length of the square board.
    field_size: usize,
    /// Placement rules for new tiles.
    spawn_policy: SpawnPolicy,
    /// Whether merge products may merge again within one move.
    merge_chaining_allowed: bool,
    /// Seed for the session's random number generator.
    seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_size: DEFAULT_FIELD_SIZE,
            spawn_policy: SpawnPolicy::default(),
            merge_chaining_allowed: false,
            seed: None,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = EngineError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let config = Self::new(args.size)?
            .with_high_value_probability(args.four_probability)?
            .with_merge_chaining(args.merge_chaining);

        Ok(match args.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        })
    }
}

impl Config {
    /// Creates the default configuration for a board of the given edge length.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvalidConfig`] if `field_size` is smaller than
    /// [`MIN_FIELD_SIZE`].
    pub fn new(field_size: usize) -> Result<Self, EngineError> {
        if field_size < MIN_FIELD_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "field size {field_size} is smaller than {MIN_FIELD_SIZE}"
            )));
        }

        Ok(Self {
            field_size,
            ..Self::default()
        })
    }

    /// Changes the edge length of the board, keeping every other setting.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvalidConfig`] if `field_size` is smaller than
    /// [`MIN_FIELD_SIZE`].
    pub fn with_field_size(self, field_size: usize) -> Result<Self, EngineError> {
        Ok(Self {
            field_size: Self::new(field_size)?.field_size,
            ..self
        })
    }

    /// Sets the probability of spawning a 4.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvalidConfig`] if the probability lies outside of
    /// `[0, 1]`.
    pub fn with_high_value_probability(self, probability: f64) -> Result<Self, EngineError> {
        Ok(Self {
            spawn_policy: SpawnPolicy::new(probability)?,
            ..self
        })
    }

    /// Allows or forbids merge products from merging again within one move.
    #[must_use]
    pub const fn with_merge_chaining(self, allowed: bool) -> Self {
        Self {
            merge_chaining_allowed: allowed,
            ..self
        }
    }

    /// Fixes the seed of the session's random number generator.
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Returns the edge length of the board.
    #[must_use]
    pub const fn field_size(&self) -> usize {
        self.field_size
    }

    /// Returns the placement rules for new tiles.
    #[must_use]
    pub const fn spawn_policy(&self) -> &SpawnPolicy {
        &self.spawn_policy
    }

    /// Returns whether merge products may merge again within one move.
    #[must_use]
    pub const fn merge_chaining_allowed(&self) -> bool {
        self.merge_chaining_allowed
    }

    /// Returns the fixed seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}
