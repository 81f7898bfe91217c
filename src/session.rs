//! Orchestration of complete moves over the game history.
//!
//! A move runs as one synchronous unit: the active snapshot is copied with its per-move flags
//! cleared, the copy is slid, an effective result receives one spawned tile and is committed, and
//! the terminal state is evaluated on what was committed. Nothing about the session changes until
//! every fallible step has succeeded.

use rand::{rngs::StdRng, Rng, SeedableRng as _};
use tracing::{debug, error, info, trace, warn};

use crate::{
    config::Config,
    error::EngineError,
    grid::{Grid, Snapshot},
    history::MoveHistory,
    merge::{self, Direction},
    terminal,
    tile::IdAllocator,
};

/// Number of tiles placed on the board when a game starts.
pub const SEED_TILES: usize = 2;

/// How a move request was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveStatus {
    /// The move changed the board and a new snapshot was committed.
    Committed,
    /// The move would not change the board; nothing was committed.
    NoOp,
    /// The game is over; only a new game can change the board.
    GameOver,
    /// The request was not a valid move and was not attempted.
    Rejected(EngineError),
}

/// Result of a move request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Active snapshot after the request.
    pub snapshot: Snapshot,
    /// Whether the active snapshot admits no further move.
    pub game_over: bool,
    /// How the request was resolved.
    pub status: MoveStatus,
}

impl MoveOutcome {
    /// Returns whether the request committed a new snapshot.
    #[must_use]
    pub fn committed(&self) -> bool {
        self.status == MoveStatus::Committed
    }
}

/// Result of an undo or redo request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryOutcome {
    /// Active snapshot after the request.
    pub snapshot: Snapshot,
    /// Whether the cursor actually moved.
    pub ok: bool,
}

/// One running game: its configuration, history and randomness.
///
/// The session owns the identifier allocator and the random number generator, so two sessions
/// never influence each other.
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    /// Validated session parameters.
    config: Config,
    /// Committed snapshots and the cursor naming the active one.
    history: MoveHistory,
    /// Source of identifiers for spawned tiles and merge products.
    ids: IdAllocator,
    /// Source of randomness for the spawn policy.
    rng: R,
    /// Whether the active snapshot admits no further move.
    game_over: bool,
}

impl GameSession<StdRng> {
    /// Starts a new game, seeding the generator from the configuration or from the system.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if the seed tiles cannot be
    /// placed, which does not happen for a validated [`Config`].
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let rng = config
            .seed()
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameSession<R> {
    /// Starts a new game drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if the seed tiles cannot be
    /// placed, which does not happen for a validated [`Config`].
    pub fn with_rng(config: Config, mut rng: R) -> Result<Self, EngineError> {
        let mut ids = IdAllocator::new();
        let initial = seed_snapshot(&config, &mut ids, &mut rng).map_err(violation)?;
        let game_over =
            terminal::is_game_over(&initial, config.field_size()).map_err(violation)?;
        info!(field_size = config.field_size(), "started new game");

        Ok(Self {
            config,
            history: MoveHistory::new(initial),
            ids,
            rng,
            game_over,
        })
    }

    /// Resumes play from an existing snapshot.
    ///
    /// Identifiers handed out afterwards are greater than every identifier in `snapshot`.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if `snapshot` does not fit on the
    /// configured board or holds a value that is not a power of two.
    pub fn from_snapshot(config: Config, snapshot: Snapshot, rng: R) -> Result<Self, EngineError> {
        let _ = Grid::from_snapshot(&snapshot, config.field_size()).map_err(violation)?;
        let ids = snapshot.max_id().map_or_else(IdAllocator::new, IdAllocator::after);
        let game_over =
            terminal::is_game_over(&snapshot, config.field_size()).map_err(violation)?;

        Ok(Self {
            config,
            history: MoveHistory::new(snapshot),
            ids,
            rng,
            game_over,
        })
    }

    /// Slides the board in `direction` and commits the result if it changed anything.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if the active snapshot breaks the
    /// grid invariants. The session is left exactly as it was in that case.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome, EngineError> {
        if self.game_over {
            debug!(%direction, "ignored move after game over");
            return Ok(self.move_outcome(MoveStatus::GameOver));
        }

        let size = self.config.field_size();
        let before = self.history.current().prepared_for_move();
        let mut ids = self.ids.clone();

        let moved = merge::slide_snapshot(
            &before,
            size,
            direction,
            self.config.merge_chaining_allowed(),
            &mut ids,
        )
        .map_err(violation)?;
        if moved.layout() == before.layout() {
            debug!(%direction, "ignored move without effect");
            return Ok(self.move_outcome(MoveStatus::NoOp));
        }

        // An effective move either merged or slid a tile into a free cell, so one is left over.
        let spawned = self
            .config
            .spawn_policy()
            .spawn(&moved, size, &mut ids, &mut self.rng)
            .map_err(violation)?;
        trace!(id = %spawned.id, value = spawned.value, at = %spawned.coordinate, "spawned tile");

        let committed = moved.with_tile(spawned);
        let game_over = terminal::is_game_over(&committed, size).map_err(violation)?;

        self.ids = ids;
        self.history.commit(committed);
        self.game_over = game_over;
        debug!(
            %direction,
            cursor = self.history.cursor(),
            game_over,
            "committed move"
        );

        Ok(self.move_outcome(MoveStatus::Committed))
    }

    /// Parses a free-form direction symbol and applies the move it names.
    ///
    /// Unknown symbols are reported through [`MoveStatus::Rejected`] without touching the board.
    ///
    /// # Errors
    ///
    /// This function returns the same errors as [`GameSession::apply_move`].
    pub fn apply_symbol(&mut self, symbol: &str) -> Result<MoveOutcome, EngineError> {
        match symbol.parse::<Direction>() {
            Ok(direction) => self.apply_move(direction),
            Err(err) => {
                warn!(%err, "rejected move input");
                Ok(self.move_outcome(MoveStatus::Rejected(err)))
            }
        }
    }

    /// Steps back to the previous snapshot, if any.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if the restored snapshot breaks
    /// the grid invariants, which cannot happen for committed snapshots.
    pub fn undo(&mut self) -> Result<HistoryOutcome, EngineError> {
        let ok = self.history.undo().is_ok();
        self.history_outcome(ok, "undo")
    }

    /// Steps forward to the next snapshot, if any.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if the restored snapshot breaks
    /// the grid invariants, which cannot happen for committed snapshots.
    pub fn redo(&mut self) -> Result<HistoryOutcome, EngineError> {
        let ok = self.history.redo().is_ok();
        self.history_outcome(ok, "redo")
    }

    /// Throws the history away and starts over with two fresh tiles.
    ///
    /// # Errors
    ///
    /// This function returns [`EngineError::InvariantViolation`] if the seed tiles cannot be
    /// placed, which does not happen for a validated [`Config`].
    pub fn new_game(&mut self) -> Result<Snapshot, EngineError> {
        let mut ids = IdAllocator::new();
        let initial = seed_snapshot(&self.config, &mut ids, &mut self.rng).map_err(violation)?;
        let game_over =
            terminal::is_game_over(&initial, self.config.field_size()).map_err(violation)?;

        self.ids = ids;
        self.history.reset(initial);
        self.game_over = game_over;
        info!(field_size = self.config.field_size(), "started new game");

        Ok(self.history.current().clone())
    }

    /// Returns the active snapshot.
    #[must_use]
    pub fn current_snapshot(&self) -> &Snapshot {
        self.history.current()
    }

    /// Returns whether the active snapshot admits no further move.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns whether an older snapshot is available.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns whether a newer snapshot is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns the full move history.
    #[must_use]
    pub const fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Returns the session parameters.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the edge length of the board.
    #[must_use]
    pub const fn field_size(&self) -> usize {
        self.config.field_size()
    }

    /// Packs the active state into a [`MoveOutcome`].
    fn move_outcome(&self, status: MoveStatus) -> MoveOutcome {
        MoveOutcome {
            snapshot: self.history.current().clone(),
            game_over: self.game_over,
            status,
        }
    }

    /// Re-evaluates the terminal state after a cursor change and packs a [`HistoryOutcome`].
    fn history_outcome(&mut self, ok: bool, action: &str) -> Result<HistoryOutcome, EngineError> {
        if ok {
            self.game_over = terminal::is_game_over(self.history.current(), self.field_size())
                .map_err(violation)?;
            debug!(action, cursor = self.history.cursor(), "moved history cursor");
        } else {
            debug!(action, "history cursor already at its limit");
        }

        Ok(HistoryOutcome {
            snapshot: self.history.current().clone(),
            ok,
        })
    }
}

/// Builds the opening snapshot of a game.
fn seed_snapshot<R: Rng + ?Sized>(
    config: &Config,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Result<Snapshot, EngineError> {
    let mut snapshot = Snapshot::new();
    for _ in 0..SEED_TILES {
        let tile = config
            .spawn_policy()
            .spawn(&snapshot, config.field_size(), ids, rng)?;
        snapshot = snapshot.with_tile(tile);
    }

    Ok(snapshot)
}

/// Logs an error that aborted an operation and hands it back.
fn violation(err: EngineError) -> EngineError {
    error!(%err, "aborted operation");
    err
}
