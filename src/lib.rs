//! Sliding-tile merge puzzle with undo, redo and tile-tracking snapshots.
//!
//! The engine is split into small pieces that the terminal front end drives through a
//! [`session::GameSession`]:
//!
//! - [`tile`] and [`grid`] hold the board model, where every tile keeps a stable identity.
//! - [`merge`] slides a board in one [`merge::Direction`] and merges equal neighbors.
//! - [`spawn`] places a new tile on a random empty cell.
//! - [`terminal`] decides whether any move is left.
//! - [`history`] stores committed snapshots behind an undo/redo cursor.
//!
//! The [`App`] type wraps a session in a Ratatui interface with a main menu, an options menu and
//! the board itself.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod animation;
mod app;
pub mod config;
pub mod error;
mod events;
pub mod grid;
pub mod history;
pub mod logging;
pub mod merge;
pub mod session;
pub mod spawn;
pub mod terminal;
pub mod tile;
mod types;
mod ui;

pub use app::App;
