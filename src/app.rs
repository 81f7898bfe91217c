//! Core application state and logic for the terminal front end.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    animation::SettleTimer,
    config::Config,
    events,
    session::GameSession,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the puzzle.
///
/// This structure holds the state from which Ratatui renders the game and which Crossterm events
/// write to. The game logic itself lives in the [`GameSession`]; the application only decides
/// which screen is shown and forwards player input.
pub struct App {
    /// Application exit flag.
    ///
    /// This field is set to `true` when the player wants to quit the game but it starts off
    /// `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the player.
    pub(crate) screen: Screen,
    /// Configuration the next game will be started with.
    ///
    /// The options menu edits this value. A running session keeps its own copy, so changes only
    /// apply once a new session is created.
    pub(crate) config: Config,
    /// Running game.
    pub(crate) session: GameSession,
    /// Guard that drops move input while the last committed move is highlighted.
    pub(crate) settle: SettleTimer,
    /// One-line message shown under the board, such as a rejected undo.
    pub(crate) notice: Option<&'static str>,
}

impl App {
    /// Creates the application and starts a first game with the given configuration.
    ///
    /// # Errors
    ///
    /// This function returns an error if the first game cannot be set up.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            config,
            session: GameSession::new(config)?,
            settle: SettleTimer::new(),
            notice: None,
        })
    }

    /// Enters the board screen, replacing the session if the configuration changed meanwhile.
    ///
    /// # Errors
    ///
    /// This function returns an error if a replacement game cannot be set up.
    pub(crate) fn start_game(&mut self) -> Result<()> {
        if self.session.config() != &self.config {
            self.session = GameSession::new(self.config)?;
            self.settle.clear();
            self.notice = None;
        }
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws the current screen and handles player input until the exit flag is
    /// raised, after which it returns to the call site.
    ///
    /// # Errors
    ///
    /// This function returns an error if drawing to the terminal or reading events fails.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(|err| std::io::Error::other(err.to_string()))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
