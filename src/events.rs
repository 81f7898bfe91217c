//! Event handling functions for player input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    merge::Direction,
    types::{self, MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Time in milliseconds to wait for input before redrawing.
const POLL_TIMEOUT_MS: u64 = 50;

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the handler of the current
/// screen. It uses a timeout to keep the settle timer ticking while no key is pressed.
///
/// # Errors
///
/// This function returns an error if reading terminal events or updating the game fails.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(POLL_TIMEOUT_MS))? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key)?;
        }
    }

    app.settle.update();

    Ok(())
}

/// Dispatches a single key event to the handler of the current screen.
///
/// # Errors
///
/// This function returns an error if updating the game fails.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    if key.code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    match app.screen {
        Screen::MainMenu(item) => handle_main_menu(app, item, key.code)?,
        Screen::OptionsMenu(item) => handle_options_menu(app, item, key.code)?,
        Screen::InGame => handle_in_game(app, key.code)?,
    }

    Ok(())
}

/// Handles navigation and selection in the main menu.
fn handle_main_menu(app: &mut App, item: MainMenuItem, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::StartGame => app.start_game()?,
            MainMenuItem::Options => app.screen = Screen::OptionsMenu(OptionsMenuItem::Size),
            MainMenuItem::Quit => app.exit = true,
        },
        _ => {}
    }

    Ok(())
}

/// Handles navigation and selection in the options menu.
fn handle_options_menu(app: &mut App, item: OptionsMenuItem, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::OptionsMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::OptionsMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            OptionsMenuItem::Size => {
                let size = types::next_board_size(app.config.field_size());
                app.config = app.config.with_field_size(size)?;
            }
            OptionsMenuItem::Back => app.screen = Screen::MainMenu(MainMenuItem::Options),
        },
        KeyCode::Char('h') | KeyCode::Esc => app.screen = Screen::MainMenu(MainMenuItem::Options),
        _ => {}
    }

    Ok(())
}

/// Handles moves and history commands on the board screen.
///
/// Moves arriving while the previous move is still settling are dropped, so the engine never sees
/// a second move before the first one has been shown.
fn handle_in_game(app: &mut App, code: KeyCode) -> Result<()> {
    let direction = match code {
        KeyCode::Char('h') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('j') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('l') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    };

    if let Some(direction) = direction {
        if app.settle.is_settling() {
            return Ok(());
        }
        let outcome = app.session.apply_move(direction)?;
        app.notice = outcome.game_over.then_some("No moves left");
        if outcome.committed() {
            app.settle.start();
        }
        return Ok(());
    }

    match code {
        KeyCode::Char('u') => {
            let outcome = app.session.undo()?;
            app.settle.clear();
            app.notice = (!outcome.ok).then_some("Nothing to undo");
        }
        KeyCode::Char('r') => {
            let outcome = app.session.redo()?;
            app.settle.clear();
            app.notice = (!outcome.ok).then_some("Nothing to redo");
        }
        KeyCode::Char('n') => {
            let _ = app.session.new_game()?;
            app.settle.start();
            app.notice = None;
        }
        KeyCode::Esc => {
            app.settle.clear();
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        _ => {}
    }

    Ok(())
}
