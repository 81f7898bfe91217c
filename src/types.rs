//! Type definitions and enums for the front end's navigation state.

use std::ops::RangeInclusive;

/// Board sizes offered by the options menu.
pub(crate) const BOARD_SIZES: RangeInclusive<usize> = 3..=8;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    OptionsMenu(OptionsMenuItem),
    /// Board screen where moves are played.
    InGame,
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option, which also resumes a running game.
    StartGame,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::StartGame => Self::Options,
            Self::Options | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::StartGame | Self::Options => Self::StartGame,
            Self::Quit => Self::Options,
        }
    }
}

/// Options menu navigation choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// Board size selector; selecting it cycles through [`BOARD_SIZES`].
    Size,
    /// "Back" navigation option.
    Back,
}

impl OptionsMenuItem {
    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Size | Self::Back => Self::Back,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Size | Self::Back => Self::Size,
        }
    }
}

/// Generic menu type configuration.
///
/// The main and options menus share their framing; this enumeration carries what differs between
/// them, namely their title and their number of entries.
pub(crate) enum MenuType {
    /// Main menu with the given number of entries.
    MainMenu(u8),
    /// Options menu with the given number of entries.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the title drawn in the menu's border.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the number of entries, used to size the menu container.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

/// Returns the board size that follows `size` in [`BOARD_SIZES`], wrapping around.
pub(crate) fn next_board_size(size: usize) -> usize {
    if BOARD_SIZES.contains(&size) && size < *BOARD_SIZES.end() {
        size + 1
    } else {
        *BOARD_SIZES.start()
    }
}
