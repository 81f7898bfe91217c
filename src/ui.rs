//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::DOT,
    text::Line,
    widgets::{Block, BorderType, Clear},
    Frame,
};

use crate::{
    grid::Grid,
    tile::{Coordinate, Tile},
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Width in terminal cells of one board cell, borders included.
pub(crate) const CELL_WIDTH: u16 = 7;

/// Height in terminal cells of one board cell, borders included.
pub(crate) const CELL_HEIGHT: u16 = 3;

/// Key reference shown under the board.
const IN_GAME_KEYS: &str = "(hjkl/arrows) move / (u) undo / (r) redo / (n) new / (esc) menu";

/// Updates the application UI based on the persistent state.
///
/// This function renders the screen stored in the [`App`] structure, dispatching to the
/// appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout conversions or an inconsistent board.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::OptionsMenu(item) => options_menu(frame, item, app.config.field_size()),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders the framing shared by the main and options menus.
///
/// The menu is centered on screen inside a rounded border titled after `menu`. The returned
/// areas hold one line per menu entry.
pub(crate) fn init_menu(frame: &mut Frame, menu: &MenuType) -> Rc<[Rect]> {
    let [column] = Layout::horizontal([Constraint::Percentage(30)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [layout] = Layout::vertical([Constraint::Length(u16::from(menu.value()) + 2)])
        .flex(Flex::Center)
        .areas(column);

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Yellow)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);
    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders menu entries, highlighting the one at `active`.
fn menu_entries(frame: &mut Frame, menu: &MenuType, labels: &[String], active: usize) {
    let content_style = Style::default().fg(Color::Yellow);
    let active_content_style = Style::default().fg(Color::Black).bg(Color::Yellow);

    let rows = init_menu(frame, menu);
    for (idx, (area, label)) in rows.iter().zip(labels).enumerate() {
        let style = if idx == active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(label.as_str(), style).centered(), *area);
    }
}

/// Renders the main menu screen with its navigation options.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let labels = ["Start Game", "Options", "Quit"].map(str::to_owned);
    let active = match item {
        MainMenuItem::StartGame => 0,
        MainMenuItem::Options => 1,
        MainMenuItem::Quit => 2,
    };

    menu_entries(frame, &MenuType::MainMenu(3), &labels, active);
}

/// Renders the options menu screen, showing the board size of the next game.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem, field_size: usize) {
    clear(frame);

    let labels = [
        format!("Size: {field_size}x{field_size}"),
        "Return".to_owned(),
    ];
    let active = match item {
        OptionsMenuItem::Size => 0,
        OptionsMenuItem::Back => 1,
    };

    menu_entries(frame, &MenuType::OptionsMenu(2), &labels, active);
}

/// Returns the color a tile of the given value is drawn in.
pub(crate) const fn tile_color(value: u32) -> Color {
    match value.trailing_zeros() {
        0 | 1 => Color::White,
        2 => Color::LightYellow,
        3 => Color::Yellow,
        4 => Color::LightRed,
        5 => Color::Red,
        6 => Color::LightMagenta,
        7 => Color::Magenta,
        8 => Color::LightBlue,
        9 => Color::Blue,
        10 => Color::LightGreen,
        _ => Color::Green,
    }
}

/// Returns the screen area of a board cell, given the inner area of the board's border.
///
/// # Errors
///
/// This function returns an error if the coordinate does not fit in terminal units.
pub(crate) fn cell_area(board: Rect, coordinate: Coordinate) -> Result<Rect> {
    let column = u16::try_from(coordinate.column)?;
    let row = u16::try_from(coordinate.row)?;

    Ok(Rect::new(
        board.x + column * CELL_WIDTH,
        board.y + row * CELL_HEIGHT,
        CELL_WIDTH,
        CELL_HEIGHT,
    ))
}

/// Renders a single tile, emphasizing it while its move is still settling.
fn render_tile(frame: &mut Frame, area: Rect, tile: &Tile, settling: bool) {
    let fresh = settling && (tile.merged || tile.spawned);
    let color = tile_color(tile.value);

    let block = Block::bordered()
        .border_type(if fresh {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut style = Style::default().fg(color);
    if fresh {
        style = style.add_modifier(Modifier::BOLD);
    }
    frame.render_widget(
        Line::styled(tile.value.to_string(), style).centered(),
        inner,
    );
}

/// Renders the board screen with the active snapshot of the running game.
///
/// The board is centered horizontally by hand so that every cell lands on whole terminal
/// cells. If the terminal is too small for the board, a hint is shown instead.
///
/// # Errors
///
/// This function may return errors from coordinate conversions or if the active snapshot does
/// not fit on the board.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let size = u16::try_from(app.session.field_size())?;
    let board_width = size.saturating_mul(CELL_WIDTH).saturating_add(2);
    let board_height = size.saturating_mul(CELL_HEIGHT).saturating_add(2);

    let [content_area, status_area, keys_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if board_width > content_area.width || board_height > content_area.height {
        let hint = Line::styled("Enlarge the terminal to fit the board", Color::Yellow).centered();
        frame.render_widget(hint, content_area);
        return Ok(());
    }

    let offset_x = rounded_div::i32(i32::from(content_area.width - board_width), 2);
    let offset_y = rounded_div::i32(i32::from(content_area.height - board_height), 2);
    let board_area = Rect::new(
        content_area.x + u16::try_from(offset_x)?,
        content_area.y + u16::try_from(offset_y)?,
        board_width,
        board_height,
    )
    .intersection(content_area);

    let snapshot = app.session.current_snapshot();
    let board = Block::bordered()
        .title(format!("{size}x{size}"))
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .border_type(BorderType::Rounded);
    let inner = board.inner(board_area);
    frame.render_widget(board, board_area);

    let grid = Grid::from_snapshot(snapshot, app.session.field_size())?;
    for coordinate in grid.empty_coordinates() {
        let area = cell_area(inner, coordinate)?.intersection(inner);
        let dot = Line::styled(DOT, Color::DarkGray).centered();
        let middle = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .split(area)
            .first()
            .copied()
            .ok_or_eyre("failed to center empty cell marker")?;
        frame.render_widget(dot, middle);
    }

    let settling = app.settle.is_settling();
    for tile in grid.tiles() {
        let area = cell_area(inner, tile.coordinate)?.intersection(inner);
        render_tile(frame, area, tile, settling);
    }

    let status = if app.session.is_game_over() {
        Line::styled("Game over! (n) new game / (u) undo", Color::Red).centered()
    } else if let Some(notice) = app.notice {
        Line::styled(notice, Color::Yellow).centered()
    } else {
        Line::raw("")
    };
    frame.render_widget(status, status_area);
    frame.render_widget(
        Line::styled(IN_GAME_KEYS, Color::DarkGray).centered(),
        keys_area,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Config;

    /// Creates a test app with a fixed seed.
    fn create_test_app(size: usize) -> App {
        let config = Config::new(size)
            .expect("test size should be valid")
            .with_seed(21);
        App::new(config).expect("test app should start")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Flattens the rendered buffer into one string for content checks.
    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let app = create_test_app(4);
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
        let screen = rendered(&terminal);
        assert!(screen.contains("Start Game"));
        assert!(screen.contains("Quit"));
    }

    #[test]
    fn test_draw_options_menu_shows_size() {
        let mut app = create_test_app(4);
        let mut terminal = create_test_terminal();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Size);

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing options menu should succeed");
        assert!(rendered(&terminal).contains("Size: 4x4"));
    }

    #[test]
    fn test_draw_in_game_shows_tiles() {
        let mut app = create_test_app(4);
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing in-game screen should succeed");
        let screen = rendered(&terminal);
        assert!(screen.contains("4x4"));
        assert!(screen.contains("(u) undo"));
        let value = app
            .session
            .current_snapshot()
            .visible()
            .next()
            .expect("a new game has tiles")
            .value
            .to_string();
        assert!(screen.contains(&value));
    }

    #[test]
    fn test_draw_in_game_with_notice() {
        let mut app = create_test_app(3);
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        app.notice = Some("Nothing to undo");

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("in-game should render successfully");
        });

        assert!(result.is_ok(), "rendering in-game with a notice should succeed");
        assert!(rendered(&terminal).contains("Nothing to undo"));
    }

    #[test]
    fn test_draw_in_game_too_small() {
        let mut app = create_test_app(8);
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("in-game should render successfully");
        });

        assert!(result.is_ok(), "rendering an oversized board should succeed");
        assert!(rendered(&terminal).contains("Enlarge the terminal"));
    }

    #[test]
    fn test_draw_while_settling() {
        let mut app = create_test_app(4);
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        app.settle.start();

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("in-game should render successfully");
        });

        assert!(result.is_ok(), "rendering fresh tiles should succeed");
    }

    #[test]
    fn test_init_menu_entries() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, &MenuType::MainMenu(3));
            assert_eq!(layout.len(), 3, "main menu should have 3 items");
            let layout = init_menu(frame, &MenuType::OptionsMenu(2));
            assert_eq!(layout.len(), 2, "options menu should have 2 items");
        });

        assert!(result.is_ok(), "initializing menus should succeed");
    }

    #[test]
    fn test_cell_area() {
        let board = Rect::new(10, 5, 28, 12);

        let area = cell_area(board, Coordinate::new(1, 2)).expect("coordinate should convert");

        assert_eq!(area, Rect::new(24, 8, CELL_WIDTH, CELL_HEIGHT));
    }

    #[test]
    fn test_tile_color_progression() {
        assert_eq!(tile_color(2), Color::White);
        assert_eq!(tile_color(4), Color::LightYellow);
        assert_eq!(tile_color(2048), Color::Green);
        assert_ne!(tile_color(8), tile_color(16));
    }
}
