use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::game::{GameStatus, Snapshot};
use crate::grid::{GridSize, Position};
use crate::theme::Rgb;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Every grid cell is drawn as two terminal columns.
pub const CELL_GLYPH: &str = "██";

const CELL_COLUMNS: u16 = 2;

/// Converts a theme color into a terminal color.
#[must_use]
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);

    let theme = snapshot.theme;
    let board = board_rect(play_area, snapshot.bounds);
    let block = Block::bordered()
        .border_style(Style::new().fg(to_color(theme.snake)).bg(to_color(theme.background)));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    fill_background(frame, inner, theme.background);
    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    match snapshot.status {
        GameStatus::Menu => render_start_menu(frame, play_area, snapshot),
        GameStatus::GameOver => render_game_over_menu(frame, play_area, snapshot),
        GameStatus::Playing | GameStatus::Quit => {}
    }
}

/// Centers the bordered board inside `area`, clipping when the terminal is too small.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2).min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn fill_background(frame: &mut Frame<'_>, inner: Rect, background: Rgb) {
    let style = Style::new().bg(to_color(background));
    let buffer = frame.buffer_mut();
    for y in inner.y..inner.bottom() {
        for x in inner.x..inner.right() {
            buffer.set_string(x, y, " ", style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let Some(food) = snapshot.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, food) else {
        return;
    };

    let style = Style::new()
        .fg(to_color(snapshot.theme.food))
        .bg(to_color(snapshot.theme.background));
    frame.buffer_mut().set_string(x, y, CELL_GLYPH, style);
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let theme = snapshot.theme;
    let buffer = frame.buffer_mut();

    // Tail first so the head wins on overlapping cells.
    for segment in snapshot.segments.iter().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, segment.position) else {
            continue;
        };

        let color = theme
            .background
            .blend(theme.snake, f32::from(segment.intensity) / 100.0);
        let style = Style::new()
            .fg(to_color(color))
            .bg(to_color(theme.background));
        buffer.set_string(x, y, CELL_GLYPH, style);
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::grid::{GridSize, Position};

    use super::{board_rect, logical_to_terminal};

    const BOUNDS: GridSize = GridSize {
        width: 30,
        height: 20,
    };

    #[test]
    fn board_is_centered_with_border() {
        let board = board_rect(Rect::new(0, 0, 100, 30), BOUNDS);

        assert_eq!(board, Rect::new(19, 4, 62, 22));
    }

    #[test]
    fn board_is_clipped_to_small_terminals() {
        let board = board_rect(Rect::new(0, 0, 40, 10), BOUNDS);

        assert_eq!(board, Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn cells_map_to_double_columns() {
        let inner = Rect::new(1, 1, 60, 20);

        assert_eq!(logical_to_terminal(inner, BOUNDS, Position::new(0, 0)), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, BOUNDS, Position::new(29, 19)), Some((59, 20)));
        assert_eq!(logical_to_terminal(inner, BOUNDS, Position::new(30, 0)), None);

        let clipped = Rect::new(1, 1, 10, 5);
        assert_eq!(logical_to_terminal(clipped, BOUNDS, Position::new(5, 0)), None);
    }
}
