use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::Snapshot;
use crate::renderer::to_color;

const SEPARATOR: &str = " │ ";

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot, to_color(snapshot.theme.snake)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}

fn info_line(snapshot: &Snapshot<'_>, value_color: Color) -> Line<'static> {
    let value = Style::default().fg(value_color);
    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(snapshot.score.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Length: "),
        Span::styled(snapshot.segments.len().to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Speed: "),
        Span::styled(format!("{}/s", snapshot.tick_rate), value),
        Span::raw(SEPARATOR),
        Span::raw("Bonus in: "),
        Span::styled(snapshot.foods_until_bonus.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Hi: "),
        Span::styled(snapshot.best_score.to_string(), value),
    ])
}
