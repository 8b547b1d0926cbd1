use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Difficulty;
use crate::game::{GameOverReason, Snapshot};
use crate::high_scores::HighScoreEntry;
use crate::renderer::to_color;

/// Draws the theme/difficulty selection screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE."))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(to_color(snapshot.theme.snake))
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let best = snapshot.high_scores.first().map_or(0, |entry| entry.score);
    let body = vec![
        Line::from(format!("Theme: < {} >", snapshot.theme_id)),
        Line::from(format!("Difficulty: {}", difficulty_row(snapshot.difficulty))),
        Line::from(""),
        Line::from(format!("High score: {best}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Up/Down theme, Left/Right difficulty, arrows/WASD to move"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        footer_row,
    );
}

/// Draws the game-over screen with the high-score table as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) {
    let popup = centered_popup(area, 70, 90);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {}", snapshot.score)),
        Line::from(reason_text(snapshot.game_over_reason)),
        Line::from(""),
    ];

    match snapshot.initials {
        Some(initials) => {
            lines.push(Line::from("New high score! Enter your initials:"));
            lines.push(Line::from(format!("[{initials:_<3}]")).style(
                Style::default()
                    .fg(to_color(snapshot.theme.food))
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from("[Enter] Save  [Esc] Skip"));
        }
        None => {
            lines.extend(table_lines(snapshot.high_scores));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Theme: < {} >   Difficulty: {}",
                snapshot.theme_id,
                snapshot.difficulty.label()
            )));
            lines.push(Line::from("[R]/[Enter] Play Again  [Q]/[Esc] Quit"));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn reason_text(reason: Option<GameOverReason>) -> &'static str {
    match reason {
        Some(GameOverReason::SelfCollision) => "Cause: bit yourself",
        Some(GameOverReason::Aborted) => "Cause: gave up",
        Some(GameOverReason::BoardFilled) => "Cause: no room left",
        None => "",
    }
}

fn difficulty_row(selected: Difficulty) -> String {
    Difficulty::ALL
        .iter()
        .map(|difficulty| {
            if *difficulty == selected {
                format!("[{}]", difficulty.label())
            } else {
                difficulty.label().to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn table_lines(entries: &[HighScoreEntry]) -> Vec<Line<'static>> {
    entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            Line::from(format!(
                "{:>2}. {:<3} {:>6}",
                rank + 1,
                entry.initials,
                entry.score
            ))
        })
        .collect()
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
