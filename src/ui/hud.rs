use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::GameSession;

/// Renders the status line and returns the remaining play area above it.
#[must_use]
pub fn render_hud<R>(frame: &mut Frame<'_>, area: Rect, session: &GameSession<R>) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(
            session.score(),
            session.chain.len(),
            session.tick_interval().as_millis(),
        ))
        .alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn status_line(score: u32, length: usize, interval_ms: u128) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(score.to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(length.to_string(), value),
        Span::styled("  Tick ", label),
        Span::styled(format!("{interval_ms}ms"), value),
    ])
}

#[cfg(test)]
mod tests {
    use super::status_line;

    #[test]
    fn status_line_lists_score_length_and_interval() {
        let text: String = status_line(7, 10, 430)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();

        assert_eq!(text, "Score 7  Length 10  Tick 430ms");
    }
}
