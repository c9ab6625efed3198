use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::{ActivePowerUp, GameMode, GameState};
use crate::theme::Theme;

const SEPARATOR: &str = " │ ";

/// Renders the two HUD rows below the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let [stats_area, status_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(stats_line(state, theme)).alignment(Alignment::Left),
        stats_area,
    );
    frame.render_widget(
        Paragraph::new(status_line(state, theme)).alignment(Alignment::Left),
        status_area,
    );
}

fn stats_line(state: &GameState, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.hud_label);
    let value = Style::default().fg(theme.hud_value);

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(state.score().to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Level: ", label),
        Span::styled(state.level().to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Food: ", label),
        Span::styled(
            format!("{}/{}", state.food_collected(), state.food_to_next_level()),
            value,
        ),
        Span::styled(SEPARATOR, label),
        Span::styled("Length: ", label),
        Span::styled(state.snake.len().to_string(), value),
    ])
}

fn status_line(state: &GameState, theme: &Theme) -> Line<'static> {
    if let Some(active) = state.active_power_up() {
        return Line::from(Span::styled(
            power_up_text(active),
            Style::default().fg(theme.food_color(Some(active.kind))),
        ));
    }

    if state.mode() == GameMode::Playing && state.is_waiting_for_input() {
        return Line::from(Span::styled(
            "Press a direction to start moving",
            Style::default().fg(theme.hud_label),
        ));
    }

    Line::default()
}

fn power_up_text(active: ActivePowerUp) -> String {
    format!(
        "{} {:.1}s",
        active.kind.label(),
        active.remaining.as_secs_f32()
    )
}
