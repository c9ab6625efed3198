use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::snake::Collision;
use crate::theme::Theme;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = [
        "ROGUE SNAKE",
        "",
        "[Enter]/[Space] Start",
        "[Q] Quit",
        "",
        "Arrows/WASD move, [Esc]/[P] pause",
    ];
    render_popup(frame, area, " start ", &lines, theme);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = ["PAUSED", "", "[Esc]/[P] Resume", "[Q] Quit"];
    render_popup(frame, area, " pause ", &lines, theme);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<Collision>,
    theme: &Theme,
) {
    let score_line = format!("Score: {score}");
    let lines = [
        "GAME OVER",
        "",
        score_line.as_str(),
        death_reason_text(death_reason),
        "",
        "[R] Play Again",
        "[Q] Quit",
    ];
    render_popup(frame, area, " game over ", &lines, theme);
}

fn death_reason_text(death_reason: Option<Collision>) -> &'static str {
    match death_reason {
        Some(Collision::Wall) => "Cause: hit wall",
        Some(Collision::Body) => "Cause: hit yourself",
        Some(Collision::Obstacle) => "Cause: hit obstacle",
        None => "",
    }
}

/// First line is the title; the rest is body text.
fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: &[&str], theme: &Theme) {
    let popup = centered_popup(area, popup_width(lines), popup_height(lines));
    frame.render_widget(Clear, popup);

    let mut text: Vec<Line<'_>> = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        if index == 0 {
            text.push(Line::styled(
                *line,
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            text.push(Line::from(*line));
        }
    }

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(theme.menu_footer)),
            ),
        popup,
    );
}

fn popup_width(lines: &[&str]) -> u16 {
    let widest = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    u16::try_from(widest + 6).unwrap_or(u16::MAX)
}

fn popup_height(lines: &[&str]) -> u16 {
    u16::try_from(lines.len() + 2).unwrap_or(u16::MAX)
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{centered_popup, popup_height, popup_width};

    #[test]
    fn popup_sizes_follow_content() {
        let lines = ["GAME OVER", "", "[R] Play Again"];

        assert_eq!(popup_width(&lines), 20);
        assert_eq!(popup_height(&lines), 5);
    }

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 40, 20);

        assert_eq!(centered_popup(area, 10, 4), Rect::new(15, 8, 10, 4));
        assert!(centered_popup(area, 80, 40).width <= 40);
    }
}
