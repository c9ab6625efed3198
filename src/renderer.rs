use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_WIDTH, GridSize};
use crate::game::{GameMode, GameState};
use crate::snake::Position;
use crate::theme::Theme;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

const GLYPH_CELL: &str = "██";
const GLYPH_FOOD: &str = "()";
const GLYPH_OBSTACLE: &str = "▓▓";

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let bounds = state.bounds();
    let board_width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let board_height = bounds.height.saturating_add(2);

    let [board_row, hud_row] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(2),
    ])
    .areas(frame.area());
    let [board_area] = Layout::horizontal([Constraint::Length(board_width)]).areas(board_row);
    let [hud_area] = Layout::horizontal([Constraint::Length(board_width)]).areas(hud_row);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_obstacles(frame, inner, state, theme);
    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);
    render_hud(frame, hud_area, state, theme);

    match state.mode() {
        GameMode::Menu => render_start_menu(frame, board_area, theme),
        GameMode::Paused => render_pause_menu(frame, board_area, theme),
        GameMode::GameOver => {
            render_game_over_menu(frame, board_area, state.score(), state.death_reason(), theme);
        }
        GameMode::Playing => {}
    }
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let style = Style::new().fg(theme.obstacle);
    let buffer = frame.buffer_mut();
    for cell in state.obstacles.cells() {
        if let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *cell) {
            buffer.set_string(x, y, GLYPH_OBSTACLE, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), state.food.position) else {
        return;
    };

    let style = Style::new()
        .fg(theme.food_color(state.food.power_up))
        .add_modifier(Modifier::BOLD);
    frame.buffer_mut().set_string(x, y, GLYPH_FOOD, style);
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let snake = &state.snake;
    let body_color = if snake.is_invincible() {
        theme.snake_invincible
    } else if snake.is_ghost() {
        theme.snake_ghost
    } else {
        theme.snake_body
    };
    let last_index = snake.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    // Tail first so the head wins wherever ghost mode lets segments overlap.
    for (index, segment) in snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new().fg(theme.snake_head).add_modifier(Modifier::BOLD)
        } else if index == last_index {
            Style::new().fg(theme.snake_tail)
        } else {
            Style::new().fg(body_color)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
