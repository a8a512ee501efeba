use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::game::{GamePhase, GameSession};
use crate::input::Direction;
use crate::snake::{Position, Positioned};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Terminal columns per board cell; two keeps cells roughly square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_FOOD: &str = "()";
pub const GLYPH_SNAKE_BODY: &str = "[]";
pub const GLYPH_SNAKE_HEAD_UP: &str = "^^";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "vv";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "<<";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = ">>";

/// Renders the full game frame from immutable state.
pub fn render<R>(frame: &mut Frame<'_>, session: &GameSession<R>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, session);
    let board_area = board_rect(play_area, session.bounds());

    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    match session.phase() {
        GamePhase::NotStarted => {
            draw_board(frame, inner, session);
            render_start_menu(frame, play_area);
        }
        GamePhase::Running => draw_board(frame, inner, session),
        GamePhase::GameOver => {
            render_game_over_menu(frame, play_area, session.score(), session.death_reason());
        }
    }
}

fn draw_board<R>(frame: &mut Frame<'_>, inner: Rect, session: &GameSession<R>) {
    let bounds = session.bounds();
    let food = session.food();
    draw_cell(frame, inner, bounds, &food, GLYPH_FOOD, Style::new().fg(Color::Red));

    let body_style = Style::new().fg(Color::Green);
    for segment in session.segments().iter().skip(1) {
        draw_cell(frame, inner, bounds, segment, GLYPH_SNAKE_BODY, body_style);
    }

    // Head last so it stays visible when it overlaps the body.
    if let Some(head) = session.segments().first() {
        draw_cell(
            frame,
            inner,
            bounds,
            head,
            head_glyph(head.facing),
            Style::new()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn draw_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    entity: &impl Positioned,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, entity.position()) else {
        return;
    };
    frame.buffer_mut().set_string(x, y, glyph, style);
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right | Direction::None => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Centers the bordered board inside `area`, clipping when the terminal is
/// too small.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds
        .width
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
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
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
