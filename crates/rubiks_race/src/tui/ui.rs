//! Stateless race rendering.
//!
//! Everything is placed at fixed terminal coordinates: help on row 1,
//! metrics on rows 3-4, the result message on row 6 and the board from
//! row 8. Anything outside the frame is clipped.

use crate::race::{RaceSnapshot, RaceStatus};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Paragraph},
};
use rubiks_puzzle::{BOARD_WIDTH, Cube, Direction};

const HELP: &str = "(Press ESC or Ctrl+C to quit)";

const BOARD_X: i32 = 5;
const BOARD_Y: i32 = 8;
const CELL_STEP_X: i32 = 8;
const CELL_STEP_Y: i32 = 4;
const CUBE_WIDTH: u16 = 6;
const CUBE_HEIGHT: u16 = 3;

const GOAL_X: i32 = 15;
const GOAL_Y: i32 = 13;
const GOAL_WIDTH: usize = 3;

/// Largest slide offset, in rows; columns use twice this.
const MAX_SLIDE: u64 = 2;

/// Renders one frame of the race.
pub fn draw(frame: &mut Frame, snapshot: &RaceSnapshot) {
    let area = frame.area();

    put_text(frame, area, 5, 1, HELP, Style::new().fg(Color::White));
    draw_metrics(frame, area, snapshot);
    draw_message(frame, area, *snapshot.status());
    draw_cubes(frame, area, snapshot);
    draw_goal(frame, area, snapshot);
}

/// Offset `(dx, dy)` of the cube that moved last, relative to its cell.
///
/// The cube starts out displaced towards the cell it came from and closes
/// the gap as the animation frame advances; `(0, 0)` once it has landed.
pub fn cube_offset(snapshot: &RaceSnapshot) -> (i32, i32) {
    let Some(direction) = (*snapshot.last_direction()).filter(|_| snapshot.is_animating()) else {
        return (0, 0);
    };

    let frames = u64::from(*snapshot.frames_per_move());
    let remaining = frames - 1 - u64::from(*snapshot.animation_frame());
    let d = match frames {
        0 | 1 => 0,
        _ => i32::try_from(MAX_SLIDE * remaining / (frames - 1)).unwrap_or(0),
    };

    // The cube travelled against the blank; draw it back towards its source.
    let (dx, dy) = step(direction.opposite());
    (-2 * dx * d, -dy * d)
}

/// Unit screen step of a move, in (column, row) cells.
fn step(direction: Direction) -> (i32, i32) {
    match direction {
        Direction::Left => (-1, 0),
        Direction::Right => (1, 0),
        Direction::Up => (0, -1),
        Direction::Down => (0, 1),
    }
}

fn draw_metrics(frame: &mut Frame, area: Rect, snapshot: &RaceSnapshot) {
    let name = Style::new().fg(Color::White);
    let value = Style::new().fg(Color::Yellow);

    put_text(frame, area, 5, 3, "Elapsed Time:", name);
    put_text(frame, area, 19, 3, &format!("{:.3?}", snapshot.elapsed()), value);
    put_text(frame, area, 5, 4, "Try Count:", name);
    put_text(frame, area, 16, 4, &snapshot.try_count().to_string(), value);
}

fn draw_message(frame: &mut Frame, area: Rect, status: RaceStatus) {
    let Some(message) = status.message() else {
        return;
    };
    let color = match status {
        RaceStatus::Complete => Color::Green,
        _ => Color::Red,
    };
    let style = Style::new().fg(color).add_modifier(Modifier::BOLD);
    put_text(frame, area, 15, 6, &format!("{message:^18}"), style);
}

fn draw_cubes(frame: &mut Frame, area: Rect, snapshot: &RaceSnapshot) {
    let (dx, dy) = cube_offset(snapshot);

    for (index, &cube) in snapshot.cubes().iter().enumerate() {
        let Some(color) = color_of(cube) else {
            continue;
        };

        let (row, col) = ((index / BOARD_WIDTH) as i32, (index % BOARD_WIDTH) as i32);
        let mut x = BOARD_X + col * CELL_STEP_X;
        let mut y = BOARD_Y + row * CELL_STEP_Y;
        if *snapshot.active_cell() == Some(index) {
            x += dx;
            y += dy;
        }

        put_block(frame, area, x, y, CUBE_WIDTH, CUBE_HEIGHT, color);
    }
}

fn draw_goal(frame: &mut Frame, area: Rect, snapshot: &RaceSnapshot) {
    for (index, &cube) in snapshot.goal().iter().enumerate() {
        let Some(color) = color_of(cube) else {
            continue;
        };
        let (row, col) = ((index / GOAL_WIDTH) as i32, (index % GOAL_WIDTH) as i32);
        let x = GOAL_X + col * CELL_STEP_X;
        let y = GOAL_Y + row * CELL_STEP_Y;
        put_block(frame, area, x, y, 2, 1, color);
    }
}

fn color_of(cube: Cube) -> Option<Color> {
    match cube {
        Cube::G => Some(Color::Green),
        Cube::R => Some(Color::Red),
        Cube::O => Some(Color::Indexed(208)),
        Cube::W => Some(Color::White),
        Cube::B => Some(Color::Blue),
        Cube::Y => Some(Color::Yellow),
        Cube::X => None,
    }
}

/// Part of the `width` x `height` rectangle at `(x, y)` that lies inside `area`.
fn clip(area: Rect, x: i32, y: i32, width: u16, height: u16) -> Option<Rect> {
    let x = u16::try_from(x).ok()?;
    let y = u16::try_from(y).ok()?;
    let rect = Rect::new(x, y, width, height).intersection(area);
    (!rect.is_empty()).then_some(rect)
}

fn put_text(frame: &mut Frame, area: Rect, x: i32, y: i32, text: &str, style: Style) {
    let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    if let Some(rect) = clip(area, x, y, width, 1) {
        frame.render_widget(Paragraph::new(text).style(style), rect);
    }
}

fn put_block(frame: &mut Frame, area: Rect, x: i32, y: i32, width: u16, height: u16, color: Color) {
    if let Some(rect) = clip(area, x, y, width, height) {
        frame.render_widget(Block::new().style(Style::new().bg(color)), rect);
    }
}
