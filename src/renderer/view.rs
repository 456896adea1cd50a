//! Session presentation
//!
//! The playfield maps onto the framebuffer at three characters per grid cell
//! and one text row per grid row, with a status line underneath.

use crate::consts::*;
use crate::session::{PauseOption, Screen, Session};
use crate::sim::{Difficulty, Facing, LANES, Obstacle, Outcome, Round};

use super::fb::{FrameBuffer, Rgb, Style};

/// Characters per grid cell
pub const CELL_COLS: i32 = 3;
pub const VIEW_WIDTH: u16 = (GRID_WIDTH * CELL_COLS) as u16;
/// Board rows plus the status line
pub const VIEW_HEIGHT: u16 = GRID_HEIGHT as u16 + 1;

const STATUS_ROW: i32 = GRID_HEIGHT;

const GOAL: Rgb = Rgb::new(40, 120, 60);
const GRASS: Rgb = Rgb::new(24, 64, 32);
const ROAD: Rgb = Rgb::new(48, 48, 52);
const BACKDROP: Rgb = Rgb::new(12, 16, 24);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const HIGHLIGHT: Rgb = Rgb::new(250, 210, 60);
const ACTOR: Rgb = Rgb::new(120, 250, 120);
const LOSS: Rgb = Rgb::new(240, 80, 80);
const WIN: Rgb = Rgb::new(110, 230, 140);

/// Obstacle colors, picked by sprite index
const OBSTACLE_COLORS: [Rgb; 4] = [
    Rgb::new(220, 60, 60),
    Rgb::new(70, 140, 230),
    Rgb::new(230, 160, 40),
    Rgb::new(190, 90, 210),
];

pub const TITLE: &str = "Road Hopper";
pub const START_PROMPT: &str = "Press ENTER to Start";
pub const PAUSED: &str = "Paused";
pub const GAME_OVER: &str = "Game Over!";
pub const YOU_WIN: &str = "You Win!";
pub const RESTART_PROMPT: &str = "Press R to Restart, ESC to return to Menu";

/// Draws a session into a framebuffer
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Ticks per second, for the elapsed-time readout
    frame_rate: u32,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(FRAME_RATE)
    }
}

impl GameView {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate: frame_rate.max(1),
        }
    }

    pub fn render(&self, session: &Session) -> FrameBuffer {
        let mut fb = FrameBuffer::new(VIEW_WIDTH, VIEW_HEIGHT);
        self.render_into(session, &mut fb);
        fb
    }

    pub fn render_into(&self, session: &Session, fb: &mut FrameBuffer) {
        match (session.screen(), session.round()) {
            (Screen::Menu, _) | (_, None) => draw_menu(fb, session.difficulty()),
            (Screen::Playing, Some(round)) => draw_round(fb, round, self.frame_rate),
            (Screen::Paused, Some(round)) => {
                draw_round(fb, round, self.frame_rate);
                draw_pause(fb, session.pause_option());
            }
        }
    }
}

/// Title, difficulty selector and start prompt
pub fn draw_menu(fb: &mut FrameBuffer, selected: Difficulty) {
    let plain = Style::new(TEXT, BACKDROP);
    fb.clear(plain);
    fb.put_str_centered(1, TITLE, Style::new(ACTOR, BACKDROP).bold());

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let y = 4 + 2 * i as i32;
        if *difficulty == selected {
            let label = format!("> {} <", difficulty.as_str());
            fb.put_str_centered(y, &label, Style::new(HIGHLIGHT, BACKDROP).bold());
        } else {
            fb.put_str_centered(y, difficulty.as_str(), plain);
        }
    }

    fb.put_str_centered(10, START_PROMPT, plain);
    fb.put_str(0, STATUS_ROW, "Up/Down choose  Q quit", plain);
}

/// Board, obstacles, actor, and the end banner once the round is over
pub fn draw_round(fb: &mut FrameBuffer, round: &Round, frame_rate: u32) {
    fb.clear(Style::new(TEXT, BACKDROP));
    for row in 0..GRID_HEIGHT {
        fb.fill_span(0, VIEW_WIDTH as i32, row, ' ', Style::new(TEXT, row_color(row)));
    }

    for obstacle in &round.obstacles {
        draw_obstacle(fb, obstacle);
    }

    let actor = &round.actor;
    let x = actor.column() * CELL_COLS + CELL_COLS / 2;
    let style = Style::new(ACTOR, row_color(actor.row())).bold();
    fb.put(x, actor.row(), actor_glyph(actor.facing), style);

    let status = format!(
        "{} | {:.1}s | arrows move, Esc pause",
        round.difficulty.as_str(),
        round.time_ticks as f32 / frame_rate.max(1) as f32
    );
    fb.put_str(0, STATUS_ROW, &status, Style::new(TEXT, BACKDROP));

    match round.outcome {
        Outcome::Active => {}
        Outcome::Lost => draw_banner(fb, GAME_OVER, LOSS),
        Outcome::Won => draw_banner(fb, YOU_WIN, WIN),
    }
}

fn draw_obstacle(fb: &mut FrameBuffer, obstacle: &Obstacle) {
    let (start, end) = obstacle_columns(obstacle);
    let color = OBSTACLE_COLORS[obstacle.sprite % OBSTACLE_COLORS.len()];
    let style = Style::new(color, row_color(obstacle.row));
    fb.fill_span(start, end, obstacle.row, '█', style);
}

/// Character columns covered by an obstacle's pixel extent (may be off-screen)
fn obstacle_columns(obstacle: &Obstacle) -> (i32, i32) {
    let to_cols = |px: f32| px * CELL_COLS as f32 / GRID_SIZE as f32;
    let start = to_cols(obstacle.pos.x).floor() as i32;
    let end = to_cols(obstacle.pos.x + obstacle.size.x).ceil() as i32;
    (start, end)
}

fn actor_glyph(facing: Facing) -> char {
    match facing {
        Facing::Up => '▲',
        Facing::Down => '▼',
        Facing::Left => '◀',
        Facing::Right => '▶',
    }
}

fn row_color(row: i32) -> Rgb {
    if row == 0 {
        GOAL
    } else if LANES.iter().any(|lane| lane.row == row) {
        ROAD
    } else {
        GRASS
    }
}

fn draw_banner(fb: &mut FrameBuffer, headline: &str, color: Rgb) {
    let mid = GRID_HEIGHT / 2;
    fb.fill_span(0, VIEW_WIDTH as i32, mid - 1, ' ', Style::new(TEXT, BACKDROP));
    fb.fill_span(0, VIEW_WIDTH as i32, mid, ' ', Style::new(TEXT, BACKDROP));
    fb.put_str_centered(mid - 1, headline, Style::new(color, BACKDROP).bold());
    fb.put_str_centered(mid, RESTART_PROMPT, Style::new(TEXT, BACKDROP));
}

fn draw_pause(fb: &mut FrameBuffer, selected: PauseOption) {
    fb.dim_all();
    let box_style = Style::new(TEXT, BACKDROP);
    for y in 3..=8 {
        fb.fill_span(14, VIEW_WIDTH as i32 - 14, y, ' ', box_style);
    }
    fb.put_str_centered(3, PAUSED, box_style.bold());
    for (i, option) in PauseOption::ALL.iter().enumerate() {
        let y = 5 + 2 * i as i32;
        if *option == selected {
            let label = format!("> {} <", option.as_str());
            fb.put_str_centered(y, &label, Style::new(HIGHLIGHT, BACKDROP).bold());
        } else {
            fb.put_str_centered(y, option.as_str(), box_style);
        }
    }
}
