//! Session state machine
//!
//! Owns the menu selection, the pause menu and the current round, and turns
//! key presses into transitions:
//!
//! ```text
//! Menu --Enter--> Playing <--Escape--> Paused --Exit--> Menu
//!                    |
//!            (game over / won) --R--> Playing (respawn)
//!                    |
//!                 Escape --> Menu
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::sim::{Difficulty, Facing, ObstacleSprites, Round, RoundEvent, spawn_round, tick};

/// Keys the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Restart,
}

impl Key {
    /// Movement direction for arrow keys
    pub fn facing(&self) -> Option<Facing> {
        match self {
            Key::Up => Some(Facing::Up),
            Key::Down => Some(Facing::Down),
            Key::Left => Some(Facing::Left),
            Key::Right => Some(Facing::Right),
            _ => None,
        }
    }
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Difficulty selection
    Menu,
    /// Round in progress, over, or won
    Playing,
    /// Round frozen behind the pause menu
    Paused,
}

/// Pause menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseOption {
    #[default]
    Resume,
    Exit,
}

impl PauseOption {
    pub const ALL: [PauseOption; 2] = [PauseOption::Resume, PauseOption::Exit];

    pub fn as_str(&self) -> &'static str {
        match self {
            PauseOption::Resume => "Resume",
            PauseOption::Exit => "Exit",
        }
    }

    /// Neighbouring entry; with two entries up and down both toggle
    pub fn toggled(self) -> Self {
        match self {
            PauseOption::Resume => PauseOption::Exit,
            PauseOption::Exit => PauseOption::Resume,
        }
    }
}

/// The single mutable game session
#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    difficulty: Difficulty,
    pause_option: PauseOption,
    /// Present whenever the screen is not the menu
    round: Option<Round>,
    sprites: ObstacleSprites,
    rng: Pcg32,
}

impl Session {
    /// Start at the menu with `difficulty` preselected
    pub fn new(sprites: ObstacleSprites, difficulty: Difficulty, rng: Pcg32) -> Self {
        Self {
            screen: Screen::Menu,
            difficulty,
            pause_option: PauseOption::Resume,
            round: None,
            sprites,
            rng,
        }
    }

    /// Same as [`Session::new`] with a seeded generator
    pub fn with_seed(sprites: ObstacleSprites, difficulty: Difficulty, seed: u64) -> Self {
        Self::new(sprites, difficulty, Pcg32::seed_from_u64(seed))
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn pause_option(&self) -> PauseOption {
        self.pause_option
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn sprites(&self) -> &ObstacleSprites {
        &self.sprites
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: Key) {
        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Playing => self.playing_key(key),
            Screen::Paused => self.paused_key(key),
        }
    }

    /// Advance the simulation by one frame.
    ///
    /// Only a playing, unfinished round moves; menu and pause freeze it.
    pub fn update(&mut self) -> Option<RoundEvent> {
        if self.screen != Screen::Playing {
            return None;
        }
        self.round.as_mut().and_then(tick)
    }

    fn menu_key(&mut self, key: Key) {
        match key {
            Key::Up => self.difficulty = self.difficulty.prev(),
            Key::Down => self.difficulty = self.difficulty.next(),
            Key::Enter => self.start_round(),
            _ => {}
        }
    }

    fn playing_key(&mut self, key: Key) {
        let Some(round) = self.round.as_mut() else {
            // Playing without a round cannot happen; fall back to the menu
            self.to_menu();
            return;
        };

        if round.outcome.is_over() {
            match key {
                Key::Restart => self.start_round(),
                Key::Escape => self.to_menu(),
                _ => {}
            }
            return;
        }

        if key == Key::Escape {
            self.screen = Screen::Paused;
            self.pause_option = PauseOption::Resume;
            log::debug!("Paused");
        } else if let Some(facing) = key.facing() {
            if !round.move_actor(facing) {
                log::debug!("Move {:?} rejected at {:?}", facing, round.actor.pos);
            }
        }
    }

    fn paused_key(&mut self, key: Key) {
        match key {
            Key::Up | Key::Down => self.pause_option = self.pause_option.toggled(),
            Key::Enter => match self.pause_option {
                PauseOption::Resume => self.screen = Screen::Playing,
                PauseOption::Exit => self.to_menu(),
            },
            Key::Escape => self.screen = Screen::Playing,
            _ => {}
        }
    }

    fn start_round(&mut self) {
        self.round = Some(spawn_round(self.difficulty, &self.sprites, &mut self.rng));
        self.screen = Screen::Playing;
    }

    fn to_menu(&mut self) {
        self.round = None;
        self.screen = Screen::Menu;
        log::debug!("Back to menu");
    }
}
