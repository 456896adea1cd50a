//! Terminal rendering module
//!
//! - `fb`: styled character-cell framebuffer
//! - `view`: draws a session (menu, board, overlays) into a framebuffer
//! - `terminal`: crossterm backend that flushes framebuffers to the screen

pub mod fb;
pub mod terminal;
pub mod view;

pub use fb::{Cell, FrameBuffer, Rgb, Style};
pub use terminal::TerminalRenderer;
pub use view::{GameView, VIEW_HEIGHT, VIEW_WIDTH};
