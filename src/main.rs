//! Road Hopper entry point
//!
//! Loads settings and sprites, then runs the game loop in the terminal.
//!
//! The terminal is taken over while playing, so log output goes to a file
//! (`road-hopper.log` unless `--log-file` says otherwise). Use `RUST_LOG`
//! to pick the level, e.g. `RUST_LOG=debug road-hopper`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use road_hopper::platform::{FrameClock, map_key, should_quit};
use road_hopper::renderer::{FrameBuffer, GameView, TerminalRenderer, VIEW_HEIGHT, VIEW_WIDTH};
use road_hopper::sim::{Difficulty, RoundEvent};
use road_hopper::{Session, Settings, load_assets};

#[derive(Parser)]
#[command(author, version, about = "Cross the road without getting hit", long_about = None)]
struct Cli {
    /// Settings file
    #[arg(long, default_value = Settings::FILE_NAME)]
    config: PathBuf,
    /// Sprite directory (overrides the settings file)
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Difficulty preselected in the menu: easy, medium or hard
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,
    /// Write the effective settings back to the config file and exit
    #[arg(long)]
    write_config: bool,
    /// Where log records go while the game owns the terminal
    #[arg(long, default_value = "road-hopper.log")]
    log_file: PathBuf,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}' (easy, medium, hard)"))
}

/// Open the log file for appending, creating it if needed
fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log = open_log(&cli.log_file)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log)))
        .init();

    let mut settings = Settings::load(&cli.config);
    if let Some(dir) = cli.assets {
        settings.asset_dir = dir;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }

    if cli.write_config {
        settings
            .save(&cli.config)
            .with_context(|| format!("writing {}", cli.config.display()))?;
        return Ok(());
    }

    let assets = match load_assets(&settings.asset_dir) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{e}");
            eprintln!(
                "road-hopper needs frog*.png, road*.png and car*.png in {} (use --assets DIR)",
                settings.asset_dir.display()
            );
            return Err(e).context("loading sprites");
        }
    };

    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Road Hopper starting (seed {seed}, {} fps)", settings.frame_rate);
    let mut session = Session::new(assets.obstacles, settings.difficulty, Pcg32::seed_from_u64(seed));

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session, settings.frame_rate);
    // Restore the terminal even if the loop failed
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session, frame_rate: u32) -> Result<()> {
    let view = GameView::new(frame_rate);
    let mut fb = FrameBuffer::new(VIEW_WIDTH, VIEW_HEIGHT);
    let mut clock = FrameClock::new(frame_rate);

    view.render_into(session, &mut fb);
    term.draw(&fb)?;

    loop {
        if event::poll(clock.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        log::info!("Quit");
                        return Ok(());
                    }
                    if let Some(key) = map_key(key) {
                        session.handle_key(key);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if clock.frame_due(Instant::now()) {
            match session.update() {
                Some(RoundEvent::Collided { obstacle }) => log::debug!("Hit by obstacle {obstacle}"),
                Some(RoundEvent::Reached) => log::debug!("Goal reached"),
                None => {}
            }
            view.render_into(session, &mut fb);
            term.draw(&fb)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.log");
        writeln!(open_log(&path).unwrap(), "first").unwrap();
        writeln!(open_log(&path).unwrap(), "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_log_file_in_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_log(&dir.path().join("nope").join("game.log")).is_err());
    }
}
