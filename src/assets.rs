//! Sprite discovery and measurement
//!
//! Sprites are found by file name in one directory:
//! - `frog*.png`: the actor
//! - `road*.png`: the background
//! - `car*.png`: obstacles (at least one)
//!
//! Only pixel dimensions are read. Obstacle sizes feed the simulation's
//! bounding boxes; the other two are required to exist and decode.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sim::{ObstacleSprites, SpriteSize};

const ACTOR_PREFIX: &str = "frog";
const BACKGROUND_PREFIX: &str = "road";
const OBSTACLE_PREFIX: &str = "car";
const SPRITE_EXTENSION: &str = ".png";

/// Startup failures; all of them are fatal
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read asset directory {}: {source}", .dir.display())]
    Directory {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no {prefix}*.png sprite found in {}", .dir.display())]
    MissingSprite { prefix: &'static str, dir: PathBuf },
    #[error("cannot load sprite {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("no obstacle sprites found in {} (expected car1.png, car2.png, ...)", .dir.display())]
    NoObstacleSprites { dir: PathBuf },
}

/// A measured sprite file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub path: PathBuf,
    /// Dimensions as stored in the file
    pub size: SpriteSize,
}

/// Everything the game needs from disk
#[derive(Debug, Clone)]
pub struct Assets {
    pub actor: Sprite,
    pub background: Sprite,
    /// Obstacle files in name order
    pub obstacle_files: Vec<Sprite>,
    /// Obstacle sizes scaled to one grid cell, same order as `obstacle_files`
    pub obstacles: ObstacleSprites,
}

/// Locate and measure all sprites in `dir`
pub fn load_assets(dir: &Path) -> Result<Assets, AssetError> {
    let names = sprite_names(dir)?;

    let actor = first_with_prefix(dir, &names, ACTOR_PREFIX)?;
    let background = first_with_prefix(dir, &names, BACKGROUND_PREFIX)?;

    let obstacle_files = names
        .iter()
        .filter(|name| name.starts_with(OBSTACLE_PREFIX))
        .map(|name| measure(&dir.join(name)))
        .collect::<Result<Vec<_>, _>>()?;

    let scaled = obstacle_files.iter().map(|s| s.size.fit_to_cell()).collect();
    let obstacles = ObstacleSprites::new(scaled).ok_or_else(|| AssetError::NoObstacleSprites {
        dir: dir.to_path_buf(),
    })?;

    log::info!(
        "Loaded sprites from {}: actor {}, background {}, {} obstacle(s)",
        dir.display(),
        actor.path.display(),
        background.path.display(),
        obstacles.len()
    );

    Ok(Assets {
        actor,
        background,
        obstacle_files,
        obstacles,
    })
}

/// Sorted names of `*.png` files in `dir`
fn sprite_names(dir: &Path) -> Result<Vec<String>, AssetError> {
    let dir_error = |source| AssetError::Directory {
        dir: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(dir_error)? {
        let entry = entry.map_err(dir_error)?;
        if !entry.file_type().map_err(dir_error)?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(SPRITE_EXTENSION) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn first_with_prefix(dir: &Path, names: &[String], prefix: &'static str) -> Result<Sprite, AssetError> {
    let name = names
        .iter()
        .find(|name| name.starts_with(prefix))
        .ok_or_else(|| AssetError::MissingSprite {
            prefix,
            dir: dir.to_path_buf(),
        })?;
    measure(&dir.join(name))
}

fn measure(path: &Path) -> Result<Sprite, AssetError> {
    let (width, height) = image::image_dimensions(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Sprite {} is {}x{}", path.display(), width, height);
    Ok(Sprite {
        path: path.to_path_buf(),
        size: SpriteSize::new(width, height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) {
        RgbaImage::new(w, h).save(dir.join(name)).unwrap();
    }

    fn full_set(dir: &Path) {
        write_png(dir, "frog.png", 64, 64);
        write_png(dir, "road.png", 160, 120);
        write_png(dir, "car1.png", 100, 50);
        write_png(dir, "car2.png", 40, 80);
    }

    #[test]
    fn test_load_full_set() {
        let dir = tempfile::tempdir().unwrap();
        full_set(dir.path());
        std::fs::write(dir.path().join("notes.txt"), "not a sprite").unwrap();

        let assets = load_assets(dir.path()).unwrap();
        assert_eq!(assets.actor.size, SpriteSize::new(64, 64));
        assert_eq!(assets.background.size, SpriteSize::new(160, 120));
        assert_eq!(assets.obstacle_files.len(), 2);
        assert_eq!(
            assets.obstacles.as_slice(),
            &[SpriteSize::new(50, 25), SpriteSize::new(25, 50)]
        );
    }

    #[test]
    fn test_numbered_actor_and_background_names() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "frog3.png", 32, 32);
        write_png(dir.path(), "road3.png", 32, 32);
        write_png(dir.path(), "car.png", 32, 32);
        let assets = load_assets(dir.path()).unwrap();
        assert!(assets.actor.path.ends_with("frog3.png"));
    }

    #[test]
    fn test_missing_actor_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "road.png", 10, 10);
        write_png(dir.path(), "car1.png", 10, 10);
        let err = load_assets(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::MissingSprite { prefix: "frog", .. }));
    }

    #[test]
    fn test_no_obstacles_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "frog.png", 10, 10);
        write_png(dir.path(), "road.png", 10, 10);
        let err = load_assets(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::NoObstacleSprites { .. }));
    }

    #[test]
    fn test_corrupt_sprite_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        full_set(dir.path());
        std::fs::write(dir.path().join("car9.png"), b"definitely not png").unwrap();
        let err = load_assets(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_assets(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AssetError::Directory { .. }));
        assert!(err.to_string().contains("nope"));
    }
}
