use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Largest lattice side; the checkerboard is drawn over all of it each frame
pub const MAX_GRID_SIZE: i32 = 256;
/// Largest surface side in pixels, and largest cell
pub const MAX_CANVAS_PX: i32 = 1 << 16;
/// Most grid cells the surface may span per axis
pub const MAX_BOARD_CELLS: i32 = 250;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square logical lattice
    pub grid_size: i32,
    /// Pixel size of one grid cell on the drawing surface
    pub cell_size: i32,
    /// Playable columns; the head dies past `field_width - 1`
    pub field_width: i32,
    /// Playable rows; the head dies past `field_height - 1`
    pub field_height: i32,
    /// Fruit coordinates are clamped to `0..=fruit_max`
    pub fruit_max: i32,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Minimum swipe displacement, in surface units
    pub swipe_threshold: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_size: 40,
            field_width: 18,
            field_height: 12,
            fruit_max: 8,
            tick_rate_hz: 10,
            swipe_threshold: 50,
            canvas_width: 720,
            canvas_height: 480,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(raw).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_size > 0 && self.grid_size <= MAX_GRID_SIZE,
            "grid_size must lie in 1..={MAX_GRID_SIZE}"
        );
        ensure!(
            self.cell_size > 0 && self.cell_size <= MAX_CANVAS_PX,
            "cell_size must lie in 1..={MAX_CANVAS_PX}"
        );
        ensure!(
            self.field_width > 0 && self.field_height > 0,
            "play field must be at least one cell"
        );
        ensure!(
            self.fruit_max >= 0 && self.fruit_max < self.grid_size,
            "fruit_max must lie inside the grid (0..{})",
            self.grid_size
        );
        ensure!(self.tick_rate_hz > 0, "tick_rate_hz must be positive");
        ensure!(self.swipe_threshold >= 0, "swipe_threshold must not be negative");
        ensure!(
            self.canvas_width > 0 && self.canvas_height > 0,
            "canvas must not be empty"
        );
        ensure!(
            self.canvas_width <= MAX_CANVAS_PX && self.canvas_height <= MAX_CANVAS_PX,
            "canvas must not exceed {MAX_CANVAS_PX} pixels per side"
        );
        ensure!(
            self.canvas_width / self.cell_size <= MAX_BOARD_CELLS
                && self.canvas_height / self.cell_size <= MAX_BOARD_CELLS,
            "canvas spans more than {MAX_BOARD_CELLS} cells per side at cell_size {}",
            self.cell_size
        );
        Ok(())
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.cell_size, 40);
        assert_eq!(config.field_width, 18);
        assert_eq!(config.field_height, 12);
        assert_eq!(config.fruit_max, 8);
        assert_eq!(config.canvas_width, 720);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("tick_rate_hz = 20\ncell_size = 8\n").unwrap();
        assert_eq!(config.tick_rate_hz, 20);
        assert_eq!(config.cell_size, 8);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.field_width, 18);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(GameConfig::from_toml_str("cell_size = \"big\"").is_err());
        assert!(GameConfig::from_toml_str("cell_size = 0").is_err());
        assert!(GameConfig::from_toml_str("fruit_max = 20").is_err());
        assert!(GameConfig::from_toml_str("tick_rate_hz = 0").is_err());
    }

    #[test]
    fn test_oversized_surface_is_rejected() {
        assert!(GameConfig::from_toml_str("canvas_width = 2147483647").is_err());
        assert!(GameConfig::from_toml_str("cell_size = 1000000").is_err());
        assert!(GameConfig::from_toml_str("grid_size = 100000").is_err());
        // 720 columns of one pixel each
        assert!(GameConfig::from_toml_str("cell_size = 1").is_err());

        let wide = GameConfig {
            canvas_width: MAX_BOARD_CELLS * 40,
            ..GameConfig::default()
        };
        assert!(wide.validate().is_ok());
        let wider = GameConfig {
            canvas_width: (MAX_BOARD_CELLS + 1) * 40,
            ..GameConfig::default()
        };
        assert!(wider.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GameConfig::from_toml_file("/nonexistent/grid_snake.toml").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/grid_snake.toml"));
    }
}
