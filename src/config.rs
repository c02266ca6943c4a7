use log::warn;

use crate::error::MazeError;
use crate::grid::Dimensions;

pub const DEFAULT_CANVAS_WIDTH: u32 = 400;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 400;
pub const DEFAULT_CELL_SIZE: u32 = 40;
pub const DEFAULT_CELL_STEP: u32 = 10;
pub const DEFAULT_MAX_LEVEL: u32 = 3;

/// Canvas geometry and level schedule. Each level shrinks the cell size by
/// `cell_size_step`, so the same canvas holds more cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub initial_cell_size: u32,
    pub cell_size_step: u32,
    pub max_level: u32,
    /// `None` draws the session seed from entropy.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            initial_cell_size: DEFAULT_CELL_SIZE,
            cell_size_step: DEFAULT_CELL_STEP,
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelParams {
    pub level: u32,
    pub cell_size: u32,
    pub dims: Dimensions,
}

impl MazeConfig {
    /// Defaults overridden by `MAZE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let positive = |key: &str, default: u32| {
            let Some(raw) = lookup(key) else {
                return default;
            };
            match raw.trim().parse::<u32>() {
                Ok(v) if v > 0 => v,
                _ => {
                    warn!("ignoring {key}={raw:?}, using {default}");
                    default
                }
            }
        };

        let seed = lookup("MAZE_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("ignoring MAZE_SEED={raw:?}, seeding from entropy");
                None
            }
        });

        Self {
            canvas_width: positive("MAZE_CANVAS_WIDTH", defaults.canvas_width),
            canvas_height: positive("MAZE_CANVAS_HEIGHT", defaults.canvas_height),
            initial_cell_size: positive("MAZE_CELL_SIZE", defaults.initial_cell_size),
            cell_size_step: positive("MAZE_CELL_STEP", defaults.cell_size_step),
            max_level: positive("MAZE_MAX_LEVEL", defaults.max_level),
            seed,
        }
    }

    pub fn cell_size_for(&self, level: u32) -> Result<u32, MazeError> {
        if level == 0 || level > self.max_level {
            return Err(MazeError::LevelOutOfRange {
                level,
                max_level: self.max_level,
            });
        }
        let exhausted = MazeError::CellSizeExhausted {
            level,
            initial_cell_size: self.initial_cell_size,
            cell_size_step: self.cell_size_step,
        };
        let shrink = self
            .cell_size_step
            .checked_mul(level - 1)
            .ok_or(exhausted)?;
        match self.initial_cell_size.checked_sub(shrink) {
            Some(size) if size > 0 => Ok(size),
            _ => Err(exhausted),
        }
    }

    pub fn level_params(&self, level: u32) -> Result<LevelParams, MazeError> {
        let cell_size = self.cell_size_for(level)?;
        let cols = (self.canvas_width / cell_size) as usize;
        let rows = (self.canvas_height / cell_size) as usize;
        Ok(LevelParams {
            level,
            cell_size,
            dims: Dimensions::new(cols, rows)?,
        })
    }

    /// Parameters for every level, or the first one that cannot be built.
    pub fn validate(&self) -> Result<Vec<LevelParams>, MazeError> {
        if self.max_level == 0 {
            return Err(MazeError::NoLevels);
        }
        (1..=self.max_level).map(|l| self.level_params(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_levels_grow_the_grid() {
        let levels = MazeConfig::default().validate().unwrap();
        let sizes: Vec<_> = levels
            .iter()
            .map(|p| (p.cell_size, p.dims.cols(), p.dims.rows()))
            .collect();
        assert_eq!(sizes, vec![(40, 10, 10), (30, 13, 13), (20, 20, 20)]);
    }

    #[test]
    fn level_zero_and_past_max_are_rejected() {
        let config = MazeConfig::default();
        assert_eq!(
            config.level_params(0),
            Err(MazeError::LevelOutOfRange { level: 0, max_level: 3 })
        );
        assert!(config.level_params(4).is_err());
    }

    #[test]
    fn shrinking_to_nothing_fails_fast() {
        let config = MazeConfig {
            max_level: 5,
            ..MazeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(MazeError::CellSizeExhausted {
                level: 5,
                initial_cell_size: 40,
                cell_size_step: 10,
            })
        );
    }

    #[test]
    fn cell_larger_than_canvas_fails_fast() {
        let config = MazeConfig {
            canvas_width: 100,
            initial_cell_size: 120,
            ..MazeConfig::default()
        };
        assert_eq!(
            config.level_params(1),
            Err(MazeError::EmptyGrid { cols: 0, rows: 3 })
        );
    }

    #[test]
    fn zero_max_level_is_rejected() {
        let config = MazeConfig {
            max_level: 0,
            ..MazeConfig::default()
        };
        assert_eq!(config.validate(), Err(MazeError::NoLevels));
    }

    #[test]
    fn env_overrides_apply() {
        let config = MazeConfig::from_lookup(lookup_from(&[
            ("MAZE_CANVAS_WIDTH", "600"),
            ("MAZE_CELL_SIZE", " 50 "),
            ("MAZE_MAX_LEVEL", "4"),
            ("MAZE_SEED", "99"),
        ]));
        assert_eq!(config.canvas_width, 600);
        assert_eq!(config.canvas_height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(config.initial_cell_size, 50);
        assert_eq!(config.max_level, 4);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn garbage_env_falls_back_to_defaults() {
        let config = MazeConfig::from_lookup(lookup_from(&[
            ("MAZE_CANVAS_HEIGHT", "tall"),
            ("MAZE_CELL_STEP", "0"),
            ("MAZE_MAX_LEVEL", "-2"),
            ("MAZE_SEED", "abc"),
        ]));
        assert_eq!(config, MazeConfig::default());
    }
}
