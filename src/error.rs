use std::fmt;

/// Precondition violations. Everything else (bumping into a wall, looking up a
/// neighbor off the edge of the grid) is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    EmptyGrid {
        cols: usize,
        rows: usize,
    },
    CellSizeExhausted {
        level: u32,
        initial_cell_size: u32,
        cell_size_step: u32,
    },
    LevelOutOfRange {
        level: u32,
        max_level: u32,
    },
    NoLevels,
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { cols, rows } => {
                write!(f, "grid must be at least 1x1, got {cols}x{rows}")
            }
            Self::CellSizeExhausted {
                level,
                initial_cell_size,
                cell_size_step,
            } => write!(
                f,
                "cell size {initial_cell_size} shrinking by {cell_size_step} per level reaches zero at level {level}"
            ),
            Self::LevelOutOfRange { level, max_level } => {
                write!(f, "level {level} is outside 1..={max_level}")
            }
            Self::NoLevels => write!(f, "max level must be at least 1"),
        }
    }
}

impl std::error::Error for MazeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = MazeError::EmptyGrid { cols: 0, rows: 4 };
        assert_eq!(err.to_string(), "grid must be at least 1x1, got 0x4");

        let err = MazeError::CellSizeExhausted {
            level: 5,
            initial_cell_size: 40,
            cell_size_step: 10,
        };
        assert!(err.to_string().contains("level 5"));
    }
}
