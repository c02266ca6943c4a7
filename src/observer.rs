use crate::config::LevelParams;
use crate::grid::Grid;
use crate::traversal::Player;

/// Hooks for whatever draws the maze and reacts to progress. All methods
/// default to doing nothing.
pub trait MazeObserver {
    /// Once per level, after the maze is carved.
    fn on_generated(&mut self, _grid: &Grid, _params: &LevelParams) {}

    /// After every move attempt. `did_move` is false for a bump into a wall.
    fn on_player_moved(&mut self, _player: &Player, _did_move: bool) {}

    /// When the exit is reached. `is_final` means there is no next level.
    fn on_level_complete(&mut self, _level: u32, _is_final: bool) {}
}

impl MazeObserver for () {}
