use log::trace;

use crate::grid::{Dimensions, Dir, Grid, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    InProgress,
    LevelComplete,
    AllLevelsComplete,
}

/// Display attribute only, cycles with the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
}

impl PlayerColor {
    pub fn for_level(level: u32) -> Self {
        match level.saturating_sub(1) % 3 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            _ => PlayerColor::Green,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub color: PlayerColor,
}

/// Player and exit for one level, plus where the level stands.
#[derive(Clone, Debug)]
pub struct Traversal {
    player: Player,
    exit: Pos,
    state: GameState,
}

impl Default for Traversal {
    fn default() -> Self {
        Self {
            player: Player {
                pos: Pos::default(),
                color: PlayerColor::Red,
            },
            exit: Pos::default(),
            state: GameState::Idle,
        }
    }
}

impl Traversal {
    /// Player at the top-left corner, exit at the bottom-right one.
    pub fn start(dims: Dimensions, level: u32) -> Self {
        Self {
            player: Player {
                pos: Pos::new(0, 0),
                color: PlayerColor::for_level(level),
            },
            exit: Pos::new(dims.cols() - 1, dims.rows() - 1),
            state: GameState::InProgress,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn finish(&mut self) {
        self.state = GameState::AllLevelsComplete;
    }

    pub fn check_win(&self) -> bool {
        self.player.pos == self.exit
    }

    /// Steps one cell in `dir` if the wall on that side is open and the target
    /// is on the grid. Blocked moves leave everything as it was. The win check
    /// runs either way. Returns whether the player moved.
    pub fn attempt_move(&mut self, grid: &Grid, dir: Dir) -> bool {
        if self.state != GameState::InProgress {
            return false;
        }

        let pos = self.player.pos;
        let side = dir.side();
        let (dx, dy) = side.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        // Bounds are checked on their own; wall state alone is not trusted.
        let moved = !grid.has_wall(pos, side) && grid.dims().contains(nx, ny);
        if moved {
            self.player.pos = Pos::new(nx as usize, ny as usize);
            trace!("moved {:?} to ({}, {})", dir, nx, ny);
        }

        if self.check_win() {
            self.state = GameState::LevelComplete;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Side;

    fn open_grid_2x2() -> Grid {
        // (0,0) -> (1,0) -> (1,1), and (0,0) -> (0,1)
        let mut grid = Grid::new(Dimensions::new(2, 2).unwrap());
        grid.carve(Pos::new(0, 0), Side::Right);
        grid.carve(Pos::new(1, 0), Side::Bottom);
        grid.carve(Pos::new(0, 0), Side::Bottom);
        grid
    }

    #[test]
    fn idle_traversal_ignores_moves() {
        let grid = open_grid_2x2();
        let mut t = Traversal::default();
        assert_eq!(t.state(), GameState::Idle);
        assert!(!t.attempt_move(&grid, Dir::Right));
        assert_eq!(t.player().pos, Pos::new(0, 0));
    }

    #[test]
    fn start_places_player_and_exit() {
        let t = Traversal::start(Dimensions::new(7, 4).unwrap(), 2);
        assert_eq!(t.player().pos, Pos::new(0, 0));
        assert_eq!(t.exit(), Pos::new(6, 3));
        assert_eq!(t.player().color, PlayerColor::Blue);
        assert_eq!(t.state(), GameState::InProgress);
    }

    #[test]
    fn right_then_blocked_down() {
        let mut grid = Grid::new(Dimensions::new(3, 2).unwrap());
        grid.carve(Pos::new(0, 0), Side::Right);
        let mut t = Traversal::start(grid.dims(), 1);

        assert!(t.attempt_move(&grid, Dir::Right));
        assert_eq!(t.player().pos, Pos::new(1, 0));

        assert!(!t.attempt_move(&grid, Dir::Down));
        assert_eq!(t.player().pos, Pos::new(1, 0));
        assert_eq!(t.state(), GameState::InProgress);
    }

    #[test]
    fn reaching_exit_completes_level() {
        let grid = open_grid_2x2();
        let mut t = Traversal::start(grid.dims(), 1);
        assert!(t.attempt_move(&grid, Dir::Right));
        assert!(!t.check_win());
        assert!(t.attempt_move(&grid, Dir::Down));
        assert!(t.check_win());
        assert_eq!(t.state(), GameState::LevelComplete);

        // nothing moves once the level is over
        assert!(!t.attempt_move(&grid, Dir::Up));
        assert_eq!(t.player().pos, Pos::new(1, 1));
    }

    #[test]
    fn moves_follow_walls_from_every_cell() {
        let grid = Grid::generate_with(6, 5, Some(77)).unwrap();
        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                for dir in Dir::ALL {
                    let from = Pos::new(x, y);
                    let mut t = Traversal::start(grid.dims(), 1);
                    t.player.pos = from;
                    if t.check_win() {
                        continue;
                    }
                    let moved = t.attempt_move(&grid, dir);
                    let expected = grid.neighbor(from, dir.side());
                    if grid.has_wall(from, dir.side()) || expected.is_none() {
                        assert!(!moved);
                        assert_eq!(t.player().pos, from);
                    } else {
                        assert!(moved);
                        assert_eq!(Some(t.player().pos), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn one_by_one_grid_wins_on_first_attempt() {
        let grid = Grid::new(Dimensions::new(1, 1).unwrap());
        let mut t = Traversal::start(grid.dims(), 1);
        assert!(!t.attempt_move(&grid, Dir::Left));
        assert_eq!(t.state(), GameState::LevelComplete);
    }

    #[test]
    fn colors_cycle_by_level() {
        assert_eq!(PlayerColor::for_level(1), PlayerColor::Red);
        assert_eq!(PlayerColor::for_level(3), PlayerColor::Green);
        assert_eq!(PlayerColor::for_level(4), PlayerColor::Red);
    }
}
