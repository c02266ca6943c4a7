use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{LevelParams, MazeConfig};
use crate::error::MazeError;
use crate::grid::{Dir, Grid, Pos};
use crate::observer::MazeObserver;
use crate::traversal::{GameState, Player, Traversal};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelComplete {
    pub level: u32,
    pub is_final: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub moved: bool,
    pub player: Player,
    pub completed: Option<LevelComplete>,
}

/// One play-through: the current level's maze, the player walking it, and the
/// level counter that survives from one maze to the next.
pub struct Session<O: MazeObserver = ()> {
    config: MazeConfig,
    levels: Vec<LevelParams>,
    level: u32,
    grid: Grid,
    traversal: Traversal,
    rng: StdRng,
    observer: O,
}

impl<O: MazeObserver> Session<O> {
    /// Checks every level's geometry up front, then carves level 1.
    pub fn new(config: MazeConfig, observer: O) -> Result<Self, MazeError> {
        let levels = config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "starting session: {} levels, seed {:?}",
            config.max_level, config.seed
        );

        let first = levels[0];
        let mut session = Self {
            config,
            levels,
            level: 1,
            grid: Grid::new(first.dims),
            traversal: Traversal::default(),
            rng,
            observer,
        };
        session.load_level();
        Ok(session)
    }

    fn load_level(&mut self) {
        let params = self.params();
        info!(
            "level {}: cell size {}, {}x{}",
            params.level,
            params.cell_size,
            params.dims.cols(),
            params.dims.rows()
        );
        self.grid = Grid::generate(params.dims, &mut self.rng);
        self.traversal = Traversal::start(params.dims, params.level);
        self.observer.on_generated(&self.grid, &params);
    }

    pub fn attempt_move(&mut self, dir: Dir) -> MoveResult {
        if self.traversal.state() != GameState::InProgress {
            return MoveResult {
                moved: false,
                player: *self.traversal.player(),
                completed: None,
            };
        }

        let moved = self.traversal.attempt_move(&self.grid, dir);
        let player = *self.traversal.player();
        self.observer.on_player_moved(&player, moved);

        let completed = if self.traversal.state() == GameState::LevelComplete {
            Some(self.complete_level())
        } else {
            None
        };
        MoveResult {
            moved,
            player,
            completed,
        }
    }

    fn complete_level(&mut self) -> LevelComplete {
        let finished = self.level;
        self.level += 1;
        let is_final = self.level > self.config.max_level;
        info!("level {finished} complete");
        self.observer.on_level_complete(finished, is_final);

        if is_final {
            info!("all {} levels complete", self.config.max_level);
            self.traversal.finish();
        } else {
            self.load_level();
        }
        LevelComplete {
            level: finished,
            is_final,
        }
    }

    /// Skips to the next level without reaching the exit. Does nothing once
    /// the game is over or on the last level, so a manual skip never ends the
    /// game; only reaching the final exit does.
    pub fn advance_level(&mut self) -> bool {
        if self.is_complete() || self.level >= self.config.max_level {
            debug!("advance ignored at level {}", self.level);
            return false;
        }
        self.level += 1;
        self.load_level();
        true
    }

    pub fn is_complete(&self) -> bool {
        self.traversal.state() == GameState::AllLevelsComplete
    }

    /// Once all levels are done this is past `max_level`.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.config.max_level
    }

    /// Geometry of the current level, or of the last one once the game is over.
    pub fn params(&self) -> LevelParams {
        let idx = (self.level.min(self.config.max_level) - 1) as usize;
        self.levels[idx]
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        self.traversal.player()
    }

    pub fn exit(&self) -> Pos {
        self.traversal.exit()
    }

    pub fn state(&self) -> GameState {
        self.traversal.state()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
