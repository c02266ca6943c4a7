//! Perfect-maze generation and single-player traversal.
//!
//! - `grid`: wall model and randomized depth-first carving
//! - `traversal`: player, exit and move legality
//! - `config`: per-level geometry, environment overrides
//! - `sequencer`: the `Session` that ties levels together
//! - `observer`: hooks for a renderer

pub mod config;
pub mod error;
pub mod grid;
pub mod observer;
pub mod sequencer;
pub mod traversal;

pub use config::{LevelParams, MazeConfig};
pub use error::MazeError;
pub use grid::{Cell, Dimensions, Dir, Grid, Pos, Side};
pub use observer::MazeObserver;
pub use sequencer::{LevelComplete, MoveResult, Session};
pub use traversal::{GameState, Player, PlayerColor, Traversal};
