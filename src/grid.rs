//! Wall model and maze generation.
//!
//! A [`Grid`] is a dense `cols x rows` block of cells, each carrying four wall
//! flags. [`Grid::generate`] carves it into a perfect maze with an iterative
//! randomized depth-first backtracker.

use std::collections::VecDeque;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::MazeError;

/// One of the four wall slots of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Enumeration order used when collecting neighbor candidates.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Top <-> Bottom, Right <-> Left.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Side::Top => (0, -1),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }
}

/// A move command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    /// The wall slot a move in this direction has to pass through.
    pub fn side(self) -> Side {
        match self {
            Dir::Up => Side::Top,
            Dir::Right => Side::Right,
            Dir::Down => Side::Bottom,
            Dir::Left => Side::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Grid size, guaranteed to be at least 1x1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    cols: usize,
    rows: usize,
}

impl Dimensions {
    pub fn new(cols: usize, rows: usize) -> Result<Self, MazeError> {
        if cols == 0 || rows == 0 {
            return Err(MazeError::EmptyGrid { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn area(&self) -> usize {
        self.cols * self.rows
    }

    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
}

impl Default for Cell {
    fn default() -> Self {
        Self { walls: [true; 4] }
    }
}

impl Cell {
    pub fn has_wall(&self, side: Side) -> bool {
        self.walls[side.index()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// A fully walled grid, nothing carved.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![Cell::default(); dims.area()],
        }
    }

    /// Carves a perfect maze. Output depends only on `dims` and the draws taken
    /// from `rng`, so a seeded generator reproduces the same topology.
    pub fn generate(dims: Dimensions, rng: &mut impl Rng) -> Self {
        let mut grid = Self::new(dims);
        let mut visited = vec![false; dims.area()];
        let mut stack: Vec<Pos> = Vec::new();
        let mut current = Pos::new(0, 0);
        visited[0] = true;

        loop {
            let candidates: Vec<(Side, Pos)> = Side::ALL
                .iter()
                .filter_map(|&side| grid.neighbor(current, side).map(|n| (side, n)))
                .filter(|(_, n)| !visited[grid.flat(*n)])
                .collect();

            if let Some(&(side, next)) = candidates.choose(rng) {
                visited[grid.flat(next)] = true;
                stack.push(current);
                grid.carve(current, side);
                current = next;
            } else if let Some(prev) = stack.pop() {
                current = prev;
            } else {
                break;
            }
        }

        debug!(
            "generated {}x{} maze with {} open edges",
            dims.cols(),
            dims.rows(),
            grid.open_edge_count()
        );
        debug_assert!(grid.is_perfect());
        grid
    }

    /// Seeded when `seed` is given, otherwise drawn from thread-local entropy.
    pub fn generate_with(cols: usize, rows: usize, seed: Option<u64>) -> Result<Self, MazeError> {
        let dims = Dimensions::new(cols, rows)?;
        let grid = match seed {
            Some(seed) => Self::generate(dims, &mut StdRng::seed_from_u64(seed)),
            None => Self::generate(dims, &mut rand::thread_rng()),
        };
        Ok(grid)
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn cols(&self) -> usize {
        self.dims.cols()
    }

    pub fn rows(&self) -> usize {
        self.dims.rows()
    }

    /// Row-major index, `None` when outside the grid.
    pub fn index(&self, x: isize, y: isize) -> Option<usize> {
        if !self.dims.contains(x, y) {
            return None;
        }
        Some(x as usize + y as usize * self.cols())
    }

    fn flat(&self, pos: Pos) -> usize {
        pos.x + pos.y * self.cols()
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos.x as isize, pos.y as isize).map(|idx| &self.cells[idx])
    }

    pub fn neighbor(&self, pos: Pos, side: Side) -> Option<Pos> {
        let (dx, dy) = side.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        self.index(nx, ny).map(|_| Pos::new(nx as usize, ny as usize))
    }

    /// Cells outside the grid count as fully walled.
    pub fn has_wall(&self, pos: Pos, side: Side) -> bool {
        self.cell(pos).map_or(true, |c| c.has_wall(side))
    }

    /// Removes the wall between `pos` and its neighbor on `side`, on both
    /// cells. Returns false if there is no neighbor on that side.
    pub fn carve(&mut self, pos: Pos, side: Side) -> bool {
        let Some(next) = self.neighbor(pos, side) else {
            return false;
        };
        let a = self.flat(pos);
        let b = self.flat(next);
        self.cells[a].walls[side.index()] = false;
        self.cells[b].walls[side.opposite().index()] = false;
        true
    }

    /// Open edges counted once each, by looking only right and down.
    pub fn open_edge_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.rows() {
            for x in 0..self.cols() {
                let pos = Pos::new(x, y);
                for side in [Side::Right, Side::Bottom] {
                    if self.neighbor(pos, side).is_some() && !self.has_wall(pos, side) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Cells reachable from `start` through open walls.
    pub fn reachable_from(&self, start: Pos) -> Vec<bool> {
        let mut seen = vec![false; self.dims.area()];
        if self.cell(start).is_none() {
            return seen;
        }
        let mut q = VecDeque::new();
        seen[self.flat(start)] = true;
        q.push_back(start);
        while let Some(pos) = q.pop_front() {
            for side in Side::ALL {
                if self.has_wall(pos, side) {
                    continue;
                }
                let Some(next) = self.neighbor(pos, side) else {
                    continue;
                };
                let idx = self.flat(next);
                if !seen[idx] {
                    seen[idx] = true;
                    q.push_back(next);
                }
            }
        }
        seen
    }

    /// Walls agree pairwise, every cell is reachable and there are exactly
    /// `cols * rows - 1` passages.
    pub fn is_perfect(&self) -> bool {
        self.walls_consistent()
            && self.open_edge_count() == self.dims.area() - 1
            && self.reachable_from(Pos::new(0, 0)).iter().all(|&r| r)
    }

    pub fn walls_consistent(&self) -> bool {
        for y in 0..self.rows() {
            for x in 0..self.cols() {
                let pos = Pos::new(x, y);
                for side in Side::ALL {
                    match self.neighbor(pos, side) {
                        Some(next) => {
                            if self.has_wall(pos, side) != self.has_wall(next, side.opposite()) {
                                return false;
                            }
                        }
                        None => {
                            if !self.has_wall(pos, side) {
                                return false;
                            }
                        }
                    }
                }
            }
        }
        true
    }
}
