use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::bfs::SearchError;
use crate::grid::{Dir, Grid, Path};

pub const DEFAULT_MAX_PATHS: usize = 20;

/// One start-to-exit path found by depth-first search with a shuffled
/// direction order at every cell. Not necessarily the shortest, and two calls
/// may return the same path.
///
/// The search keeps its own stack of frames, so a path through every cell of
/// a full-size grid does not grow the call stack.
pub fn random_path(grid: &Grid, rng: &mut impl Rng) -> Result<Path, SearchError> {
    let start = grid.start();
    if start == grid.exit() {
        return Ok(Path::new(vec![start]));
    }

    let mut visited = vec![vec![false; grid.cols()]; grid.rows()];
    visited[start.row][start.col] = true;
    // `cells` and `frames` grow and shrink together: one frame per path cell.
    let mut cells = vec![start];
    let mut frames = vec![Frame::new(rng)];

    while let Some(frame) = frames.last_mut() {
        let pos = cells[cells.len() - 1];
        let Some(dir) = frame.next_dir() else {
            visited[pos.row][pos.col] = false;
            frames.pop();
            cells.pop();
            continue;
        };
        let Some(next) = grid.step(pos, dir) else {
            continue;
        };
        if !grid.is_passable(next) || visited[next.row][next.col] {
            continue;
        }
        cells.push(next);
        if next == grid.exit() {
            debug!("DFS path found: {} steps", cells.len() - 1);
            return Ok(Path::new(cells));
        }
        visited[next.row][next.col] = true;
        frames.push(Frame::new(rng));
    }

    Err(SearchError::NoPathFound)
}

/// Directions still to try from one cell on the current path.
struct Frame {
    dirs: [Dir; 4],
    tried: usize,
}

impl Frame {
    fn new(rng: &mut impl Rng) -> Self {
        let mut dirs = Dir::ALL;
        dirs.shuffle(rng);
        Self { dirs, tried: 0 }
    }

    fn next_dir(&mut self) -> Option<Dir> {
        let dir = self.dirs.get(self.tried).copied()?;
        self.tried += 1;
        Some(dir)
    }
}

/// Repeated independent [`random_path`] searches, capped at `max`.
///
/// Stops early on the first search that finds nothing. Whether to pull the
/// next path is up to the caller.
pub struct PathEnumerator<'a, R: Rng> {
    grid: &'a Grid,
    rng: R,
    max: usize,
    found: usize,
    exhausted: bool,
}

impl<'a, R: Rng> PathEnumerator<'a, R> {
    pub fn new(grid: &'a Grid, rng: R, max: usize) -> Self {
        Self {
            grid,
            rng,
            max,
            found: 0,
            exhausted: false,
        }
    }

    pub fn found(&self) -> usize {
        self.found
    }

    pub fn limit_reached(&self) -> bool {
        self.found >= self.max
    }

    pub fn exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<R: Rng> Iterator for PathEnumerator<'_, R> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        if self.exhausted || self.limit_reached() {
            return None;
        }
        match random_path(self.grid, &mut self.rng) {
            Ok(path) => {
                self.found += 1;
                Some(path)
            }
            Err(_) => {
                self.exhausted = true;
                None
            }
        }
    }
}
