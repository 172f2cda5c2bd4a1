//! Maze grid, positions and the loader for the text file format.

use log::{debug, warn};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path as FsPath, PathBuf};

pub const MAX_ROWS: usize = 105;
pub const MAX_COLS: usize = 105;

pub const WALL: char = '#';
pub const START: char = 'S';
pub const EXIT: char = 'E';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Fixed exploration order used wherever the order must be deterministic.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Start,
    Exit,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Start => write!(f, "start '{START}'"),
            Marker::Exit => write!(f, "exit '{EXIT}'"),
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Format { line: usize, expected: usize, found: usize },
    CapacityExceeded { rows: usize, cols: usize },
    Empty,
    MissingMarker(Marker),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "{} not found or cannot be opened: {source}", path.display())
            }
            LoadError::Format {
                line,
                expected,
                found,
            } => write!(
                f,
                "all rows must have the same length: line {line} has {found} columns, expected {expected}"
            ),
            LoadError::CapacityExceeded { rows, cols } => write!(
                f,
                "maze is too large ({rows}x{cols}), the limit is {MAX_ROWS}x{MAX_COLS}"
            ),
            LoadError::Empty => write!(f, "maze is empty"),
            LoadError::MissingMarker(marker) => write!(f, "maze must contain a {marker}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A validated, rectangular maze with exactly one retained start and exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    rows: usize,
    cols: usize,
    start: Pos,
    exit: Pos,
}

impl Grid {
    pub fn load(path: impl AsRef<FsPath>) -> Result<Grid, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading maze from {path:?}");
        Grid::parse(BufReader::new(file)).map_err(|err| match err {
            LoadError::Io { source, .. } => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn parse(reader: impl BufRead) -> Result<Grid, LoadError> {
        let mut cells: Vec<Vec<char>> = Vec::new();
        let mut cols = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LoadError::Io {
                path: PathBuf::new(),
                source,
            })?;
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                continue;
            }
            let row: Vec<char> = line.chars().collect();
            if row.len() > MAX_COLS {
                return Err(LoadError::CapacityExceeded {
                    rows: cells.len() + 1,
                    cols: row.len(),
                });
            }
            if cells.is_empty() {
                cols = row.len();
            } else if row.len() != cols {
                return Err(LoadError::Format {
                    line: idx + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
            if cells.len() == MAX_ROWS {
                return Err(LoadError::CapacityExceeded {
                    rows: MAX_ROWS + 1,
                    cols,
                });
            }
            cells.push(row);
        }

        if cells.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut start = None;
        let mut exit = None;
        for (r, row) in cells.iter().enumerate() {
            for (c, &ch) in row.iter().enumerate() {
                if ch == START {
                    if start.is_some() {
                        warn!("Multiple start markers, keeping the last one at ({r}, {c})");
                    }
                    start = Some(Pos::new(r, c));
                } else if ch == EXIT {
                    if exit.is_some() {
                        warn!("Multiple exit markers, keeping the last one at ({r}, {c})");
                    }
                    exit = Some(Pos::new(r, c));
                }
            }
        }
        let start = start.ok_or(LoadError::MissingMarker(Marker::Start))?;
        let exit = exit.ok_or(LoadError::MissingMarker(Marker::Exit))?;

        let rows = cells.len();
        debug!("Maze loaded: {rows}x{cols}, start {start:?}, exit {exit:?}");
        Ok(Grid {
            cells,
            rows,
            cols,
            start,
            exit,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Pos) -> Option<char> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(ch) if ch != WALL)
    }

    /// Neighbor of `pos` in `dir`, or `None` when it falls off the grid.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Pos::new(row, col);
        self.in_bounds(next).then_some(next)
    }
}

/// Ordered start-to-exit cells. Consecutive cells are one cardinal move apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Pos>,
}

impl Path {
    pub fn new(cells: Vec<Pos>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

#[cfg(test)]
pub(crate) fn fixture(text: &str) -> Grid {
    Grid::parse(text.as_bytes()).expect("fixture maze parses")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corridor() {
        let g = fixture("S...E\n");
        assert_eq!(g.rows(), 1);
        assert_eq!(g.cols(), 5);
        assert_eq!(g.start(), Pos::new(0, 0));
        assert_eq!(g.exit(), Pos::new(0, 4));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let g = fixture("\r\n#S#\r\n\r\n#.#\r\n#E#\r\n\n");
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.exit(), Pos::new(2, 1));
    }

    #[test]
    fn test_ragged_rows_fail() {
        let err = Grid::parse("S..\n..\n..E\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Format {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_missing_markers() {
        let err = Grid::parse("...\n..E\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingMarker(Marker::Start)));
        let err = Grid::parse("S..\n...\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingMarker(Marker::Exit)));
    }

    #[test]
    fn test_empty_input() {
        let err = Grid::parse("\n\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_capacity_exceeded() {
        let wide = format!("S{}E\n", ".".repeat(MAX_COLS));
        let err = Grid::parse(wide.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::CapacityExceeded { .. }));

        let mut tall = String::from("S\n");
        for _ in 0..MAX_ROWS {
            tall.push_str(".\n");
        }
        tall.push_str("E\n");
        let err = Grid::parse(tall.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_max_size_accepted() {
        let mut text = String::new();
        for r in 0..MAX_ROWS {
            let mut row = ".".repeat(MAX_COLS);
            if r == 0 {
                row.replace_range(0..1, "S");
            }
            if r == MAX_ROWS - 1 {
                row.replace_range(MAX_COLS - 1.., "E");
            }
            text.push_str(&row);
            text.push('\n');
        }
        let g = fixture(&text);
        assert_eq!(g.rows(), MAX_ROWS);
        assert_eq!(g.cols(), MAX_COLS);
    }

    #[test]
    fn test_last_marker_wins() {
        let g = fixture("S.S\n...\nE.E\n");
        assert_eq!(g.start(), Pos::new(0, 2));
        assert_eq!(g.exit(), Pos::new(2, 2));
    }

    #[test]
    fn test_missing_file() {
        let err = Grid::load("does/not/exist/maze.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("maze.txt"));
    }

    #[test]
    fn test_is_passable() {
        let g = fixture("S#\n.E\n");
        assert!(g.is_passable(Pos::new(0, 0)));
        assert!(!g.is_passable(Pos::new(0, 1)));
        assert!(g.is_passable(Pos::new(1, 1)));
        assert!(!g.is_passable(Pos::new(2, 0)));
        assert!(!g.is_passable(Pos::new(0, 2)));
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let g = fixture("S.\n.E\n");
        assert_eq!(g.step(Pos::new(0, 0), Dir::Up), None);
        assert_eq!(g.step(Pos::new(0, 0), Dir::Left), None);
        assert_eq!(g.step(Pos::new(0, 0), Dir::Right), Some(Pos::new(0, 1)));
        assert_eq!(g.step(Pos::new(1, 1), Dir::Down), None);
    }
}
