use log::debug;
use std::collections::VecDeque;
use std::fmt;

use crate::grid::{Dir, Grid, Path, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchError {
    NoPathFound,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoPathFound => write!(f, "no path from start to exit"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Shortest start-to-exit path. Stops expanding as soon as the exit is discovered.
pub fn shortest_path(grid: &Grid) -> Result<Path, SearchError> {
    let start = grid.start();
    let exit = grid.exit();
    let mut visited = vec![vec![false; grid.cols()]; grid.rows()];
    let mut parent: Vec<Vec<Option<Pos>>> = vec![vec![None; grid.cols()]; grid.rows()];
    let mut q = VecDeque::new();
    visited[start.row][start.col] = true;
    q.push_back(start);

    let mut found = start == exit;
    'search: while let Some(pos) = q.pop_front() {
        for dir in Dir::ALL {
            let Some(next) = grid.step(pos, dir) else {
                continue;
            };
            if !grid.is_passable(next) || visited[next.row][next.col] {
                continue;
            }
            visited[next.row][next.col] = true;
            parent[next.row][next.col] = Some(pos);
            if next == exit {
                found = true;
                break 'search;
            }
            q.push_back(next);
        }
    }

    if !found {
        debug!("BFS exhausted the frontier without reaching the exit");
        return Err(SearchError::NoPathFound);
    }

    let mut cells = vec![exit];
    let mut cur = exit;
    while let Some(prev) = parent[cur.row][cur.col] {
        cells.push(prev);
        cur = prev;
    }
    cells.reverse();
    debug!("BFS shortest path: {} steps", cells.len() - 1);
    Ok(Path::new(cells))
}

#[cfg(test)]
pub(crate) fn assert_valid_path(grid: &Grid, path: &Path) {
    let cells = path.cells();
    assert_eq!(cells.first(), Some(&grid.start()));
    assert_eq!(cells.last(), Some(&grid.exit()));
    for pos in cells {
        assert!(grid.is_passable(*pos), "path crosses {pos:?}");
    }
    for pair in cells.windows(2) {
        let dr = pair[0].row.abs_diff(pair[1].row);
        let dc = pair[0].col.abs_diff(pair[1].col);
        assert_eq!(dr + dc, 1, "{:?} -> {:?} is not a cardinal step", pair[0], pair[1]);
    }
    let mut seen = cells.to_vec();
    seen.sort_by_key(|p| (p.row, p.col));
    seen.dedup();
    assert_eq!(seen.len(), cells.len(), "path repeats a cell");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixture;

    // Full distance field, the independent reference for the early-exit search.
    fn distance_map(grid: &Grid, from: Pos) -> Vec<Vec<Option<usize>>> {
        let mut dist = vec![vec![None; grid.cols()]; grid.rows()];
        if !grid.is_passable(from) {
            return dist;
        }
        let mut q = VecDeque::new();
        dist[from.row][from.col] = Some(0);
        q.push_back(from);

        while let Some(pos) = q.pop_front() {
            let base = dist[pos.row][pos.col].unwrap_or(0);
            for dir in Dir::ALL {
                let Some(next) = grid.step(pos, dir) else {
                    continue;
                };
                if grid.is_passable(next) && dist[next.row][next.col].is_none() {
                    dist[next.row][next.col] = Some(base + 1);
                    q.push_back(next);
                }
            }
        }
        dist
    }

    // Exhaustive simple-path search, only for tiny fixtures.
    fn brute_force_distance(grid: &Grid) -> Option<usize> {
        fn go(grid: &Grid, pos: Pos, seen: &mut Vec<Pos>, best: &mut Option<usize>) {
            if pos == grid.exit() {
                let len = seen.len() - 1;
                if best.map_or(true, |b| len < b) {
                    *best = Some(len);
                }
                return;
            }
            for dir in Dir::ALL {
                if let Some(next) = grid.step(pos, dir) {
                    if grid.is_passable(next) && !seen.contains(&next) {
                        seen.push(next);
                        go(grid, next, seen, best);
                        seen.pop();
                    }
                }
            }
        }
        let mut best = None;
        let mut seen = vec![grid.start()];
        go(grid, grid.start(), &mut seen, &mut best);
        best
    }

    #[test]
    fn test_corridor_length() {
        let g = fixture("S...E\n");
        let path = shortest_path(&g).unwrap();
        assert_eq!(path.steps(), 4);
        assert_valid_path(&g, &path);
    }

    #[test]
    fn test_small_maze_length() {
        let g = fixture("S.#\n.#.\n..E\n");
        let path = shortest_path(&g).unwrap();
        assert_eq!(path.steps(), 4);
        assert_eq!(
            path.cells(),
            &[
                Pos::new(0, 0),
                Pos::new(1, 0),
                Pos::new(2, 0),
                Pos::new(2, 1),
                Pos::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_prefers_short_route() {
        let g = fixture(
            "\
#########
#S......#
#.#####.#
#.#...#.#
#...#...E
#########
",
        );
        let path = shortest_path(&g).unwrap();
        assert_valid_path(&g, &path);
        assert_eq!(path.steps(), 10);
    }

    #[test]
    fn test_no_path() {
        let g = fixture("S#.\n##.\n..E\n");
        assert_eq!(shortest_path(&g), Err(SearchError::NoPathFound));
    }

    #[test]
    fn test_matches_distance_map_and_brute_force() {
        let fixtures = [
            "S..\n.#.\n..E\n",
            "S.#..\n..#.#\n#...E\n",
            "S...\n.##.\n.#..\n...E\n",
            "..S.\n.#..\n.#.#\nE...\n",
            "S#E\n...\n",
        ];
        for text in fixtures {
            let g = fixture(text);
            let path = shortest_path(&g).unwrap();
            assert_valid_path(&g, &path);
            let exit = g.exit();
            let reference = distance_map(&g, g.start())[exit.row][exit.col];
            assert_eq!(Some(path.steps()), reference, "{text}");
            assert_eq!(Some(path.steps()), brute_force_distance(&g), "{text}");
        }
    }

    #[test]
    fn test_distance_map_marks_walls_unreachable() {
        let g = fixture("S#E\n...\n");
        let dist = distance_map(&g, g.start());
        assert_eq!(dist[0][0], Some(0));
        assert_eq!(dist[0][1], None);
        assert_eq!(dist[0][2], Some(4));
        assert_eq!(dist[1][1], Some(2));
    }
}
