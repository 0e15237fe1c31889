//! Shortest paths through a carved maze

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::iter;

use itertools::Itertools;
use log::debug;

use crate::grid::{Cell, Direction, Grid};
use crate::Point;

/// Cells from start to goal inclusive; empty when there is no route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells on the path
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves, one less than the number of cells
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.cells.contains(&point)
    }

    /// One direction per consecutive pair of cells
    ///
    /// A path with fewer than two cells has no moves.
    pub fn directions(&self) -> Vec<Direction> {
        self.cells
            .iter()
            .tuple_windows()
            .filter_map(|(a, b)| Direction::between(*a, *b))
            .collect()
    }

    /// Directions as `N`/`E`/`S`/`W` tokens, e.g. `"EESSW"`
    pub fn tokens(&self) -> String {
        self.directions().into_iter().map(Direction::token).collect()
    }
}

/// Best known route to a cell, valid only within one search
#[derive(Debug, Clone, Copy)]
struct SearchState {
    g: usize,
    f: usize,
    parent: Option<usize>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            g: usize::MAX,
            f: usize::MAX,
            parent: None,
        }
    }
}

/// Manhattan distance, admissible for unit moves on a 4-connected grid
pub fn heuristic(a: Point, b: Point) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// A* search from `start` to `goal` through open walls
///
/// The open set is a min-heap of `(f, index)` snapshots, where the row-major
/// cell index breaks ties between equal `f`. Stale entries are dropped when
/// popped instead of being updated in place. All search state lives in
/// scratch arrays owned by this call, so the grid is only read.
///
/// Returns an empty path if either end is outside the grid or blocked, or if
/// the goal cannot be reached.
pub fn solve(grid: &Grid, start: Point, goal: Point) -> Path {
    let passable = |p: Point| grid.cell(p).is_some_and(|c| !c.is_blocked());
    if !passable(start) || !passable(goal) {
        debug!("No path from {start} to {goal}: endpoint outside the maze or blocked");
        return Path::default();
    }

    let size = grid.width() * grid.height();
    let mut scratch = vec![SearchState::default(); size];
    let mut closed = vec![false; size];
    let mut open = BinaryHeap::new();

    let start_idx = grid.index(start);
    let goal_idx = grid.index(goal);
    scratch[start_idx] = SearchState {
        g: 0,
        f: heuristic(start, goal),
        parent: None,
    };
    open.push(Reverse((scratch[start_idx].f, start_idx)));

    let mut expanded = 0;
    while let Some(Reverse((f, current))) = open.pop() {
        if closed[current] || f > scratch[current].f {
            continue;
        }
        if current == goal_idx {
            let mut cells: Vec<Point> = iter::successors(Some(goal_idx), |i| scratch[*i].parent)
                .map(|i| grid.point_at(i))
                .collect();
            cells.reverse();
            debug!(
                "Found path {start} -> {goal} of {} steps after expanding {expanded} cells",
                cells.len() - 1
            );
            return Path { cells };
        }

        closed[current] = true;
        expanded += 1;

        let point = grid.point_at(current);
        let tentative_g = scratch[current].g + 1;
        for next in grid.open_neighbors(point) {
            if grid.cell(next).map_or(true, Cell::is_blocked) {
                continue;
            }
            let n = grid.index(next);
            if closed[n] || tentative_g >= scratch[n].g {
                continue;
            }
            scratch[n] = SearchState {
                g: tentative_g,
                f: tentative_g + heuristic(next, goal),
                parent: Some(current),
            };
            open.push(Reverse((scratch[n].f, n)));
        }
    }

    debug!("No path from {start} to {goal} after expanding {expanded} cells");
    Path::default()
}
