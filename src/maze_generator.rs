//! Maze generation

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::MazeError;
use crate::grid::{Cell, Direction, Grid};
use crate::mask::BlockedMask;
use crate::Point;

/// Supported generation algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Randomized depth-first search, identified as `dfs`
    #[default]
    DepthFirst,
}

impl FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dfs" => Ok(Algorithm::DepthFirst),
            _ => Err(MazeError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::DepthFirst => write!(f, "dfs"),
        }
    }
}

/// Cell on the explicit depth-first stack, with the neighbors still to try
struct Frame {
    point: Point,
    candidates: std::vec::IntoIter<(Direction, Point)>,
}

/// Perfect maze generator
///
/// The random source is the only thing that varies between two runs, so a
/// generator built from the same seed always carves the same maze.
pub struct MazeGenerator<R = StdRng> {
    random: R,
    algorithm: Algorithm,
}

impl MazeGenerator<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_rng(if let Some(state) = seed {
            StdRng::seed_from_u64(state)
        } else {
            StdRng::from_entropy()
        })
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Generator drawing from the given random source
    pub fn with_rng(random: R) -> Self {
        Self {
            random,
            algorithm: Algorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.set_algorithm(algorithm);
        self
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Create a `width`x`height` grid, block `mask` and carve from `entry`
    ///
    /// Fails before touching anything if the mask does not fit, or if the
    /// entry is outside the grid or on a blocked cell.
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        entry: Point,
        mask: &BlockedMask,
    ) -> Result<Grid, MazeError> {
        let mut grid = Grid::new(width, height);
        mask.apply(&mut grid)?;
        self.carve(&mut grid, entry)?;
        Ok(grid)
    }

    /// Remove walls of `grid` so that every cell reachable from `entry` is
    /// connected to it by exactly one path.
    ///
    /// Cells cut off by blocked cells keep all their walls and stay
    /// unvisited. Returns the number of visited cells.
    pub fn carve(&mut self, grid: &mut Grid, entry: Point) -> Result<usize, MazeError> {
        match grid.cell(entry) {
            None => {
                return Err(MazeError::OutOfBounds {
                    name: "entry",
                    x: entry.x as i64,
                    y: entry.y as i64,
                    width: grid.width(),
                    height: grid.height(),
                })
            }
            Some(cell) if cell.is_blocked() => {
                return Err(MazeError::BlockedEndpoint {
                    name: "entry",
                    point: entry,
                })
            }
            Some(_) => (),
        }

        let visited = match self.algorithm {
            Algorithm::DepthFirst => self.depth_first(grid, entry),
        };
        let open = grid.cells().filter(|c| !c.is_blocked()).count();
        info!(
            "Carved {}x{} maze with {}: {visited} of {open} open cells reached",
            grid.width(),
            grid.height(),
            self.algorithm
        );
        Ok(visited)
    }

    /// Randomized depth-first search on an explicit stack
    ///
    /// Each frame holds the shuffled neighbors of its cell, computed when the
    /// cell was entered. A neighbor reached meanwhile through another branch
    /// is skipped when its turn comes.
    fn depth_first(&mut self, grid: &mut Grid, entry: Point) -> usize {
        grid.mark_visited(entry);
        let mut visited = 1;
        let mut stack = vec![Frame {
            point: entry,
            candidates: self.shuffled_candidates(grid, entry),
        }];
        let mut max_depth = 1;

        while let Some(frame) = stack.last_mut() {
            let Some((direction, next)) = frame.candidates.next() else {
                stack.pop();
                continue;
            };
            if grid.cell(next).is_some_and(Cell::is_visited) {
                continue;
            }

            // Remove wall between current cell and neighbor
            grid.remove_wall(frame.point, direction);
            grid.mark_visited(next);
            visited += 1;

            let candidates = self.shuffled_candidates(grid, next);
            stack.push(Frame {
                point: next,
                candidates,
            });
            max_depth = max_depth.max(stack.len());
        }

        debug!("Depth-first search reached depth {max_depth}");
        visited
    }

    /// Unvisited, non-blocked neighbors of `point` in random order
    fn shuffled_candidates(
        &mut self,
        grid: &Grid,
        point: Point,
    ) -> std::vec::IntoIter<(Direction, Point)> {
        let mut candidates: Vec<(Direction, Point)> = Direction::ALL
            .into_iter()
            .filter_map(|d| grid.neighbor(point, d).map(|p| (d, p)))
            .filter(|(_, p)| {
                grid.cell(*p)
                    .is_some_and(|c| !c.is_visited() && !c.is_blocked())
            })
            .collect();
        candidates.shuffle(&mut self.random);
        candidates.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_edges(grid: &Grid) -> usize {
        grid.passage_graph().0.edge_count()
    }

    #[test]
    fn parse_algorithm_identifier() {
        assert_eq!("dfs".parse::<Algorithm>().unwrap(), Algorithm::DepthFirst);
        assert_eq!(" DFS ".parse::<Algorithm>().unwrap(), Algorithm::DepthFirst);
        assert!(matches!(
            "prim".parse::<Algorithm>(),
            Err(MazeError::UnsupportedAlgorithm(name)) if name == "prim"
        ));
        assert_eq!(Algorithm::DepthFirst.to_string(), "dfs");
    }

    #[test]
    fn smallest_maze_with_pattern_is_a_spanning_tree() {
        let mut gen = MazeGenerator::new(Some(0));
        let grid = gen
            .generate(9, 7, Point { x: 0, y: 0 }, &BlockedMask::forty_two())
            .unwrap();

        let visited = grid.cells().filter(|c| c.is_visited()).count();
        assert_eq!(visited, 45);
        assert_eq!(open_edges(&grid), 44);
        assert!(grid.is_perfect());
        assert!(grid.is_consistent());
    }

    #[test]
    fn unmasked_maze_reaches_every_cell() {
        let mut gen = MazeGenerator::new(Some(7));
        let grid = gen
            .generate(9, 7, Point { x: 0, y: 0 }, &BlockedMask::empty())
            .unwrap();
        assert!(grid.cells().all(Cell::is_visited));
        assert_eq!(open_edges(&grid), 62);
        assert!(grid.is_perfect());
    }

    #[test]
    fn perfect_for_many_seeds_and_sizes() {
        for seed in 0..20 {
            for (width, height) in [(9, 7), (10, 8), (20, 20), (31, 12)] {
                let mut gen = MazeGenerator::new(Some(seed));
                let entry = Point {
                    x: width - 1,
                    y: 0,
                };
                let grid = gen
                    .generate(width, height, entry, &BlockedMask::forty_two())
                    .unwrap();
                let open = grid.cells().filter(|c| !c.is_blocked()).count();
                assert!(grid.is_perfect(), "seed {seed}, {width}x{height}");
                assert!(grid.is_consistent());
                assert_eq!(open_edges(&grid), open - 1);
            }
        }
    }

    #[test]
    fn blocked_cells_are_never_carved() {
        let mut gen = MazeGenerator::new(Some(3));
        let grid = gen
            .generate(20, 20, Point { x: 0, y: 0 }, &BlockedMask::forty_two())
            .unwrap();

        let blocked: Vec<&Cell> = grid.cells().filter(|c| c.is_blocked()).collect();
        assert_eq!(blocked.len(), 18);
        for cell in blocked {
            assert!(!cell.is_visited());
            assert_eq!(cell.walls(), crate::grid::Walls::all());
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let entry = Point { x: 2, y: 3 };
        let mask = BlockedMask::forty_two();
        let a = MazeGenerator::new(Some(42))
            .generate(15, 11, entry, &mask)
            .unwrap();
        let b = MazeGenerator::new(Some(42))
            .generate(15, 11, entry, &mask)
            .unwrap();
        let c = MazeGenerator::new(Some(43))
            .generate(15, 11, entry, &mask)
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn pattern_larger_than_grid_fails() {
        let mut gen = MazeGenerator::new(Some(0));
        let res = gen.generate(5, 5, Point { x: 0, y: 0 }, &BlockedMask::forty_two());
        assert!(matches!(res, Err(MazeError::MaskTooLarge { .. })));
    }

    #[test]
    fn entry_must_be_open_and_inside() {
        let mut gen = MazeGenerator::new(Some(0));
        let mask = BlockedMask::forty_two();
        assert!(matches!(
            gen.generate(9, 7, Point { x: 9, y: 0 }, &mask),
            Err(MazeError::OutOfBounds { name: "entry", .. })
        ));
        assert!(matches!(
            gen.generate(9, 7, Point { x: 1, y: 1 }, &mask),
            Err(MazeError::BlockedEndpoint { name: "entry", .. })
        ));
    }

    #[test]
    fn isolated_cell_stays_sealed() {
        let ring = BlockedMask::from_pattern(&["111", "101", "111"]);
        let mut gen = MazeGenerator::new(Some(1));
        let grid = gen.generate(9, 7, Point { x: 0, y: 0 }, &ring).unwrap();

        let inside = grid.cell(Point { x: 4, y: 3 }).unwrap();
        assert!(!inside.is_blocked());
        assert!(!inside.is_visited());
        assert_eq!(inside.walls(), crate::grid::Walls::all());

        let visited = grid.cells().filter(|c| c.is_visited()).count();
        assert_eq!(visited, 9 * 7 - 8 - 1);
        assert!(!grid.is_perfect());
    }

    #[test]
    fn long_corridors_do_not_overflow() {
        let mut gen = MazeGenerator::new(Some(5));
        let grid = gen
            .generate(300, 300, Point { x: 0, y: 0 }, &BlockedMask::empty())
            .unwrap();
        assert!(grid.cells().all(Cell::is_visited));
    }

    #[test]
    fn injected_rng() {
        let rng = StdRng::seed_from_u64(11);
        let mut gen = MazeGenerator::with_rng(rng).with_algorithm(Algorithm::DepthFirst);
        let grid = gen
            .generate(12, 9, Point { x: 11, y: 8 }, &BlockedMask::forty_two())
            .unwrap();
        assert!(grid.is_perfect());
    }
}
