//! Generate perfect mazes around a "42" and find the way through them
//!
//! A maze is carved by a randomized depth-first search on a rectangular
//! grid, leaving a blocked "42" pattern in the middle untouched. The
//! shortest way from entry to exit is then found with A*.
//!
//! # Examples
//! ```
//! use a_maze_ing::config::MazeConfig;
//! use a_maze_ing::{Maze, Point};
//!
//! let config = MazeConfig::parse("
//! width=9
//! height=7
//! entry=0,0
//! exit=8,6
//! ").unwrap();
//! let maze = Maze::new(config, Some(42)).unwrap();
//! assert!(maze.is_perfect());
//!
//! let solution = maze.solve();
//! assert_eq!(solution.path.cells().first(), Some(&Point { x: 0, y: 0 }));
//! assert_eq!(solution.path.cells().last(), Some(&Point { x: 8, y: 6 }));
//! solution.print_report();
//! println!("{}", maze.render(Some(&solution)));
//! ```

use std::fmt;
use std::fs;

use log::info;
use rand::Rng;

pub mod config;
pub mod encoding;
pub mod error;
pub mod grid;
pub mod mask;
pub mod maze_generator;
pub mod render;
pub mod solver;

use config::MazeConfig;
use error::MazeError;
use grid::{Direction, Grid};
use mask::BlockedMask;
use maze_generator::MazeGenerator;
use solver::Path;

/// Location in the maze
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Carved maze together with the parameters it was built from
#[derive(Debug, Clone)]
pub struct Maze {
    config: MazeConfig,
    grid: Grid,
}

/// Solution to the maze
#[derive(Debug, Clone)]
pub struct MazeSolution {
    /// Cells from entry to exit inclusive, empty if the exit is unreachable
    pub path: Path,
    /// One move per step of the path
    pub directions: Vec<Direction>,
}

impl Maze {
    /// Build a maze, seeding the generator with `seed` (entropy if `None`)
    pub fn new(config: MazeConfig, seed: Option<u64>) -> Result<Self, MazeError> {
        Self::with_generator(config, &mut MazeGenerator::new(seed))
    }

    /// Build a maze with a caller-provided generator
    ///
    /// The generator is switched to the configured algorithm. The "42"
    /// pattern is blocked first; an entry or exit landing on it is a
    /// configuration error. Nothing is carved unless all checks pass.
    pub fn with_generator<R: Rng>(
        config: MazeConfig,
        generator: &mut MazeGenerator<R>,
    ) -> Result<Self, MazeError> {
        config.validate()?;
        generator.set_algorithm(config.algorithm);

        let mut grid = Grid::new(config.width, config.height);
        BlockedMask::forty_two().apply(&mut grid)?;
        for (name, point) in [("entry", config.entry), ("exit", config.exit)] {
            if grid.cell(point).is_some_and(|c| c.is_blocked()) {
                return Err(MazeError::BlockedEndpoint { name, point });
            }
        }
        generator.carve(&mut grid, config.entry)?;

        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whether every open cell is joined to every other by exactly one path
    pub fn is_perfect(&self) -> bool {
        self.grid.is_perfect()
    }

    /// Shortest way from entry to exit
    pub fn solve(&self) -> MazeSolution {
        let path = solver::solve(&self.grid, self.config.entry, self.config.exit);
        let directions = path.directions();
        MazeSolution { path, directions }
    }

    /// Contents of the output file, see [encoding]
    pub fn to_output(&self, solution: &MazeSolution) -> String {
        encoding::encode_output(
            &self.grid,
            self.config.entry,
            self.config.exit,
            &solution.path,
        )
    }

    /// Write the output file named in the configuration
    pub fn write_output(&self, solution: &MazeSolution) -> Result<(), MazeError> {
        let path = &self.config.output_file;
        fs::write(path, self.to_output(solution))?;
        info!("Maze written to {}", path.display());
        Ok(())
    }

    /// ASCII drawing, with the solution marked if given
    pub fn render(&self, solution: Option<&MazeSolution>) -> String {
        let empty = Path::default();
        let path = solution.map_or(&empty, |s| &s.path);
        render::render(&self.grid, self.config.entry, self.config.exit, path)
    }
}

impl MazeSolution {
    /// Path as `N`/`E`/`S`/`W` tokens
    pub fn tokens(&self) -> String {
        self.directions.iter().map(|d| d.token()).collect()
    }

    /// Print report
    pub fn print_report(&self) {
        if self.path.is_empty() {
            println!("There is no way from the entry to the exit.");
        } else {
            println!(
                "The shortest path is {} steps: {}",
                self.path.steps(),
                self.tokens()
            );
        }
    }
}
