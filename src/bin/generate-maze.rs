//! CLI for quick maze generation without a configuration file

use a_maze_ing::config::MazeConfig;
use a_maze_ing::{Maze, Point};
use clap::Parser;

/// Maze generator printing the maze and its solution
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated field width
    #[arg(long, default_value_t = MazeConfig::DEFAULT_SIZE)]
    width: usize,

    /// Generated field height
    #[arg(long, default_value_t = MazeConfig::DEFAULT_SIZE)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate from top-left to bottom-right, print output
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let entry = Point { x: 0, y: 0 };
    let exit = Point {
        x: args.width.saturating_sub(1),
        y: args.height.saturating_sub(1),
    };
    let config = MazeConfig::new(args.width, args.height, entry, exit)?;
    let maze = Maze::new(config, args.seed)?;
    let solution = maze.solve();

    println!("{}", maze.render(Some(&solution)));
    solution.print_report();
    Ok(())
}
