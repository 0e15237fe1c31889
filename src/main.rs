//! CLI for maze generation

use std::path::PathBuf;

use a_maze_ing::config::MazeConfig;
use a_maze_ing::Maze;
use anyhow::Context;
use clap::Parser;

/// Generate a maze from a configuration file, solve it and write it out
/// using one hexadecimal wall digit per cell
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Draw the maze and its solution on the terminal
    #[arg(short, long)]
    render: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file, a visible `.txt` file of `key=value` lines
    #[arg(value_parser = config_file)]
    file: PathBuf,
}

/// Accept only existing, regular, non-hidden `.txt` files
fn config_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if !path.exists() {
        return Err(format!("file not found: {arg}"));
    }
    if !path.is_file() {
        return Err(format!("the provided path is not a file: {arg}"));
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.starts_with('.') {
        return Err("hidden files are not allowed as config files".to_string());
    }
    if !name.to_lowercase().ends_with(".txt") {
        return Err(format!("config file must be a .txt file: {arg}"));
    }
    Ok(path)
}

/// Read configuration, generate and solve, write output file
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = MazeConfig::load(&args.file)
        .with_context(|| format!("Configuration error in {}", args.file.display()))?;
    let maze = Maze::new(config, args.seed)?;
    let solution = maze.solve();
    maze.write_output(&solution).with_context(|| {
        format!(
            "Cannot write output file {}",
            maze.config().output_file.display()
        )
    })?;

    if args.render {
        println!("{}", maze.render(Some(&solution)));
    }
    solution.print_report();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn config_file_checks() {
        let dir = std::env::temp_dir().join(format!("a-maze-ing-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let good = dir.join("maze.TXT");
        let hidden = dir.join(".maze.txt");
        let wrong_ext = dir.join("maze.cfg");
        for path in [&good, &hidden, &wrong_ext] {
            fs::write(path, "width=9\n").unwrap();
        }

        assert_eq!(config_file(good.to_str().unwrap()), Ok(good.clone()));
        assert!(config_file(hidden.to_str().unwrap())
            .unwrap_err()
            .contains("hidden"));
        assert!(config_file(wrong_ext.to_str().unwrap())
            .unwrap_err()
            .contains(".txt"));
        assert!(config_file(dir.to_str().unwrap())
            .unwrap_err()
            .contains("not a file"));
        assert!(config_file(dir.join("missing.txt").to_str().unwrap())
            .unwrap_err()
            .contains("not found"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn parse_arguments() {
        let args = Args::try_parse_from(["a-maze-ing", "--seed", "7", "-r", "Cargo.toml"]);
        // Cargo.toml exists but is not a .txt file
        assert!(args.is_err());
    }
}
