//! Maze parameters read from a `key=value` configuration file
//!
//! ```text
//! # 42 maze
//! width=20
//! height=15
//! entry=0,0
//! exit=19,14       # bottom right
//! output_file=maze.txt
//! perfect=true
//! algorithm=dfs
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::MazeError;
use crate::maze_generator::Algorithm;
use crate::Point;

/// Validated maze parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub entry: Point,
    pub exit: Point,
    /// Reserved: parsed and kept, but generation always produces a perfect maze
    pub perfect: bool,
    pub output_file: PathBuf,
    pub algorithm: Algorithm,
}

impl MazeConfig {
    pub const MIN_WIDTH: usize = 9;
    pub const MIN_HEIGHT: usize = 7;
    pub const DEFAULT_SIZE: usize = 20;
    pub const DEFAULT_OUTPUT: &'static str = "maze.txt";
    /// Largest number of cells a maze may hold
    pub const MAX_CELLS: usize = 1 << 24;
    const KEYS: [&'static str; 7] = [
        "width",
        "height",
        "entry",
        "exit",
        "perfect",
        "output_file",
        "algorithm",
    ];

    /// Configuration with the given geometry and default everything else
    ///
    /// Fails like [Self::parse] if the geometry is invalid.
    pub fn new(width: usize, height: usize, entry: Point, exit: Point) -> Result<Self, MazeError> {
        let config = Self {
            width,
            height,
            entry,
            exit,
            perfect: false,
            output_file: PathBuf::from(Self::DEFAULT_OUTPUT),
            algorithm: Algorithm::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        debug!("Reading configuration from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse and validate configuration text
    ///
    /// # Examples
    /// ```
    /// use a_maze_ing::config::MazeConfig;
    /// use a_maze_ing::Point;
    ///
    /// let config = MazeConfig::parse("width=12\nheight=9\n").unwrap();
    /// assert_eq!(config.exit, Point { x: 11, y: 8 });
    /// assert!(MazeConfig::parse("width=4").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let entries = parse_entries(text)?;
        let unknown = entries
            .keys()
            .find(|k| !Self::KEYS.iter().any(|known| *known == k.as_str()));
        if let Some(key) = unknown {
            return Err(MazeError::UnknownKey(key.clone()));
        }
        let get = |key: &str| entries.get(key).map(String::as_str);

        let width = parse_size("width", get("width"))?;
        let height = parse_size("height", get("height"))?;
        let perfect = get("perfect").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let output_file = PathBuf::from(get("output_file").unwrap_or(Self::DEFAULT_OUTPUT));
        let entry = parse_point("entry", get("entry").unwrap_or("0,0"))?;
        let exit = get("exit").map(|value| parse_point("exit", value)).transpose()?;
        let algorithm: Algorithm = get("algorithm").unwrap_or("dfs").parse()?;

        check_size(width, height)?;
        let entry = check_bounds("entry", entry, width, height)?;
        let exit = match exit {
            Some(raw) => check_bounds("exit", raw, width, height)?,
            // Both sizes are at least the minimum here
            None => Point {
                x: width - 1,
                y: height - 1,
            },
        };

        let config = Self {
            width,
            height,
            entry,
            exit,
            perfect,
            output_file,
            algorithm,
        };
        config.validate()?;
        debug!(
            "perfect={} is reserved, generated mazes are always perfect",
            config.perfect
        );
        Ok(config)
    }

    /// Check size, bounds and distinct endpoints, in that order
    pub fn validate(&self) -> Result<(), MazeError> {
        check_size(self.width, self.height)?;
        for (name, point) in [("entry", self.entry), ("exit", self.exit)] {
            if !(point.x < self.width && point.y < self.height) {
                return Err(MazeError::OutOfBounds {
                    name,
                    x: i64::try_from(point.x).unwrap_or(i64::MAX),
                    y: i64::try_from(point.y).unwrap_or(i64::MAX),
                    width: self.width,
                    height: self.height,
                });
            }
        }
        if self.entry == self.exit {
            return Err(MazeError::SameEntryExit);
        }
        Ok(())
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            entry: Point { x: 0, y: 0 },
            exit: Point {
                x: Self::DEFAULT_SIZE - 1,
                y: Self::DEFAULT_SIZE - 1,
            },
            perfect: false,
            output_file: PathBuf::from(Self::DEFAULT_OUTPUT),
            algorithm: Algorithm::default(),
        }
    }
}

/// Split configuration text into lower-cased keys and their values
///
/// Blank lines and `#` comments are skipped, values lose any trailing
/// `# comment`. A repeated key keeps its last value.
pub fn parse_entries(text: &str) -> Result<HashMap<String, String>, MazeError> {
    let mut entries = HashMap::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(MazeError::MissingSeparator {
                line: i + 1,
                content: line.to_string(),
            });
        };
        let key = key.trim().to_lowercase();
        let value = value.split('#').next().unwrap_or_default().trim();
        if key.is_empty() || value.is_empty() {
            return Err(MazeError::EmptyKeyOrValue {
                line: i + 1,
                content: line.to_string(),
            });
        }
        entries.insert(key, value.to_string());
    }
    Ok(entries)
}

fn parse_size(key: &'static str, value: Option<&str>) -> Result<usize, MazeError> {
    match value {
        None => Ok(MazeConfig::DEFAULT_SIZE),
        Some(v) => v.parse().map_err(|_| MazeError::InvalidInteger {
            key,
            value: v.to_string(),
        }),
    }
}

/// `"x,y"` with optionally signed integers; range is checked later
fn parse_point(key: &'static str, value: &str) -> Result<(i64, i64), MazeError> {
    let invalid = || MazeError::InvalidPoint {
        key,
        value: value.to_string(),
    };
    let (x, y) = value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<i64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i64>().map_err(|_| invalid())?;
    Ok((x, y))
}

fn check_size(width: usize, height: usize) -> Result<(), MazeError> {
    if width < MazeConfig::MIN_WIDTH || height < MazeConfig::MIN_HEIGHT {
        return Err(MazeError::TooSmall {
            width,
            height,
            min_width: MazeConfig::MIN_WIDTH,
            min_height: MazeConfig::MIN_HEIGHT,
        });
    }
    if width.checked_mul(height).map_or(true, |cells| cells > MazeConfig::MAX_CELLS) {
        return Err(MazeError::TooLarge {
            width,
            height,
            max_cells: MazeConfig::MAX_CELLS,
        });
    }
    Ok(())
}

fn check_bounds(
    name: &'static str,
    (x, y): (i64, i64),
    width: usize,
    height: usize,
) -> Result<Point, MazeError> {
    match (usize::try_from(x), usize::try_from(y)) {
        (Ok(px), Ok(py)) if px < width && py < height => Ok(Point { x: px, y: py }),
        _ => Err(MazeError::OutOfBounds {
            name,
            x,
            y,
            width,
            height,
        }),
    }
}
