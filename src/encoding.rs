//! Hexadecimal wall codes and the generated output file
//!
//! Every cell is written as one hexadecimal digit whose bits are its
//! standing walls: bit 0 north, bit 1 east, bit 2 south, bit 3 west. A cell
//! with all four walls is `F`, a crossing with none is `0`.
//!
//! The output file holds the rows of digits, an empty line, then the entry
//! point, the exit point and the solution as `N`/`E`/`S`/`W` tokens:
//!
//! ```text
//! D3
//! D6
//!
//! 0,0
//! 1,1
//! ES
//! ```

use itertools::Itertools;

use crate::error::MazeError;
use crate::grid::{Direction, Grid, Walls};
use crate::solver::Path;
use crate::Point;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Hex digit for a set of standing walls
pub fn encode_walls(walls: Walls) -> char {
    HEX_DIGITS[usize::from(walls.bits() & 0xF)] as char
}

/// Walls for a hex digit, either case; `None` for anything else
pub fn decode_walls(digit: char) -> Option<Walls> {
    digit
        .to_digit(16)
        .and_then(|d| Walls::from_bits(d as u8))
}

/// Rows of hex digits, one line per grid row
pub fn encode_grid(grid: &Grid) -> String {
    grid.rows()
        .map(|row| row.iter().map(|cell| encode_walls(cell.walls())).join(""))
        .join("\n")
}

/// Complete output file contents for a solved maze
pub fn encode_output(grid: &Grid, entry: Point, exit: Point, path: &Path) -> String {
    format!(
        "{}\n\n{entry}\n{exit}\n{}\n",
        encode_grid(grid),
        path.tokens()
    )
}

/// Decoded output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeFile {
    pub grid: Grid,
    pub entry: Point,
    pub exit: Point,
    pub directions: Vec<Direction>,
}

impl MazeFile {
    /// Read back the contents written by [encode_output]
    ///
    /// Blocked cells cannot be told apart from sealed ones in the file, so
    /// the decoded grid has nothing blocked.
    pub fn parse(contents: &str) -> Result<Self, MazeError> {
        let mut lines = contents.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

        let mut rows: Vec<Vec<Walls>> = Vec::new();
        let mut width = None;
        for (line, text) in lines.by_ref() {
            if text.is_empty() {
                break;
            }
            let row = text
                .chars()
                .map(|c| {
                    decode_walls(c).ok_or_else(|| MazeError::InvalidEncoding {
                        line,
                        reason: format!("`{c}` is not a hexadecimal wall code"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(MazeError::InvalidEncoding {
                        line,
                        reason: format!("expected {w} cells, found {}", row.len()),
                    })
                }
                Some(_) => (),
            }
            rows.push(row);
        }
        let width = width.ok_or_else(|| MazeError::InvalidEncoding {
            line: 1,
            reason: "no maze rows".to_string(),
        })?;
        let grid = Grid::from_walls(width, rows);

        let mut next_point = |name: &str| -> Result<Point, MazeError> {
            let (line, text) = lines.next().ok_or_else(|| MazeError::InvalidEncoding {
                line: grid.height() + 2,
                reason: format!("missing {name} point"),
            })?;
            parse_point(text)
                .filter(|p| grid.contains(*p))
                .ok_or_else(|| MazeError::InvalidEncoding {
                    line,
                    reason: format!("invalid {name} point `{text}`"),
                })
        };
        let entry = next_point("entry")?;
        let exit = next_point("exit")?;

        let directions = match lines.next() {
            None => Vec::new(),
            Some((line, text)) => text
                .chars()
                .map(|c| {
                    Direction::ALL
                        .into_iter()
                        .find(|d| d.token() == c)
                        .ok_or_else(|| MazeError::InvalidEncoding {
                            line,
                            reason: format!("`{c}` is not a direction"),
                        })
                })
                .collect::<Result<_, _>>()?,
        };

        Ok(Self {
            grid,
            entry,
            exit,
            directions,
        })
    }

    /// Walk the directions from the entry, refusing to cross walls
    ///
    /// Returns the cell where the walk ends, or `None` if a step hits a wall.
    pub fn walk(&self) -> Option<Point> {
        self.directions.iter().try_fold(self.entry, |at, d| {
            let cell = self.grid.cell(at)?;
            if cell.has_wall(*d) {
                return None;
            }
            self.grid.neighbor(at, *d)
        })
    }
}

fn parse_point(text: &str) -> Option<Point> {
    let (x, y) = text.split_once(',')?;
    Some(Point {
        x: x.trim().parse().ok()?,
        y: y.trim().parse().ok()?,
    })
}
