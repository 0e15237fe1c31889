//! Text drawing of a maze

use itertools::Itertools;

use crate::grid::{Cell, Direction, Grid};
use crate::solver::Path;
use crate::Point;

const CORNER: char = '+';
const H_WALL: &str = "---";
const V_WALL: char = '|';
const OPEN: &str = "   ";

/// Draw the maze with `+`, `---` and `|` walls
///
/// Cells show the entry as `E`, the exit as `X`, the solution as `.` and
/// blocked cells as `###`.
///
/// # Examples
/// ```
/// use a_maze_ing::grid::{Direction, Grid};
/// use a_maze_ing::render::render;
/// use a_maze_ing::solver::solve;
/// use a_maze_ing::Point;
///
/// let mut grid = Grid::new(3, 1);
/// grid.remove_wall(Point { x: 0, y: 0 }, Direction::East);
/// grid.remove_wall(Point { x: 1, y: 0 }, Direction::East);
/// let (entry, exit) = (Point { x: 0, y: 0 }, Point { x: 2, y: 0 });
/// let path = solve(&grid, entry, exit);
/// assert_eq!(
///     render(&grid, entry, exit, &path),
///     "+---+---+---+\n| E   .   X |\n+---+---+---+"
/// );
/// ```
pub fn render(grid: &Grid, entry: Point, exit: Point, path: &Path) -> String {
    let body = |cell: &Cell| {
        let point = cell.point();
        if cell.is_blocked() {
            "###"
        } else if point == entry {
            " E "
        } else if point == exit {
            " X "
        } else if path.contains(point) {
            " . "
        } else {
            OPEN
        }
    };

    let mut lines = Vec::with_capacity(grid.height() * 2 + 1);
    for row in grid.rows() {
        lines.push(horizontal(row, Direction::North));

        let mut middle: String = row
            .iter()
            .map(|cell| {
                let wall = if cell.has_wall(Direction::West) { V_WALL } else { ' ' };
                format!("{wall}{}", body(cell))
            })
            .collect();
        let east = row.last().is_some_and(|c| c.has_wall(Direction::East));
        middle.push(if east { V_WALL } else { ' ' });
        lines.push(middle);
    }
    if let Some(last) = grid.rows().last() {
        lines.push(horizontal(last, Direction::South));
    }
    lines.iter().join("\n")
}

/// Wall line above (`North`) or below (`South`) a row of cells
fn horizontal(row: &[Cell], side: Direction) -> String {
    let mut line: String = row
        .iter()
        .map(|cell| {
            let wall = if cell.has_wall(side) { H_WALL } else { OPEN };
            format!("{CORNER}{wall}")
        })
        .collect();
    line.push(CORNER);
    line
}
