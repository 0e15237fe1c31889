//! Cells, walls and the grid that owns them

use bitflags::bitflags;
use petgraph::graph::NodeIndex;
use petgraph::{algo, Graph, Undirected};

use crate::Point;

bitflags! {
    /// Walls that are standing around a cell.
    ///
    /// The bit values double as the hexadecimal wall code written to output
    /// files, see [crate::encoding].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        const NORTH = 0b0001;
        const EAST = 0b0010;
        const SOUTH = 0b0100;
        const WEST = 0b1000;
    }
}

/// One of the four axis-aligned moves between cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Offset `(dx, dy)` of this move; y grows southwards
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Wall flag on the side of the cell facing this direction
    pub fn wall(self) -> Walls {
        match self {
            Direction::North => Walls::NORTH,
            Direction::East => Walls::EAST,
            Direction::South => Walls::SOUTH,
            Direction::West => Walls::WEST,
        }
    }

    /// Single character token used in solution strings
    pub fn token(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Direction of a single step from `from` to `to`, if they are adjacent
    pub fn between(from: Point, to: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|d| {
            let (dx, dy) = d.delta();
            from.x.checked_add_signed(dx) == Some(to.x)
                && from.y.checked_add_signed(dy) == Some(to.y)
        })
    }
}

/// One unit square of the maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    walls: Walls,
    visited: bool,
    blocked: bool,
}

impl Cell {
    fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            walls: Walls::all(),
            visited: false,
            blocked: false,
        }
    }

    pub fn point(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction.wall())
    }

    /// Reached by the generator
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Permanently excluded from generation and pathfinding
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }
}

/// Fixed-size table of cells, indexed `[y][x]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid with every wall standing, nothing visited or blocked
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .map(|y| (0..width).map(|x| Cell::new(x, y)).collect())
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from decoded wall codes, row-major
    ///
    /// Each row must hold `width` entries. Walls are taken as given; callers
    /// decoding untrusted data should check [Self::is_consistent].
    pub(crate) fn from_walls(width: usize, rows: Vec<Vec<Walls>>) -> Self {
        let height = rows.len();
        let cells = rows
            .into_iter()
            .enumerate()
            .map(|(y, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(x, walls)| Cell {
                        walls,
                        ..Cell::new(x, y)
                    })
                    .collect()
            })
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Cell at `point`, or `None` outside the grid
    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.cells.get(point.y).and_then(|row| row.get(point.x))
    }

    /// Row-major iteration over all cells
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Row-major index of `point`, also its position in per-cell scratch arrays
    pub fn index(&self, point: Point) -> usize {
        point.y * self.width + point.x
    }

    pub fn point_at(&self, index: usize) -> Point {
        Point {
            x: index % self.width,
            y: index / self.width,
        }
    }

    /// Adjacent point in `direction`, or `None` if it falls outside the grid
    pub fn neighbor(&self, point: Point, direction: Direction) -> Option<Point> {
        let (dx, dy) = direction.delta();
        let x = point.x.checked_add_signed(dx)?;
        let y = point.y.checked_add_signed(dy)?;
        let next = Point { x, y };
        self.contains(next).then_some(next)
    }

    /// Neighbors that can be entered from `point` without crossing a wall
    pub fn open_neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        let walls = self.cell(point).map_or(Walls::all(), Cell::walls);
        Direction::ALL
            .into_iter()
            .filter(move |d| !walls.contains(d.wall()))
            .filter_map(move |d| self.neighbor(point, d))
    }

    /// Knock down the wall between `point` and its neighbor in `direction`
    ///
    /// Both sides of the wall are cleared together. Returns `false` and
    /// leaves the grid untouched if there is no neighbor that way.
    pub fn remove_wall(&mut self, point: Point, direction: Direction) -> bool {
        let Some(next) = self.neighbor(point, direction) else {
            return false;
        };
        self.cells[point.y][point.x].walls.remove(direction.wall());
        self.cells[next.y][next.x]
            .walls
            .remove(direction.opposite().wall());
        true
    }

    pub(crate) fn mark_visited(&mut self, point: Point) {
        self.cells[point.y][point.x].visited = true;
    }

    pub(crate) fn block(&mut self, point: Point) {
        self.cells[point.y][point.x].blocked = true;
    }

    /// Whether every shared wall agrees from both sides
    pub fn is_consistent(&self) -> bool {
        self.cells().all(|cell| {
            [Direction::East, Direction::South].into_iter().all(|d| {
                match self.neighbor(cell.point(), d).and_then(|p| self.cell(p)) {
                    Some(other) => cell.has_wall(d) == other.has_wall(d.opposite()),
                    None => true,
                }
            })
        })
    }

    /// Undirected graph of open passages between non-blocked cells
    ///
    /// Node weights are the cell coordinates. The second value maps `[y][x]`
    /// to the node of that cell, `None` for blocked cells.
    pub fn passage_graph(
        &self,
    ) -> (Graph<Point, (), Undirected>, Vec<Vec<Option<NodeIndex>>>) {
        let mut graph = Graph::new_undirected();
        let nodes: Vec<Vec<Option<NodeIndex>>> = self
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| (!cell.blocked).then(|| graph.add_node(cell.point())))
                    .collect()
            })
            .collect();

        // Undirected, so only look east and south
        for cell in self.cells() {
            let Some(node_a) = nodes[cell.y][cell.x] else {
                continue;
            };
            for direction in [Direction::East, Direction::South] {
                if cell.has_wall(direction) {
                    continue;
                }
                if let Some(next) = self.neighbor(cell.point(), direction) {
                    if let Some(node_b) = nodes[next.y][next.x] {
                        graph.add_edge(node_a, node_b, ());
                    }
                }
            }
        }
        (graph, nodes)
    }

    /// Whether the open passages form a single tree over all non-blocked cells
    pub fn is_perfect(&self) -> bool {
        let (graph, _) = self.passage_graph();
        graph.node_count() > 0
            && algo::connected_components(&graph) == 1
            && !algo::is_cyclic_undirected(&graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_closed_and_untouched() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cells().count(), 12);
        for cell in grid.cells() {
            assert_eq!(cell.walls(), Walls::all());
            assert!(!cell.is_visited());
            assert!(!cell.is_blocked());
        }
        assert_eq!(grid.cell(Point { x: 3, y: 2 }).unwrap().point(), Point { x: 3, y: 2 });
        assert!(grid.cell(Point { x: 4, y: 0 }).is_none());
    }

    #[test]
    fn neighbors_stay_inside_bounds() {
        let grid = Grid::new(3, 3);
        let corner = Point { x: 0, y: 0 };
        assert_eq!(grid.neighbor(corner, Direction::North), None);
        assert_eq!(grid.neighbor(corner, Direction::West), None);
        assert_eq!(grid.neighbor(corner, Direction::East), Some(Point { x: 1, y: 0 }));
        assert_eq!(grid.neighbor(corner, Direction::South), Some(Point { x: 0, y: 1 }));

        let far = Point { x: 2, y: 2 };
        assert_eq!(grid.neighbor(far, Direction::East), None);
        assert_eq!(grid.neighbor(far, Direction::South), None);
    }

    #[test]
    fn removing_a_wall_clears_both_sides() {
        let mut grid = Grid::new(3, 3);
        let a = Point { x: 1, y: 1 };
        assert!(grid.remove_wall(a, Direction::East));
        assert!(!grid.cell(a).unwrap().has_wall(Direction::East));
        assert!(!grid
            .cell(Point { x: 2, y: 1 })
            .unwrap()
            .has_wall(Direction::West));
        assert!(grid.is_consistent());

        assert!(grid.remove_wall(a, Direction::North));
        assert!(!grid
            .cell(Point { x: 1, y: 0 })
            .unwrap()
            .has_wall(Direction::South));
        assert_eq!(
            grid.open_neighbors(a).collect::<Vec<_>>(),
            vec![Point { x: 1, y: 0 }, Point { x: 2, y: 1 }]
        );
    }

    #[test]
    fn outer_wall_cannot_be_removed() {
        let mut grid = Grid::new(2, 2);
        let before = grid.clone();
        assert!(!grid.remove_wall(Point { x: 0, y: 0 }, Direction::North));
        assert_eq!(grid, before);
    }

    #[test]
    fn one_sided_wall_is_inconsistent() {
        let mut grid = Grid::new(2, 1);
        grid.cells[0][0].walls.remove(Walls::EAST);
        assert!(!grid.is_consistent());
    }

    #[test]
    fn direction_between_adjacent_points() {
        let p = Point { x: 1, y: 1 };
        assert_eq!(Direction::between(p, Point { x: 1, y: 0 }), Some(Direction::North));
        assert_eq!(Direction::between(p, Point { x: 0, y: 1 }), Some(Direction::West));
        assert_eq!(Direction::between(p, Point { x: 2, y: 2 }), None);
        assert_eq!(Direction::between(p, p), None);
    }

    #[test]
    fn passage_graph_skips_blocked_cells() {
        let mut grid = Grid::new(3, 1);
        grid.remove_wall(Point { x: 0, y: 0 }, Direction::East);
        grid.remove_wall(Point { x: 1, y: 0 }, Direction::East);
        assert!(grid.is_perfect());

        grid.block(Point { x: 2, y: 0 });
        let (graph, nodes) = grid.passage_graph();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(nodes[0][2].is_none());
    }

    #[test]
    fn loop_is_not_perfect() {
        let mut grid = Grid::new(2, 2);
        let origin = Point { x: 0, y: 0 };
        grid.remove_wall(origin, Direction::East);
        grid.remove_wall(origin, Direction::South);
        // (1,1) still sealed off
        assert!(!grid.is_perfect());
        grid.remove_wall(Point { x: 1, y: 1 }, Direction::North);
        assert!(grid.is_perfect());
        grid.remove_wall(Point { x: 1, y: 1 }, Direction::West);
        assert!(!grid.is_perfect());
    }
}
