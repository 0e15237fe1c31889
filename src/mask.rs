//! Fixed patterns of cells that are kept out of the maze

use log::debug;

use crate::error::MazeError;
use crate::grid::Grid;
use crate::Point;

/// Bitmap of permanently inaccessible cells, centered in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedMask {
    rows: Vec<Vec<bool>>,
    width: usize,
}

impl BlockedMask {
    /// The "42" drawn in the middle of every generated maze
    pub const FORTY_TWO: [&'static str; 5] = [
        "1000111",
        "1000001",
        "1110111",
        "0010100",
        "0010111",
    ];

    /// Mask from text rows, where `1` marks a blocked cell
    ///
    /// Shorter rows are padded with open cells up to the longest row.
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let width = pattern.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let rows = pattern
            .iter()
            .map(|row| {
                let mut bits: Vec<bool> = row.chars().map(|c| c == '1').collect();
                bits.resize(width, false);
                bits
            })
            .collect();
        Self { rows, width }
    }

    pub fn forty_two() -> Self {
        Self::from_pattern(&Self::FORTY_TWO)
    }

    /// Mask that blocks nothing and fits any grid
    pub fn empty() -> Self {
        Self::from_pattern(&[])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of blocked cells in the pattern
    pub fn blocked_count(&self) -> usize {
        self.rows.iter().flatten().filter(|b| **b).count()
    }

    /// Top-left corner of the pattern once centered in a `width`x`height` grid
    ///
    /// Fails if the pattern is larger than the grid in either axis.
    pub fn offset(&self, width: usize, height: usize) -> Result<Point, MazeError> {
        if width < self.width() || height < self.height() {
            return Err(MazeError::MaskTooLarge {
                width,
                height,
                pattern_width: self.width(),
                pattern_height: self.height(),
            });
        }
        Ok(Point {
            x: (width - self.width()) / 2,
            y: (height - self.height()) / 2,
        })
    }

    /// Grid coordinates of every blocked cell, once centered
    pub fn blocked_points(&self, width: usize, height: usize) -> Result<Vec<Point>, MazeError> {
        let offset = self.offset(width, height)?;
        Ok(self
            .rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter().enumerate().filter(|(_, b)| **b).map(move |(x, _)| Point {
                    x: offset.x + x,
                    y: offset.y + y,
                })
            })
            .collect())
    }

    /// Mark the masked cells of `grid` as blocked
    ///
    /// The size check happens before any cell is touched, so a failing call
    /// leaves the grid as it was.
    pub fn apply(&self, grid: &mut Grid) -> Result<(), MazeError> {
        let points = self.blocked_points(grid.width(), grid.height())?;
        debug!(
            "Blocking {} cells of a {}x{} pattern",
            points.len(),
            self.width(),
            self.height()
        );
        for point in points {
            grid.block(point);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_two_shape() {
        let mask = BlockedMask::forty_two();
        assert_eq!((mask.width(), mask.height()), (7, 5));
        assert_eq!(mask.blocked_count(), 18);
    }

    #[test]
    fn centered_in_twenty_by_twenty() {
        let mut grid = Grid::new(20, 20);
        let mask = BlockedMask::forty_two();
        assert_eq!(mask.offset(20, 20).unwrap(), Point { x: 6, y: 7 });

        mask.apply(&mut grid).unwrap();
        let blocked: Vec<Point> = grid
            .cells()
            .filter(|c| c.is_blocked())
            .map(|c| c.point())
            .collect();
        assert_eq!(blocked.len(), mask.blocked_count());
        for point in &blocked {
            assert!((6..=12).contains(&point.x) && (7..=11).contains(&point.y));
        }
        assert!(blocked.contains(&Point { x: 6, y: 7 }));
        assert!(blocked.contains(&Point { x: 12, y: 11 }));
        assert!(!blocked.contains(&Point { x: 7, y: 7 }));
    }

    #[test]
    fn odd_leftover_rounds_down() {
        let mask = BlockedMask::forty_two();
        assert_eq!(mask.offset(9, 7).unwrap(), Point { x: 1, y: 1 });
        assert_eq!(mask.offset(10, 8).unwrap(), Point { x: 1, y: 1 });
    }

    #[test]
    fn too_small_grid_is_left_untouched() {
        let mut grid = Grid::new(5, 5);
        let before = grid.clone();
        let err = BlockedMask::forty_two().apply(&mut grid).unwrap_err();
        assert!(matches!(
            err,
            MazeError::MaskTooLarge {
                width: 5,
                height: 5,
                pattern_width: 7,
                pattern_height: 5
            }
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn ragged_pattern_is_padded() {
        let mask = BlockedMask::from_pattern(&["1", "011"]);
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert_eq!(
            mask.blocked_points(3, 2).unwrap(),
            vec![Point { x: 0, y: 0 }, Point { x: 1, y: 1 }, Point { x: 2, y: 1 }]
        );
    }

    #[test]
    fn empty_mask_fits_anything() {
        let mut grid = Grid::new(1, 1);
        BlockedMask::empty().apply(&mut grid).unwrap();
        assert!(grid.cells().all(|c| !c.is_blocked()));
    }
}
