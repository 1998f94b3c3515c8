//! The codel grid: a dense, rectangular, row-major array of colors.

use crate::color::Color;
use crate::direction::Direction;

/// A rectangular grid of codels. Coordinates are (row, column) with (0, 0)
/// at the top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Build a grid from parsed rows. Ragged rows are padded to the widest
    /// row with `Undefined` so the grid is always rectangular.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Grid {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            cells.extend_from_slice(row);
            cells.resize(cells.len() + cols - row.len(), Color::Undefined);
        }
        Grid {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// The color at (row, col). Panics if out of bounds.
    pub fn get(&self, coord: (usize, usize)) -> Color {
        let (r, c) = coord;
        debug_assert!(r < self.rows && c < self.cols);
        self.cells[r * self.cols + c]
    }

    /// Move one codel from `coord` in `direction`, or `None` if that steps
    /// off the grid.
    pub fn step(&self, coord: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.delta();
        let r = coord.0 as i64 + dr;
        let c = coord.1 as i64 + dc;
        if r < 0 || c < 0 || r >= self.rows as i64 || c >= self.cols as i64 {
            None
        } else {
            Some((r as usize, c as usize))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Grid {
        Grid::from_rows(vec![
            vec![Color::Red, Color::Yellow],
            vec![Color::Green, Color::Blue],
        ])
    }

    #[test]
    fn from_rows_rectangular() {
        let g = two_by_two();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 2);
        assert_eq!(g.get((0, 1)), Color::Yellow);
        assert_eq!(g.get((1, 0)), Color::Green);
    }

    #[test]
    fn ragged_rows_are_padded_with_undefined() {
        let g = Grid::from_rows(vec![vec![Color::Red], vec![Color::Green, Color::Blue]]);
        assert_eq!(g.cols(), 2);
        assert_eq!(g.get((0, 0)), Color::Red);
        assert_eq!(g.get((0, 1)), Color::Undefined);
    }

    #[test]
    fn empty_grid() {
        assert!(Grid::from_rows(vec![]).is_empty());
        assert!(Grid::from_rows(vec![vec![]]).is_empty());
    }

    #[test]
    fn step_stays_in_bounds() {
        let g = two_by_two();
        assert_eq!(g.step((0, 0), Direction::Right), Some((0, 1)));
        assert_eq!(g.step((0, 0), Direction::Down), Some((1, 0)));
        assert_eq!(g.step((0, 0), Direction::Left), None);
        assert_eq!(g.step((0, 0), Direction::Up), None);
        assert_eq!(g.step((1, 1), Direction::Right), None);
        assert_eq!(g.step((1, 1), Direction::Down), None);
    }
}
