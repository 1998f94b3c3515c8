//! Color block decomposition.
//!
//! A block is a maximal 4-connected region of same-colored codels. Blocks
//! partition the grid: every codel, including white and black ones,
//! belongs to exactly one block. Whether a block is enterable is decided
//! by the movement simulator, not here.

use std::collections::VecDeque;

use crate::color::Color;
use crate::direction::Direction;
use crate::grid::Grid;

/// A maximal 4-connected same-colored region.
#[derive(Debug, Clone)]
pub struct Block {
    /// Dense id in row-major discovery order.
    pub id: usize,
    pub color: Color,
    /// (row, col) coordinates of every codel in the block.
    pub cells: Vec<(usize, usize)>,
}

impl Block {
    /// Number of codels in the block (the value Push pushes).
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// All blocks of a grid, with a flat coordinate→block-id table.
///
/// The table makes `id_at` O(1); looking a coordinate up by scanning block
/// cell lists would make graph construction quadratic in codel count.
#[derive(Debug, Clone)]
pub struct BlockMap {
    blocks: Vec<Block>,
    index: Vec<usize>,
    cols: usize,
}

impl BlockMap {
    /// Decompose `grid` into blocks by breadth-first flood fill, visiting
    /// cells in row-major order so ids follow discovery order.
    pub fn build(grid: &Grid) -> BlockMap {
        let (rows, cols) = (grid.rows(), grid.cols());
        let mut index = vec![usize::MAX; rows * cols];
        let mut blocks = Vec::new();

        for r in 0..rows {
            for c in 0..cols {
                if index[r * cols + c] != usize::MAX {
                    continue;
                }
                let id = blocks.len();
                let color = grid.get((r, c));
                let mut cells = Vec::new();
                let mut queue = VecDeque::new();
                queue.push_back((r, c));
                index[r * cols + c] = id;
                while let Some(cell) = queue.pop_front() {
                    cells.push(cell);
                    for dir in [
                        Direction::Up,
                        Direction::Down,
                        Direction::Left,
                        Direction::Right,
                    ] {
                        if let Some((nr, nc)) = grid.step(cell, dir) {
                            if index[nr * cols + nc] == usize::MAX && grid.get((nr, nc)) == color {
                                index[nr * cols + nc] = id;
                                queue.push_back((nr, nc));
                            }
                        }
                    }
                }
                blocks.push(Block { id, color, cells });
            }
        }

        BlockMap {
            blocks,
            index,
            cols,
        }
    }

    /// The id of the block containing (row, col).
    pub fn id_at(&self, coord: (usize, usize)) -> usize {
        self.index[coord.0 * self.cols + coord.1]
    }

    pub fn get(&self, id: usize) -> &Block {
        &self.blocks[id]
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color::*;

    #[test]
    fn single_cell_grid() {
        let grid = Grid::from_rows(vec![vec![Red]]);
        let blocks = BlockMap::build(&grid);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.get(0).color, Red);
        assert_eq!(blocks.get(0).size(), 1);
    }

    #[test]
    fn l_shaped_block_is_connected() {
        let grid = Grid::from_rows(vec![vec![Red, Red], vec![Red, Blue]]);
        let blocks = BlockMap::build(&grid);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks.get(0).size(), 3);
        assert_eq!(blocks.get(1).color, Blue);
        assert_eq!(blocks.id_at((1, 0)), 0);
        assert_eq!(blocks.id_at((1, 1)), 1);
    }

    #[test]
    fn diagonal_cells_are_separate_blocks() {
        let grid = Grid::from_rows(vec![vec![Red, Blue], vec![Blue, Red]]);
        let blocks = BlockMap::build(&grid);
        assert_eq!(blocks.len(), 4);
    }

    #[test]
    fn ids_follow_row_major_discovery_order() {
        let grid = Grid::from_rows(vec![vec![Red, Blue, Green]]);
        let blocks = BlockMap::build(&grid);
        assert_eq!(blocks.get(0).color, Red);
        assert_eq!(blocks.get(1).color, Blue);
        assert_eq!(blocks.get(2).color, Green);
    }

    #[test]
    fn white_and_black_form_blocks_too() {
        let grid = Grid::from_rows(vec![vec![White, White, Black]]);
        let blocks = BlockMap::build(&grid);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks.get(0).color, White);
        assert_eq!(blocks.get(0).size(), 2);
        assert_eq!(blocks.get(1).color, Black);
    }

    #[test]
    fn blocks_partition_the_grid() {
        let grid = Grid::from_rows(vec![
            vec![Red, Red, Blue, White],
            vec![Green, Red, Blue, Black],
            vec![Green, Green, Undefined, Undefined],
        ]);
        let blocks = BlockMap::build(&grid);
        let total: usize = blocks.iter().map(Block::size).sum();
        assert_eq!(total, grid.rows() * grid.cols());
        for block in blocks.iter() {
            for &cell in &block.cells {
                assert_eq!(blocks.id_at(cell), block.id);
                assert_eq!(grid.get(cell), block.color);
            }
        }
    }
}
