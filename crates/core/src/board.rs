//! Board module - per-player grid storage and row mechanics
//!
//! The board is a 10x20 grid where each cell is empty or carries a material
//! tag. Uses a flat array for cache locality and zero-allocation row moves.
//! Coordinates: (x, y) with x in 0..9 left to right and y in 0..19 top to
//! bottom. Cells above row 0 are legal piece positions (spawn overlap) but
//! are never stored.

use arrayvec::ArrayVec;
use versus_tetris_types::{Cell, CellTag, BOARD_HEIGHT, BOARD_WIDTH};

use crate::rng::SimpleRng;
use crate::shapes::Shape;

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may occupy (x, y)
    ///
    /// Positions above the top row are open as long as the column is in
    /// range; out of bounds sideways or below, or an occupied cell, is
    /// closed.
    pub fn is_cell_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        self.cells[(y as usize) * (BOARD_WIDTH as usize) + (x as usize)].is_none()
    }

    /// Whether every occupied cell of `shape` anchored at (x, y) is open
    pub fn is_valid_placement(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .blocks()
            .iter()
            .all(|&(dx, dy)| self.is_cell_open(x + dx, y + dy))
    }

    /// Write a shape's occupied cells into the grid at the given anchor
    ///
    /// Cells above row 0 are dropped; they cannot be stored. Clear
    /// detection is the caller's responsibility.
    pub fn lock_shape(&mut self, shape: &Shape, x: i8, y: i8, tag: CellTag) {
        for &(dx, dy) in shape.blocks().iter() {
            let py = y + dy;
            if py >= 0 {
                self.set(x + dx, py, Some(tag));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove a row, shifting all rows above it down and backfilling an
    /// empty row at the top
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear every full row and return how many were removed
    ///
    /// Scans bottom to top; after removing a row the same index is
    /// re-examined, since the rows above have shifted down into it. This
    /// handles multiple non-contiguous full rows in one pass. The count is
    /// not capped.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Inject `n` garbage rows at the bottom
    ///
    /// The top `n` rows are discarded, everything shifts up, and the new
    /// bottom rows are fully occupied except one uniformly-random hole
    /// each, chosen independently per row. Returns the hole column of each
    /// inserted row, top to bottom. The caller must re-validate the active
    /// piece afterward. `n` clamps to the board height.
    pub fn insert_garbage_rows(
        &mut self,
        n: usize,
        rng: &mut SimpleRng,
    ) -> ArrayVec<u8, { BOARD_HEIGHT as usize }> {
        let n = n.min(BOARD_HEIGHT as usize);
        let mut holes = ArrayVec::new();
        if n == 0 {
            return holes;
        }

        let width = BOARD_WIDTH as usize;
        self.cells.copy_within(n * width.., 0);

        let first_new_row = BOARD_HEIGHT as usize - n;
        for row in first_new_row..BOARD_HEIGHT as usize {
            let hole = rng.next_range(BOARD_WIDTH as u32) as usize;
            let start = row * width;
            for col in 0..width {
                self.cells[start + col] = if col == hole {
                    None
                } else {
                    Some(CellTag::Garbage)
                };
            }
            holes.push(hole as u8);
        }
        holes
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid into a snapshot buffer (0 = empty, tag encoding
    /// otherwise)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                out[y][x] = match self.cells[y * BOARD_WIDTH as usize + x] {
                    Some(tag) => tag.as_u8(),
                    None => 0,
                };
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
