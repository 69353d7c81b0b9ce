//! Shape library - tetromino catalog and matrix rotation
//!
//! Shapes are square 0/1 matrices (I is 4x4, O is 2x2, the rest 3x3) kept
//! in a fixed backing array so they are `Copy` and every hand-off is a deep
//! copy - no session can alias another's shape. Rotation states are not
//! precomputed: a clockwise rotation transposes the matrix by reading
//! columns bottom-to-top into rows, so kick handling works uniformly for
//! every kind.

use arrayvec::ArrayVec;
use versus_tetris_types::{BlockEffect, PieceKind};

use crate::rng::SimpleRng;

/// Largest shape matrix edge (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square 0/1 matrix describing one rotation state of a tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeGrid {
    size: u8,
    cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeGrid {
    /// Matrix edge length for this shape
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at (col, row) is occupied
    pub fn is_set(&self, col: u8, row: u8) -> bool {
        col < self.size && row < self.size && self.cells[row as usize][col as usize] != 0
    }

    /// Rotate 90 degrees clockwise: columns are read bottom-to-top into rows
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut out = ShapeGrid {
            size: self.size,
            cells: [[0; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
        };
        for r in 0..n {
            for c in 0..n {
                out.cells[r][c] = self.cells[n - 1 - c][r];
            }
        }
        out
    }

    /// Copy the matrix into a snapshot buffer (unused cells stay zero)
    pub fn write_grid(&self, out: &mut [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) {
        *out = self.cells;
    }
}

/// A tetromino: rotation-state matrix + kind + optional powerup effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: PieceKind,
    pub effect: BlockEffect,
    grid: ShapeGrid,
}

impl Shape {
    /// The spawn-orientation shape for a kind
    pub fn base(kind: PieceKind) -> Self {
        let shape = Shape {
            kind,
            effect: BlockEffect::None,
            grid: base_grid(kind),
        };
        debug_assert_eq!(shape.blocks().len(), 4, "tetromino must have 4 cells");
        shape
    }

    /// Draw a uniformly-random tetromino with no effect
    pub fn random(rng: &mut SimpleRng) -> Self {
        let kind = PieceKind::ALL[rng.next_range(7) as usize];
        Shape::base(kind)
    }

    /// Draw a uniformly-random tetromino, rolling a powerup effect with
    /// probability `effect_pct`/100
    pub fn random_with_effects(rng: &mut SimpleRng, effect_pct: u32) -> Self {
        let mut shape = Shape::random(rng);
        if effect_pct > 0 && rng.chance(effect_pct) {
            shape.effect = match rng.next_range(4) {
                0 => BlockEffect::Bomb,
                1 => BlockEffect::ScoreBoost,
                2 => BlockEffect::Shield,
                _ => BlockEffect::SlowMotion,
            };
        }
        shape
    }

    /// Matrix edge length
    pub fn size(&self) -> u8 {
        self.grid.size()
    }

    /// The underlying rotation-state matrix
    pub fn grid(&self) -> &ShapeGrid {
        &self.grid
    }

    /// This shape rotated 90 degrees clockwise (kind and effect carry over)
    pub fn rotated_cw(&self) -> Self {
        Shape {
            grid: self.grid.rotated_cw(),
            ..*self
        }
    }

    /// Occupied cell offsets relative to the anchor, as (dx, dy)
    pub fn blocks(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        let n = self.grid.size();
        for row in 0..n {
            for col in 0..n {
                if self.grid.is_set(col, row) {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }
}

fn base_grid(kind: PieceKind) -> ShapeGrid {
    match kind {
        PieceKind::I => ShapeGrid {
            size: 4,
            cells: [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        },
        PieceKind::O => ShapeGrid {
            size: 2,
            cells: [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        },
        PieceKind::T => ShapeGrid {
            size: 3,
            cells: [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        },
        PieceKind::S => ShapeGrid {
            size: 3,
            cells: [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        },
        PieceKind::Z => ShapeGrid {
            size: 3,
            cells: [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        },
        PieceKind::J => ShapeGrid {
            size: 3,
            cells: [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        },
        PieceKind::L => ShapeGrid {
            size: 3,
            cells: [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        },
    }
}
