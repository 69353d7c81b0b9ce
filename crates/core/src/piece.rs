//! Piece controller - active-piece kinematics
//!
//! The active piece is a shape plus an anchor; it is replaced, never
//! mutated in place, so the ghost projection and the real piece can never
//! alias. Rotation tries a short ladder of horizontal kick offsets instead
//! of full SRS kick tables.

use versus_tetris_types::BOARD_WIDTH;

use crate::board::Board;
use crate::shapes::Shape;

/// Horizontal offsets tried, in order, when a rotation collides
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Active falling piece: shape in its current rotation + anchor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a shape at the top-center spawn anchor
    pub fn spawn(shape: Shape) -> Self {
        let x = (BOARD_WIDTH as i8 - shape.size() as i8) / 2;
        Self { shape, x, y: 0 }
    }

    /// A copy shifted by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Whether every cell of this piece is on an open board position
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_placement(&self.shape, self.x, self.y)
    }

    /// Whether the piece is resting on something
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.translated(0, 1).is_valid(board)
    }
}

/// Try to rotate a piece clockwise with the kick-offset ladder
///
/// The rotated matrix is tried at column offsets 0, -1, +1, -2, +2 on the
/// same row; the first valid position wins. Returns None if every offset
/// collides, leaving the caller's state untouched.
pub fn try_rotate_cw(piece: &ActivePiece, board: &Board) -> Option<ActivePiece> {
    let rotated = piece.shape.rotated_cw();
    for &dx in KICK_OFFSETS.iter() {
        let candidate = ActivePiece {
            shape: rotated,
            x: piece.x + dx,
            y: piece.y,
        };
        if candidate.is_valid(board) {
            return Some(candidate);
        }
    }
    None
}

/// Resting y of the piece under an immediate hard drop
///
/// Pure projection: walks dy+1 until the position is invalid. Recomputed on
/// demand after every mutation - never cached.
pub fn ghost_y(piece: &ActivePiece, board: &Board) -> i8 {
    let mut rest = *piece;
    while rest.translated(0, 1).is_valid(board) {
        rest.y += 1;
    }
    rest.y
}

/// How many rows the piece would fall on a hard drop
pub fn drop_distance(piece: &ActivePiece, board: &Board) -> u32 {
    (ghost_y(piece, board) - piece.y) as u32
}
