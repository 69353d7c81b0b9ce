//! Read-only session snapshots for the driver/renderer surface
//!
//! Plain data, filled in place; serialization lives in the adapter crate.

use arrayvec::ArrayVec;
use versus_tetris_types::{BlockEffect, PieceKind, PlayerMode, BOARD_HEIGHT, BOARD_WIDTH};

use crate::piece::ActivePiece;
use crate::shapes::MAX_SHAPE_SIZE;

/// The active piece as a renderer sees it: matrix + anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub effect: BlockEffect,
    pub size: u8,
    pub cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(piece: ActivePiece) -> Self {
        let mut cells = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        piece.shape.grid().write_grid(&mut cells);
        Self {
            kind: piece.shape.kind,
            effect: piece.shape.effect,
            size: piece.shape.size(),
            cells,
            x: piece.x,
            y: piece.y,
        }
    }
}

/// One pending garbage arrival, for visual interpolation only
#[derive(Debug, Clone, PartialEq)]
pub struct GarbageFxSnapshot {
    /// Hole column of each row that landed, top to bottom
    pub hole_cols: ArrayVec<u8, { BOARD_HEIGHT as usize }>,
    /// Arrival progress in [0, 1]
    pub progress: f32,
}

/// Complete per-session view handed to the driver each tick
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub slot: u8,
    pub mode: PlayerMode,
    /// 0 = empty, otherwise the cell tag encoding
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub next_effect: BlockEffect,
    pub held: Option<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub shielded: bool,
    pub pending_garbage: Vec<GarbageFxSnapshot>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            slot: 0,
            mode: PlayerMode::Off,
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            next_effect: BlockEffect::None,
            held: None,
            score: 0,
            lines: 0,
            level: 1,
            game_over: false,
            shielded: false,
            pending_garbage: Vec::new(),
        }
    }
}
