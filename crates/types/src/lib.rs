//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (core logic, match coordination, the adapter
//! protocol).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Slots**: 3 player boards per match (indexed 1-3 at the API surface)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds and are compared against the monotonic
//! `now` timestamp the driver passes into every tick:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal driver frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 800 | Gravity at level 1 |
//! | `MIN_DROP_MS` | 50 | Gravity floor at high levels |
//! | `GARBAGE_ARRIVAL_MS` | 500 | Cosmetic garbage arrival window |
//! | `SHIELD_DURATION_MS` | 5000 | Shield effect lifetime |
//! | `SLOW_MOTION_MS` | 4000 | Slow-motion effect lifetime |
//!
//! # Examples
//!
//! ```
//! use versus_tetris_types::{Intent, PieceKind, PlayerMode, BOARD_WIDTH};
//!
//! // Case-insensitive protocol parsing
//! assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!(PlayerMode::from_str("cpu"), Some(PlayerMode::Cpu));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of player slots in a match
pub const SLOT_COUNT: usize = 3;

/// Nominal driver frame interval in milliseconds (~60 FPS)
pub const TICK_MS: u64 = 16;

/// Gravity interval at level 1 (milliseconds per row)
pub const BASE_DROP_MS: u64 = 800;

/// Fastest gravity interval reachable through level progression
pub const MIN_DROP_MS: u64 = 50;

/// Lines required to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by cleared-row count (saturates at 4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell for a soft drop
pub const SOFT_DROP_SCORE: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_SCORE: u32 = 2;

/// Duration of the cosmetic garbage-row arrival animation
pub const GARBAGE_ARRIVAL_MS: u64 = 500;

/// Shield effect duration after a shield block locks
pub const SHIELD_DURATION_MS: u64 = 5000;

/// Slow-motion effect duration after a slow-motion block locks
pub const SLOW_MOTION_MS: u64 = 4000;

/// Gravity interval multiplier while slow-motion is active
pub const SLOW_MOTION_FACTOR: u64 = 2;

/// Flat score bonus granted by a score-boost block
pub const SCORE_BOOST_POINTS: u32 = 500;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in draw order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Material tag of an occupied board cell
///
/// Cells carry only a color/material tag, no identity. Garbage rows use a
/// dedicated tag so renderers can distinguish them from locked pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellTag {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    Garbage,
}

impl CellTag {
    /// Snapshot encoding: 0 is reserved for empty cells
    pub fn as_u8(&self) -> u8 {
        match self {
            CellTag::I => 1,
            CellTag::O => 2,
            CellTag::T => 3,
            CellTag::S => 4,
            CellTag::Z => 5,
            CellTag::J => 6,
            CellTag::L => 7,
            CellTag::Garbage => 8,
        }
    }
}

impl From<PieceKind> for CellTag {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => CellTag::I,
            PieceKind::O => CellTag::O,
            PieceKind::T => CellTag::T,
            PieceKind::S => CellTag::S,
            PieceKind::Z => CellTag::Z,
            PieceKind::J => CellTag::J,
            PieceKind::L => CellTag::L,
        }
    }
}

/// Cell on the board (None = empty, Some = occupied with a material tag)
pub type Cell = Option<CellTag>;

/// Player slot control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerMode {
    Human,
    Cpu,
    Off,
}

impl PlayerMode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(PlayerMode::Human),
            "cpu" => Some(PlayerMode::Cpu),
            "off" => Some(PlayerMode::Off),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerMode::Human => "human",
            PlayerMode::Cpu => "cpu",
            PlayerMode::Off => "off",
        }
    }
}

/// Discrete player intents accepted by a match
///
/// Intents for Off/CPU slots are ignored; an intent that cannot apply
/// (rotate into a wall, move past an edge) is a silent no-op, never an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    Hold,
}

impl Intent {
    /// Parse intent from string (for the adapter protocol)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "hold" => Some(Intent::Hold),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::RotateCw => "rotateCw",
            Intent::Hold => "hold",
        }
    }
}

/// Optional powerup effect carried by a shape, resolved once at lock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEffect {
    None,
    Bomb,
    ScoreBoost,
    Shield,
    SlowMotion,
}

impl BlockEffect {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            BlockEffect::None => None,
            BlockEffect::Bomb => Some("bomb"),
            BlockEffect::ScoreBoost => Some("scoreBoost"),
            BlockEffect::Shield => Some("shield"),
            BlockEffect::SlowMotion => Some("slowMotion"),
        }
    }
}

/// Match lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Idle,
    Running,
    Finished,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Idle => "idle",
            MatchPhase::Running => "running",
            MatchPhase::Finished => "finished",
        }
    }
}
