//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the per-player engine: game rules, state management,
//! and simulation logic. It has **zero dependencies** on UI, networking, or
//! I/O, making it:
//!
//! - **Deterministic**: the same seeds produce identical sessions
//! - **Testable**: every rule is exercised without a driver
//! - **Portable**: runs headless, in a terminal front-end, or under a bot
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision detection, line clearing, and
//!   garbage injection
//! - [`piece`]: active-piece kinematics with the kick-offset ladder
//! - [`session`]: one player's complete state and its `advance(now)` tick
//! - [`shapes`]: tetromino catalog with on-demand matrix rotation
//! - [`scoring`]: line-clear values, drop bonuses, level curve
//! - [`effects`]: optional powerup dispatch at lock time
//! - [`rng`]: seeded LCG shared by piece draws, garbage holes, and CPU dice
//! - [`snapshot`]: plain-data read surface for drivers and renderers
//!
//! # Example
//!
//! ```
//! use versus_tetris_core::PlayerSession;
//! use versus_tetris_types::{Intent, PlayerMode};
//!
//! let mut session = PlayerSession::new(1, 42);
//! session.set_mode(PlayerMode::Human);
//! session.start(0, 0);
//!
//! // Hard drops award points per cell dropped
//! session.apply_intent(Intent::HardDrop, 0);
//! assert!(session.score() > 0);
//! ```
//!
//! # Timing
//!
//! Sessions never read a clock. The coordinator passes a monotonic `now`
//! (milliseconds) into [`session::PlayerSession::advance`] and every intent;
//! gravity, slow-motion expiry, shields, and garbage-arrival animations are
//! all timestamp comparisons against it.

pub mod board;
pub mod effects;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use versus_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use piece::{ghost_y, try_rotate_cw, ActivePiece};
pub use rng::SimpleRng;
pub use session::{AdvanceEvents, PlayerSession, SessionStats};
pub use shapes::{Shape, ShapeGrid};
pub use snapshot::{ActiveSnapshot, GarbageFxSnapshot, SessionSnapshot};
