//! Adapter module - JSON protocol for external drivers and renderers
//!
//! The engine itself never touches I/O. This crate is the translation
//! layer an external driver uses to expose a match:
//!
//! 1. **Observations**: once per tick, [`protocol::observation_from_snapshot`]
//!    turns the match snapshot into a serializable message and
//!    [`protocol::encode_line`] frames it as one newline-terminated JSON
//!    line.
//! 2. **Intents**: [`protocol::parse_intent_line`] decodes
//!    `{"type":"intent","slot":1,"action":"hardDrop"}` commands into
//!    `(slot, Intent)` pairs ready for [`Match::intent`].
//!
//! Malformed lines are protocol-boundary errors (`anyhow::Result`); once an
//! intent reaches the engine, invalid moves degrade to silent no-ops as
//! usual.
//!
//! # Example line flow
//!
//! ```text
//! Driver -> Renderer: {"type":"observation","seq":1,"ts":16,"phase":"running",...}
//! Client -> Driver:   {"type":"intent","slot":1,"action":"moveLeft"}
//! ```
//!
//! [`Match::intent`]: versus_tetris_arena::Match::intent

pub mod protocol;

pub use versus_tetris_arena as arena;
pub use versus_tetris_core as core;
pub use versus_tetris_types as types;

// Re-export protocol types for convenience
pub use protocol::{
    encode_line, observation_from_snapshot, parse_intent_line, ActiveObservation,
    GarbageObservation, IntentCommand, ObservationMessage, SessionObservation,
};
