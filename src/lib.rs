//! Versus Tetris (workspace facade crate).
//!
//! This package keeps the `versus_tetris::{types,core,arena,adapter}` public
//! API stable while the implementation lives in dedicated crates under
//! `crates/`.

pub use versus_tetris_adapter as adapter;
pub use versus_tetris_arena as arena;
pub use versus_tetris_core as core;
pub use versus_tetris_types as types;
