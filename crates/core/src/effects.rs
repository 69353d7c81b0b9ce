//! Block effects - optional powerups resolved at lock time
//!
//! Effects ride on shapes as a tagged variant and are resolved by a single
//! dispatch function when the carrying piece locks. The base engine never
//! touches this module unless a match enables a non-zero effect chance.

use versus_tetris_types::{
    BlockEffect, SCORE_BOOST_POINTS, SHIELD_DURATION_MS, SLOW_MOTION_MS,
};

use crate::board::Board;
use crate::piece::ActivePiece;

/// What an effect did; the session folds this into its own state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectOutcome {
    pub bonus_score: u32,
    pub shield_until: Option<u64>,
    pub slow_until: Option<u64>,
}

/// Resolve a locked shape's effect against the owning session's board
///
/// - Bomb: clears the 3x3 neighborhood around the lock anchor, scoreless
/// - ScoreBoost: flat score bonus
/// - Shield: shields the session until `now + SHIELD_DURATION_MS`
/// - SlowMotion: doubles the gravity interval until `now + SLOW_MOTION_MS`
pub fn resolve_effect(
    effect: BlockEffect,
    board: &mut Board,
    piece: &ActivePiece,
    now: u64,
) -> EffectOutcome {
    let mut outcome = EffectOutcome::default();
    match effect {
        BlockEffect::None => {}
        BlockEffect::Bomb => {
            let half = (piece.shape.size() / 2) as i8;
            let (cx, cy) = (piece.x + half, piece.y + half);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    board.set(cx + dx, cy + dy, None);
                }
            }
        }
        BlockEffect::ScoreBoost => {
            outcome.bonus_score = SCORE_BOOST_POINTS;
        }
        BlockEffect::Shield => {
            outcome.shield_until = Some(now + SHIELD_DURATION_MS);
        }
        BlockEffect::SlowMotion => {
            outcome.slow_until = Some(now + SLOW_MOTION_MS);
        }
    }
    outcome
}
