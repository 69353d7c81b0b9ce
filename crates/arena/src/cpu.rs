//! CPU strategy - the probability-tuple heuristic
//!
//! A CPU driver is deliberately not a board evaluator: on a coarse decision
//! interval it rolls three independent dice - shift toward the side with
//! more slide room, try one rotation, try one soft drop. Every attempt is a
//! silent no-op when invalid. Difficulty levels are nothing but different
//! probability/interval tuples.

use arrayvec::ArrayVec;
use versus_tetris_core::{ActivePiece, Board, PlayerSession, SimpleRng};
use versus_tetris_types::Intent;

/// Probability/interval tuple defining a difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuProfile {
    /// Milliseconds between decision rounds (coarser than gravity)
    pub decision_interval_ms: u64,
    /// Chance (percent) to shift toward the roomier side
    pub shift_pct: u32,
    /// Chance (percent) to try one clockwise rotation
    pub rotate_pct: u32,
    /// Chance (percent) to try one soft drop
    pub drop_pct: u32,
}

pub const EASY: CpuProfile = CpuProfile {
    decision_interval_ms: 650,
    shift_pct: 35,
    rotate_pct: 25,
    drop_pct: 30,
};

pub const MEDIUM: CpuProfile = CpuProfile {
    decision_interval_ms: 400,
    shift_pct: 55,
    rotate_pct: 35,
    drop_pct: 50,
};

pub const HARD: CpuProfile = CpuProfile {
    decision_interval_ms: 250,
    shift_pct: 75,
    rotate_pct: 45,
    drop_pct: 70,
};

impl CpuProfile {
    /// Look up a preset by difficulty name (case-insensitive)
    pub fn for_difficulty(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(EASY),
            "medium" => Some(MEDIUM),
            "hard" => Some(HARD),
            _ => None,
        }
    }
}

/// Drives one CPU-controlled session
#[derive(Debug, Clone)]
pub struct CpuDriver {
    profile: CpuProfile,
    rng: SimpleRng,
    last_decision_ms: u64,
}

impl CpuDriver {
    pub fn new(profile: CpuProfile, seed: u32) -> Self {
        Self {
            profile,
            rng: SimpleRng::new(seed),
            last_decision_ms: 0,
        }
    }

    pub fn profile(&self) -> CpuProfile {
        self.profile
    }

    /// Roll this round's intents, or nothing if the decision interval has
    /// not elapsed
    pub fn decide(&mut self, session: &PlayerSession, now: u64) -> ArrayVec<Intent, 3> {
        let mut out = ArrayVec::new();
        if now.saturating_sub(self.last_decision_ms) < self.profile.decision_interval_ms {
            return out;
        }
        let Some(active) = session.active() else {
            return out;
        };
        self.last_decision_ms = now;

        let board = session.board();
        if self.rng.chance(self.profile.shift_pct) {
            out.push(self.pick_shift(board, &active));
        }
        if self.rng.chance(self.profile.rotate_pct) {
            out.push(Intent::RotateCw);
        }
        if self.rng.chance(self.profile.drop_pct) {
            out.push(Intent::SoftDrop);
        }
        out
    }

    /// One column toward the side with more free slide room; a coin flip
    /// breaks ties so the piece does not stall against symmetry
    fn pick_shift(&mut self, board: &Board, active: &ActivePiece) -> Intent {
        let left = slide_room(board, active, -1);
        let right = slide_room(board, active, 1);
        if left > right {
            Intent::MoveLeft
        } else if right > left {
            Intent::MoveRight
        } else if self.rng.chance(50) {
            Intent::MoveLeft
        } else {
            Intent::MoveRight
        }
    }
}

/// How many columns the piece can slide in `dx` steps before colliding
fn slide_room(board: &Board, piece: &ActivePiece, dx: i8) -> u32 {
    let mut steps = 0;
    let mut probe = *piece;
    loop {
        probe = probe.translated(dx, 0);
        if probe.is_valid(board) {
            steps += 1;
        } else {
            return steps;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_tetris_types::PlayerMode;

    const ALWAYS: CpuProfile = CpuProfile {
        decision_interval_ms: 100,
        shift_pct: 100,
        rotate_pct: 100,
        drop_pct: 100,
    };

    const NEVER: CpuProfile = CpuProfile {
        decision_interval_ms: 100,
        shift_pct: 0,
        rotate_pct: 0,
        drop_pct: 0,
    };

    fn started_session() -> PlayerSession {
        let mut session = PlayerSession::new(1, 2);
        session.set_mode(PlayerMode::Cpu);
        session.start(0, 0);
        session
    }

    #[test]
    fn test_no_decision_before_interval() {
        let session = started_session();
        let mut cpu = CpuDriver::new(ALWAYS, 7);
        assert!(cpu.decide(&session, 0).is_empty());
        assert!(cpu.decide(&session, 99).is_empty());
        assert_eq!(cpu.decide(&session, 100).len(), 3);
        // The interval rearms after a decision round
        assert!(cpu.decide(&session, 150).is_empty());
        assert_eq!(cpu.decide(&session, 200).len(), 3);
    }

    #[test]
    fn test_zero_probabilities_emit_nothing() {
        let session = started_session();
        let mut cpu = CpuDriver::new(NEVER, 7);
        assert!(cpu.decide(&session, 1000).is_empty());
    }

    #[test]
    fn test_shift_heads_toward_more_room() {
        let mut session = started_session();
        // Walk the piece against the left wall: all room is to the right
        for _ in 0..5 {
            session.apply_intent(Intent::MoveLeft, 0);
        }
        let mut cpu = CpuDriver::new(ALWAYS, 7);
        let intents = cpu.decide(&session, 100);
        assert_eq!(intents[0], Intent::MoveRight);
    }

    #[test]
    fn test_decisions_are_deterministic_per_seed() {
        let session = started_session();
        let mut a = CpuDriver::new(MEDIUM, 42);
        let mut b = CpuDriver::new(MEDIUM, 42);
        for step in 1..20u64 {
            let now = step * MEDIUM.decision_interval_ms;
            assert_eq!(a.decide(&session, now), b.decide(&session, now));
        }
    }

    #[test]
    fn test_no_decisions_for_finished_session() {
        let mut session = started_session();
        session.receive_garbage(20, 0);
        assert!(session.game_over());
        let mut cpu = CpuDriver::new(ALWAYS, 7);
        assert!(cpu.decide(&session, 1000).is_empty());
    }

    #[test]
    fn test_difficulty_presets_are_distinct_tuples() {
        assert!(EASY.decision_interval_ms > MEDIUM.decision_interval_ms);
        assert!(MEDIUM.decision_interval_ms > HARD.decision_interval_ms);
        assert!(EASY.drop_pct < HARD.drop_pct);
        assert_eq!(CpuProfile::for_difficulty("Easy"), Some(EASY));
        assert_eq!(CpuProfile::for_difficulty("nightmare"), None);
    }

    #[test]
    fn test_emitted_intents_apply_cleanly() {
        let mut session = started_session();
        let mut cpu = CpuDriver::new(ALWAYS, 13);
        for step in 1..50u64 {
            let intents = cpu.decide(&session, step * 100);
            for intent in intents {
                // Applying a CPU intent must never panic, valid or not
                session.apply_intent(intent, step * 100);
            }
            if session.game_over() {
                break;
            }
        }
    }
}
