//! Player session - one board, its active piece, and its lifecycle
//!
//! A session owns a Board, the falling piece, the next-shape preview, score
//! and level state, and the timers that drive it. All timing is a monotonic
//! timestamp comparison against the `now` the coordinator passes in; nothing
//! here blocks or polls a clock.
//!
//! `game_over` is monotonic: once a spawn collides or garbage buries the
//! active piece, the session goes inert until a full reset.

use arrayvec::ArrayVec;
use versus_tetris_types::{
    BlockEffect, Intent, PieceKind, PlayerMode, BOARD_HEIGHT, GARBAGE_ARRIVAL_MS,
};

use crate::board::Board;
use crate::effects::resolve_effect;
use crate::piece::{self, ActivePiece};
use crate::rng::SimpleRng;
use crate::scoring::{drop_interval_ms, drop_score, level_for_lines, score_for_lines};
use crate::shapes::Shape;
use crate::snapshot::{ActiveSnapshot, GarbageFxSnapshot, SessionSnapshot};

/// Cosmetic record of an in-flight garbage attack, kept only so renderers
/// can interpolate the arrival. The rows themselves are already on the
/// board.
#[derive(Debug, Clone)]
pub struct GarbageAnimation {
    /// Hole column of each inserted row, top to bottom
    pub hole_cols: ArrayVec<u8, { BOARD_HEIGHT as usize }>,
    /// When the attack landed
    pub queued_ms: u64,
}

impl GarbageAnimation {
    /// Arrival progress in [0, 1]
    pub fn progress(&self, now: u64) -> f32 {
        let elapsed = now.saturating_sub(self.queued_ms).min(GARBAGE_ARRIVAL_MS);
        elapsed as f32 / GARBAGE_ARRIVAL_MS as f32
    }

    pub fn expired(&self, now: u64) -> bool {
        now.saturating_sub(self.queued_ms) >= GARBAGE_ARRIVAL_MS
    }
}

/// Per-session play counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub pieces_placed: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub tetrises: u32,
    pub garbage_sent: u32,
    pub garbage_received: u32,
}

/// What a session reports upward after applying an intent or a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceEvents {
    /// A piece locked into the board
    pub locked: bool,
    /// Rows cleared by that lock (drives attack distribution)
    pub lines_cleared: u32,
    /// The follow-up spawn collided; the session is now inert
    pub topped_out: bool,
}

/// One player's complete game state
#[derive(Debug, Clone)]
pub struct PlayerSession {
    slot: u8,
    mode: PlayerMode,
    board: Board,
    active: Option<ActivePiece>,
    next: Shape,
    held: Option<PieceKind>,
    can_hold: bool,
    rng: SimpleRng,
    seed: u32,
    effect_pct: u32,
    score: u32,
    lines: u32,
    level: u32,
    game_over: bool,
    last_drop_ms: u64,
    slow_until_ms: u64,
    shield_until_ms: u64,
    garbage_fx: Vec<GarbageAnimation>,
    stats: SessionStats,
}

impl PlayerSession {
    /// Create an idle session for a slot; `start` arms it for play
    pub fn new(slot: u8, seed: u32) -> Self {
        Self {
            slot,
            mode: PlayerMode::Off,
            board: Board::new(),
            active: None,
            next: Shape::base(PieceKind::I),
            held: None,
            can_hold: true,
            rng: SimpleRng::new(seed),
            seed,
            effect_pct: 0,
            score: 0,
            lines: 0,
            level: 1,
            game_over: false,
            last_drop_ms: 0,
            slow_until_ms: 0,
            shield_until_ms: 0,
            garbage_fx: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    /// Change the control mode. Switching a session Off discards its
    /// in-flight garbage animations; it is excluded from ticking and
    /// targeting from this call on.
    pub fn set_mode(&mut self, mode: PlayerMode) {
        self.mode = mode;
        if mode == PlayerMode::Off {
            self.garbage_fx.clear();
        }
    }

    /// Fresh board, fresh shapes, score 0; spawns the first piece
    pub fn start(&mut self, now: u64, effect_pct: u32) {
        self.reset();
        self.effect_pct = effect_pct;
        self.last_drop_ms = now;
        self.next = self.draw_shape();
        self.spawn_next();
    }

    /// Return to the idle state without touching the control mode
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = Shape::base(PieceKind::I);
        self.held = None;
        self.can_hold = true;
        self.rng = SimpleRng::new(self.seed);
        self.effect_pct = 0;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.game_over = false;
        self.last_drop_ms = 0;
        self.slow_until_ms = 0;
        self.shield_until_ms = 0;
        self.garbage_fx.clear();
        self.stats = SessionStats::default();
    }

    /// Whether this session still participates in the match
    pub fn is_active(&self) -> bool {
        self.mode != PlayerMode::Off && !self.game_over
    }

    /// Whether an attack shield currently protects this session
    pub fn shielded(&self, now: u64) -> bool {
        now < self.shield_until_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_shape(&self) -> Shape {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn pending_garbage(&self) -> &[GarbageAnimation] {
        &self.garbage_fx
    }

    /// Gravity interval right now: the level curve, doubled while a
    /// slow-motion effect is in force
    pub fn effective_drop_interval(&self, now: u64) -> u64 {
        let base = drop_interval_ms(self.level);
        if now < self.slow_until_ms {
            base * versus_tetris_types::SLOW_MOTION_FACTOR
        } else {
            base
        }
    }

    /// Resting y of the active piece under an immediate hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(piece::ghost_y(&active, &self.board))
    }

    /// Advance the session to `now`: drop one row when the gravity timer
    /// fires, locking and respawning when the piece cannot fall
    pub fn advance(&mut self, now: u64) -> AdvanceEvents {
        if !self.is_active() {
            return AdvanceEvents::default();
        }
        self.garbage_fx.retain(|fx| !fx.expired(now));
        if self.active.is_none() {
            return AdvanceEvents::default();
        }

        if now.saturating_sub(self.last_drop_ms) >= self.effective_drop_interval(now) {
            if self.try_move(0, 1) {
                self.last_drop_ms = now;
            } else {
                return self.lock_and_respawn(now);
            }
        }
        AdvanceEvents::default()
    }

    /// Apply a player or CPU intent. Invalid intents are silent no-ops.
    pub fn apply_intent(&mut self, intent: Intent, now: u64) -> AdvanceEvents {
        if !self.is_active() || self.active.is_none() {
            return AdvanceEvents::default();
        }
        match intent {
            Intent::MoveLeft => {
                self.try_move(-1, 0);
                AdvanceEvents::default()
            }
            Intent::MoveRight => {
                self.try_move(1, 0);
                AdvanceEvents::default()
            }
            Intent::SoftDrop => {
                if self.try_move(0, 1) {
                    self.score += drop_score(1, false);
                }
                AdvanceEvents::default()
            }
            Intent::HardDrop => self.hard_drop(now),
            Intent::RotateCw => {
                self.try_rotate();
                AdvanceEvents::default()
            }
            Intent::Hold => {
                self.hold();
                AdvanceEvents::default()
            }
        }
    }

    /// Take a garbage attack: rows land immediately, and if they bury the
    /// active piece the session tops out
    pub fn receive_garbage(&mut self, rows: u32, now: u64) {
        if !self.is_active() || rows == 0 {
            return;
        }
        let holes = self.board.insert_garbage_rows(rows as usize, &mut self.rng);
        self.stats.garbage_received += rows;
        self.garbage_fx.push(GarbageAnimation {
            hole_cols: holes,
            queued_ms: now,
        });
        if let Some(active) = self.active {
            if !active.is_valid(&self.board) {
                self.game_over = true;
                self.active = None;
            }
        }
    }

    /// Credit rows sent to opponents (stats only)
    pub fn note_garbage_sent(&mut self, rows: u32) {
        self.stats.garbage_sent += rows;
    }

    /// Shield this session from attack targeting until the given timestamp
    pub fn grant_shield(&mut self, until_ms: u64) {
        self.shield_until_ms = self.shield_until_ms.max(until_ms);
    }

    /// Double the gravity interval until the given timestamp
    pub fn grant_slow_motion(&mut self, until_ms: u64) {
        self.slow_until_ms = self.slow_until_ms.max(until_ms);
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.translated(dx, dy);
        if moved.is_valid(&self.board) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if let Some(rotated) = piece::try_rotate_cw(&active, &self.board) {
            self.active = Some(rotated);
            return true;
        }
        false
    }

    fn hard_drop(&mut self, now: u64) -> AdvanceEvents {
        let Some(active) = self.active else {
            return AdvanceEvents::default();
        };
        let distance = piece::drop_distance(&active, &self.board);
        if distance > 0 {
            self.active = Some(ActivePiece {
                y: active.y + distance as i8,
                ..active
            });
        }
        self.score += drop_score(distance, true);
        self.lock_and_respawn(now)
    }

    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let current = active.shape.kind;
        match self.held.take() {
            Some(banked) => {
                let piece = ActivePiece::spawn(Shape::base(banked));
                self.held = Some(current);
                if piece.is_valid(&self.board) {
                    self.active = Some(piece);
                } else {
                    self.game_over = true;
                    self.active = None;
                    return false;
                }
            }
            None => {
                self.held = Some(current);
                self.spawn_next();
            }
        }
        self.can_hold = false;
        true
    }

    /// Lock & respawn protocol: write the piece, resolve its effect, clear
    /// and score rows, then promote the next shape. A blocked spawn tops
    /// the session out.
    fn lock_and_respawn(&mut self, now: u64) -> AdvanceEvents {
        let Some(active) = self.active else {
            return AdvanceEvents::default();
        };

        self.board
            .lock_shape(&active.shape, active.x, active.y, active.shape.kind.into());
        self.stats.pieces_placed += 1;

        if active.shape.effect != BlockEffect::None {
            let outcome = resolve_effect(active.shape.effect, &mut self.board, &active, now);
            self.score += outcome.bonus_score;
            if let Some(until) = outcome.shield_until {
                self.grant_shield(until);
            }
            if let Some(until) = outcome.slow_until {
                self.grant_slow_motion(until);
            }
        }

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            // Score uses the level in force before this clear
            self.score += score_for_lines(cleared, self.level);
            self.lines += cleared as u32;
            self.level = level_for_lines(self.lines);
            match cleared.min(4) {
                1 => self.stats.singles += 1,
                2 => self.stats.doubles += 1,
                3 => self.stats.triples += 1,
                _ => self.stats.tetrises += 1,
            }
        }

        self.spawn_next();

        AdvanceEvents {
            locked: true,
            lines_cleared: cleared as u32,
            topped_out: self.game_over,
        }
    }

    fn spawn_next(&mut self) {
        let shape = std::mem::replace(&mut self.next, Shape::base(PieceKind::I));
        self.next = self.draw_shape();
        let piece = ActivePiece::spawn(shape);
        if piece.is_valid(&self.board) {
            self.active = Some(piece);
            self.can_hold = true;
        } else {
            self.game_over = true;
            self.active = None;
        }
    }

    fn draw_shape(&mut self) -> Shape {
        if self.effect_pct > 0 {
            Shape::random_with_effects(&mut self.rng, self.effect_pct)
        } else {
            Shape::random(&mut self.rng)
        }
    }

    /// Fill a snapshot for the driver/renderer surface
    pub fn snapshot_into(&self, now: u64, out: &mut SessionSnapshot) {
        out.slot = self.slot;
        out.mode = self.mode;
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next.kind;
        out.next_effect = self.next.effect;
        out.held = self.held;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.game_over = self.game_over;
        out.shielded = self.shielded(now);
        out.pending_garbage = self
            .garbage_fx
            .iter()
            .map(|fx| GarbageFxSnapshot {
                hole_cols: fx.hole_cols.clone(),
                progress: fx.progress(now),
            })
            .collect();
    }

    pub fn snapshot(&self, now: u64) -> SessionSnapshot {
        let mut out = SessionSnapshot::default();
        self.snapshot_into(now, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_tetris_types::CellTag;

    // Seed 2 draws I first, then Z; seed 6 draws O first (LCG mod 7 over
    // the catalog order I,O,T,S,Z,J,L).
    const SEED_FIRST_I: u32 = 2;
    const SEED_FIRST_O: u32 = 6;

    fn started(seed: u32) -> PlayerSession {
        let mut session = PlayerSession::new(1, seed);
        session.set_mode(PlayerMode::Human);
        session.start(0, 0);
        session
    }

    #[test]
    fn test_start_spawns_at_top_center() {
        let session = started(SEED_FIRST_I);
        let active = session.active().expect("piece spawned");
        assert_eq!(active.shape.kind, PieceKind::I);
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert!(!session.game_over());
    }

    #[test]
    fn test_gravity_waits_for_interval() {
        let mut session = started(SEED_FIRST_I);
        session.advance(799);
        assert_eq!(session.active().expect("active").y, 0);
        session.advance(800);
        assert_eq!(session.active().expect("active").y, 1);
        // Timer rearmed: no second drop until another interval passes
        session.advance(801);
        assert_eq!(session.active().expect("active").y, 1);
        session.advance(1600);
        assert_eq!(session.active().expect("active").y, 2);
    }

    #[test]
    fn test_gravity_locks_grounded_piece() {
        let mut session = started(SEED_FIRST_I);
        // Walk the piece to the floor manually
        while session.active().map(|p| p.y) != session.ghost_y() {
            session.apply_intent(Intent::SoftDrop, 0);
        }
        let events = session.advance(800);
        assert!(events.locked);
        assert!(session.active().is_some());
    }

    #[test]
    fn test_soft_drop_scores_one_per_cell() {
        let mut session = started(SEED_FIRST_I);
        session.apply_intent(Intent::SoftDrop, 0);
        assert_eq!(session.score(), 1);
        assert_eq!(session.active().expect("active").y, 1);
    }

    #[test]
    fn test_hard_drop_lands_i_on_bottom_row() {
        let mut session = started(SEED_FIRST_I);
        let events = session.apply_intent(Intent::HardDrop, 0);
        assert!(events.locked);
        assert_eq!(events.lines_cleared, 0);
        // The I footprint fills exactly columns 3-6 of the bottom row
        for x in 0..10 {
            let expect = (3..=6).contains(&x).then_some(CellTag::I);
            assert_eq!(session.board().get(x, 19), Some(expect));
        }
        // 18 cells of hard drop at 2 points each
        assert_eq!(session.score(), 36);
        // A fresh piece respawned
        assert!(session.active().is_some());
    }

    #[test]
    fn test_double_clear_scores_300_at_level_one() {
        let mut session = started(SEED_FIRST_O);
        assert_eq!(session.active().expect("active").shape.kind, PieceKind::O);
        // Fill the bottom two rows except the O's landing columns
        for y in [18, 19] {
            for x in 0..10 {
                if x != 4 && x != 5 {
                    session.board.set(x, y, Some(CellTag::Garbage));
                }
            }
        }
        let events = session.apply_intent(Intent::HardDrop, 0);
        assert_eq!(events.lines_cleared, 2);
        assert_eq!(session.lines(), 2);
        // 18 cells dropped (2 each) + 300 for the double at level 1
        assert_eq!(session.score(), 18 * 2 + 300);
        assert!(!session.board().is_row_full(19));
    }

    #[test]
    fn test_blocked_spawn_tops_out() {
        let mut session = started(SEED_FIRST_I);
        let own: Vec<(i8, i8)> = session
            .active()
            .expect("active")
            .shape
            .blocks()
            .iter()
            .map(|&(dx, dy)| (3 + dx, dy))
            .collect();
        // Brick up the top rows except the falling I and column 0, so
        // nothing clears and the next spawn must collide
        for y in 0..2 {
            for x in 1..10 {
                if !own.contains(&(x, y)) {
                    session.board.set(x, y, Some(CellTag::Garbage));
                }
            }
        }
        let events = session.apply_intent(Intent::HardDrop, 0);
        assert!(events.topped_out);
        assert!(session.game_over());
        assert!(session.active().is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn test_game_over_is_inert() {
        let mut session = started(SEED_FIRST_I);
        session.game_over = true;
        session.active = None;
        assert_eq!(session.advance(10_000), AdvanceEvents::default());
        assert_eq!(
            session.apply_intent(Intent::HardDrop, 10_000),
            AdvanceEvents::default()
        );
        session.receive_garbage(3, 10_000);
        assert_eq!(session.stats().garbage_received, 0);
    }

    #[test]
    fn test_hold_banks_and_swaps() {
        let mut session = started(SEED_FIRST_I);
        session.apply_intent(Intent::Hold, 0);
        assert_eq!(session.held(), Some(PieceKind::I));
        assert_eq!(session.active().expect("active").shape.kind, PieceKind::Z);
        // Second hold before a lock is refused
        session.apply_intent(Intent::Hold, 0);
        assert_eq!(session.held(), Some(PieceKind::I));
        assert_eq!(session.active().expect("active").shape.kind, PieceKind::Z);
        // After a lock the latch releases and the swap comes back
        session.apply_intent(Intent::HardDrop, 0);
        session.apply_intent(Intent::Hold, 0);
        assert_eq!(session.active().expect("active").shape.kind, PieceKind::I);
    }

    #[test]
    fn test_garbage_buries_active_piece() {
        let mut session = started(SEED_FIRST_I);
        session.receive_garbage(20, 0);
        // A full board of garbage leaves at most one open cell per row;
        // the 4-cell I cannot survive
        assert!(session.game_over());
        assert_eq!(session.stats().garbage_received, 20);
    }

    #[test]
    fn test_garbage_animation_prunes_after_arrival() {
        let mut session = started(SEED_FIRST_I);
        session.receive_garbage(1, 0);
        assert_eq!(session.pending_garbage().len(), 1);
        assert!(session.pending_garbage()[0].progress(250) > 0.4);
        session.advance(GARBAGE_ARRIVAL_MS);
        assert!(session.pending_garbage().is_empty());
    }

    #[test]
    fn test_switching_off_discards_animations() {
        let mut session = started(SEED_FIRST_I);
        session.receive_garbage(1, 0);
        session.set_mode(PlayerMode::Off);
        assert!(session.pending_garbage().is_empty());
        assert!(!session.is_active());
    }

    #[test]
    fn test_slow_motion_doubles_gravity() {
        let mut session = started(SEED_FIRST_I);
        session.grant_slow_motion(10_000);
        assert_eq!(session.effective_drop_interval(0), 1600);
        session.advance(800);
        assert_eq!(session.active().expect("active").y, 0);
        session.advance(1600);
        assert_eq!(session.active().expect("active").y, 1);
        // Scheduled reversion: past the expiry the base interval returns
        assert_eq!(session.effective_drop_interval(10_000), 800);
    }

    #[test]
    fn test_shield_expiry_boundary() {
        let mut session = started(SEED_FIRST_I);
        session.grant_shield(5000);
        assert!(session.shielded(4999));
        assert!(!session.shielded(5000));
    }

    #[test]
    fn test_reset_restores_idle_state() {
        let mut session = started(SEED_FIRST_I);
        session.apply_intent(Intent::HardDrop, 0);
        session.receive_garbage(2, 0);
        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert!(!session.game_over());
        assert!(session.active().is_none());
        assert!(session.pending_garbage().is_empty());
        assert!(session.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_restart_replays_identical_draws() {
        let mut a = started(SEED_FIRST_I);
        let first = a.active().expect("active").shape.kind;
        a.apply_intent(Intent::HardDrop, 0);
        a.start(0, 0);
        assert_eq!(a.active().expect("active").shape.kind, first);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = started(SEED_FIRST_I);
        session.receive_garbage(1, 0);
        let snap = session.snapshot(100);
        assert_eq!(snap.slot, 1);
        assert_eq!(snap.mode, PlayerMode::Human);
        assert_eq!(snap.score, 0);
        assert!(!snap.shielded);
        assert_eq!(snap.pending_garbage.len(), 1);
        let active = snap.active.expect("active snapshot");
        assert_eq!(active.kind, PieceKind::I);
        // Ghost accounts for the fresh garbage row
        assert_eq!(snap.ghost_y, Some(17));
    }
}
