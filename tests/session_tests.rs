//! Player session tests - gravity, drops, and lifecycle via the public API

use versus_tetris::core::PlayerSession;
use versus_tetris::types::{CellTag, Intent, PieceKind, PlayerMode, BOARD_WIDTH};

// Seed 2 draws an I piece first, then Z (LCG mod 7 over the catalog order)
const SEED_FIRST_I: u32 = 2;

fn started_human(seed: u32) -> PlayerSession {
    let mut session = PlayerSession::new(1, seed);
    session.set_mode(PlayerMode::Human);
    session.start(0, 0);
    session
}

#[test]
fn test_spec_scenario_hard_drop_i_piece() {
    // 10x20 empty board, I spawned at (3, 0), hard drop with no
    // obstruction: the piece lands with its occupied row at y=19 and the
    // bottom row holds exactly 4 filled cells matching the I footprint
    let mut session = started_human(SEED_FIRST_I);
    let active = session.active().expect("spawned piece");
    assert_eq!(active.shape.kind, PieceKind::I);
    assert_eq!((active.x, active.y), (3, 0));

    let events = session.apply_intent(Intent::HardDrop, 0);
    assert!(events.locked);
    assert_eq!(events.lines_cleared, 0);

    let mut filled = 0;
    for x in 0..BOARD_WIDTH as i8 {
        if session.board().get(x, 19) == Some(Some(CellTag::I)) {
            filled += 1;
            assert!((3..=6).contains(&x));
        }
    }
    assert_eq!(filled, 4);
}

#[test]
fn test_gravity_is_timestamp_driven() {
    let mut session = started_human(SEED_FIRST_I);
    session.advance(400);
    assert_eq!(session.active().expect("piece").y, 0);
    session.advance(800);
    assert_eq!(session.active().expect("piece").y, 1);
    session.advance(1599);
    assert_eq!(session.active().expect("piece").y, 1);
    session.advance(1600);
    assert_eq!(session.active().expect("piece").y, 2);
}

#[test]
fn test_moves_are_silent_noops_at_the_wall() {
    let mut session = started_human(SEED_FIRST_I);
    // Walk well past the wall; the extra intents simply do nothing
    for _ in 0..20 {
        session.apply_intent(Intent::MoveLeft, 0);
    }
    assert_eq!(session.active().expect("piece").x, 0);
    assert!(!session.game_over());
}

#[test]
fn test_soft_drop_scores_per_cell() {
    let mut session = started_human(SEED_FIRST_I);
    session.apply_intent(Intent::SoftDrop, 0);
    session.apply_intent(Intent::SoftDrop, 0);
    assert_eq!(session.score(), 2);
}

#[test]
fn test_next_preview_promotes_on_lock() {
    let mut session = started_human(SEED_FIRST_I);
    let upcoming = session.next_shape().kind;
    session.apply_intent(Intent::HardDrop, 0);
    assert_eq!(session.active().expect("piece").shape.kind, upcoming);
}

#[test]
fn test_hold_latches_until_next_lock() {
    let mut session = started_human(SEED_FIRST_I);
    session.apply_intent(Intent::Hold, 0);
    assert_eq!(session.held(), Some(PieceKind::I));
    let swapped_in = session.active().expect("piece").shape.kind;
    session.apply_intent(Intent::Hold, 0);
    // Second hold is refused until a piece locks
    assert_eq!(session.active().expect("piece").shape.kind, swapped_in);
}

#[test]
fn test_garbage_can_top_out_a_session() {
    let mut session = started_human(SEED_FIRST_I);
    session.receive_garbage(20, 0);
    assert!(session.game_over());
    // Inert from here on: further garbage and intents are ignored
    session.receive_garbage(2, 0);
    assert_eq!(session.stats().garbage_received, 20);
    let events = session.apply_intent(Intent::HardDrop, 0);
    assert!(!events.locked);
}

#[test]
fn test_ghost_tracks_the_stack() {
    let mut session = started_human(SEED_FIRST_I);
    assert_eq!(session.ghost_y(), Some(18));
    session.receive_garbage(2, 0);
    if !session.game_over() {
        assert_eq!(session.ghost_y(), Some(16));
    }
}

#[test]
fn test_snapshot_surfaces_renderer_state() {
    let mut session = started_human(SEED_FIRST_I);
    session.receive_garbage(1, 0);
    let snap = session.snapshot(250);
    assert_eq!(snap.slot, 1);
    assert_eq!(snap.mode, PlayerMode::Human);
    let active = snap.active.expect("active snapshot");
    assert_eq!(active.kind, PieceKind::I);
    assert_eq!(snap.pending_garbage.len(), 1);
    let fx = &snap.pending_garbage[0];
    assert_eq!(fx.hole_cols.len(), 1);
    assert!(fx.progress > 0.0 && fx.progress < 1.0);
}
