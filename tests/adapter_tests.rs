//! Adapter tests - observation framing and intent decoding end to end

use versus_tetris::adapter::{encode_line, observation_from_snapshot, parse_intent_line};
use versus_tetris::arena::{Match, MatchConfig};
use versus_tetris::types::{Intent, PlayerMode, SLOT_COUNT};

fn running_match() -> Match {
    let mut m = Match::new(MatchConfig::default());
    assert!(m.set_mode(1, PlayerMode::Human));
    assert!(m.set_mode(2, PlayerMode::Cpu));
    assert!(m.start(0));
    m
}

#[test]
fn test_observation_line_is_renderer_ready() {
    let m = running_match();
    let obs = observation_from_snapshot(&m.snapshot(16), 1, 16);
    let line = encode_line(&obs).expect("encodes");
    assert!(line.ends_with('\n'));
    assert_eq!(line.matches('\n').count(), 1, "one message per line");

    let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
    assert_eq!(value["type"], "observation");
    assert_eq!(value["seq"], 1);
    assert_eq!(value["phase"], "running");
    assert!(value["winner"].is_null());

    let sessions = value["sessions"].as_array().expect("sessions");
    assert_eq!(sessions.len(), SLOT_COUNT);
    for session in sessions {
        let board = session["board"].as_array().expect("board rows");
        assert_eq!(board.len(), 20);
        assert_eq!(board[0].as_array().expect("row").len(), 10);
    }
    // The armed slots carry an active piece; the off slot does not
    assert!(sessions[0]["active"].is_object());
    assert!(sessions[2]["active"].is_null());
}

#[test]
fn test_intent_command_drives_the_match() {
    let mut m = running_match();
    let before = m.session(1).expect("slot").active().expect("piece").x;

    let (slot, intent) =
        parse_intent_line("{\"type\":\"intent\",\"slot\":1,\"action\":\"moveRight\"}")
            .expect("parses");
    m.intent(slot, intent, 0);
    assert_eq!(
        m.session(1).expect("slot").active().expect("piece").x,
        before + 1
    );

    // A command for the CPU slot parses fine but the match ignores it
    let (slot, intent) =
        parse_intent_line("{\"slot\":2,\"action\":\"hardDrop\"}").expect("parses");
    let cpu_piece = m.session(2).expect("slot").active().expect("piece");
    m.intent(slot, intent, 0);
    assert_eq!(
        m.session(2).expect("slot").active().expect("piece"),
        cpu_piece
    );
}

#[test]
fn test_malformed_lines_are_boundary_errors() {
    assert!(parse_intent_line("").is_err());
    assert!(parse_intent_line("{\"slot\":1}").is_err());
    assert!(parse_intent_line("{\"slot\":1,\"action\":\"fly\"}").is_err());
    // Intent names accept any casing, like the engine parser
    assert!(parse_intent_line("{\"slot\":1,\"action\":\"ROTATECW\"}").is_ok());
}

#[test]
fn test_all_intent_names_roundtrip() {
    for intent in [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::HardDrop,
        Intent::RotateCw,
        Intent::Hold,
    ] {
        let line = format!("{{\"slot\":1,\"action\":\"{}\"}}", intent.as_str());
        let (_, parsed) = parse_intent_line(&line).expect("parses");
        assert_eq!(parsed, intent);
    }
}
