//! Protocol module - JSON message types for external drivers
//!
//! Implements a line-delimited JSON surface: the driver streams one
//! observation per tick to its renderer or bot, and decodes intent
//! commands coming back. All gameplay stays inside the engine; this module
//! only translates snapshots and intents at the process boundary.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use versus_tetris_arena::MatchSnapshot;
use versus_tetris_core::{ActiveSnapshot, SessionSnapshot};
use versus_tetris_types::{Intent, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

impl Default for ObservationType {
    fn default() -> Self {
        Self::Observation
    }
}

/// Full match state streamed to the driver once per tick
#[derive(Debug, Clone, Serialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub phase: &'static str,
    /// Winning slot (1-based) once the match is finished
    pub winner: Option<u8>,
    /// Participating slots ordered by score, best first
    pub rankings: Vec<u8>,
    pub sessions: Vec<SessionObservation>,
}

/// One board as a renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct SessionObservation {
    pub slot: u8,
    pub mode: &'static str,
    /// 0 = empty, 1-7 = piece tags, 8 = garbage
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveObservation>,
    pub ghost_y: Option<i8>,
    pub next: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_effect: Option<&'static str>,
    pub held: Option<&'static str>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub shielded: bool,
    pub pending_garbage: Vec<GarbageObservation>,
}

/// The active piece: kind, rotation-state matrix, and anchor
#[derive(Debug, Clone, Serialize)]
pub struct ActiveObservation {
    pub kind: &'static str,
    pub size: u8,
    pub cells: [[u8; 4]; 4],
    pub x: i8,
    pub y: i8,
}

/// A pending garbage arrival, for visual interpolation only
#[derive(Debug, Clone, Serialize)]
pub struct GarbageObservation {
    /// Hole column of each landed row, top to bottom
    pub hole_cols: Vec<u8>,
    /// Arrival progress in [0, 1]
    pub progress: f32,
}

impl From<&ActiveSnapshot> for ActiveObservation {
    fn from(snap: &ActiveSnapshot) -> Self {
        Self {
            kind: snap.kind.as_str(),
            size: snap.size,
            cells: snap.cells,
            x: snap.x,
            y: snap.y,
        }
    }
}

impl From<&SessionSnapshot> for SessionObservation {
    fn from(snap: &SessionSnapshot) -> Self {
        Self {
            slot: snap.slot,
            mode: snap.mode.as_str(),
            board: snap.board,
            active: snap.active.as_ref().map(ActiveObservation::from),
            ghost_y: snap.ghost_y,
            next: snap.next.as_str(),
            next_effect: snap.next_effect.as_str(),
            held: snap.held.map(|kind| kind.as_str()),
            score: snap.score,
            lines: snap.lines,
            level: snap.level,
            game_over: snap.game_over,
            shielded: snap.shielded,
            pending_garbage: snap
                .pending_garbage
                .iter()
                .map(|fx| GarbageObservation {
                    hole_cols: fx.hole_cols.to_vec(),
                    progress: fx.progress,
                })
                .collect(),
        }
    }
}

/// Build the streamed observation from a match snapshot
pub fn observation_from_snapshot(
    snap: &MatchSnapshot,
    seq: u64,
    ts: u64,
) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts,
        phase: snap.phase.as_str(),
        winner: snap.winner,
        rankings: snap.rankings.to_vec(),
        sessions: snap.sessions.iter().map(SessionObservation::from).collect(),
    }
}

/// Encode a message as one protocol line (newline-terminated JSON)
pub fn encode_line<T: Serialize>(message: &T) -> Result<String> {
    let mut line = serde_json::to_string(message).context("encode protocol message")?;
    line.push('\n');
    Ok(line)
}

/// Inbound intent command: `{"type":"intent","slot":1,"action":"hardDrop"}`
#[derive(Debug, Clone, Deserialize)]
pub struct IntentCommand {
    #[serde(rename = "type", default)]
    pub msg_type: Option<String>,
    pub slot: u8,
    pub action: String,
}

/// Decode one intent line into a (slot, intent) pair
///
/// Action names are case-insensitive, matching the engine's intent parser.
pub fn parse_intent_line(line: &str) -> Result<(usize, Intent)> {
    let command: IntentCommand =
        serde_json::from_str(line.trim()).context("decode intent command")?;
    if let Some(msg_type) = &command.msg_type {
        if !msg_type.eq_ignore_ascii_case("intent") {
            return Err(anyhow!("unexpected message type: {}", msg_type));
        }
    }
    let intent = Intent::from_str(&command.action)
        .ok_or_else(|| anyhow!("unknown action: {}", command.action))?;
    Ok((command.slot as usize, intent))
}
