//! Match coordinator - the synchronized multi-board tick
//!
//! Owns the three player sessions, routes intents, runs CPU drivers, and
//! resolves cross-board combat: line clears become garbage attacks split
//! evenly across every eligible opponent, remainder rows going to the
//! lowest slots first. The coordinator never errors during play; an attack
//! with no eligible target is a defined no-op.

use arrayvec::ArrayVec;
use versus_tetris_core::{PlayerSession, SessionSnapshot};
use versus_tetris_types::{Intent, MatchPhase, PlayerMode, SLOT_COUNT};

use crate::cpu::{CpuDriver, CpuProfile, MEDIUM};

/// Match-wide configuration, fixed at start
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    /// Base seed; per-slot session and CPU seeds are derived from it
    pub seed: u32,
    /// Percent chance that a drawn shape carries a powerup effect
    /// (0 keeps the base engine untouched)
    pub effect_pct: u32,
    /// Difficulty tuple used by every CPU slot
    pub cpu_profile: CpuProfile,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            effect_pct: 0,
            cpu_profile: MEDIUM,
        }
    }
}

/// Read-only match view handed to the driver each tick
#[derive(Debug, Clone)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    /// Winning slot (1-based) once the phase is Finished
    pub winner: Option<u8>,
    /// Participating slots ordered by score, best first
    pub rankings: ArrayVec<u8, SLOT_COUNT>,
    pub sessions: [SessionSnapshot; SLOT_COUNT],
}

/// A full three-board match
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    sessions: [PlayerSession; SLOT_COUNT],
    cpus: [Option<CpuDriver>; SLOT_COUNT],
    phase: MatchPhase,
    winner: Option<u8>,
    starters: u8,
}

impl Match {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            sessions: std::array::from_fn(|i| {
                PlayerSession::new(i as u8 + 1, session_seed(config.seed, i))
            }),
            cpus: [None, None, None],
            phase: MatchPhase::Idle,
            winner: None,
            starters: 0,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Winning slot (1-based), set when the phase transitions to Finished.
    /// None after a simultaneous knockout or a winnerless solo match.
    pub fn winner(&self) -> Option<u8> {
        self.winner
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Borrow a session by 1-based slot
    pub fn session(&self, slot: usize) -> Option<&PlayerSession> {
        Self::index(slot).map(|i| &self.sessions[i])
    }

    fn index(slot: usize) -> Option<usize> {
        (1..=SLOT_COUNT).contains(&slot).then(|| slot - 1)
    }

    /// Assign a slot's control mode
    ///
    /// Slots are fixed pre-game: switching to Human/Cpu is only accepted
    /// while Idle. Switching Off is accepted at any time and immediately
    /// excludes the session from ticking and attack targeting.
    pub fn set_mode(&mut self, slot: usize, mode: PlayerMode) -> bool {
        let Some(i) = Self::index(slot) else {
            return false;
        };
        match mode {
            PlayerMode::Off => {
                self.sessions[i].set_mode(PlayerMode::Off);
                self.cpus[i] = None;
                true
            }
            PlayerMode::Human | PlayerMode::Cpu => {
                if self.phase != MatchPhase::Idle {
                    return false;
                }
                self.sessions[i].set_mode(mode);
                true
            }
        }
    }

    /// Start play: every armed slot gets a fresh board and first piece.
    /// Refused while already Running or when no slot is armed.
    pub fn start(&mut self, now: u64) -> bool {
        if self.phase == MatchPhase::Running {
            return false;
        }
        let starters = self
            .sessions
            .iter()
            .filter(|s| s.mode() != PlayerMode::Off)
            .count();
        if starters == 0 {
            return false;
        }
        self.starters = starters as u8;
        self.winner = None;

        for i in 0..SLOT_COUNT {
            self.cpus[i] = None;
            match self.sessions[i].mode() {
                PlayerMode::Off => self.sessions[i].reset(),
                mode => {
                    self.sessions[i].start(now, self.config.effect_pct);
                    if mode == PlayerMode::Cpu {
                        self.cpus[i] =
                            Some(CpuDriver::new(self.config.cpu_profile, cpu_seed(self.config.seed, i)));
                    }
                }
            }
        }
        self.phase = MatchPhase::Running;
        true
    }

    /// Full reset: every session back to idle, phase back to Idle.
    /// Control modes stay armed for the next `start`.
    pub fn reset(&mut self) {
        for session in &mut self.sessions {
            session.reset();
        }
        self.cpus = [None, None, None];
        self.phase = MatchPhase::Idle;
        self.winner = None;
        self.starters = 0;
    }

    /// Route a human intent to its slot
    ///
    /// Intents for Off/Cpu slots, unknown slots, or a match that is not
    /// running are ignored - silent no-ops, never errors.
    pub fn intent(&mut self, slot: usize, intent: Intent, now: u64) {
        if self.phase != MatchPhase::Running {
            return;
        }
        let Some(i) = Self::index(slot) else {
            return;
        };
        if self.sessions[i].mode() != PlayerMode::Human {
            return;
        }
        let events = self.sessions[i].apply_intent(intent, now);
        if events.lines_cleared > 0 {
            self.distribute_attack(i, events.lines_cleared, now);
        }
        self.update_outcome();
    }

    /// One synchronized frame: CPU decisions, then gravity, for every
    /// active session; attacks resolve as clears happen; the win condition
    /// is checked last
    pub fn tick(&mut self, now: u64) {
        if self.phase != MatchPhase::Running {
            return;
        }
        for i in 0..SLOT_COUNT {
            if !self.sessions[i].is_active() {
                continue;
            }
            let batch = match self.cpus[i].as_mut() {
                Some(cpu) => cpu.decide(&self.sessions[i], now),
                None => ArrayVec::new(),
            };
            for intent in batch {
                let events = self.sessions[i].apply_intent(intent, now);
                if events.lines_cleared > 0 {
                    self.distribute_attack(i, events.lines_cleared, now);
                }
            }
            let events = self.sessions[i].advance(now);
            if events.lines_cleared > 0 {
                self.distribute_attack(i, events.lines_cleared, now);
            }
        }
        self.update_outcome();
    }

    /// Split `cleared` garbage rows across every eligible opponent
    ///
    /// Targets are taken in ascending slot order; each receives
    /// `cleared / n` rows and the first `cleared % n` of them one extra, so
    /// the distributed total always equals the cleared count.
    fn distribute_attack(&mut self, attacker: usize, cleared: u32, now: u64) {
        let targets: ArrayVec<usize, SLOT_COUNT> = (0..SLOT_COUNT)
            .filter(|&i| {
                i != attacker && self.sessions[i].is_active() && !self.sessions[i].shielded(now)
            })
            .collect();
        if targets.is_empty() {
            return;
        }

        let n = targets.len() as u32;
        let base = cleared / n;
        let remainder = (cleared % n) as usize;
        let mut sent = 0;
        for (idx, &target) in targets.iter().enumerate() {
            let rows = base + u32::from(idx < remainder);
            if rows == 0 {
                continue;
            }
            self.sessions[target].receive_garbage(rows, now);
            sent += rows;
        }
        debug_assert_eq!(sent, cleared, "attack distribution must conserve rows");
        self.sessions[attacker].note_garbage_sent(sent);
    }

    /// Single-survivor win detection
    ///
    /// With two or more starters the match finishes when at most one
    /// session is left active - the survivor wins, or nobody does after a
    /// simultaneous knockout. A solo match finishes, winnerless, when its
    /// only session tops out.
    fn update_outcome(&mut self) {
        if self.phase != MatchPhase::Running {
            return;
        }
        let active: ArrayVec<usize, SLOT_COUNT> = (0..SLOT_COUNT)
            .filter(|&i| self.sessions[i].is_active())
            .collect();
        if self.starters >= 2 {
            match active.len() {
                1 => {
                    self.phase = MatchPhase::Finished;
                    self.winner = Some(active[0] as u8 + 1);
                }
                0 => {
                    self.phase = MatchPhase::Finished;
                    self.winner = None;
                }
                _ => {}
            }
        } else if active.is_empty() {
            self.phase = MatchPhase::Finished;
            self.winner = None;
        }
    }

    /// Participating slots ordered by score descending, ties by slot order
    pub fn rankings(&self) -> ArrayVec<u8, SLOT_COUNT> {
        let mut slots: ArrayVec<usize, SLOT_COUNT> = (0..SLOT_COUNT)
            .filter(|&i| self.sessions[i].mode() != PlayerMode::Off)
            .collect();
        slots.sort_unstable_by_key(|&i| (std::cmp::Reverse(self.sessions[i].score()), i));
        slots.iter().map(|&i| i as u8 + 1).collect()
    }

    /// Build the read-only view for drivers and renderers
    pub fn snapshot(&self, now: u64) -> MatchSnapshot {
        let mut sessions: [SessionSnapshot; SLOT_COUNT] =
            std::array::from_fn(|_| SessionSnapshot::default());
        for i in 0..SLOT_COUNT {
            self.sessions[i].snapshot_into(now, &mut sessions[i]);
        }
        MatchSnapshot {
            phase: self.phase,
            winner: self.winner,
            rankings: self.rankings(),
            sessions,
        }
    }
}

fn session_seed(seed: u32, index: usize) -> u32 {
    seed.wrapping_add((index as u32 + 1).wrapping_mul(0x9E37_79B9))
}

fn cpu_seed(seed: u32, index: usize) -> u32 {
    seed.wrapping_add((index as u32 + 1).wrapping_mul(0x85EB_CA6B))
}
