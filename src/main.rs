//! Headless match driver
//!
//! Runs a CPU-vs-CPU match on a synthetic clock and prints the result.
//! Rendering, audio, and input devices are external concerns; this binary
//! exists to exercise the engine end to end and to emit adapter
//! observations for downstream tooling.

use anyhow::{anyhow, Result};

use versus_tetris::adapter::{encode_line, observation_from_snapshot};
use versus_tetris::arena::{CpuProfile, Match, MatchConfig, MEDIUM};
use versus_tetris::types::{MatchPhase, PlayerMode, SLOT_COUNT, TICK_MS};

struct RunConfig {
    seed: u32,
    cpu_profile: CpuProfile,
    effect_pct: u32,
    max_ticks: u64,
    json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            cpu_profile: MEDIUM,
            effect_pct: 0,
            max_ticks: 1_000_000,
            json: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--difficulty" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --difficulty"))?;
                config.cpu_profile = CpuProfile::for_difficulty(v)
                    .ok_or_else(|| anyhow!("unknown difficulty: {}", v))?;
            }
            "--effects" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --effects"))?;
                config.effect_pct = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --effects value: {}", v))?;
            }
            "--max-ticks" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --max-ticks"))?;
                config.max_ticks = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --max-ticks value: {}", v))?;
            }
            "--json" => {
                config.json = true;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut game = Match::new(MatchConfig {
        seed: config.seed,
        effect_pct: config.effect_pct,
        cpu_profile: config.cpu_profile,
    });
    for slot in 1..=SLOT_COUNT {
        game.set_mode(slot, PlayerMode::Cpu);
    }
    if !game.start(0) {
        return Err(anyhow!("no sessions armed"));
    }

    let mut now: u64 = 0;
    let mut ticks: u64 = 0;
    while game.phase() == MatchPhase::Running && ticks < config.max_ticks {
        now += TICK_MS;
        game.tick(now);
        ticks += 1;
    }

    let snapshot = game.snapshot(now);
    if config.json {
        print!(
            "{}",
            encode_line(&observation_from_snapshot(&snapshot, ticks, now))?
        );
        return Ok(());
    }

    for session in &snapshot.sessions {
        let status = if session.game_over { " (topped out)" } else { "" };
        println!(
            "slot {} [{}] score {} lines {} level {}{}",
            session.slot,
            session.mode.as_str(),
            session.score,
            session.lines,
            session.level,
            status
        );
    }
    match (snapshot.phase, snapshot.winner) {
        (MatchPhase::Finished, Some(slot)) => println!("winner: slot {}", slot),
        (MatchPhase::Finished, None) => println!("no winner (simultaneous knockout)"),
        _ => println!("match still running after {} ticks", ticks),
    }
    Ok(())
}
