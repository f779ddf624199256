//! Crossfire runner: plays the simulation with the scripted pilot and prints
//! a JSON run summary.
//!
//! Usage:
//!   crossfire --headless --ticks 6000 --seed 7
//!   RUST_LOG=crossfire_sim=debug crossfire --config run.json

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crossfire_app::autopilot::Autopilot;
use crossfire_app::game_loop::{self, TICK_DURATION};
use crossfire_app::state::AppState;
use crossfire_core::commands::PlayerCommand;
use crossfire_core::enums::{AimPolicy, FirePolicy, GamePhase, MovementPolicy};
use crossfire_core::state::GameStateSnapshot;
use crossfire_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "crossfire")]
#[command(about = "Run the Crossfire street-grid shooter with a scripted pilot")]
struct Args {
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of simulation ticks to run (20 per second)
    #[arg(long, default_value_t = 1200)]
    ticks: u64,
    /// JSON config file with seed and policy selections
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run as fast as possible instead of in real time
    #[arg(long)]
    headless: bool,
    /// Player movement policy
    #[arg(long, value_enum)]
    movement: Option<MovementArg>,
    /// Alien aiming policy
    #[arg(long, value_enum)]
    aim: Option<AimArg>,
    /// Player fire rate policy
    #[arg(long, value_enum)]
    fire: Option<FireArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MovementArg {
    Discrete,
    Continuous,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AimArg {
    Cardinal,
    Direct,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FireArg {
    Cooldown,
    StreetCap,
}

impl From<MovementArg> for MovementPolicy {
    fn from(arg: MovementArg) -> Self {
        match arg {
            MovementArg::Discrete => MovementPolicy::Discrete,
            MovementArg::Continuous => MovementPolicy::Continuous,
        }
    }
}

impl From<AimArg> for AimPolicy {
    fn from(arg: AimArg) -> Self {
        match arg {
            AimArg::Cardinal => AimPolicy::Cardinal,
            AimArg::Direct => AimPolicy::Direct,
        }
    }
}

impl From<FireArg> for FirePolicy {
    fn from(arg: FireArg) -> Self {
        match arg {
            FireArg::Cooldown => FirePolicy::Cooldown,
            FireArg::StreetCap => FirePolicy::StreetCap,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    movement: MovementPolicy,
    alien_aim: AimPolicy,
    fire: FirePolicy,
    ticks: u64,
    phase: GamePhase,
    level: u32,
    score: u32,
    lives: u32,
    ammo: u32,
}

impl RunSummary {
    fn new(config: &SimConfig, snapshot: &GameStateSnapshot) -> Self {
        Self {
            seed: config.seed,
            movement: config.movement,
            alien_aim: config.alien_aim,
            fire: config.fire,
            ticks: snapshot.time.tick,
            phase: snapshot.phase,
            level: snapshot.level,
            score: snapshot.score,
            lives: snapshot.lives,
            ammo: snapshot.ammo,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.ticks == 0 {
        bail!("--ticks must be > 0");
    }
    let config = load_config(&args)?;
    tracing::info!(
        seed = config.seed,
        movement = ?config.movement,
        aim = ?config.alien_aim,
        fire = ?config.fire,
        headless = args.headless,
        "starting run"
    );

    let pilot = Autopilot::new();
    let snapshot = if args.headless {
        let mut engine = SimulationEngine::new(config.clone());
        game_loop::run_headless(&mut engine, &pilot, args.ticks)
    } else {
        run_realtime(config.clone(), &pilot, args.ticks)?
    };

    let summary = RunSummary::new(&config, &snapshot);
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed encoding run summary")?
    );
    Ok(())
}

/// Config file first, then individual flags on top.
fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            SimConfig::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(movement) = args.movement {
        config.movement = movement.into();
    }
    if let Some(aim) = args.aim {
        config.alien_aim = aim.into();
    }
    if let Some(fire) = args.fire {
        config.fire = fire.into();
    }
    Ok(config)
}

/// Run on the 20Hz game loop thread, steering from the latest published snapshot.
fn run_realtime(config: SimConfig, pilot: &Autopilot, max_ticks: u64) -> Result<GameStateSnapshot> {
    let state = AppState::new();
    state.start(config).context("failed starting game loop")?;
    state.send(PlayerCommand::StartGame)?;

    loop {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        if snapshot.phase == GamePhase::GameOver || snapshot.time.tick >= max_ticks {
            break;
        }
        state.send(PlayerCommand::SetControls {
            controls: pilot.next_controls(&snapshot),
        })?;
    }

    state.shutdown()?;
    state
        .snapshot()
        .context("game loop stopped without publishing a snapshot")
}
