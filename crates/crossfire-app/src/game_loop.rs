//! Game loop thread: runs the simulation engine at 20Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossfire_core::commands::PlayerCommand;
use crossfire_core::constants::TICK_RATE;
use crossfire_core::enums::GamePhase;
use crossfire_core::events::GameEvent;
use crossfire_core::state::GameStateSnapshot;
use crossfire_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("crossfire-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    tracing::debug!(seed = config.seed, "game loop started");
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::debug!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        log_events(&snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Drive `engine` with `pilot` for up to `max_ticks` simulated ticks, as fast
/// as possible. Stops early on game over. Returns the last snapshot.
pub fn run_headless(
    engine: &mut SimulationEngine,
    pilot: &Autopilot,
    max_ticks: u64,
) -> GameStateSnapshot {
    engine.queue_command(PlayerCommand::StartGame);
    let mut snapshot = engine.tick();
    log_events(&snapshot);

    while snapshot.time.tick < max_ticks && snapshot.phase != GamePhase::GameOver {
        engine.queue_command(PlayerCommand::SetControls {
            controls: pilot.next_controls(&snapshot),
        });
        snapshot = engine.tick();
        log_events(&snapshot);
    }
    snapshot
}

/// Trace every event carried by a snapshot.
pub fn log_events(snapshot: &GameStateSnapshot) {
    for event in &snapshot.events {
        match event {
            GameEvent::ShotFired { .. } | GameEvent::AlienFired { .. } => {
                tracing::trace!(tick = snapshot.time.tick, ?event, "game event");
            }
            _ => tracing::debug!(tick = snapshot.time.tick, ?event, "game event"),
        }
    }
}
