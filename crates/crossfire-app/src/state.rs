//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use crossfire_core::commands::PlayerCommand;
use crossfire_core::state::GameStateSnapshot;
use crossfire_sim::SimConfig;

use crate::game_loop;

/// Commands sent from the caller to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Failures talking to the game loop thread.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotRunning,
    #[error("game loop thread is gone")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared application state.
///
/// - `mpsc::Sender` wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` for state that does not exist before `start`
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the game loop thread)
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Game loop thread handle while running.
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            worker: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread if it is not already running.
    pub fn start(&self, config: SimConfig) -> Result<(), LoopError> {
        let mut worker = self.worker.lock().map_err(|_| LoopError::Poisoned)?;
        if worker.is_some() {
            return Err(LoopError::AlreadyRunning);
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;

        let mut tx_lock = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        *tx_lock = Some(cmd_tx);
        *worker = Some(handle);
        Ok(())
    }

    /// Whether the game loop thread has been started and not shut down.
    pub fn is_running(&self) -> bool {
        self.worker.lock().map(|w| w.is_some()).unwrap_or(false)
    }

    /// Forward a player command to the simulation.
    pub fn send(&self, command: PlayerCommand) -> Result<(), LoopError> {
        let tx_lock = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|_| LoopError::Disconnected),
            None => Err(LoopError::NotRunning),
        }
    }

    /// Latest snapshot published by the game loop, if any.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Stop the game loop thread and wait for it to exit.
    pub fn shutdown(&self) -> Result<(), LoopError> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|_| LoopError::Poisoned)?
            .take();
        let Some(tx) = tx else {
            return Err(LoopError::NotRunning);
        };
        // The thread may already have exited; joining below still succeeds.
        let _ = tx.send(GameLoopCommand::Shutdown);

        let handle = self.worker.lock().map_err(|_| LoopError::Poisoned)?.take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| LoopError::Disconnected)?;
        }
        Ok(())
    }
}
