//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no I/O, no wall clock), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crossfire_core::commands::PlayerCommand;
use crossfire_core::controls::ControlState;
use crossfire_core::enums::GamePhase;
use crossfire_core::events::GameEvent;
use crossfire_core::grid::Grid;
use crossfire_core::state::GameStateSnapshot;
use crossfire_core::types::SimTime;

use crate::config::SimConfig;
use crate::schedule::EventSchedule;
use crate::session::SessionState;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    grid: Grid,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    session: SessionState,
    schedule: EventSchedule,
    controls: ControlState,
    /// Last seen value of `controls.pause_toggle`, for edge detection.
    pause_latch: bool,
    next_entity_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. Starts in `Menu`.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            grid: Grid::standard(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            phase: GamePhase::default(),
            session: SessionState::default(),
            schedule: EventSchedule::default(),
            controls: ControlState::default(),
            pause_latch: false,
            next_entity_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Systems only run (and time only advances) while `Playing`.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, &self.session, events)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the session counters (score, lives, health, ammo, level).
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get the configuration this engine was created with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get the street layout.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the control state currently held.
    pub fn controls(&self) -> ControlState {
        self.controls
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable session access (for tests that set up scores, ammo or health).
    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Get the pending event schedule (for tests).
    #[cfg(test)]
    pub fn schedule(&self) -> &EventSchedule {
        &self.schedule
    }

    /// Remove every alien (for tests that need a quiet field).
    #[cfg(test)]
    pub fn clear_aliens(&mut self) {
        world_setup::despawn_all::<crossfire_core::components::Alien>(&mut self.world);
    }

    /// Spawn an alien parked at `position` and return its id.
    #[cfg(test)]
    pub fn spawn_test_alien(&mut self, position: crossfire_core::types::Position) -> u32 {
        let id = self.next_entity_id;
        world_setup::spawn_alien(&mut self.world, &mut self.next_entity_id, position, self.time.tick);
        id
    }

    /// Spawn an alien bullet (for tests exercising player damage).
    #[cfg(test)]
    pub fn spawn_test_alien_bullet(
        &mut self,
        position: crossfire_core::types::Position,
        velocity: crossfire_core::types::Velocity,
    ) {
        world_setup::spawn_alien_bullet(
            &mut self.world,
            &mut self.next_entity_id,
            position,
            velocity,
        );
    }

    /// Spawn a player bullet and return its id.
    #[cfg(test)]
    pub fn spawn_test_player_bullet(
        &mut self,
        position: crossfire_core::types::Position,
        velocity: crossfire_core::types::Velocity,
    ) -> u32 {
        let id = self.next_entity_id;
        world_setup::spawn_player_bullet(
            &mut self.world,
            &mut self.next_entity_id,
            position,
            velocity,
        );
        id
    }

    /// Teleport the player ship and its movement target.
    #[cfg(test)]
    pub fn set_player_position(&mut self, position: crossfire_core::types::Position) {
        for (_entity, (_ship, pos, target)) in self.world.query_mut::<(
            &crossfire_core::components::PlayerShip,
            &mut crossfire_core::types::Position,
            &mut crossfire_core::components::MoveTarget,
        )>() {
            *pos = position;
            target.position = position;
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands that make no sense in the
    /// current phase are dropped.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetControls { controls } => {
                let rising = controls.pause_toggle && !self.pause_latch;
                self.pause_latch = controls.pause_toggle;
                self.controls = controls;
                if rising {
                    self.toggle_pause();
                }
            }
            PlayerCommand::StartGame => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.new_game();
                } else {
                    self.ignore(&command);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.set_phase(GamePhase::Paused);
                } else {
                    self.ignore(&command);
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.set_phase(GamePhase::Playing);
                } else {
                    self.ignore(&command);
                }
            }
            PlayerCommand::TogglePause => self.toggle_pause(),
            PlayerCommand::ReturnToMenu => {
                if matches!(self.phase, GamePhase::Paused | GamePhase::GameOver) {
                    self.world.clear();
                    self.schedule.invalidate();
                    self.session = SessionState::default();
                    self.time = SimTime::default();
                    self.set_phase(GamePhase::Menu);
                } else {
                    self.ignore(&command);
                }
            }
        }
    }

    fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            _ => tracing::debug!(phase = ?self.phase, "pause toggle ignored"),
        }
    }

    fn ignore(&self, command: &PlayerCommand) {
        tracing::debug!(?command, phase = ?self.phase, "command ignored in current phase");
    }

    fn set_phase(&mut self, phase: GamePhase) {
        tracing::info!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
    }

    /// Reset every counter and start level 1.
    fn new_game(&mut self) {
        self.world.clear();
        self.session = SessionState::default();
        self.time = SimTime::default();
        world_setup::spawn_player(&mut self.world, &self.grid);
        systems::progression::start_level(
            &mut self.world,
            &self.grid,
            &mut self.rng,
            &mut self.session,
            &mut self.schedule,
            &mut self.next_entity_id,
            self.time.tick,
        );
        self.set_phase(GamePhase::Playing);
    }

    fn game_over(&mut self) {
        self.schedule.invalidate();
        self.events.push(GameEvent::GameOver {
            score: self.session.score,
            level: self.session.level,
        });
        tracing::info!(score = self.session.score, level = self.session.level, "game over");
        self.set_phase(GamePhase::GameOver);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;
        self.session.invulnerability.expire(tick);

        // 1. Player movement
        systems::movement::move_player(
            &mut self.world,
            &self.grid,
            &self.controls,
            self.config.movement,
        );
        // 2. Alien AI (re-aim + easing)
        let player = world_setup::player_position(&self.world).unwrap_or_else(|| self.grid.center());
        systems::alien_ai::run(&mut self.world, &self.grid, player, self.session.level, tick);
        // 3. Projectile integration
        systems::movement::advance_projectiles(&mut self.world);
        // 4. Cleanup (off-grid projectiles)
        systems::cleanup::run(&mut self.world, &self.grid, &mut self.despawn_buffer);
        // 5. Player fire
        systems::fire_control::run_player(
            &mut self.world,
            &self.grid,
            &mut self.session,
            &self.controls,
            self.config.fire,
            &mut self.next_entity_id,
            &mut self.events,
            tick,
        );
        // 6. Alien fire
        systems::fire_control::run_aliens(
            &mut self.world,
            &self.grid,
            &mut self.rng,
            self.config.alien_aim,
            self.session.level,
            &mut self.next_entity_id,
            &mut self.events,
            tick,
        );
        // 7. Collision resolution
        let outcome = systems::collision::run(
            &mut self.world,
            &self.grid,
            &mut self.session,
            &mut self.schedule,
            &mut self.events,
            tick,
        );
        if outcome.game_over {
            self.game_over();
            return;
        }
        // 8. Scheduled events
        systems::scheduled::run(
            &mut self.world,
            &self.grid,
            &mut self.rng,
            &mut self.schedule,
            &mut self.next_entity_id,
            tick,
        );
        // 9. Spawn arming
        systems::spawner::run(
            &self.world,
            &self.session,
            &mut self.schedule,
            outcome.crystals_collected,
            tick,
        );
        // 10. Progression (extra life, level complete)
        systems::progression::run(
            &mut self.world,
            &self.grid,
            &mut self.rng,
            &mut self.session,
            &mut self.schedule,
            &mut self.next_entity_id,
            &mut self.events,
            tick,
        );
    }
}
