//! Runner - fast, one-door intruder
//!
//! Sprints along a fixed path to the left door and waits there. The wait
//! has no self-resolving timeout: only a manual shot, the turret's
//! auto-defense, or the absence of any turret resolves it. An undefended
//! door is walked straight through, which ends the night.

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::types::{Archetype, Room};
use crate::events::{DefeatReason, EncounterEvent};
use crate::map;
use crate::world::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerState {
    Traveling,
    WaitingAtDoor,
    Despawned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    active: bool,
    state: RunnerState,
    path_index: usize,
    hop_timer: f32,
    /// Seconds spent waiting at the door; read by auto-defense
    wait_elapsed: f32,
    respawn_timer: f32,
}

impl Runner {
    pub fn new(config: &EncounterConfig) -> Self {
        Self {
            active: true,
            state: RunnerState::Traveling,
            path_index: 0,
            hop_timer: config.runner_hop_interval,
            wait_elapsed: 0.0,
            respawn_timer: 0.0,
        }
    }

    fn path() -> &'static [Room] {
        map::patrol_path(Archetype::Runner)
    }

    /// Index of the door hallway, one short of the workshop
    fn door_index() -> usize {
        Self::path().len() - 2
    }

    pub fn current_room(&self) -> Option<Room> {
        if self.active && self.state != RunnerState::Despawned {
            Some(Self::path()[self.path_index])
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn is_waiting_at_door(&self) -> bool {
        self.active && self.state == RunnerState::WaitingAtDoor
    }

    pub fn wait_elapsed(&self) -> f32 {
        self.wait_elapsed
    }

    pub fn update(
        &mut self,
        world: &mut WorldState,
        config: &EncounterConfig,
        delta: f32,
        events: &mut Vec<EncounterEvent>,
    ) -> Option<DefeatReason> {
        if !self.active {
            return None;
        }
        match self.state {
            RunnerState::Despawned => {
                self.respawn_timer -= delta;
                if self.respawn_timer <= 0.0 {
                    self.respawn(config);
                }
                None
            }
            RunnerState::Traveling => {
                self.hop_timer -= delta;
                if self.hop_timer <= 0.0 {
                    self.hop_timer += config.runner_hop_interval;
                    self.path_index += 1;
                    if self.path_index == Self::door_index() {
                        self.state = RunnerState::WaitingAtDoor;
                        self.wait_elapsed = 0.0;
                        tracing::debug!("Runner at the left door");
                        events.push(EncounterEvent::EnemyReachedDoor {
                            archetype: Archetype::Runner,
                            room: Self::path()[self.path_index],
                        });
                    }
                }
                None
            }
            RunnerState::WaitingAtDoor => {
                // The wait has no timeout; fire, auto-defense or a missing
                // turret are the only ways out.
                if !world.turret.exists() {
                    self.path_index = Self::path().len() - 1;
                    events.push(EncounterEvent::EnemyAttackStarted {
                        archetype: Archetype::Runner,
                    });
                    return Some(DefeatReason::TurretlessBreach(Archetype::Runner));
                }
                self.wait_elapsed += delta;
                None
            }
        }
    }

    /// Repelled by a shot or auto-defense: despawn and rearm the respawn
    /// countdown at the spawn node.
    pub fn drive_away(&mut self, config: &EncounterConfig) {
        self.state = RunnerState::Despawned;
        self.respawn_timer = config.runner_respawn_delay;
        self.wait_elapsed = 0.0;
        tracing::debug!("Runner driven away");
    }

    pub fn force_despawn(&mut self) {
        self.active = false;
        self.state = RunnerState::Despawned;
    }

    pub fn respawn(&mut self, config: &EncounterConfig) {
        self.active = true;
        self.state = RunnerState::Traveling;
        self.path_index = 0;
        self.hop_timer = config.runner_hop_interval;
        self.wait_elapsed = 0.0;
        self.respawn_timer = 0.0;
    }
}
