//! Specter - dual-body stealth charge
//!
//! Two independently tracked pieces share one machine: a headless body
//! that idles deep in the building until it charges the left door, and a
//! floating head that drifts between camera feeds with a glowing eye.
//! Watching the feed the head is on stalls the body's charge from ever
//! starting. The charge itself is one fixed window in two phases: for the
//! first three quarters the body has not materialized and cannot be hit
//! no matter how well the player aims; only the last quarter is
//! attackable, and a hit there pays the largest bounty in the game.

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::types::{Archetype, Room};
use crate::events::{DefeatReason, EncounterEvent};
use crate::world::WorldState;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpecterState {
    /// Drifting between the deep rooms, cooling down toward a charge
    IdlePatrol,
    /// Approach glow: not materialized, not attackable
    ChargeWindup,
    /// Materialized at the door and attackable
    Charging,
    Despawned,
}

/// Rooms the body drifts between while idle
const BODY_HAUNTS: [Room; 2] = [Room::Cellar, Room::Atrium];

/// Rooms the head can drift to: every camera feed plus the workshop
/// doorway itself
const HEAD_HAUNTS: [Room; 8] = [
    Room::WestHall,
    Room::EastHall,
    Room::Foyer,
    Room::Storage,
    Room::Kitchen,
    Room::Atrium,
    Room::Cellar,
    Room::Workshop,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specter {
    active: bool,
    state: SpecterState,
    body_room: Room,
    patrol_timer: f32,
    /// Seconds of idle left before the body may charge
    charge_cooldown: f32,
    /// Seconds elapsed inside the charge window
    charge_elapsed: f32,
    head_room: Room,
    head_timer: f32,
    respawn_timer: f32,
}

impl Specter {
    pub fn new(config: &EncounterConfig) -> Self {
        Self {
            active: true,
            state: SpecterState::IdlePatrol,
            body_room: Room::Cellar,
            patrol_timer: config.specter_patrol_interval,
            charge_cooldown: config.specter_charge_cooldown,
            charge_elapsed: 0.0,
            head_room: Room::Atrium,
            head_timer: config.specter_head_interval,
            respawn_timer: 0.0,
        }
    }

    pub fn current_room(&self) -> Option<Room> {
        if self.active && self.state != SpecterState::Despawned {
            Some(self.body_room)
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> SpecterState {
        self.state
    }

    /// Where the floating head currently is
    pub fn head_room(&self) -> Room {
        self.head_room
    }

    /// The eye glows once the body is ready to charge - the tell that
    /// watching the head is buying time.
    pub fn is_eye_glowing(&self) -> bool {
        self.active
            && (self.charge_cooldown <= 0.0 || self.state != SpecterState::IdlePatrol)
    }

    /// Progress through the charge window in [0, 1]; `None` outside a
    /// charge
    pub fn charge_progress(&self, config: &EncounterConfig) -> Option<f32> {
        match self.state {
            SpecterState::ChargeWindup | SpecterState::Charging => {
                Some((self.charge_elapsed / config.specter_charge_duration).min(1.0))
            }
            _ => None,
        }
    }

    /// True only in the final, materialized quarter of the window. A hit
    /// during the windup is impossible by rule, not by chance.
    pub fn is_attackable(&self) -> bool {
        self.active && self.state == SpecterState::Charging
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

        // The head drifts on its own cadence regardless of what the body
        // is doing.
        self.head_timer -= delta;
        if self.head_timer <= 0.0 {
            self.head_timer += config.specter_head_interval;
            self.head_room = *HEAD_HAUNTS
                .choose(&mut world.rng)
                .expect("head haunts are non-empty");
        }

        match self.state {
            SpecterState::Despawned => {
                self.respawn_timer -= delta;
                if self.respawn_timer <= 0.0 {
                    self.respawn(config);
                }
                None
            }
            SpecterState::IdlePatrol => {
                self.patrol_timer -= delta;
                if self.patrol_timer <= 0.0 {
                    self.patrol_timer += config.specter_patrol_interval;
                    self.body_room = *BODY_HAUNTS
                        .choose(&mut world.rng)
                        .expect("body haunts are non-empty");
                }
                self.charge_cooldown -= delta;
                // Charge initiation checks the watch stall first:
                // observation of the head delays the attack indefinitely.
                if self.charge_cooldown <= 0.0 && !world.cameras.is_watched(self.head_room) {
                    self.state = SpecterState::ChargeWindup;
                    self.charge_elapsed = 0.0;
                    self.body_room = Room::WestHall;
                    tracing::debug!("Specter charge begins at the left door");
                    events.push(EncounterEvent::EnemyReachedDoor {
                        archetype: Archetype::Specter,
                        room: Room::WestHall,
                    });
                }
                None
            }
            SpecterState::ChargeWindup => {
                self.charge_elapsed += delta;
                if self.charge_elapsed
                    >= config.specter_charge_duration * config.specter_materialize_fraction
                {
                    self.state = SpecterState::Charging;
                }
                None
            }
            SpecterState::Charging => {
                self.charge_elapsed += delta;
                if self.charge_elapsed >= config.specter_charge_duration {
                    self.body_room = Room::Workshop;
                    events.push(EncounterEvent::EnemyAttackStarted {
                        archetype: Archetype::Specter,
                    });
                    return Some(DefeatReason::SpecterCharge);
                }
                None
            }
        }
    }

    /// Deterred by a hit in the materialized phase. The caller verifies
    /// `is_attackable` first and pays the bounty.
    pub fn deter(&mut self, config: &EncounterConfig) {
        self.state = SpecterState::Despawned;
        self.charge_elapsed = 0.0;
        self.respawn_timer = config.specter_respawn_delay;
        tracing::debug!("Specter deterred at the last moment");
    }

    pub fn force_despawn(&mut self) {
        self.active = false;
        self.state = SpecterState::Despawned;
    }

    pub fn respawn(&mut self, config: &EncounterConfig) {
        self.active = true;
        self.state = SpecterState::IdlePatrol;
        self.body_room = Room::Cellar;
        self.patrol_timer = config.specter_patrol_interval;
        self.charge_cooldown = config.specter_charge_cooldown;
        self.charge_elapsed = 0.0;
        self.respawn_timer = 0.0;
    }
}
