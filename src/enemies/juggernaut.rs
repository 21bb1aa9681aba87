//! Juggernaut - unstoppable, camera-destroying, lure-susceptible
//!
//! Walks its route to the workshop and nothing the turret does slows it.
//! The only countermeasure is an active lure in its room or one doorway
//! over, which retargets it for as long as the lure plays. It is one of
//! the two camera-destroyers: standing on a watched feed fills that
//! camera's watch accumulator. If it reaches the workshop while the player
//! is teleported away it waits there, and the loss lands the moment the
//! player tries to come home.

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::types::{Archetype, Room};
use crate::events::{DefeatReason, EncounterEvent};
use crate::map;
use crate::world::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JuggernautState {
    Patrolling,
    /// Retargeted toward the lure room
    Lured,
    /// In the workshop
    Arrived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Juggernaut {
    active: bool,
    state: JuggernautState,
    room: Room,
    hop_timer: f32,
    /// Set when arrival found the workshop empty; the loss is deferred to
    /// the player's return
    waiting_at_home: bool,
}

impl Juggernaut {
    pub fn new(config: &EncounterConfig) -> Self {
        Self {
            active: true,
            state: JuggernautState::Patrolling,
            room: map::patrol_path(Archetype::Juggernaut)[0],
            hop_timer: config.juggernaut_hop_interval,
            waiting_at_home: false,
        }
    }

    pub fn current_room(&self) -> Option<Room> {
        if self.active {
            Some(self.room)
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> JuggernautState {
        self.state
    }

    pub fn is_lured(&self) -> bool {
        self.state == JuggernautState::Lured
    }

    pub fn is_waiting_at_home(&self) -> bool {
        self.active && self.waiting_at_home
    }

    /// Where the next hop goes: the lure room while lured, otherwise the
    /// canonical route (rejoining it if a lure dragged us off).
    fn hop_target(&self) -> Option<Room> {
        match self.state {
            JuggernautState::Lured => None, // target resolved in update
            JuggernautState::Arrived => None,
            JuggernautState::Patrolling => {
                let path = map::patrol_path(Archetype::Juggernaut);
                if let Some(pos) = path.iter().position(|&r| r == self.room) {
                    path.get(pos + 1).copied()
                } else {
                    map::next_hop_toward(self.room, Room::Workshop)
                }
            }
        }
    }

    pub fn update(
        &mut self,
        world: &mut WorldState,
        config: &EncounterConfig,
        delta: f32,
        events: &mut Vec<EncounterEvent>,
    ) -> Option<DefeatReason> {
        if !self.active || (self.state == JuggernautState::Arrived && self.waiting_at_home) {
            return None;
        }

        // Lure engagement: an active lure in this room or next door takes
        // over; a dead lure hands control back to the route.
        let lure_room = world.teleport.active_lure_room();
        match (self.state, lure_room) {
            (JuggernautState::Patrolling, Some(lure))
                if lure == self.room || map::adjacent(lure, self.room) =>
            {
                tracing::debug!("Juggernaut lured toward {}", lure.name());
                self.state = JuggernautState::Lured;
            }
            (JuggernautState::Lured, None) => {
                self.state = JuggernautState::Patrolling;
            }
            _ => {}
        }

        self.hop_timer -= delta;
        if self.hop_timer > 0.0 {
            return None;
        }
        self.hop_timer += config.juggernaut_hop_interval;

        match self.state {
            JuggernautState::Lured => {
                let lure = lure_room.expect("lured without a lure");
                if let Some(hop) = map::next_hop_toward(self.room, lure) {
                    self.room = hop;
                }
                None
            }
            JuggernautState::Patrolling => {
                let Some(next) = self.hop_target() else {
                    return None;
                };
                self.room = next;
                if self.room != Room::Workshop {
                    return None;
                }
                self.state = JuggernautState::Arrived;
                if world.teleport.is_teleported() {
                    // Nobody home: it waits, and the player's return
                    // attempt settles the matter.
                    self.waiting_at_home = true;
                    tracing::info!("Juggernaut waiting in the empty workshop");
                    None
                } else {
                    events.push(EncounterEvent::EnemyAttackStarted {
                        archetype: Archetype::Juggernaut,
                    });
                    Some(DefeatReason::JuggernautArrival)
                }
            }
            JuggernautState::Arrived => None,
        }
    }

    pub fn force_despawn(&mut self) {
        self.active = false;
        self.waiting_at_home = false;
    }

    pub fn respawn(&mut self, config: &EncounterConfig) {
        self.active = true;
        self.state = JuggernautState::Patrolling;
        self.room = map::patrol_path(Archetype::Juggernaut)[0];
        self.hop_timer = config.juggernaut_hop_interval;
        self.waiting_at_home = false;
    }
}
