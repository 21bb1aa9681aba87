//! Sieger - slow, single-door, ranged threat
//!
//! Trudges to the right door and shells the turret from there with a
//! rocket on a fixed cadence, indefinitely. The moment its target is gone
//! (destroyed mid-siege, or never built) it starts a breach countdown - a
//! grace period the player can still interrupt with a fresh turret and a
//! shot. A drive-away mid-breach must clear the breach completely; a stale
//! breach timer surviving the reset is the classic bug here.

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::types::{Archetype, Room};
use crate::events::{DefeatReason, EncounterEvent};
use crate::map;
use crate::turret::DamageOutcome;
use crate::world::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SiegerState {
    Traveling,
    /// Shelling the turret; field is seconds until the next rocket
    Sieging { shot_timer: f32 },
    /// Door undefended; field is seconds of grace left
    Breaching { remaining: f32 },
    Despawned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sieger {
    active: bool,
    state: SiegerState,
    path_index: usize,
    hop_timer: f32,
    respawn_timer: f32,
}

impl Sieger {
    pub fn new(config: &EncounterConfig) -> Self {
        Self {
            active: true,
            state: SiegerState::Traveling,
            path_index: 0,
            hop_timer: config.sieger_hop_interval,
            respawn_timer: 0.0,
        }
    }

    fn path() -> &'static [Room] {
        map::patrol_path(Archetype::Sieger)
    }

    fn door_index() -> usize {
        Self::path().len() - 2
    }

    pub fn current_room(&self) -> Option<Room> {
        if self.active && self.state != SiegerState::Despawned {
            Some(Self::path()[self.path_index])
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> SiegerState {
        self.state
    }

    pub fn is_sieging(&self) -> bool {
        matches!(self.state, SiegerState::Sieging { .. })
    }

    pub fn is_breaching(&self) -> bool {
        matches!(self.state, SiegerState::Breaching { .. })
    }

    /// Seconds of breach grace left; 0 outside a breach
    pub fn breach_remaining(&self) -> f32 {
        match self.state {
            SiegerState::Breaching { remaining } => remaining,
            _ => 0.0,
        }
    }

    /// A hit counts while the Sieger threatens the door: sieging or
    /// mid-breach.
    pub fn is_threatening_door(&self) -> bool {
        self.active && (self.is_sieging() || self.is_breaching())
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
            SiegerState::Despawned => {
                self.respawn_timer -= delta;
                if self.respawn_timer <= 0.0 {
                    self.respawn(config);
                }
                None
            }
            SiegerState::Traveling => {
                self.hop_timer -= delta;
                if self.hop_timer <= 0.0 {
                    self.hop_timer += config.sieger_hop_interval;
                    self.path_index += 1;
                    if self.path_index == Self::door_index() {
                        events.push(EncounterEvent::EnemyReachedDoor {
                            archetype: Archetype::Sieger,
                            room: Self::path()[self.path_index],
                        });
                        if world.turret.exists() {
                            tracing::debug!("Sieger opens siege on the turret");
                            self.state = SiegerState::Sieging {
                                shot_timer: config.sieger_shot_interval,
                            };
                        } else {
                            // Nothing to besiege: straight to the grace
                            // countdown.
                            tracing::debug!("Sieger found no turret; breach begins");
                            self.state = SiegerState::Breaching {
                                remaining: config.sieger_breach_duration,
                            };
                        }
                    }
                }
                None
            }
            SiegerState::Sieging { mut shot_timer } => {
                shot_timer -= delta;
                if shot_timer <= 0.0 {
                    shot_timer += config.sieger_shot_interval;
                    match world.turret.take_damage(config.sieger_shot_damage) {
                        DamageOutcome::Damaged => {
                            events.push(EncounterEvent::TurretDamaged {
                                hp: world.turret.hp(),
                                by: Archetype::Sieger,
                            });
                        }
                        DamageOutcome::Destroyed => {
                            events.push(EncounterEvent::TurretDestroyed);
                            // Same-tick propagation: the siege target is
                            // gone, the breach starts now.
                            self.state = SiegerState::Breaching {
                                remaining: config.sieger_breach_duration,
                            };
                            return None;
                        }
                        DamageOutcome::NoTurret => {
                            self.state = SiegerState::Breaching {
                                remaining: config.sieger_breach_duration,
                            };
                            return None;
                        }
                    }
                }
                self.state = SiegerState::Sieging { shot_timer };
                None
            }
            SiegerState::Breaching { mut remaining } => {
                remaining -= delta;
                if remaining <= 0.0 {
                    self.path_index = Self::path().len() - 1;
                    events.push(EncounterEvent::EnemyAttackStarted {
                        archetype: Archetype::Sieger,
                    });
                    return Some(DefeatReason::SiegeBreach);
                }
                self.state = SiegerState::Breaching { remaining };
                None
            }
        }
    }

    /// The turret went down to something other than this Sieger's own
    /// rocket; a sieging Sieger starts its breach in the same tick.
    pub fn notify_turret_destroyed(&mut self, config: &EncounterConfig) {
        if self.is_sieging() {
            self.state = SiegerState::Breaching {
                remaining: config.sieger_breach_duration,
            };
        }
    }

    /// Repelled by a shot; clears the breach flag and timer no matter how
    /// far along the breach was.
    pub fn drive_away(&mut self, config: &EncounterConfig) {
        self.state = SiegerState::Despawned;
        self.respawn_timer = config.sieger_respawn_delay;
        tracing::debug!("Sieger driven away");
    }

    pub fn force_despawn(&mut self) {
        self.active = false;
        self.state = SiegerState::Despawned;
    }

    pub fn respawn(&mut self, config: &EncounterConfig) {
        self.active = true;
        self.state = SiegerState::Traveling;
        self.path_index = 0;
        self.hop_timer = config.sieger_hop_interval;
        self.respawn_timer = 0.0;
    }
}
