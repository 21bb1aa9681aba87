//! Encounter orchestrator - the per-tick driver
//!
//! One `tick(delta)` call per frame advances the clock, the economy, all
//! six intruders in a fixed order, the camera watch timers and the
//! teleport controller, then evaluates terminal conditions. Everything
//! mutable is touched synchronously inside the tick; the only guarantees
//! that matter are ordering ones - regeneration runs before the agents so
//! same-tick withdrawals see the new balance, and a turret destruction
//! reaches a sieging Sieger inside the tick it happens.
//!
//! Returned events are the complete, ordered record of what happened;
//! the presentation layer consumes them and polls the snapshot surface.

pub mod controls;
pub mod snapshot;

pub use controls::FireOutcome;
pub use snapshot::{
    CameraSnapshot, EnemySighting, SightingDetail, TeleportSnapshot, TurretSnapshot,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cameras::CameraNetwork;
use crate::core::clock::NightClock;
use crate::core::config::EncounterConfig;
use crate::core::types::{Archetype, Room};
use crate::economy::MetalReserve;
use crate::enemies::{
    EnemyAgent, Juggernaut, Marksman, Runner, Saboteur, Sieger, Specter,
};
use crate::events::{DefeatReason, EncounterEvent};
use crate::map;
use crate::teleport::TeleportController;
use crate::turret::{DamageOutcome, Turret};
use crate::world::WorldState;

/// Terminal status of the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EncounterStatus {
    InProgress,
    Won,
    Lost(DefeatReason),
}

pub struct Encounter {
    config: EncounterConfig,
    clock: NightClock,
    world: WorldState,
    /// Fixed update order: Runner, Sieger, Specter, Juggernaut, Marksman,
    /// Saboteur
    agents: Vec<EnemyAgent>,
    status: EncounterStatus,
    /// Events raised by control actions between ticks; delivered with the
    /// next tick's batch
    pending: Vec<EncounterEvent>,
}

impl Encounter {
    pub fn new(config: EncounterConfig) -> Self {
        let mut world = WorldState {
            metal: MetalReserve::new(config.metal_start, config.metal_max),
            turret: Turret::new(),
            cameras: CameraNetwork::new(),
            teleport: TeleportController::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            now: 0.0,
        };
        let agents = vec![
            EnemyAgent::Runner(Runner::new(&config)),
            EnemyAgent::Sieger(Sieger::new(&config)),
            EnemyAgent::Specter(Specter::new(&config)),
            EnemyAgent::Juggernaut(Juggernaut::new(&config)),
            EnemyAgent::Marksman(Marksman::new(&config, &mut world.rng)),
            EnemyAgent::Saboteur(Saboteur::new(&config, &mut world.rng)),
        ];
        Self {
            config,
            clock: NightClock::new(),
            world,
            agents,
            status: EncounterStatus::InProgress,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != EncounterStatus::InProgress
    }

    /// Advance the whole simulation by `delta` seconds and return the
    /// events that occurred. A no-op once the encounter is terminal,
    /// beyond delivering any still-pending control events.
    pub fn tick(&mut self, delta: f32) -> Vec<EncounterEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if self.is_over() {
            return events;
        }

        self.world.now += delta;
        self.clock.advance(delta, self.config.seconds_per_minute);
        if self.clock.is_dawn() {
            tracing::info!("Dawn at last");
            self.status = EncounterStatus::Won;
            events.push(EncounterEvent::Victory);
            return events;
        }

        // Economy first, so withdrawals later in this tick see the fresh
        // balance.
        let regen_paused =
            self.world.turret.is_manually_aimed() || self.world.teleport.is_teleported();
        self.world
            .metal
            .regenerate(self.config.metal_regen_rate, delta, regen_paused);

        let turret_existed = self.world.turret.exists();

        for agent in self.agents.iter_mut() {
            if let Some(reason) = agent.update(&mut self.world, &self.config, delta, &mut events) {
                self.declare_loss(reason, &mut events);
                return events;
            }
        }

        self.run_auto_defense(&mut events);

        // Same-tick propagation: anything that took the turret down during
        // this tick turns an ongoing siege into a breach now, not next
        // frame. (The Sieger's own rocket already handled itself.)
        if turret_existed && !self.world.turret.exists() {
            if let Some(sieger) = self.agents.iter_mut().find_map(EnemyAgent::as_sieger_mut) {
                sieger.notify_turret_destroyed(&self.config);
            }
        }

        let destroyers = self.destructive_occupants();
        self.world.cameras.tick(
            delta,
            self.world.now,
            &destroyers,
            &self.config,
            &mut events,
        );

        let occupied = self.occupied_rooms();
        if self.world.teleport.tick_danger(
            delta,
            &occupied,
            self.config.escape_duration,
            &mut events,
        ) {
            self.declare_loss(DefeatReason::EscapeTimeout, &mut events);
            return events;
        }
        self.world.teleport.tick_lure(delta, &mut events);

        events
    }

    /// Unwrangled auto-defense: an existing turret left on automatic
    /// repels a door-waiting Runner after a reaction delay, sacrificing
    /// some of itself with every shot.
    fn run_auto_defense(&mut self, events: &mut Vec<EncounterEvent>) {
        if !self.world.turret.exists() || self.world.turret.is_wrangled() {
            return;
        }
        let Some(runner) = self.agents.iter_mut().find_map(EnemyAgent::as_runner_mut) else {
            return;
        };
        if !runner.is_waiting_at_door() || runner.wait_elapsed() < self.config.auto_defense_delay {
            return;
        }
        runner.drive_away(&self.config);
        events.push(EncounterEvent::EnemyDrivenAway {
            archetype: Archetype::Runner,
            bounty: 0.0,
        });
        match self
            .world
            .turret
            .take_damage(self.config.auto_defense_self_damage)
        {
            DamageOutcome::Damaged => events.push(EncounterEvent::TurretDamaged {
                hp: self.world.turret.hp(),
                by: Archetype::Runner,
            }),
            DamageOutcome::Destroyed => events.push(EncounterEvent::TurretDestroyed),
            DamageOutcome::NoTurret => {}
        }
    }

    /// Camera-destroying intruders currently standing on camera rooms, in
    /// update order
    fn destructive_occupants(&self) -> Vec<(Room, Archetype)> {
        self.agents
            .iter()
            .filter(|a| {
                matches!(
                    a.archetype(),
                    Archetype::Juggernaut | Archetype::Marksman
                )
            })
            .filter_map(|a| {
                let room = a.current_room()?;
                map::has_camera(room).then_some((room, a.archetype()))
            })
            .collect()
    }

    /// Every room currently holding an active intruder
    fn occupied_rooms(&self) -> Vec<Room> {
        self.agents
            .iter()
            .filter_map(EnemyAgent::current_room)
            .collect()
    }

    /// The intruder standing in `room`, if any (first in update order)
    fn occupant_of(&self, room: Room) -> Option<Archetype> {
        self.agents
            .iter()
            .find(|a| a.current_room() == Some(room))
            .map(EnemyAgent::archetype)
    }

    fn declare_loss(&mut self, reason: DefeatReason, events: &mut Vec<EncounterEvent>) {
        tracing::info!("Encounter lost: {:?}", reason);
        self.status = EncounterStatus::Lost(reason);
        events.push(EncounterEvent::GameOver { reason });
    }
}
