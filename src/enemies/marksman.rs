//! Marksman - ranged headshot, two-shot repel, lure-susceptible
//!
//! Wanders the building at random instead of following a route. Arriving
//! in either hallway it sets up and charges a headshot; the charge landing
//! is a kill unless the player is teleported away, in which case the
//! turret is destroyed and the Marksman is thrown to a random inner room
//! instead - a penalty trade rather than a death. Repelling it takes
//! exactly two hits at any turret level, and the first hit is silent: only
//! the second resets the charge and sends it back to wandering. It is the
//! second camera-destroyer, filling watch accumulators like the
//! Juggernaut.

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::types::{Archetype, Room};
use crate::events::{DefeatReason, EncounterEvent};
use crate::map;
use crate::turret::DamageOutcome;
use crate::world::WorldState;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarksmanState {
    Patrolling,
    Lured,
    Aiming,
}

/// Inner rooms it spawns in and is exiled to after a penalty trade
const INNER_ROOMS: [Room; 5] = [
    Room::Foyer,
    Room::Storage,
    Room::Kitchen,
    Room::Atrium,
    Room::Cellar,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marksman {
    active: bool,
    state: MarksmanState,
    room: Room,
    move_timer: f32,
    /// Seconds of uninterrupted aim accumulated in the hallway
    aim_progress: f32,
    hits_taken: u32,
}

/// What a registered hit amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarksmanHit {
    /// First of two: absorbed silently, no event-worthy change
    Absorbed,
    /// Second of two: charge reset, back to patrolling
    Repelled,
}

impl Marksman {
    pub fn new(config: &EncounterConfig, rng: &mut ChaCha8Rng) -> Self {
        Self {
            active: true,
            state: MarksmanState::Patrolling,
            room: *INNER_ROOMS.choose(rng).expect("inner rooms are non-empty"),
            move_timer: config.marksman_move_interval,
            aim_progress: 0.0,
            hits_taken: 0,
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

    pub fn state(&self) -> MarksmanState {
        self.state
    }

    pub fn is_lured(&self) -> bool {
        self.state == MarksmanState::Lured
    }

    pub fn is_aiming(&self) -> bool {
        self.active && self.state == MarksmanState::Aiming
    }

    /// Charge progress in [0, 1] while aiming
    pub fn aim_progress(&self, config: &EncounterConfig) -> f32 {
        (self.aim_progress / config.marksman_aim_duration).min(1.0)
    }

    /// Threatening the given hallway's door while aiming from it
    pub fn is_threatening_hallway(&self, hallway: Room) -> bool {
        self.is_aiming() && self.room == hallway
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

        // A playing lure in reach overrides everything, including an aim
        // in progress.
        let lure_room = world.teleport.active_lure_room();
        match (self.state, lure_room) {
            (MarksmanState::Patrolling | MarksmanState::Aiming, Some(lure))
                if lure == self.room || map::adjacent(lure, self.room) =>
            {
                tracing::debug!("Marksman lured toward {}", lure.name());
                self.state = MarksmanState::Lured;
                self.aim_progress = 0.0;
                self.hits_taken = 0;
            }
            (MarksmanState::Lured, None) => {
                self.state = MarksmanState::Patrolling;
            }
            _ => {}
        }

        if self.state == MarksmanState::Aiming {
            self.aim_progress += delta;
            if self.aim_progress >= config.marksman_aim_duration {
                return self.land_headshot(world, config, events);
            }
            return None;
        }

        self.move_timer -= delta;
        if self.move_timer > 0.0 {
            return None;
        }
        self.move_timer += config.marksman_move_interval;

        match self.state {
            MarksmanState::Lured => {
                let lure = lure_room.expect("lured without a lure");
                if let Some(hop) = map::next_hop_toward(self.room, lure) {
                    self.room = hop;
                }
            }
            MarksmanState::Patrolling => {
                // Random walk over everything but the workshop itself
                let options: Vec<Room> = map::neighbors(self.room)
                    .into_iter()
                    .filter(|&r| r != Room::Workshop)
                    .collect();
                if let Some(&next) = options.choose(&mut world.rng) {
                    self.room = next;
                }
                if matches!(self.room, Room::WestHall | Room::EastHall) {
                    tracing::debug!("Marksman sets up in {}", self.room.name());
                    self.state = MarksmanState::Aiming;
                    self.aim_progress = 0.0;
                    self.hits_taken = 0;
                    events.push(EncounterEvent::EnemyReachedDoor {
                        archetype: Archetype::Marksman,
                        room: self.room,
                    });
                }
            }
            MarksmanState::Aiming => unreachable!("aiming handled above"),
        }
        None
    }

    /// The charge filled. Lethal if the player is home; otherwise the
    /// turret pays instead and the Marksman is exiled to an inner room.
    fn land_headshot(
        &mut self,
        world: &mut WorldState,
        config: &EncounterConfig,
        events: &mut Vec<EncounterEvent>,
    ) -> Option<DefeatReason> {
        if !world.teleport.is_teleported() {
            events.push(EncounterEvent::EnemyAttackStarted {
                archetype: Archetype::Marksman,
            });
            return Some(DefeatReason::MarksmanShot);
        }
        tracing::info!("Marksman headshot spent on the turret");
        if world.turret.exists()
            && world.turret.take_damage(world.turret.hp()) == DamageOutcome::Destroyed
        {
            events.push(EncounterEvent::TurretDestroyed);
        }
        self.room = *INNER_ROOMS
            .choose(&mut world.rng)
            .expect("inner rooms are non-empty");
        self.state = MarksmanState::Patrolling;
        self.aim_progress = 0.0;
        self.hits_taken = 0;
        self.move_timer = config.marksman_move_interval;
        None
    }

    /// Register one successful turret hit while aiming. Two are always
    /// required regardless of turret level.
    pub fn register_hit(&mut self, config: &EncounterConfig) -> MarksmanHit {
        debug_assert!(self.is_aiming(), "hit registered outside an aim");
        self.hits_taken += 1;
        if self.hits_taken >= config.marksman_hits_to_repel {
            self.state = MarksmanState::Patrolling;
            self.aim_progress = 0.0;
            self.hits_taken = 0;
            self.move_timer = config.marksman_move_interval;
            tracing::debug!("Marksman repelled");
            MarksmanHit::Repelled
        } else {
            MarksmanHit::Absorbed
        }
    }

    pub fn force_despawn(&mut self) {
        self.active = false;
    }

    pub fn respawn(&mut self, config: &EncounterConfig, rng: &mut ChaCha8Rng) {
        self.active = true;
        self.state = MarksmanState::Patrolling;
        self.room = *INNER_ROOMS.choose(rng).expect("inner rooms are non-empty");
        self.aim_progress = 0.0;
        self.hits_taken = 0;
        self.move_timer = config.marksman_move_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cameras::CameraNetwork;
    use crate::economy::MetalReserve;
    use crate::teleport::TeleportController;
    use crate::turret::Turret;
    use rand_chacha::rand_core::SeedableRng;

    fn world_with_turret() -> (WorldState, EncounterConfig) {
        let config = EncounterConfig::default();
        let mut world = WorldState {
            metal: MetalReserve::new(config.metal_start, config.metal_max),
            turret: Turret::new(),
            cameras: CameraNetwork::new(),
            teleport: TeleportController::new(),
            rng: ChaCha8Rng::seed_from_u64(5),
            now: 0.0,
        };
        world.turret.build(&mut world.metal, &config).unwrap();
        (world, config)
    }

    fn aiming_marksman(room: Room) -> (Marksman, EncounterConfig) {
        let config = EncounterConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut marksman = Marksman::new(&config, &mut rng);
        marksman.state = MarksmanState::Aiming;
        marksman.room = room;
        marksman.aim_progress = 0.0;
        marksman.hits_taken = 0;
        (marksman, config)
    }

    #[test]
    fn test_wanders_until_it_finds_a_hallway() {
        let (mut world, config) = world_with_turret();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut marksman = Marksman::new(&config, &mut rng);
        let mut events = Vec::new();
        for _ in 0..10_000 {
            marksman.update(&mut world, &config, 1.0, &mut events);
            if marksman.is_aiming() {
                break;
            }
        }
        assert!(marksman.is_aiming(), "never reached a hallway");
        assert!(matches!(
            marksman.current_room(),
            Some(Room::WestHall | Room::EastHall)
        ));
    }

    #[test]
    fn test_second_hit_repels() {
        let (mut marksman, config) = aiming_marksman(Room::WestHall);
        assert_eq!(marksman.register_hit(&config), MarksmanHit::Absorbed);
        assert!(marksman.is_aiming(), "one hit must not repel");
        assert_eq!(marksman.register_hit(&config), MarksmanHit::Repelled);
        assert!(!marksman.is_aiming());
    }

    #[test]
    fn test_respawn_rearms_the_move_timer() {
        let (mut world, config) = world_with_turret();
        let mut marksman = Marksman::new(&config, &mut world.rng);
        marksman.force_despawn();
        marksman.respawn(&config, &mut world.rng);
        let spawn_room = marksman.current_room();

        let mut events = Vec::new();
        for _ in 0..(config.marksman_move_interval as u32 - 1) {
            marksman.update(&mut world, &config, 1.0, &mut events);
            assert_eq!(marksman.current_room(), spawn_room);
        }
        marksman.update(&mut world, &config, 1.0, &mut events);
        assert_ne!(marksman.current_room(), spawn_room);
    }

    #[test]
    fn test_headshot_with_player_home_is_fatal() {
        let (mut world, config) = world_with_turret();
        let (mut marksman, _) = aiming_marksman(Room::EastHall);
        let mut events = Vec::new();
        let mut defeat = None;
        for _ in 0..(config.marksman_aim_duration as u32 + 1) {
            defeat = marksman.update(&mut world, &config, 1.0, &mut events);
            if defeat.is_some() {
                break;
            }
        }
        assert_eq!(defeat, Some(DefeatReason::MarksmanShot));
    }

    #[test]
    fn test_headshot_with_player_away_trades_the_turret() {
        let (mut world, config) = world_with_turret();
        world.teleport.teleport_to(Room::Cellar, None).unwrap();
        let (mut marksman, _) = aiming_marksman(Room::EastHall);

        let mut events = Vec::new();
        for _ in 0..(config.marksman_aim_duration as u32 + 1) {
            assert_eq!(marksman.update(&mut world, &config, 1.0, &mut events), None);
        }
        assert!(!world.turret.exists());
        assert!(events.contains(&EncounterEvent::TurretDestroyed));
        // Exiled off the hallway with a clean slate
        assert!(!marksman.is_aiming());
        assert!(INNER_ROOMS.contains(&marksman.current_room().unwrap()));
    }

    #[test]
    fn test_lure_interrupts_an_aim_and_clears_hits() {
        let (mut world, config) = world_with_turret();
        world.teleport.teleport_to(Room::Atrium, None).unwrap();
        world.teleport.place_lure().unwrap();
        world.teleport.play_lure(1e6).unwrap();

        // Atrium lure is adjacent to the west hallway
        let (mut marksman, _) = aiming_marksman(Room::WestHall);
        marksman.register_hit(&config);
        let mut events = Vec::new();
        marksman.update(&mut world, &config, 1.0, &mut events);
        assert!(marksman.is_lured());
        assert_eq!(marksman.hits_taken, 0);
    }
}
