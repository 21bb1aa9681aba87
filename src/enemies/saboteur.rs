//! Saboteur - dual persistent mode, no lethal attack
//!
//! One timer flips it between two lives. Disguised, it impersonates one of
//! the other five archetypes at a random camera room, relocating often;
//! dressed as a Juggernaut or Marksman it even shows a fake watch meter
//! that fills like the real thing and destroys nothing - a deliberate red
//! herring. In sapping mode it waits for the player to teleport away and
//! may slap a sap on the turret: a drain that survives every later mode
//! flip and only comes off under a rapid burst of removal presses.

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::error::{ActionError, ActionResult};
use crate::core::types::{Archetype, Room};
use crate::events::{DefeatReason, EncounterEvent};
use crate::turret::DamageOutcome;
use crate::world::WorldState;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaboteurMode {
    Disguise,
    Sapping,
}

/// The five faces it can wear
const DISGUISES: [Archetype; 5] = [
    Archetype::Runner,
    Archetype::Sieger,
    Archetype::Specter,
    Archetype::Juggernaut,
    Archetype::Marksman,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saboteur {
    active: bool,
    mode: SaboteurMode,
    mode_timer: f32,
    room: Room,
    disguise: Archetype,
    relocate_timer: f32,
    /// Cosmetic only; saturates and never destroys anything
    fake_watch: f32,
    sapped: bool,
    sap_presses: u32,
    /// Rolling window left for the next removal press
    sap_press_timer: f32,
    /// Fractional sap damage carried between ticks
    sap_drain_accum: f32,
}

impl Saboteur {
    pub fn new(config: &EncounterConfig, rng: &mut ChaCha8Rng) -> Self {
        Self {
            active: true,
            mode: SaboteurMode::Disguise,
            mode_timer: config.saboteur_mode_interval,
            room: *crate::map::CAMERA_ROOMS
                .choose(rng)
                .expect("camera rooms are non-empty"),
            disguise: *DISGUISES.choose(rng).expect("disguises are non-empty"),
            relocate_timer: config.saboteur_relocate_interval,
            fake_watch: 0.0,
            sapped: false,
            sap_presses: 0,
            sap_press_timer: 0.0,
            sap_drain_accum: 0.0,
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

    pub fn mode(&self) -> SaboteurMode {
        self.mode
    }

    /// The archetype currently impersonated (meaningful in Disguise mode)
    pub fn disguise(&self) -> Archetype {
        self.disguise
    }

    pub fn is_sapping(&self) -> bool {
        self.sapped
    }

    pub fn sap_presses(&self) -> u32 {
        self.sap_presses
    }

    /// Fake watch progress in [0, 1]; pure theater for the UI
    pub fn fake_watch_progress(&self, config: &EncounterConfig) -> f32 {
        (self.fake_watch / config.camera_watch_duration).min(1.0)
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

        // The mode flip never touches the sap; that persistence is the
        // whole point of the mechanic.
        self.mode_timer -= delta;
        if self.mode_timer <= 0.0 {
            self.mode_timer += config.saboteur_mode_interval;
            self.mode = match self.mode {
                SaboteurMode::Disguise => SaboteurMode::Sapping,
                SaboteurMode::Sapping => {
                    self.wear_new_disguise(&mut world.rng);
                    SaboteurMode::Disguise
                }
            };
            tracing::debug!("Saboteur mode is now {:?}", self.mode);
        }

        if self.mode == SaboteurMode::Disguise {
            self.relocate_timer -= delta;
            if self.relocate_timer <= 0.0 {
                self.relocate_timer += config.saboteur_relocate_interval;
                self.wear_new_disguise(&mut world.rng);
            }
            // Fake watch fills only under the costumes that have a real
            // counterpart meter.
            let mimics_destroyer =
                matches!(self.disguise, Archetype::Juggernaut | Archetype::Marksman);
            if mimics_destroyer && world.cameras.is_watched(self.room) {
                self.fake_watch = (self.fake_watch + delta).min(config.camera_watch_duration);
            }
        }

        // Sap upkeep runs in both modes.
        if self.sapped {
            if self.sap_presses > 0 {
                self.sap_press_timer -= delta;
                if self.sap_press_timer <= 0.0 {
                    // Incomplete removal sequence timed out
                    self.sap_presses = 0;
                }
            }
            if world.turret.exists() {
                self.sap_drain_accum += config.sap_drain_rate * delta;
                let whole = self.sap_drain_accum.floor() as u32;
                if whole > 0 {
                    self.sap_drain_accum -= whole as f32;
                    match world.turret.take_damage(whole) {
                        DamageOutcome::Damaged => {
                            events.push(EncounterEvent::TurretDamaged {
                                hp: world.turret.hp(),
                                by: Archetype::Saboteur,
                            });
                        }
                        DamageOutcome::Destroyed => {
                            events.push(EncounterEvent::TurretDestroyed);
                            // Nothing left to drain; the sap goes with the
                            // turret.
                            self.clear_sap();
                        }
                        DamageOutcome::NoTurret => {}
                    }
                }
            }
        }
        None
    }

    fn wear_new_disguise(&mut self, rng: &mut ChaCha8Rng) {
        self.room = *crate::map::CAMERA_ROOMS
            .choose(rng)
            .expect("camera rooms are non-empty");
        self.disguise = *DISGUISES.choose(rng).expect("disguises are non-empty");
        self.fake_watch = 0.0;
    }

    /// The player teleported away: the one trigger that can place a sap.
    /// Rejected outright in Disguise mode; in Sapping mode an unsapped
    /// turret gets sapped on a successful roll.
    pub fn on_player_teleported(
        &mut self,
        rng: &mut ChaCha8Rng,
        config: &EncounterConfig,
        events: &mut Vec<EncounterEvent>,
    ) {
        if !self.active || self.mode != SaboteurMode::Sapping || self.sapped {
            return;
        }
        if rng.gen_bool(config.saboteur_sap_chance) {
            self.sapped = true;
            self.sap_presses = 0;
            self.sap_press_timer = 0.0;
            self.sap_drain_accum = 0.0;
            tracing::info!("Sap placed on the turret");
            events.push(EncounterEvent::SapPlaced);
        }
    }

    /// One removal press. Enough presses inside the rolling window pull
    /// the sap off; a press against no sap is rejected.
    pub fn sap_input_pulse(
        &mut self,
        config: &EncounterConfig,
        events: &mut Vec<EncounterEvent>,
    ) -> ActionResult {
        if !self.sapped {
            return Err(ActionError::NoSapPresent);
        }
        self.sap_presses += 1;
        self.sap_press_timer = config.sap_input_timeout;
        if self.sap_presses >= config.sap_removal_presses {
            self.clear_sap();
            tracing::debug!("Sap removed");
            events.push(EncounterEvent::SapRemoved);
        }
        Ok(())
    }

    fn clear_sap(&mut self) {
        self.sapped = false;
        self.sap_presses = 0;
        self.sap_press_timer = 0.0;
        self.sap_drain_accum = 0.0;
    }

    pub fn force_despawn(&mut self) {
        self.active = false;
        self.clear_sap();
    }

    pub fn respawn(&mut self, rng: &mut ChaCha8Rng, config: &EncounterConfig) {
        self.active = true;
        self.mode = SaboteurMode::Disguise;
        self.mode_timer = config.saboteur_mode_interval;
        self.relocate_timer = config.saboteur_relocate_interval;
        self.wear_new_disguise(rng);
        self.clear_sap();
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
            rng: ChaCha8Rng::seed_from_u64(21),
            now: 0.0,
        };
        world.turret.build(&mut world.metal, &config).unwrap();
        (world, config)
    }

    fn saboteur_in_mode(mode: SaboteurMode) -> (Saboteur, EncounterConfig) {
        let config = EncounterConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut saboteur = Saboteur::new(&config, &mut rng);
        saboteur.mode = mode;
        (saboteur, config)
    }

    /// Roll teleport triggers until one lands a sap
    fn place_sap(saboteur: &mut Saboteur, world: &mut WorldState, config: &EncounterConfig) {
        let mut events = Vec::new();
        for _ in 0..200 {
            saboteur.on_player_teleported(&mut world.rng, config, &mut events);
            if saboteur.is_sapping() {
                return;
            }
        }
        panic!("sap never placed in 200 rolls");
    }

    #[test]
    fn test_sap_rejected_in_disguise_mode() {
        let (mut saboteur, config) = saboteur_in_mode(SaboteurMode::Disguise);
        let (mut world, _) = world_with_turret();
        let mut events = Vec::new();
        for _ in 0..200 {
            saboteur.on_player_teleported(&mut world.rng, &config, &mut events);
        }
        assert!(!saboteur.is_sapping());
        assert!(events.is_empty());
    }

    #[test]
    fn test_sap_survives_mode_toggles() {
        let (mut saboteur, config) = saboteur_in_mode(SaboteurMode::Sapping);
        let (mut world, _) = world_with_turret();
        place_sap(&mut saboteur, &mut world, &config);

        // Run through two full mode flips, short enough that the drain
        // cannot finish the turret off and clear the sap that way
        let mut events = Vec::new();
        let run_secs = config.saboteur_mode_interval * 2.0 + 1.0;
        let mut elapsed = 0.0;
        while elapsed < run_secs {
            saboteur.update(&mut world, &config, 0.5, &mut events);
            elapsed += 0.5;
        }
        assert!(world.turret.exists(), "drain outlasted the turret");
        assert!(saboteur.is_sapping(), "mode flip cleared the sap");
    }

    #[test]
    fn test_sap_drains_the_turret() {
        let (mut saboteur, config) = saboteur_in_mode(SaboteurMode::Sapping);
        let (mut world, _) = world_with_turret();
        place_sap(&mut saboteur, &mut world, &config);

        let hp_before = world.turret.hp();
        let mut events = Vec::new();
        for _ in 0..10 {
            saboteur.update(&mut world, &config, 1.0, &mut events);
        }
        let drained = hp_before - world.turret.hp();
        assert_eq!(drained, (config.sap_drain_rate * 10.0) as u32);
    }

    #[test]
    fn test_rapid_presses_remove_the_sap() {
        let (mut saboteur, config) = saboteur_in_mode(SaboteurMode::Sapping);
        let (mut world, _) = world_with_turret();
        place_sap(&mut saboteur, &mut world, &config);

        let mut events = Vec::new();
        for _ in 0..config.sap_removal_presses {
            saboteur.sap_input_pulse(&config, &mut events).unwrap();
        }
        assert!(!saboteur.is_sapping());
        assert!(events.contains(&EncounterEvent::SapRemoved));
        // A press with no sap present is rejected
        assert_eq!(
            saboteur.sap_input_pulse(&config, &mut events),
            Err(ActionError::NoSapPresent)
        );
    }

    #[test]
    fn test_slow_presses_time_out_and_reset() {
        let (mut saboteur, config) = saboteur_in_mode(SaboteurMode::Sapping);
        let (mut world, _) = world_with_turret();
        place_sap(&mut saboteur, &mut world, &config);

        let mut events = Vec::new();
        for _ in 0..(config.sap_removal_presses - 1) {
            saboteur.sap_input_pulse(&config, &mut events).unwrap();
        }
        // Let the rolling window lapse
        saboteur.update(&mut world, &config, config.sap_input_timeout + 0.1, &mut events);
        assert_eq!(saboteur.sap_presses(), 0);
        assert!(saboteur.is_sapping());
    }

    #[test]
    fn test_fake_watch_never_destroys_a_camera() {
        let (mut saboteur, config) = saboteur_in_mode(SaboteurMode::Disguise);
        let (mut world, _) = world_with_turret();
        saboteur.disguise = Archetype::Juggernaut;
        saboteur.room = Room::Atrium;
        saboteur.relocate_timer = f32::MAX;
        saboteur.mode_timer = f32::MAX;
        world.cameras.toggle_panel();
        world.cameras.select(Room::Atrium).unwrap();

        let mut events = Vec::new();
        for _ in 0..100 {
            saboteur.update(&mut world, &config, 1.0, &mut events);
        }
        assert_eq!(saboteur.fake_watch_progress(&config), 1.0);
        assert!(!world.cameras.state(Room::Atrium).unwrap().destroyed);
        assert!(events.is_empty());
    }
}
