//! Inbound player controls
//!
//! Every control validates, mutates synchronously, and returns a result.
//! Rejections also surface as `ActionRejected` events in the next tick's
//! batch so the UI can buzz without plumbing return values everywhere.
//! Once the encounter is terminal every control is an accepted no-op.

use crate::core::error::{ActionError, ActionResult};
use crate::core::types::{Archetype, DoorSide, Room};
use crate::enemies::{EnemyAgent, MarksmanHit};
use crate::events::{DefeatReason, EncounterEvent};
use crate::teleport::TeleportOutcome;

use super::{Encounter, EncounterStatus};

/// What a fired shot accomplished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Hit(Archetype),
    Miss,
}

impl Encounter {
    /// Record a rejection for the UI and pass the error through
    fn noted(&mut self, result: ActionResult) -> ActionResult {
        if let Err(reason) = result {
            self.pending.push(EncounterEvent::ActionRejected { reason });
        }
        result
    }

    fn lose_from_control(&mut self, reason: DefeatReason) {
        tracing::info!("Encounter lost: {:?}", reason);
        self.status = EncounterStatus::Lost(reason);
        self.pending.push(EncounterEvent::GameOver { reason });
    }

    pub fn build_turret(&mut self) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self.world.turret.build(&mut self.world.metal, &self.config);
        self.noted(result)
    }

    pub fn upgrade_turret(&mut self) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self
            .world
            .turret
            .upgrade(&mut self.world.metal, &self.config);
        self.noted(result)
    }

    /// Restore hit points up to the per-action cap; returns the amount
    /// restored
    pub fn repair_turret(&mut self) -> Result<u32, ActionError> {
        if self.is_over() {
            return Ok(0);
        }
        let result = self.world.turret.repair(&mut self.world.metal, &self.config);
        if let Err(reason) = result {
            self.pending.push(EncounterEvent::ActionRejected { reason });
        }
        result
    }

    /// Take or release manual control of the turret. Releasing also drops
    /// the aim, which resumes metal regeneration.
    pub fn set_wrangled(&mut self, wrangled: bool) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self.world.turret.set_wrangled(wrangled);
        self.noted(result)
    }

    pub fn set_aim(&mut self, aim: DoorSide) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self.world.turret.set_aim(aim);
        self.noted(result)
    }

    /// Fire the wrangled turret at its aimed door. The shot is paid for
    /// whether or not it connects; the judgment checks which intruders are
    /// threatening that door right now, in update order.
    pub fn fire(&mut self) -> Result<FireOutcome, ActionError> {
        if self.is_over() {
            return Ok(FireOutcome::Miss);
        }
        if let Err(reason) = self
            .world
            .turret
            .pay_for_shot(&mut self.world.metal, &self.config)
        {
            self.pending.push(EncounterEvent::ActionRejected { reason });
            return Err(reason);
        }
        let Some(hallway) = self.world.turret.aim().hallway() else {
            return Ok(FireOutcome::Miss);
        };
        Ok(self.judge_shot(hallway))
    }

    fn judge_shot(&mut self, hallway: Room) -> FireOutcome {
        let config = &self.config;
        for agent in self.agents.iter_mut() {
            match agent {
                EnemyAgent::Runner(runner)
                    if hallway == Room::WestHall && runner.is_waiting_at_door() =>
                {
                    runner.drive_away(config);
                    self.world.metal.deposit(config.runner_bounty);
                    self.pending.push(EncounterEvent::EnemyDrivenAway {
                        archetype: Archetype::Runner,
                        bounty: config.runner_bounty,
                    });
                    return FireOutcome::Hit(Archetype::Runner);
                }
                EnemyAgent::Sieger(sieger)
                    if hallway == Room::EastHall && sieger.is_threatening_door() =>
                {
                    sieger.drive_away(config);
                    self.world.metal.deposit(config.sieger_bounty);
                    self.pending.push(EncounterEvent::EnemyDrivenAway {
                        archetype: Archetype::Sieger,
                        bounty: config.sieger_bounty,
                    });
                    return FireOutcome::Hit(Archetype::Sieger);
                }
                EnemyAgent::Specter(specter)
                    if hallway == Room::WestHall && specter.is_attackable() =>
                {
                    specter.deter(config);
                    self.world.metal.deposit(config.specter_bounty);
                    self.pending.push(EncounterEvent::EnemyDrivenAway {
                        archetype: Archetype::Specter,
                        bounty: config.specter_bounty,
                    });
                    return FireOutcome::Hit(Archetype::Specter);
                }
                EnemyAgent::Marksman(marksman)
                    if marksman.is_threatening_hallway(hallway) =>
                {
                    // First hit lands silently; the repelling hit is the
                    // only one worth announcing
                    if marksman.register_hit(config) == MarksmanHit::Repelled {
                        self.pending.push(EncounterEvent::EnemyDrivenAway {
                            archetype: Archetype::Marksman,
                            bounty: 0.0,
                        });
                    }
                    return FireOutcome::Hit(Archetype::Marksman);
                }
                _ => {}
            }
        }
        FireOutcome::Miss
    }

    pub fn toggle_camera_panel(&mut self) {
        if self.is_over() {
            return;
        }
        self.world.cameras.toggle_panel();
    }

    pub fn select_camera(&mut self, room: Room) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self.world.cameras.select(room);
        self.noted(result)
    }

    /// Bring a destroyed feed back. Remote repair costs metal; hands-on
    /// repair is free but only reachable while teleported into that room.
    pub fn repair_camera(&mut self, room: Room, remote: bool) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self.try_repair_camera(room, remote);
        self.noted(result)
    }

    fn try_repair_camera(&mut self, room: Room, remote: bool) -> ActionResult {
        let state = self
            .world
            .cameras
            .state(room)
            .ok_or(ActionError::NoCameraInRoom(room))?;
        if !state.destroyed {
            return Err(ActionError::CameraNotDestroyed(room));
        }
        if remote {
            if !self.world.metal.withdraw(self.config.camera_remote_repair_cost) {
                return Err(ActionError::InsufficientMetal);
            }
        } else if !self.world.teleport.is_teleported()
            || self.world.teleport.current_room() != room
        {
            return Err(ActionError::CameraOutOfReach(room));
        }
        self.world.cameras.repair(room)?;
        self.pending.push(EncounterEvent::CameraRepaired { room });
        Ok(())
    }

    /// Drop a lure in the currently projected room. All-or-nothing on the
    /// cost; an invalid placement charges nothing.
    pub fn place_lure(&mut self) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self.try_place_lure();
        self.noted(result)
    }

    fn try_place_lure(&mut self) -> ActionResult {
        if self.world.metal.metal() < self.config.lure_cost {
            return Err(ActionError::InsufficientMetal);
        }
        self.world.teleport.place_lure()?;
        self.world.metal.withdraw(self.config.lure_cost);
        Ok(())
    }

    pub fn play_lure(&mut self) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let result = self.world.teleport.play_lure(self.config.lure_play_duration);
        self.noted(result)
    }

    /// Project to `room`. Arriving on top of an intruder ends the night.
    pub fn teleport_to(&mut self, room: Room) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let occupant = self.occupant_of(room);
        let outcome = self.world.teleport.teleport_to(room, occupant);
        match outcome {
            Ok(TeleportOutcome::Moved) => {
                if let Some(saboteur) =
                    self.agents.iter_mut().find_map(EnemyAgent::as_saboteur_mut)
                {
                    saboteur.on_player_teleported(
                        &mut self.world.rng,
                        &self.config,
                        &mut self.pending,
                    );
                }
                Ok(())
            }
            Ok(TeleportOutcome::Lethal(archetype)) => {
                self.lose_from_control(DefeatReason::TeleportedIntoEnemy(archetype));
                Ok(())
            }
            Err(reason) => self.noted(Err(reason)),
        }
    }

    /// Snap back to the workshop. Lethal if the Juggernaut got there first
    /// and is waiting.
    pub fn return_home(&mut self) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let waiting = self
            .agents
            .iter()
            .find_map(EnemyAgent::as_juggernaut)
            .filter(|j| j.is_waiting_at_home())
            .map(|_| Archetype::Juggernaut);
        match self.world.teleport.return_home(waiting) {
            Ok(TeleportOutcome::Moved) => Ok(()),
            Ok(TeleportOutcome::Lethal(_)) => {
                self.lose_from_control(DefeatReason::JuggernautArrival);
                Ok(())
            }
            Err(reason) => self.noted(Err(reason)),
        }
    }

    /// One sap-removal press
    pub fn sap_input_pulse(&mut self) -> ActionResult {
        if self.is_over() {
            return Ok(());
        }
        let Some(saboteur) = self.agents.iter_mut().find_map(EnemyAgent::as_saboteur_mut)
        else {
            return Err(ActionError::NoSapPresent);
        };
        let result = saboteur.sap_input_pulse(&self.config, &mut self.pending);
        if let Err(reason) = result {
            self.pending.push(EncounterEvent::ActionRejected { reason });
        }
        result
    }

    /// Enable or disable one intruder variant. Disabling despawns it
    /// immediately; re-enabling puts it back at its spawn.
    pub fn set_variant_enabled(&mut self, archetype: Archetype, enabled: bool) {
        if let Some(agent) = self
            .agents
            .iter_mut()
            .find(|a| a.archetype() == archetype)
        {
            if !enabled {
                agent.force_despawn();
            } else if !agent.is_active() {
                agent.respawn(&mut self.world, &self.config);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EncounterConfig;

    fn encounter() -> Encounter {
        Encounter::new(EncounterConfig::default())
    }

    /// Keep only one variant on the map so its behavior is isolated
    fn solo(enc: &mut Encounter, keep: Archetype) {
        for archetype in Archetype::ALL {
            if archetype != keep {
                enc.set_variant_enabled(archetype, false);
            }
        }
    }

    #[test]
    fn test_rejected_action_surfaces_as_event() {
        let mut enc = encounter();
        assert_eq!(enc.repair_turret(), Err(ActionError::TurretMissing));
        let events = enc.tick(0.0);
        assert!(events.contains(&EncounterEvent::ActionRejected {
            reason: ActionError::TurretMissing,
        }));
    }

    #[test]
    fn test_fire_requires_wrangle_and_aim() {
        let mut enc = encounter();
        enc.build_turret().unwrap();
        assert_eq!(enc.fire(), Err(ActionError::NotWrangled));
        enc.set_wrangled(true).unwrap();
        assert_eq!(enc.fire(), Err(ActionError::NotAimedAtDoor));
        enc.set_aim(DoorSide::Left).unwrap();
        let metal = enc.metal();
        assert_eq!(enc.fire(), Ok(FireOutcome::Miss));
        assert_eq!(enc.metal(), metal - enc.config().turret_fire_cost);
    }

    #[test]
    fn test_fire_repels_a_waiting_runner_for_bounty() {
        let mut enc = encounter();
        solo(&mut enc, Archetype::Runner);
        enc.build_turret().unwrap();
        enc.set_wrangled(true).unwrap();
        enc.set_aim(DoorSide::Left).unwrap();
        // Manual aim pauses regeneration, so metal only moves on actions
        let mut waited = false;
        for _ in 0..120 {
            let events = enc.tick(1.0);
            if events.iter().any(|e| {
                matches!(
                    e,
                    EncounterEvent::EnemyReachedDoor {
                        archetype: Archetype::Runner,
                        ..
                    }
                )
            }) {
                waited = true;
                break;
            }
        }
        assert!(waited, "the Runner never reached the door");
        let before = enc.metal();
        assert_eq!(enc.fire(), Ok(FireOutcome::Hit(Archetype::Runner)));
        let config = enc.config().clone();
        assert_eq!(
            enc.metal(),
            before - config.turret_fire_cost + config.runner_bounty
        );
    }

    #[test]
    fn test_lure_placement_is_all_or_nothing() {
        let mut enc = encounter();
        solo(&mut enc, Archetype::Runner);
        // Not teleported: no charge on the rejection
        let metal = enc.metal();
        assert_eq!(enc.place_lure(), Err(ActionError::LureRequiresAway));
        assert_eq!(enc.metal(), metal);

        enc.teleport_to(Room::Atrium).unwrap();
        assert_eq!(enc.place_lure(), Ok(()));
        assert_eq!(enc.metal(), metal - enc.config().lure_cost);
        assert_eq!(enc.place_lure(), Err(ActionError::LureAlreadyPlaced));
    }

    #[test]
    fn test_remote_camera_repair_charges_metal() {
        let mut enc = encounter();
        // No feed is down yet
        assert_eq!(
            enc.repair_camera(Room::Kitchen, true),
            Err(ActionError::CameraNotDestroyed(Room::Kitchen))
        );
        assert_eq!(
            enc.repair_camera(Room::Workshop, true),
            Err(ActionError::NoCameraInRoom(Room::Workshop))
        );
    }

    #[test]
    fn test_teleport_into_occupied_room_is_lethal() {
        let mut enc = encounter();
        solo(&mut enc, Archetype::Juggernaut);
        enc.build_turret().unwrap();
        // The Juggernaut starts its patrol in the cellar
        enc.tick(0.1);
        let room = enc
            .enemy_room(Archetype::Juggernaut)
            .expect("Juggernaut should be on the map");
        enc.teleport_to(room).unwrap();
        assert_eq!(
            enc.status(),
            EncounterStatus::Lost(DefeatReason::TeleportedIntoEnemy(Archetype::Juggernaut))
        );
        let events = enc.tick(1.0);
        assert!(events.iter().any(|e| matches!(
            e,
            EncounterEvent::GameOver {
                reason: DefeatReason::TeleportedIntoEnemy(_)
            }
        )));
    }

    #[test]
    fn test_disabled_variant_leaves_the_map() {
        let mut enc = encounter();
        enc.build_turret().unwrap();
        enc.set_variant_enabled(Archetype::Runner, false);
        enc.tick(0.1);
        assert!(enc.enemy_room(Archetype::Runner).is_none());
        enc.set_variant_enabled(Archetype::Runner, true);
        enc.tick(0.1);
        assert!(enc.enemy_room(Archetype::Runner).is_some());
    }
}
