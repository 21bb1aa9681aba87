//! The turret - the single defensible asset
//!
//! Built, repaired and upgraded out of the metal reserve; destroyed when
//! its hit points reach zero, after which it must be rebuilt from scratch.
//! "Wrangled" is manual-control mode: while wrangled the player aims it at
//! one of the two workshop doors and fires shots by hand, at the price of
//! paused metal regeneration.

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::error::{ActionError, ActionResult};
use crate::core::types::DoorSide;
use crate::economy::MetalReserve;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Turret {
    exists: bool,
    level: u8,
    hp: u32,
    wrangled: bool,
    aim: DoorSide,
}

/// What `take_damage` did to the turret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// No turret existed; nothing happened
    NoTurret,
    /// Hp reduced, turret still standing
    Damaged,
    /// Hp reached zero; turret is gone
    Destroyed,
}

impl Turret {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Max hit points at the current level, 0 when no turret exists
    pub fn max_hp(&self, config: &EncounterConfig) -> u32 {
        if self.exists {
            config.turret_max_hp[(self.level - 1) as usize]
        } else {
            0
        }
    }

    pub fn is_wrangled(&self) -> bool {
        self.wrangled
    }

    pub fn aim(&self) -> DoorSide {
        self.aim
    }

    /// True while the turret is under manual aim at a door; this is the
    /// condition that pauses metal regeneration.
    pub fn is_manually_aimed(&self) -> bool {
        self.wrangled && self.aim != DoorSide::None
    }

    /// Build a level-1 turret at the build cost
    pub fn build(&mut self, reserve: &mut MetalReserve, config: &EncounterConfig) -> ActionResult {
        if self.exists {
            return Err(ActionError::TurretAlreadyBuilt);
        }
        if !reserve.withdraw(config.turret_build_cost) {
            return Err(ActionError::InsufficientMetal);
        }
        self.exists = true;
        self.level = 1;
        self.hp = config.turret_max_hp[0];
        self.wrangled = false;
        self.aim = DoorSide::None;
        tracing::info!("Turret built at level 1 ({} hp)", self.hp);
        Ok(())
    }

    /// Level up: full health and a sufficient balance required
    pub fn upgrade(&mut self, reserve: &mut MetalReserve, config: &EncounterConfig) -> ActionResult {
        if !self.exists {
            return Err(ActionError::TurretMissing);
        }
        if self.level >= 3 {
            return Err(ActionError::TurretMaxLevel);
        }
        if self.hp < self.max_hp(config) {
            return Err(ActionError::TurretNotFullHealth);
        }
        if !reserve.withdraw(config.turret_upgrade_cost) {
            return Err(ActionError::InsufficientMetal);
        }
        self.level += 1;
        self.hp = self.max_hp(config);
        tracing::info!("Turret upgraded to level {} ({} hp)", self.level, self.hp);
        Ok(())
    }

    /// Repair up to the per-action cap; partial repairs succeed. Returns
    /// the hit points restored.
    pub fn repair(
        &mut self,
        reserve: &mut MetalReserve,
        config: &EncounterConfig,
    ) -> Result<u32, ActionError> {
        if !self.exists {
            return Err(ActionError::TurretMissing);
        }
        let missing = self.max_hp(config) - self.hp;
        if missing == 0 {
            return Err(ActionError::TurretAlreadyFull);
        }
        let restored = reserve.withdraw_for_repair(
            missing,
            config.turret_repair_cost_per_hp,
            config.turret_repair_cap,
        );
        if restored == 0 {
            return Err(ActionError::InsufficientMetal);
        }
        self.hp += restored;
        Ok(restored)
    }

    /// Apply damage, saturating at zero. At zero the turret is destroyed:
    /// existence, wrangle and aim all clear. The caller must propagate a
    /// destruction to any sieging intruder within the same tick.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.exists {
            return DamageOutcome::NoTurret;
        }
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.exists = false;
            self.level = 0;
            self.wrangled = false;
            self.aim = DoorSide::None;
            tracing::info!("Turret destroyed");
            DamageOutcome::Destroyed
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Toggle manual control. Dropping the wrangle clears the aim so the
    /// aim-implies-wrangled invariant holds.
    pub fn set_wrangled(&mut self, wrangled: bool) -> ActionResult {
        if !self.exists {
            return Err(ActionError::TurretMissing);
        }
        self.wrangled = wrangled;
        if !wrangled {
            self.aim = DoorSide::None;
        }
        Ok(())
    }

    /// Aim at a door; only meaningful while wrangled
    pub fn set_aim(&mut self, aim: DoorSide) -> ActionResult {
        if !self.exists {
            return Err(ActionError::TurretMissing);
        }
        if !self.wrangled {
            return Err(ActionError::NotWrangled);
        }
        self.aim = aim;
        Ok(())
    }

    /// Validate and pay for one manual shot. The hit judgment against the
    /// intruders at the aimed door belongs to the orchestrator; this only
    /// checks wrangle, aim and funds.
    pub fn pay_for_shot(
        &self,
        reserve: &mut MetalReserve,
        config: &EncounterConfig,
    ) -> ActionResult {
        if !self.exists {
            return Err(ActionError::TurretMissing);
        }
        if !self.wrangled {
            return Err(ActionError::NotWrangled);
        }
        if self.aim == DoorSide::None {
            return Err(ActionError::NotAimedAtDoor);
        }
        if !reserve.withdraw(config.turret_fire_cost) {
            return Err(ActionError::InsufficientMetal);
        }
        Ok(())
    }
}
