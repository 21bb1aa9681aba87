//! Encounter configuration with documented constants
//!
//! All tuning numbers are collected here with explanations of their purpose
//! and how they interact. The defaults produce a winnable but tense night;
//! changing them changes pacing, not correctness.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for one encounter (one night)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Seed for the encounter RNG
    ///
    /// Every random decision (Marksman walk, Saboteur disguise/relocation,
    /// sap roll, Specter head roaming) draws from one ChaCha8 stream seeded
    /// here, so a night replays deterministically.
    pub seed: u64,

    // === CLOCK ===
    /// Real seconds per game minute
    ///
    /// The night is 360 game minutes; at the default 1.0 a full night lasts
    /// six real minutes. Purely a pacing knob.
    pub seconds_per_minute: f32,

    // === ECONOMY ===
    /// Upper bound on stored metal
    pub metal_max: f32,

    /// Metal regenerated per second while regeneration is not paused
    ///
    /// Regeneration pauses while the turret is wrangled-and-aimed or the
    /// player is teleported away, so active defense trades income for
    /// control.
    pub metal_regen_rate: f32,

    /// Metal the player starts the night with
    pub metal_start: f32,

    /// Cost of building the turret
    pub turret_build_cost: f32,

    /// Cost per hit point of turret repair
    pub turret_repair_cost_per_hp: f32,

    /// Most hit points a single repair action may restore
    ///
    /// Keeps repair a running commitment under siege fire instead of one
    /// top-up.
    pub turret_repair_cap: u32,

    /// Cost of a turret level upgrade
    pub turret_upgrade_cost: f32,

    /// Cost of one manual turret shot
    pub turret_fire_cost: f32,

    /// Cost of placing a lure
    pub lure_cost: f32,

    /// Cost of repairing a destroyed camera remotely
    ///
    /// On-site repair (player teleported into the camera's room) is free.
    pub camera_remote_repair_cost: f32,

    // === TURRET ===
    /// Max hit points by level (levels 1..=3)
    pub turret_max_hp: [u32; 3],

    /// Metal bounty for repelling a Runner with a manual shot
    pub runner_bounty: f32,

    /// Metal bounty for repelling a Sieger with a manual shot
    pub sieger_bounty: f32,

    /// Metal bounty for deterring a materialized Specter
    ///
    /// Larger than the Runner/Sieger bounties: the hit window is only the
    /// last quarter of the charge.
    pub specter_bounty: f32,

    // === AUTO-DEFENSE ===
    /// Seconds a Runner must wait at a door before an unwrangled turret
    /// fires on its own
    pub auto_defense_delay: f32,

    /// Damage the turret does to itself on an auto-defense shot
    ///
    /// This is the sacrifice: left alone the turret keeps the door shut but
    /// grinds itself down, and the final shot can destroy it.
    pub auto_defense_self_damage: u32,

    // === RUNNER ===
    /// Seconds per hop along the Runner's path
    pub runner_hop_interval: f32,

    /// Seconds a repelled Runner stays despawned before restarting
    pub runner_respawn_delay: f32,

    // === SIEGER ===
    /// Seconds per hop along the Sieger's path (slower than the Runner)
    pub sieger_hop_interval: f32,

    /// Seconds between siege rockets
    pub sieger_shot_interval: f32,

    /// Flat turret damage per siege rocket
    pub sieger_shot_damage: u32,

    /// Seconds of breach grace period once the sieged door is undefended
    pub sieger_breach_duration: f32,

    /// Seconds a repelled Sieger stays despawned before restarting
    pub sieger_respawn_delay: f32,

    // === SPECTER ===
    /// Seconds between the Specter body's idle-patrol moves
    pub specter_patrol_interval: f32,

    /// Seconds of idle patrol before the body is ready to charge
    ///
    /// A watched head stalls readiness from converting into a charge, so
    /// continuous observation delays the attack indefinitely.
    pub specter_charge_cooldown: f32,

    /// Total seconds of the charge window
    ///
    /// The first 75% is approach glow (not materialized, unhittable by
    /// rule); the final 25% is materialized and attackable.
    pub specter_charge_duration: f32,

    /// Fraction of the charge window at which the body materializes
    pub specter_materialize_fraction: f32,

    /// Seconds between head relocations
    pub specter_head_interval: f32,

    /// Seconds a deterred Specter stays despawned before restarting
    pub specter_respawn_delay: f32,

    // === JUGGERNAUT ===
    /// Seconds per hop along the Juggernaut's path
    pub juggernaut_hop_interval: f32,

    // === MARKSMAN ===
    /// Seconds between the Marksman's random-walk moves
    pub marksman_move_interval: f32,

    /// Seconds of uninterrupted hallway aim before the headshot lands
    pub marksman_aim_duration: f32,

    /// Successful hits required to repel an aiming Marksman
    ///
    /// Fixed at two regardless of turret level; the first hit is silent.
    pub marksman_hits_to_repel: u32,

    // === SABOTEUR ===
    /// Seconds between Disguise/Sapping mode toggles
    pub saboteur_mode_interval: f32,

    /// Seconds between relocations while disguised
    pub saboteur_relocate_interval: f32,

    /// Probability that a teleport-away event places a sap (Sapping mode,
    /// no existing sap)
    pub saboteur_sap_chance: f64,

    /// Turret hit points drained per second by an active sap
    pub sap_drain_rate: f32,

    /// Input pulses required to remove a sap
    pub sap_removal_presses: u32,

    /// Seconds allowed between consecutive removal pulses
    ///
    /// Letting the window elapse resets the press count to zero.
    pub sap_input_timeout: f32,

    // === CAMERAS ===
    /// Seconds of continuous watching (one destructive intruder on the
    /// feed) before the camera is destroyed
    ///
    /// Two destructive intruders on the same feed fill it at double rate.
    pub camera_watch_duration: f32,

    /// Seconds before a destroyed camera self-repairs
    pub camera_auto_repair_secs: f32,

    // === TELEPORT ===
    /// Seconds of the escape countdown once danger is adjacent to or inside
    /// the player's remote room
    pub escape_duration: f32,

    /// Seconds an activated lure keeps playing
    pub lure_play_duration: f32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            seconds_per_minute: 1.0,

            metal_max: 1000.0,
            metal_regen_rate: 6.0,
            metal_start: 300.0,
            turret_build_cost: 200.0,
            turret_repair_cost_per_hp: 1.0,
            turret_repair_cap: 50,
            turret_upgrade_cost: 300.0,
            turret_fire_cost: 15.0,
            lure_cost: 120.0,
            camera_remote_repair_cost: 80.0,

            // Level 1 survives four siege rockets; each upgrade adds a full
            // level-1 bar.
            turret_max_hp: [216, 432, 648],
            runner_bounty: 40.0,
            sieger_bounty: 50.0,
            specter_bounty: 150.0,

            auto_defense_delay: 4.0,
            auto_defense_self_damage: 54,

            runner_hop_interval: 9.0,
            runner_respawn_delay: 20.0,

            sieger_hop_interval: 16.0,
            sieger_shot_interval: 5.0,
            sieger_shot_damage: 54,
            sieger_breach_duration: 6.0,
            sieger_respawn_delay: 25.0,

            specter_patrol_interval: 12.0,
            specter_charge_cooldown: 35.0,
            specter_charge_duration: 8.0,
            specter_materialize_fraction: 0.75,
            specter_head_interval: 7.0,
            specter_respawn_delay: 30.0,

            juggernaut_hop_interval: 24.0,

            marksman_move_interval: 10.0,
            marksman_aim_duration: 12.0,
            marksman_hits_to_repel: 2,

            saboteur_mode_interval: 25.0,
            saboteur_relocate_interval: 8.0,
            saboteur_sap_chance: 0.35,
            sap_drain_rate: 3.0,
            sap_removal_presses: 5,
            sap_input_timeout: 0.8,

            camera_watch_duration: 4.0,
            camera_auto_repair_secs: 30.0,

            escape_duration: 6.0,
            lure_play_duration: 15.0,
        }
    }
}

impl EncounterConfig {
    /// Load a config from a TOML file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))
    }
}
