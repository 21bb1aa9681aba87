//! Outbound events consumed by the presentation layer
//!
//! The orchestrator collects these during a tick and returns them in the
//! order they occurred. Rendering, audio and UI react to them; the core
//! never looks at them again.

use serde::{Deserialize, Serialize};

use crate::core::error::ActionError;
use crate::core::types::{Archetype, Room};

/// Why the encounter was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatReason {
    /// An intruder walked through an undefended door
    TurretlessBreach(Archetype),
    /// A Sieger's breach countdown expired
    SiegeBreach,
    /// A Specter charge ran to completion
    SpecterCharge,
    /// The Juggernaut reached the workshop (or was waiting there on return)
    JuggernautArrival,
    /// The Marksman's headshot landed while the player was home
    MarksmanShot,
    /// The escape countdown expired with the player still away
    EscapeTimeout,
    /// The player teleported into a room an intruder occupied
    TeleportedIntoEnemy(Archetype),
}

/// Everything the core reports outward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// An intruder arrived at a workshop door
    EnemyReachedDoor { archetype: Archetype, room: Room },
    /// An intruder entered its lethal attack; game over follows this tick
    EnemyAttackStarted { archetype: Archetype },
    /// An intruder was repelled; `bounty` is the metal paid out (zero for
    /// auto-defense repels and silent Marksman hits)
    EnemyDrivenAway { archetype: Archetype, bounty: f32 },
    /// The turret lost hit points
    TurretDamaged { hp: u32, by: Archetype },
    TurretDestroyed,
    CameraDestroyed { room: Room, by: Archetype },
    CameraRepaired { room: Room },
    SapPlaced,
    SapRemoved,
    /// The lure finished playing and was consumed
    LureConsumed,
    /// An intruder is adjacent to or inside the player's remote room
    EscapeDangerStarted { room: Room },
    /// The danger receded before the countdown expired
    EscapeDangerCleared,
    /// A player action was refused; never fatal
    ActionRejected { reason: ActionError },
    GameOver { reason: DefeatReason },
    /// Dawn: minute 360 reached
    Victory,
}
