//! Action failure reason codes
//!
//! Every player action that can fail returns one of these instead of
//! panicking or mutating anything. The orchestrator surfaces rejections as
//! `ActionRejected` events; none of them end the encounter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Room;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    #[error("Not enough metal")]
    InsufficientMetal,

    #[error("A turret already exists")]
    TurretAlreadyBuilt,

    #[error("No turret exists")]
    TurretMissing,

    #[error("Turret must be at full health to upgrade")]
    TurretNotFullHealth,

    #[error("Turret is already at maximum level")]
    TurretMaxLevel,

    #[error("Turret is already at full health")]
    TurretAlreadyFull,

    #[error("Turret is not under manual control")]
    NotWrangled,

    #[error("Turret is not aimed at a door")]
    NotAimedAtDoor,

    #[error("Room {0:?} has no camera")]
    NoCameraInRoom(Room),

    #[error("Camera in {0:?} is not destroyed")]
    CameraNotDestroyed(Room),

    #[error("On-site repair requires being in {0:?}")]
    CameraOutOfReach(Room),

    #[error("A lure is already placed")]
    LureAlreadyPlaced,

    #[error("No lure has been placed")]
    LureNotPlaced,

    #[error("Lures can only be placed while away from the workshop")]
    LureRequiresAway,

    #[error("Already teleported away")]
    AlreadyTeleported,

    #[error("Not currently teleported")]
    NotTeleported,

    #[error("Cannot teleport into the workshop")]
    TeleportIntoHome,

    #[error("No sap is attached to the turret")]
    NoSapPresent,
}

pub type ActionResult = Result<(), ActionError>;
