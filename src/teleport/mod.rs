//! Teleport controller - remote viewing, lures and the escape countdown
//!
//! The player can project to any camera-carrying room, which pauses metal
//! regeneration and exposes them to danger: while an intruder is inside or
//! adjacent to the projected room an escape countdown runs, lethal at zero
//! unless the player has returned home. Teleporting is also the only time
//! a lure may be placed, and the only trigger for the Saboteur's sap roll.

use serde::{Deserialize, Serialize};

use crate::core::error::{ActionError, ActionResult};
use crate::core::types::{Archetype, Room};
use crate::events::EncounterEvent;
use crate::map;

/// The placeable, playable countermeasure for Juggernaut and Marksman
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lure {
    pub room: Room,
    pub playing: bool,
    pub play_remaining: f32,
}

/// Result of a teleport or return attempt that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportOutcome {
    Moved,
    /// An intruder was already there; the move does not happen and the
    /// encounter is lost
    Lethal(Archetype),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeleportController {
    teleported: bool,
    current_room: Room,
    /// Seconds left to get home once danger is near; `None` while safe
    escape_remaining: Option<f32>,
    approaching_danger: bool,
    lure: Option<Lure>,
}

impl TeleportController {
    pub fn new() -> Self {
        Self {
            teleported: false,
            current_room: Room::Workshop,
            escape_remaining: None,
            approaching_danger: false,
            lure: None,
        }
    }

    pub fn is_teleported(&self) -> bool {
        self.teleported
    }

    /// The player's virtual location; Workshop while home
    pub fn current_room(&self) -> Room {
        self.current_room
    }

    pub fn approaching_danger(&self) -> bool {
        self.approaching_danger
    }

    pub fn escape_remaining(&self) -> Option<f32> {
        self.escape_remaining
    }

    pub fn lure(&self) -> Option<&Lure> {
        self.lure.as_ref()
    }

    /// The lure's room while it is actively playing
    pub fn active_lure_room(&self) -> Option<Room> {
        self.lure
            .as_ref()
            .filter(|l| l.playing)
            .map(|l| l.room)
    }

    /// Project to `room`. `occupant` is the intruder already standing
    /// there, if any - walking into one is lethal and leaves the teleport
    /// state untouched.
    pub fn teleport_to(
        &mut self,
        room: Room,
        occupant: Option<Archetype>,
    ) -> Result<TeleportOutcome, ActionError> {
        if self.teleported {
            return Err(ActionError::AlreadyTeleported);
        }
        if room == Room::Workshop {
            return Err(ActionError::TeleportIntoHome);
        }
        if let Some(archetype) = occupant {
            return Ok(TeleportOutcome::Lethal(archetype));
        }
        self.teleported = true;
        self.current_room = room;
        tracing::debug!("Player teleported to {}", room.name());
        Ok(TeleportOutcome::Moved)
    }

    /// Come home. `waiting_at_home` is an intruder recorded as waiting in
    /// the workshop (deferred Juggernaut loss) - returning into it is
    /// lethal.
    pub fn return_home(
        &mut self,
        waiting_at_home: Option<Archetype>,
    ) -> Result<TeleportOutcome, ActionError> {
        if !self.teleported {
            return Err(ActionError::NotTeleported);
        }
        if let Some(archetype) = waiting_at_home {
            return Ok(TeleportOutcome::Lethal(archetype));
        }
        self.teleported = false;
        self.current_room = Room::Workshop;
        self.escape_remaining = None;
        self.approaching_danger = false;
        Ok(TeleportOutcome::Moved)
    }

    /// Per-tick danger re-evaluation while teleported.
    ///
    /// `occupied` is every room currently holding an active intruder.
    /// Danger means one of them is inside or adjacent to the player's
    /// room; the countdown starts when danger appears, holds its remaining
    /// time while danger persists, clears when danger recedes, and returns
    /// `true` exactly once when it expires.
    pub fn tick_danger(
        &mut self,
        delta: f32,
        occupied: &[Room],
        escape_duration: f32,
        events: &mut Vec<EncounterEvent>,
    ) -> bool {
        if !self.teleported {
            return false;
        }
        let here = self.current_room;
        let danger = occupied
            .iter()
            .any(|&r| r == here || map::adjacent(r, here));

        if danger {
            if !self.approaching_danger {
                self.approaching_danger = true;
                self.escape_remaining = Some(escape_duration);
                tracing::debug!("Escape countdown started in {}", here.name());
                events.push(EncounterEvent::EscapeDangerStarted { room: here });
            }
            if let Some(remaining) = self.escape_remaining.as_mut() {
                *remaining -= delta;
                if *remaining <= 0.0 {
                    self.escape_remaining = None;
                    return true;
                }
            }
        } else if self.approaching_danger {
            self.approaching_danger = false;
            self.escape_remaining = None;
            events.push(EncounterEvent::EscapeDangerCleared);
        }
        false
    }

    /// Place a lure in the player's current remote room. Payment is the
    /// orchestrator's job.
    pub fn place_lure(&mut self) -> ActionResult {
        if !self.teleported {
            return Err(ActionError::LureRequiresAway);
        }
        if self.lure.is_some() {
            return Err(ActionError::LureAlreadyPlaced);
        }
        self.lure = Some(Lure {
            room: self.current_room,
            playing: false,
            play_remaining: 0.0,
        });
        Ok(())
    }

    /// Start (or restart) the placed lure's playback
    pub fn play_lure(&mut self, play_duration: f32) -> ActionResult {
        let lure = self.lure.as_mut().ok_or(ActionError::LureNotPlaced)?;
        lure.playing = true;
        lure.play_remaining = play_duration;
        Ok(())
    }

    /// Run down a playing lure; clears it and reports `LureConsumed` when
    /// the playback ends. Lured intruders notice the absence on their next
    /// update.
    pub fn tick_lure(&mut self, delta: f32, events: &mut Vec<EncounterEvent>) {
        let consumed = match self.lure.as_mut() {
            Some(lure) if lure.playing => {
                lure.play_remaining -= delta;
                lure.play_remaining <= 0.0
            }
            _ => false,
        };
        if consumed {
            self.lure = None;
            events.push(EncounterEvent::LureConsumed);
        }
    }
}

impl Default for TeleportController {
    fn default() -> Self {
        Self::new()
    }
}
