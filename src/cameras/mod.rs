//! Camera network - feeds, watch accumulators, destruction and repair
//!
//! Seven rooms carry cameras. The player raises the camera panel and
//! selects one feed at a time; a feed is "watched" only while the panel is
//! up, that feed is selected, and the camera is intact. Watching a feed
//! with a destructive intruder on it fills that camera's watch accumulator
//! until the intruder smashes the camera. Destroyed cameras self-repair
//! after a fixed deadline against the orchestrator's timestamp, or
//! immediately through the repair action.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::core::error::{ActionError, ActionResult};
use crate::core::types::{Archetype, Room};
use crate::events::EncounterEvent;
use crate::map;

/// Per-camera mutable state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraState {
    pub destroyed: bool,
    /// Timestamp (orchestrator seconds) at which the feed self-repairs
    pub destroyed_until: f32,
    pub destroyed_by: Option<Archetype>,
    /// Progress toward destruction, in watched seconds
    pub watch_accum: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraNetwork {
    states: AHashMap<Room, CameraState>,
    panel_up: bool,
    selected: Room,
}

impl CameraNetwork {
    pub fn new() -> Self {
        let states = map::CAMERA_ROOMS
            .iter()
            .map(|&room| (room, CameraState::default()))
            .collect();
        Self {
            states,
            panel_up: false,
            selected: map::CAMERA_ROOMS[0],
        }
    }

    pub fn is_panel_up(&self) -> bool {
        self.panel_up
    }

    pub fn selected(&self) -> Room {
        self.selected
    }

    pub fn toggle_panel(&mut self) {
        self.panel_up = !self.panel_up;
    }

    /// Select a feed; rejected for rooms without a camera
    pub fn select(&mut self, room: Room) -> ActionResult {
        if !map::has_camera(room) {
            return Err(ActionError::NoCameraInRoom(room));
        }
        self.selected = room;
        Ok(())
    }

    pub fn state(&self, room: Room) -> Option<&CameraState> {
        self.states.get(&room)
    }

    /// True while `room`'s feed is up, selected and intact
    pub fn is_watched(&self, room: Room) -> bool {
        self.panel_up
            && self.selected == room
            && self.states.get(&room).is_some_and(|s| !s.destroyed)
    }

    /// Advance watch accumulators and the auto-repair deadlines.
    ///
    /// `destructive_occupants` lists, per camera room, the destructive
    /// intruders currently stationed there (in update order); two on the
    /// same feed fill it at double rate. `now` is the orchestrator's
    /// elapsed-seconds timestamp, the one clock-anchored countdown in the
    /// system.
    pub fn tick(
        &mut self,
        delta: f32,
        now: f32,
        destructive_occupants: &[(Room, Archetype)],
        config: &EncounterConfig,
        events: &mut Vec<EncounterEvent>,
    ) {
        // Auto-repair first so a feed restored this tick can be watched
        // again next tick, not destroyed twice. Fixed panel order keeps the
        // event stream deterministic.
        for &room in map::CAMERA_ROOMS.iter() {
            let state = self
                .states
                .get_mut(&room)
                .unwrap_or_else(|| panic!("no camera state for {}", room.name()));
            if state.destroyed && now >= state.destroyed_until {
                state.destroyed = false;
                state.destroyed_by = None;
                tracing::debug!("Camera {} self-repaired", room.name());
                events.push(EncounterEvent::CameraRepaired { room });
            }
        }

        for &room in map::CAMERA_ROOMS.iter() {
            if !self.is_watched(room) {
                // An unwatched accumulator holds its progress; only
                // destruction resets it.
                continue;
            }
            let occupants: Vec<Archetype> = destructive_occupants
                .iter()
                .filter(|&&(r, _)| r == room)
                .map(|&(_, a)| a)
                .collect();
            if occupants.is_empty() {
                continue;
            }
            let state = self
                .states
                .get_mut(&room)
                .unwrap_or_else(|| panic!("no camera state for {}", room.name()));
            state.watch_accum += delta * occupants.len() as f32;
            if state.watch_accum >= config.camera_watch_duration {
                let culprit = occupants[0];
                state.destroyed = true;
                state.destroyed_until = now + config.camera_auto_repair_secs;
                state.destroyed_by = Some(culprit);
                state.watch_accum = 0.0;
                tracing::info!("Camera {} destroyed by {}", room.name(), culprit.name());
                events.push(EncounterEvent::CameraDestroyed {
                    room,
                    by: culprit,
                });
            }
        }
    }

    /// Clear a destroyed feed immediately. Reach and payment checks belong
    /// to the orchestrator.
    pub fn repair(&mut self, room: Room) -> ActionResult {
        let state = self
            .states
            .get_mut(&room)
            .ok_or(ActionError::NoCameraInRoom(room))?;
        if !state.destroyed {
            return Err(ActionError::CameraNotDestroyed(room));
        }
        state.destroyed = false;
        state.destroyed_by = None;
        Ok(())
    }
}

impl Default for CameraNetwork {
    fn default() -> Self {
        Self::new()
    }
}
