//! Read-only query surface for presentation
//!
//! Snapshots are plain serializable values computed on demand; nothing
//! here mutates the encounter. The camera view is the only way to sight
//! intruders outside the workshop, and it reports the Saboteur under its
//! current disguise.

use serde::Serialize;

use crate::core::types::{Archetype, DoorSide, Minute, Room};
use crate::enemies::EnemyAgent;
use crate::map;
use crate::teleport::Lure;

use super::Encounter;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TurretSnapshot {
    pub exists: bool,
    pub level: u8,
    pub hp: u32,
    pub max_hp: u32,
    pub wrangled: bool,
    pub aim: DoorSide,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CameraSnapshot {
    pub room: Room,
    pub destroyed: bool,
    pub destroyed_by: Option<Archetype>,
    /// Progress toward destruction in [0, 1]
    pub watch_progress: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeleportSnapshot {
    pub is_teleported: bool,
    pub current_room: Room,
    pub approaching_danger: bool,
    pub escape_remaining: Option<f32>,
    pub lure: Option<Lure>,
}

/// One intruder visible on a camera feed, as the feed shows it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemySighting {
    pub archetype: Archetype,
    pub detail: SightingDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SightingDetail {
    Roaming,
    /// Drawn toward a playing lure
    Lured,
    /// Lining up the long shot from a hallway
    Aiming,
    Sieging,
    Breaching,
    /// The Specter's disembodied head, drifting on its own
    SpecterHead { eye_glowing: bool },
}

impl Encounter {
    /// Game minute since nightfall, 0..=360
    pub fn minute(&self) -> Minute {
        self.clock.minute()
    }

    pub fn metal(&self) -> f32 {
        self.world.metal.metal()
    }

    pub fn metal_max(&self) -> f32 {
        self.world.metal.max()
    }

    pub fn turret_snapshot(&self) -> TurretSnapshot {
        let turret = &self.world.turret;
        TurretSnapshot {
            exists: turret.exists(),
            level: turret.level(),
            hp: turret.hp(),
            max_hp: if turret.exists() {
                turret.max_hp(&self.config)
            } else {
                0
            },
            wrangled: turret.is_wrangled(),
            aim: turret.aim(),
        }
    }

    pub fn is_camera_panel_up(&self) -> bool {
        self.world.cameras.is_panel_up()
    }

    pub fn selected_camera(&self) -> Room {
        self.world.cameras.selected()
    }

    /// One snapshot per camera room, in fixed map order
    pub fn camera_snapshots(&self) -> Vec<CameraSnapshot> {
        map::CAMERA_ROOMS
            .iter()
            .filter_map(|&room| {
                let state = self.world.cameras.state(room)?;
                Some(CameraSnapshot {
                    room,
                    destroyed: state.destroyed,
                    destroyed_by: state.destroyed_by,
                    watch_progress: (state.watch_accum / self.config.camera_watch_duration)
                        .min(1.0),
                })
            })
            .collect()
    }

    /// What the selected feed shows right now. Empty while the panel is
    /// down or the feed is destroyed.
    pub fn camera_sightings(&self) -> Vec<EnemySighting> {
        let room = self.world.cameras.selected();
        if !self.world.cameras.is_watched(room) {
            return Vec::new();
        }
        self.sightings_in(room)
    }

    fn sightings_in(&self, room: Room) -> Vec<EnemySighting> {
        let mut sightings = Vec::new();
        for agent in &self.agents {
            if let EnemyAgent::Specter(specter) = agent {
                if specter.is_active() && specter.head_room() == room {
                    sightings.push(EnemySighting {
                        archetype: Archetype::Specter,
                        detail: SightingDetail::SpecterHead {
                            eye_glowing: specter.is_eye_glowing(),
                        },
                    });
                }
            }
            if agent.current_room() != Some(room) {
                continue;
            }
            let sighting = match agent {
                EnemyAgent::Sieger(sieger) if sieger.is_breaching() => EnemySighting {
                    archetype: Archetype::Sieger,
                    detail: SightingDetail::Breaching,
                },
                EnemyAgent::Sieger(sieger) if sieger.is_sieging() => EnemySighting {
                    archetype: Archetype::Sieger,
                    detail: SightingDetail::Sieging,
                },
                EnemyAgent::Juggernaut(juggernaut) => EnemySighting {
                    archetype: Archetype::Juggernaut,
                    detail: if juggernaut.is_lured() {
                        SightingDetail::Lured
                    } else {
                        SightingDetail::Roaming
                    },
                },
                EnemyAgent::Marksman(marksman) => EnemySighting {
                    archetype: Archetype::Marksman,
                    detail: if marksman.is_aiming() {
                        SightingDetail::Aiming
                    } else if marksman.is_lured() {
                        SightingDetail::Lured
                    } else {
                        SightingDetail::Roaming
                    },
                },
                // The feed cannot tell a disguised Saboteur from the real
                // thing
                EnemyAgent::Saboteur(saboteur) => EnemySighting {
                    archetype: saboteur.disguise(),
                    detail: SightingDetail::Roaming,
                },
                agent => EnemySighting {
                    archetype: agent.archetype(),
                    detail: SightingDetail::Roaming,
                },
            };
            sightings.push(sighting);
        }
        sightings
    }

    pub fn teleport_snapshot(&self) -> TeleportSnapshot {
        let teleport = &self.world.teleport;
        TeleportSnapshot {
            is_teleported: teleport.is_teleported(),
            current_room: teleport.current_room(),
            approaching_danger: teleport.approaching_danger(),
            escape_remaining: teleport.escape_remaining(),
            lure: teleport.lure().cloned(),
        }
    }

    /// True ground-truth room of one intruder, ignoring disguises; `None`
    /// while despawned
    pub fn enemy_room(&self, archetype: Archetype) -> Option<Room> {
        self.agents
            .iter()
            .find(|a| a.archetype() == archetype)
            .and_then(EnemyAgent::current_room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EncounterConfig;
    use crate::core::error::ActionError;

    fn encounter() -> Encounter {
        Encounter::new(EncounterConfig::default())
    }

    #[test]
    fn test_turret_snapshot_tracks_build_and_level() {
        let mut enc = encounter();
        let snap = enc.turret_snapshot();
        assert!(!snap.exists);
        assert_eq!(snap.max_hp, 0);

        enc.build_turret().unwrap();
        let snap = enc.turret_snapshot();
        assert!(snap.exists);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.hp, snap.max_hp);
    }

    #[test]
    fn test_sightings_require_a_watched_feed() {
        let mut enc = encounter();
        // Panel down: nothing visible anywhere
        assert!(enc.camera_sightings().is_empty());
        enc.toggle_camera_panel();
        // Feeds start on the first camera room; selecting an intruder's
        // room shows it
        let room = enc.enemy_room(Archetype::Juggernaut).unwrap();
        enc.select_camera(room).unwrap();
        let sightings = enc.camera_sightings();
        assert!(sightings
            .iter()
            .any(|s| s.archetype == Archetype::Juggernaut));
    }

    #[test]
    fn test_workshop_has_no_feed() {
        let mut enc = encounter();
        enc.toggle_camera_panel();
        assert_eq!(
            enc.select_camera(Room::Workshop),
            Err(ActionError::NoCameraInRoom(Room::Workshop))
        );
    }

    #[test]
    fn test_camera_snapshots_cover_every_feed() {
        let enc = encounter();
        let snaps = enc.camera_snapshots();
        assert_eq!(snaps.len(), map::CAMERA_ROOMS.len());
        assert!(snaps.iter().all(|s| !s.destroyed));
    }
}
