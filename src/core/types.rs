//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game minute within the night, 0..=359 (12:00 AM to 6:00 AM)
pub type Minute = u32;

/// The minute at which dawn breaks and the encounter is won
pub const DAWN_MINUTE: Minute = 360;

/// Named rooms of the building
///
/// The Workshop is the home room the player defends. The two hallways feed
/// the two workshop doors; everything else is an inner room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    Workshop,
    WestHall,
    EastHall,
    Foyer,
    Storage,
    Kitchen,
    Atrium,
    Cellar,
}

impl Room {
    /// All rooms, in camera-panel display order
    pub const ALL: [Room; 8] = [
        Room::Workshop,
        Room::WestHall,
        Room::EastHall,
        Room::Foyer,
        Room::Storage,
        Room::Kitchen,
        Room::Atrium,
        Room::Cellar,
    ];

    /// Human-readable name for logs and the UI layer
    pub fn name(self) -> &'static str {
        match self {
            Room::Workshop => "Workshop",
            Room::WestHall => "West Hall",
            Room::EastHall => "East Hall",
            Room::Foyer => "Foyer",
            Room::Storage => "Storage",
            Room::Kitchen => "Kitchen",
            Room::Atrium => "Atrium",
            Room::Cellar => "Cellar",
        }
    }
}

/// The six intruder archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Runner,
    Sieger,
    Specter,
    Juggernaut,
    Marksman,
    Saboteur,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Runner,
        Archetype::Sieger,
        Archetype::Specter,
        Archetype::Juggernaut,
        Archetype::Marksman,
        Archetype::Saboteur,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Runner => "Runner",
            Archetype::Sieger => "Sieger",
            Archetype::Specter => "Specter",
            Archetype::Juggernaut => "Juggernaut",
            Archetype::Marksman => "Marksman",
            Archetype::Saboteur => "Saboteur",
        }
    }
}

/// Which workshop door the turret is aimed at
///
/// `None` whenever the turret is not under manual control (wrangle off).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorSide {
    #[default]
    None,
    Left,
    Right,
}

impl DoorSide {
    /// The hallway this door opens onto, if aimed at a door at all
    pub fn hallway(self) -> Option<Room> {
        match self {
            DoorSide::None => None,
            DoorSide::Left => Some(Room::WestHall),
            DoorSide::Right => Some(Room::EastHall),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_side_hallways() {
        assert_eq!(DoorSide::Left.hallway(), Some(Room::WestHall));
        assert_eq!(DoorSide::Right.hallway(), Some(Room::EastHall));
        assert_eq!(DoorSide::None.hallway(), None);
    }

    #[test]
    fn test_room_names_unique() {
        let mut names: Vec<_> = Room::ALL.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Room::ALL.len());
    }
}
