//! Room graph - static adjacency and patrol paths
//!
//! Pure lookup data: which rooms touch which, which rooms carry cameras,
//! and the canonical spawn-to-door path for each path-following archetype.
//! No mutable state and no runtime failure modes; asking for the path of an
//! archetype that does not follow one is a programming error.

use crate::core::types::{Archetype, Room};

/// Rooms observable through the camera network, in panel order
pub const CAMERA_ROOMS: [Room; 7] = [
    Room::WestHall,
    Room::EastHall,
    Room::Foyer,
    Room::Storage,
    Room::Kitchen,
    Room::Atrium,
    Room::Cellar,
];

/// Undirected adjacency pairs
const ADJACENCY: [(Room, Room); 10] = [
    (Room::Foyer, Room::Storage),
    (Room::Foyer, Room::Kitchen),
    (Room::Foyer, Room::Atrium),
    (Room::Storage, Room::WestHall),
    (Room::Kitchen, Room::EastHall),
    (Room::Atrium, Room::WestHall),
    (Room::Atrium, Room::EastHall),
    (Room::Cellar, Room::Atrium),
    (Room::WestHall, Room::Workshop),
    (Room::EastHall, Room::Workshop),
];

/// True if `a` and `b` share a doorway
pub fn adjacent(a: Room, b: Room) -> bool {
    ADJACENCY
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Rooms adjacent to `room`
pub fn neighbors(room: Room) -> Vec<Room> {
    ADJACENCY
        .iter()
        .filter_map(|&(x, y)| {
            if x == room {
                Some(y)
            } else if y == room {
                Some(x)
            } else {
                None
            }
        })
        .collect()
}

/// True if the room has a camera feed
pub fn has_camera(room: Room) -> bool {
    CAMERA_ROOMS.contains(&room)
}

/// First hop of a shortest walk from `from` to `to`, or `None` when
/// already there. Ties break on adjacency-table order, so routes are
/// deterministic.
pub fn next_hop_toward(from: Room, to: Room) -> Option<Room> {
    if from == to {
        return None;
    }
    // Breadth-first over an eight-room graph; no need for anything fancier.
    let mut visited = vec![from];
    let mut frontier = vec![(from, None::<Room>)];
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &(room, first_hop) in &frontier {
            for neighbor in neighbors(room) {
                if visited.contains(&neighbor) {
                    continue;
                }
                let hop = first_hop.unwrap_or(neighbor);
                if neighbor == to {
                    return Some(hop);
                }
                visited.push(neighbor);
                next.push((neighbor, Some(hop)));
            }
        }
        frontier = next;
    }
    None
}

/// Canonical ordered path from spawn to the workshop for path-following
/// archetypes. The last element before Workshop is the door hallway.
///
/// # Panics
///
/// Panics for archetypes that do not follow a fixed path (Marksman walks
/// randomly, the Saboteur teleports) - calling this for them is a bug in
/// the caller, not a runtime condition.
pub fn patrol_path(archetype: Archetype) -> &'static [Room] {
    match archetype {
        Archetype::Runner => &[Room::Foyer, Room::Storage, Room::WestHall, Room::Workshop],
        Archetype::Sieger => &[Room::Foyer, Room::Kitchen, Room::EastHall, Room::Workshop],
        Archetype::Specter => &[Room::Cellar, Room::Atrium, Room::WestHall, Room::Workshop],
        Archetype::Juggernaut => &[Room::Cellar, Room::Atrium, Room::WestHall, Room::Workshop],
        Archetype::Marksman | Archetype::Saboteur => {
            panic!("{} has no fixed patrol path", archetype.name())
        }
    }
}
