//! Full-night encounter integration tests
//!
//! Each scenario drives the orchestrator through the public control and
//! snapshot surface only, the way a frontend would.

use nightwatch::core::config::EncounterConfig;
use nightwatch::core::types::{Archetype, DoorSide, Room};
use nightwatch::encounter::{Encounter, EncounterStatus, FireOutcome, SightingDetail};
use nightwatch::events::{DefeatReason, EncounterEvent};

fn encounter() -> Encounter {
    Encounter::new(EncounterConfig::default())
}

/// Disable every variant except one
fn solo(enc: &mut Encounter, keep: Archetype) {
    for archetype in Archetype::ALL {
        if archetype != keep {
            enc.set_variant_enabled(archetype, false);
        }
    }
}

/// Tick one-second frames until a predicate matches an event, up to a
/// bound; returns the matching batch
fn tick_until(
    enc: &mut Encounter,
    max_secs: u32,
    pred: impl Fn(&EncounterEvent) -> bool,
) -> Option<Vec<EncounterEvent>> {
    for _ in 0..max_secs {
        let events = enc.tick(1.0);
        if events.iter().any(&pred) {
            return Some(events);
        }
    }
    None
}

#[test]
fn test_quiet_night_ends_at_dawn() {
    let mut config = EncounterConfig::default();
    // Compress the night: dawn at 18 real seconds, before any intruder
    // can finish an attack
    config.seconds_per_minute = 0.05;
    let mut enc = Encounter::new(config);
    enc.build_turret().unwrap();

    let batch = tick_until(&mut enc, 30, |e| *e == EncounterEvent::Victory);
    assert!(batch.is_some(), "dawn never arrived");
    assert_eq!(enc.status(), EncounterStatus::Won);
    assert_eq!(enc.minute(), 360);
}

#[test]
fn test_undefended_door_means_immediate_breach() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Runner);

    let batch = tick_until(&mut enc, 60, |e| {
        matches!(e, EncounterEvent::GameOver { .. })
    })
    .expect("the Runner never breached");
    assert!(batch.contains(&EncounterEvent::EnemyAttackStarted {
        archetype: Archetype::Runner,
    }));
    assert_eq!(
        enc.status(),
        EncounterStatus::Lost(DefeatReason::TurretlessBreach(Archetype::Runner))
    );
}

#[test]
fn test_runner_repel_and_return_cycle() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Runner);
    enc.build_turret().unwrap();
    enc.set_wrangled(true).unwrap();
    enc.set_aim(DoorSide::Left).unwrap();

    tick_until(&mut enc, 60, |e| {
        matches!(
            e,
            EncounterEvent::EnemyReachedDoor {
                archetype: Archetype::Runner,
                room: Room::WestHall,
            }
        )
    })
    .expect("the Runner never reached the left door");

    assert_eq!(enc.fire(), Ok(FireOutcome::Hit(Archetype::Runner)));
    let batch = enc.tick(1.0);
    assert!(batch.iter().any(|e| matches!(
        e,
        EncounterEvent::EnemyDrivenAway {
            archetype: Archetype::Runner,
            ..
        }
    )));
    assert!(enc.enemy_room(Archetype::Runner).is_none());

    // Respawn delay plus a fresh run to the door
    tick_until(&mut enc, 120, |e| {
        matches!(
            e,
            EncounterEvent::EnemyReachedDoor {
                archetype: Archetype::Runner,
                ..
            }
        )
    })
    .expect("the Runner never came back");
    assert_eq!(enc.status(), EncounterStatus::InProgress);
}

#[test]
fn test_sieger_grinds_down_an_unmanned_turret() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Sieger);
    enc.build_turret().unwrap();

    // Rockets land every few seconds until the turret folds
    tick_until(&mut enc, 120, |e| *e == EncounterEvent::TurretDestroyed)
        .expect("the siege never destroyed the turret");
    assert!(!enc.turret_snapshot().exists);

    // The breach countdown follows, unanswered
    let batch = tick_until(&mut enc, 30, |e| {
        matches!(e, EncounterEvent::GameOver { .. })
    })
    .expect("the breach never landed");
    assert!(batch.contains(&EncounterEvent::EnemyAttackStarted {
        archetype: Archetype::Sieger,
    }));
    assert_eq!(
        enc.status(),
        EncounterStatus::Lost(DefeatReason::SiegeBreach)
    );
}

#[test]
fn test_sieging_sieger_repelled_for_bounty() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Sieger);
    enc.build_turret().unwrap();

    tick_until(&mut enc, 120, |e| {
        matches!(
            e,
            EncounterEvent::EnemyReachedDoor {
                archetype: Archetype::Sieger,
                room: Room::EastHall,
            }
        )
    })
    .expect("the Sieger never reached the right door");

    enc.set_wrangled(true).unwrap();
    enc.set_aim(DoorSide::Right).unwrap();
    let before = enc.metal();
    assert_eq!(enc.fire(), Ok(FireOutcome::Hit(Archetype::Sieger)));
    let config = enc.config().clone();
    assert_eq!(
        enc.metal(),
        before - config.turret_fire_cost + config.sieger_bounty
    );
    assert!(enc.enemy_room(Archetype::Sieger).is_none());
    assert_eq!(enc.status(), EncounterStatus::InProgress);
}

#[test]
fn test_overstaying_a_teleport_is_lethal() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Juggernaut);
    // The Juggernaut starts in the cellar; the atrium is next door
    enc.teleport_to(Room::Atrium).unwrap();

    let batch = tick_until(&mut enc, 20, |e| {
        matches!(e, EncounterEvent::GameOver { .. })
    })
    .expect("the escape countdown never expired");
    assert!(batch
        .iter()
        .any(|e| matches!(e, EncounterEvent::GameOver {
            reason: DefeatReason::EscapeTimeout,
        })));
    assert_eq!(
        enc.status(),
        EncounterStatus::Lost(DefeatReason::EscapeTimeout)
    );
}

#[test]
fn test_returning_home_clears_the_countdown() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Juggernaut);
    enc.teleport_to(Room::Atrium).unwrap();

    let batch = enc.tick(1.0);
    assert!(batch.iter().any(|e| matches!(
        e,
        EncounterEvent::EscapeDangerStarted { room: Room::Atrium }
    )));
    enc.return_home().unwrap();
    assert_eq!(enc.status(), EncounterStatus::InProgress);
    assert!(!enc.teleport_snapshot().is_teleported);
}

#[test]
fn test_playing_lure_diverts_the_juggernaut() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Juggernaut);
    enc.teleport_to(Room::Atrium).unwrap();
    enc.place_lure().unwrap();
    enc.play_lure().unwrap();
    enc.return_home().unwrap();

    enc.toggle_camera_panel();
    enc.select_camera(Room::Cellar).unwrap();
    enc.tick(1.0);
    let sightings = enc.camera_sightings();
    assert!(sightings
        .iter()
        .any(|s| s.archetype == Archetype::Juggernaut
            && s.detail == SightingDetail::Lured));
}

#[test]
fn test_juggernaut_waits_in_an_empty_workshop() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Juggernaut);
    // Kitchen never touches the Juggernaut's route, so the countdown
    // stays quiet for the whole transit
    enc.teleport_to(Room::Kitchen).unwrap();

    for _ in 0..100 {
        enc.tick(1.0);
        if enc.enemy_room(Archetype::Juggernaut) == Some(Room::Workshop) {
            break;
        }
    }
    assert_eq!(enc.enemy_room(Archetype::Juggernaut), Some(Room::Workshop));
    assert_eq!(enc.status(), EncounterStatus::InProgress);

    // Coming home now settles the matter
    enc.return_home().unwrap();
    assert_eq!(
        enc.status(),
        EncounterStatus::Lost(DefeatReason::JuggernautArrival)
    );
    let batch = enc.tick(1.0);
    assert!(batch.iter().any(|e| matches!(
        e,
        EncounterEvent::GameOver {
            reason: DefeatReason::JuggernautArrival,
        }
    )));
}

#[test]
fn test_watched_camera_is_smashed_then_self_repairs() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Juggernaut);
    enc.toggle_camera_panel();
    enc.select_camera(Room::Cellar).unwrap();

    tick_until(&mut enc, 20, |e| {
        matches!(
            e,
            EncounterEvent::CameraDestroyed {
                room: Room::Cellar,
                by: Archetype::Juggernaut,
            }
        )
    })
    .expect("the watched feed was never smashed");
    assert!(enc
        .camera_snapshots()
        .iter()
        .any(|s| s.room == Room::Cellar && s.destroyed));

    tick_until(&mut enc, 60, |e| {
        matches!(e, EncounterEvent::CameraRepaired { room: Room::Cellar })
    })
    .expect("the feed never self-repaired");
    assert!(enc
        .camera_snapshots()
        .iter()
        .any(|s| s.room == Room::Cellar && !s.destroyed));
}

#[test]
fn test_remote_camera_repair_costs_metal() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Juggernaut);
    enc.toggle_camera_panel();
    enc.select_camera(Room::Cellar).unwrap();
    tick_until(&mut enc, 20, |e| {
        matches!(e, EncounterEvent::CameraDestroyed { .. })
    })
    .expect("the watched feed was never smashed");

    let before = enc.metal();
    enc.repair_camera(Room::Cellar, true).unwrap();
    assert_eq!(
        enc.metal(),
        before - enc.config().camera_remote_repair_cost
    );
    let batch = enc.tick(1.0);
    assert!(batch.contains(&EncounterEvent::CameraRepaired { room: Room::Cellar }));
}

#[test]
fn test_sap_placed_on_teleport_and_pressed_off() {
    let mut enc = encounter();
    solo(&mut enc, Archetype::Saboteur);
    enc.build_turret().unwrap();

    // The sap roll only happens on teleport while the Saboteur is in its
    // sapping mode, so cycle in and out until one lands
    let mut placed = false;
    'cycles: for _ in 0..400 {
        let saboteur_room = enc.enemy_room(Archetype::Saboteur);
        let target = [Room::Foyer, Room::Storage, Room::Kitchen, Room::Atrium]
            .into_iter()
            .find(|r| Some(*r) != saboteur_room)
            .unwrap();
        enc.teleport_to(target).unwrap();
        let batch = enc.tick(1.0);
        enc.return_home().unwrap();
        enc.tick(1.0);
        if batch.contains(&EncounterEvent::SapPlaced) {
            placed = true;
            break 'cycles;
        }
    }
    assert!(placed, "the sap roll never landed");

    // Rapid presses inside the input window pull it off
    let presses = enc.config().sap_removal_presses;
    for _ in 0..presses {
        enc.sap_input_pulse().unwrap();
    }
    let batch = enc.tick(1.0);
    assert!(batch.contains(&EncounterEvent::SapRemoved));
}
