//! The six intruder state machines
//!
//! Six dissimilar machines behind one minimal contract: per-tick update
//! against the shared world state, a current room, an active flag, and
//! forced despawn/respawn for session-disabled variants. Everything
//! archetype-specific (siege status, charge progress, lure state, sap
//! state) stays behind the enum tag; the orchestrator branches on the tag
//! rather than assuming every variant answers every question.

pub mod juggernaut;
pub mod marksman;
pub mod runner;
pub mod saboteur;
pub mod sieger;
pub mod specter;

pub use juggernaut::Juggernaut;
pub use marksman::{Marksman, MarksmanHit};
pub use runner::Runner;
pub use saboteur::Saboteur;
pub use sieger::Sieger;
pub use specter::Specter;

use crate::core::config::EncounterConfig;
use crate::core::types::{Archetype, Room};
use crate::events::{DefeatReason, EncounterEvent};
use crate::world::WorldState;

/// Tagged union over the six variants
#[derive(Debug)]
pub enum EnemyAgent {
    Runner(Runner),
    Sieger(Sieger),
    Specter(Specter),
    Juggernaut(Juggernaut),
    Marksman(Marksman),
    Saboteur(Saboteur),
}

impl EnemyAgent {
    pub fn archetype(&self) -> Archetype {
        match self {
            EnemyAgent::Runner(_) => Archetype::Runner,
            EnemyAgent::Sieger(_) => Archetype::Sieger,
            EnemyAgent::Specter(_) => Archetype::Specter,
            EnemyAgent::Juggernaut(_) => Archetype::Juggernaut,
            EnemyAgent::Marksman(_) => Archetype::Marksman,
            EnemyAgent::Saboteur(_) => Archetype::Saboteur,
        }
    }

    /// Advance the machine by `delta` seconds. A `Some` return is a lethal
    /// threat completing; the orchestrator turns it into game over.
    pub fn update(
        &mut self,
        world: &mut WorldState,
        config: &EncounterConfig,
        delta: f32,
        events: &mut Vec<EncounterEvent>,
    ) -> Option<DefeatReason> {
        match self {
            EnemyAgent::Runner(a) => a.update(world, config, delta, events),
            EnemyAgent::Sieger(a) => a.update(world, config, delta, events),
            EnemyAgent::Specter(a) => a.update(world, config, delta, events),
            EnemyAgent::Juggernaut(a) => a.update(world, config, delta, events),
            EnemyAgent::Marksman(a) => a.update(world, config, delta, events),
            EnemyAgent::Saboteur(a) => a.update(world, config, delta, events),
        }
    }

    /// The room the agent occupies, `None` while despawned
    pub fn current_room(&self) -> Option<Room> {
        match self {
            EnemyAgent::Runner(a) => a.current_room(),
            EnemyAgent::Sieger(a) => a.current_room(),
            EnemyAgent::Specter(a) => a.current_room(),
            EnemyAgent::Juggernaut(a) => a.current_room(),
            EnemyAgent::Marksman(a) => a.current_room(),
            EnemyAgent::Saboteur(a) => a.current_room(),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            EnemyAgent::Runner(a) => a.is_active(),
            EnemyAgent::Sieger(a) => a.is_active(),
            EnemyAgent::Specter(a) => a.is_active(),
            EnemyAgent::Juggernaut(a) => a.is_active(),
            EnemyAgent::Marksman(a) => a.is_active(),
            EnemyAgent::Saboteur(a) => a.is_active(),
        }
    }

    /// Remove the agent immediately (session-disabled variant)
    pub fn force_despawn(&mut self) {
        match self {
            EnemyAgent::Runner(a) => a.force_despawn(),
            EnemyAgent::Sieger(a) => a.force_despawn(),
            EnemyAgent::Specter(a) => a.force_despawn(),
            EnemyAgent::Juggernaut(a) => a.force_despawn(),
            EnemyAgent::Marksman(a) => a.force_despawn(),
            EnemyAgent::Saboteur(a) => a.force_despawn(),
        }
    }

    /// Restart the lifecycle from the spawn node
    pub fn respawn(&mut self, world: &mut WorldState, config: &EncounterConfig) {
        match self {
            EnemyAgent::Runner(a) => a.respawn(config),
            EnemyAgent::Sieger(a) => a.respawn(config),
            EnemyAgent::Specter(a) => a.respawn(config),
            EnemyAgent::Juggernaut(a) => a.respawn(config),
            EnemyAgent::Marksman(a) => a.respawn(config, &mut world.rng),
            EnemyAgent::Saboteur(a) => a.respawn(&mut world.rng, config),
        }
    }

    // Capability accessors: Some only for the variant that answers the
    // question.

    pub fn as_runner(&self) -> Option<&Runner> {
        match self {
            EnemyAgent::Runner(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_runner_mut(&mut self) -> Option<&mut Runner> {
        match self {
            EnemyAgent::Runner(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_sieger(&self) -> Option<&Sieger> {
        match self {
            EnemyAgent::Sieger(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_sieger_mut(&mut self) -> Option<&mut Sieger> {
        match self {
            EnemyAgent::Sieger(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_specter(&self) -> Option<&Specter> {
        match self {
            EnemyAgent::Specter(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_specter_mut(&mut self) -> Option<&mut Specter> {
        match self {
            EnemyAgent::Specter(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_juggernaut(&self) -> Option<&Juggernaut> {
        match self {
            EnemyAgent::Juggernaut(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_marksman(&self) -> Option<&Marksman> {
        match self {
            EnemyAgent::Marksman(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_marksman_mut(&mut self) -> Option<&mut Marksman> {
        match self {
            EnemyAgent::Marksman(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_saboteur(&self) -> Option<&Saboteur> {
        match self {
            EnemyAgent::Saboteur(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_saboteur_mut(&mut self) -> Option<&mut Saboteur> {
        match self {
            EnemyAgent::Saboteur(a) => Some(a),
            _ => None,
        }
    }
}
