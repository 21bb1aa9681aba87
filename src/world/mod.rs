//! Shared mutable world state
//!
//! One explicit struct handed to every agent update instead of ambient
//! globals: the turret, the metal reserve, the camera network, the teleport
//! controller and the encounter RNG. All mutation happens synchronously
//! inside a tick, so the only discipline required is update order, which
//! the orchestrator owns.

use rand_chacha::ChaCha8Rng;

use crate::cameras::CameraNetwork;
use crate::economy::MetalReserve;
use crate::teleport::TeleportController;
use crate::turret::Turret;

#[derive(Debug)]
pub struct WorldState {
    pub metal: MetalReserve,
    pub turret: Turret,
    pub cameras: CameraNetwork,
    pub teleport: TeleportController,
    /// Encounter RNG; every random decision draws from this one stream
    pub rng: ChaCha8Rng,
    /// Elapsed real seconds since the encounter started; the timestamp the
    /// camera auto-repair deadline is anchored to
    pub now: f32,
}
