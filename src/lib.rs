//! Nightwatch - survival-defense encounter simulation core
//!
//! One player defends a workshop from six independently-behaving intruders
//! until dawn, using a metal economy, a single turret, a camera network and
//! a one-shot teleport/lure countermeasure. This crate is the simulation
//! only: rendering, audio and input are external consumers of the event
//! stream and the per-tick snapshot surface.

pub mod cameras;
pub mod core;
pub mod economy;
pub mod encounter;
pub mod enemies;
pub mod events;
pub mod map;
pub mod teleport;
pub mod turret;
pub mod world;
