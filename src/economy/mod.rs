//! Metal reserve - the bounded resource economy
//!
//! One scalar currency, clamped to [0, max]. It regenerates passively over
//! time and is spent only through named withdrawals; a withdrawal either
//! succeeds in full or leaves the balance untouched. Repair is the one
//! partial operation: it funds as many missing hit points as the balance
//! and the per-action cap allow.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalReserve {
    metal: f32,
    max: f32,
}

impl MetalReserve {
    pub fn new(start: f32, max: f32) -> Self {
        Self {
            metal: start.clamp(0.0, max),
            max,
        }
    }

    /// Current balance
    pub fn metal(&self) -> f32 {
        self.metal
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Passive regeneration for `delta` seconds, unless paused
    ///
    /// Paused while the turret is wrangled-and-aimed or the player is
    /// teleported away; the caller computes that.
    pub fn regenerate(&mut self, rate: f32, delta: f32, paused: bool) {
        if paused || delta <= 0.0 {
            return;
        }
        self.metal = (self.metal + rate * delta).min(self.max);
    }

    /// Add a bounty payout, clamped to the cap
    pub fn deposit(&mut self, amount: f32) {
        self.metal = (self.metal + amount).min(self.max);
    }

    /// Withdraw exactly `amount`, or nothing
    pub fn withdraw(&mut self, amount: f32) -> bool {
        if self.metal >= amount {
            self.metal -= amount;
            true
        } else {
            false
        }
    }

    /// Fund a repair of up to `missing_hp` points at `cost_per_hp` each,
    /// bounded by `cap` points per action. Returns the hit points actually
    /// funded; partial repairs are valid and expected.
    pub fn withdraw_for_repair(&mut self, missing_hp: u32, cost_per_hp: f32, cap: u32) -> u32 {
        let affordable = if cost_per_hp > 0.0 {
            (self.metal / cost_per_hp).floor() as u32
        } else {
            missing_hp
        };
        let funded = missing_hp.min(cap).min(affordable);
        self.metal -= funded as f32 * cost_per_hp;
        funded
    }
}
