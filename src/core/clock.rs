//! Night clock - real-time deltas to game minutes
//!
//! The night runs 360 game minutes (12:00 AM to 6:00 AM). Elapsed real
//! seconds accumulate and each time the accumulator crosses the configured
//! threshold one game minute passes. Reaching minute 360 is dawn, the
//! victory condition. The orchestrator owns the only instance.

use serde::{Deserialize, Serialize};

use crate::core::types::{Minute, DAWN_MINUTE};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NightClock {
    minute: Minute,
    accumulator: f32,
}

impl NightClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds, emitting game minutes as the accumulator
    /// crosses `seconds_per_minute`. Returns the number of minutes that
    /// passed this call.
    pub fn advance(&mut self, delta: f32, seconds_per_minute: f32) -> u32 {
        if delta <= 0.0 || self.minute >= DAWN_MINUTE {
            return 0;
        }
        self.accumulator += delta;
        let mut passed = 0;
        while self.accumulator >= seconds_per_minute && self.minute < DAWN_MINUTE {
            self.accumulator -= seconds_per_minute;
            self.minute += 1;
            passed += 1;
        }
        passed
    }

    /// Current game minute, 0..=360
    pub fn minute(&self) -> Minute {
        self.minute
    }

    /// True once minute 360 has been reached
    pub fn is_dawn(&self) -> bool {
        self.minute >= DAWN_MINUTE
    }

    /// Hour of night for display: 12, 1, 2, 3, 4, 5
    pub fn hour(&self) -> u32 {
        let h = self.minute / 60;
        if h == 0 {
            12
        } else {
            h
        }
    }
}
