//! Resource stock and income, for predicting when a plan becomes affordable.

use serde::{Deserialize, Serialize};

use overmind_plan::{Frame, Price};

/// A snapshot of the bank and income, supplied by the economy tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Economy {
    pub minerals: f32,
    pub gas: f32,
    /// Minerals gained per frame.
    #[serde(default)]
    pub mineral_rate: f32,
    /// Gas gained per frame.
    #[serde(default)]
    pub gas_rate: f32,
}

impl Economy {
    /// Create a snapshot.
    #[must_use]
    pub fn new(minerals: f32, gas: f32, mineral_rate: f32, gas_rate: f32) -> Self {
        Self {
            minerals,
            gas,
            mineral_rate,
            gas_rate,
        }
    }

    /// Frames until the bank covers `price` at the current income.
    ///
    /// Returns `None` when a shortfall exists with no income to close it.
    #[must_use]
    pub fn frames_until_affordable(&self, price: Price) -> Option<u32> {
        let minerals = frames_to_cover(price.minerals as f32 - self.minerals, self.mineral_rate)?;
        let gas = frames_to_cover(price.gas as f32 - self.gas, self.gas_rate)?;
        Some(minerals.max(gas))
    }

    /// The first frame at which `price` is affordable, counting from `now`.
    #[must_use]
    pub fn ready_frame(&self, price: Price, now: Frame) -> Option<Frame> {
        self.frames_until_affordable(price)
            .map(|frames| now.saturating_add(frames))
    }

    /// Add `frames` worth of income to the bank.
    pub fn accrue(&mut self, frames: u32) {
        self.minerals += self.mineral_rate * frames as f32;
        self.gas += self.gas_rate * frames as f32;
    }

    /// Deduct `price` if affordable. Returns `true` on success.
    pub fn spend(&mut self, price: Price) -> bool {
        if self.minerals < price.minerals as f32 || self.gas < price.gas as f32 {
            return false;
        }
        self.minerals -= price.minerals as f32;
        self.gas -= price.gas as f32;
        true
    }
}

fn frames_to_cover(shortfall: f32, rate: f32) -> Option<u32> {
    if shortfall <= 0.0 {
        return Some(0);
    }
    if rate <= 0.0 {
        return None;
    }
    Some((shortfall / rate).ceil() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_affordable() {
        let eco = Economy::new(300.0, 0.0, 1.0, 0.0);
        assert_eq!(eco.frames_until_affordable(Price::new(200, 0, 0)), Some(0));
        assert_eq!(eco.ready_frame(Price::new(200, 0, 0), 500), Some(500));
    }

    #[test]
    fn test_waits_for_slowest_resource() {
        let eco = Economy::new(100.0, 0.0, 1.0, 0.5);
        // 100 minerals short at 1/frame, 50 gas short at 0.5/frame.
        assert_eq!(eco.frames_until_affordable(Price::new(200, 50, 0)), Some(100));
        assert_eq!(eco.frames_until_affordable(Price::new(150, 100, 0)), Some(200));
    }

    #[test]
    fn test_no_income_never_affordable() {
        let eco = Economy::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(eco.frames_until_affordable(Price::new(50, 25, 0)), None);
    }

    #[test]
    fn test_accrue_and_spend() {
        let mut eco = Economy::new(0.0, 0.0, 2.0, 1.0);
        eco.accrue(50);
        assert!(!eco.spend(Price::new(150, 0, 0)));
        assert!(eco.spend(Price::new(100, 50, 0)));
        assert!(eco.minerals.abs() < f32::EPSILON);
        assert!(eco.gas.abs() < f32::EPSILON);
    }
}
