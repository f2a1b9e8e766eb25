//! Resource meters - pools with a persisted current and a derived maximum.
//!
//! - Maximum values: restored from the baseline and adjusted by overlays
//! - Current values: game state, carried across recomputation passes
//!
//! The resource stage caps current at maximum. It never raises current,
//! so losing and regaining a maximum does not heal.

/// One pool's current and maximum value.
///
/// `current` is `None` until the pool is first seen by a recomputation pass,
/// which seeds it at the maximum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Meter {
    pub current: Option<i32>,
    pub max: i32,
}

impl Meter {
    pub const fn new(current: i32, max: i32) -> Self {
        Self {
            current: Some(current),
            max,
        }
    }

    /// A pool that has never been seeded.
    pub const fn unseeded(max: i32) -> Self {
        Self { current: None, max }
    }

    pub fn current(&self) -> i32 {
        self.current.unwrap_or(self.max)
    }

    /// Seed an unseeded pool at max, then cap current at max.
    ///
    /// Returns `true` if current changed.
    pub fn clamp(&mut self) -> bool {
        let before = self.current;
        let current = self.current.unwrap_or(self.max).min(self.max);
        self.current = Some(current);
        before != self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseeded_meter_starts_full() {
        let mut meter = Meter::unseeded(12);
        assert!(meter.clamp());
        assert_eq!(meter.current, Some(12));
    }

    #[test]
    fn clamp_caps_but_never_heals() {
        let mut meter = Meter::new(10, 10);

        meter.max = 8;
        meter.clamp();
        assert_eq!(meter.current(), 8);

        meter.max = 10;
        assert!(!meter.clamp());
        assert_eq!(meter.current(), 8);
    }
}
