//! Pain and stress tracks derived from injuries.

/// Which injury track a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Track {
    /// Driven by injuries and low health.
    Pain,
    /// Driven by injuries and low resolve.
    Stress,
}

/// One injury track.
///
/// `modifier` is a manual input that survives recomputation. Everything else
/// is derived by the injury stage on every pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InjuryTrack {
    /// Sum of injury contributions.
    pub sources: i32,
    /// Bonus from the pool having dropped below a threshold band.
    pub threshold: i32,
    pub modifier: i32,
    /// `max(0, sources + threshold + modifier)`.
    pub calculated: i32,
    pub penalty_dice: u8,
}

impl InjuryTrack {
    /// Clear derived values, keeping the manual modifier.
    pub fn reset(&mut self) {
        *self = Self {
            modifier: self.modifier,
            ..Self::default()
        };
    }
}
