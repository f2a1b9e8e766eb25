//! Combat-facing targets: mitigation, weapon range modifiers and features.

/// Damage types a character can mitigate.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Acid,
    Poison,
    Psychic,
    Radiant,
    Necrotic,
    Arcane,
}

/// Range bands a weapon modification can extend or shorten.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RangeModifier {
    Melee,
    Short,
    Long,
}

/// How two contributions to the same combat feature combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combination {
    /// Tiered features: the strongest source wins.
    Maximum,
    /// Counted features: contributions add up.
    Sum,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatFeature {
    /// Tiered: armor penetration rank.
    Pierce,
    /// Tiered: follow-through on a felled foe.
    Cleave,
    /// Tiered: parry rank.
    Guard,
    /// Counted: extra attacks per turn.
    Attacks,
    /// Counted: widened critical range.
    Critical,
}

impl CombatFeature {
    pub const fn combination(self) -> Combination {
        match self {
            Self::Pierce | Self::Cleave | Self::Guard => Combination::Maximum,
            Self::Attacks | Self::Critical => Combination::Sum,
        }
    }

    /// Combine two contributions according to [`Self::combination`].
    pub fn combine(self, current: i32, incoming: i32) -> i32 {
        match self.combination() {
            Combination::Maximum => current.max(incoming),
            Combination::Sum => current.saturating_add(incoming),
        }
    }
}
