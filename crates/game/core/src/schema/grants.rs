//! Non-numeric grants: immunities, abilities, traits and flags.

use bitflags::bitflags;

/// Name of a condition (status), normalized to lower case.
///
/// Conditions form an open set: content may introduce names the engine has
/// never seen, so this is a string newtype rather than an enum.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConditionId(String);

impl ConditionId {
    pub const PRONE: &'static str = "prone";
    pub const MOUNTED: &'static str = "mounted";

    pub fn new(name: &str) -> Self {
        Self(name.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a condition name.
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name.trim())
    }
}

impl core::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AbilityKind {
    Action,
    Reaction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Frequency {
    /// Once per day.
    Daily,
    /// Any number of times, paying the energy cost each use.
    PerUse,
}

/// A granted ability descriptor.
///
/// Grants are additive: two sources granting the same shape yield two grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityGrant {
    pub kind: AbilityKind,
    pub frequency: Frequency,
    pub magical: bool,
    pub energy_cost: u32,
}

/// Trait markers a source can confer.
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
pub enum TraitCode {
    Darkvision,
    Regeneration,
    Fearless,
    Nimble,
    ThickSkinned,
    Amphibious,
}

bitflags! {
    /// Named boolean toggles carried by a source.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Flags: u8 {
        /// The item adds no load to encumbrance.
        const NO_ENCUMBRANCE = 1 << 0;
        const MAGICAL        = 1 << 1;
        const SILVERED       = 1 << 2;
        const UNBREAKABLE    = 1 << 3;
        const LIGHT_SOURCE   = 1 << 4;
        const QUICK_DRAW     = 1 << 5;
    }
}
