//! Gates - named conditions under which filed effects apply.

use super::{BasicSkill, DamageType, SkillPart, WeaponSkill};

/// A gating condition evaluated from final equipment and active conditions.
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
pub enum Gate {
    /// Any shield is equipped.
    AnyShield,
    LightShield,
    HeavyShield,
    /// The main hand holds a two-handed weapon.
    TwoHanded,
    /// Both hands hold weapons.
    DualWielding,
    /// Nothing armor-like occupies the body slot.
    Unarmored,
    /// The `mounted` condition is active.
    Mounted,
}

/// What a gated effect adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GateTarget {
    Skill(BasicSkill, SkillPart),
    WeaponSkill(WeaponSkill, SkillPart),
    Mitigation(DamageType),
}

/// One `{type, subtype, value}` record filed under a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatedEffect {
    pub target: GateTarget,
    pub amount: i32,
}

impl GatedEffect {
    pub const fn new(target: GateTarget, amount: i32) -> Self {
        Self { target, amount }
    }
}
