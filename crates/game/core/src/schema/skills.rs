//! Skill identifiers for the four skill categories.
//!
//! Basic skills are always governed by an attribute. Weapon, magic and
//! crafting skills carry their own talent values, authored by the build and
//! by training.

use super::Attribute;

/// The twenty basic skills, four per attribute.
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
pub enum BasicSkill {
    // Physique
    Fitness,
    Deflection,
    Might,
    Endurance,

    // Finesse
    Evasion,
    Stealth,
    Sleight,
    Reflexes,

    // Mind
    Awareness,
    Willpower,
    Insight,
    Focus,

    // Knowledge
    Lore,
    Medicine,
    Nature,
    Engineering,

    // Social
    Persuasion,
    Intimidation,
    Deception,
    Performance,
}

impl BasicSkill {
    /// The attribute whose value becomes this skill's talent.
    pub const fn attribute(self) -> Attribute {
        match self {
            Self::Fitness | Self::Deflection | Self::Might | Self::Endurance => Attribute::Physique,
            Self::Evasion | Self::Stealth | Self::Sleight | Self::Reflexes => Attribute::Finesse,
            Self::Awareness | Self::Willpower | Self::Insight | Self::Focus => Attribute::Mind,
            Self::Lore | Self::Medicine | Self::Nature | Self::Engineering => Attribute::Knowledge,
            Self::Persuasion | Self::Intimidation | Self::Deception | Self::Performance => {
                Attribute::Social
            }
        }
    }
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
pub enum WeaponSkill {
    Brawling,
    Blades,
    Bludgeons,
    Polearms,
    Bows,
    Throwing,
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
pub enum MagicSkill {
    Arcane,
    Divine,
    Primal,
    Occult,
    Elemental,
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
pub enum CraftingSkill {
    Smithing,
    Alchemy,
    Tailoring,
    Carpentry,
    Cooking,
    Jewelcraft,
}

/// Which member of a skill score an effect adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SkillPart {
    Value,
    Talent,
    Tier,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn four_basic_skills_per_attribute() {
        for attribute in Attribute::iter() {
            let governed = BasicSkill::iter()
                .filter(|skill| skill.attribute() == attribute)
                .count();
            assert_eq!(governed, 4, "{attribute} governs {governed} skills");
        }
    }

    #[test]
    fn category_sizes_match_code_tables() {
        assert_eq!(BasicSkill::iter().count(), 20);
        assert_eq!(WeaponSkill::iter().count(), 6);
        assert_eq!(MagicSkill::iter().count(), 5);
        assert_eq!(CraftingSkill::iter().count(), 6);
    }
}
