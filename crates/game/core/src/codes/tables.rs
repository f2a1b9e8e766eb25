//! Letter tables of the data-code encoding.
//!
//! These mappings are part of the stored format and must not change.

use crate::schema::{
    AbilityKind, Attribute, BasicSkill, CombatFeature, ConditionId, CraftingSkill, DamageType,
    Flags, Frequency, Gate, MagicSkill, MovementMode, RangeModifier, ResourceField, SkillPart,
    TraitCode, WeaponSkill,
};

pub fn attribute(letter: &str) -> Option<Attribute> {
    Some(match letter {
        "P" => Attribute::Physique,
        "F" => Attribute::Finesse,
        "M" => Attribute::Mind,
        "K" => Attribute::Knowledge,
        "S" => Attribute::Social,
        _ => return None,
    })
}

/// Skill sub-kind: `S` adjusts the value, `T` the talent.
pub fn skill_part(letter: &str) -> Option<SkillPart> {
    match letter {
        "S" => Some(SkillPart::Value),
        "T" => Some(SkillPart::Talent),
        _ => None,
    }
}

pub fn basic_skill(letter: &str) -> Option<BasicSkill> {
    use BasicSkill::*;
    Some(match letter {
        "A" => Fitness,
        "B" => Deflection,
        "C" => Might,
        "D" => Endurance,
        "E" => Evasion,
        "F" => Stealth,
        "G" => Sleight,
        "H" => Reflexes,
        "I" => Awareness,
        "J" => Willpower,
        "K" => Insight,
        "L" => Focus,
        "M" => Lore,
        "N" => Medicine,
        "O" => Nature,
        "P" => Engineering,
        "Q" => Persuasion,
        "R" => Intimidation,
        "S" => Deception,
        "T" => Performance,
        _ => return None,
    })
}

pub fn weapon_skill(digit: &str) -> Option<WeaponSkill> {
    use WeaponSkill::*;
    Some(match digit {
        "1" => Brawling,
        "2" => Blades,
        "3" => Bludgeons,
        "4" => Polearms,
        "5" => Bows,
        "6" => Throwing,
        _ => return None,
    })
}

pub fn magic_skill(digit: &str) -> Option<MagicSkill> {
    use MagicSkill::*;
    Some(match digit {
        "1" => Arcane,
        "2" => Divine,
        "3" => Primal,
        "4" => Occult,
        "5" => Elemental,
        _ => return None,
    })
}

pub fn crafting_skill(digit: &str) -> Option<CraftingSkill> {
    use CraftingSkill::*;
    Some(match digit {
        "1" => Smithing,
        "2" => Alchemy,
        "3" => Tailoring,
        "4" => Carpentry,
        "5" => Cooking,
        "6" => Jewelcraft,
        _ => return None,
    })
}

pub fn damage_type(digits: &str) -> Option<DamageType> {
    use DamageType::*;
    Some(match digits {
        "1" => Physical,
        "2" => Fire,
        "3" => Cold,
        "4" => Lightning,
        "5" => Acid,
        "6" => Poison,
        "7" => Psychic,
        "8" => Radiant,
        "9" => Necrotic,
        "10" => Arcane,
        _ => return None,
    })
}

pub fn resource(letter: &str) -> Option<ResourceField> {
    use ResourceField::*;
    Some(match letter {
        "H" => Health,
        "R" => Resolve,
        "E" => Energy,
        "M" => Mana,
        "I" => Initiative,
        "D" => Detection,
        "C" => Carry,
        "L" => Luck,
        "W" => Wounds,
        _ => return None,
    })
}

pub fn movement(letter: &str) -> Option<MovementMode> {
    Some(match letter {
        "W" => MovementMode::Walk,
        "C" => MovementMode::Climb,
        "S" => MovementMode::Swim,
        "F" => MovementMode::Fly,
        _ => return None,
    })
}

pub fn range(letter: &str) -> Option<RangeModifier> {
    Some(match letter {
        "M" => RangeModifier::Melee,
        "S" => RangeModifier::Short,
        "L" => RangeModifier::Long,
        _ => return None,
    })
}

pub fn feature(letter: &str) -> Option<CombatFeature> {
    Some(match letter {
        "P" => CombatFeature::Pierce,
        "C" => CombatFeature::Cleave,
        "G" => CombatFeature::Guard,
        "A" => CombatFeature::Attacks,
        "K" => CombatFeature::Critical,
        _ => return None,
    })
}

/// Immunity codes form an open alphabet; unknown codes become the lower-cased
/// code itself.
pub fn condition(code: &str) -> ConditionId {
    let name = match code {
        "BL" => "bleeding",
        "PO" => "poisoned",
        "FR" => "frightened",
        "ST" => "stunned",
        "PR" => "prone",
        "GR" => "grappled",
        "PA" => "paralyzed",
        "RE" => "restrained",
        "CH" => "charmed",
        "BU" => "burning",
        other => other,
    };
    ConditionId::new(name)
}

pub fn trait_code(letters: &str) -> Option<TraitCode> {
    Some(match letters {
        "DV" => TraitCode::Darkvision,
        "RG" => TraitCode::Regeneration,
        "FL" => TraitCode::Fearless,
        "NM" => TraitCode::Nimble,
        "TS" => TraitCode::ThickSkinned,
        "AQ" => TraitCode::Amphibious,
        _ => return None,
    })
}

pub fn ability_kind(letter: &str) -> Option<AbilityKind> {
    match letter {
        "A" => Some(AbilityKind::Action),
        "R" => Some(AbilityKind::Reaction),
        _ => None,
    }
}

pub fn frequency(letter: &str) -> Option<Frequency> {
    match letter {
        "D" => Some(Frequency::Daily),
        "U" => Some(Frequency::PerUse),
        _ => None,
    }
}

pub fn gate(letter: &str) -> Option<Gate> {
    use Gate::*;
    Some(match letter {
        "S" => AnyShield,
        "L" => LightShield,
        "H" => HeavyShield,
        "T" => TwoHanded,
        "D" => DualWielding,
        "U" => Unarmored,
        "M" => Mounted,
        _ => return None,
    })
}

pub fn flag(letters: &str) -> Option<Flags> {
    Some(match letters {
        "NE" => Flags::NO_ENCUMBRANCE,
        "MG" => Flags::MAGICAL,
        "SV" => Flags::SILVERED,
        "UB" => Flags::UNBREAKABLE,
        "LT" => Flags::LIGHT_SOURCE,
        "QD" => Flags::QUICK_DRAW,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    #[test]
    fn every_basic_skill_has_exactly_one_letter() {
        let mapped: Vec<_> = LETTERS
            .chars()
            .filter_map(|c| basic_skill(&c.to_string()))
            .collect();
        assert_eq!(mapped.len(), BasicSkill::iter().count());
        for skill in BasicSkill::iter() {
            assert!(mapped.contains(&skill), "{skill} has no letter");
        }
    }

    #[test]
    fn mitigation_accepts_two_digit_index() {
        assert_eq!(damage_type("10"), Some(DamageType::Arcane));
        assert_eq!(damage_type("11"), None);
        assert_eq!(damage_type("0"), None);
    }

    #[test]
    fn unknown_immunity_codes_are_kept_lowercased() {
        assert_eq!(condition("PR").as_str(), "prone");
        assert_eq!(condition("ZZ").as_str(), "zz");
    }

    #[test]
    fn letters_are_case_sensitive() {
        assert_eq!(attribute("p"), None);
        assert_eq!(gate("l"), None);
        assert_eq!(flag("ne"), None);
    }
}
