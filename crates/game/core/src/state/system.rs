//! Working character state - the projection rebuilt on every pass.

use std::collections::{BTreeMap, BTreeSet};

use crate::delta::Delta;
use crate::schema::{
    AbilityGrant, Attributes, AutoField, BasicSkill, CombatFeature, ConditionId, CraftingSkill,
    DamageType, Flags, GateTarget, MagicSkill, Pool, RangeModifier, ResourceTarget, TraitCode,
    WeaponSkill,
};

use super::conditionals::ConditionalTable;
use super::injury::{InjuryTrack, Track};
use super::movement::Movement;
use super::resources::Meter;
use super::skills::SkillScore;

/// Non-numeric grants accumulated from the build and from sources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Grants {
    pub immunities: BTreeSet<ConditionId>,
    pub abilities: Vec<AbilityGrant>,
    pub traits: BTreeMap<TraitCode, Option<i32>>,
    pub flags: Flags,
}

impl Grants {
    pub fn is_immune(&self, condition: &ConditionId) -> bool {
        self.immunities.contains(condition)
    }
}

/// Encumbrance summary computed by the equipment stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Encumbrance {
    pub load: i32,
    pub allowance: i32,
    pub penalty: i32,
}

/// A delta target the character schema does not have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingTarget {
    Skill(BasicSkill),
    WeaponSkill(WeaponSkill),
    MagicSkill(MagicSkill),
    CraftingSkill(CraftingSkill),
    Pool(Pool),
    Auto(AutoField),
}

impl core::fmt::Display for MissingTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Skill(skill) => write!(f, "skill `{skill}`"),
            Self::WeaponSkill(skill) => write!(f, "weapon skill `{skill}`"),
            Self::MagicSkill(skill) => write!(f, "magic skill `{skill}`"),
            Self::CraftingSkill(skill) => write!(f, "crafting skill `{skill}`"),
            Self::Pool(pool) => write!(f, "resource pool `{pool}`"),
            Self::Auto(field) => write!(f, "auto field `{field}`"),
        }
    }
}

/// Derived numeric state of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SystemState {
    pub attributes: Attributes,
    pub skills: BTreeMap<BasicSkill, SkillScore>,
    pub weapon_skills: BTreeMap<WeaponSkill, SkillScore>,
    pub magic_skills: BTreeMap<MagicSkill, SkillScore>,
    pub crafting_skills: BTreeMap<CraftingSkill, SkillScore>,
    pub mitigation: BTreeMap<DamageType, i32>,
    pub resources: BTreeMap<Pool, Meter>,
    pub auto: BTreeMap<AutoField, i32>,
    pub movement: Movement,
    pub weapon_modifications: BTreeMap<RangeModifier, i32>,
    pub combat_features: BTreeMap<CombatFeature, i32>,
    pub grants: Grants,
    pub encumbrance: Encumbrance,
    pub pain: InjuryTrack,
    pub stress: InjuryTrack,
    pub conditionals: ConditionalTable,
}

impl SystemState {
    pub fn skill(&self, skill: BasicSkill) -> Option<&SkillScore> {
        self.skills.get(&skill)
    }

    pub fn weapon_skill(&self, skill: WeaponSkill) -> Option<&SkillScore> {
        self.weapon_skills.get(&skill)
    }

    pub fn mitigation(&self, damage: DamageType) -> i32 {
        self.mitigation.get(&damage).copied().unwrap_or(0)
    }

    pub fn meter(&self, pool: Pool) -> Option<&Meter> {
        self.resources.get(&pool)
    }

    pub fn auto(&self, field: AutoField) -> i32 {
        self.auto.get(&field).copied().unwrap_or(0)
    }

    pub fn feature(&self, feature: CombatFeature) -> i32 {
        self.combat_features.get(&feature).copied().unwrap_or(0)
    }

    pub fn track(&self, track: Track) -> &InjuryTrack {
        match track {
            Track::Pain => &self.pain,
            Track::Stress => &self.stress,
        }
    }

    pub fn track_mut(&mut self, track: Track) -> &mut InjuryTrack {
        match track {
            Track::Pain => &mut self.pain,
            Track::Stress => &mut self.stress,
        }
    }

    /// Targets of `delta` (direct or gated) that this character lacks.
    ///
    /// [`Delta::apply_to`] silently drops those contributions; callers report
    /// them per source before merging.
    pub fn missing_targets(&self, delta: &Delta) -> Vec<MissingTarget> {
        let mut missing = Vec::new();

        let gated = delta.conditionals.values().flatten().copied();
        let mut gated_skills = BTreeSet::new();
        let mut gated_weapons = BTreeSet::new();
        for effect in gated {
            match effect.target {
                GateTarget::Skill(skill, _) => {
                    gated_skills.insert(skill);
                }
                GateTarget::WeaponSkill(skill, _) => {
                    gated_weapons.insert(skill);
                }
                GateTarget::Mitigation(_) => {}
            }
        }

        let skills: BTreeSet<_> = delta.skills.keys().copied().chain(gated_skills).collect();
        missing.extend(
            skills
                .into_iter()
                .filter(|skill| !self.skills.contains_key(skill))
                .map(MissingTarget::Skill),
        );
        let weapons: BTreeSet<_> = delta
            .weapon_skills
            .keys()
            .copied()
            .chain(gated_weapons)
            .collect();
        missing.extend(
            weapons
                .into_iter()
                .filter(|skill| !self.weapon_skills.contains_key(skill))
                .map(MissingTarget::WeaponSkill),
        );
        missing.extend(
            delta
                .magic_skills
                .keys()
                .filter(|skill| !self.magic_skills.contains_key(skill))
                .map(|&skill| MissingTarget::MagicSkill(skill)),
        );
        missing.extend(
            delta
                .crafting_skills
                .keys()
                .filter(|skill| !self.crafting_skills.contains_key(skill))
                .map(|&skill| MissingTarget::CraftingSkill(skill)),
        );
        for field in delta.resources.keys() {
            match field.target() {
                ResourceTarget::Max(pool) if !self.resources.contains_key(&pool) => {
                    missing.push(MissingTarget::Pool(pool));
                }
                ResourceTarget::Auto(auto) if !self.auto.contains_key(&auto) => {
                    missing.push(MissingTarget::Auto(auto));
                }
                _ => {}
            }
        }

        missing
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Every map is ordered, so equal states always produce equal digests.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}
