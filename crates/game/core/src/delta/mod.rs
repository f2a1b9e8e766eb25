//! Delta - the typed effect set produced by parsing data codes.
//!
//! A delta is an aggregate of independent categories, each mapping a typed
//! target to a signed contribution. Deltas from many sources are combined with
//! the algebra in [`algebra`] and projected onto a character with
//! [`Delta::apply_to`].
//!
//! # Representation invariants
//!
//! - Zero contributions are never stored; [`Delta::prune`] runs after every
//!   mutation batch. Structural equality is therefore value equality, and
//!   [`Delta::empty`] is the only delta equal to the identity.
//! - `abilities` and every gate list in `conditionals` are kept sorted, so
//!   list concatenation compares equal regardless of merge order.

pub mod algebra;
mod apply;

use std::collections::{BTreeMap, BTreeSet};

use crate::schema::{
    AbilityGrant, Attribute, BasicSkill, CombatFeature, ConditionId, CraftingSkill, DamageType,
    Flags, Gate, GatedEffect, MagicSkill, MovementMode, RangeModifier, ResourceField, SkillPart,
    TraitCode, WeaponSkill,
};

pub use algebra::merge_all;

/// Contribution to one skill: flat value, talent and tier steps.
///
/// `tier` accumulates ±1 steps without clamping; clamping happens when the
/// delta is applied to a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillDelta {
    pub value: i32,
    pub talent: i32,
    pub tier: i32,
}

impl SkillDelta {
    pub const ZERO: Self = Self {
        value: 0,
        talent: 0,
        tier: 0,
    };

    pub const fn is_zero(&self) -> bool {
        self.value == 0 && self.talent == 0 && self.tier == 0
    }

    pub fn add(&mut self, part: SkillPart, amount: i32) {
        let slot = match part {
            SkillPart::Value => &mut self.value,
            SkillPart::Talent => &mut self.talent,
            SkillPart::Tier => &mut self.tier,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn combine(&mut self, other: &Self) {
        self.value = self.value.saturating_add(other.value);
        self.talent = self.talent.saturating_add(other.talent);
        self.tier = self.tier.saturating_add(other.tier);
    }
}

/// Typed effect set of one or more sources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Delta {
    pub attributes: BTreeMap<Attribute, i32>,
    pub skills: BTreeMap<BasicSkill, SkillDelta>,
    pub weapon_skills: BTreeMap<WeaponSkill, SkillDelta>,
    pub magic_skills: BTreeMap<MagicSkill, SkillDelta>,
    pub crafting_skills: BTreeMap<CraftingSkill, SkillDelta>,
    pub mitigation: BTreeMap<DamageType, i32>,
    pub resources: BTreeMap<ResourceField, i32>,
    pub movement: BTreeMap<MovementMode, i32>,
    pub weapon_modifications: BTreeMap<RangeModifier, i32>,
    pub combat_features: BTreeMap<CombatFeature, i32>,
    pub immunities: BTreeSet<ConditionId>,
    pub abilities: Vec<AbilityGrant>,
    /// Deduplicated by code; a later payload replaces an earlier one.
    pub traits: BTreeMap<TraitCode, Option<i32>>,
    pub conditionals: BTreeMap<Gate, Vec<GatedEffect>>,
    pub flags: Flags,
}

fn add_to<K: Ord>(map: &mut BTreeMap<K, i32>, key: K, amount: i32) {
    let slot = map.entry(key).or_insert(0);
    *slot = slot.saturating_add(amount);
}

impl Delta {
    /// The identity delta.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    // ===== typed mutation API (used by the parser and the build) =====

    pub fn add_attribute(&mut self, attribute: Attribute, amount: i32) -> &mut Self {
        add_to(&mut self.attributes, attribute, amount);
        self
    }

    pub fn add_skill(&mut self, skill: BasicSkill, part: SkillPart, amount: i32) -> &mut Self {
        self.skills.entry(skill).or_default().add(part, amount);
        self
    }

    pub fn add_weapon_skill(&mut self, skill: WeaponSkill, part: SkillPart, amount: i32) -> &mut Self {
        self.weapon_skills.entry(skill).or_default().add(part, amount);
        self
    }

    pub fn add_magic_skill(&mut self, skill: MagicSkill, part: SkillPart, amount: i32) -> &mut Self {
        self.magic_skills.entry(skill).or_default().add(part, amount);
        self
    }

    pub fn add_crafting_skill(
        &mut self,
        skill: CraftingSkill,
        part: SkillPart,
        amount: i32,
    ) -> &mut Self {
        self.crafting_skills
            .entry(skill)
            .or_default()
            .add(part, amount);
        self
    }

    pub fn add_mitigation(&mut self, damage: DamageType, amount: i32) -> &mut Self {
        add_to(&mut self.mitigation, damage, amount);
        self
    }

    pub fn add_resource(&mut self, field: ResourceField, amount: i32) -> &mut Self {
        add_to(&mut self.resources, field, amount);
        self
    }

    pub fn add_movement(&mut self, mode: MovementMode, amount: i32) -> &mut Self {
        add_to(&mut self.movement, mode, amount);
        self
    }

    pub fn add_range(&mut self, range: RangeModifier, amount: i32) -> &mut Self {
        add_to(&mut self.weapon_modifications, range, amount);
        self
    }

    /// Record a combat feature using the feature's own combination rule.
    pub fn add_feature(&mut self, feature: CombatFeature, amount: i32) -> &mut Self {
        self.combat_features
            .entry(feature)
            .and_modify(|current| *current = feature.combine(*current, amount))
            .or_insert(amount);
        self
    }

    pub fn grant_immunity(&mut self, condition: ConditionId) -> &mut Self {
        self.immunities.insert(condition);
        self
    }

    pub fn grant_ability(&mut self, ability: AbilityGrant) -> &mut Self {
        let at = self.abilities.partition_point(|existing| *existing <= ability);
        self.abilities.insert(at, ability);
        self
    }

    pub fn set_trait(&mut self, code: TraitCode, payload: Option<i32>) -> &mut Self {
        self.traits.insert(code, payload);
        self
    }

    pub fn set_flags(&mut self, flags: Flags) -> &mut Self {
        self.flags |= flags;
        self
    }

    pub fn file_gated(&mut self, gate: Gate, effect: GatedEffect) -> &mut Self {
        let effects = self.conditionals.entry(gate).or_default();
        let at = effects.partition_point(|existing| *existing <= effect);
        effects.insert(at, effect);
        self
    }

    /// Drop zero contributions and empty gate lists.
    pub fn prune(&mut self) {
        self.attributes.retain(|_, v| *v != 0);
        self.skills.retain(|_, v| !v.is_zero());
        self.weapon_skills.retain(|_, v| !v.is_zero());
        self.magic_skills.retain(|_, v| !v.is_zero());
        self.crafting_skills.retain(|_, v| !v.is_zero());
        self.mitigation.retain(|_, v| *v != 0);
        self.resources.retain(|_, v| *v != 0);
        self.movement.retain(|_, v| *v != 0);
        self.weapon_modifications.retain(|_, v| *v != 0);
        self.combat_features.retain(|_, v| *v != 0);
        for effects in self.conditionals.values_mut() {
            effects.retain(|effect| effect.amount != 0);
        }
        self.conditionals.retain(|_, effects| !effects.is_empty());
    }

    // ===== read accessors (absent targets read as zero) =====

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(&attribute).copied().unwrap_or(0)
    }

    pub fn skill(&self, skill: BasicSkill) -> SkillDelta {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn weapon_skill(&self, skill: WeaponSkill) -> SkillDelta {
        self.weapon_skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn magic_skill(&self, skill: MagicSkill) -> SkillDelta {
        self.magic_skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn crafting_skill(&self, skill: CraftingSkill) -> SkillDelta {
        self.crafting_skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn mitigation(&self, damage: DamageType) -> i32 {
        self.mitigation.get(&damage).copied().unwrap_or(0)
    }

    pub fn resource(&self, field: ResourceField) -> i32 {
        self.resources.get(&field).copied().unwrap_or(0)
    }

    pub fn movement(&self, mode: MovementMode) -> i32 {
        self.movement.get(&mode).copied().unwrap_or(0)
    }

    pub fn feature(&self, feature: CombatFeature) -> i32 {
        self.combat_features.get(&feature).copied().unwrap_or(0)
    }

    pub fn gated(&self, gate: Gate) -> &[GatedEffect] {
        self.conditionals.get(&gate).map(Vec::as_slice).unwrap_or(&[])
    }
}
