//! Baseline snapshot: the as-built character every pass starts from.
//!
//! The baseline is captured when a character is built and only re-captured on
//! an explicit rebuild. Each pass restores working state from it before any
//! overlay runs, so overlays never stack across passes.

use std::collections::BTreeMap;

use crate::schema::{
    Attributes, AutoField, BasicSkill, CombatFeature, CraftingSkill, DamageType, Gate,
    GatedEffect, MagicSkill, Pool, RangeModifier, WeaponSkill,
};
use crate::state::{Grants, Movement, SkillScore, SystemState};

/// Proof that working state was restored from a baseline for the current pass.
///
/// Only [`Baseline::restore`] creates one, and stages only run through a
/// [`StageContext`](crate::pipeline::StageContext) built from it.
#[derive(Debug)]
pub struct Restored {
    _private: (),
}

/// Deep copy of the pipeline-owned part of [`SystemState`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Baseline {
    pub attributes: Attributes,
    pub skills: BTreeMap<BasicSkill, SkillScore>,
    pub weapon_skills: BTreeMap<WeaponSkill, SkillScore>,
    pub magic_skills: BTreeMap<MagicSkill, SkillScore>,
    pub crafting_skills: BTreeMap<CraftingSkill, SkillScore>,
    pub mitigation: BTreeMap<DamageType, i32>,
    /// Pool maxima; current values are never part of the baseline.
    pub maxima: BTreeMap<Pool, i32>,
    pub auto: BTreeMap<AutoField, i32>,
    pub movement: Movement,
    pub weapon_modifications: BTreeMap<RangeModifier, i32>,
    pub combat_features: BTreeMap<CombatFeature, i32>,
    pub grants: Grants,
    /// Gated effects filed by build sources.
    pub conditionals: BTreeMap<Gate, Vec<GatedEffect>>,
}

impl Baseline {
    pub fn capture(state: &SystemState) -> Self {
        Self {
            attributes: state.attributes.clone(),
            skills: state.skills.clone(),
            weapon_skills: state.weapon_skills.clone(),
            magic_skills: state.magic_skills.clone(),
            crafting_skills: state.crafting_skills.clone(),
            mitigation: state.mitigation.clone(),
            maxima: state
                .resources
                .iter()
                .map(|(&pool, meter)| (pool, meter.max))
                .collect(),
            auto: state.auto.clone(),
            movement: state.movement.clone(),
            weapon_modifications: state.weapon_modifications.clone(),
            combat_features: state.combat_features.clone(),
            grants: state.grants.clone(),
            conditionals: state.conditionals.filed.clone(),
        }
    }

    /// Overwrite the pipeline-owned fields of `state` and reset derived
    /// scratch fields.
    ///
    /// Resource currents and manual injury modifiers carry over. Pools the
    /// baseline lacks are removed; new pools start unseeded.
    pub fn restore(&self, state: &mut SystemState) -> Restored {
        state.attributes = self.attributes.clone();
        state.skills.clone_from(&self.skills);
        state.weapon_skills.clone_from(&self.weapon_skills);
        state.magic_skills.clone_from(&self.magic_skills);
        state.crafting_skills.clone_from(&self.crafting_skills);
        state.mitigation.clone_from(&self.mitigation);

        state.resources.retain(|pool, _| self.maxima.contains_key(pool));
        for (&pool, &max) in &self.maxima {
            state.resources.entry(pool).or_default().max = max;
        }

        state.auto.clone_from(&self.auto);
        state.movement.clone_from(&self.movement);
        state
            .weapon_modifications
            .clone_from(&self.weapon_modifications);
        state.combat_features.clone_from(&self.combat_features);
        state.grants.clone_from(&self.grants);

        state.encumbrance = Default::default();
        state.pain.reset();
        state.stress.reset();
        state.conditionals.clear();
        state.conditionals.filed.clone_from(&self.conditionals);

        Restored { _private: () }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConditionId, GateTarget};
    use crate::state::{Meter, Track};

    fn built() -> SystemState {
        let mut state = SystemState::default();
        state.attributes = Attributes::new(2, 1, 1, 0, 0);
        state.skills.insert(BasicSkill::Deflection, SkillScore::new(2, 0, 0));
        state.resources.insert(Pool::Health, Meter::unseeded(14));
        state.resources.insert(Pool::Resolve, Meter::unseeded(12));
        state.movement = Movement::walking(5);
        state
    }

    #[test]
    fn restore_discards_overlays_but_keeps_currents() {
        let mut state = built();
        let baseline = Baseline::capture(&state);

        state.attributes.physique = 9;
        state.skills.insert(BasicSkill::Deflection, SkillScore::new(7, 2, 1));
        state.resources.insert(Pool::Health, Meter::new(3, 20));
        state.grants.immunities.insert(ConditionId::new("prone"));
        state.pain.modifier = 2;
        state.pain.calculated = 8;
        state.conditionals.active.insert(Gate::Mounted);

        baseline.restore(&mut state);

        assert_eq!(state.attributes.physique, 2);
        assert_eq!(state.skills[&BasicSkill::Deflection], SkillScore::new(2, 0, 0));
        assert_eq!(state.resources[&Pool::Health], Meter::new(3, 14));
        assert!(state.grants.immunities.is_empty());
        assert_eq!(state.track(Track::Pain).modifier, 2);
        assert_eq!(state.track(Track::Pain).calculated, 0);
        assert!(state.conditionals.active.is_empty());
    }

    #[test]
    fn build_conditionals_survive_restore() {
        let mut state = built();
        let effect = GatedEffect::new(GateTarget::Mitigation(DamageType::Fire), 1);
        state.conditionals.file(Gate::Mounted, &[effect]);
        let baseline = Baseline::capture(&state);

        state.conditionals.file(Gate::AnyShield, &[effect]);
        baseline.restore(&mut state);

        assert_eq!(state.conditionals.filed.len(), 1);
        assert_eq!(state.conditionals.filed[&Gate::Mounted], vec![effect]);
    }

    #[test]
    fn pools_follow_the_baseline_set() {
        let mut state = built();
        state.resources.remove(&Pool::Resolve);
        state.resources.insert(Pool::Mana, Meter::new(4, 9));

        let baseline = Baseline::capture(&built());
        baseline.restore(&mut state);

        assert!(!state.resources.contains_key(&Pool::Mana));
        assert_eq!(state.resources[&Pool::Resolve], Meter::unseeded(12));
    }

    #[test]
    fn restore_is_idempotent() {
        let mut first = built();
        let baseline = Baseline::capture(&first);
        first.mitigation.insert(DamageType::Fire, 3);
        let mut second = first.clone();

        baseline.restore(&mut first);
        baseline.restore(&mut second);
        baseline.restore(&mut second);
        assert_eq!(first, second);
    }
}
