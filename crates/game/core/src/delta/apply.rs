//! Projection of a delta onto working state.

use crate::config::RulesConfig;
use crate::schema::ResourceTarget;
use crate::state::SystemState;

use super::Delta;

impl Delta {
    /// Apply this delta on top of `state`.
    ///
    /// Pools adjust their maximum only, auto fields their value. Contributions
    /// to targets the state lacks are dropped; use
    /// [`SystemState::missing_targets`] to report them first. Gated effects are
    /// filed into the conditionals table and take effect in the gate stage.
    pub fn apply_to(&self, state: &mut SystemState, rules: &RulesConfig) {
        for (&attribute, &amount) in &self.attributes {
            let score = state.attributes.get_mut(attribute);
            *score = score.saturating_add(amount);
        }

        for (skill, change) in &self.skills {
            if let Some(score) = state.skills.get_mut(skill) {
                score.apply(change, &rules.skills);
            }
        }
        for (skill, change) in &self.weapon_skills {
            if let Some(score) = state.weapon_skills.get_mut(skill) {
                score.apply(change, &rules.skills);
            }
        }
        for (skill, change) in &self.magic_skills {
            if let Some(score) = state.magic_skills.get_mut(skill) {
                score.apply(change, &rules.skills);
            }
        }
        for (skill, change) in &self.crafting_skills {
            if let Some(score) = state.crafting_skills.get_mut(skill) {
                score.apply(change, &rules.skills);
            }
        }

        for (&damage, &amount) in &self.mitigation {
            let value = state.mitigation.entry(damage).or_insert(0);
            *value = value.saturating_add(amount);
        }

        for (&field, &amount) in &self.resources {
            match field.target() {
                ResourceTarget::Max(pool) => {
                    if let Some(meter) = state.resources.get_mut(&pool) {
                        meter.max = meter.max.saturating_add(amount);
                    }
                }
                ResourceTarget::Auto(auto) => {
                    if let Some(value) = state.auto.get_mut(&auto) {
                        *value = value.saturating_add(amount);
                    }
                }
            }
        }

        for (&mode, &amount) in &self.movement {
            state.movement.adjust(mode, amount);
        }
        for (&range, &amount) in &self.weapon_modifications {
            let value = state.weapon_modifications.entry(range).or_insert(0);
            *value = value.saturating_add(amount);
        }
        for (&feature, &amount) in &self.combat_features {
            state
                .combat_features
                .entry(feature)
                .and_modify(|current| *current = feature.combine(*current, amount))
                .or_insert(amount);
        }

        let grants = &mut state.grants;
        grants.immunities.extend(self.immunities.iter().cloned());
        if !self.abilities.is_empty() {
            grants.abilities.extend(self.abilities.iter().copied());
            grants.abilities.sort();
        }
        grants
            .traits
            .extend(self.traits.iter().map(|(&code, &payload)| (code, payload)));
        grants.flags |= self.flags;

        for (&gate, effects) in &self.conditionals {
            state.conditionals.file(gate, effects);
        }
    }
}
