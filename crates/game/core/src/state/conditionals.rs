//! Conditional effects filed by gate, and their precomputed totals.

use std::collections::{BTreeMap, BTreeSet};

use crate::delta::Delta;
use crate::schema::{Gate, GateTarget, GatedEffect};

/// Gated effects collected during a pass.
///
/// `filed` holds every effect sources filed under a gate. `when` is the
/// aggregation table: for each gate, the total delta it contributes if it
/// holds, so checking a gate is a single lookup. `active` records which gates
/// held on the last pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionalTable {
    pub filed: BTreeMap<Gate, Vec<GatedEffect>>,
    pub when: BTreeMap<Gate, Delta>,
    pub active: BTreeSet<Gate>,
}

impl ConditionalTable {
    pub fn clear(&mut self) {
        self.filed.clear();
        self.when.clear();
        self.active.clear();
    }

    pub fn file(&mut self, gate: Gate, effects: &[GatedEffect]) {
        let filed = self.filed.entry(gate).or_default();
        filed.extend_from_slice(effects);
        filed.sort();
    }

    /// Rebuild `when` from `filed`.
    pub fn aggregate(&mut self) {
        self.when = self
            .filed
            .iter()
            .map(|(&gate, effects)| (gate, totals(effects)))
            .filter(|(_, delta)| !delta.is_empty())
            .collect();
    }

    /// Total contribution of a gate, if anything was filed under it.
    pub fn when(&self, gate: Gate) -> Option<&Delta> {
        self.when.get(&gate)
    }
}

fn totals(effects: &[GatedEffect]) -> Delta {
    let mut delta = Delta::empty();
    for effect in effects {
        match effect.target {
            GateTarget::Skill(skill, part) => delta.add_skill(skill, part, effect.amount),
            GateTarget::WeaponSkill(skill, part) => {
                delta.add_weapon_skill(skill, part, effect.amount)
            }
            GateTarget::Mitigation(damage) => delta.add_mitigation(damage, effect.amount),
        };
    }
    delta.prune();
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BasicSkill, DamageType, SkillPart};

    #[test]
    fn aggregate_sums_effects_per_gate() {
        let mut table = ConditionalTable::default();
        let deflection = GatedEffect::new(GateTarget::Skill(BasicSkill::Deflection, SkillPart::Value), 1);
        let armor = GatedEffect::new(GateTarget::Mitigation(DamageType::Physical), 2);

        table.file(Gate::LightShield, &[deflection]);
        table.file(Gate::LightShield, &[deflection, armor]);
        table.file(Gate::Mounted, &[]);
        table.aggregate();

        let totals = table.when(Gate::LightShield).expect("light shield totals");
        assert_eq!(totals.skill(BasicSkill::Deflection).value, 2);
        assert_eq!(totals.mitigation(DamageType::Physical), 2);
        assert!(table.when(Gate::Mounted).is_none());
    }
}
