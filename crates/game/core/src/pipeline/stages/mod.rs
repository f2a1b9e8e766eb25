//! Stage implementations, one module per [`Stage`](super::Stage).

pub(super) mod conditions;
pub(super) mod equipment;
pub(super) mod gates;
pub(super) mod injuries;
pub(super) mod movement;
pub(super) mod resources;
pub(super) mod talents;
pub(super) mod tiers;
pub(super) mod training;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::baseline::Baseline;
    use crate::config::RulesConfig;
    use crate::diagnostics::Diagnostics;
    use crate::pipeline::{Stage, StageContext};
    use crate::schema::{Attributes, AutoField, BasicSkill, Pool, WeaponSkill};
    use crate::state::{Meter, Movement, SkillScore, Sources, SystemState};
    use strum::IntoEnumIterator;

    /// A small built character: every basic and weapon skill, three pools.
    pub fn state() -> SystemState {
        let mut state = SystemState {
            attributes: Attributes::new(2, 1, 1, 1, 0),
            movement: Movement::walking(5),
            ..SystemState::default()
        };
        for skill in BasicSkill::iter() {
            state.skills.insert(skill, SkillScore::new(0, 0, 0));
        }
        for skill in WeaponSkill::iter() {
            state.weapon_skills.insert(skill, SkillScore::new(0, 0, 0));
        }
        state.resources.insert(Pool::Health, Meter::unseeded(14));
        state.resources.insert(Pool::Resolve, Meter::unseeded(12));
        state.resources.insert(Pool::Energy, Meter::unseeded(6));
        state.auto.insert(AutoField::Carry, 5);
        state
    }

    /// Run `stages` once on `state`, captured as its own baseline.
    pub fn run(stages: &[Stage], state: &mut SystemState, sources: &Sources) -> Diagnostics {
        let rules = RulesConfig::default();
        let baseline = Baseline::capture(state);
        let restored = baseline.restore(state);
        let mut diagnostics = Diagnostics::new();
        {
            let mut ctx = StageContext::new(&restored, state, sources, &rules, &mut diagnostics);
            for stage in stages {
                stage.run(&mut ctx);
            }
        }
        diagnostics
    }
}
