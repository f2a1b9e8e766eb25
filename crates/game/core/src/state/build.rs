//! Character build: the authored choices a baseline is assembled from.

use strum::IntoEnumIterator;

use crate::config::RulesConfig;
use crate::delta::Delta;
use crate::diagnostics::{Diagnostics, SourceId};
use crate::pipeline;
use crate::schema::{
    Attributes, AutoField, BasicSkill, CraftingSkill, MagicSkill, MovementMode, Pool,
    ResourceField, SkillPart, WeaponSkill,
};

use super::movement::Movement;
use super::resources::Meter;
use super::skills::SkillScore;
use super::system::SystemState;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub fn delta(self) -> Delta {
        let mut delta = Delta::empty();
        match self {
            Self::Small => {
                delta
                    .add_movement(MovementMode::Walk, -1)
                    .add_skill(BasicSkill::Stealth, SkillPart::Value, 1)
                    .add_skill(BasicSkill::Evasion, SkillPart::Value, 1)
                    .add_resource(ResourceField::Carry, -1);
            }
            Self::Medium => {}
            Self::Large => {
                delta
                    .add_resource(ResourceField::Health, 2)
                    .add_movement(MovementMode::Walk, 1)
                    .add_skill(BasicSkill::Stealth, SkillPart::Value, -1)
                    .add_resource(ResourceField::Carry, 2);
            }
        }
        delta
    }
}

/// A named build choice (class feature, background, ...) carrying a code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildModule {
    pub name: String,
    pub code: String,
}

impl BuildModule {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterBuild {
    pub attributes: Attributes,
    pub size: Size,
    /// Spellcasters get magic skills and a mana pool.
    pub spellcaster: bool,
    /// Ancestry data code.
    pub ancestry: Option<String>,
    pub modules: Vec<BuildModule>,
}

impl CharacterBuild {
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_ancestry(mut self, code: &str) -> Self {
        self.ancestry = Some(code.to_string());
        self
    }

    pub fn with_module(mut self, module: BuildModule) -> Self {
        self.modules.push(module);
        self
    }

    pub fn spellcaster(mut self) -> Self {
        self.spellcaster = true;
        self
    }

    /// The blank character every build starts from.
    ///
    /// Pool maxima come from the build attributes alone.
    pub fn template(&self, rules: &RulesConfig) -> SystemState {
        let attributes = &self.attributes;
        let mut state = SystemState {
            attributes: attributes.clone(),
            movement: Movement::walking(rules.movement.base_walk),
            ..SystemState::default()
        };

        let zero = || SkillScore::new(0, 0, 0);
        state.skills = BasicSkill::iter().map(|skill| (skill, zero())).collect();
        state.weapon_skills = WeaponSkill::iter().map(|skill| (skill, zero())).collect();
        state.crafting_skills = CraftingSkill::iter().map(|skill| (skill, zero())).collect();
        if self.spellcaster {
            state.magic_skills = MagicSkill::iter().map(|skill| (skill, zero())).collect();
        }

        state.resources = Pool::iter()
            .filter(|&pool| self.spellcaster || pool != Pool::Mana)
            .map(|pool| {
                let max = rules.resources.formula(pool).evaluate(attributes);
                (pool, Meter::unseeded(max))
            })
            .collect();
        state.auto = AutoField::iter()
            .map(|field| (field, rules.resources.auto_default(field, attributes)))
            .collect();

        state
    }

    /// Template plus size, ancestry and module contributions, in that order.
    pub fn assemble(&self, rules: &RulesConfig) -> (SystemState, Diagnostics) {
        let mut state = self.template(rules);
        let mut diagnostics = Diagnostics::new();

        let size = self.size.delta();
        for target in state.missing_targets(&size) {
            diagnostics.dangling(&SourceId::Size, target);
        }
        size.apply_to(&mut state, rules);

        let ancestry = pipeline::source_delta(
            &state,
            &mut diagnostics,
            &SourceId::Ancestry,
            self.ancestry.as_deref(),
        );
        ancestry.apply_to(&mut state, rules);

        for module in &self.modules {
            let source = SourceId::Module(module.name.clone());
            let delta = pipeline::source_delta(&state, &mut diagnostics, &source, Some(&module.code));
            delta.apply_to(&mut state, rules);
        }

        tracing::debug!(
            size = self.size.as_ref(),
            modules = self.modules.len(),
            diagnostics = diagnostics.len(),
            "assembled build"
        );
        (state, diagnostics)
    }
}
