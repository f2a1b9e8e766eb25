//! Effect schema - every target a data code can modify.
//!
//! All targets are closed enums so that a mapping gap is an exhaustiveness
//! error at compile time. The only open set is [`ConditionId`].

pub mod attributes;
pub mod combat;
pub mod gate;
pub mod grants;
pub mod resources;
pub mod skills;

pub use attributes::{Attribute, Attributes};
pub use combat::{CombatFeature, Combination, DamageType, RangeModifier};
pub use gate::{Gate, GateTarget, GatedEffect};
pub use grants::{AbilityGrant, AbilityKind, ConditionId, Flags, Frequency, TraitCode};
pub use resources::{AutoField, MovementMode, Pool, ResourceField, ResourceTarget};
pub use skills::{BasicSkill, CraftingSkill, MagicSkill, SkillPart, WeaponSkill};
