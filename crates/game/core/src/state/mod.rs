//! Character model: working state, sources, and the character document.
//!
//! [`SystemState`] is the derived projection every pass rebuilds.
//! [`Sources`] are the authored inputs it is derived from. [`Character`] ties
//! them to a build and a baseline and owns the recomputation phase.
pub mod build;
pub mod character;
pub mod conditionals;
pub mod injury;
pub mod movement;
pub mod resources;
pub mod skills;
pub mod sources;
pub mod system;

pub use build::{BuildModule, CharacterBuild, Size};
pub use character::{Character, SourceChange, SubmitOutcome};
pub use conditionals::ConditionalTable;
pub use injury::{InjuryTrack, Track};
pub use movement::Movement;
pub use resources::Meter;
pub use skills::{DIE_SIZES, SkillScore};
pub use sources::{
    ActiveCondition, Equipment, Grip, Injury, Item, ItemId, ItemKind, ShieldWeight, Slot, Sources,
};
pub use system::{Encumbrance, Grants, MissingTarget, SystemState};
