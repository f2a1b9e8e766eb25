//! Effect-delta compiler and baseline/overlay recomputation for character
//! sheets.
//!
//! `sheet-core` turns compact data codes into typed [`Delta`]s and derives a
//! character's numeric state from a captured [`Baseline`] plus its current
//! sources. All derived state flows through [`pipeline::SheetEngine`]; content
//! loaders and hosts depend on the types re-exported here.
pub mod baseline;
pub mod codes;
pub mod config;
pub mod delta;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod state;

pub use baseline::{Baseline, Restored};
pub use codes::{CodeError, Parsed, TokenError, TokenErrorReason, parse, parse_delta, try_parse};
pub use config::{
    EngineRules, InjuryRules, MovementRules, PenaltyBand, PoolFormula, ResourceRules, RulesConfig,
    SkillRules, ThresholdBand,
};
pub use delta::{Delta, SkillDelta, merge_all};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, SourceId};
pub use error::{ErrorSeverity, SheetError};
pub use pipeline::{
    RecomputeError, RecomputeHook, RecomputePhase, RecomputeReport, SheetEngine, SourceError,
    Stage, StageContext,
};
pub use state::{
    ActiveCondition, BuildModule, Character, CharacterBuild, Equipment, Injury, Item, ItemId,
    ItemKind, Meter, Size, Slot, SourceChange, Sources, SubmitOutcome, SystemState,
};
