//! Overlay pipeline: nine ordered stages layered on baseline-restored state.
//!
//! Stage order is significant. Equipment bonuses exist before gates are
//! evaluated, injuries read maxima after every overlay, and the resource
//! clamp runs last so no overlay can leave current above max.
//!
//! ```text
//! Baseline::restore → Tiers → Talents → Training → Equipment → Gates
//!                   → Injuries → Conditions → Movement → Resources
//! ```
//!
//! Stages only receive a [`StageContext`], which cannot exist without the
//! [`Restored`] proof returned by [`Baseline::restore`](crate::baseline::Baseline::restore).

pub mod engine;
pub mod hook;
mod stages;

pub use engine::{RecomputeError, RecomputePhase, RecomputeReport, SheetEngine};
pub use hook::{RecomputeHook, StageTraceHook, default_hooks, sort_hooks};

use crate::baseline::Restored;
use crate::codes::{self, CodeError};
use crate::config::RulesConfig;
use crate::delta::Delta;
use crate::diagnostics::{Diagnostics, SourceId};
use crate::error::{ErrorSeverity, SheetError};
use crate::state::{ItemId, Slot, Sources, SystemState};

/// One stage of a recomputation pass.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Fold legacy tier fields into the canonical tier.
    Tiers,
    /// Basic skill talents from governing attributes.
    Talents,
    Training,
    /// Equipped items and encumbrance.
    Equipment,
    /// Conditional effects whose gates hold.
    Gates,
    Injuries,
    /// Reserved for status-driven numeric changes.
    Conditions,
    Movement,
    /// Cap current values at maxima.
    Resources,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Tiers,
        Stage::Talents,
        Stage::Training,
        Stage::Equipment,
        Stage::Gates,
        Stage::Injuries,
        Stage::Conditions,
        Stage::Movement,
        Stage::Resources,
    ];

    pub fn run(self, ctx: &mut StageContext<'_>) {
        tracing::debug!(stage = self.as_ref(), "running stage");
        match self {
            Stage::Tiers => stages::tiers::run(ctx),
            Stage::Talents => stages::talents::run(ctx),
            Stage::Training => stages::training::run(ctx),
            Stage::Equipment => stages::equipment::run(ctx),
            Stage::Gates => stages::gates::run(ctx),
            Stage::Injuries => stages::injuries::run(ctx),
            Stage::Conditions => stages::conditions::run(ctx),
            Stage::Movement => stages::movement::run(ctx),
            Stage::Resources => stages::resources::run(ctx),
        }
    }
}

/// Why a whole source contributed nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("malformed data code: {0}")]
    Code(#[from] CodeError),

    #[error("{slot} refers to `{item}`, which is not in the inventory")]
    MissingItem { slot: Slot, item: ItemId },

    #[error("`{item}` cannot be equipped in {slot}")]
    NotEquippable { slot: Slot, item: ItemId },
}

impl SheetError for SourceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Code(_) => ErrorSeverity::Content,
            Self::MissingItem { .. } | Self::NotEquippable { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Code(err) => err.error_code(),
            Self::MissingItem { .. } => "SOURCE_MISSING_ITEM",
            Self::NotEquippable { .. } => "SOURCE_NOT_EQUIPPABLE",
        }
    }
}

/// Everything a stage may read or write during one pass.
pub struct StageContext<'a> {
    pub state: &'a mut SystemState,
    pub sources: &'a Sources,
    pub rules: &'a RulesConfig,
    pub diagnostics: &'a mut Diagnostics,
    _restored: &'a Restored,
}

impl<'a> StageContext<'a> {
    pub(crate) fn new(
        restored: &'a Restored,
        state: &'a mut SystemState,
        sources: &'a Sources,
        rules: &'a RulesConfig,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            state,
            sources,
            rules,
            diagnostics,
            _restored: restored,
        }
    }

    /// Delta of one source, with every problem reported. See [`source_delta`].
    pub fn source_delta(&mut self, source: &SourceId, code: Option<&str>) -> Delta {
        source_delta(self.state, self.diagnostics, source, code)
    }

    pub fn source_failed(&mut self, source: &SourceId, err: SourceError) {
        self.diagnostics.source_failure(source, &err);
    }
}

/// Parse one source's code against `state`, reporting every problem.
///
/// Skipped tokens and dangling targets are reported individually; a
/// structurally broken code is a source failure and yields the identity.
pub fn source_delta(
    state: &SystemState,
    diagnostics: &mut Diagnostics,
    source: &SourceId,
    code: Option<&str>,
) -> Delta {
    let Some(code) = code else {
        return Delta::empty();
    };
    match codes::try_parse(code) {
        Ok(parsed) => {
            for err in &parsed.rejected {
                diagnostics.unrecognized(source, err);
            }
            for target in state.missing_targets(&parsed.delta) {
                diagnostics.dangling(source, target);
            }
            parsed.delta
        }
        Err(err) => {
            diagnostics.source_failure(source, &err.into());
            Delta::empty()
        }
    }
}
