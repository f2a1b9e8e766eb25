//! Recomputation engine with an explicit re-entrancy state machine.
//!
//! A pass restores the baseline and runs every stage in order, calling hooks
//! after each stage. Source changes submitted while a pass is running are
//! queued on the character and applied before a follow-up pass.

use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::error::{ErrorSeverity, SheetError};
use crate::state::Character;

use super::{RecomputeHook, Stage, StageContext, default_hooks};

/// Where a character is in its recomputation cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecomputePhase {
    #[default]
    Idle,
    Recomputing {
        stage: Stage,
    },
}

impl RecomputePhase {
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecomputeError {
    #[error("recompute requested while the {stage} stage is running")]
    Reentrant { stage: Stage },

    #[error("{pending} changes still queued after {limit} follow-up passes")]
    FollowUpLimit { limit: u32, pending: usize },
}

impl SheetError for RecomputeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Reentrant { .. } => "RECOMPUTE_REENTRANT",
            Self::FollowUpLimit { .. } => "RECOMPUTE_FOLLOW_UP_LIMIT",
        }
    }
}

/// Outcome of a successful recompute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecomputeReport {
    /// Passes run, including follow-up passes.
    pub passes: u32,
    /// Diagnostics of the final pass.
    pub diagnostics: Diagnostics,
}

/// Drives recomputation of one character.
pub struct SheetEngine<'a> {
    character: &'a mut Character,
    hooks: Arc<[Arc<dyn RecomputeHook>]>,
}

impl<'a> SheetEngine<'a> {
    pub fn new(character: &'a mut Character) -> Self {
        Self {
            character,
            hooks: default_hooks(),
        }
    }

    /// Replace the hook set; hooks must already be sorted by priority.
    pub fn with_hooks(mut self, hooks: Arc<[Arc<dyn RecomputeHook>]>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Recompute derived state from the baseline and current sources.
    ///
    /// Fails with [`RecomputeError::Reentrant`] if a pass is already
    /// running. If hooks keep queueing changes beyond
    /// `rules.engine.max_follow_up_passes`, the remaining changes stay queued
    /// and [`RecomputeError::FollowUpLimit`] is returned.
    pub fn recompute(&mut self) -> Result<RecomputeReport, RecomputeError> {
        if let RecomputePhase::Recomputing { stage } = self.character.phase {
            return Err(RecomputeError::Reentrant { stage });
        }

        let limit = self.character.rules.engine.max_follow_up_passes;
        let mut passes = 0u32;
        loop {
            self.pass();
            passes += 1;

            if self.character.pending.is_empty() {
                break;
            }
            if passes > limit {
                return Err(RecomputeError::FollowUpLimit {
                    limit,
                    pending: self.character.pending.len(),
                });
            }
            let queued = std::mem::take(&mut self.character.pending);
            tracing::debug!(count = queued.len(), "applying queued source changes");
            for change in queued {
                self.character.apply_change(change);
            }
        }

        tracing::debug!(
            character = %self.character.name,
            passes,
            diagnostics = self.character.diagnostics.len(),
            "recompute complete"
        );
        Ok(RecomputeReport {
            passes,
            diagnostics: self.character.diagnostics.clone(),
        })
    }

    fn pass(&mut self) {
        let restored = self.character.restore_baseline();
        self.character.diagnostics = self.character.build_diagnostics.clone();

        for stage in Stage::ALL {
            self.character.phase = RecomputePhase::Recomputing { stage };
            {
                let character = &mut *self.character;
                let mut ctx = StageContext::new(
                    &restored,
                    &mut character.system,
                    &character.sources,
                    &character.rules,
                    &mut character.diagnostics,
                );
                stage.run(&mut ctx);
            }
            for hook in self.hooks.iter().filter(|hook| hook.should_trigger(stage)) {
                hook.after_stage(stage, self.character);
            }
        }

        self.character.phase = RecomputePhase::Idle;
    }
}
