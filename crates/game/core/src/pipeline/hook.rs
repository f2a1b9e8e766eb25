//! Hooks that run between pipeline stages.
//!
//! A hook sees the whole character after a stage completes. It may adjust
//! working state directly, or submit source changes through
//! [`Character::submit`](crate::state::Character::submit); those are queued
//! and applied before a follow-up pass.

use std::sync::Arc;

use crate::state::Character;

use super::Stage;

/// A hook applied after a pipeline stage.
///
/// Hooks are executed in priority order (lower priority values execute first).
pub trait RecomputeHook: Send + Sync {
    /// Lower values execute first. Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn should_trigger(&self, stage: Stage) -> bool;

    fn after_stage(&self, stage: Stage, character: &mut Character);
}

/// Emits a trace event with a short summary after every stage.
#[derive(Debug)]
pub struct StageTraceHook;

impl RecomputeHook for StageTraceHook {
    fn priority(&self) -> i32 {
        // After any hook that changes state
        100
    }

    fn should_trigger(&self, _stage: Stage) -> bool {
        tracing::enabled!(tracing::Level::TRACE)
    }

    fn after_stage(&self, stage: Stage, character: &mut Character) {
        let system = &character.system;
        tracing::trace!(
            character = %character.name,
            stage = stage.as_ref(),
            diagnostics = character.diagnostics().len(),
            active_gates = system.conditionals.active.len(),
            encumbrance = system.encumbrance.penalty,
            "stage complete"
        );
    }
}

/// Returns the default hooks, sorted by priority.
pub fn default_hooks() -> Arc<[Arc<dyn RecomputeHook>]> {
    let hooks: Vec<Arc<dyn RecomputeHook>> = vec![Arc::new(StageTraceHook)];
    sort_hooks(hooks)
}

/// Sort hooks by priority (lower values first).
pub fn sort_hooks(mut hooks: Vec<Arc<dyn RecomputeHook>>) -> Arc<[Arc<dyn RecomputeHook>]> {
    hooks.sort_by_key(|hook| hook.priority());
    hooks.into()
}
