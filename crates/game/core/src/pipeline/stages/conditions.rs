use crate::pipeline::StageContext;

/// Reserved for status-driven numeric changes; currently a pass-through.
///
/// Movement overrides driven by conditions run in the movement stage.
pub fn run(ctx: &mut StageContext<'_>) {
    tracing::trace!(active = ctx.sources.conditions.len(), "conditions stage");
}
