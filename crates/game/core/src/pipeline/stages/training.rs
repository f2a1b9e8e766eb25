use crate::delta::Delta;
use crate::diagnostics::SourceId;
use crate::pipeline::StageContext;

/// Training items are always active; their deltas merge and apply together.
pub fn run(ctx: &mut StageContext<'_>) {
    let sources = ctx.sources;
    let mut merged = Delta::empty();
    for item in sources.training() {
        let source = SourceId::Training(item.id.clone());
        let delta = ctx.source_delta(&source, item.code.as_deref());
        merged.merge_from(&delta);
    }
    merged.apply_to(ctx.state, ctx.rules);
}
