use crate::pipeline::StageContext;

/// Cap every pool's current at its max, seeding new pools full.
pub fn run(ctx: &mut StageContext<'_>) {
    for (pool, meter) in ctx.state.resources.iter_mut() {
        if meter.clamp() {
            tracing::debug!(%pool, current = meter.current(), max = meter.max, "clamped pool");
        }
        debug_assert!(meter.current() <= meter.max);
    }
}
