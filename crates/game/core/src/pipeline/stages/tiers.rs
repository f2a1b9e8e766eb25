use crate::pipeline::StageContext;

pub fn run(ctx: &mut StageContext<'_>) {
    let state = &mut *ctx.state;
    let scores = state
        .skills
        .values_mut()
        .chain(state.weapon_skills.values_mut())
        .chain(state.magic_skills.values_mut())
        .chain(state.crafting_skills.values_mut());
    for score in scores {
        score.normalize_tier();
    }
}
