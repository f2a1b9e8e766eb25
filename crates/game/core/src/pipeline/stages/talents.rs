use crate::pipeline::StageContext;

/// Talent of every basic skill is its governing attribute's current value.
pub fn run(ctx: &mut StageContext<'_>) {
    let attributes = ctx.state.attributes.clone();
    for (skill, score) in ctx.state.skills.iter_mut() {
        score.talent = attributes.get(skill.attribute());
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::Stage;
    use crate::pipeline::stages::fixtures;
    use crate::schema::BasicSkill;
    use crate::state::Sources;

    #[test]
    fn talents_are_overwritten_from_attributes() {
        let mut state = fixtures::state();
        if let Some(score) = state.skills.get_mut(&BasicSkill::Might) {
            score.talent = 9;
        }

        fixtures::run(&[Stage::Talents], &mut state, &Sources::default());

        assert_eq!(state.skills[&BasicSkill::Might].talent, 2);
        assert_eq!(state.skills[&BasicSkill::Evasion].talent, 1);
        assert_eq!(state.skills[&BasicSkill::Deception].talent, 0);
    }
}
