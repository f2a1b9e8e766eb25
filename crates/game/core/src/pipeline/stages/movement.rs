//! Movement totals and condition overrides.
//!
//! Overrides are the last movement adjustment of a pass: an immobilizing
//! condition sets walk to zero, otherwise `prone` lowers walk to the prone
//! speed. Conditions the character is immune to are ignored.

use crate::pipeline::StageContext;
use crate::schema::{ConditionId, MovementMode};

pub fn run(ctx: &mut StageContext<'_>) {
    let state = &mut *ctx.state;
    let rules = &ctx.rules.movement;
    state.movement.normalize();

    let conditions = ctx
        .sources
        .conditions
        .iter()
        .map(|condition| &condition.id)
        .filter(|id| !state.grants.is_immune(id));
    let mut prone = false;
    let mut immobilized = false;
    for id in conditions {
        immobilized |= rules.is_immobilizing(id);
        prone |= id.is(ConditionId::PRONE);
    }

    let walk = state.movement.get(MovementMode::Walk);
    if immobilized {
        state.movement.set(MovementMode::Walk, 0);
    } else if prone {
        state.movement.set(MovementMode::Walk, walk.min(rules.prone_walk));
    }

    for speed in state.movement.modes.values_mut() {
        *speed = (*speed).max(0);
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::Stage;
    use crate::pipeline::stages::fixtures;
    use crate::schema::{ConditionId, MovementMode};
    use crate::state::{ActiveCondition, Sources};

    fn with_conditions(names: &[&str]) -> Sources {
        Sources {
            conditions: names.iter().map(|name| ActiveCondition::new(name)).collect(),
            ..Sources::default()
        }
    }

    fn walk_after(names: &[&str], setup: impl FnOnce(&mut crate::state::SystemState)) -> i32 {
        let mut state = fixtures::state();
        setup(&mut state);
        fixtures::run(&[Stage::Movement], &mut state, &with_conditions(names));
        state.movement.get(MovementMode::Walk)
    }

    #[test]
    fn legacy_standard_speed_folds_into_walk() {
        assert_eq!(walk_after(&[], |state| state.movement.standard = Some(2)), 7);
    }

    #[test]
    fn prone_lowers_but_never_raises() {
        assert_eq!(walk_after(&["prone"], |_| {}), 1);
        assert_eq!(
            walk_after(&["prone"], |state| state.movement.set(MovementMode::Walk, 0)),
            0
        );
    }

    #[test]
    fn immobilizing_conditions_stop_walking() {
        assert_eq!(walk_after(&["grappled", "prone"], |_| {}), 0);
        assert_eq!(walk_after(&["Restrained"], |_| {}), 0);
    }

    #[test]
    fn immunity_ignores_the_condition() {
        let walk = walk_after(&["grappled"], |state| {
            state.grants.immunities.insert(ConditionId::new("grappled"));
        });
        assert_eq!(walk, 5);
    }

    #[test]
    fn speeds_are_floored_at_zero() {
        let mut state = fixtures::state();
        state.movement.set(MovementMode::Swim, -3);
        fixtures::run(&[Stage::Movement], &mut state, &Sources::default());
        assert_eq!(state.movement.get(MovementMode::Swim), 0);
    }
}
