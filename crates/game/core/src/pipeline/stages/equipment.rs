//! Equipped items and encumbrance.
//!
//! Load counts every resolved equipped item whose own delta lacks the
//! no-encumbrance flag; an item occupying several slots counts once.
//! The penalty is `max(0, load - (physique + carry))`.

use std::collections::BTreeSet;

use crate::delta::Delta;
use crate::diagnostics::SourceId;
use crate::pipeline::{SourceError, StageContext};
use crate::schema::{AutoField, BasicSkill, Flags, MovementMode};

/// Skills the encumbrance penalty is subtracted from.
const ENCUMBERED_SKILLS: [BasicSkill; 2] = [BasicSkill::Evasion, BasicSkill::Stealth];

pub fn run(ctx: &mut StageContext<'_>) {
    let sources = ctx.sources;
    let mut merged = Delta::empty();
    let mut seen = BTreeSet::new();
    let mut load = 0i32;

    for (slot, id) in sources.equipment.iter() {
        let source = SourceId::Equipped {
            slot,
            item: id.clone(),
        };
        let Some(item) = sources.item(id) else {
            ctx.source_failed(
                &source,
                SourceError::MissingItem {
                    slot,
                    item: id.clone(),
                },
            );
            continue;
        };
        if !item.kind.is_equippable() {
            ctx.source_failed(
                &source,
                SourceError::NotEquippable {
                    slot,
                    item: id.clone(),
                },
            );
            continue;
        }
        if !seen.insert(id) {
            continue;
        }

        let delta = ctx.source_delta(&source, item.code.as_deref());
        if !delta.flags.contains(Flags::NO_ENCUMBRANCE) {
            load = load.saturating_add(item.load);
        }
        merged.merge_from(&delta);
    }
    merged.apply_to(ctx.state, ctx.rules);

    let state = &mut *ctx.state;
    let allowance = state
        .attributes
        .physique
        .saturating_add(state.auto(AutoField::Carry));
    let penalty = load.saturating_sub(allowance).max(0);
    state.encumbrance.load = load;
    state.encumbrance.allowance = allowance;
    state.encumbrance.penalty = penalty;

    if penalty > 0 {
        tracing::debug!(load, allowance, penalty, "encumbered");
        for skill in ENCUMBERED_SKILLS {
            if let Some(score) = state.skills.get_mut(&skill) {
                score.value = score.value.saturating_sub(penalty);
            }
        }
        state.movement.adjust(MovementMode::Walk, -penalty);
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::DiagnosticKind;
    use crate::pipeline::Stage;
    use crate::pipeline::stages::fixtures;
    use crate::schema::{BasicSkill, DamageType, MovementMode};
    use crate::state::{Equipment, Item, ItemId, ItemKind, Slot, Sources};

    fn sources(items: Vec<Item>, equipped: &[(Slot, &str)]) -> Sources {
        let mut equipment = Equipment::empty();
        for &(slot, id) in equipped {
            equipment.equip(slot, ItemId::new(id));
        }
        Sources {
            inventory: items,
            equipment,
            ..Sources::default()
        }
    }

    #[test]
    fn equipped_items_apply_and_unequipped_do_not() {
        let mut state = fixtures::state();
        let sources = sources(
            vec![
                Item::new("mail", "Mail", ItemKind::Armor).with_code("M1=2"),
                Item::new("cloak", "Cloak", ItemKind::Gear).with_code("M3=1"),
            ],
            &[(Slot::Body, "mail")],
        );

        fixtures::run(&[Stage::Equipment], &mut state, &sources);

        assert_eq!(state.mitigation(DamageType::Physical), 2);
        assert_eq!(state.mitigation(DamageType::Cold), 0);
    }

    #[test]
    fn missing_and_unequippable_items_are_source_failures() {
        let mut state = fixtures::state();
        let sources = sources(
            vec![Item::new("drill", "Drill", ItemKind::Training).with_code("M1=2")],
            &[(Slot::Body, "drill"), (Slot::Head, "helm")],
        );

        let diagnostics = fixtures::run(&[Stage::Equipment], &mut state, &sources);

        assert_eq!(state.mitigation(DamageType::Physical), 0);
        assert_eq!(diagnostics.of_kind(DiagnosticKind::SourceFailure).count(), 2);
    }

    #[test]
    fn encumbrance_penalizes_evasion_stealth_and_walk() {
        let mut state = fixtures::state();
        let sources = sources(
            vec![
                Item::new("plate", "Plate", ItemKind::Armor).with_load(8),
                Item::new("pack", "Pack", ItemKind::Gear).with_load(4).with_code("NE"),
                Item::new("pick", "Pick", ItemKind::Gear).with_load(1),
            ],
            &[(Slot::Body, "plate"), (Slot::Back, "pack"), (Slot::MainHand, "pick")],
        );

        fixtures::run(&[Stage::Equipment], &mut state, &sources);

        // physique 2 + carry 5
        assert_eq!(state.encumbrance.load, 9);
        assert_eq!(state.encumbrance.allowance, 7);
        assert_eq!(state.encumbrance.penalty, 2);
        assert_eq!(state.skills[&BasicSkill::Evasion].value, -2);
        assert_eq!(state.skills[&BasicSkill::Stealth].value, -2);
        assert_eq!(state.movement.get(MovementMode::Walk), 3);
    }

    #[test]
    fn carry_bonuses_from_equipment_raise_the_allowance() {
        let mut state = fixtures::state();
        let sources = sources(
            vec![
                Item::new("plate", "Plate", ItemKind::Armor).with_load(8),
                Item::new("belt", "Belt", ItemKind::Gear).with_code("RC=1"),
            ],
            &[(Slot::Body, "plate"), (Slot::Hands, "belt")],
        );

        fixtures::run(&[Stage::Equipment], &mut state, &sources);

        assert_eq!(state.encumbrance.allowance, 8);
        assert_eq!(state.encumbrance.penalty, 0);
    }
}
