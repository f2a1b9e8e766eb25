//! Conditional effects: evaluate gates from final equipment, then apply the
//! totals of every gate that holds.

use std::collections::BTreeSet;

use crate::delta::Delta;
use crate::pipeline::StageContext;
use crate::schema::{ConditionId, Gate};
use crate::state::{Grip, ItemKind, ShieldWeight, Slot, Sources};

pub fn run(ctx: &mut StageContext<'_>) {
    let active = satisfied(ctx.sources);
    let conditionals = &mut ctx.state.conditionals;
    conditionals.aggregate();
    conditionals.active = active;

    let totals: Vec<Delta> = conditionals
        .active
        .iter()
        .filter_map(|&gate| conditionals.when(gate).cloned())
        .collect();
    for delta in &totals {
        delta.apply_to(ctx.state, ctx.rules);
    }
}

/// Gates that hold for the current equipment and conditions.
pub fn satisfied(sources: &Sources) -> BTreeSet<Gate> {
    let mut gates = BTreeSet::new();

    let kinds = sources
        .equipment
        .iter()
        .filter_map(|(slot, _)| sources.equipped(slot))
        .map(|item| item.kind);
    for kind in kinds {
        if let ItemKind::Shield { weight } = kind {
            gates.insert(Gate::AnyShield);
            gates.insert(match weight {
                ShieldWeight::Light => Gate::LightShield,
                ShieldWeight::Heavy => Gate::HeavyShield,
            });
        }
    }

    let hand = |slot| sources.equipped(slot).map(|item| item.kind);
    let main = hand(Slot::MainHand);
    let off = hand(Slot::OffHand);
    if matches!(
        main,
        Some(ItemKind::Weapon {
            grip: Grip::TwoHanded
        })
    ) {
        gates.insert(Gate::TwoHanded);
    }
    if matches!(main, Some(ItemKind::Weapon { .. })) && matches!(off, Some(ItemKind::Weapon { .. }))
    {
        gates.insert(Gate::DualWielding);
    }
    if !matches!(hand(Slot::Body), Some(ItemKind::Armor)) {
        gates.insert(Gate::Unarmored);
    }
    if sources.has_condition(ConditionId::MOUNTED) {
        gates.insert(Gate::Mounted);
    }

    gates
}
