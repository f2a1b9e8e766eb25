//! Delta algebra: identity, pairwise merge and folds.
//!
//! `merge` is associative and commutative for every numeric category and for
//! immunities, abilities and conditionals. Two documented exceptions:
//!
//! - **Traits**: same-code traits are deduplicated and the right-hand payload
//!   wins, so `merge(a, b)` and `merge(b, a)` differ when payloads differ.
//! - **Tiered combat features** combine by maximum rather than by sum. This is
//!   still commutative, but repeated sources do not stack.

use super::Delta;

impl Delta {
    /// Merge `other` into `self`.
    pub fn merge_from(&mut self, other: &Delta) {
        for (&attribute, &amount) in &other.attributes {
            self.add_attribute(attribute, amount);
        }
        for (&skill, change) in &other.skills {
            self.skills.entry(skill).or_default().combine(change);
        }
        for (&skill, change) in &other.weapon_skills {
            self.weapon_skills.entry(skill).or_default().combine(change);
        }
        for (&skill, change) in &other.magic_skills {
            self.magic_skills.entry(skill).or_default().combine(change);
        }
        for (&skill, change) in &other.crafting_skills {
            self.crafting_skills.entry(skill).or_default().combine(change);
        }
        for (&damage, &amount) in &other.mitigation {
            self.add_mitigation(damage, amount);
        }
        for (&field, &amount) in &other.resources {
            self.add_resource(field, amount);
        }
        for (&mode, &amount) in &other.movement {
            self.add_movement(mode, amount);
        }
        for (&range, &amount) in &other.weapon_modifications {
            self.add_range(range, amount);
        }
        for (&feature, &amount) in &other.combat_features {
            self.add_feature(feature, amount);
        }

        self.immunities.extend(other.immunities.iter().cloned());
        self.abilities.extend(other.abilities.iter().copied());
        self.abilities.sort();
        self.traits.extend(other.traits.iter().map(|(&code, &payload)| (code, payload)));
        for (&gate, effects) in &other.conditionals {
            let filed = self.conditionals.entry(gate).or_default();
            filed.extend(effects.iter().copied());
            filed.sort();
        }
        self.flags |= other.flags;

        self.prune();
    }

    /// Pairwise merge; `b` is the later source.
    pub fn merge(a: &Delta, b: &Delta) -> Delta {
        let mut merged = a.clone();
        merged.merge_from(b);
        merged
    }
}

/// Fold `merge` over the identity, in iteration order.
pub fn merge_all<'a, I>(deltas: I) -> Delta
where
    I: IntoIterator<Item = &'a Delta>,
{
    deltas.into_iter().fold(Delta::empty(), |mut acc, delta| {
        acc.merge_from(delta);
        acc
    })
}
