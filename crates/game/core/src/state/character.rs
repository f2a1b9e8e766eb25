//! The character document and its mutation boundary.
//!
//! Collaborators never touch the pipeline directly. They change sources
//! through [`Character::submit`], which applies the change and recomputes
//! when idle, or queues it when a pass is already running.

use crate::baseline::{Baseline, Restored};
use crate::config::RulesConfig;
use crate::diagnostics::Diagnostics;
use crate::pipeline::{RecomputeError, RecomputePhase, RecomputeReport, SheetEngine};
use crate::schema::{ConditionId, Pool};

use super::build::CharacterBuild;
use super::injury::Track;
use super::sources::{ActiveCondition, Injury, Item, ItemId, Slot, Sources};
use super::system::SystemState;

/// A change to a character's sources or persisted inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceChange {
    /// Add an item, replacing any item with the same id.
    AddItem(Item),
    /// Remove an item from the inventory and from every slot it occupies.
    RemoveItem(ItemId),
    Equip {
        slot: Slot,
        item: ItemId,
    },
    Unequip(Slot),
    ApplyCondition(ActiveCondition),
    RemoveCondition(ConditionId),
    AddInjury(Injury),
    RemoveInjury(String),
    /// Set a pool's current value. The next pass still caps it at max.
    SetCurrent {
        pool: Pool,
        current: i32,
    },
    SetManualModifier {
        track: Track,
        modifier: i32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Applied and recomputed.
    Applied(RecomputeReport),
    /// Submitted mid-pass; applied before a follow-up pass.
    Queued,
}

/// One character: build, sources, derived state and baseline.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub build: CharacterBuild,
    #[cfg_attr(feature = "serde", serde(default))]
    pub system: SystemState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sources: Sources,
    /// Absent on documents that were never built; the first pass builds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub baseline: Option<Baseline>,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) rules: RulesConfig,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) phase: RecomputePhase,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) pending: Vec<SourceChange>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) diagnostics: Diagnostics,
    /// Diagnostics raised while assembling the build; every pass starts from
    /// these.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) build_diagnostics: Diagnostics,
}

impl Character {
    /// An unbuilt character. Call [`rebuild`](Self::rebuild) or
    /// [`recompute`](Self::recompute) before reading derived state.
    pub fn new(name: &str, build: CharacterBuild, rules: RulesConfig) -> Self {
        Self {
            name: name.to_string(),
            build,
            system: SystemState::default(),
            sources: Sources::default(),
            baseline: None,
            rules,
            phase: RecomputePhase::Idle,
            pending: Vec::new(),
            diagnostics: Diagnostics::new(),
            build_diagnostics: Diagnostics::new(),
        }
    }

    pub fn phase(&self) -> RecomputePhase {
        self.phase
    }

    /// Diagnostics of the last pass.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Replace the rules. Takes effect on the next pass; pool formulas only
    /// change on rebuild.
    pub fn set_rules(&mut self, rules: RulesConfig) {
        self.rules = rules;
    }

    pub fn recompute(&mut self) -> Result<RecomputeReport, RecomputeError> {
        SheetEngine::new(self).recompute()
    }

    /// Reassemble the build into a fresh baseline, then recompute.
    ///
    /// Current values of surviving pools and manual injury modifiers carry
    /// over.
    pub fn rebuild(&mut self) -> Result<RecomputeReport, RecomputeError> {
        if let RecomputePhase::Recomputing { stage } = self.phase {
            return Err(RecomputeError::Reentrant { stage });
        }
        let baseline = self.build_from_scratch();
        self.baseline = Some(baseline);
        tracing::info!(character = %self.name, "rebuilt baseline");
        self.recompute()
    }

    /// Apply a source change.
    ///
    /// While idle the change applies and a recompute runs. During a pass it
    /// is queued for a follow-up pass.
    pub fn submit(&mut self, change: SourceChange) -> Result<SubmitOutcome, RecomputeError> {
        if !self.phase.is_idle() {
            tracing::debug!(?change, phase = ?self.phase, "queued source change");
            self.pending.push(change);
            return Ok(SubmitOutcome::Queued);
        }
        self.apply_change(change);
        self.recompute().map(SubmitOutcome::Applied)
    }

    pub(crate) fn apply_change(&mut self, change: SourceChange) {
        let sources = &mut self.sources;
        match change {
            SourceChange::AddItem(item) => {
                match sources.inventory.iter_mut().find(|held| held.id == item.id) {
                    Some(held) => *held = item,
                    None => sources.inventory.push(item),
                }
            }
            SourceChange::RemoveItem(id) => {
                sources.inventory.retain(|item| item.id != id);
                sources.equipment.unequip_item(&id);
            }
            SourceChange::Equip { slot, item } => {
                sources.equipment.equip(slot, item);
            }
            SourceChange::Unequip(slot) => {
                sources.equipment.unequip(slot);
            }
            SourceChange::ApplyCondition(condition) => {
                if !sources.conditions.iter().any(|held| held.id == condition.id) {
                    sources.conditions.push(condition);
                }
            }
            SourceChange::RemoveCondition(id) => {
                sources.conditions.retain(|condition| condition.id != id);
            }
            SourceChange::AddInjury(injury) => {
                match sources.injuries.iter_mut().find(|held| held.id == injury.id) {
                    Some(held) => *held = injury,
                    None => sources.injuries.push(injury),
                }
            }
            SourceChange::RemoveInjury(id) => {
                sources.injuries.retain(|injury| injury.id != id);
            }
            SourceChange::SetCurrent { pool, current } => match self.system.resources.get_mut(&pool) {
                Some(meter) => meter.current = Some(current),
                None => tracing::warn!(
                    character = %self.name,
                    pool = pool.as_ref(),
                    "ignoring current value for a pool this character lacks"
                ),
            },
            SourceChange::SetManualModifier { track, modifier } => {
                self.system.track_mut(track).modifier = modifier;
            }
        }
    }

    /// Restore working state from the baseline, building one first if the
    /// character has none.
    pub(crate) fn restore_baseline(&mut self) -> Restored {
        let baseline = match self.baseline.take() {
            Some(baseline) => baseline,
            None => {
                tracing::info!(character = %self.name, "no baseline, building from scratch");
                self.build_from_scratch()
            }
        };
        let restored = baseline.restore(&mut self.system);
        self.baseline = Some(baseline);
        restored
    }

    /// Assemble the build into working state and capture it.
    fn build_from_scratch(&mut self) -> Baseline {
        let (mut system, diagnostics) = self.build.assemble(&self.rules);

        for (pool, meter) in &mut system.resources {
            if let Some(previous) = self.system.resources.get(pool) {
                meter.current = previous.current;
            }
        }
        system.pain.modifier = self.system.pain.modifier;
        system.stress.modifier = self.system.stress.modifier;

        self.system = system;
        self.build_diagnostics = diagnostics;
        Baseline::capture(&self.system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticKind, SourceId};
    use crate::schema::{Attributes, BasicSkill, MovementMode};
    use crate::state::{ItemKind, Meter, ShieldWeight};

    fn character() -> Character {
        let mut character = Character::new(
            "Aria",
            CharacterBuild::new(Attributes::new(2, 1, 1, 1, 0)),
            RulesConfig::default(),
        );
        character.rebuild().expect("rebuild");
        character
    }

    fn buckler() -> Item {
        Item::new(
            "buckler",
            "Buckler",
            ItemKind::Shield {
                weight: ShieldWeight::Light,
            },
        )
        .with_code("SSB=1:GS[SSB=1]:RH=3")
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut character = character();
        let changes = [
            SourceChange::AddItem(
                Item::new("drill", "Drill", ItemKind::Training).with_code("SSA=1:GS[SSB=1]"),
            ),
            SourceChange::AddItem(buckler()),
            SourceChange::AddItem(Item::new("plate", "Plate", ItemKind::Armor).with_load(9)),
            SourceChange::Equip {
                slot: Slot::OffHand,
                item: ItemId::new("buckler"),
            },
            SourceChange::Equip {
                slot: Slot::Body,
                item: ItemId::new("plate"),
            },
            SourceChange::AddInjury(Injury::new("cut", 2, 0)),
            SourceChange::ApplyCondition(ActiveCondition::new("prone")),
        ];
        for change in changes {
            character.submit(change).expect("submit");
        }

        let first = character.system.clone();
        let diagnostics = character.diagnostics().clone();
        character.recompute().expect("recompute");
        character.recompute().expect("recompute");

        assert_eq!(character.system, first);
        assert_eq!(character.system.digest(), first.digest());
        assert_eq!(character.diagnostics(), &diagnostics);
        assert!(diagnostics.is_empty());

        let system = &character.system;
        assert_eq!(system.skill(BasicSkill::Fitness).map(|s| s.value), Some(1));
        assert_eq!(system.meter(Pool::Health), Some(&Meter::new(14, 17)));
        assert_eq!(system.encumbrance.load, 9);
        assert!(system.encumbrance.penalty > 0);
        assert_eq!(system.pain.calculated, 2);
        assert_eq!(system.movement.get(MovementMode::Walk), 1);
    }

    #[test]
    fn losing_max_never_heals_back() {
        let mut character = character();
        character
            .submit(SourceChange::AddItem(buckler()))
            .expect("add");
        character
            .submit(SourceChange::Equip {
                slot: Slot::OffHand,
                item: ItemId::new("buckler"),
            })
            .expect("equip");
        character
            .submit(SourceChange::SetCurrent {
                pool: Pool::Health,
                current: 17,
            })
            .expect("heal");
        assert_eq!(character.system.meter(Pool::Health), Some(&Meter::new(17, 17)));

        character
            .submit(SourceChange::Unequip(Slot::OffHand))
            .expect("unequip");
        assert_eq!(character.system.meter(Pool::Health), Some(&Meter::new(14, 14)));

        character
            .submit(SourceChange::Equip {
                slot: Slot::OffHand,
                item: ItemId::new("buckler"),
            })
            .expect("equip");
        assert_eq!(character.system.meter(Pool::Health), Some(&Meter::new(14, 17)));
    }

    #[test]
    fn set_current_is_capped_by_the_next_pass() {
        let mut character = character();
        character
            .submit(SourceChange::SetCurrent {
                pool: Pool::Resolve,
                current: 40,
            })
            .expect("set");
        assert_eq!(character.system.meter(Pool::Resolve), Some(&Meter::new(12, 12)));
    }

    #[test]
    fn bad_sources_are_diagnosed_not_fatal() {
        let mut character = character();
        let drill = Item::new("drill", "Drill", ItemKind::Training).with_code("SSA=1:GARBAGE:M1=2");
        let report = match character.submit(SourceChange::AddItem(drill)).expect("add") {
            SubmitOutcome::Applied(report) => report,
            SubmitOutcome::Queued => panic!("idle submit should apply"),
        };

        assert_eq!(character.system.skill(BasicSkill::Fitness).map(|s| s.value), Some(1));
        assert_eq!(character.system.mitigation(crate::schema::DamageType::Physical), 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            report.diagnostics.iter().next().map(|entry| (entry.kind, &entry.source)),
            Some((
                DiagnosticKind::UnrecognizedToken,
                &SourceId::Training(ItemId::new("drill"))
            ))
        );
    }

    #[test]
    fn removing_an_item_unequips_it() {
        let mut character = character();
        character
            .submit(SourceChange::AddItem(buckler()))
            .expect("add");
        character
            .submit(SourceChange::Equip {
                slot: Slot::OffHand,
                item: ItemId::new("buckler"),
            })
            .expect("equip");
        character
            .submit(SourceChange::RemoveItem(ItemId::new("buckler")))
            .expect("remove");

        assert!(character.sources.equipment.is_empty());
        assert!(character.diagnostics().is_empty());
    }

    #[test]
    fn first_pass_builds_a_missing_baseline() {
        let mut character = Character::new(
            "Bram",
            CharacterBuild::new(Attributes::new(1, 0, 0, 0, 0)),
            RulesConfig::default(),
        );
        assert!(character.baseline.is_none());

        character.recompute().expect("recompute");

        assert!(character.baseline.is_some());
        assert_eq!(character.system.meter(Pool::Health), Some(&Meter::new(12, 12)));
        assert_eq!(character.system.movement.get(MovementMode::Walk), 5);
    }

    #[test]
    fn rebuild_keeps_currents_and_modifiers() {
        let mut character = character();
        character
            .submit(SourceChange::SetCurrent {
                pool: Pool::Health,
                current: 9,
            })
            .expect("set");
        character
            .submit(SourceChange::SetManualModifier {
                track: Track::Pain,
                modifier: 1,
            })
            .expect("modifier");

        character.build.attributes.physique = 3;
        character.rebuild().expect("rebuild");

        assert_eq!(character.system.meter(Pool::Health), Some(&Meter::new(9, 16)));
        assert_eq!(character.system.pain.modifier, 1);
    }
}
