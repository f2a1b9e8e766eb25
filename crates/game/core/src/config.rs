//! Rules configuration: tunable defaults for templates, overlays and the engine.
//!
//! Every section falls back to its defaults, so a TOML file only needs the
//! values it changes.

use crate::schema::{Attribute, Attributes, AutoField, ConditionId, Pool};

/// Rules tunables grouped by the pipeline concern that reads them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub skills: SkillRules,
    pub resources: ResourceRules,
    pub movement: MovementRules,
    pub injuries: InjuryRules,
    pub engine: EngineRules,
}

impl RulesConfig {
    // ===== compile-time caps =====
    /// Longest data code accepted by the parser, in bytes.
    pub const MAX_CODE_LEN: usize = 512;

    pub fn new() -> Self {
        Self::default()
    }
}

/// Dice tier bounds (indices into the die-size table).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillRules {
    pub tier_min: i32,
    pub tier_max: i32,
}

impl SkillRules {
    pub const DEFAULT_TIER_MIN: i32 = 0;
    pub const DEFAULT_TIER_MAX: i32 = 4;

    pub fn clamp_tier(&self, tier: i32) -> i32 {
        tier.clamp(self.tier_min, self.tier_max.max(self.tier_min))
    }
}

impl Default for SkillRules {
    fn default() -> Self {
        Self {
            tier_min: Self::DEFAULT_TIER_MIN,
            tier_max: Self::DEFAULT_TIER_MAX,
        }
    }
}

/// `base + per_point * attribute`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolFormula {
    pub base: i32,
    pub attribute: Attribute,
    pub per_point: i32,
}

impl PoolFormula {
    pub const fn new(base: i32, attribute: Attribute, per_point: i32) -> Self {
        Self {
            base,
            attribute,
            per_point,
        }
    }

    pub fn evaluate(&self, attributes: &Attributes) -> i32 {
        self.base
            .saturating_add(self.per_point.saturating_mul(attributes.get(self.attribute)))
    }
}

/// Template formulas for pools and defaults for auto fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceRules {
    pub health: PoolFormula,
    pub resolve: PoolFormula,
    pub energy: PoolFormula,
    pub mana: PoolFormula,
    /// Flat carry allowance added to physique.
    pub carry: i32,
    pub luck: i32,
    pub wounds: i32,
}

impl ResourceRules {
    pub fn formula(&self, pool: Pool) -> &PoolFormula {
        match pool {
            Pool::Health => &self.health,
            Pool::Resolve => &self.resolve,
            Pool::Energy => &self.energy,
            Pool::Mana => &self.mana,
        }
    }

    /// Template value of an auto field.
    pub fn auto_default(&self, field: AutoField, attributes: &Attributes) -> i32 {
        match field {
            AutoField::Initiative => attributes.finesse,
            AutoField::Detection => attributes.mind,
            AutoField::Carry => self.carry,
            AutoField::Luck => self.luck,
            AutoField::Wounds => self.wounds,
        }
    }
}

impl Default for ResourceRules {
    fn default() -> Self {
        Self {
            health: PoolFormula::new(10, Attribute::Physique, 2),
            resolve: PoolFormula::new(10, Attribute::Mind, 2),
            energy: PoolFormula::new(5, Attribute::Finesse, 1),
            mana: PoolFormula::new(5, Attribute::Knowledge, 2),
            carry: 5,
            luck: 0,
            wounds: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementRules {
    pub base_walk: i32,
    /// Walk speed while prone; never raises a lower speed.
    pub prone_walk: i32,
    /// Conditions that set walk to zero.
    pub immobilizing: Vec<ConditionId>,
}

impl MovementRules {
    pub fn is_immobilizing(&self, condition: &ConditionId) -> bool {
        self.immobilizing.contains(condition)
    }
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            base_walk: 5,
            prone_walk: 1,
            immobilizing: ["grappled", "restrained", "paralyzed", "immobilized", "unconscious"]
                .into_iter()
                .map(ConditionId::new)
                .collect(),
        }
    }
}

/// A pool at or below `percent` of its max adds `bonus` to its track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdBand {
    pub percent: i64,
    pub bonus: i32,
}

/// A track at or above `at` rolls `dice` penalty dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyBand {
    pub at: i32,
    pub dice: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InjuryRules {
    pub thresholds: Vec<ThresholdBand>,
    pub penalties: Vec<PenaltyBand>,
}

impl InjuryRules {
    /// Bonus from the highest satisfied band of `current <= max * percent / 100`.
    ///
    /// No band holds when `max` is not positive.
    pub fn threshold_bonus(&self, current: i32, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        let current = i64::from(current.min(max));
        self.thresholds
            .iter()
            .filter(|band| current * 100 <= i64::from(max) * band.percent)
            .map(|band| band.bonus)
            .max()
            .unwrap_or(0)
    }

    pub fn penalty_dice(&self, calculated: i32) -> u8 {
        self.penalties
            .iter()
            .filter(|band| calculated >= band.at)
            .map(|band| band.dice)
            .max()
            .unwrap_or(0)
    }
}

impl Default for InjuryRules {
    fn default() -> Self {
        Self {
            thresholds: vec![
                ThresholdBand {
                    percent: 25,
                    bonus: 4,
                },
                ThresholdBand {
                    percent: 50,
                    bonus: 2,
                },
            ],
            penalties: vec![
                PenaltyBand { at: 16, dice: 2 },
                PenaltyBand { at: 11, dice: 2 },
                PenaltyBand { at: 6, dice: 1 },
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineRules {
    /// Extra passes allowed for changes queued by hooks during a pass.
    pub max_follow_up_passes: u32,
}

impl EngineRules {
    pub const DEFAULT_MAX_FOLLOW_UP_PASSES: u32 = 4;
}

impl Default for EngineRules {
    fn default() -> Self {
        Self {
            max_follow_up_passes: Self::DEFAULT_MAX_FOLLOW_UP_PASSES,
        }
    }
}
