//! Skill scores on the working state.

use crate::config::SkillRules;
use crate::delta::SkillDelta;

/// Dice sizes indexed by tier.
pub const DIE_SIZES: [u8; 5] = [4, 6, 8, 10, 12];

/// Value, talent and dice tier of one skill.
///
/// Older documents stored the tier under `tierStep` or `dieStep`; those land
/// in `legacy_tier` and are folded into `tier` by the tier stage. An absent
/// tier reads as 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillScore {
    pub value: i32,
    pub talent: i32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tier: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "tierStep",
            alias = "dieStep",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub legacy_tier: Option<i32>,
}

impl SkillScore {
    pub const fn new(value: i32, talent: i32, tier: i32) -> Self {
        Self {
            value,
            talent,
            tier: Some(tier),
            legacy_tier: None,
        }
    }

    pub fn tier(&self) -> i32 {
        self.tier.unwrap_or(0)
    }

    /// Die size for the current tier.
    pub fn die(&self) -> u8 {
        let index = self.tier().clamp(0, DIE_SIZES.len() as i32 - 1) as usize;
        DIE_SIZES[index]
    }

    /// Fold any legacy tier field into the canonical one.
    ///
    /// A canonical tier takes precedence over a legacy one.
    pub fn normalize_tier(&mut self) {
        let legacy = self.legacy_tier.take();
        self.tier = Some(self.tier.or(legacy).unwrap_or(0));
    }

    /// Add a skill contribution; the resulting tier is clamped to the rules.
    pub fn apply(&mut self, change: &SkillDelta, rules: &SkillRules) {
        self.value = self.value.saturating_add(change.value);
        self.talent = self.talent.saturating_add(change.talent);
        if change.tier != 0 {
            let tier = self.tier().saturating_add(change.tier);
            self.tier = Some(rules.clamp_tier(tier));
        }
    }
}
