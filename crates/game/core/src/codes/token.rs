//! Tokens of a data code and the errors a token or code can raise.

use crate::config::RulesConfig;
use crate::delta::Delta;
use crate::error::{ErrorSeverity, SheetError};
use crate::schema::{
    AbilityGrant, Attribute, BasicSkill, CombatFeature, ConditionId, CraftingSkill, DamageType,
    Flags, Gate, GatedEffect, MagicSkill, MovementMode, RangeModifier, ResourceField, SkillPart,
    TraitCode, WeaponSkill,
};

/// One recognized token, before it is folded into a delta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Attribute(Attribute, i32),
    Skill(BasicSkill, SkillPart, i32),
    WeaponSkill(WeaponSkill, SkillPart, i32),
    MagicSkill(MagicSkill, SkillPart, i32),
    CraftingSkill(CraftingSkill, SkillPart, i32),
    Mitigation(DamageType, i32),
    Resource(ResourceField, i32),
    Movement(MovementMode, i32),
    Range(RangeModifier, i32),
    Feature(CombatFeature, i32),
    Immunity(ConditionId),
    Ability(AbilityGrant),
    Trait(TraitCode, Option<i32>),
    Flag(Flags),
    Conditional(Gate, Vec<GatedEffect>),
}

impl Effect {
    /// Fold this effect into `delta` through the typed mutation API.
    pub fn apply(self, delta: &mut Delta) {
        match self {
            Self::Attribute(attribute, amount) => delta.add_attribute(attribute, amount),
            Self::Skill(skill, part, amount) => delta.add_skill(skill, part, amount),
            Self::WeaponSkill(skill, part, amount) => delta.add_weapon_skill(skill, part, amount),
            Self::MagicSkill(skill, part, amount) => delta.add_magic_skill(skill, part, amount),
            Self::CraftingSkill(skill, part, amount) => {
                delta.add_crafting_skill(skill, part, amount)
            }
            Self::Mitigation(damage, amount) => delta.add_mitigation(damage, amount),
            Self::Resource(field, amount) => delta.add_resource(field, amount),
            Self::Movement(mode, amount) => delta.add_movement(mode, amount),
            Self::Range(range, amount) => delta.add_range(range, amount),
            Self::Feature(feature, amount) => delta.add_feature(feature, amount),
            Self::Immunity(condition) => delta.grant_immunity(condition),
            Self::Ability(ability) => delta.grant_ability(ability),
            Self::Trait(code, payload) => delta.set_trait(code, payload),
            Self::Flag(flags) => delta.set_flags(flags),
            Self::Conditional(gate, effects) => {
                for effect in effects {
                    delta.file_gated(gate, effect);
                }
                delta
            }
        };
    }
}

/// Why a single token was skipped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenErrorReason {
    #[error("unknown category `{0}`")]
    UnknownCategory(char),

    #[error("unknown sub-kind")]
    UnknownSubKind,

    #[error("unknown target")]
    UnknownTarget,

    #[error("missing `=` value")]
    MissingValue,

    #[error("invalid value `{0}`")]
    InvalidValue(String),

    #[error("tier symbols only apply to skills")]
    TierNotAllowed,

    #[error("value must be positive")]
    NotPositive,

    #[error("energy cost must not be negative")]
    NegativeCost,

    #[error("category cannot be gated")]
    NotGateable,

    #[error("conditionals cannot be nested")]
    NestedConditional,

    #[error("malformed conditional")]
    MalformedConditional,

    #[error(transparent)]
    Code(#[from] CodeError),
}

/// A fragment the parser skipped, with the reason.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{token}`: {reason}")]
pub struct TokenError {
    pub token: String,
    pub reason: TokenErrorReason,
}

impl TokenError {
    pub fn new(token: &str, reason: TokenErrorReason) -> Self {
        Self {
            token: token.to_string(),
            reason,
        }
    }
}

impl SheetError for TokenError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Content
    }

    fn error_code(&self) -> &'static str {
        match self.reason {
            TokenErrorReason::UnknownCategory(_) => "TOKEN_UNKNOWN_CATEGORY",
            TokenErrorReason::UnknownSubKind => "TOKEN_UNKNOWN_SUB_KIND",
            TokenErrorReason::UnknownTarget => "TOKEN_UNKNOWN_TARGET",
            TokenErrorReason::MissingValue => "TOKEN_MISSING_VALUE",
            TokenErrorReason::InvalidValue(_) => "TOKEN_INVALID_VALUE",
            TokenErrorReason::TierNotAllowed => "TOKEN_TIER_NOT_ALLOWED",
            TokenErrorReason::NotPositive => "TOKEN_NOT_POSITIVE",
            TokenErrorReason::NegativeCost => "TOKEN_NEGATIVE_COST",
            TokenErrorReason::NotGateable => "TOKEN_NOT_GATEABLE",
            TokenErrorReason::NestedConditional => "TOKEN_NESTED_CONDITIONAL",
            TokenErrorReason::MalformedConditional => "TOKEN_MALFORMED_CONDITIONAL",
            TokenErrorReason::Code(ref err) => err.error_code(),
        }
    }
}

/// A whole code that cannot be tokenized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("unbalanced bracket at byte {position}")]
    UnbalancedBracket { position: usize },

    #[error("code is {len} bytes, limit is {limit}", limit = RulesConfig::MAX_CODE_LEN)]
    TooLong { len: usize },
}

impl SheetError for CodeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Content
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnbalancedBracket { .. } => "CODE_UNBALANCED_BRACKET",
            Self::TooLong { .. } => "CODE_TOO_LONG",
        }
    }
}

/// Verify brackets balance and the code fits the length cap.
pub fn check_structure(code: &str) -> Result<(), CodeError> {
    if code.len() > RulesConfig::MAX_CODE_LEN {
        return Err(CodeError::TooLong { len: code.len() });
    }

    let mut depth = 0usize;
    let mut opened_at = 0;
    for (position, byte) in code.bytes().enumerate() {
        match byte {
            b'[' => {
                if depth == 0 {
                    opened_at = position;
                }
                depth += 1;
            }
            b']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(CodeError::UnbalancedBracket { position })?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(CodeError::UnbalancedBracket {
            position: opened_at,
        });
    }
    Ok(())
}

/// Split on `separator` outside brackets, trimming fragments and dropping
/// empty ones.
pub fn split_top_level(code: &str, separator: u8) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (position, byte) in code.bytes().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b if b == separator && depth == 0 => {
                fragments.push(&code[start..position]);
                start = position + 1;
            }
            _ => {}
        }
    }
    fragments.push(&code[start..]);

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
