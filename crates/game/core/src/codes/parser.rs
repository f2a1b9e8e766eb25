//! Fragment parser: one fragment in, one [`Effect`] or [`TokenErrorReason`] out.

use crate::delta::Delta;
use crate::schema::{AbilityGrant, GateTarget, GatedEffect, SkillPart};

use super::tables;
use super::token::{
    CodeError, Effect, TokenError, TokenErrorReason, check_structure, split_top_level,
};

/// Result of parsing one data code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parsed {
    pub delta: Delta,
    /// One entry per skipped fragment, in code order.
    pub rejected: Vec<TokenError>,
}

impl Parsed {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parse a code, failing only if the code as a whole is malformed.
///
/// Unrecognized fragments are skipped and listed in [`Parsed::rejected`].
pub fn try_parse(code: &str) -> Result<Parsed, CodeError> {
    let code = code.trim();
    check_structure(code)?;

    let mut parsed = Parsed::default();
    for fragment in split_top_level(code, b':') {
        match parse_fragment(fragment, &mut parsed.rejected) {
            Ok(effect) => {
                tracing::trace!(token = fragment, ?effect, "parsed token");
                effect.apply(&mut parsed.delta);
            }
            Err(reason) => {
                tracing::trace!(token = fragment, %reason, "rejected token");
                parsed.rejected.push(TokenError::new(fragment, reason));
            }
        }
    }
    parsed.delta.prune();
    Ok(parsed)
}

/// Parse a code fail-soft.
///
/// A structurally malformed code yields the identity delta and a single
/// rejection covering the whole code.
pub fn parse(code: &str) -> Parsed {
    try_parse(code).unwrap_or_else(|err| Parsed {
        delta: Delta::empty(),
        rejected: vec![TokenError::new(code.trim(), err.into())],
    })
}

/// Parse a code and keep only the delta.
pub fn parse_delta(code: &str) -> Delta {
    parse(code).delta
}

enum Value {
    Int(i32),
    Tier(i32),
}

fn split_first(s: &str) -> Option<(&str, &str)> {
    let first = s.chars().next()?;
    Some(s.split_at(first.len_utf8()))
}

fn value(raw: &str) -> Result<Value, TokenErrorReason> {
    match raw {
        "X" => Ok(Value::Tier(1)),
        "Y" => Ok(Value::Tier(-1)),
        _ => int(raw).map(Value::Int),
    }
}

fn int(raw: &str) -> Result<i32, TokenErrorReason> {
    if matches!(raw, "X" | "Y") {
        return Err(TokenErrorReason::TierNotAllowed);
    }
    let invalid = || TokenErrorReason::InvalidValue(raw.to_string());
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

fn skill<T>(
    rest: &str,
    raw: &str,
    target: fn(&str) -> Option<T>,
) -> Result<(T, SkillPart, i32), TokenErrorReason> {
    let (sub, letter) = split_first(rest).ok_or(TokenErrorReason::UnknownSubKind)?;
    let part = tables::skill_part(sub).ok_or(TokenErrorReason::UnknownSubKind)?;
    let skill = target(letter).ok_or(TokenErrorReason::UnknownTarget)?;
    Ok(match value(raw)? {
        Value::Int(amount) => (skill, part, amount),
        Value::Tier(step) => (skill, SkillPart::Tier, step),
    })
}

fn lookup<T>(found: Option<T>) -> Result<T, TokenErrorReason> {
    found.ok_or(TokenErrorReason::UnknownTarget)
}

fn is_category(letter: &str) -> bool {
    matches!(
        letter,
        "A" | "S" | "W" | "P" | "C" | "M" | "R" | "V" | "D" | "F" | "I" | "T" | "B" | "G"
    )
}

fn unknown_category(letter: &str) -> TokenErrorReason {
    TokenErrorReason::UnknownCategory(letter.chars().next().unwrap_or('?'))
}

fn parse_fragment(
    fragment: &str,
    rejected: &mut Vec<TokenError>,
) -> Result<Effect, TokenErrorReason> {
    if fragment.starts_with('G') {
        return conditional(fragment, rejected);
    }
    match fragment.split_once('=') {
        Some((head, raw)) => effect(head, raw),
        None => bare(fragment),
    }
}

/// Flags and payload-less traits.
fn bare(fragment: &str) -> Result<Effect, TokenErrorReason> {
    if let Some(flags) = tables::flag(fragment) {
        return Ok(Effect::Flag(flags));
    }
    let (category, rest) = split_first(fragment).ok_or(TokenErrorReason::MissingValue)?;
    match category {
        "T" => Ok(Effect::Trait(lookup(tables::trait_code(rest))?, None)),
        _ if is_category(category) => Err(TokenErrorReason::MissingValue),
        _ => Err(unknown_category(category)),
    }
}

fn effect(head: &str, raw: &str) -> Result<Effect, TokenErrorReason> {
    let (category, rest) = split_first(head).ok_or(TokenErrorReason::UnknownCategory('='))?;
    Ok(match category {
        "A" => Effect::Attribute(lookup(tables::attribute(rest))?, int(raw)?),
        "S" => {
            let (skill, part, amount) = skill(rest, raw, tables::basic_skill)?;
            Effect::Skill(skill, part, amount)
        }
        "W" => {
            let (skill, part, amount) = skill(rest, raw, tables::weapon_skill)?;
            Effect::WeaponSkill(skill, part, amount)
        }
        "P" => {
            let (skill, part, amount) = skill(rest, raw, tables::magic_skill)?;
            Effect::MagicSkill(skill, part, amount)
        }
        "C" => {
            let (skill, part, amount) = skill(rest, raw, tables::crafting_skill)?;
            Effect::CraftingSkill(skill, part, amount)
        }
        "M" => Effect::Mitigation(lookup(tables::damage_type(rest))?, int(raw)?),
        "R" => Effect::Resource(lookup(tables::resource(rest))?, int(raw)?),
        "V" => Effect::Movement(lookup(tables::movement(rest))?, int(raw)?),
        "D" => Effect::Range(lookup(tables::range(rest))?, int(raw)?),
        "F" => Effect::Feature(lookup(tables::feature(rest))?, int(raw)?),
        "I" => immunity(rest, raw)?,
        "T" => Effect::Trait(lookup(tables::trait_code(rest))?, Some(int(raw)?)),
        "B" => ability(rest, raw)?,
        other => return Err(unknown_category(other)),
    })
}

fn immunity(code: &str, raw: &str) -> Result<Effect, TokenErrorReason> {
    let well_formed = (1..=2).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if !well_formed {
        return Err(TokenErrorReason::UnknownTarget);
    }
    if int(raw)? <= 0 {
        return Err(TokenErrorReason::NotPositive);
    }
    Ok(Effect::Immunity(tables::condition(code)))
}

/// `B<kind><frequency>[M]=<cost>`.
fn ability(rest: &str, raw: &str) -> Result<Effect, TokenErrorReason> {
    let (kind, rest) = split_first(rest).ok_or(TokenErrorReason::UnknownSubKind)?;
    let kind = tables::ability_kind(kind).ok_or(TokenErrorReason::UnknownSubKind)?;
    let (frequency, rest) = split_first(rest).ok_or(TokenErrorReason::UnknownTarget)?;
    let frequency = lookup(tables::frequency(frequency))?;
    let magical = match rest {
        "" => false,
        "M" => true,
        _ => return Err(TokenErrorReason::UnknownTarget),
    };
    let energy_cost = u32::try_from(int(raw)?).map_err(|_| TokenErrorReason::NegativeCost)?;
    Ok(Effect::Ability(AbilityGrant {
        kind,
        frequency,
        magical,
        energy_cost,
    }))
}

/// `G<gate>[tok,tok,...]`; inner tokens are skill, weapon skill or mitigation
/// effects and are rejected one by one.
fn conditional(
    fragment: &str,
    rejected: &mut Vec<TokenError>,
) -> Result<Effect, TokenErrorReason> {
    let rest = &fragment[1..];
    let open = rest
        .find('[')
        .ok_or(TokenErrorReason::MalformedConditional)?;
    let gate = lookup(tables::gate(&rest[..open]))?;
    let body = rest[open + 1..]
        .strip_suffix(']')
        .ok_or(TokenErrorReason::MalformedConditional)?;

    let mut effects = Vec::new();
    for token in split_top_level(body, b',') {
        match gated(token) {
            Ok(effect) => effects.push(effect),
            Err(reason) => {
                tracing::trace!(token, %reason, "rejected gated token");
                rejected.push(TokenError::new(token, reason));
            }
        }
    }
    Ok(Effect::Conditional(gate, effects))
}

fn gated(token: &str) -> Result<GatedEffect, TokenErrorReason> {
    if token.contains('[') {
        return Err(TokenErrorReason::NestedConditional);
    }
    let Some((head, raw)) = token.split_once('=') else {
        return Err(TokenErrorReason::NotGateable);
    };
    match effect(head, raw)? {
        Effect::Skill(skill, part, amount) => {
            Ok(GatedEffect::new(GateTarget::Skill(skill, part), amount))
        }
        Effect::WeaponSkill(skill, part, amount) => {
            Ok(GatedEffect::new(GateTarget::WeaponSkill(skill, part), amount))
        }
        Effect::Mitigation(damage, amount) => {
            Ok(GatedEffect::new(GateTarget::Mitigation(damage), amount))
        }
        _ => Err(TokenErrorReason::NotGateable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        AbilityKind, Attribute, BasicSkill, CombatFeature, ConditionId, DamageType, Flags,
        Frequency, Gate, MagicSkill, MovementMode, ResourceField, TraitCode, WeaponSkill,
    };

    #[test]
    fn empty_code_is_the_identity() {
        assert_eq!(parse(""), Parsed::default());
        assert_eq!(parse_delta("   "), Delta::empty());
        assert_eq!(parse_delta("::"), Delta::empty());
    }

    #[test]
    fn fail_soft_on_unknown_fragments() {
        let parsed = parse("SSA=1:GARBAGE:M1=2");

        assert_eq!(parsed.delta.skill(BasicSkill::Fitness).value, 1);
        assert_eq!(parsed.delta.mitigation(DamageType::Physical), 2);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].token, "GARBAGE");
    }

    #[test]
    fn fragments_are_trimmed() {
        let delta = parse_delta("  AP=2 :  VW=-1  ");
        assert_eq!(delta.attribute(Attribute::Physique), 2);
        assert_eq!(delta.movement(MovementMode::Walk), -1);
    }

    #[test]
    fn tier_symbols_accumulate_separately() {
        let delta = parse_delta("WS1=X:WS1=X");
        assert_eq!(delta.weapon_skill(WeaponSkill::Brawling).tier, 2);
        assert_eq!(delta.weapon_skill(WeaponSkill::Brawling).value, 0);

        let cancelled = parse_delta("WS1=X:WS1=Y");
        assert_eq!(cancelled.weapon_skill(WeaponSkill::Brawling).tier, 0);
        assert!(cancelled.is_empty());

        assert_eq!(parse_delta("PT3=Y").magic_skill(MagicSkill::Primal).tier, -1);
    }

    #[test]
    fn tier_symbols_are_rejected_outside_skills() {
        let parsed = parse("M1=X:AP=Y");
        assert!(parsed.delta.is_empty());
        assert!(
            parsed
                .rejected
                .iter()
                .all(|err| err.reason == TokenErrorReason::TierNotAllowed)
        );
    }

    #[test]
    fn repeated_tokens_accumulate() {
        let delta = parse_delta("SSA=1:SSA=2:STA=1:FP=1:FP=3:FA=1:FA=1");
        assert_eq!(delta.skill(BasicSkill::Fitness).value, 3);
        assert_eq!(delta.skill(BasicSkill::Fitness).talent, 1);
        assert_eq!(delta.feature(CombatFeature::Pierce), 3);
        assert_eq!(delta.feature(CombatFeature::Attacks), 2);
    }

    #[test]
    fn signed_values() {
        let delta = parse_delta("RH=+3:RC=-2:M10=4");
        assert_eq!(delta.resource(ResourceField::Health), 3);
        assert_eq!(delta.resource(ResourceField::Carry), -2);
        assert_eq!(delta.mitigation(DamageType::Arcane), 4);
    }

    #[test]
    fn out_of_range_values_are_unrecognized() {
        let parsed = parse("AP=99999999999:AP=1.5:AP=");
        assert!(parsed.delta.is_empty());
        assert_eq!(parsed.rejected.len(), 3);
    }

    #[test]
    fn conditionals_are_filed_not_applied() {
        let delta = parse_delta("GS[M1=1, WS2=X]");

        assert_eq!(delta.mitigation(DamageType::Physical), 0);
        assert_eq!(
            delta.gated(Gate::AnyShield),
            &[
                GatedEffect::new(
                    GateTarget::WeaponSkill(WeaponSkill::Blades, SkillPart::Tier),
                    1
                ),
                GatedEffect::new(GateTarget::Mitigation(DamageType::Physical), 1),
            ]
        );
    }

    #[test]
    fn ungateable_and_nested_tokens_are_rejected_individually() {
        let parsed = parse("GL[SSB=1,RH=2,GS[M1=1]]");

        assert_eq!(parsed.delta.gated(Gate::LightShield).len(), 1);
        let reasons: Vec<_> = parsed.rejected.iter().map(|err| err.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![TokenErrorReason::NotGateable, TokenErrorReason::NestedConditional]
        );
    }

    #[test]
    fn unbalanced_code_is_a_structural_failure() {
        assert!(try_parse("SSA=1:GL[SSB=1").is_err());

        let parsed = parse("SSA=1:GL[SSB=1");
        assert!(parsed.delta.is_empty());
        assert_eq!(parsed.rejected.len(), 1);
        assert!(matches!(parsed.rejected[0].reason, TokenErrorReason::Code(_)));
    }

    #[test]
    fn grants_and_flags() {
        let delta = parse_delta("IPO=1:IZQ=1:BADM=2:BRU=0:TDV=6:TFL:NE:QD");

        assert!(delta.immunities.contains(&ConditionId::new("poisoned")));
        assert!(delta.immunities.contains(&ConditionId::new("zq")));
        assert_eq!(delta.abilities.len(), 2);
        assert!(delta.abilities.contains(&AbilityGrant {
            kind: AbilityKind::Action,
            frequency: Frequency::Daily,
            magical: true,
            energy_cost: 2,
        }));
        assert_eq!(delta.traits.get(&TraitCode::Darkvision), Some(&Some(6)));
        assert_eq!(delta.traits.get(&TraitCode::Fearless), Some(&None));
        assert_eq!(delta.flags, Flags::NO_ENCUMBRANCE | Flags::QUICK_DRAW);
    }

    #[test]
    fn invalid_grants_are_rejected() {
        let parsed = parse("IPO=0:BAD=-1:BXD=1:TZZ");
        assert!(parsed.delta.is_empty());
        let reasons: Vec<_> = parsed.rejected.iter().map(|err| err.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                TokenErrorReason::NotPositive,
                TokenErrorReason::NegativeCost,
                TokenErrorReason::UnknownSubKind,
                TokenErrorReason::UnknownTarget,
            ]
        );
    }

    #[test]
    fn unknown_letters_are_never_reinterpreted() {
        let parsed = parse("ssa=1:SXA=1:SSZ=1:QQ=1:ZZ");
        assert!(parsed.delta.is_empty());
        assert_eq!(parsed.rejected.len(), 5);
        assert_eq!(
            parsed.rejected[1].reason,
            TokenErrorReason::UnknownSubKind
        );
        assert_eq!(parsed.rejected[2].reason, TokenErrorReason::UnknownTarget);
    }

    #[test]
    fn abilities_are_never_deduplicated() {
        let delta = parse_delta("BAD=2:BAD=2");
        assert_eq!(delta.abilities.len(), 2);
    }
}
