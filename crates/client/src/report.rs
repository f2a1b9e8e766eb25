//! Sheet rendering for stdout.

use serde::Serialize;
use sheet_core::schema::Attribute;
use sheet_core::{Character, Diagnostics, SystemState};
use strum::IntoEnumIterator;

/// Hex-encoded digest of the derived state.
pub fn digest(system: &SystemState) -> String {
    hex::encode(system.digest())
}

/// JSON view of a recomputed character.
#[derive(Serialize)]
pub struct JsonSheet<'a> {
    pub name: &'a str,
    pub system: &'a SystemState,
    pub diagnostics: &'a Diagnostics,
    pub digest: String,
}

impl<'a> JsonSheet<'a> {
    pub fn new(character: &'a Character) -> Self {
        Self {
            name: &character.name,
            system: &character.system,
            diagnostics: character.diagnostics(),
            digest: digest(&character.system),
        }
    }
}

pub fn render(character: &Character) -> String {
    let system = &character.system;
    let mut lines = vec![format!("== {} ==", character.name)];

    let attributes: Vec<String> = Attribute::iter()
        .map(|attribute| format!("{attribute} {}", system.attributes.get(attribute)))
        .collect();
    lines.push(format!("attributes: {}", attributes.join(", ")));

    lines.push("skills:".to_string());
    for (skill, score) in &system.skills {
        lines.push(format!(
            "  {skill:<14} {:>3} talent {:>2} d{}",
            score.value,
            score.talent,
            score.die()
        ));
    }
    for (skill, score) in &system.weapon_skills {
        lines.push(format!(
            "  {skill:<14} {:>3} talent {:>2} d{}",
            score.value,
            score.talent,
            score.die()
        ));
    }

    let pools: Vec<String> = system
        .resources
        .iter()
        .map(|(pool, meter)| format!("{pool} {}/{}", meter.current(), meter.max))
        .collect();
    lines.push(format!("pools: {}", pools.join(", ")));

    let auto: Vec<String> = system
        .auto
        .iter()
        .map(|(field, value)| format!("{field} {value}"))
        .collect();
    lines.push(format!("auto: {}", auto.join(", ")));

    let movement: Vec<String> = system
        .movement
        .modes
        .iter()
        .map(|(mode, speed)| format!("{mode} {speed}"))
        .collect();
    lines.push(format!("movement: {}", movement.join(", ")));

    if !system.mitigation.is_empty() {
        let mitigation: Vec<String> = system
            .mitigation
            .iter()
            .map(|(damage, value)| format!("{damage} {value}"))
            .collect();
        lines.push(format!("mitigation: {}", mitigation.join(", ")));
    }
    if !system.grants.immunities.is_empty() {
        let immunities: Vec<&str> = system.grants.immunities.iter().map(|id| id.as_str()).collect();
        lines.push(format!("immune: {}", immunities.join(", ")));
    }

    for (name, track) in [("pain", &system.pain), ("stress", &system.stress)] {
        lines.push(format!(
            "{name}: {} ({} penalty dice)",
            track.calculated, track.penalty_dice
        ));
    }
    let encumbrance = &system.encumbrance;
    lines.push(format!(
        "load: {}/{} (penalty {})",
        encumbrance.load, encumbrance.allowance, encumbrance.penalty
    ));

    let diagnostics = character.diagnostics();
    if diagnostics.is_empty() {
        lines.push("diagnostics: none".to_string());
    } else {
        lines.push(format!("diagnostics ({}):", diagnostics.len()));
        lines.extend(diagnostics.iter().map(|entry| format!("  {entry}")));
    }
    lines.push(format!("digest: {}", digest(system)));

    lines.join("\n")
}
