//! Attributes - the five governing scores of a character.
//!
//! Attributes are set once by the character build and adjusted by overlays.
//! Every basic skill's talent is derived from exactly one attribute
//! (see [`BasicSkill::attribute`](super::BasicSkill::attribute)).

/// One of the five attributes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Attribute {
    /// Strength, stamina and bodily toughness.
    Physique,
    /// Agility, balance and precision.
    Finesse,
    /// Perception and force of will.
    Mind,
    /// Learning and recall.
    Knowledge,
    /// Presence and persuasion.
    Social,
}

/// Attribute scores of a character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub physique: i32,
    pub finesse: i32,
    pub mind: i32,
    pub knowledge: i32,
    pub social: i32,
}

impl Attributes {
    /// Create attribute scores in table order.
    pub const fn new(physique: i32, finesse: i32, mind: i32, knowledge: i32, social: i32) -> Self {
        Self {
            physique,
            finesse,
            mind,
            knowledge,
            social,
        }
    }

    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Physique => self.physique,
            Attribute::Finesse => self.finesse,
            Attribute::Mind => self.mind,
            Attribute::Knowledge => self.knowledge,
            Attribute::Social => self.social,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Physique => &mut self.physique,
            Attribute::Finesse => &mut self.finesse,
            Attribute::Mind => &mut self.mind,
            Attribute::Knowledge => &mut self.knowledge,
            Attribute::Social => &mut self.social,
        }
    }
}
