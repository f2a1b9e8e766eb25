//! Resource targets and movement modes.

/// Pools with a current and a maximum value.
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
pub enum Pool {
    Health,
    Resolve,
    Energy,
    Mana,
}

/// Derived single-value fields ("auto" fields).
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
pub enum AutoField {
    Initiative,
    Detection,
    Carry,
    Luck,
    Wounds,
}

/// Any target of an `R` token.
///
/// Kept flat (no nested enums) so it can key maps in every serde format.
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
pub enum ResourceField {
    Health,
    Resolve,
    Energy,
    Mana,
    Initiative,
    Detection,
    Carry,
    Luck,
    Wounds,
}

/// Which part of the character a [`ResourceField`] lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceTarget {
    /// Adjusts the pool maximum.
    Max(Pool),
    /// Adjusts the auto field value.
    Auto(AutoField),
}

impl ResourceField {
    pub const fn target(self) -> ResourceTarget {
        match self {
            Self::Health => ResourceTarget::Max(Pool::Health),
            Self::Resolve => ResourceTarget::Max(Pool::Resolve),
            Self::Energy => ResourceTarget::Max(Pool::Energy),
            Self::Mana => ResourceTarget::Max(Pool::Mana),
            Self::Initiative => ResourceTarget::Auto(AutoField::Initiative),
            Self::Detection => ResourceTarget::Auto(AutoField::Detection),
            Self::Carry => ResourceTarget::Auto(AutoField::Carry),
            Self::Luck => ResourceTarget::Auto(AutoField::Luck),
            Self::Wounds => ResourceTarget::Auto(AutoField::Wounds),
        }
    }
}

impl From<Pool> for ResourceField {
    fn from(pool: Pool) -> Self {
        match pool {
            Pool::Health => Self::Health,
            Pool::Resolve => Self::Resolve,
            Pool::Energy => Self::Energy,
            Pool::Mana => Self::Mana,
        }
    }
}

impl From<AutoField> for ResourceField {
    fn from(field: AutoField) -> Self {
        match field {
            AutoField::Initiative => Self::Initiative,
            AutoField::Detection => Self::Detection,
            AutoField::Carry => Self::Carry,
            AutoField::Luck => Self::Luck,
            AutoField::Wounds => Self::Wounds,
        }
    }
}

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
pub enum MovementMode {
    Walk,
    Climb,
    Swim,
    Fly,
}
