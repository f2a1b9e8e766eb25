//! Movement totals per mode.

use std::collections::BTreeMap;

use crate::schema::MovementMode;

/// Movement speeds, one entry per mode the character has.
///
/// `standard` is the single-speed field older documents carry. The movement
/// stage folds it into `walk`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Movement {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub standard: Option<i32>,
    pub modes: BTreeMap<MovementMode, i32>,
}

impl Movement {
    pub fn walking(speed: i32) -> Self {
        Self {
            standard: None,
            modes: BTreeMap::from([(MovementMode::Walk, speed)]),
        }
    }

    pub fn get(&self, mode: MovementMode) -> i32 {
        self.modes.get(&mode).copied().unwrap_or(0)
    }

    pub fn set(&mut self, mode: MovementMode, speed: i32) {
        self.modes.insert(mode, speed);
    }

    pub fn adjust(&mut self, mode: MovementMode, amount: i32) {
        let speed = self.modes.entry(mode).or_insert(0);
        *speed = speed.saturating_add(amount);
    }

    /// Fold the legacy `standard` speed into walk.
    pub fn normalize(&mut self) {
        if let Some(standard) = self.standard.take() {
            self.adjust(MovementMode::Walk, standard);
        }
    }
}
