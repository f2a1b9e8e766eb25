//! Raw inputs a character is derived from: items, equipment, injuries and
//! conditions.
//!
//! Sources are authored content. The pipeline reads them and never writes
//! them; collaborators change them through [`Character::submit`].
//!
//! [`Character::submit`]: super::Character::submit

use std::collections::BTreeMap;

use crate::schema::ConditionId;

/// Identifier of an item within one character's inventory.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Grip {
    #[default]
    OneHanded,
    TwoHanded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShieldWeight {
    Light,
    Heavy,
}

/// What an item is, as far as gates and equipping are concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    /// Learned training; always active, never equipped.
    Training,
    Weapon {
        grip: Grip,
    },
    Shield {
        weight: ShieldWeight,
    },
    Armor,
    #[default]
    Gear,
}

impl ItemKind {
    pub const fn is_equippable(&self) -> bool {
        !matches!(self, Self::Training)
    }
}

/// One item: training, weapon, shield, armor or other gear.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ItemKind,
    /// Data code; absent means the item has no mechanical effect.
    #[cfg_attr(feature = "serde", serde(default))]
    pub code: Option<String>,
    /// Encumbrance load while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub load: i32,
}

impl Item {
    pub fn new(id: &str, name: &str, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.to_string(),
            kind,
            code: None,
            load: 0,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn with_load(mut self, load: i32) -> Self {
        self.load = load;
        self
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
pub enum Slot {
    MainHand,
    OffHand,
    Head,
    Body,
    Hands,
    Feet,
    Neck,
    Ring,
    Back,
}

/// Which inventory item occupies each slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Equipment {
    slots: BTreeMap<Slot, ItemId>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Equips an item, returning the previously equipped item if any.
    pub fn equip(&mut self, slot: Slot, item: ItemId) -> Option<ItemId> {
        self.slots.insert(slot, item)
    }

    /// Unequips a slot, returning its item if any was equipped.
    pub fn unequip(&mut self, slot: Slot) -> Option<ItemId> {
        self.slots.remove(&slot)
    }

    /// Removes an item from every slot it occupies.
    pub fn unequip_item(&mut self, item: &ItemId) {
        self.slots.retain(|_, equipped| equipped != item);
    }

    pub fn get(&self, slot: Slot) -> Option<&ItemId> {
        self.slots.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &ItemId)> {
        self.slots.iter().map(|(&slot, item)| (slot, item))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// An active injury.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Injury {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pain: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stress: i32,
}

impl Injury {
    pub fn new(id: &str, pain: i32, stress: i32) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            pain,
            stress,
        }
    }
}

/// An active condition, optionally noting what applied it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveCondition {
    pub id: ConditionId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
}

impl ActiveCondition {
    pub fn new(name: &str) -> Self {
        Self {
            id: ConditionId::new(name),
            source: None,
        }
    }
}

/// Every raw input of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sources {
    pub inventory: Vec<Item>,
    pub equipment: Equipment,
    pub injuries: Vec<Injury>,
    pub conditions: Vec<ActiveCondition>,
}

impl Sources {
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.inventory.iter().find(|item| &item.id == id)
    }

    /// Training items, in inventory order.
    pub fn training(&self) -> impl Iterator<Item = &Item> {
        self.inventory
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Training))
    }

    /// The item equipped in a slot, if it resolves.
    pub fn equipped(&self, slot: Slot) -> Option<&Item> {
        self.equipment.get(slot).and_then(|id| self.item(id))
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.iter().any(|condition| condition.id.is(name))
    }
}
