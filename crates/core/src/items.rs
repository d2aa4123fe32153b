//! Closed item model. Templates are plain values that get cloned into the map,
//! shop stock, or the inventory.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrinketBonus {
    Damage(i32),
    Toughness(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionEffect {
    FullHeal,
    Heal(i32),
    Regeneration { turns: u32, amount: i32 },
    Speed { turns: u32 },
    Invisibility { turns: u32 },
    Explosive { damage: i32 },
}

impl PotionEffect {
    pub fn name(self) -> &'static str {
        match self {
            PotionEffect::FullHeal => "Elixir of Life",
            PotionEffect::Heal(_) => "Healing Potion",
            PotionEffect::Regeneration { .. } => "Regeneration Potion",
            PotionEffect::Speed { .. } => "Swiftness Potion",
            PotionEffect::Invisibility { .. } => "Invisibility Potion",
            PotionEffect::Explosive { .. } => "Explosive Flask",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Weapon { name: String, max_damage: i32, forged: u8 },
    Trinket { name: String, bonus: TrinketBonus },
    Material { name: String, value: u32 },
    Valuable { name: String, gold: u32 },
    Food { name: String, hunger: u32, heal: i32, cooked: bool },
    Potion { effect: PotionEffect },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Weapon { name, .. }
            | Item::Trinket { name, .. }
            | Item::Material { name, .. }
            | Item::Valuable { name, .. }
            | Item::Food { name, .. } => name,
            Item::Potion { effect } => effect.name(),
        }
    }

    pub fn is_food(&self) -> bool {
        matches!(self, Item::Food { .. })
    }

    pub fn is_full_heal(&self) -> bool {
        matches!(self, Item::Potion { effect: PotionEffect::FullHeal })
    }

    pub fn is_raw_food(&self) -> bool {
        matches!(self, Item::Food { cooked: false, .. })
    }

    /// Cooking doubles the nourishment of raw food and makes it restorative.
    pub fn cooked(&self) -> Option<Item> {
        match self {
            Item::Food { name, hunger, heal, cooked: false } => Some(Item::Food {
                name: cooked_name(name),
                hunger: hunger * 2,
                heal: heal + 3,
                cooked: true,
            }),
            _ => None,
        }
    }
}

fn cooked_name(raw: &str) -> String {
    match raw.strip_prefix("Raw ") {
        Some(rest) => format!("Cooked {rest}"),
        None => format!("Cooked {raw}"),
    }
}
