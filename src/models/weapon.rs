use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amount::ItemAmount;
use crate::models::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Melee,
    Ranged,
}

/// Immutable weapon profile. Melee weapons use weapon skill, everything else ballistic skill.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weapon {
    pub name: String,
    pub range: u32,
    pub weapon_type: WeaponType,
    pub attacks: i32,
    pub strength: i32,
    pub armour_penetration: i32,
    pub damage: i32,
    pub effects: Vec<Effect>,
}

pub type WeaponAmount = ItemAmount<Weapon>;

impl Weapon {
    pub fn reaches(&self, distance: u32) -> bool {
        self.range >= distance
    }

    pub fn is_melee(&self) -> bool {
        self.weapon_type == WeaponType::Melee
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
