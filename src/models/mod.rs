//! Immutable stat blocks: effects, weapons, models and the units built from them.

mod effect;
mod model;
mod unit;
mod weapon;

pub use effect::{Effect, EffectClass, EffectKind, ModifierOp, Stat, StatModifier};
pub use model::{Model, ModelLoadout, Piece};
pub use unit::{Unit, Wargear};
pub use weapon::{Weapon, WeaponAmount, WeaponType};
