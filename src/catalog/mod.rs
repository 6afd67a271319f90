//! Effect templates and the JSON data sets that models, weapons and effects are loaded from.

pub mod effects;
pub mod store;

pub use effects::{EffectCatalog, EffectSpec, EffectTemplate};
pub use store::{Armoury, ModelSpec, WeaponEntry, WeaponSpec};
