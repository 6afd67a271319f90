use std::fmt;

use crate::models::{Effect, WeaponAmount};

/// Stat block as loaded from a data set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Model {
    pub name: String,
    pub power: i32,
    pub movement: i32,
    pub weapon_skill: i32,
    pub ballistic_skill: i32,
    pub strength: i32,
    pub toughness: i32,
    pub wounds: i32,
    pub attacks: i32,
    pub leadership: i32,
    pub save: i32,
    pub invulnerable_save: i32,
    pub feel_no_pain: i32,
    pub weapons: WeaponAmount,
    pub effects: Vec<Effect>,
}

/// A model bound to the weapons and effects it carries in one particular squad.
/// Two loadouts of the same model with different wargear are different pieces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelLoadout {
    pub model: Model,
    pub weapons: WeaponAmount,
    pub effects: Vec<Effect>,
}

impl ModelLoadout {
    /// The loadout a model has straight out of the catalog.
    pub fn from_model(model: &Model) -> Self {
        Self {
            model: model.clone(),
            weapons: model.weapons.clone(),
            effects: model.effects.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.model.name
    }
}

/// Entry of a unit: either a bare catalog model or one with extra wargear attached.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Piece {
    Model(Model),
    Loadout(ModelLoadout),
}

impl Piece {
    pub fn name(&self) -> &str {
        match self {
            Self::Model(model) => &model.name,
            Self::Loadout(loadout) => loadout.name(),
        }
    }

    pub fn effects(&self) -> &[Effect] {
        match self {
            Self::Model(model) => &model.effects,
            Self::Loadout(loadout) => &loadout.effects,
        }
    }

    pub fn to_loadout(&self) -> ModelLoadout {
        match self {
            Self::Model(model) => ModelLoadout::from_model(model),
            Self::Loadout(loadout) => loadout.clone(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for ModelLoadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weapons.is_empty() {
            write!(f, "{}", self.model.name)
        } else {
            write!(f, "{}({})", self.model.name, self.weapons)
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(model) => fmt::Display::fmt(model, f),
            Self::Loadout(loadout) => fmt::Display::fmt(loadout, f),
        }
    }
}
