//! Load a data set (`effects.json`, `weapons.json`, `models.json`) into immutable
//! stat blocks. Weapons and models refer to effects and weapons by name; every
//! reference is resolved while loading, so a bad data set fails before any attack.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::{parse_quantity, ItemAmount};
use crate::catalog::effects::{EffectCatalog, EffectSpec};
use crate::error::{MathhammerError, Result};
use crate::models::{Effect, Model, Unit, Weapon, WeaponAmount, WeaponType};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const EFFECTS_FILE: &str = "effects.json";
pub const WEAPONS_FILE: &str = "weapons.json";
pub const MODELS_FILE: &str = "models.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    pub range: u32,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    pub attacks: i32,
    pub strength: i32,
    #[serde(alias = "ap")]
    pub armour_penetration: i32,
    pub damage: i32,
    #[serde(default)]
    pub effects: Vec<String>,
}

/// `{"weapon": "Boltgun", "amount": 2}` inside a model spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponEntry {
    pub weapon: String,
    pub amount: Value,
}

fn no_roll() -> i32 {
    7
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    #[serde(default)]
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
    #[serde(default = "no_roll")]
    pub invulnerable_save: i32,
    #[serde(default = "no_roll")]
    pub feel_no_pain: i32,
    #[serde(default)]
    pub weapons: Vec<WeaponEntry>,
    #[serde(default)]
    pub effects: Vec<String>,
}

/// A loaded data set. Shared read-only between workers.
#[derive(Debug, Clone)]
pub struct Armoury {
    catalog: EffectCatalog,
    weapons: BTreeMap<String, Weapon>,
    models: BTreeMap<String, Model>,
}

fn read_specs<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl Armoury {
    /// Load the data set under `dir`, aliasing its effects in a fresh child of `parent`.
    pub fn load(dir: impl AsRef<Path>, parent: Arc<EffectCatalog>) -> Result<Self> {
        let dir = dir.as_ref();
        let effects: Vec<EffectSpec> = read_specs(&dir.join(EFFECTS_FILE))?;
        let weapons: Vec<WeaponSpec> = read_specs(&dir.join(WEAPONS_FILE))?;
        let models: Vec<ModelSpec> = read_specs(&dir.join(MODELS_FILE))?;
        tracing::debug!(
            dir = %dir.display(),
            effects = effects.len(),
            weapons = weapons.len(),
            models = models.len(),
            "loading data set"
        );
        Self::from_specs(parent, &effects, &weapons, &models)
    }

    pub fn from_specs(
        parent: Arc<EffectCatalog>,
        effects: &[EffectSpec],
        weapons: &[WeaponSpec],
        models: &[ModelSpec],
    ) -> Result<Self> {
        let mut catalog = EffectCatalog::child_of(parent);
        for spec in effects {
            catalog.alias(spec)?;
        }

        let mut armoury = Self {
            catalog,
            weapons: BTreeMap::new(),
            models: BTreeMap::new(),
        };
        for spec in weapons {
            let weapon = armoury.build_weapon(spec)?;
            armoury.weapons.insert(weapon.name.clone(), weapon);
        }
        for spec in models {
            let model = armoury.build_model(spec)?;
            armoury.models.insert(model.name.clone(), model);
        }
        Ok(armoury)
    }

    fn resolve_effects(&self, names: &[String]) -> Result<Vec<Effect>> {
        names.iter().map(|name| self.effect(name)).collect()
    }

    fn build_weapon(&self, spec: &WeaponSpec) -> Result<Weapon> {
        Ok(Weapon {
            name: spec.name.clone(),
            range: spec.range,
            weapon_type: spec.weapon_type,
            attacks: spec.attacks,
            strength: spec.strength,
            armour_penetration: spec.armour_penetration,
            damage: spec.damage,
            effects: self.resolve_effects(&spec.effects)?,
        })
    }

    fn build_model(&self, spec: &ModelSpec) -> Result<Model> {
        let weapons = self.weapon_amount(&spec.weapons)?;
        Ok(Model {
            name: spec.name.clone(),
            power: spec.power,
            movement: spec.movement,
            weapon_skill: spec.weapon_skill,
            ballistic_skill: spec.ballistic_skill,
            strength: spec.strength,
            toughness: spec.toughness,
            wounds: spec.wounds,
            attacks: spec.attacks,
            leadership: spec.leadership,
            save: spec.save,
            invulnerable_save: spec.invulnerable_save,
            feel_no_pain: spec.feel_no_pain,
            weapons,
            effects: self.resolve_effects(&spec.effects)?,
        })
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    pub fn effect(&self, name: &str) -> Result<Effect> {
        self.catalog.get(name)
    }

    /// One instance of the named weapon.
    pub fn weapon(&self, name: &str) -> Result<WeaponAmount> {
        Ok(ItemAmount::from_item(self.weapon_profile(name)?.clone(), 1))
    }

    /// Resolve `{weapon, amount}` entries into a multiset.
    pub fn weapon_amount(&self, entries: &[WeaponEntry]) -> Result<WeaponAmount> {
        let mut weapons = WeaponAmount::new();
        for entry in entries {
            let weapon = self.weapon_profile(&entry.weapon)?.clone();
            weapons = weapons + ItemAmount::from_item(weapon, parse_quantity(&entry.amount)?);
        }
        Ok(weapons)
    }

    pub fn weapon_profile(&self, name: &str) -> Result<&Weapon> {
        self.weapons
            .get(name)
            .ok_or_else(|| MathhammerError::UnknownWeapon(name.to_string()))
    }

    /// A unit holding one of the named model.
    pub fn model(&self, name: &str) -> Result<Unit> {
        Ok(Unit::of(self.model_profile(name)?.clone(), 1))
    }

    pub fn model_profile(&self, name: &str) -> Result<&Model> {
        self.models
            .get(name)
            .ok_or_else(|| MathhammerError::UnknownModel(name.to_string()))
    }

    pub fn weapon_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.weapons.keys().map(String::as_str)
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.models.keys().map(String::as_str)
    }
}
