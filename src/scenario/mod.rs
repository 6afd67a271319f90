//! YAML scenario files: named units built from a data set and the attacks they make.
//!
//! ```yaml
//! data_set: chaos_space_marines
//! units:
//!   havocs:
//!     - model: Havoc
//!       count: 4
//!   marines:
//!     - model: Tactical Marine
//!       count: 10
//! attacks:
//!   - attacker: havocs
//!     declarations:
//!       - target: marines
//!         distance: 24
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::parse_quantity;
use crate::catalog::{Armoury, WeaponEntry};
use crate::combat::AttackReport;
use crate::error::{MathhammerError, Result};
use crate::models::{Unit, Wargear};
use crate::parallel::WorkerPool;

fn one() -> Value {
    Value::from(1)
}

/// Models of one type, optionally with extra wargear on each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSpec {
    pub model: String,
    #[serde(default = "one")]
    pub count: Value,
    #[serde(default)]
    pub weapons: Vec<WeaponEntry>,
    #[serde(default)]
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationSpec {
    pub target: String,
    #[serde(default)]
    pub distance: u32,
    /// Weapons reserved for this declaration. Unset fires everything left.
    #[serde(default)]
    pub weapons: Option<Vec<WeaponEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSpec {
    pub attacker: String,
    #[serde(default)]
    pub auras: Vec<String>,
    #[serde(default)]
    pub aura_distance: u32,
    #[serde(default)]
    pub effects: Vec<String>,
    pub declarations: Vec<DeclarationSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub data_set: String,
    #[serde(default)]
    pub units: BTreeMap<String, Vec<SquadSpec>>,
    #[serde(default)]
    pub attacks: Vec<AttackSpec>,
}

#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub attacker: String,
    pub report: AttackReport,
}

impl Scenario {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Build every named unit. Squads of one unit are added together.
    pub fn build_units(&self, armoury: &Armoury) -> Result<BTreeMap<String, Unit>> {
        self.units
            .iter()
            .map(|(name, squads)| {
                let mut unit = Unit::default();
                for squad in squads {
                    unit = unit + build_squad(armoury, squad)?;
                }
                Ok((name.clone(), unit))
            })
            .collect()
    }

    /// Evaluate every attack. Attacks share nothing mutable, so they run on `pool`.
    pub fn run(&self, armoury: &Armoury, pool: &WorkerPool) -> Result<Vec<ScenarioOutcome>> {
        let units = self.build_units(armoury)?;
        tracing::debug!(
            data_set = %self.data_set,
            units = units.len(),
            attacks = self.attacks.len(),
            "running scenario"
        );
        pool.install(|| {
            self.attacks
                .par_iter()
                .map(|spec| run_attack(armoury, &units, spec))
                .collect::<Result<Vec<_>>>()
        })?
    }
}

fn build_squad(armoury: &Armoury, squad: &SquadSpec) -> Result<Unit> {
    let count = parse_quantity(&squad.count)?;
    let unit = armoury.model(&squad.model)? * count;
    if squad.weapons.is_empty() && squad.effects.is_empty() {
        return Ok(unit);
    }

    let mut wargear = vec![Wargear::Weapons(armoury.weapon_amount(&squad.weapons)?)];
    for name in &squad.effects {
        wargear.push(Wargear::Effect(armoury.effect(name)?));
    }
    unit.equip(wargear)
}

fn lookup<'a>(units: &'a BTreeMap<String, Unit>, name: &str) -> Result<&'a Unit> {
    units
        .get(name)
        .ok_or_else(|| MathhammerError::UnknownUnit(name.to_string()))
}

fn run_attack(
    armoury: &Armoury,
    units: &BTreeMap<String, Unit>,
    spec: &AttackSpec,
) -> Result<ScenarioOutcome> {
    let attacker = lookup(units, &spec.attacker)?;
    let allies = spec
        .auras
        .iter()
        .map(|name| lookup(units, name))
        .collect::<Result<Vec<_>>>()?;
    let effects = spec
        .effects
        .iter()
        .map(|name| armoury.effect(name))
        .collect::<Result<Vec<_>>>()?;

    let mut attack = attacker.declare();
    attack.auras(&allies, spec.aura_distance).effects(effects);
    for declaration in &spec.declarations {
        let target = lookup(units, &declaration.target)?;
        if let Some(entries) = &declaration.weapons {
            attack.weapons(&armoury.weapon_amount(entries)?)?;
        }
        attack.attack(target, declaration.distance);
    }

    Ok(ScenarioOutcome {
        attacker: spec.attacker.clone(),
        report: attack.sanitize(),
    })
}
