#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use mathhammer::models::{Effect, Model, Weapon, WeaponAmount, WeaponType};

pub fn weapon(name: &str, range: u32, attacks: i32, strength: i32, ap: i32, damage: i32) -> Weapon {
    Weapon {
        name: name.to_string(),
        range,
        weapon_type: WeaponType::Ranged,
        attacks,
        strength,
        armour_penetration: ap,
        damage,
        effects: Vec::new(),
    }
}

pub fn boltgun() -> Weapon {
    weapon("Boltgun", 24, 1, 4, -1, 1)
}

pub fn model(name: &str) -> Model {
    Model {
        name: name.to_string(),
        power: 1,
        movement: 6,
        weapon_skill: 3,
        ballistic_skill: 3,
        strength: 4,
        toughness: 4,
        wounds: 1,
        attacks: 1,
        leadership: 7,
        save: 3,
        invulnerable_save: 7,
        feel_no_pain: 7,
        weapons: WeaponAmount::new(),
        effects: Vec::new(),
    }
}

pub fn armed(name: &str, weapon: Weapon, count: i64) -> Model {
    Model {
        weapons: WeaponAmount::from_item(weapon, count),
        ..model(name)
    }
}

pub fn with_effects(mut model: Model, effects: Vec<Effect>) -> Model {
    model.effects = effects;
    model
}

pub fn unique_temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("mathhammer-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

pub fn write_data_set(dir: &Path, effects: &str, weapons: &str, models: &str) {
    fs::write(dir.join("effects.json"), effects).expect("write effects");
    fs::write(dir.join("weapons.json"), weapons).expect("write weapons");
    fs::write(dir.join("models.json"), models).expect("write models");
}

pub fn repo_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
