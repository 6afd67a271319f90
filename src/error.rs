//! Error types raised while composing units, loading catalogs and declaring attacks.

use thiserror::Error;

/// Errors surfaced by the crate. Attack evaluation itself is total and never fails.
#[derive(Debug, Error)]
pub enum MathhammerError {
    #[error("invalid quantity {0}: amounts must be whole numbers")]
    InvalidQuantity(String),

    #[error("unsupported operand: {0}")]
    UnsupportedOperand(String),

    #[error("effect name '{0}' already taken")]
    DuplicateEffectName(String),

    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    #[error("unknown weapon '{0}'")]
    UnknownWeapon(String),

    #[error("unknown model '{0}'")]
    UnknownModel(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("not enough {weapon}: requested {requested}, available {available}")]
    InsufficientWeapons {
        weapon: String,
        requested: i64,
        available: usize,
    },

    #[error("wargear can only be added to units with one model type, found {0}")]
    InvalidUnitComposition(usize),

    #[error("invalid effect '{name}': {reason}")]
    InvalidEffectSpec { name: String, reason: String },

    #[error("worker pool error: {0}")]
    WorkerPool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MathhammerError>;
