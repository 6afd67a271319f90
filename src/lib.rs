//! Exact damage distributions for tabletop wargame attacks.

pub mod amount;
pub mod catalog;
pub mod cli;
pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod models;
pub mod parallel;
pub mod scenario;

pub use error::{MathhammerError, Result};
