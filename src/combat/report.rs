//! Terminal view of a finished [crate::combat::UnitAttack].

use std::io;

use num::ToPrimitive;
use serde::Serialize;

use crate::dice::{Distribution, Probability};
use crate::error::Result;

/// Every attack one weapon profile makes for one firing model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub weapon: String,
    pub model: String,
    /// Weapon instances carried by models of this type.
    pub count: usize,
    /// Damage of a single instance's volley.
    pub damage: Distribution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredAttack {
    pub target: String,
    pub distance: u32,
    pub contributions: Vec<Contribution>,
    /// Sum over every weapon instance fired in this attack.
    pub damage: Distribution,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackReport {
    attacks: Vec<DeclaredAttack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub damage: u32,
    /// Exact probability as `n/d`.
    pub probability: String,
    pub approx: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub mean: String,
    pub approx_mean: f64,
    pub outcomes: Vec<OutcomeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackSummary {
    pub attack: usize,
    pub target: String,
    pub distance: u32,
    pub weapons: Vec<String>,
    pub damage: DistributionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub attacks: Vec<AttackSummary>,
    pub total: DistributionSummary,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    attack: &'a str,
    damage: u32,
    probability: &'a str,
    approx: f64,
}

/// Display-only float; exact values stay in the `n/d` strings.
pub fn approximate(value: &Probability) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

pub fn summarize(distribution: &Distribution) -> DistributionSummary {
    let mean = distribution.mean();
    DistributionSummary {
        mean: mean.to_string(),
        approx_mean: approximate(&mean),
        outcomes: distribution
            .iter()
            .map(|(damage, chance)| OutcomeSummary {
                damage,
                probability: chance.to_string(),
                approx: approximate(chance),
            })
            .collect(),
    }
}

impl AttackReport {
    pub fn new(attacks: Vec<DeclaredAttack>) -> Self {
        Self { attacks }
    }

    pub fn attacks(&self) -> &[DeclaredAttack] {
        &self.attacks
    }

    /// Damage of every declared attack added together.
    pub fn total(&self) -> Distribution {
        Distribution::sum(self.attacks.iter().map(|attack| attack.damage.clone()))
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            attacks: self
                .attacks
                .iter()
                .enumerate()
                .map(|(index, attack)| AttackSummary {
                    attack: index + 1,
                    target: attack.target.clone(),
                    distance: attack.distance,
                    weapons: attack
                        .contributions
                        .iter()
                        .map(|c| format!("{}x {} ({})", c.count, c.weapon, c.model))
                        .collect(),
                    damage: summarize(&attack.damage),
                })
                .collect(),
            total: summarize(&self.total()),
        }
    }

    /// One row per outcome of each attack, then the combined total under `attack = total`.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let labelled = self
            .attacks
            .iter()
            .enumerate()
            .map(|(index, attack)| ((index + 1).to_string(), attack.damage.clone()))
            .chain(std::iter::once(("total".to_string(), self.total())));

        for (label, distribution) in labelled {
            for (damage, chance) in distribution.iter() {
                let probability = chance.to_string();
                csv.serialize(CsvRow {
                    attack: &label,
                    damage,
                    probability: &probability,
                    approx: approximate(chance),
                })?;
            }
        }
        csv.flush()?;
        Ok(())
    }
}
