use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, RangeInclusive};

use num::{BigInt, BigRational, One, Zero};

pub type Probability = BigRational;

/// One `apply_chances` arm: outcomes inside the range are replaced by the produced distribution.
pub type Branch<'a> = (RangeInclusive<u32>, &'a dyn Fn(u32) -> Distribution);

/// Shorthand for an exact fraction. `denominator` must be nonzero.
pub fn ratio(numerator: i64, denominator: i64) -> Probability {
    BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    outcomes: BTreeMap<u32, Probability>,
}

impl Default for Distribution {
    fn default() -> Self {
        Self::from_outcome(0)
    }
}

impl Distribution {
    /// All mass on `value`.
    pub fn from_outcome(value: u32) -> Self {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(value, Probability::one());
        Self { outcomes }
    }

    /// Merge `(outcome, probability)` pairs; repeated outcomes accumulate.
    pub fn from_chances<I>(chances: I) -> Self
    where
        I: IntoIterator<Item = (u32, Probability)>,
    {
        let mut outcomes: BTreeMap<u32, Probability> = BTreeMap::new();
        for (outcome, chance) in chances {
            *outcomes.entry(outcome).or_insert_with(Probability::zero) += chance;
        }
        Self::cleaned(outcomes)
    }

    /// 1 with probability `success`, 0 otherwise.
    pub fn bernoulli(success: Probability) -> Self {
        let failure = Probability::one() - &success;
        Self::from_chances([(1, success), (0, failure)])
    }

    /// Convolution of independent distributions. The empty sum is a certain zero.
    pub fn sum<I>(distributions: I) -> Self
    where
        I: IntoIterator<Item = Distribution>,
    {
        distributions
            .into_iter()
            .fold(Self::from_outcome(0), |total, next| total.convolve(&next))
    }

    /// Mixture of distributions with the given weights. Weights are not normalised.
    pub fn mixture<I>(weighted: I) -> Self
    where
        I: IntoIterator<Item = (Probability, Distribution)>,
    {
        let mut outcomes: BTreeMap<u32, Probability> = BTreeMap::new();
        for (weight, distribution) in weighted {
            for (outcome, chance) in distribution.outcomes {
                *outcomes.entry(outcome).or_insert_with(Probability::zero) += chance * &weight;
            }
        }
        Self::cleaned(outcomes)
    }

    pub fn convolve(&self, other: &Self) -> Self {
        let mut outcomes: BTreeMap<u32, Probability> = BTreeMap::new();
        for (&left, left_chance) in &self.outcomes {
            for (&right, right_chance) in &other.outcomes {
                *outcomes
                    .entry(left.saturating_add(right))
                    .or_insert_with(Probability::zero) += left_chance * right_chance;
            }
        }
        Self::cleaned(outcomes)
    }

    /// Sum of `times` independent copies.
    pub fn repeat(&self, times: u32) -> Self {
        let mut result = Self::from_outcome(0);
        let mut base = self.clone();
        let mut remaining = times;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.convolve(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.convolve(&base);
            }
        }
        result
    }

    /// Roll `self`, then add up that many independent copies of `other`.
    pub fn compound(&self, other: &Self) -> Self {
        self.apply_chances(&[], &|count: u32| other.repeat(count))
    }

    /// Replace every outcome by the distribution its branch (or `default`) produces,
    /// weighted by the outcome's own probability. The first matching range wins.
    pub fn apply_chances(
        &self,
        branches: &[Branch<'_>],
        default: &dyn Fn(u32) -> Distribution,
    ) -> Self {
        let mut outcomes: BTreeMap<u32, Probability> = BTreeMap::new();
        for (&outcome, chance) in &self.outcomes {
            let produced = branches
                .iter()
                .find(|(range, _)| range.contains(&outcome))
                .map(|(_, branch)| branch(outcome))
                .unwrap_or_else(|| default(outcome));
            for (value, produced_chance) in produced.outcomes {
                *outcomes.entry(value).or_insert_with(Probability::zero) +=
                    produced_chance * chance;
            }
        }
        Self::cleaned(outcomes)
    }

    pub fn map_outcomes<F>(&self, f: F) -> Self
    where
        F: Fn(u32) -> u32,
    {
        Self::from_chances(
            self.outcomes
                .iter()
                .map(|(&outcome, chance)| (f(outcome), chance.clone())),
        )
    }

    pub fn probability(&self, outcome: u32) -> Probability {
        self.outcomes
            .get(&outcome)
            .cloned()
            .unwrap_or_else(Probability::zero)
    }

    pub fn total_probability(&self) -> Probability {
        self.outcomes
            .values()
            .fold(Probability::zero(), |total, chance| total + chance)
    }

    pub fn mean(&self) -> Probability {
        self.outcomes
            .iter()
            .fold(Probability::zero(), |total, (&outcome, chance)| {
                total + Probability::from_integer(BigInt::from(outcome)) * chance
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Probability)> + '_ {
        self.outcomes.iter().map(|(&outcome, chance)| (outcome, chance))
    }

    pub fn max_outcome(&self) -> Option<u32> {
        self.outcomes.keys().next_back().copied()
    }

    /// Number of outcomes with nonzero probability.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn cleaned(mut outcomes: BTreeMap<u32, Probability>) -> Self {
        outcomes.retain(|_, chance| !chance.is_zero());
        Self { outcomes }
    }
}

impl Add for Distribution {
    type Output = Distribution;

    fn add(self, rhs: Self) -> Self {
        self.convolve(&rhs)
    }
}

impl<'b> Add<&'b Distribution> for &Distribution {
    type Output = Distribution;

    fn add(self, rhs: &'b Distribution) -> Distribution {
        self.convolve(rhs)
    }
}

impl AddAssign for Distribution {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.convolve(&rhs);
    }
}

impl Mul for Distribution {
    type Output = Distribution;

    fn mul(self, rhs: Self) -> Self {
        self.compound(&rhs)
    }
}

impl<'b> Mul<&'b Distribution> for &Distribution {
    type Output = Distribution;

    fn mul(self, rhs: &'b Distribution) -> Distribution {
        self.compound(rhs)
    }
}

impl Sum for Distribution {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Distribution::sum(iter)
    }
}
