//! Weighted multisets of game pieces: "5 Space Marines", "3 Boltguns + 1 Flamer".
//!
//! Counts are signed while combining but never persist at zero or below, so
//! subtraction is not reversible: `{X:1} - {X:5} + {X:5}` is `{X:5}`.

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use serde_json::Value;

use crate::error::{MathhammerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountOp {
    Add,
    Sub,
    Mul,
}

impl AmountOp {
    fn apply(self, left: i64, right: i64) -> i64 {
        match self {
            Self::Add => left.saturating_add(right),
            Self::Sub => left.saturating_sub(right),
            Self::Mul => left.saturating_mul(right),
        }
    }
}

/// Right-hand side of a fallible combination: a scalar broadcast to every key of the
/// left side, or another multiset combined over its own keys.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a, T> {
    Scalar(f64),
    Amount(&'a ItemAmount<T>),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemAmount<T> {
    items: BTreeMap<T, i64>,
}

impl<T> Default for ItemAmount<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

/// Accept a scalar only when it is a finite whole number that fits a count.
pub fn whole_number(value: f64) -> Result<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
        return Err(MathhammerError::InvalidQuantity(value.to_string()));
    }
    Ok(value as i64)
}

/// Read a count out of loosely typed input (scenario files, JSON stores).
pub fn parse_quantity(value: &Value) -> Result<i64> {
    match value {
        Value::Number(number) => match number.as_i64() {
            Some(whole) => Ok(whole),
            None => match number.as_f64() {
                Some(float) => whole_number(float),
                None => Err(MathhammerError::InvalidQuantity(number.to_string())),
            },
        },
        other => Err(MathhammerError::UnsupportedOperand(format!(
            "expected a whole number, found {other}"
        ))),
    }
}

impl<T: Ord + Clone> ItemAmount<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_item(item: T, amount: i64) -> Self {
        let mut items = BTreeMap::new();
        if amount > 0 {
            items.insert(item, amount);
        }
        Self { items }
    }

    pub fn try_from_item(item: T, amount: f64) -> Result<Self> {
        Ok(Self::from_item(item, whole_number(amount)?))
    }

    pub fn amount(&self, item: &T) -> i64 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> i64 {
        self.items.values().sum()
    }

    /// Every item repeated by its count. Call again to restart.
    pub fn iter_all(&self) -> impl Iterator<Item = &T> + '_ {
        self.items
            .iter()
            .flat_map(|(item, &amount)| std::iter::repeat(item).take(amount.max(0) as usize))
    }

    pub fn iter_unique(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.keys()
    }

    pub fn iter_amount(&self) -> impl Iterator<Item = (&T, i64)> + '_ {
        self.items.iter().map(|(item, &amount)| (item, amount))
    }

    /// The only entry, when exactly one distinct item is held.
    pub fn single(&self) -> Option<(&T, i64)> {
        if self.items.len() != 1 {
            return None;
        }
        self.iter_amount().next()
    }

    pub fn combine(&self, operand: Operand<'_, T>, op: AmountOp) -> Result<Self> {
        match operand {
            Operand::Scalar(value) => Ok(self.broadcast(whole_number(value)?, op)),
            Operand::Amount(other) => Ok(self.merge(
                other.iter_amount().map(|(item, amount)| (item.clone(), amount)),
                op,
            )),
        }
    }

    /// Re-key every item, merging items that map to the same key.
    pub fn map_items<U, F>(&self, mut f: F) -> ItemAmount<U>
    where
        U: Ord + Clone,
        F: FnMut(&T) -> U,
    {
        ItemAmount::new().merge(
            self.iter_amount().map(|(item, amount)| (f(item), amount)),
            AmountOp::Add,
        )
    }

    fn broadcast(&self, scalar: i64, op: AmountOp) -> Self {
        let pairs: Vec<(T, i64)> = self.items.keys().map(|item| (item.clone(), scalar)).collect();
        self.merge(pairs, op)
    }

    fn merge<I>(&self, pairs: I, op: AmountOp) -> Self
    where
        I: IntoIterator<Item = (T, i64)>,
    {
        let mut items = self.items.clone();
        for (item, amount) in pairs {
            let next = op.apply(items.get(&item).copied().unwrap_or(0), amount);
            if next <= 0 {
                items.remove(&item);
            } else {
                items.insert(item, next);
            }
        }
        Self { items }
    }
}

impl<T: Ord + Clone> FromIterator<(T, i64)> for ItemAmount<T> {
    fn from_iter<I: IntoIterator<Item = (T, i64)>>(iter: I) -> Self {
        Self::new().merge(iter, AmountOp::Add)
    }
}

impl<T: Ord + Clone> Sum for ItemAmount<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |total, amount| total + amount)
    }
}

impl<T: Ord + Clone> Add for ItemAmount<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.merge(rhs.items, AmountOp::Add)
    }
}

impl<T: Ord + Clone> Sub for ItemAmount<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.merge(rhs.items, AmountOp::Sub)
    }
}

impl<'b, T: Ord + Clone> Add<&'b ItemAmount<T>> for &ItemAmount<T> {
    type Output = ItemAmount<T>;

    fn add(self, rhs: &'b ItemAmount<T>) -> ItemAmount<T> {
        self.merge(
            rhs.iter_amount().map(|(item, amount)| (item.clone(), amount)),
            AmountOp::Add,
        )
    }
}

impl<'b, T: Ord + Clone> Sub<&'b ItemAmount<T>> for &ItemAmount<T> {
    type Output = ItemAmount<T>;

    fn sub(self, rhs: &'b ItemAmount<T>) -> ItemAmount<T> {
        self.merge(
            rhs.iter_amount().map(|(item, amount)| (item.clone(), amount)),
            AmountOp::Sub,
        )
    }
}

impl<T: Ord + Clone> Add<i64> for ItemAmount<T> {
    type Output = Self;

    fn add(self, rhs: i64) -> Self {
        self.broadcast(rhs, AmountOp::Add)
    }
}

impl<T: Ord + Clone> Sub<i64> for ItemAmount<T> {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self {
        self.broadcast(rhs, AmountOp::Sub)
    }
}

impl<T: Ord + Clone> Mul<i64> for ItemAmount<T> {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        self.broadcast(rhs, AmountOp::Mul)
    }
}

impl<T: Ord + Clone> Mul<ItemAmount<T>> for i64 {
    type Output = ItemAmount<T>;

    fn mul(self, rhs: ItemAmount<T>) -> ItemAmount<T> {
        rhs.broadcast(self, AmountOp::Mul)
    }
}

impl<T: fmt::Display> fmt::Display for ItemAmount<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .items
            .iter()
            .map(|(item, amount)| format!("{amount}*{item}"))
            .collect();
        write!(f, "{}", parts.join(" + "))
    }
}
