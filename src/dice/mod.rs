//! Exact discrete probability distributions.
//!
//! Every probability is a reduced [num::BigRational]; nothing in the chain rounds.
//! `+` convolves independent distributions, `*` compounds them (roll the left side,
//! then add up that many independent copies of the right side).

mod distribution;

pub use distribution::{ratio, Branch, Distribution, Probability};
