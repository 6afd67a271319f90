//! Exact damage distribution of a single attack.
//!
//! The chain is fixed: hit, wound, save, then damage with feel-no-pain. Each of the
//! first three stages is a Bernoulli roll, and only survivors move on, so stages are
//! chained with the compound product.

use num::One;

use crate::combat::AttackContext;
use crate::dice::{ratio, Branch, Distribution, Probability};
use crate::models::{Effect, Stat};

/// Roll needed on a D6 to wound.
pub fn wound_threshold(strength: i32, toughness: i32) -> i32 {
    let (strength, toughness) = (i64::from(strength), i64::from(toughness));
    if strength >= 2 * toughness {
        2
    } else if strength > toughness {
        3
    } else if strength == toughness {
        4
    } else if 2 * strength <= toughness {
        6
    } else {
        5
    }
}

/// Best save available against `armour_penetration`. 7 means no save.
pub fn effective_save(save: i32, armour_penetration: i32, invulnerable_save: i32) -> i32 {
    let armour = save.saturating_sub(armour_penetration);
    armour.min(invulnerable_save).min(7).max(1)
}

/// Chance of rolling `threshold` or more on a D6.
pub fn roll_chance(threshold: i32) -> Probability {
    let threshold = Stat::Save.clamp(threshold);
    ratio(i64::from(7 - threshold), 6)
}

/// Chance that the armour or invulnerable save fails.
pub fn save_fail_chance(save: i32) -> Probability {
    let save = Stat::Save.clamp(save);
    ratio(i64::from(save - 1), 6)
}

/// Damage left after each point is ignored on a feel-no-pain roll of `feel_no_pain`+.
pub fn feel_no_pain(damage: &Distribution, feel_no_pain: i32) -> Distribution {
    let kept = Distribution::bernoulli(Probability::one() - roll_chance(feel_no_pain));
    let nothing = |_: u32| Distribution::from_outcome(0);
    let branches: [Branch<'_>; 1] = [(0..=0, &nothing)];
    damage.apply_chances(&branches, &|amount: u32| kept.repeat(amount))
}

fn non_negative(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Fold `effects` into `context`, then evaluate one attack.
pub fn evaluate(effects: &[Effect], context: AttackContext) -> Distribution {
    evaluate_resolved(&context.fold(effects))
}

/// Evaluate one attack for a context that already carries its effects.
pub fn evaluate_resolved(context: &AttackContext) -> Distribution {
    let hit = Distribution::bernoulli(roll_chance(context.attack_skill));
    let wound = Distribution::bernoulli(roll_chance(wound_threshold(
        context.strength,
        context.toughness,
    )));
    let save = Distribution::bernoulli(save_fail_chance(effective_save(
        context.save,
        context.armour_penetration,
        context.invulnerable_save,
    )));
    let damage = feel_no_pain(
        &Distribution::from_outcome(non_negative(context.damage)),
        context.feel_no_pain,
    );

    hit * wound * save * damage
}

/// All of one weapon's attacks, after folding `effects` into `context`.
pub fn evaluate_volley(effects: &[Effect], context: AttackContext) -> Distribution {
    let context = context.fold(effects);
    Distribution::from_outcome(non_negative(context.attacks)) * evaluate_resolved(&context)
}
