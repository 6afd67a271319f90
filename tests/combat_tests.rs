mod common;

use mathhammer::combat::{
    effective_save, evaluate, evaluate_resolved, evaluate_volley, select_effects, wound_threshold,
    AttackContext,
};
use mathhammer::dice::{ratio, Probability};
use mathhammer::models::{Effect, EffectKind, ModelLoadout, Stat, StatModifier, Unit};
use num::One;

use common::{armed, boltgun, model, weapon, with_effects};

fn context(attack_skill: i32, damage: i32, feel_no_pain: i32) -> AttackContext {
    AttackContext {
        attack_skill,
        attacks: 1,
        armour_penetration: -1,
        damage,
        strength: 4,
        toughness: 4,
        wounds: 1,
        save: 3,
        invulnerable_save: 7,
        feel_no_pain,
    }
}

fn offensive(name: &str) -> Effect {
    Effect::new(name, EffectKind::Offensive)
}

fn defensive(name: &str) -> Effect {
    Effect::new(name, EffectKind::Defensive)
}

fn names(effects: &[Effect]) -> Vec<&str> {
    effects.iter().map(|effect| effect.name.as_str()).collect()
}

#[test]
fn wound_threshold_follows_strength_toughness_table() {
    assert_eq!(wound_threshold(8, 4), 2);
    assert_eq!(wound_threshold(5, 4), 3);
    assert_eq!(wound_threshold(4, 4), 4);
    assert_eq!(wound_threshold(3, 8), 6);
    assert_eq!(wound_threshold(4, 5), 5);
}

#[test]
fn effective_save_is_capped_at_seven() {
    assert_eq!(effective_save(4, -4, 7), 7);
    assert_eq!(effective_save(2, -3, 7), 5);
    assert_eq!(effective_save(3, -4, 5), 5);

    for save in 1..=7 {
        for ap in -6..=6 {
            for invulnerable in 1..=7 {
                let result = effective_save(save, ap, invulnerable);
                assert!((1..=7).contains(&result));
                if save - ap > 7 && invulnerable == 7 {
                    assert_eq!(result, 7);
                }
            }
        }
    }
}

#[test]
fn every_evaluation_conserves_probability_mass() {
    for attack_skill in 0..=8 {
        for damage in 0..=3 {
            for feel_no_pain in [2, 5, 7] {
                let ctx = context(attack_skill, damage, feel_no_pain);
                assert_eq!(evaluate_resolved(&ctx).total_probability(), Probability::one());

                let volley = AttackContext { attacks: 3, ..ctx };
                assert_eq!(evaluate_volley(&[], volley).total_probability(), Probability::one());
            }
        }
    }
}

#[test]
fn single_bolter_shot_end_to_end() {
    let damage = evaluate(&[], context(3, 1, 7));
    assert_eq!(damage.probability(1), ratio(1, 6));
    assert_eq!(damage.probability(0), ratio(5, 6));

    let shooter = Unit::of(armed("Marine", boltgun(), 1), 1);
    let target = Unit::of(model("Target"), 1);
    let report = shooter.attack(&target, 24).sanitize();
    assert_eq!(report.total().probability(1), ratio(1, 6));
}

#[test]
fn volley_compounds_attacks() {
    let heavy = AttackContext {
        attacks: 3,
        strength: 5,
        damage: 2,
        ..context(3, 2, 7)
    };
    let volley = evaluate_volley(&[], heavy);
    assert_eq!(volley.mean(), ratio(4, 3));
    assert_eq!(volley.max_outcome(), Some(6));
}

#[test]
fn effect_selection_is_deterministic_under_shuffling() {
    let aura = Effect::aura("Dark Glory", EffectKind::Offensive, 6);
    let mut gun = boltgun();
    gun.effects = vec![offensive("Accurate"), defensive("Sticky")];
    let attacker = ModelLoadout::from_model(&with_effects(
        model("Marine"),
        vec![offensive("Zeal"), offensive("Bolter Drill")],
    ));
    let defender = ModelLoadout::from_model(&with_effects(
        model("Target"),
        vec![defensive("Cover"), offensive("Hatred")],
    ));

    let forward = select_effects(&attacker, &gun, &defender, &[aura.clone()], 12);

    let mut shuffled_attacker = attacker.clone();
    shuffled_attacker.effects.reverse();
    let mut shuffled_gun = gun.clone();
    shuffled_gun.effects.reverse();
    let mut shuffled_defender = defender.clone();
    shuffled_defender.effects.reverse();
    let backward = select_effects(&shuffled_attacker, &shuffled_gun, &shuffled_defender, &[aura], 12);

    assert_eq!(forward, backward);
    assert_eq!(
        names(&forward),
        vec!["Accurate", "Bolter Drill", "Cover", "Dark Glory", "Zeal"]
    );
}

#[test]
fn attacker_range_gates_effects() {
    let mut gun = boltgun();
    gun.effects = vec![offensive("Rapid Fire").with_attacker_range(12)];
    let attacker = ModelLoadout::from_model(&model("Marine"));
    let defender = ModelLoadout::from_model(&model("Target"));

    assert_eq!(names(&select_effects(&attacker, &gun, &defender, &[], 12)), vec!["Rapid Fire"]);
    assert!(select_effects(&attacker, &gun, &defender, &[], 13).is_empty());
}

#[test]
fn fold_follows_name_order() {
    let attacker = ModelLoadout::from_model(&model("Marine"));
    let defender = ModelLoadout::from_model(&model("Target"));
    let gun = weapon("Autogun", 24, 1, 4, 0, 1);

    let plus_then_set = [
        offensive("Alpha").with_modifier(StatModifier::add(Stat::AttackSkill, -5)),
        offensive("Beta").with_modifier(StatModifier::set(Stat::AttackSkill, 4)),
    ];
    let set_then_plus = [
        offensive("Alpha").with_modifier(StatModifier::set(Stat::AttackSkill, 4)),
        offensive("Beta").with_modifier(StatModifier::add(Stat::AttackSkill, -5)),
    ];

    let base = AttackContext::from_models(&attacker.model, &gun, &defender.model);
    let first = select_effects(&attacker, &gun, &defender, &plus_then_set, 0);
    let second = select_effects(&attacker, &gun, &defender, &set_then_plus, 0);

    assert_eq!(base.fold(&first).attack_skill, 4);
    assert_eq!(base.fold(&second).attack_skill, 1);
    assert_ne!(evaluate(&first, base), evaluate(&second, base));
}
