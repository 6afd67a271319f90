mod common;

use mathhammer::combat::AttackPhase;
use mathhammer::dice::{ratio, Distribution};
use mathhammer::models::{
    Effect, EffectKind, Model, Stat, StatModifier, Unit, Wargear, WeaponAmount,
};
use mathhammer::MathhammerError;

use common::{armed, boltgun, model, weapon, with_effects};

fn marines(count: i64) -> Unit {
    Unit::of(armed("Marine", boltgun(), 1), count)
}

fn target() -> Unit {
    Unit::of(model("Target"), 1)
}

fn bolters(count: i64) -> WeaponAmount {
    WeaponAmount::from_item(boltgun(), count)
}

#[test]
fn over_reserving_empties_the_pool() {
    let mut attack = marines(4).declare();
    let err = attack.weapons(&bolters(5)).unwrap_err();

    assert!(matches!(
        err,
        MathhammerError::InsufficientWeapons {
            requested: 5,
            available: 4,
            ..
        }
    ));
    assert_eq!(attack.available(&boltgun()), 0);
    assert!(attack.remaining_weapons().is_empty());

    attack.attack(&target(), 24);
    let report = attack.sanitize();
    assert_eq!(report.attacks()[0].damage, Distribution::from_outcome(0));
}

#[test]
fn unit_shortcut_reports_shortage() {
    let err = marines(2).weapons(&bolters(3)).unwrap_err();
    assert!(matches!(err, MathhammerError::InsufficientWeapons { .. }));
}

#[test]
fn reserved_weapons_fire_first_and_the_rest_follow() {
    let mut attack = marines(4).declare();
    attack
        .weapons(&bolters(2))
        .unwrap()
        .attack(&target(), 24)
        .attack(&target(), 24);

    let attacks = attack.attacks();
    assert_eq!(attacks.len(), 2);
    assert_eq!(attacks[0].contributions[0].count, 2);
    assert_eq!(attacks[1].contributions[0].count, 2);
    assert_eq!(attack.available(&boltgun()), 0);
    assert_eq!(attack.phase(), AttackPhase::AttackDeclared);
}

#[test]
fn successive_reservations_merge() {
    let mut attack = marines(4).declare();
    attack.weapons(&bolters(1)).unwrap();
    attack.weapons(&bolters(1)).unwrap();
    assert_eq!(attack.phase(), AttackPhase::WeaponsPooled);
    attack.attack(&target(), 24);

    assert_eq!(attack.attacks()[0].contributions[0].count, 2);
    assert_eq!(attack.available(&boltgun()), 2);
}

#[test]
fn empty_reservation_is_a_no_op() {
    let mut attack = marines(2).declare();
    attack.weapons(&WeaponAmount::new()).unwrap();
    assert_eq!(attack.phase(), AttackPhase::Idle);
    assert_eq!(attack.available(&boltgun()), 2);
}

#[test]
fn out_of_range_weapons_are_spent_without_damage() {
    let mut attack = marines(3).declare();
    attack.attack(&target(), 30);

    let declared = &attack.attacks()[0];
    assert!(declared.contributions.is_empty());
    assert_eq!(declared.damage, Distribution::from_outcome(0));
    assert_eq!(attack.available(&boltgun()), 0);
}

#[test]
fn auras_reach_only_strictly_inside_their_range() {
    let lord = Unit::of(
        with_effects(
            model("Lord"),
            vec![Effect::aura("Lord of Chaos", EffectKind::Offensive, 6)
                .with_modifier(StatModifier::add(Stat::AttackSkill, -1))],
        ),
        1,
    );

    let mut far = marines(1).declare();
    far.auras(&[&lord], 6);
    assert!(far.active_effects().is_empty());

    let mut near = marines(1).declare();
    near.auras(&[&lord], 3).attack(&target(), 24);
    assert_eq!(near.active_effects().len(), 1);
    assert_eq!(near.attacks()[0].damage.probability(1), ratio(5, 24));
}

#[test]
fn ad_hoc_effects_join_active_list() {
    let mut attack = marines(1).effects([Effect::new("Hatred", EffectKind::Offensive)
        .with_modifier(StatModifier::add(Stat::AttackSkill, -1))]);
    assert_eq!(attack.phase(), AttackPhase::EffectsApplied);
    attack.attack(&target(), 24);
    assert_eq!(attack.attacks()[0].damage.probability(1), ratio(5, 24));
}

#[test]
fn defensive_effects_on_the_target_apply() {
    let covered = Unit::of(
        with_effects(
            model("Target"),
            vec![Effect::new("Cover", EffectKind::Defensive)
                .with_modifier(StatModifier::add(Stat::Save, -1))],
        ),
        1,
    );
    let report = marines(1).attack(&covered, 24).sanitize();
    assert_eq!(report.total().probability(1), ratio(1, 9));
}

#[test]
fn mixed_targets_are_weighted_by_count() {
    let gun = weapon("Lasgun", 24, 1, 4, 0, 1);
    let shooter = Unit::of(
        Model {
            ballistic_skill: 1,
            ..armed("Sniper", gun, 1)
        },
        1,
    );
    let grunt = Model {
        save: 7,
        ..model("Grunt")
    };
    let brute = Model {
        save: 7,
        toughness: 8,
        ..model("Brute")
    };

    let even = Unit::of(grunt.clone(), 1) + Unit::of(brute.clone(), 1);
    let even_report = shooter.attack(&even, 12).sanitize();
    assert_eq!(even_report.total().probability(1), ratio(1, 3));

    let skewed = Unit::of(grunt, 3) + Unit::of(brute, 1);
    let skewed_report = shooter.attack(&skewed, 12).sanitize();
    assert_eq!(skewed_report.total().probability(1), ratio(5, 12));
}

#[test]
fn report_total_adds_every_attack() {
    let mut attack = marines(2).declare();
    attack
        .weapons(&bolters(1))
        .unwrap()
        .attack(&target(), 24)
        .attack(&target(), 24);
    let report = attack.sanitize();

    let total = report.total();
    assert_eq!(total.probability(2), ratio(1, 36));
    assert_eq!(total.mean(), ratio(1, 3));
}

#[test]
fn equipped_squads_fire_their_extra_weapons() {
    let squad = Unit::of(model("Recruit"), 3)
        .equip([Wargear::from(bolters(1))])
        .unwrap();
    let attack = squad.declare();
    assert_eq!(attack.available(&boltgun()), 3);
}

#[test]
fn phase_never_moves_backwards() {
    let mut attack = marines(2).declare();
    attack.effects(Vec::new());
    attack.auras(&[], 6);
    assert_eq!(attack.phase(), AttackPhase::EffectsApplied);

    attack.attack(&target(), 24);
    attack.auras(&[], 6).effects(Vec::new());
    assert_eq!(attack.phase(), AttackPhase::AttackDeclared);
    assert!(AttackPhase::Idle < AttackPhase::AttackDeclared);
}
