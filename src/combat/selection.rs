use crate::models::{Effect, EffectKind, ModelLoadout, Weapon};

/// Effects that apply to one weapon fired by `attacker` at `defender` from `distance`.
///
/// Each pool only contributes effects of the role it plays: the attacker's own
/// effects, the active auras and the weapon's effects must be offensive, the
/// defender's must be defensive. Range-limited effects drop out past their range.
/// The result is sorted by name, then by the remaining fields.
pub fn select_effects(
    attacker: &ModelLoadout,
    weapon: &Weapon,
    defender: &ModelLoadout,
    auras: &[Effect],
    distance: u32,
) -> Vec<Effect> {
    let pools = [
        (attacker.effects.as_slice(), EffectKind::Offensive),
        (auras, EffectKind::Offensive),
        (weapon.effects.as_slice(), EffectKind::Offensive),
        (defender.effects.as_slice(), EffectKind::Defensive),
    ];

    let mut selected: Vec<Effect> = pools
        .iter()
        .flat_map(|&(pool, role)| pool.iter().filter(move |effect| effect.kind == role))
        .filter(|effect| effect.usable_at(distance))
        .cloned()
        .collect();
    selected.sort();
    selected
}
