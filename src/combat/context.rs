use crate::models::{Effect, Model, Stat, Weapon};

/// Stat tuple for one weapon × firing model × target model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttackContext {
    pub attack_skill: i32,
    pub attacks: i32,
    pub armour_penetration: i32,
    pub damage: i32,
    pub strength: i32,
    pub toughness: i32,
    pub wounds: i32,
    pub save: i32,
    pub invulnerable_save: i32,
    pub feel_no_pain: i32,
}

impl AttackContext {
    pub fn from_models(attacker: &Model, weapon: &Weapon, target: &Model) -> Self {
        Self {
            attack_skill: if weapon.is_melee() {
                attacker.weapon_skill
            } else {
                attacker.ballistic_skill
            },
            attacks: weapon.attacks,
            armour_penetration: weapon.armour_penetration,
            damage: weapon.damage,
            strength: weapon.strength,
            toughness: target.toughness,
            wounds: target.wounds,
            save: target.save,
            invulnerable_save: target.invulnerable_save,
            feel_no_pain: target.feel_no_pain,
        }
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::AttackSkill => self.attack_skill,
            Stat::Attacks => self.attacks,
            Stat::ArmourPenetration => self.armour_penetration,
            Stat::Damage => self.damage,
            Stat::Strength => self.strength,
            Stat::Toughness => self.toughness,
            Stat::Wounds => self.wounds,
            Stat::Save => self.save,
            Stat::InvulnerableSave => self.invulnerable_save,
            Stat::FeelNoPain => self.feel_no_pain,
        }
    }

    fn stat_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::AttackSkill => &mut self.attack_skill,
            Stat::Attacks => &mut self.attacks,
            Stat::ArmourPenetration => &mut self.armour_penetration,
            Stat::Damage => &mut self.damage,
            Stat::Strength => &mut self.strength,
            Stat::Toughness => &mut self.toughness,
            Stat::Wounds => &mut self.wounds,
            Stat::Save => &mut self.save,
            Stat::InvulnerableSave => &mut self.invulnerable_save,
            Stat::FeelNoPain => &mut self.feel_no_pain,
        }
    }

    /// Apply one effect's modifiers in their listed order.
    pub fn apply(&mut self, effect: &Effect) {
        for modifier in &effect.modifiers {
            let slot = self.stat_mut(modifier.stat);
            *slot = modifier.apply_to(*slot);
        }
    }

    /// Copy of `self` with every effect applied in the given order.
    pub fn fold(mut self, effects: &[Effect]) -> Self {
        for effect in effects {
            self.apply(effect);
        }
        self
    }
}
