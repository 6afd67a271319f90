use std::collections::BTreeMap;

use crate::amount::ItemAmount;
use crate::combat::report::{AttackReport, Contribution, DeclaredAttack};
use crate::combat::{evaluate_volley, select_effects, AttackContext};
use crate::dice::{ratio, Distribution};
use crate::error::{MathhammerError, Result};
use crate::models::{Effect, ModelLoadout, Unit, Weapon, WeaponAmount};

/// Weapon instances still waiting to fire, each paired with the model carrying it.
type WeaponPool = BTreeMap<Weapon, Vec<ModelLoadout>>;

/// How far a declaration has progressed. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttackPhase {
    Idle,
    AurasApplied,
    EffectsApplied,
    WeaponsPooled,
    AttackDeclared,
}

/// One unit's shooting or fighting, declared attack by attack.
///
/// Weapons are consumed: each attack uses the pending reservation from
/// [UnitAttack::weapons], or everything still in the pool when nothing was reserved.
/// Finish with [UnitAttack::sanitize].
#[derive(Debug, Clone)]
pub struct UnitAttack {
    unit: ItemAmount<ModelLoadout>,
    auras: Vec<Effect>,
    pool: WeaponPool,
    next_attack: Option<WeaponPool>,
    attacks: Vec<DeclaredAttack>,
    phase: AttackPhase,
}

impl UnitAttack {
    pub fn new(unit: ItemAmount<ModelLoadout>) -> Self {
        let mut pool = WeaponPool::new();
        for model in unit.iter_all() {
            for weapon in model.weapons.iter_all() {
                pool.entry(weapon.clone()).or_default().push(model.clone());
            }
        }
        Self {
            unit,
            auras: Vec::new(),
            pool,
            next_attack: None,
            attacks: Vec::new(),
            phase: AttackPhase::Idle,
        }
    }

    pub fn unit(&self) -> &ItemAmount<ModelLoadout> {
        &self.unit
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    /// Auras and ad-hoc effects active for every later attack.
    pub fn active_effects(&self) -> &[Effect] {
        &self.auras
    }

    pub fn attacks(&self) -> &[DeclaredAttack] {
        &self.attacks
    }

    /// Unassigned instances of `weapon`.
    pub fn available(&self, weapon: &Weapon) -> usize {
        self.pool.get(weapon).map_or(0, Vec::len)
    }

    pub fn remaining_weapons(&self) -> WeaponAmount {
        self.pool
            .iter()
            .map(|(weapon, carriers)| (weapon.clone(), carriers.len() as i64))
            .collect()
    }

    /// Pick up auras from allied units whose range reaches past `distance`.
    pub fn auras(&mut self, allies: &[&Unit], distance: u32) -> &mut Self {
        for ally in allies {
            for piece in ally.pieces().iter_unique() {
                self.auras.extend(
                    piece
                        .effects()
                        .iter()
                        .filter(|effect| effect.projects_to(distance))
                        .cloned(),
                );
            }
        }
        self.advance(AttackPhase::AurasApplied);
        self
    }

    pub fn effects<I>(&mut self, effects: I) -> &mut Self
    where
        I: IntoIterator<Item = Effect>,
    {
        self.auras.extend(effects);
        self.advance(AttackPhase::EffectsApplied);
        self
    }

    /// Reserve weapons for the next attack only. Running short empties the whole pool.
    pub fn weapons(&mut self, amount: &WeaponAmount) -> Result<&mut Self> {
        if amount.is_empty() {
            return Ok(self);
        }
        let mut reserved = self.next_attack.take().unwrap_or_default();

        for (weapon, requested) in amount.iter_amount() {
            let available = self.available(weapon);
            let wanted = usize::try_from(requested).unwrap_or(0);
            if available < wanted {
                tracing::warn!(
                    weapon = %weapon,
                    requested,
                    available,
                    "weapon reservation rejected, clearing pool"
                );
                self.pool.clear();
                return Err(MathhammerError::InsufficientWeapons {
                    weapon: weapon.name.clone(),
                    requested,
                    available,
                });
            }

            let taken: Vec<ModelLoadout> = match self.pool.get_mut(weapon) {
                Some(carriers) => carriers.drain(..wanted).collect(),
                None => Vec::new(),
            };
            if self.available(weapon) == 0 {
                self.pool.remove(weapon);
            }
            reserved.entry(weapon.clone()).or_default().extend(taken);
        }

        self.next_attack = Some(reserved);
        self.advance(AttackPhase::WeaponsPooled);
        Ok(self)
    }

    /// Fire the reserved weapons (or everything left) at `target` from `distance`.
    pub fn attack(&mut self, target: &Unit, distance: u32) -> &mut Self {
        let weapons = match self.next_attack.take() {
            Some(reserved) => reserved,
            None => std::mem::take(&mut self.pool),
        };
        let targets = target.normalized();
        let contributions = if targets.is_empty() {
            Vec::new()
        } else {
            self.contributions(&weapons, &targets, distance)
        };
        let damage = Distribution::sum(
            contributions
                .iter()
                .map(|c| c.damage.repeat(u32::try_from(c.count).unwrap_or(u32::MAX))),
        );

        tracing::debug!(
            defender = %targets,
            distance,
            contributions = contributions.len(),
            "attack declared"
        );
        self.attacks.push(DeclaredAttack {
            target: targets.to_string(),
            distance,
            contributions,
            damage,
        });
        self.advance(AttackPhase::AttackDeclared);
        self
    }

    fn contributions(
        &self,
        weapons: &WeaponPool,
        targets: &ItemAmount<ModelLoadout>,
        distance: u32,
    ) -> Vec<Contribution> {
        let target_count = targets.total();
        let mut contributions = Vec::new();

        for (weapon, carriers) in weapons {
            if !weapon.reaches(distance) {
                continue;
            }
            let firing: ItemAmount<ModelLoadout> =
                carriers.iter().map(|model| (model.clone(), 1)).collect();

            for (model, count) in firing.iter_amount() {
                let damage = Distribution::mixture(targets.iter_amount().map(|(defender, n)| {
                    let effects = select_effects(model, weapon, defender, &self.auras, distance);
                    let context = AttackContext::from_models(&model.model, weapon, &defender.model);
                    (ratio(n, target_count), evaluate_volley(&effects, context))
                }));
                contributions.push(Contribution {
                    weapon: weapon.name.clone(),
                    model: model.name().to_string(),
                    count: usize::try_from(count).unwrap_or(0),
                    damage,
                });
            }
        }
        contributions
    }

    fn advance(&mut self, phase: AttackPhase) {
        self.phase = self.phase.max(phase);
    }

    pub fn sanitize(self) -> AttackReport {
        AttackReport::new(self.attacks)
    }
}
