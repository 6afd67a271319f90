use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::amount::ItemAmount;
use crate::combat::UnitAttack;
use crate::error::{MathhammerError, Result};
use crate::models::{Effect, Model, ModelLoadout, Piece, WeaponAmount};

/// Extra equipment attached to the model of a single-model-type unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wargear {
    Weapons(WeaponAmount),
    Effect(Effect),
}

impl From<WeaponAmount> for Wargear {
    fn from(weapons: WeaponAmount) -> Self {
        Self::Weapons(weapons)
    }
}

impl From<Effect> for Wargear {
    fn from(effect: Effect) -> Self {
        Self::Effect(effect)
    }
}

/// A squad: a weighted bag of pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unit {
    pieces: ItemAmount<Piece>,
}

impl Unit {
    pub fn new(pieces: ItemAmount<Piece>) -> Self {
        Self { pieces }
    }

    pub fn of(model: Model, count: i64) -> Self {
        Self::new(ItemAmount::from_item(Piece::Model(model), count))
    }

    pub fn pieces(&self) -> &ItemAmount<Piece> {
        &self.pieces
    }

    pub fn model_count(&self) -> i64 {
        self.pieces.total()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Attach weapons and effects to the unit's only model type. The base weapons are
    /// kept and the new ones added on top.
    pub fn equip<I>(&self, wargear: I) -> Result<Unit>
    where
        I: IntoIterator<Item = Wargear>,
    {
        let (piece, count) = self
            .pieces
            .single()
            .ok_or_else(|| MathhammerError::InvalidUnitComposition(self.pieces.len()))?;
        let ModelLoadout {
            model,
            mut weapons,
            mut effects,
        } = piece.to_loadout();

        for item in wargear {
            match item {
                Wargear::Weapons(extra) => weapons = weapons + extra,
                Wargear::Effect(effect) => effects.push(effect),
            }
        }

        let loadout = ModelLoadout {
            model,
            weapons,
            effects,
        };
        Ok(Unit::new(ItemAmount::from_item(Piece::Loadout(loadout), count)))
    }

    /// Copy of the unit where every piece carries its full loadout.
    pub fn normalized(&self) -> ItemAmount<ModelLoadout> {
        self.pieces.map_items(Piece::to_loadout)
    }

    /// Start a fresh attack declaration for this unit.
    pub fn declare(&self) -> UnitAttack {
        UnitAttack::new(self.normalized())
    }

    pub fn auras(&self, allies: &[&Unit], distance: u32) -> UnitAttack {
        let mut attack = self.declare();
        attack.auras(allies, distance);
        attack
    }

    pub fn effects<I>(&self, effects: I) -> UnitAttack
    where
        I: IntoIterator<Item = Effect>,
    {
        let mut attack = self.declare();
        attack.effects(effects);
        attack
    }

    pub fn weapons(&self, amount: &WeaponAmount) -> Result<UnitAttack> {
        let mut attack = self.declare();
        attack.weapons(amount)?;
        Ok(attack)
    }

    pub fn attack(&self, target: &Unit, distance: u32) -> UnitAttack {
        let mut attack = self.declare();
        attack.attack(target, distance);
        attack
    }
}

impl Add for Unit {
    type Output = Unit;

    fn add(self, rhs: Unit) -> Unit {
        Unit::new(self.pieces + rhs.pieces)
    }
}

impl Sub for Unit {
    type Output = Unit;

    fn sub(self, rhs: Unit) -> Unit {
        Unit::new(self.pieces - rhs.pieces)
    }
}

impl Mul<i64> for Unit {
    type Output = Unit;

    fn mul(self, rhs: i64) -> Unit {
        Unit::new(self.pieces * rhs)
    }
}

impl Mul<Unit> for i64 {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        rhs * self
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit:")?;
        for (piece, amount) in self.pieces.iter_amount() {
            write!(f, "\n| {amount}*{piece}")?;
        }
        Ok(())
    }
}
