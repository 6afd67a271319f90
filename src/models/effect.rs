use serde::{Deserialize, Serialize};

/// Which side of an attack an effect works for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    #[serde(alias = "Offencive", alias = "offensive")]
    Offensive,
    #[serde(alias = "defensive")]
    Defensive,
}

/// Behaviour class of an effect. Auras project from one unit onto its allies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectClass {
    Plain,
    Aura,
}

/// A field of [crate::combat::AttackContext] an effect may modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    AttackSkill,
    Attacks,
    ArmourPenetration,
    Damage,
    Strength,
    Toughness,
    Wounds,
    Save,
    InvulnerableSave,
    FeelNoPain,
}

impl Stat {
    /// Inclusive legal range. Roll thresholds live in 1..=7 where 7 means "cannot succeed".
    pub const fn bounds(self) -> (i32, i32) {
        match self {
            Self::AttackSkill | Self::Save | Self::InvulnerableSave | Self::FeelNoPain => (1, 7),
            Self::Attacks | Self::Damage => (0, i32::MAX),
            Self::Strength | Self::Toughness | Self::Wounds => (1, i32::MAX),
            Self::ArmourPenetration => (i32::MIN, i32::MAX),
        }
    }

    pub const fn clamp(self, value: i32) -> i32 {
        let (low, high) = self.bounds();
        if value < low {
            low
        } else if value > high {
            high
        } else {
            value
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierOp {
    #[default]
    Add,
    Set,
}

/// Numeric payload of an effect, folded onto an attack's stat tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: Stat,
    #[serde(default)]
    pub op: ModifierOp,
    pub value: i32,
}

impl StatModifier {
    pub fn add(stat: Stat, value: i32) -> Self {
        Self {
            stat,
            op: ModifierOp::Add,
            value,
        }
    }

    pub fn set(stat: Stat, value: i32) -> Self {
        Self {
            stat,
            op: ModifierOp::Set,
            value,
        }
    }

    /// New stat value, clamped into the stat's legal range.
    pub fn apply_to(&self, current: i32) -> i32 {
        let raw = match self.op {
            ModifierOp::Add => current.saturating_add(self.value),
            ModifierOp::Set => self.value,
        };
        self.stat.clamp(raw)
    }
}

/// Resolved runtime effect. Field order gives the name-first total order used when
/// effects are selected for an attack.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Effect {
    pub name: String,
    pub kind: EffectKind,
    pub class: EffectClass,
    pub aura_range: Option<u32>,
    pub attacker_range: Option<u32>,
    pub modifiers: Vec<StatModifier>,
}

impl Effect {
    pub fn new(name: impl Into<String>, kind: EffectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            class: EffectClass::Plain,
            aura_range: None,
            attacker_range: None,
            modifiers: Vec::new(),
        }
    }

    pub fn aura(name: impl Into<String>, kind: EffectKind, aura_range: u32) -> Self {
        Self {
            class: EffectClass::Aura,
            aura_range: Some(aura_range),
            ..Self::new(name, kind)
        }
    }

    pub fn with_attacker_range(mut self, attacker_range: u32) -> Self {
        self.attacker_range = Some(attacker_range);
        self
    }

    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn is_aura(&self) -> bool {
        self.class == EffectClass::Aura
    }

    /// Auras reach allies strictly inside their range.
    pub fn projects_to(&self, distance: u32) -> bool {
        self.is_aura() && self.aura_range.is_some_and(|range| range > distance)
    }

    /// Range-limited effects stop working once the attack is made from further away.
    pub fn usable_at(&self, distance: u32) -> bool {
        self.attacker_range.map_or(true, |range| range >= distance)
    }
}
