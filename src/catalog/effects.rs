//! Scoped catalog of effect templates.
//!
//! The root scope holds the two base behaviours, `Effect` and `Aura`. Data sets add
//! aliases in a child scope: each alias copies a template already visible, overrides
//! the fields it sets and appends its own modifiers. Lookup walks child to parent, so
//! a child may shadow a parent entry without touching it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MathhammerError, Result};
use crate::models::{Effect, EffectClass, EffectKind, StatModifier};

pub const BASE_EFFECT: &str = "Effect";
pub const BASE_AURA: &str = "Aura";

/// Partially specified effect. Becomes an [Effect] once it has a kind (and, for auras,
/// a range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectTemplate {
    pub class: EffectClass,
    pub kind: Option<EffectKind>,
    pub aura_range: Option<u32>,
    pub attacker_range: Option<u32>,
    pub modifiers: Vec<StatModifier>,
}

impl EffectTemplate {
    pub fn base(class: EffectClass) -> Self {
        Self {
            class,
            kind: None,
            aura_range: None,
            attacker_range: None,
            modifiers: Vec::new(),
        }
    }

    fn instantiate(&self, name: &str) -> Result<Effect> {
        let kind = self.kind.ok_or_else(|| MathhammerError::InvalidEffectSpec {
            name: name.to_string(),
            reason: "no kind set".to_string(),
        })?;
        if self.class == EffectClass::Aura && self.aura_range.is_none() {
            return Err(MathhammerError::InvalidEffectSpec {
                name: name.to_string(),
                reason: "aura without aura_range".to_string(),
            });
        }
        Ok(Effect {
            name: name.to_string(),
            kind,
            class: self.class,
            aura_range: self.aura_range,
            attacker_range: self.attacker_range,
            modifiers: self.modifiers.clone(),
        })
    }
}

/// One entry of a data set's `effects.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub name: String,
    pub base: String,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EffectKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aura_range: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker_range: Option<u32>,
    /// Stat modifiers, each `{"stat": ..., "op": "add" | "set", "value": ...}`.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl EffectSpec {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            kind: None,
            aura_range: None,
            attacker_range: None,
            args: Vec::new(),
        }
    }

    fn modifiers(&self) -> Result<Vec<StatModifier>> {
        self.args
            .iter()
            .map(|arg| {
                serde_json::from_value::<StatModifier>(arg.clone()).map_err(|e| {
                    MathhammerError::InvalidEffectSpec {
                        name: self.name.clone(),
                        reason: format!("bad modifier {arg}: {e}"),
                    }
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EffectCatalog {
    local: BTreeMap<String, EffectTemplate>,
    parent: Option<Arc<EffectCatalog>>,
}

impl EffectCatalog {
    /// Root scope with the `Effect` and `Aura` base behaviours.
    pub fn builtin() -> Self {
        let mut local = BTreeMap::new();
        local.insert(
            BASE_EFFECT.to_string(),
            EffectTemplate::base(EffectClass::Plain),
        );
        local.insert(BASE_AURA.to_string(), EffectTemplate::base(EffectClass::Aura));
        Self {
            local,
            parent: None,
        }
    }

    pub fn child_of(parent: Arc<EffectCatalog>) -> Self {
        Self {
            local: BTreeMap::new(),
            parent: Some(parent),
        }
    }

    /// Empty scope layered over `self`.
    pub fn new_child(self: &Arc<Self>) -> Self {
        Self::child_of(Arc::clone(self))
    }

    pub fn template(&self, name: &str) -> Option<&EffectTemplate> {
        match self.local.get(name) {
            Some(template) => Some(template),
            None => self.parent.as_deref().and_then(|parent| parent.template(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.template(name).is_some()
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.local.contains_key(name)
    }

    /// Add a template to this scope. Names already visible in a parent may be shadowed.
    pub fn register(&mut self, name: impl Into<String>, template: EffectTemplate) -> Result<()> {
        let name = name.into();
        if self.local.contains_key(&name) {
            return Err(MathhammerError::DuplicateEffectName(name));
        }
        self.local.insert(name, template);
        Ok(())
    }

    /// Register `spec.name` as a specialisation of `spec.base`.
    pub fn alias(&mut self, spec: &EffectSpec) -> Result<()> {
        if self.local.contains_key(&spec.name) {
            return Err(MathhammerError::DuplicateEffectName(spec.name.clone()));
        }
        let mut template = self
            .template(&spec.base)
            .cloned()
            .ok_or_else(|| MathhammerError::UnknownEffect(spec.base.clone()))?;

        if spec.kind.is_some() {
            template.kind = spec.kind;
        }
        if spec.aura_range.is_some() {
            template.aura_range = spec.aura_range;
        }
        if spec.attacker_range.is_some() {
            template.attacker_range = spec.attacker_range;
        }
        template.modifiers.extend(spec.modifiers()?);

        self.register(spec.name.clone(), template)
    }

    /// Resolve a runtime effect by name.
    pub fn get(&self, name: &str) -> Result<Effect> {
        self.template(name)
            .ok_or_else(|| MathhammerError::UnknownEffect(name.to_string()))?
            .instantiate(name)
    }

    /// Drop an entry from this scope only. Parent entries it shadowed become visible again.
    pub fn remove_local(&mut self, name: &str) -> Option<EffectTemplate> {
        self.local.remove(name)
    }

    /// Every visible name, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut names);
        names.into_iter().collect()
    }

    fn collect_names(&self, names: &mut BTreeSet<String>) {
        if let Some(parent) = &self.parent {
            parent.collect_names(names);
        }
        names.extend(self.local.keys().cloned());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::Stat;

    fn spec(name: &str, base: &str, kind: Option<EffectKind>, args: Vec<Value>) -> EffectSpec {
        EffectSpec {
            kind,
            args,
            ..EffectSpec::new(name, base)
        }
    }

    #[test]
    fn alias_specialises_base() {
        let mut catalog = EffectCatalog::builtin();
        catalog
            .alias(&spec(
                "Hatred",
                BASE_EFFECT,
                Some(EffectKind::Offensive),
                vec![json!({"stat": "attack_skill", "value": -1})],
            ))
            .unwrap();
        let effect = catalog.get("Hatred").unwrap();
        assert_eq!(effect.kind, EffectKind::Offensive);
        assert_eq!(effect.modifiers, vec![StatModifier::add(Stat::AttackSkill, -1)]);
    }

    #[test]
    fn bases_cannot_be_instantiated_without_kind() {
        let catalog = EffectCatalog::builtin();
        assert!(matches!(
            catalog.get(BASE_EFFECT),
            Err(MathhammerError::InvalidEffectSpec { .. })
        ));
    }

    #[test]
    fn aura_needs_range() {
        let mut catalog = EffectCatalog::builtin();
        catalog
            .alias(&spec("Banner", BASE_AURA, Some(EffectKind::Offensive), vec![]))
            .unwrap();
        assert!(catalog.get("Banner").is_err());
    }

    #[test]
    fn malformed_args_are_rejected() {
        let mut catalog = EffectCatalog::builtin();
        let err = catalog
            .alias(&spec(
                "Broken",
                BASE_EFFECT,
                Some(EffectKind::Offensive),
                vec![json!({"stat": "luck", "value": 1})],
            ))
            .unwrap_err();
        assert!(matches!(err, MathhammerError::InvalidEffectSpec { .. }));
        assert!(!catalog.contains("Broken"));
    }

    #[test]
    fn child_scope_shadows_without_touching_parent() {
        let mut root = EffectCatalog::builtin();
        root.alias(&spec("Cover", BASE_EFFECT, Some(EffectKind::Defensive), vec![]))
            .unwrap();
        let root = Arc::new(root);

        let mut child = root.new_child();
        child
            .alias(&spec("Cover", BASE_EFFECT, Some(EffectKind::Offensive), vec![]))
            .unwrap();

        assert_eq!(child.get("Cover").unwrap().kind, EffectKind::Offensive);
        assert_eq!(root.get("Cover").unwrap().kind, EffectKind::Defensive);

        child.remove_local("Cover");
        assert_eq!(child.get("Cover").unwrap().kind, EffectKind::Defensive);
    }
}
