//! Permission model shared between the API (`/api/system/auth/me`) and the UI.
//!
//! A user carries [`PermissionGrants`]: namespace-wide action sets plus
//! per-entity overrides. The UI asks questions through [`PermissionOracle`]
//! and composes checks with [`PermissionExpr`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionAction {
    Create,
    Read,
    Update,
    Delete,
}

pub trait PermissionOracle {
    /// `entity_id = None` asks the namespace-wide question.
    fn can(&self, namespace: &str, action: PermissionAction, entity_id: Option<&str>) -> bool;
}

/// Per-entity override. `deny` wins over `allow`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPermission {
    #[serde(default)]
    pub allow: BTreeSet<PermissionAction>,
    #[serde(default)]
    pub deny: BTreeSet<PermissionAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrants {
    #[serde(default)]
    pub superuser: bool,
    /// namespace -> actions granted on every entity of the namespace
    #[serde(default)]
    pub namespaces: BTreeMap<String, BTreeSet<PermissionAction>>,
    /// namespace -> entity id -> override
    #[serde(default)]
    pub entities: BTreeMap<String, BTreeMap<String, EntityPermission>>,
}

impl PermissionGrants {
    pub fn superuser() -> Self {
        Self {
            superuser: true,
            ..Default::default()
        }
    }

    pub fn grant(mut self, namespace: &str, actions: &[PermissionAction]) -> Self {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .extend(actions.iter().copied());
        self
    }

    pub fn allow_entity(mut self, namespace: &str, entity_id: &str, action: PermissionAction) -> Self {
        self.entity_mut(namespace, entity_id).allow.insert(action);
        self
    }

    pub fn deny_entity(mut self, namespace: &str, entity_id: &str, action: PermissionAction) -> Self {
        self.entity_mut(namespace, entity_id).deny.insert(action);
        self
    }

    fn entity_mut(&mut self, namespace: &str, entity_id: &str) -> &mut EntityPermission {
        self.entities
            .entry(namespace.to_string())
            .or_default()
            .entry(entity_id.to_string())
            .or_default()
    }
}

impl PermissionOracle for PermissionGrants {
    fn can(&self, namespace: &str, action: PermissionAction, entity_id: Option<&str>) -> bool {
        if self.superuser {
            return true;
        }

        if let Some(id) = entity_id {
            let entry = self.entities.get(namespace).and_then(|m| m.get(id));
            if let Some(entry) = entry {
                if entry.deny.contains(&action) {
                    return false;
                }
                if entry.allow.contains(&action) {
                    return true;
                }
            }
        }

        self.namespaces
            .get(namespace)
            .map(|actions| actions.contains(&action))
            .unwrap_or(false)
    }
}

/// Composable permission check.
///
/// `And` of nothing is true, `Or` of nothing is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PermissionExpr {
    Leaf {
        namespace: String,
        action: PermissionAction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entity_id: Option<String>,
    },
    And {
        all: Vec<PermissionExpr>,
    },
    Or {
        any: Vec<PermissionExpr>,
    },
    Not {
        expr: Box<PermissionExpr>,
    },
}

impl PermissionExpr {
    pub fn leaf(namespace: impl Into<String>, action: PermissionAction) -> Self {
        PermissionExpr::Leaf {
            namespace: namespace.into(),
            action,
            entity_id: None,
        }
    }

    pub fn leaf_for(
        namespace: impl Into<String>,
        action: PermissionAction,
        entity_id: impl Into<String>,
    ) -> Self {
        PermissionExpr::Leaf {
            namespace: namespace.into(),
            action,
            entity_id: Some(entity_id.into()),
        }
    }

    pub fn all(exprs: impl IntoIterator<Item = PermissionExpr>) -> Self {
        PermissionExpr::And {
            all: exprs.into_iter().collect(),
        }
    }

    pub fn any(exprs: impl IntoIterator<Item = PermissionExpr>) -> Self {
        PermissionExpr::Or {
            any: exprs.into_iter().collect(),
        }
    }

    pub fn negate(expr: PermissionExpr) -> Self {
        PermissionExpr::Not {
            expr: Box::new(expr),
        }
    }

    pub fn evaluate(&self, oracle: &dyn PermissionOracle) -> bool {
        match self {
            PermissionExpr::Leaf {
                namespace,
                action,
                entity_id,
            } => oracle.can(namespace, *action, entity_id.as_deref()),
            PermissionExpr::And { all } => all.iter().all(|e| e.evaluate(oracle)),
            PermissionExpr::Or { any } => any.iter().any(|e| e.evaluate(oracle)),
            PermissionExpr::Not { expr } => !expr.evaluate(oracle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PermissionAction::*;
    use super::*;

    fn agent_grants() -> PermissionGrants {
        PermissionGrants::default()
            .grant("properties", &[Read, Update])
            .grant("users", &[Read])
            .deny_entity("properties", "42", Update)
            .allow_entity("users", "7", Update)
    }

    #[test]
    fn test_namespace_grant() {
        let grants = agent_grants();
        assert!(grants.can("properties", Read, None));
        assert!(grants.can("properties", Update, None));
        assert!(!grants.can("properties", Delete, None));
        assert!(!grants.can("posts", Read, None));
    }

    #[test]
    fn test_entity_override_wins() {
        let grants = agent_grants();
        assert!(!grants.can("properties", Update, Some("42")));
        assert!(grants.can("properties", Update, Some("43")));
        assert!(grants.can("users", Update, Some("7")));
        assert!(!grants.can("users", Update, Some("8")));
    }

    #[test]
    fn test_superuser_can_everything() {
        let grants = PermissionGrants::superuser();
        assert!(grants.can("anything", Delete, Some("1")));
    }

    #[test]
    fn test_expression_evaluation() {
        let grants = agent_grants();
        let edit_or_delete = PermissionExpr::any([
            PermissionExpr::leaf("properties", Update),
            PermissionExpr::leaf("properties", Delete),
        ]);
        assert!(edit_or_delete.evaluate(&grants));

        let both = PermissionExpr::all([
            PermissionExpr::leaf("properties", Update),
            PermissionExpr::leaf("properties", Delete),
        ]);
        assert!(!both.evaluate(&grants));

        let read_only = PermissionExpr::all([
            PermissionExpr::leaf("users", Read),
            PermissionExpr::negate(PermissionExpr::leaf("users", Update)),
        ]);
        assert!(read_only.evaluate(&grants));

        let locked = PermissionExpr::leaf_for("properties", Update, "42");
        assert!(!locked.evaluate(&grants));
    }

    #[test]
    fn test_empty_combinators() {
        let grants = PermissionGrants::default();
        assert!(PermissionExpr::all([]).evaluate(&grants));
        assert!(!PermissionExpr::any([]).evaluate(&grants));
    }

    #[test]
    fn test_grants_wire_shape() {
        let json = r#"{
            "namespaces": {"posts": ["READ", "CREATE"]},
            "entities": {"posts": {"3": {"deny": ["READ"]}}}
        }"#;
        let grants: PermissionGrants = serde_json::from_str(json).unwrap();
        assert!(!grants.superuser);
        assert!(grants.can("posts", Create, None));
        assert!(!grants.can("posts", Read, Some("3")));
    }
}
