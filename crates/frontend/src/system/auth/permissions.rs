//! Permission Oracle for the signed-in user.
//!
//! Grants come with `/api/system/auth/me`. Until the session is restored the
//! oracle denies everything.

use contracts::shared::permission::{PermissionAction, PermissionExpr, PermissionGrants, PermissionOracle};
use leptos::prelude::*;

use super::context::use_auth;

#[derive(Clone, Copy)]
pub struct Permissions {
    grants: Memo<PermissionGrants>,
}

impl Permissions {
    pub fn from_auth() -> Self {
        let auth = use_auth();
        let grants = Memo::new(move |_| {
            auth.with(|s| {
                s.user_info
                    .as_ref()
                    .map(|u| u.permissions.clone())
                    .unwrap_or_default()
            })
        });
        Self { grants }
    }

    /// Tracked check, re-runs reactive scopes when grants change
    pub fn can(&self, namespace: &str, action: PermissionAction, entity_id: Option<&str>) -> bool {
        self.grants.with(|g| g.can(namespace, action, entity_id))
    }

    pub fn check(&self, expr: &PermissionExpr) -> bool {
        self.grants.with(|g| expr.evaluate(g))
    }

    pub fn grants(&self) -> Memo<PermissionGrants> {
        self.grants
    }
}

pub fn provide_permissions() {
    provide_context(Permissions::from_auth());
}

pub fn use_permissions() -> Permissions {
    use_context::<Permissions>().expect("Permissions not provided in context (call provide_permissions in app root)")
}
