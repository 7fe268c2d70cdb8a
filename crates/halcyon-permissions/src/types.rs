//! Permission rule types

use serde::{Deserialize, Serialize};

/// Outcome of a permission lookup. `Unknown` means no rule exists for the
/// (origin, type) pair, which callers treat as "use the default behavior".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionAction {
    Unknown,
    Allow,
    Deny,
}

/// A stored permission rule.
///
/// `origin` is the absolute URL of the principal the rule is keyed to.
/// `ptype` is the permission type string, e.g. `"cookie"`,
/// `"trackingprotection"`, or `"3rdPartyStorage^https://tracker.example"`
/// (optionally suffixed with `^<partition>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub origin: String,
    pub ptype: String,
    pub action: PermissionAction,
}

impl Permission {
    pub fn new(
        origin: impl Into<String>,
        ptype: impl Into<String>,
        action: PermissionAction,
    ) -> Self {
        Self {
            origin: origin.into(),
            ptype: ptype.into(),
            action,
        }
    }
}
