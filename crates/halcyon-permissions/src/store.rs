//! Permission store trait and in-memory implementation
//!
//! The store is shared, externally owned, mutable state. Mutations from other
//! browser activity can interleave with reads; there is no transaction, so
//! interleaved writes are last-write-wins.

use parking_lot::RwLock;
use url::Url;

use crate::types::{Permission, PermissionAction};

/// Lookup and mutation interface over the browser's permission rules.
///
/// Rules are matched by the host of their keyed origin. `test` additionally
/// walks parent domains (a rule stored for `tracker.com` applies to
/// `sub.tracker.com`), which is how cookie exceptions are inherited downward.
pub trait PermissionStore {
    /// All rules keyed to the given origin's host.
    fn list(&self, origin: &str) -> Vec<Permission>;

    /// Snapshot of every stored rule.
    fn all(&self) -> Vec<Permission>;

    /// Look up a rule for the origin or any of its parent domains.
    /// The origin's own host is consulted first, then each parent in turn;
    /// the first match wins.
    fn test(&self, origin: &str, ptype: &str) -> PermissionAction;

    /// Look up a rule for exactly this origin's host, without inheritance.
    fn test_exact(&self, origin: &str, ptype: &str) -> PermissionAction;

    /// Insert a rule, replacing any existing rule for the same
    /// (origin, type) pair.
    fn add(&self, perm: Permission);

    /// Delete the rule matching the given rule's (origin, type) pair.
    /// Immediate and unconditional.
    fn remove(&self, perm: &Permission);
}

fn host_of(origin: &str) -> Option<String> {
    let url = Url::parse(origin).ok()?;
    url.host_str().map(str::to_owned)
}

/// In-memory permission store.
///
/// Backs tests and the embedding shell alike; the `RwLock` makes it safe to
/// share across the browser while keeping the unguarded last-write-wins
/// semantics of the real store.
#[derive(Default)]
pub struct MemoryPermissionStore {
    rules: RwLock<Vec<Permission>>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }
}

impl PermissionStore for MemoryPermissionStore {
    fn list(&self, origin: &str) -> Vec<Permission> {
        let Some(host) = host_of(origin) else {
            return Vec::new();
        };
        self.rules
            .read()
            .iter()
            .filter(|p| host_of(&p.origin).as_deref() == Some(host.as_str()))
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<Permission> {
        self.rules.read().clone()
    }

    fn test(&self, origin: &str, ptype: &str) -> PermissionAction {
        let Some(host) = host_of(origin) else {
            return PermissionAction::Unknown;
        };

        let rules = self.rules.read();
        let mut candidate = host.as_str();
        loop {
            let found = rules
                .iter()
                .find(|p| p.ptype == ptype && host_of(&p.origin).as_deref() == Some(candidate));
            if let Some(perm) = found {
                return perm.action;
            }
            match candidate.split_once('.') {
                Some((_, parent)) => candidate = parent,
                None => return PermissionAction::Unknown,
            }
        }
    }

    fn test_exact(&self, origin: &str, ptype: &str) -> PermissionAction {
        let Some(host) = host_of(origin) else {
            return PermissionAction::Unknown;
        };
        self.rules
            .read()
            .iter()
            .find(|p| p.ptype == ptype && host_of(&p.origin).as_deref() == Some(host.as_str()))
            .map(|p| p.action)
            .unwrap_or(PermissionAction::Unknown)
    }

    fn add(&self, perm: Permission) {
        tracing::debug!(origin = %perm.origin, ptype = %perm.ptype, "Adding permission rule");
        let mut rules = self.rules.write();
        if let Some(existing) = rules
            .iter_mut()
            .find(|p| p.origin == perm.origin && p.ptype == perm.ptype)
        {
            *existing = perm;
        } else {
            rules.push(perm);
        }
    }

    fn remove(&self, perm: &Permission) {
        tracing::debug!(origin = %perm.origin, ptype = %perm.ptype, "Removing permission rule");
        self.rules
            .write()
            .retain(|p| !(p.origin == perm.origin && p.ptype == perm.ptype));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_allow(origin: &str) -> Permission {
        Permission::new(origin, "cookie", PermissionAction::Allow)
    }

    #[test]
    fn test_exact_lookup() {
        let store = MemoryPermissionStore::new();
        store.add(cookie_allow("https://example.com"));

        assert_eq!(
            store.test_exact("https://example.com", "cookie"),
            PermissionAction::Allow
        );
        assert_eq!(
            store.test_exact("https://sub.example.com", "cookie"),
            PermissionAction::Unknown
        );
        assert_eq!(
            store.test_exact("https://example.com", "trackingprotection"),
            PermissionAction::Unknown
        );
    }

    #[test]
    fn test_parent_domain_inheritance() {
        let store = MemoryPermissionStore::new();
        store.add(cookie_allow("https://tracker.com"));

        // Rule for the parent applies to the subdomain, nearest match first.
        assert_eq!(
            store.test("https://sub.tracker.com", "cookie"),
            PermissionAction::Allow
        );
        store.add(Permission::new(
            "https://sub.tracker.com",
            "cookie",
            PermissionAction::Deny,
        ));
        assert_eq!(
            store.test("https://sub.tracker.com", "cookie"),
            PermissionAction::Deny
        );

        // Inheritance only runs downward.
        assert_eq!(
            store.test("https://other.com", "cookie"),
            PermissionAction::Unknown
        );
    }

    #[test]
    fn test_add_replaces_existing() {
        let store = MemoryPermissionStore::new();
        store.add(cookie_allow("https://example.com"));
        store.add(Permission::new(
            "https://example.com",
            "cookie",
            PermissionAction::Deny,
        ));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.test_exact("https://example.com", "cookie"),
            PermissionAction::Deny
        );
    }

    #[test]
    fn test_remove() {
        let store = MemoryPermissionStore::new();
        let perm = cookie_allow("https://example.com");
        store.add(perm.clone());
        store.add(cookie_allow("https://other.com"));

        store.remove(&perm);

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.test_exact("https://example.com", "cookie"),
            PermissionAction::Unknown
        );
    }

    #[test]
    fn test_list_is_scoped_to_host() {
        let store = MemoryPermissionStore::new();
        store.add(Permission::new(
            "https://example.com",
            "3rdPartyStorage^https://tracker.com",
            PermissionAction::Allow,
        ));
        store.add(cookie_allow("https://other.com"));

        let listed = store.list("https://example.com");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].ptype, "3rdPartyStorage^https://tracker.com");
    }

    #[test]
    fn test_unparseable_origin_is_unknown() {
        let store = MemoryPermissionStore::new();
        store.add(cookie_allow("https://example.com"));

        assert_eq!(store.test("not a url", "cookie"), PermissionAction::Unknown);
        assert!(store.list("not a url").is_empty());
    }
}
