//! Cookie exception lookup and removal
//!
//! Two kinds of stored rules count as an exception for an origin:
//! `3rdPartyStorage^<origin>` grants keyed to the page's principal
//! (optionally suffixed with a `^<partition>`), and `"cookie"` rules for the
//! origin or any of its parent domains. Removal clears both kinds, including
//! the parent-domain cookie rules, mirroring the inheritance used for lookup.

use url::Url;

use halcyon_permissions::{PermissionAction, PermissionStore};

use crate::domain::has_root_domain;
use crate::error::DomainError;
use crate::Result;

fn matches_storage_key(ptype: &str, origin: &str) -> bool {
    let key = format!("3rdPartyStorage^{origin}");
    ptype == key || (ptype.starts_with(&key) && ptype[key.len()..].starts_with('^'))
}

/// Whether any stored rule overrides default blocking for this origin on
/// the given page.
pub fn has_exception(origin: &str, page_url: &Url, store: &dyn PermissionStore) -> bool {
    let page_origin = page_url.origin().ascii_serialization();
    if store
        .list(&page_origin)
        .iter()
        .any(|perm| matches_storage_key(&perm.ptype, origin))
    {
        return true;
    }

    // Cookie exceptions are inherited from parent to subdomain, so the exact
    // origin's rule alone is not enough to decide.
    store.test(origin, "cookie") != PermissionAction::Unknown
}

/// Remove every exception rule covering this origin. Destructive and
/// immediate; there is no confirmation or rollback.
pub fn clear_exception(origin: &str, page_url: &Url, store: &dyn PermissionStore) -> Result<()> {
    tracing::debug!(%origin, "Clearing cookie exceptions");

    let page_origin = page_url.origin().ascii_serialization();
    for perm in store.list(&page_origin) {
        if matches_storage_key(&perm.ptype, origin) {
            store.remove(&perm);
        }
    }

    let url = Url::parse(origin).map_err(DomainError::from)?;
    let host = url.host_str().ok_or(DomainError::NoHost)?.to_owned();

    // Parent-domain cookie rules apply to this origin too, so they get
    // cleared together with the exact rule.
    for perm in store.all() {
        if perm.ptype != "cookie" {
            continue;
        }
        let perm_host = Url::parse(&perm.origin)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned));
        if let Some(perm_host) = perm_host {
            if has_root_domain(&host, &perm_host) {
                store.remove(&perm);
            }
        }
    }

    Ok(())
}
