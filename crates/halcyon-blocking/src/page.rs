//! Page-level content blocking state
//!
//! While the classifier answers "which origins did what", the page-level
//! question is just "did anything get detected or blocked here, and has the
//! user excepted this site". That is an OR-reduction over the registered
//! blocker categories for the currently active state word, plus an exact
//! permission test against the page's normalized base origin.

use serde::Serialize;
use url::Url;

use halcyon_permissions::{Permission, PermissionAction, PermissionStore};

use crate::state::BlockingState;

const TRACKING_PROTECTION: &str = "trackingprotection";
const TRACKING_PROTECTION_PB: &str = "trackingprotection-pb";

/// Cookie acceptance policy, as configured by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookieBehavior {
    /// Accept all cookies.
    Accept,
    /// Reject all third-party cookies.
    RejectForeign,
    /// Reject all cookies.
    Reject,
    /// Reject third-party cookies for sites the user has not visited.
    LimitForeign,
    /// Reject cookies from known trackers.
    #[default]
    RejectTracker,
}

/// A registered per-category blocker.
///
/// `enabled` reflects the user's configuration for the category, independent
/// of what the current page triggered; the detection predicates test the
/// active state word. For cookies, the behaviors counted as enabled are the
/// ones the content-blocking preferences UI exposes, not every
/// non-accepting behavior.
pub trait Blocker {
    fn enabled(&self) -> bool;
    fn is_detected(&self, state: BlockingState) -> bool;
    fn is_blocking(&self, state: BlockingState) -> bool;
}

/// The third-party cookie blocker category.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThirdPartyCookies {
    pub behavior: CookieBehavior,
}

impl ThirdPartyCookies {
    pub fn new(behavior: CookieBehavior) -> Self {
        Self { behavior }
    }
}

impl Blocker for ThirdPartyCookies {
    fn enabled(&self) -> bool {
        matches!(
            self.behavior,
            CookieBehavior::Accept | CookieBehavior::LimitForeign
        )
    }

    fn is_detected(&self, state: BlockingState) -> bool {
        state.cookies_detected()
    }

    fn is_blocking(&self, state: BlockingState) -> bool {
        state.cookies_blocked()
    }
}

/// Aggregated page flags driving the shield icon and panel state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageStatus {
    pub any_detected: bool,
    pub any_blocking: bool,
    pub has_exception: bool,
}

fn exception_type(private: bool) -> &'static str {
    if private {
        TRACKING_PROTECTION_PB
    } else {
        TRACKING_PROTECTION
    }
}

/// Normalized `https://host[:port]` base for the page, the form protection
/// allowlist rules are keyed to. Pages without a host (about:, file:) have
/// no base; protection does not apply to them.
fn page_base(page_url: &Url) -> Option<String> {
    let host = page_url.host_str()?;
    Some(match page_url.port() {
        Some(port) => format!("https://{host}:{port}"),
        None => format!("https://{host}"),
    })
}

/// Merge the active state word across all registered blockers and check for
/// a per-site protection exception.
pub fn evaluate_page(
    state: BlockingState,
    page_url: &Url,
    store: &dyn PermissionStore,
    blockers: &[&dyn Blocker],
    private: bool,
) -> PageStatus {
    let Some(base) = page_base(page_url) else {
        return PageStatus::default();
    };

    let mut status = PageStatus::default();
    for blocker in blockers {
        status.any_detected = status.any_detected || blocker.is_detected(state);
        status.any_blocking = status.any_blocking || blocker.is_blocking(state);
    }

    // Merely allowing content we could have blocked does not count as an
    // exception; only an explicit Allow rule for this exact base does.
    status.has_exception =
        store.test_exact(&base, exception_type(private)) == PermissionAction::Allow;

    status
}

/// Put the page's site on the protection allowlist.
pub fn disable_for_page(page_url: &Url, store: &dyn PermissionStore, private: bool) {
    let Some(base) = page_base(page_url) else {
        return;
    };
    tracing::info!(site = %base, "Disabling content blocking for site");
    store.add(Permission::new(
        base,
        exception_type(private),
        PermissionAction::Allow,
    ));
}

/// Take the page's site off the protection allowlist.
pub fn enable_for_page(page_url: &Url, store: &dyn PermissionStore, private: bool) {
    let Some(base) = page_base(page_url) else {
        return;
    };
    tracing::info!(site = %base, "Re-enabling content blocking for site");
    store.remove(&Permission::new(
        base,
        exception_type(private),
        PermissionAction::Allow,
    ));
}
