//! Content blocking log classification
//!
//! Transforms the raw per-origin event log into the two lists the cookies
//! subview renders: first-party and third-party origins with cookie
//! activity, each annotated with its allowed/blocked outcome and whether a
//! stored exception covers it.

use serde::Serialize;
use url::Url;

use halcyon_permissions::PermissionStore;

use crate::domain::base_domain;
use crate::error::DomainError;
use crate::exceptions::has_exception;
use crate::log::BlockingLog;
use crate::Result;

/// One origin's classification. Derived on every view, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedOrigin {
    pub origin: String,
    pub is_allowed: bool,
    pub has_exception: bool,
}

/// Classifier output. Within each list, origins keep the order they have in
/// the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub first_party: Vec<ClassifiedOrigin>,
    pub third_party: Vec<ClassifiedOrigin>,
}

/// Absorb the two expected resolver failures into "no registrable domain";
/// anything else aborts classification.
fn registrable_domain(url: &Url) -> Result<Option<String>> {
    match base_domain(url) {
        Ok(domain) => Ok(Some(domain)),
        Err(err) if err.is_absorbable() => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Classify the content-blocking log against the page's top-level URL.
///
/// Pure function of (log, page URL, permission-store snapshot): it reads the
/// store but never mutates anything. Origins without any detected cookie
/// activity are dropped; non-HTTP(S) pseudo-origins in the log are skipped.
pub fn classify(
    log: &BlockingLog,
    page_url: &Url,
    store: &dyn PermissionStore,
) -> Result<Classification> {
    // Pages whose host is an IP address or a bare label have no first-party
    // domain; every origin then classifies as third-party.
    let first_party_domain = registrable_domain(page_url)?;

    let mut result = Classification::default();

    for entry in log.iter() {
        if !entry.origin.starts_with("http") {
            continue;
        }

        let mut is_allowed = true;
        let mut has_cookie = false;

        // Left-fold over the ordered events. A state word may carry several
        // flags, so both predicates run on every event. For blocking-category
        // events the last one wins: `was_blocked` tells us whether the
        // resource was actually blocked, which it may not have been in case
        // of an exception.
        for event in &entry.events {
            if event.state.cookies_detected() {
                has_cookie = true;
            }
            if event.state.cookies_blocked() {
                is_allowed = !event.was_blocked;
            }
        }

        // No detected cookie activity means nothing to show.
        if !has_cookie {
            continue;
        }

        let origin_url = Url::parse(&entry.origin).map_err(DomainError::from)?;
        let origin_domain = registrable_domain(&origin_url)?;

        let is_first_party = match (&first_party_domain, &origin_domain) {
            (Some(page), Some(origin)) => page == origin,
            _ => false,
        };

        let record = ClassifiedOrigin {
            origin: entry.origin.clone(),
            is_allowed,
            has_exception: has_exception(&entry.origin, page_url, store),
        };

        if is_first_party {
            result.first_party.push(record);
        } else {
            result.third_party.push(record);
        }
    }

    tracing::debug!(
        first_party = result.first_party.len(),
        third_party = result.third_party.len(),
        "Classified content blocking log"
    );

    Ok(result)
}
