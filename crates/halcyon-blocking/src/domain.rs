//! Registrable base-domain resolution
//!
//! First/third-party classification compares registrable domains
//! (public-suffix aware: `sub.example.co.uk` -> `example.co.uk`), not raw
//! hosts. Hosts that cannot have a registrable domain — bare IP addresses,
//! single labels, public suffixes themselves — fail with the two error kinds
//! the classifier knows how to absorb.

use url::{Host, Url};

use crate::error::DomainError;

/// Registrable base domain of the URL's host.
pub fn base_domain(url: &Url) -> std::result::Result<String, DomainError> {
    match url.host() {
        None => Err(DomainError::NoHost),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Err(DomainError::HostIsIpAddress),
        Some(Host::Domain(host)) => psl::domain_str(host)
            .map(str::to_owned)
            .ok_or(DomainError::InsufficientDomainLevels),
    }
}

/// Whether `root` is `host` itself or a parent domain of it, on a label
/// boundary (`tracker.com` is a root domain of `sub.tracker.com`, but not
/// of `nottracker.com`).
pub fn has_root_domain(host: &str, root: &str) -> bool {
    if host == root {
        return true;
    }
    host.len() > root.len()
        && host.ends_with(root)
        && host.as_bytes()[host.len() - root.len() - 1] == b'.'
}
