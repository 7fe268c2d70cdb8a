//! Content blocking error types

use thiserror::Error;

/// Base-domain resolution failures.
///
/// `HostIsIpAddress` and `InsufficientDomainLevels` are expected for pages
/// and origins with odd hosts (bare IPs, single labels, public suffixes);
/// the classifier absorbs those by treating the affected URL as having no
/// registrable domain. Everything else is a hard error.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Host is an IP address")]
    HostIsIpAddress,

    #[error("Host has too few domain levels")]
    InsufficientDomainLevels,

    #[error("URL has no host")]
    NoHost,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl DomainError {
    /// Whether classification may degrade this failure to "no base domain"
    /// instead of aborting.
    pub fn is_absorbable(&self) -> bool {
        matches!(
            self,
            DomainError::HostIsIpAddress | DomainError::InsufficientDomainLevels
        )
    }
}

#[derive(Error, Debug)]
pub enum BlockingError {
    #[error("Domain resolution error: {0}")]
    Domain(#[from] DomainError),

    #[error("Malformed content blocking log: {0}")]
    Log(#[from] serde_json::Error),
}
