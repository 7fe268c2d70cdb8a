//! Content blocking state flags
//!
//! Each event in the content-blocking log carries a state word from the
//! platform's web-progress listener. The flag values are defined externally;
//! this module only tests bit presence. Note that a state word may carry
//! several flags at once, so the predicates check individual bits rather
//! than exact equality.

use serde::Deserialize;

/// Opaque content-blocking state bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct BlockingState(pub u32);

impl BlockingState {
    /// Cookies were loaded for the resource.
    pub const COOKIES_LOADED: u32 = 0x0000_8000;
    /// Cookies were blocked for a foreign (cross-site) context.
    pub const COOKIES_BLOCKED_FOREIGN: u32 = 0x0000_0080;
    /// Cookies were blocked because of a site permission.
    pub const COOKIES_BLOCKED_BY_PERMISSION: u32 = 0x1000_0000;
    /// All cookies were blocked.
    pub const COOKIES_BLOCKED_ALL: u32 = 0x4000_0000;

    pub fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    fn has(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    /// Whether this state signals cookie access on the page.
    pub fn cookies_detected(self) -> bool {
        self.has(Self::COOKIES_LOADED)
    }

    /// Whether this state belongs to a cookie-blocking category.
    pub fn cookies_blocked(self) -> bool {
        self.has(Self::COOKIES_BLOCKED_ALL)
            || self.has(Self::COOKIES_BLOCKED_BY_PERMISSION)
            || self.has(Self::COOKIES_BLOCKED_FOREIGN)
    }
}

impl From<u32> for BlockingState {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}
