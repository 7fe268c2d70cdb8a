//! HALCYON Permission Store
//!
//! Site permission rules (cookie exceptions, per-site protection toggles,
//! third-party storage grants) live in a store owned by the surrounding
//! browser. The content-blocking layer never owns this state: it receives the
//! store as an explicit collaborator so that classification stays a pure
//! function of its inputs and can be tested against an in-memory fake.
//!
//! Rules are keyed by (origin, permission type). Cookie exceptions are
//! inherited from parent domains down to subdomains, so lookups come in two
//! flavors: `test` (with inheritance) and `test_exact` (without).

mod store;
mod types;

pub use store::{MemoryPermissionStore, PermissionStore};
pub use types::{Permission, PermissionAction};
