//! HALCYON Content Blocking
//!
//! Turns the per-page content-blocking log produced by the tracking
//! protection engine into display-ready data:
//! - per-origin classification into first-party and third-party lists, with
//!   allowed/blocked status and cookie-exception annotation
//! - page-level detected/blocking/exception flags aggregated across the
//!   registered blocker categories
//! - exception lookup and removal against the shared permission store
//!
//! Classification is a pure function of (log, page URL, permission-store
//! snapshot); the log is decoded fresh on every view and the output lives
//! only for one render.

mod classify;
mod domain;
mod error;
mod exceptions;
mod log;
mod page;
mod state;

pub use classify::{classify, Classification, ClassifiedOrigin};
pub use domain::{base_domain, has_root_domain};
pub use error::{BlockingError, DomainError};
pub use exceptions::{clear_exception, has_exception};
pub use log::{BlockingLog, BlockingLogEntry, LogEvent};
pub use page::{
    disable_for_page, enable_for_page, evaluate_page, Blocker, CookieBehavior, PageStatus,
    ThirdPartyCookies,
};
pub use state::BlockingState;

pub type Result<T> = std::result::Result<T, BlockingError>;
