//! # menukit common
//!
//! Foundational pieces shared by every menukit crate: error severity
//! classification, the `Pretty` log wrapper and tracing subscriber setup.

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::{init_tracing, LogTarget, Pretty};
