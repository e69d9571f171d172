//! Error severity classification shared across menukit crates.

use std::fmt;

/// Severity levels for error classification
///
/// - **Warning**: something looks off but the operation completed.
/// - **Error**: one invocation failed; the menu and its servers keep running.
/// - **Critical**: the menu cannot be exposed at all (for example a missing handler).
///
/// ```rust
/// use menukit_common::ErrorSeverity;
///
/// assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
/// assert_eq!(ErrorSeverity::Error.to_string(), "error");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,
    /// A single invocation failed, the system continues
    Error,
    /// Setup failed, nothing can be served
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Trait for error types that have severity levels
///
/// Every error enum in the workspace implements this so adapters can pick a
/// log level and an exit code without matching on concrete variants.
///
/// ```rust
/// use menukit_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     Broken,
///     Odd,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::Broken => ErrorSeverity::Critical,
///             MyError::Odd => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::Broken.severity(), ErrorSeverity::Critical);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;

    /// Whether the failure is limited to a single request
    fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }
}
