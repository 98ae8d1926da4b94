//! Generic error handling utilities
//!
//! Lets the binary report any module's error with the right level of detail:
//! configuration mistakes the user can fix are shown verbatim, everything
//! else is summarised with the full error kept at debug level.

/// Errors that can tell user-actionable failures from system failures
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// True if the message should be shown to the user as-is
    fn is_user_actionable(&self) -> bool;

    /// The specific user message for an actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// # Arguments
/// * `error` - The error to report
/// * `operation_context` - Human-readable description of the operation that failed
///
/// # Examples
/// ```rust,no_run
/// # use blockqueue::core::error_handling::log_error_with_context;
/// # use blockqueue::queue::QueueError;
/// let err = QueueError::InvalidCapacity { capacity: 0 };
/// log_error_with_context(&err, "Queue construction");
/// // Logs: "FATAL: Queue capacity must be greater than 0"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", fatal_message(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// The primary line shown for `error`
pub fn fatal_message<'a, E: ContextualError>(error: &'a E, operation_context: &'a str) -> &'a str {
    if error.is_user_actionable() {
        error.user_message().unwrap_or(operation_context)
    } else {
        operation_context
    }
}
