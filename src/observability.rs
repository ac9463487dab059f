//! Logging infrastructure for reclog.
//!
//! reclog uses `tracing` for structured logging. All events use target
//! "reclog" and include an `event` field for filtering.
//!
//! ## Library Integration
//!
//! reclog never initializes a global subscriber. Applications configure
//! tracing via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem (e.g., "builder", "column", "chunk")
//! - Use `%` for Display, `?` for Debug formatting

/// Target for all reclog log events.
pub(crate) const RECLOG_TARGET: &str = "reclog";

/// Macro for debug-level log events.
///
/// # Example
/// ```ignore
/// log_debug!(
///     component = "column",
///     event = "batch_partitioned",
///     descriptor = %descriptor,
///     num_rows = lengths.len(),
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::RECLOG_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::RECLOG_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_warn;
