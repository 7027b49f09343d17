//! Severity filtering

use super::log_level::{Level, Priority};

/// Decide whether a message at `level` passes a `threshold`
///
/// Messages without a level always pass. Registered levels pass when their
/// priority is at least the threshold; ad-hoc labels are compared at the
/// default (INFO) priority.
#[inline]
pub fn should_emit(level: Option<&Level>, threshold: Priority) -> bool {
    match level {
        None => true,
        Some(level) => level.priority() >= threshold,
    }
}
