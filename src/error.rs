//! The canonical "operation cancelled" error.

use std::borrow::Cow;
use thiserror::Error;

const DEFAULT_MESSAGE: &str = "operation cancelled";

/// The error a task reports to *its* callers when it stops because a
/// cancellation was requested.
///
/// Two default-constructed values compare equal; values with differing
/// messages compare unequal. Use [`matches`](CancellationError::matches) to
/// compare against an arbitrary error object — an unrelated error type never
/// compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CancellationError {
    message: Cow<'static, str>,
}

impl CancellationError {
    /// Creates the error with the default message.
    pub const fn new() -> Self {
        Self {
            message: Cow::Borrowed(DEFAULT_MESSAGE),
        }
    }

    /// Creates the error with a custom human-readable message.
    pub fn with_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Compares against any error object.
    ///
    /// `true` iff `error` is a `CancellationError` equal to `self`; an
    /// unrelated error type is never equal. Never panics.
    pub fn matches(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        error
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }
}

impl Default for CancellationError {
    fn default() -> Self {
        Self::new()
    }
}
