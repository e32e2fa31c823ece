//! The write capability that decides a cancellation outcome.

use crate::signal::Signal;
use crate::token::CancellationToken;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The owning side of a cancellation signal.
///
/// A `CancellationRequest` is a means to let a client signal one or more tasks
/// that it is no longer interested in the result and that they should stop as
/// soon as possible. It exclusively owns one signal: hand out
/// [`token`](CancellationRequest::token)s to the tasks, and call
/// [`cancel`](CancellationRequest::cancel) to commit the "cancelled" outcome.
///
/// Dropping the request without cancelling is not an error — it completes the
/// signal with "not cancelled", so every outstanding token (and any handler
/// registered on it) still observes a definite outcome and nothing waits
/// forever.
///
/// # Example
///
/// ```
/// use quell::CancellationRequest;
///
/// let request = CancellationRequest::new();
/// let token = request.token();
///
/// assert!(!token.is_cancelled());
/// request.cancel();
/// assert!(token.is_cancelled());
/// ```
pub struct CancellationRequest {
    signal: Arc<Signal>,
}

impl CancellationRequest {
    /// Creates a request with a fresh, pending signal.
    pub fn new() -> Self {
        Self {
            signal: Arc::new(Signal::new()),
        }
    }

    /// Requests a cancellation.
    ///
    /// Callable from any thread, any number of times; only the first call (by
    /// whichever caller wins the race) has an effect. Returns immediately —
    /// cancellation is asynchronous, and handlers run on their executors
    /// after this call, so the effect may not be visible to other observers
    /// the instant `cancel` returns.
    pub fn cancel(&self) {
        trace!("cancellation requested");
        self.signal.complete(true);
    }

    /// Returns `true` if a cancellation has been requested.
    pub fn is_cancellation_requested(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// Returns the associated read-only token.
    ///
    /// Cheap to call repeatedly; every token shares the same signal.
    pub fn token(&self) -> CancellationToken {
        CancellationToken::from_signal(self.signal.clone())
    }
}

impl Default for CancellationRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancellationRequest {
    fn drop(&mut self) {
        // Mandatory, not an optimization: a pending-forever signal would
        // strand every registered handler.
        self.signal.complete(false);
    }
}

impl fmt::Debug for CancellationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationRequest")
            .field(
                "cancellation_requested",
                &self.is_cancellation_requested(),
            )
            .finish()
    }
}
