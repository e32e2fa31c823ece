//! The capability interface implemented by cancelable tasks.

/// A potentially lengthy task — or a handle associated to one or more tasks —
/// that can be asked to stop.
///
/// Calling [`cancel`](Cancelable::cancel) *may eventually* cancel the
/// associated tasks. Due to the inherently asynchronous nature of cancelling
/// a task there is no guarantee that the cancelable becomes "cancelled"
/// immediately, or even at all — it may still fail or succeed afterwards.
///
/// Implementations must be idempotent (a second `cancel` is a no-op if the
/// task is already finished or already cancelling) and must return
/// immediately rather than wait for the task to actually stop.
pub trait Cancelable: Send + Sync {
    /// Requests a cancellation for the associated task or tasks.
    fn cancel(&self);
}
