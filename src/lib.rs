//! Cooperative one-shot cancellation primitives.
//!
//! This crate lets one party — the client issuing work — signal, once and
//! exactly once, that one or more long-running tasks should stop, without
//! knowing how many tasks are listening or when they will notice.
//!
//! - **[`CancellationRequest`]**: the write capability. Owns the signal,
//!   commits the outcome via [`cancel`](CancellationRequest::cancel), and
//!   resolves it to "not cancelled" when dropped.
//! - **[`CancellationToken`]**: the read capability handed to tasks. Poll it,
//!   subscribe completion/cancel handlers, derive new tokens with
//!   [`map`](CancellationToken::map)/[`flat_map`](CancellationToken::flat_map),
//!   or combine tokens with [`or`]/[`and`] (also available as `|` and `&`).
//! - **[`Cancelable`]**: the capability a task implements so a token can
//!   drive it directly via [`register`](CancellationToken::register), held
//!   weakly so the registration never extends the task's lifetime.
//! - **[`CancellationError`]**: the canonical error a task reports to its own
//!   callers after stopping due to cancellation.
//!
//! Completion handlers always run asynchronously on an [`Executor`] — by
//! default a process-wide shared one — never inline with the registering or
//! cancelling call.
//!
//! Cancellation is purely cooperative: there is no preemption and no timeout.
//! A "cancelled" task is only actually stopped once it observes the signal,
//! by polling or through a handler, and chooses to stop.
//!
//! # Example
//!
//! ```
//! use quell::CancellationRequest;
//!
//! let request = CancellationRequest::new();
//! let token = request.token();
//!
//! // Hand `token` (or clones of it) to the tasks...
//! assert!(!token.is_cancelled());
//!
//! // ...and later decide the tasks should stop.
//! request.cancel();
//! assert!(token.is_cancelled());
//! ```

pub mod cancelable;
pub mod combinators;
pub mod error;
pub mod executor;
pub mod request;
mod signal;
pub mod token;

// Re-export commonly used types at crate root
pub use cancelable::Cancelable;
pub use combinators::{and, or};
pub use error::CancellationError;
pub use executor::Executor;
pub use request::CancellationRequest;
pub use token::CancellationToken;
