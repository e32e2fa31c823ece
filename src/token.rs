//! The read-only capability over a cancellation signal.
//!
//! A [`CancellationToken`] is handed to a task when it is created and lets the
//! task find out whether the client is still interested in the result. The
//! task may poll ([`is_cancelled`](CancellationToken::is_cancelled)),
//! subscribe ([`on_complete`](CancellationToken::on_complete),
//! [`on_cancel`](CancellationToken::on_cancel)), derive new tokens
//! ([`map`](CancellationToken::map), [`flat_map`](CancellationToken::flat_map))
//! or wire the outcome straight into a [`Cancelable`] via
//! [`register`](CancellationToken::register).
//!
//! Cancellation is cooperative: a "cancelled" outcome only signals intent, and
//! a task is only actually stopped once it observes the signal and chooses to
//! stop. A task may also decide *not* to stop, for example when other clients
//! are still waiting for the result. One token may be shared by many
//! observers.

use crate::cancelable::Cancelable;
use crate::executor::Executor;
use crate::signal::Signal;
use std::fmt;
use std::sync::Arc;

/// A read-only view over a one-shot cancellation outcome.
///
/// Tokens start out incomplete and are completed exactly once by their
/// associated [`CancellationRequest`](crate::CancellationRequest) — either
/// with `true` ("cancelled") when the client calls
/// [`cancel`](crate::CancellationRequest::cancel), or with `false` ("not
/// cancelled") when the request is dropped. Clones share the same underlying
/// signal.
///
/// The special token returned by [`CancellationToken::none()`] can never be
/// cancelled and is meant as the default at call sites that accept an
/// optional cancellation source.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    Shared(Arc<Signal>),
    None,
}

impl CancellationToken {
    pub(crate) fn from_signal(signal: Arc<Signal>) -> Self {
        Self {
            inner: Inner::Shared(signal),
        }
    }

    /// Returns a token that can never be cancelled.
    ///
    /// It reports `is_cancelled() == false` and `is_completed() == true`,
    /// schedules [`on_complete`](CancellationToken::on_complete) handlers with
    /// `false`, and turns [`register`](CancellationToken::register) into a
    /// pure no-op.
    pub fn none() -> Self {
        Self { inner: Inner::None }
    }

    /// Returns `true` if the associated request has asked for cancellation.
    ///
    /// Never blocks; an incomplete token reads as not cancelled.
    pub fn is_cancelled(&self) -> bool {
        match &self.inner {
            Inner::Shared(signal) => signal.is_cancelled(),
            Inner::None => false,
        }
    }

    /// Returns `true` once the outcome has been decided, either way.
    ///
    /// A token completes when a cancellation is requested, when the owning
    /// request is dropped, or when it is inherently immutable (the token from
    /// [`CancellationToken::none()`]).
    pub fn is_completed(&self) -> bool {
        match &self.inner {
            Inner::Shared(signal) => signal.is_completed(),
            Inner::None => true,
        }
    }

    /// Registers a handler to run exactly once with the final outcome.
    ///
    /// The handler runs on the process-wide shared [`Executor`], whether the
    /// token is still pending or already completed — never inline with this
    /// call.
    pub fn on_complete(&self, handler: impl FnOnce(bool) + Send + 'static) {
        self.on_complete_on(Executor::global(), handler);
    }

    /// Like [`on_complete`](CancellationToken::on_complete), but the handler
    /// runs on the given executor.
    pub fn on_complete_on(&self, executor: Executor, handler: impl FnOnce(bool) + Send + 'static) {
        match &self.inner {
            Inner::Shared(signal) => signal.on_complete(executor, Box::new(handler)),
            Inner::None => executor.spawn(move || handler(false)),
        }
    }

    /// Registers a handler that runs only if the outcome is "cancelled".
    ///
    /// If the token completes with `false` the handler is simply never
    /// invoked.
    pub fn on_cancel(&self, handler: impl FnOnce() + Send + 'static) {
        self.on_complete(move |cancelled| {
            if cancelled {
                handler();
            }
        });
    }

    /// Returns a derived token that completes with `transform()` if this
    /// token is cancelled, and with `false` otherwise.
    ///
    /// `transform` is evaluated at most once, and only on the cancelled path.
    /// The derived token owns an independent signal; it observes this token
    /// purely through a completion subscription.
    pub fn map(&self, transform: impl FnOnce() -> bool + Send + 'static) -> CancellationToken {
        match &self.inner {
            Inner::None => Self::none(),
            Inner::Shared(_) => {
                let signal = Arc::new(Signal::new());
                let derived = signal.clone();
                self.on_complete(move |cancelled| {
                    derived.complete(if cancelled { transform() } else { false });
                });
                Self::from_signal(signal)
            }
        }
    }

    /// Returns a derived token that, if this token is cancelled, defers to the
    /// token produced by `transform` and copies its eventual outcome.
    ///
    /// If this token completes "not cancelled", the derived token completes
    /// `false` immediately and `transform` is never invoked.
    pub fn flat_map(
        &self,
        transform: impl FnOnce() -> CancellationToken + Send + 'static,
    ) -> CancellationToken {
        match &self.inner {
            Inner::None => Self::none(),
            Inner::Shared(_) => {
                let signal = Arc::new(Signal::new());
                let derived = signal.clone();
                self.on_complete(move |cancelled| {
                    if cancelled {
                        transform().on_complete(move |cancelled| derived.complete(cancelled));
                    } else {
                        derived.complete(false);
                    }
                });
                Self::from_signal(signal)
            }
        }
    }

    /// Arranges for `cancelable.cancel()` to be called on the process-wide
    /// shared [`Executor`] if this token is cancelled.
    ///
    /// Only a weak reference is kept: the registration never extends the
    /// cancelable's lifetime, and if the capability is gone by the time the
    /// outcome fires, nothing is invoked.
    pub fn register<C>(&self, cancelable: &Arc<C>)
    where
        C: Cancelable + ?Sized + 'static,
    {
        self.register_on(Executor::global(), cancelable);
    }

    /// Like [`register`](CancellationToken::register), but `cancel()` is
    /// invoked on the given executor.
    pub fn register_on<C>(&self, executor: Executor, cancelable: &Arc<C>)
    where
        C: Cancelable + ?Sized + 'static,
    {
        if let Inner::None = self.inner {
            return;
        }
        let cancelable = Arc::downgrade(cancelable);
        self.on_complete_on(executor, move |cancelled| {
            if !cancelled {
                return;
            }
            if let Some(cancelable) = cancelable.upgrade() {
                cancelable.cancel();
            }
        });
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Shared(signal) => f
                .debug_struct("CancellationToken")
                .field("completed", &signal.is_completed())
                .field("cancelled", &signal.is_cancelled())
                .finish(),
            Inner::None => f.write_str("CancellationToken::none"),
        }
    }
}
