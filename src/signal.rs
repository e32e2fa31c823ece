//! The one-shot completion state machine shared between a request and its tokens.
//!
//! A [`Signal`] starts out `Pending` and transitions to `Completed` exactly
//! once; the first writer wins and every later [`complete`](Signal::complete)
//! call is a silent no-op. Handlers registered while pending are queued and
//! flushed on completion; handlers registered afterwards are scheduled
//! immediately. Either way a handler runs exactly once, with the final value,
//! on its registered [`Executor`] — never inline with the registering or
//! completing call.

use crate::executor::Executor;
use tracing::trace;

/// A completion handler, boxed for storage in the waiter list.
pub(crate) type Handler = Box<dyn FnOnce(bool) + Send>;

struct Waiter {
    handler: Handler,
    executor: Executor,
}

/// Shared pending/completed state for a single boolean outcome.
///
/// `true` means "cancelled", `false` means "not cancelled".
pub(crate) struct Signal {
    state: spin::Mutex<State>,
}

enum State {
    Pending(Vec<Waiter>),
    Completed(bool),
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            state: spin::Mutex::new(State::Pending(Vec::new())),
        }
    }

    /// Non-blocking read: the completed value, or `false` while pending.
    pub(crate) fn is_cancelled(&self) -> bool {
        match &*self.state.lock() {
            State::Completed(cancelled) => *cancelled,
            State::Pending(_) => false,
        }
    }

    /// Non-blocking read of the pending/completed status.
    pub(crate) fn is_completed(&self) -> bool {
        matches!(&*self.state.lock(), State::Completed(_))
    }

    /// Transitions to `Completed(cancelled)` and releases all queued handlers.
    ///
    /// First writer wins; concurrent and late callers are silent no-ops. The
    /// critical section only swaps the waiter list out — handler bodies are
    /// spawned onto their executors after the guard is released, so a handler
    /// may safely re-enter this signal or complete a related one, and a slow
    /// handler never blocks the completer.
    pub(crate) fn complete(&self, cancelled: bool) {
        let waiters = {
            let mut state = self.state.lock();
            match &mut *state {
                State::Completed(_) => return,
                State::Pending(waiters) => {
                    let waiters = core::mem::take(waiters);
                    *state = State::Completed(cancelled);
                    waiters
                }
            }
        };

        trace!(cancelled, handlers = waiters.len(), "signal completed");

        for waiter in waiters {
            let handler = waiter.handler;
            waiter.executor.spawn(move || handler(cancelled));
        }
    }

    /// Registers `handler` to run exactly once with the final value.
    ///
    /// If the signal is already completed the handler is scheduled on
    /// `executor` right away; it is never invoked inline with this call.
    /// Racing against [`complete`](Signal::complete) is safe: the lock makes
    /// the pending/completed decision atomic, so the handler either lands in
    /// the waiter list that completion flushes, or observes the completed
    /// value — it cannot be lost or run twice.
    pub(crate) fn on_complete(&self, executor: Executor, handler: Handler) {
        let cancelled = {
            let mut state = self.state.lock();
            match &mut *state {
                State::Pending(waiters) => {
                    waiters.push(Waiter { handler, executor });
                    return;
                }
                State::Completed(cancelled) => *cancelled,
            }
        };

        executor.spawn(move || handler(cancelled));
    }
}

impl Drop for Signal {
    fn drop(&mut self) {
        // The owning request completes its signal on drop, and a derived
        // signal stays alive through its parent's waiter list until the
        // parent completes, so a signal cannot drop with handlers queued.
        if let State::Pending(waiters) = self.state.get_mut() {
            debug_assert!(
                waiters.is_empty(),
                "signal dropped with registered handlers"
            );
        }
    }
}
