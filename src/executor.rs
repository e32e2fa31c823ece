//! Execution contexts for completion handlers.
//!
//! Handlers registered on a token never run inline with the call that
//! registered them or with the call that completed the signal — they are
//! always spawned onto an [`Executor`]. By default that is the process-wide
//! shared context returned by [`Executor::global()`]; callers that want
//! handlers on their own runtime can wrap a [`tokio::runtime::Handle`].

use std::sync::OnceLock;
use trace_err::*;

/// Where completion handlers run.
///
/// A thin, cloneable wrapper over a [`tokio::runtime::Handle`]. Cloning is
/// cheap and both clones target the same runtime.
///
/// # Example
///
/// ```no_run
/// use quell::Executor;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// // Run handlers on the current runtime instead of the shared one.
/// let executor = Executor::from(tokio::runtime::Handle::current());
/// # let _ = executor;
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Executor {
    handle: tokio::runtime::Handle,
}

impl Executor {
    /// Creates an executor that spawns handlers onto `handle`.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Returns the process-wide shared execution context.
    ///
    /// Backed by a single-worker runtime that is started lazily on first use
    /// and lives for the rest of the process. This is the default context for
    /// [`on_complete`](crate::CancellationToken::on_complete) and
    /// [`register`](crate::CancellationToken::register).
    pub fn global() -> Self {
        static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

        let runtime = RUNTIME.get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("quell-dispatch")
                .build()
                .trace_expect("Failed to start the shared dispatch runtime")
        });
        Self {
            handle: runtime.handle().clone(),
        }
    }

    /// Runs `f` as a task on the wrapped runtime.
    pub(crate) fn spawn(&self, f: impl FnOnce() + Send + 'static) {
        self.handle.spawn(async move { f() });
    }
}

impl From<tokio::runtime::Handle> for Executor {
    fn from(handle: tokio::runtime::Handle) -> Self {
        Self::new(handle)
    }
}
