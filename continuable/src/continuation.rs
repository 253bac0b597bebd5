//! The continuation value (spec §4.3, C3): a move-only handle owning either
//! a callback-accepting producer or an already-resolved result.
//! Composition (`&`/`|`/`>>`) finalises eagerly into a fresh `Callable`
//! rather than building an intermediate tree of child operands.

use continuable_core::error::Error;
use continuable_core::result::Outcome;
use continuable_core::token::Ownership;

use crate::promise::Promise;
use crate::terminal;

/// What a [`Continuation`] currently owns.
pub(crate) enum ContData<T: Send + 'static> {
    /// A move-only callable that has not yet run.
    Callable(Box<dyn FnOnce(Promise<T>) + Send>),
    /// An already-resolved outcome (the "ready continuation" fast path).
    Ready(Outcome<T>),
}

/// A move-only, single-shot handle to an asynchronous operation that will
/// eventually deliver a value tuple `T` (spec §3, §4.3).
///
/// `Continuation<T>` is `Send` (it may be handed to a [`Scheduler`] running
/// on another thread) but deliberately not `Sync` — only one owner may act
/// on it at a time, matching spec §5's "single writer" rule. Rust encodes
/// that at the type level for free: there is no interior mutability here,
/// so the absence of a manual `Sync` impl already forbids shared access.
///
/// [`Scheduler`]: continuable_core::scheduler::Scheduler
pub struct Continuation<T: Send + 'static> {
    pub(crate) data: ContData<T>,
    pub(crate) ownership: Ownership,
}

impl<T: Send + 'static> Continuation<T> {
    /// Wraps a callable of the form `(promise) -> ()` into a freshly
    /// acquired, unfrozen continuation (spec §4.3's `make_continuable`).
    pub fn make_continuable(f: impl FnOnce(Promise<T>) + Send + 'static) -> Self {
        Continuation {
            data: ContData::Callable(Box::new(f)),
            ownership: Ownership::new(),
        }
    }

    /// Builds an already-resolved continuation from a raw [`Outcome`].
    pub fn from_outcome(outcome: Outcome<T>) -> Self {
        Continuation {
            data: ContData::Ready(outcome),
            ownership: Ownership::new(),
        }
    }

    /// Builds a ready continuation carrying `value` (spec's `make_ready`).
    pub fn ready(value: T) -> Self {
        Self::from_outcome(Outcome::Value(value))
    }

    /// Builds a ready continuation carrying a failure (spec's
    /// `make_exceptional`).
    pub fn exceptional(error: Error) -> Self {
        Self::from_outcome(Outcome::Exception(error))
    }

    /// Builds a ready continuation carrying the cancellation marker (spec's
    /// `make_cancelling`).
    pub fn cancelling() -> Self {
        Self::from_outcome(Outcome::Exception(Error::cancelled()))
    }

    /// `true` iff this continuation already holds a resolved [`Outcome`]
    /// (spec §4.3's `is_ready`).
    pub fn is_ready(&self) -> bool {
        matches!(self.data, ContData::Ready(_))
    }

    /// Consumes a ready continuation, returning its [`Outcome`] (spec
    /// §4.3's `unpack`). Only valid when [`Continuation::is_ready`].
    pub fn unpack(mut self) -> Outcome<T> {
        assert!(
            self.is_ready(),
            "Continuation::unpack called on a continuation that is not ready"
        );
        self.ownership.release();
        match std::mem::replace(&mut self.data, ContData::Ready(Outcome::Empty)) {
            ContData::Ready(outcome) => outcome,
            ContData::Callable(_) => unreachable!("checked is_ready above"),
        }
    }

    /// Blocks the automatic terminal dispatch that would otherwise run when
    /// this continuation drops (spec §3 — used while a composition holds
    /// this continuation as an operand).
    pub fn freeze(&mut self) {
        self.ownership.freeze();
    }

    /// Flips the ownership bit without running anything. Asserts if called
    /// twice (spec §8 invariant 8).
    pub fn release(&mut self) {
        self.ownership.release();
    }

    /// Terminal dispatch with a default no-op callback (spec §4.3's
    /// `done`).
    pub fn done(self) {
        self.invoke(Promise::new(|_outcome| {}));
    }

    /// Drives this continuation to completion, delivering its outcome to
    /// `promise`. Used internally by the chain transform and by
    /// composition finalisers; not part of the public surface (external
    /// callers reach this only through `then`/`fail`/`next`/`done` or by
    /// composing with `&`/`|`/`>>`).
    pub(crate) fn invoke(mut self, promise: Promise<T>) {
        self.ownership.release();
        match std::mem::replace(&mut self.data, ContData::Ready(Outcome::Empty)) {
            ContData::Ready(outcome) => promise.resolve(outcome),
            ContData::Callable(f) => f(promise),
        }
    }
}

impl<T: Send + 'static> Drop for Continuation<T> {
    /// If `acquired ∧ ¬frozen`, drains via the terminal dispatcher with a
    /// no-op callback; otherwise a no-op (spec §3's destructor rule).
    fn drop(&mut self) {
        if self.ownership.is_acquired() && !self.ownership.is_frozen() {
            self.ownership.release();
            let data = std::mem::replace(&mut self.data, ContData::Ready(Outcome::Empty));
            terminal::drain(data);
        }
    }
}
