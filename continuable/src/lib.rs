#![warn(missing_docs)]
//!
//! A callback-continuation algebra.
//!
//! A [`Continuation<T>`] wraps any callback-accepting asynchronous
//! operation into a move-only, single-shot value whose eventual completion
//! carries a typed tuple `T`. Continuations chain sequentially with
//! [`Continuation::then`] / [`Continuation::fail`] / [`Continuation::next`],
//! combine structurally with `&` (all), `|` (any), and `>>` (seq), and can be
//! inspected synchronously once resolved. The `_on` variants
//! ([`Continuation::then_on`] / [`Continuation::fail_on`] /
//! [`Continuation::next_on`]) take an explicit
//! [`continuable_core::scheduler::Scheduler`] and dispatch the handler
//! through it instead of running inline on the producer's thread.
//!
//! The data model and the heterogeneous traversal engine the composition
//! strategies build on live in [`continuable_core`]; this crate is the
//! public-facing algebra built on top of it.

mod chain;
/// Composition strategies: `all` (`&`), `any` (`|`), `seq` (`>>`).
pub mod compose;
mod continuation;
#[cfg(feature = "futurize")]
mod futurize;
mod promise;
mod terminal;

pub use chain::{Completion, Next, Value};
pub use continuation::Continuation;
pub use promise::Promise;
pub use continuable_core::scheduler::{FnWork, InlineScheduler, Scheduler, ThreadScheduler, Work};

use continuable_core::error::Error;

/// Wraps a callable of the form `(promise) -> ()` into a freshly acquired
/// continuation (spec's `make_continuable`).
pub fn make_continuable<T: Send + 'static>(f: impl FnOnce(Promise<T>) + Send + 'static) -> Continuation<T> {
    Continuation::make_continuable(f)
}

/// Builds an already-resolved continuation carrying `value`.
pub fn make_ready<T: Send + 'static>(value: T) -> Continuation<T> {
    Continuation::ready(value)
}

/// Builds an already-resolved continuation carrying a failure.
pub fn make_exceptional<T: Send + 'static>(error: Error) -> Continuation<T> {
    Continuation::exceptional(error)
}

/// Builds an already-resolved continuation carrying the cancellation
/// marker.
pub fn make_cancelling<T: Send + 'static>() -> Continuation<T> {
    Continuation::cancelling()
}
