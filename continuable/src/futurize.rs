//! The `futurize` adapter (spec §4.3's `c.futurize()`), feature-gated since
//! it is the one bundled transport-level collaborator spec.md's scope
//! explicitly allows (§1: "the one bundled `futurize` adapter").
//!
//! Bridges a `Continuation<T>` onto a `futures::channel::oneshot` pair, the
//! standard ecosystem pattern for adapting a single-shot callback into an
//! awaitable `Future` (none of the corpus repos needed this bridge
//! themselves; `futures::channel::oneshot` is the canonical vehicle for it).

use continuable_core::error::Error;
use continuable_core::result::Outcome;
use futures::channel::oneshot;
use futures::FutureExt;
use std::future::Future;

use crate::continuation::Continuation;
use crate::promise::Promise;

impl<T: Send + 'static> Continuation<T> {
    /// Hands `self` off to an external awaitable collaborator (spec §4.3).
    /// Consumes the continuation exactly once; if the sender is dropped
    /// without delivering (the continuation's producer panicked or was
    /// otherwise abandoned), the returned future resolves to a cancellation.
    pub fn futurize(self) -> impl Future<Output = Outcome<T>> {
        let (tx, rx) = oneshot::channel();
        self.invoke(Promise::new(move |outcome: Outcome<T>| {
            let _ = tx.send(outcome);
        }));
        rx.map(|result| result.unwrap_or_else(|_| Outcome::Exception(Error::cancelled())))
    }
}
