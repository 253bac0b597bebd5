//! The chain transform (spec §4.4, C4): given a continuation and a
//! handler, builds a new continuation whose signature is derived from the
//! handler's return type.
//!
//! Partial invoke (spec §4.4: "drop trailing arguments and retry until
//! callable") has no stable-Rust realization without negative reasoning —
//! instead, a handler here always receives the upstream's *whole* value
//! tuple as one argument, and ignores the parts it doesn't want with `_` in
//! its pattern, e.g. `.then(|(a, _b, _c)| a)`. This is the idiomatic Rust
//! substitute: tuple-pattern closure parameters already give positional,
//! trailing-ignorable destructuring for free.

use std::sync::{Arc, Mutex};

use continuable_core::error::Error;
use continuable_core::result::{CancellationResult, EmptyResult, ExceptionalResult, Outcome};
use continuable_core::scheduler::{FnWork, Scheduler};

use crate::continuation::Continuation;
use crate::promise::Promise;

/// Wraps a plain (non-tuple) return value so the chain transform can tell
/// it apart from a tuple return. Spec §4.4's "`T` (plain) -> next signature
/// `⟨T⟩`" rule would be ambiguous in Rust without this: a bare `(A, B)`
/// returned from a handler is *already* a 2-tuple, and nothing short of an
/// explicit wrapper distinguishes "this is my one value" from "this is my
/// two values" when both are spelled as ordinary Rust types.
pub struct Value<T>(pub T);

/// The classified next step of a chain (spec §4.4's decoration table,
/// collapsed into one closed sum since Rust dispatches on it with `match`
/// rather than template recursion).
pub enum Next<T: Send + 'static> {
    /// Forward `T` downstream.
    Value(T),
    /// Abort the chain: no further invocation on either path.
    Empty,
    /// Route an error downstream.
    Exception(Error),
    /// Attach the downstream as this continuation's callback.
    Continuation(Continuation<T>),
}

impl<T: Send + 'static> From<Outcome<T>> for Next<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Empty => Next::Empty,
            Outcome::Value(value) => Next::Value(value),
            Outcome::Exception(error) => Next::Exception(error),
        }
    }
}

impl<T: Send + 'static> From<EmptyResult> for Next<T> {
    fn from(_: EmptyResult) -> Self {
        Next::Empty
    }
}

impl<T: Send + 'static> From<CancellationResult> for Next<T> {
    fn from(_: CancellationResult) -> Self {
        Next::Exception(Error::cancelled())
    }
}

impl<T: Send + 'static> From<ExceptionalResult> for Next<T> {
    fn from(marker: ExceptionalResult) -> Self {
        Next::Exception(marker.0)
    }
}

impl<T: Send + 'static> From<Continuation<T>> for Next<T> {
    fn from(continuation: Continuation<T>) -> Self {
        Next::Continuation(continuation)
    }
}

impl<T: Send + 'static> From<Value<T>> for Next<(T,)> {
    fn from(value: Value<T>) -> Self {
        Next::Value((value.0,))
    }
}

macro_rules! impl_next_from_tuple {
    ($($name:ident),*) => {
        impl<$($name: Send + 'static),*> From<($($name,)*)> for Next<($($name,)*)> {
            fn from(tuple: ($($name,)*)) -> Self {
                Next::Value(tuple)
            }
        }
    };
}

impl_next_from_tuple!();
impl_next_from_tuple!(A);
impl_next_from_tuple!(A, B);
impl_next_from_tuple!(A, B, C);
impl_next_from_tuple!(A, B, C, D);
impl_next_from_tuple!(A, B, C, D, E);
impl_next_from_tuple!(A, B, C, D, E, F);
impl_next_from_tuple!(A, B, C, D, E, F, G);
impl_next_from_tuple!(A, B, C, D, E, F, G, H);

/// Both halves of a completed continuation, observed together by `next`'s
/// combined handler (spec §4.3's `next`, "dispatch by overload on the
/// leading `exception_tag`" — realized here as an ordinary two-variant
/// enum instead, since Rust has no overload resolution to dispatch on).
pub enum Completion<T: Send + 'static> {
    Value(T),
    Exception(Error),
}

fn dispatch_next<Out: Send + 'static>(next: Next<Out>, promise: Promise<Out>) {
    match next {
        Next::Value(value) => promise.set_value(value),
        Next::Empty => log::trace!("chain step aborted (empty result); no downstream invocation"),
        Next::Exception(error) => promise.set_exception(error),
        Next::Continuation(inner) => inner.invoke(promise),
    }
}

/// Boxes `run` (the classified handler invocation) as a [`Work`](continuable_core::scheduler::Work)
/// and hands it to `scheduler` (spec §4.4, "Executor coupling").
///
/// `promise` is shared behind an `Arc<Mutex<Option<_>>>` rather than moved
/// directly into the `Work`'s `on_value` closure: a scheduler may instead
/// call `set_exception`/`set_canceled` to bypass `run` entirely (e.g. during
/// shutdown), and `Work`'s two entry points are alternatives on the same
/// boxed object, not a pair of calls on a `Clone`-able handle.
fn dispatch_via_scheduler<Out, S, F>(scheduler: &S, promise: Promise<Out>, run: F)
where
    Out: Send + 'static,
    S: Scheduler,
    F: FnOnce() -> Next<Out> + Send + 'static,
{
    let promise = Arc::new(Mutex::new(Some(promise)));
    let promise_for_value = promise.clone();
    let work = FnWork::new(
        move || {
            if let Some(promise) = promise_for_value.lock().unwrap().take() {
                dispatch_next(run(), promise);
            }
        },
        move |error| {
            if let Some(promise) = promise.lock().unwrap().take() {
                promise.set_exception(error);
            }
        },
    );
    scheduler.submit(Box::new(work));
}

impl<T: Send + 'static> Continuation<T> {
    /// Attaches a success handler (spec §4.3's `then` / §4.4).
    ///
    /// Consumes `self`; errors bypass `handler` entirely and propagate
    /// downstream unchanged (spec §7: "A `then(success_handler)` only
    /// shadows the success edge").
    pub fn then<H, R, Out>(self, handler: H) -> Continuation<Out>
    where
        H: FnOnce(T) -> R + Send + 'static,
        R: Into<Next<Out>>,
        Out: Send + 'static,
    {
        Continuation::make_continuable(move |promise: Promise<Out>| {
            self.invoke(Promise::new(move |outcome: Outcome<T>| match outcome {
                Outcome::Value(value) => dispatch_next(handler(value).into(), promise),
                Outcome::Exception(error) => promise.set_exception(error),
                Outcome::Empty => log::trace!("upstream aborted; `then` handler not invoked"),
            }));
        })
    }

    /// Attaches an error-only handler (spec §4.3's `fail`).
    ///
    /// Values bypass `handler` and propagate unchanged; a handler that
    /// returns a value re-enters the success edge (spec §7).
    pub fn fail<H, R>(self, handler: H) -> Continuation<T>
    where
        H: FnOnce(Error) -> R + Send + 'static,
        R: Into<Next<T>>,
    {
        Continuation::make_continuable(move |promise: Promise<T>| {
            self.invoke(Promise::new(move |outcome: Outcome<T>| match outcome {
                Outcome::Value(value) => promise.set_value(value),
                Outcome::Exception(error) => dispatch_next(handler(error).into(), promise),
                Outcome::Empty => log::trace!("upstream aborted; `fail` handler not invoked"),
            }));
        })
    }

    /// Attaches a handler observing both the success and error edges in one
    /// call (spec §4.3's `next`).
    pub fn next<H, R, Out>(self, handler: H) -> Continuation<Out>
    where
        H: FnOnce(Completion<T>) -> R + Send + 'static,
        R: Into<Next<Out>>,
        Out: Send + 'static,
    {
        Continuation::make_continuable(move |promise: Promise<Out>| {
            self.invoke(Promise::new(move |outcome: Outcome<T>| match outcome {
                Outcome::Value(value) => {
                    dispatch_next(handler(Completion::Value(value)).into(), promise)
                }
                Outcome::Exception(error) => {
                    dispatch_next(handler(Completion::Exception(error)).into(), promise)
                }
                Outcome::Empty => log::trace!("upstream aborted; `next` handler not invoked"),
            }));
        })
    }

    /// Like [`then`](Continuation::then), but dispatches `handler` through
    /// `scheduler` instead of running it inline on the producer's thread
    /// (spec §4.3/§4.4's optional executor argument, `c.then(handler, exec)`).
    pub fn then_on<H, R, Out, S>(self, scheduler: S, handler: H) -> Continuation<Out>
    where
        H: FnOnce(T) -> R + Send + 'static,
        R: Into<Next<Out>>,
        Out: Send + 'static,
        S: Scheduler + 'static,
    {
        Continuation::make_continuable(move |promise: Promise<Out>| {
            self.invoke(Promise::new(move |outcome: Outcome<T>| match outcome {
                Outcome::Value(value) => {
                    dispatch_via_scheduler(&scheduler, promise, move || handler(value).into())
                }
                Outcome::Exception(error) => promise.set_exception(error),
                Outcome::Empty => log::trace!("upstream aborted; `then_on` handler not invoked"),
            }));
        })
    }

    /// Like [`fail`](Continuation::fail), but dispatches `handler` through
    /// `scheduler` instead of running it inline on the producer's thread.
    pub fn fail_on<H, R, S>(self, scheduler: S, handler: H) -> Continuation<T>
    where
        H: FnOnce(Error) -> R + Send + 'static,
        R: Into<Next<T>>,
        S: Scheduler + 'static,
    {
        Continuation::make_continuable(move |promise: Promise<T>| {
            self.invoke(Promise::new(move |outcome: Outcome<T>| match outcome {
                Outcome::Value(value) => promise.set_value(value),
                Outcome::Exception(error) => {
                    dispatch_via_scheduler(&scheduler, promise, move || handler(error).into())
                }
                Outcome::Empty => log::trace!("upstream aborted; `fail_on` handler not invoked"),
            }));
        })
    }

    /// Like [`next`](Continuation::next), but dispatches `handler` through
    /// `scheduler` instead of running it inline on the producer's thread.
    pub fn next_on<H, R, Out, S>(self, scheduler: S, handler: H) -> Continuation<Out>
    where
        H: FnOnce(Completion<T>) -> R + Send + 'static,
        R: Into<Next<Out>>,
        Out: Send + 'static,
        S: Scheduler + 'static,
    {
        Continuation::make_continuable(move |promise: Promise<Out>| {
            self.invoke(Promise::new(move |outcome: Outcome<T>| match outcome {
                Outcome::Value(value) => dispatch_via_scheduler(&scheduler, promise, move || {
                    handler(Completion::Value(value)).into()
                }),
                Outcome::Exception(error) => dispatch_via_scheduler(&scheduler, promise, move || {
                    handler(Completion::Exception(error)).into()
                }),
                Outcome::Empty => log::trace!("upstream aborted; `next_on` handler not invoked"),
            }));
        })
    }
}
