//! The terminal dispatcher (spec §4.6, C6): drives a completed continuation
//! to its final callback, invoked by [`crate::Continuation::done`] and by
//! the automatic drain in `Continuation`'s `Drop` impl.

use continuable_core::error::Error;
use continuable_core::result::Outcome;

use crate::continuation::ContData;
use crate::promise::Promise;

/// Drains `data`, running it to completion with a no-op terminal callback.
///
/// This is the one place the trap-vs-swallow policy lives: a truthy,
/// unhandled `Error` reaching here is logged at `error` level and, unless
/// the `trap-panics` feature is disabled, panics. A falsy `Error`
/// (cancellation) is always silently discarded.
pub(crate) fn drain<T: Send + 'static>(data: ContData<T>) {
    match data {
        ContData::Ready(outcome) => dispatch(outcome),
        ContData::Callable(f) => f(Promise::new(dispatch)),
    }
}

fn dispatch<T>(outcome: Outcome<T>) {
    match outcome {
        Outcome::Value(_) => {
            log::trace!("terminal dispatch: value discarded (no-op callback)");
        }
        Outcome::Empty => {
            log::trace!("terminal dispatch: chain aborted upstream");
        }
        Outcome::Exception(error) => trap_or_swallow(error),
    }
}

fn trap_or_swallow(error: Error) {
    if error.is_cancellation() {
        log::trace!("terminal dispatch: cancellation, discarding silently");
        return;
    }

    log::error!("unhandled continuation error reached the terminal dispatcher: {error}");
    trap(error);
}

#[cfg(feature = "trap-panics")]
fn trap(error: Error) {
    panic!("unhandled continuation error: {error}");
}

#[cfg(not(feature = "trap-panics"))]
fn trap(_error: Error) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuation::Continuation;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn cancellation_is_silent() {
        Continuation::<()>::cancelling().done();
    }

    #[cfg(feature = "trap-panics")]
    #[test]
    #[should_panic(expected = "unhandled continuation error")]
    fn truthy_error_traps() {
        Continuation::<()>::exceptional(Error::new(Boom)).done();
    }

    #[cfg(not(feature = "trap-panics"))]
    #[test]
    fn truthy_error_is_swallowed_without_trap_panics() {
        Continuation::<()>::exceptional(Error::new(Boom)).done();
    }
}
