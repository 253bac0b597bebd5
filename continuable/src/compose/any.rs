use std::ops::BitOr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use continuable_core::result::Outcome;

use crate::continuation::Continuation;
use crate::promise::Promise;

/// Any-composition (spec §4.3's `c || d`, realized as `|`).
///
/// Both operands must share the same signature (enforced here simply by
/// both being `Continuation<T>` for the same `T` — no separate compile-time
/// check is needed, Rust's type checker already is one). The first arrival,
/// success or error, wins; later arrivals are discarded (spec §4.5.2).
impl<T: Send + 'static> BitOr<Continuation<T>> for Continuation<T> {
    type Output = Continuation<T>;

    fn bitor(self, rhs: Continuation<T>) -> Self::Output {
        Continuation::make_continuable(move |promise: Promise<T>| {
            let fired = Arc::new(AtomicBool::new(false));
            let promise = Arc::new(Mutex::new(Some(promise)));

            let fired_left = fired.clone();
            let promise_left = promise.clone();
            self.invoke(Promise::new(move |outcome: Outcome<T>| {
                deliver_first(&fired_left, &promise_left, outcome);
            }));

            let fired_right = fired.clone();
            let promise_right = promise.clone();
            rhs.invoke(Promise::new(move |outcome: Outcome<T>| {
                deliver_first(&fired_right, &promise_right, outcome);
            }));
        })
    }
}

fn deliver_first<T: Send + 'static>(
    fired: &Arc<AtomicBool>,
    promise: &Arc<Mutex<Option<Promise<T>>>>,
    outcome: Outcome<T>,
) {
    if fired.swap(true, Ordering::AcqRel) {
        log::trace!("any: discarding arrival after the first");
        return;
    }
    if let Some(promise) = promise.lock().unwrap().take() {
        promise.resolve(outcome);
    }
}

/// The dynamic-arity counterpart of `|` (spec §4.5.4): the first of a
/// `Vec<Continuation<T>>` to complete wins.
pub fn any_vec<T: Send + 'static>(operands: Vec<Continuation<T>>) -> Continuation<T> {
    Continuation::make_continuable(move |promise: Promise<T>| {
        let fired = Arc::new(AtomicBool::new(false));
        let promise = Arc::new(Mutex::new(Some(promise)));

        for operand in operands {
            let fired = fired.clone();
            let promise = promise.clone();
            operand.invoke(Promise::new(move |outcome: Outcome<T>| {
                deliver_first(&fired, &promise, outcome);
            }));
        }
    })
}
