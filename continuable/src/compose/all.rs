use std::ops::BitAnd;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use continuable_core::error::Error;
use continuable_core::result::Outcome;

use super::Concat;
use crate::continuation::Continuation;
use crate::promise::Promise;

/// Holds one operand's slot plus the shared completion bookkeeping (spec
/// §4.5.1): an atomic `left` counter seeded at `operand_count + 1` (the
/// registration guard, so a synchronously-completing operand can't fire
/// before every operand has even been attached) and a once-flag guarding
/// the single downstream dispatch.
struct AllSubmitter<A, B, Out: Send + 'static> {
    slots: Mutex<(Option<A>, Option<B>)>,
    left: AtomicUsize,
    fired: AtomicBool,
    promise: Mutex<Option<Promise<Out>>>,
}

fn fire_error<A, B, Out: Send + 'static>(submitter: &Arc<AllSubmitter<A, B, Out>>, error: Error) {
    if submitter.fired.swap(true, Ordering::AcqRel) {
        log::trace!("all: discarding additional error after the first");
        return;
    }
    if let Some(promise) = submitter.promise.lock().unwrap().take() {
        promise.set_exception(error);
    }
}

/// Called once per operand completion (success, error, or abort) plus once
/// more after both operands have been attached. Only the decrement that
/// brings `left` to zero does anything; it fires the aggregate iff both
/// slots were actually filled — an aborted operand leaves its slot `None`
/// forever, so `all` with an aborted operand never completes (spec §7,
/// the conservative reading of Open Question 1).
fn maybe_finish<A, B, Out>(submitter: &Arc<AllSubmitter<A, B, Out>>)
where
    A: Concat<B, Output = Out>,
    Out: Send + 'static,
{
    if submitter.left.fetch_sub(1, Ordering::AcqRel) != 1 {
        return;
    }
    if submitter.fired.swap(true, Ordering::AcqRel) {
        return;
    }
    let (a, b) = {
        let mut slots = submitter.slots.lock().unwrap();
        (slots.0.take(), slots.1.take())
    };
    match (a, b) {
        (Some(a), Some(b)) => {
            if let Some(promise) = submitter.promise.lock().unwrap().take() {
                promise.set_value(a.concat(b));
            }
        }
        _ => {
            log::trace!("all: an operand aborted; aggregate will never complete");
        }
    }
}

/// All-composition (spec §4.3's `c && d`, realized as `&` since Rust
/// reserves `&&`/`||` for non-overloadable short-circuit boolean logic).
///
/// Yields a continuation whose signature concatenates the two operands'
/// signatures in order, regardless of completion order (spec §8 invariant
/// 4). Both operands are consumed by `invoke` up front, so ownership is
/// released immediately and neither operand's own destructor ever fires.
impl<A, B> BitAnd<Continuation<B>> for Continuation<A>
where
    A: Concat<B> + Send + 'static,
    B: Send + 'static,
    A::Output: Send + 'static,
{
    type Output = Continuation<A::Output>;

    fn bitand(self, rhs: Continuation<B>) -> Self::Output {
        Continuation::make_continuable(move |promise: Promise<A::Output>| {
            let submitter = Arc::new(AllSubmitter {
                slots: Mutex::new((None, None)),
                left: AtomicUsize::new(3),
                fired: AtomicBool::new(false),
                promise: Mutex::new(Some(promise)),
            });

            let left_submitter = submitter.clone();
            self.invoke(Promise::new(move |outcome: Outcome<A>| match outcome {
                Outcome::Value(value) => {
                    left_submitter.slots.lock().unwrap().0 = Some(value);
                    maybe_finish(&left_submitter);
                }
                Outcome::Exception(error) => fire_error(&left_submitter, error),
                Outcome::Empty => maybe_finish(&left_submitter),
            }));

            let right_submitter = submitter.clone();
            rhs.invoke(Promise::new(move |outcome: Outcome<B>| match outcome {
                Outcome::Value(value) => {
                    right_submitter.slots.lock().unwrap().1 = Some(value);
                    maybe_finish(&right_submitter);
                }
                Outcome::Exception(error) => fire_error(&right_submitter, error),
                Outcome::Empty => maybe_finish(&right_submitter),
            }));

            maybe_finish(&submitter);
        })
    }
}

/// The dynamic-arity counterpart of `&` (spec §4.5.4): a homogeneous
/// `Vec<Continuation<T>>` collapses into one continuation carrying the
/// element signature, not a concatenation of it.
pub fn all_vec<T: Send + 'static>(operands: Vec<Continuation<T>>) -> Continuation<Vec<T>> {
    Continuation::make_continuable(move |promise: Promise<Vec<T>>| {
        let total = operands.len();
        let slots: Mutex<Vec<Option<T>>> = Mutex::new((0..total).map(|_| None).collect());
        let left = Arc::new(AtomicUsize::new(total + 1));
        let fired = Arc::new(AtomicBool::new(false));
        let slots = Arc::new(slots);
        let promise = Arc::new(Mutex::new(Some(promise)));

        let finish = {
            let left = left.clone();
            let fired = fired.clone();
            let slots = slots.clone();
            let promise = promise.clone();
            move || {
                if left.fetch_sub(1, Ordering::AcqRel) != 1 {
                    return;
                }
                if fired.swap(true, Ordering::AcqRel) {
                    return;
                }
                let mut taken = slots.lock().unwrap();
                if taken.iter().all(Option::is_some) {
                    let values: Vec<T> = taken.drain(..).map(|slot| slot.unwrap()).collect();
                    if let Some(promise) = promise.lock().unwrap().take() {
                        promise.set_value(values);
                    }
                } else {
                    log::trace!("all_vec: an operand aborted; aggregate will never complete");
                }
            }
        };

        for (index, operand) in operands.into_iter().enumerate() {
            let slots = slots.clone();
            let fired = fired.clone();
            let promise = promise.clone();
            let finish = finish.clone();
            operand.invoke(Promise::new(move |outcome: Outcome<T>| match outcome {
                Outcome::Value(value) => {
                    slots.lock().unwrap()[index] = Some(value);
                    finish();
                }
                Outcome::Exception(error) => {
                    if !fired.swap(true, Ordering::AcqRel) {
                        if let Some(promise) = promise.lock().unwrap().take() {
                            promise.set_exception(error);
                        }
                    }
                }
                Outcome::Empty => finish(),
            }));
        }

        finish();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_concatenates_ready_operands() {
        let c = Continuation::ready(("a",)) & Continuation::ready((1, 2));
        assert_eq!(c.unpack().into_value(), Some(("a", 1, 2)));
    }

    #[test]
    fn all_with_void_operand_contributes_nothing() {
        let c = Continuation::ready(("a",)) & Continuation::ready(());
        assert_eq!(c.unpack().into_value(), Some(("a",)));
    }

    #[test]
    fn all_propagates_first_error() {
        #[derive(Debug, thiserror::Error)]
        #[error("boom")]
        struct Boom;

        let c = Continuation::ready((1,)) & Continuation::<(i32,)>::exceptional(Error::new(Boom));
        let outcome = c.unpack();
        assert!(outcome.into_exception().unwrap().is_failure());
    }

    #[test]
    fn all_with_aborted_operand_never_completes() {
        use crate::chain::Value;
        use std::sync::atomic::{AtomicBool, Ordering};

        let ran = Arc::new(AtomicBool::new(false));
        let ran2 = ran.clone();
        let c = (Continuation::ready((1,)) & Continuation::<(i32,)>::from_outcome(Outcome::Empty)).then(
            move |_values| {
                ran2.store(true, Ordering::SeqCst);
                Value(())
            },
        );
        c.done();
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[test]
    fn all_vec_collects_in_order() {
        let operands = vec![Continuation::ready(1), Continuation::ready(2), Continuation::ready(3)];
        let c = all_vec(operands);
        assert_eq!(c.unpack().into_value(), Some(vec![1, 2, 3]));
    }
}
