use std::ops::Shr;

use super::Concat;
use crate::continuation::Continuation;

/// Sequential composition (spec §4.3's `c >> d`, realized as `>>`).
///
/// Finalisation is eager-desugared exactly as spec §4.5.3 describes: `a >>
/// b` is rewritten into `a.then(|left| b.then(|right| left.concat(right)))`
/// — run `a`, then run `b`, then merge the argument tuples left to right.
/// The combinator adds nothing beyond the chain transform plus the same
/// `Concat` used by `all`.
impl<A, B> Shr<Continuation<B>> for Continuation<A>
where
    A: Concat<B> + Send + 'static,
    B: Send + 'static,
    A::Output: Send + 'static,
{
    type Output = Continuation<A::Output>;

    fn shr(self, rhs: Continuation<B>) -> Self::Output {
        self.then(move |left: A| rhs.then(move |right: B| left.concat(right)))
    }
}

/// The dynamic-arity counterpart of `>>` (spec §4.5.4): runs a
/// `Vec<Continuation<T>>` strictly in order, collecting values; an early
/// error short-circuits the remainder (spec §7's "seq: early error
/// short-circuits the remainder").
pub fn seq_vec<T: Send + 'static>(operands: Vec<Continuation<T>>) -> Continuation<Vec<T>> {
    step(operands.into_iter(), Vec::new())
}

fn step<T: Send + 'static>(mut remaining: std::vec::IntoIter<Continuation<T>>, mut collected: Vec<T>) -> Continuation<Vec<T>> {
    match remaining.next() {
        None => Continuation::ready(collected),
        Some(next) => next.then(move |value| {
            collected.push(value);
            step(remaining, collected)
        }),
    }
}
