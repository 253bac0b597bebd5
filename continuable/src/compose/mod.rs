//! Composition strategies (spec §4.5, C5): `all` / `any` / `seq`.
//!
//! Each connector is exposed as a binary operator on `Continuation<T>`
//! (`&` for all, `|` for any, `>>` for seq — Rust has no `&&`/`||` operator
//! overloading, so the boolean-named operators stand in, matching spec
//! §4.3's table note). Nesting the same strategy (`a & b & c`) already
//! associates correctly through repeated operator application, which is
//! the Rust-idiomatic replacement for the source's explicit "splice same-
//! strategy operands before finalising" step — there is no intermediate
//! tagged tree representation to build and flatten, since chained operator
//! calls already finalise pairwise and carry the concatenated signature
//! forward.
//!
//! The dynamic-arity counterpart of spec §4.5.4 (a homogeneous
//! `Vec<Continuation<T>>` collapsing to one `Continuation<T>`) lives in
//! [`all_vec`], [`any_vec`], [`seq_vec`].

mod all;
mod any;
mod seq;

pub use all::all_vec;
pub use any::any_vec;
pub use seq::seq_vec;

use continuable_core::traverse::{Append, AsHList, FromHList};

/// Concatenates two value tuples into the tuple naming their combined
/// signature, reusing the traversal engine's heterogeneous-list machinery
/// (spec §4.5.1's "signature is the ordered concatenation of the operand
/// signatures").
///
/// `()` on either side is the identity (a void operand contributes zero
/// arguments), for free: `()` is `Nil` at the `HList` level, and appending
/// `Nil` to either side of a list returns the other list unchanged.
pub trait Concat<Rhs> {
    type Output;
    fn concat(self, rhs: Rhs) -> Self::Output;
}

impl<A, B> Concat<B> for A
where
    A: AsHList,
    B: AsHList,
    A::HListOf: Append<B::HListOf>,
    <A::HListOf as Append<B::HListOf>>::Output: FromHList,
{
    type Output = <<A::HListOf as Append<B::HListOf>>::Output as FromHList>::Tuple;

    fn concat(self, rhs: B) -> Self::Output {
        self.into_hlist().append(rhs.into_hlist()).into_tuple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_joins_tuples_in_order() {
        let joined = (1, 2).concat(("a",));
        assert_eq!(joined, (1, 2, "a"));
    }

    #[test]
    fn concat_with_void_operand_is_identity() {
        assert_eq!(().concat((1, 2)), (1, 2));
        assert_eq!((1, 2).concat(()), (1, 2));
    }
}
