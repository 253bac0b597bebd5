use std::collections::VecDeque;

use super::hlist::{hlist_type, AsHList, Cons, FromHList, HList, Nil};
use crate::spread::Spread;

/// Maps a single leaf value of type `L` to some output.
///
/// `map_pack` requires the mapper to implement `Mapper<L>` for every leaf
/// type `L` appearing in the pack — stable Rust has no SFINAE-style
/// negative reasoning to detect "no impl exists" and fall through
/// automatically (spec §4.1's "not callable ⇒ pass through unchanged"). A
/// mapper that wants that behaviour for a given leaf type implements
/// `Mapper<L>` for it and returns [`Leaf(leaf)`](Leaf) unchanged.
///
/// Two categories of leaf get that `impl` for free, so a single `map_pack`
/// call auto-recurses into them without the caller writing anything extra:
///
/// - A `Vec`/`VecDeque` of a type the mapper already handles (below), so
///   `M: Mapper<i32>` also makes `M: Mapper<Vec<i32>>`, `M: Mapper<Vec<Vec<i32>>>`,
///   and so on, flattening each element's contribution homogeneously.
/// - A tuple of types the mapper already handles (`impl_mapper_for_tuple!`
///   below), so `M: Mapper<i32>` also makes `M: Mapper<(i32, i32)>`, nesting
///   the recursively-mapped tuple back as a single [`Leaf`] at the parent
///   position.
///
/// There is no third, fully general "pass every unhandled leaf type through
/// unchanged" fallthrough: that would require negative reasoning ("no
/// `Mapper<L>` impl exists for this `L`"), which stable Rust's trait solver
/// cannot express. A mapper that wants identity behaviour for a specific
/// leaf type still has to spell out `impl Mapper<L> for M { .. Leaf(leaf) }`
/// for it.
pub trait Mapper<L> {
    /// Not bounded by [`IntoFlat`] here: [`super::map_container`] needs
    /// `Output = ElementOutput<U>`, whose `Spread` variant carries a
    /// runtime-determined element count that an `IntoFlat::Flat` (a
    /// compile-time-fixed `Cons`/`Nil` shape) cannot represent. `map_pack`'s
    /// own recursion instead demands `IntoFlat` locally, on the `Output` of
    /// whatever `Mapper` impl it is applied to.
    type Output;
    fn map(&mut self, leaf: L) -> Self::Output;
}

/// Wraps a plain mapped value as a single-element contribution to the
/// enclosing position (the common case: one leaf maps to one leaf).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<T>(pub T);

/// Converts a mapper's per-leaf output into the heterogeneous list it
/// contributes to its parent position: zero elements for an empty
/// [`Spread`], one for [`Leaf`], or many for a populated `Spread`.
pub trait IntoFlat {
    type Flat: HList;
    fn into_flat(self) -> Self::Flat;
}

impl<T> IntoFlat for Leaf<T> {
    type Flat = Cons<T, Nil>;
    fn into_flat(self) -> Self::Flat {
        Cons(self.0, Nil)
    }
}

impl IntoFlat for Spread<()> {
    type Flat = Nil;
    fn into_flat(self) -> Nil {
        Nil
    }
}

macro_rules! impl_into_flat_for_spread {
    ($($name:ident),+) => {
        impl<$($name),+> IntoFlat for Spread<($($name,)+)> {
            type Flat = hlist_type!($($name),+);
            fn into_flat(self) -> Self::Flat {
                self.0.into_hlist()
            }
        }
    };
}

impl_into_flat_for_spread!(A);
impl_into_flat_for_spread!(A, B);
impl_into_flat_for_spread!(A, B, C);
impl_into_flat_for_spread!(A, B, C, D);
impl_into_flat_for_spread!(A, B, C, D, E);
impl_into_flat_for_spread!(A, B, C, D, E, F);

/// Recursively maps every leaf of a heterogeneous list, flattening each
/// leaf's contribution into the result.
pub trait MapPack<M> {
    type Output: HList;
    fn map_pack(self, mapper: &mut M) -> Self::Output;
}

impl<M> MapPack<M> for Nil {
    type Output = Nil;
    fn map_pack(self, _mapper: &mut M) -> Nil {
        Nil
    }
}

impl<M, Head, Tail> MapPack<M> for Cons<Head, Tail>
where
    M: Mapper<Head>,
    M::Output: IntoFlat,
    Tail: MapPack<M>,
    <M::Output as IntoFlat>::Flat: super::hlist::Append<<Tail as MapPack<M>>::Output>,
{
    type Output = <<M::Output as IntoFlat>::Flat as super::hlist::Append<
        <Tail as MapPack<M>>::Output,
    >>::Output;

    fn map_pack(self, mapper: &mut M) -> Self::Output {
        let Cons(head, tail) = self;
        let mapped_head = mapper.map(head).into_flat();
        let mapped_tail = tail.map_pack(mapper);
        mapped_head.append(mapped_tail)
    }
}

/// A non-empty heterogeneous list whose elements are all the same type,
/// flattenable into a `Vec` of that type.
///
/// Every [`IntoFlat::Flat`] produced by a single `Mapper::map` call has this
/// shape (its arity is fixed by `Output`'s type, not by runtime data), which
/// is what lets `Mapper<Vec<Inner>>`/`Mapper<VecDeque<Inner>>` auto-derive
/// below: each element maps to a fixed-arity flat list, and those lists
/// concatenate into the rebuilt container.
pub trait IntoVec {
    type Elem;
    fn collect_into(self, out: &mut Vec<Self::Elem>);
}

impl<U> IntoVec for Cons<U, Nil> {
    type Elem = U;
    fn collect_into(self, out: &mut Vec<U>) {
        out.push(self.0);
    }
}

impl<U, Tail> IntoVec for Cons<U, Tail>
where
    Tail: IntoVec<Elem = U>,
{
    type Elem = U;
    fn collect_into(self, out: &mut Vec<U>) {
        out.push(self.0);
        self.1.collect_into(out);
    }
}

/// Auto-derives `Mapper<Vec<Inner>>` / `Mapper<VecDeque<Inner>>` for any
/// leaf type the mapper already handles (spec §4.1's `Container` category,
/// folded into the same `map_pack` call rather than a separate
/// [`super::map_container`] pass).
///
/// Each element's contribution is flattened and concatenated positionally,
/// so e.g. a `Dup: Mapper<i32, Output = Spread<(i32, i32)>>` turns
/// `vec![2, 3]` into `vec![2, 2, 3, 3]`. This covers the common case where
/// every element maps to the same (possibly >1-ary) shape; a mapper that
/// needs to erase elements based on a runtime condition still reaches for
/// the lower-level [`super::map_container`] with an [`super::ElementOutput`]
/// return type instead.
impl<M, Inner> Mapper<Vec<Inner>> for M
where
    M: Mapper<Inner>,
    M::Output: IntoFlat,
    <M::Output as IntoFlat>::Flat: IntoVec,
{
    type Output = Leaf<Vec<<<M::Output as IntoFlat>::Flat as IntoVec>::Elem>>;

    fn map(&mut self, leaf: Vec<Inner>) -> Self::Output {
        let mut out = Vec::with_capacity(leaf.len());
        for element in leaf {
            self.map(element).into_flat().collect_into(&mut out);
        }
        Leaf(out)
    }
}

impl<M, Inner> Mapper<VecDeque<Inner>> for M
where
    M: Mapper<Inner>,
    M::Output: IntoFlat,
    <M::Output as IntoFlat>::Flat: IntoVec,
{
    type Output = Leaf<VecDeque<<<M::Output as IntoFlat>::Flat as IntoVec>::Elem>>;

    fn map(&mut self, leaf: VecDeque<Inner>) -> Self::Output {
        let mut out = Vec::with_capacity(leaf.len());
        for element in leaf {
            self.map(element).into_flat().collect_into(&mut out);
        }
        Leaf(out.into_iter().collect())
    }
}

/// Auto-derives `Mapper<(A, ..)>` for a tuple of leaf types the mapper
/// already handles (spec §4.1's `TupleLike` category), by reusing
/// [`MapPack`]/[`AsHList`]/[`FromHList`] to recurse into the tuple and
/// wrapping the remapped result back up as one [`Leaf`] contribution at the
/// parent position.
macro_rules! impl_mapper_for_tuple {
    ($($name:ident),+) => {
        impl<M, $($name),+> Mapper<($($name,)+)> for M
        where
            ($($name,)+): AsHList,
            <($($name,)+) as AsHList>::HListOf: MapPack<M>,
            <<($($name,)+) as AsHList>::HListOf as MapPack<M>>::Output: FromHList,
        {
            type Output = Leaf<
                <<<($($name,)+) as AsHList>::HListOf as MapPack<M>>::Output as FromHList>::Tuple,
            >;

            fn map(&mut self, leaf: ($($name,)+)) -> Self::Output {
                Leaf(leaf.into_hlist().map_pack(self).into_tuple())
            }
        }
    };
}

impl_mapper_for_tuple!(A);
impl_mapper_for_tuple!(A, B);
impl_mapper_for_tuple!(A, B, C);
impl_mapper_for_tuple!(A, B, C, D);
impl_mapper_for_tuple!(A, B, C, D, E);
impl_mapper_for_tuple!(A, B, C, D, E, F);
impl_mapper_for_tuple!(A, B, C, D, E, F, G);
impl_mapper_for_tuple!(A, B, C, D, E, F, G, H);
