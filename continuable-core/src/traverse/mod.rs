//! The traversal engine (spec §4.1 / C1): synchronous and asynchronous
//! walks over heterogeneous packs of tuple-likes, homogeneous containers,
//! and leaf values, with 1:N result mapping and container/tuple rebind.

mod async_traverse;
pub mod hlist;
mod mapper;

mod container;
mod populate;

pub use async_traverse::{traverse_pack_async, Resume, TraverseAsync, VisitOutcome, Visitor, VisitorComplete};
pub use container::{map_container, Container, ElementOutput};
pub use hlist::{Append, AsHList, Cons, FromHList, HList, Nil};
pub use mapper::{IntoFlat, IntoVec, Leaf, MapPack, Mapper};
pub use populate::populate;

/// Maps every leaf of a tuple pack, flattening spreads and preserving
/// left-to-right order (spec §4.1's `map_pack`).
///
/// `args` is any tuple from `()` up to 8 elements (via [`AsHList`]); the
/// result is the tuple corresponding to the flattened, mapped heterogeneous
/// list.
pub fn map_pack<Args, M>(args: Args, mapper: &mut M) -> <<Args as AsHList>::HListOf as MapPack<M>>::Output
where
    Args: AsHList,
    Args::HListOf: MapPack<M>,
{
    args.into_hlist().map_pack(mapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Increment;
    impl Mapper<i32> for Increment {
        type Output = Leaf<i32>;
        fn map(&mut self, leaf: i32) -> Leaf<i32> {
            Leaf(leaf + 1)
        }
    }

    #[test]
    fn map_pack_over_tuple() {
        let result = map_pack((1, 2, 3), &mut Increment);
        let Cons(a, Cons(b, Cons(c, Nil))) = result;
        assert_eq!((a, b, c), (2, 3, 4));
    }
}
