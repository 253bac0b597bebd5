use std::collections::VecDeque;

use super::mapper::Mapper;
use crate::spread::Spread;

/// A homogeneous, iterable sequence that `map_pack` can rebuild with a
/// different element type (spec §4.1's `Container` category).
pub trait Container<T> {
    type Rebuilt<U>: Container<U>;

    fn into_elements(self) -> Vec<T>;
    fn from_elements<U>(elements: Vec<U>) -> Self::Rebuilt<U>;
}

impl<T> Container<T> for Vec<T> {
    type Rebuilt<U> = Vec<U>;

    fn into_elements(self) -> Vec<T> {
        self
    }

    fn from_elements<U>(elements: Vec<U>) -> Vec<U> {
        elements
    }
}

impl<T> Container<T> for VecDeque<T> {
    type Rebuilt<U> = VecDeque<U>;

    fn into_elements(self) -> Vec<T> {
        self.into_iter().collect()
    }

    fn from_elements<U>(elements: Vec<U>) -> VecDeque<U> {
        elements.into_iter().collect()
    }
}

/// Maps every element of a container, flattening per-element spreads and
/// dropping per-element empty spreads, exactly as spec §4.1 describes for
/// the `Container` category: "If every mapping is empty, the container
/// degenerates to an empty spread."
///
/// Returns `None` when the container had at least one element and every
/// element mapped to an empty spread (the whole container then erases
/// itself from its parent position); `Some` otherwise, including for an
/// originally-empty container.
pub fn map_container<C, T, M, U>(container: C, mapper: &mut M) -> Option<C::Rebuilt<U>>
where
    C: Container<T>,
    M: Mapper<T, Output = ElementOutput<U>>,
{
    let elements = container.into_elements();
    let had_elements = !elements.is_empty();
    let mut rebuilt = Vec::with_capacity(elements.len());
    for element in elements {
        match mapper.map(element) {
            ElementOutput::Leaf(value) => rebuilt.push(value),
            ElementOutput::Spread(mut values) => rebuilt.append(&mut values),
            ElementOutput::Erased => {}
        }
    }
    if had_elements && rebuilt.is_empty() {
        None
    } else {
        Some(C::from_elements(rebuilt))
    }
}

/// A container element's mapped outcome: one value, many values spread
/// into the container's position, or none (erased).
#[derive(Debug)]
pub enum ElementOutput<U> {
    Leaf(U),
    Spread(Vec<U>),
    Erased,
}

impl<U> From<U> for ElementOutput<U> {
    fn from(value: U) -> Self {
        ElementOutput::Leaf(value)
    }
}

impl<U> From<Spread<Vec<U>>> for ElementOutput<U> {
    fn from(spread: Spread<Vec<U>>) -> Self {
        if spread.0.is_empty() {
            ElementOutput::Erased
        } else {
            ElementOutput::Spread(spread.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DupEven;
    impl Mapper<i32> for DupEven {
        type Output = ElementOutput<i32>;
        fn map(&mut self, leaf: i32) -> ElementOutput<i32> {
            if leaf % 2 == 0 {
                Spread(vec![leaf, leaf]).into()
            } else {
                leaf.into()
            }
        }
    }

    #[test]
    fn rebuilds_with_spread_elements() {
        let input = vec![1, 2, 3];
        let output = map_container(input, &mut DupEven).unwrap();
        assert_eq!(output, vec![1, 2, 2, 3]);
    }

    struct EraseAll;
    impl Mapper<i32> for EraseAll {
        type Output = ElementOutput<i32>;
        fn map(&mut self, _leaf: i32) -> ElementOutput<i32> {
            ElementOutput::Erased
        }
    }

    #[test]
    fn all_erased_degenerates_to_none() {
        let input = vec![1, 2, 3];
        let output: Option<Vec<i32>> = map_container(input, &mut EraseAll);
        assert!(output.is_none());
    }

    #[test]
    fn empty_input_stays_some_empty() {
        let input: Vec<i32> = vec![];
        let output = map_container(input, &mut DupEven).unwrap();
        assert!(output.is_empty());
    }
}
