//! Predicate aggregators built on `fold`

use super::collection::{fold, IntoCollection};
use super::value::{StrictEq, Truthy};

/// Whether any element strictly equals `target`.
pub fn contains<'a, C>(collection: C, target: &C::Item) -> bool
where
    C: IntoCollection<'a>,
    C::Item: StrictEq,
{
    fold(collection, false, |found, item| {
        if !*found {
            *found = item.strict_eq(target);
        }
    })
}

/// Whether the predicate holds for every element; true for an empty collection.
///
/// Once an element fails, the predicate is not called again.
pub fn every<'a, C, P>(collection: C, mut predicate: P) -> bool
where
    C: IntoCollection<'a>,
    P: FnMut(&C::Item) -> bool,
{
    fold(collection, true, |all, item| {
        *all = *all && predicate(item);
    })
}

/// Whether the predicate holds for at least one element.
pub fn some<'a, C, P>(collection: C, mut predicate: P) -> bool
where
    C: IntoCollection<'a>,
    P: FnMut(&C::Item) -> bool,
{
    !every(collection, |item| !predicate(item))
}

/// `every` with each element's own truthiness as the predicate.
pub fn every_truthy<'a, C>(collection: C) -> bool
where
    C: IntoCollection<'a>,
    C::Item: Truthy,
{
    every(collection, Truthy::is_truthy)
}

/// `some` with each element's own truthiness as the predicate.
pub fn some_truthy<'a, C>(collection: C) -> bool
where
    C: IntoCollection<'a>,
    C::Item: Truthy,
{
    some(collection, Truthy::is_truthy)
}
