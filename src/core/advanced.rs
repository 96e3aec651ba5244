//! Advanced collection operations
//!
//! These accept ordered sequences only, except `invoke` and `invoke_method` which
//! take any collection.

use super::collection::{fold, IntoCollection};
use super::predicate::{contains, every};
use super::transform::{filter, index_of, map, reject};
use super::value::{Methods, Nest, Node, Record, StrictEq};
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

/// Sort ascending by the numeric `criterion` of each element.
///
/// The sort is stable and `-0.0` ties with `0.0`. NaN criteria are ordered by
/// `f64::total_cmp`, which keeps the sort well defined but gives no meaningful
/// order for them.
pub fn sort_by<T, F>(sequence: &[T], mut criterion: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T) -> f64,
{
    let mut keyed = map(sequence, |item, _| (unsigned_zero(criterion(item)), item.clone()));
    keyed.sort_by(|(left, _), (right, _)| left.total_cmp(right));
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn unsigned_zero(key: f64) -> f64 {
    if key == 0.0 {
        0.0
    } else {
        key
    }
}

/// Sort ascending by the named numeric property; missing or non-numeric
/// properties count as NaN.
pub fn sort_by_property<T>(sequence: &[T], property: &str) -> Vec<T>
where
    T: Clone + Record,
{
    sort_by(sequence, |item| {
        item.field(property)
            .and_then(|value| value.as_f64())
            .unwrap_or(f64::NAN)
    })
}

/// Group the elements at each index of the first sequence with the elements at
/// the same index of every other sequence. Missing elements are `None`.
///
/// ```
/// use underbar::zip;
///
/// let letters = ["a", "b", "c"];
/// let numbers = ["1", "2"];
/// assert_eq!(
///     zip(&[&letters[..], &numbers[..]]),
///     vec![
///         vec![Some("a"), Some("1")],
///         vec![Some("b"), Some("2")],
///         vec![Some("c"), None],
///     ]
/// );
/// ```
pub fn zip<T: Clone>(sequences: &[&[T]]) -> Vec<Vec<Option<T>>> {
    let Some(first) = sequences.first() else {
        return Vec::new();
    };
    (0..first.len())
        .map(|index| map(sequences, |sequence, _| sequence.get(index).cloned()))
        .collect()
}

/// Flatten arbitrarily nested sequences into their leaves, in order.
pub fn flatten<N: Nest>(nested: &[N]) -> Vec<N::Leaf> {
    flatten_into(nested, Vec::new())
}

fn flatten_into<N: Nest>(nested: &[N], flat: Vec<N::Leaf>) -> Vec<N::Leaf> {
    fold(nested, flat, |flat, item| match item.node() {
        Node::Branch(children) => *flat = flatten_into(children, std::mem::take(flat)),
        Node::Leaf(leaf) => flat.push(leaf.clone()),
    })
}

/// Elements of the first sequence, in its order, that every sequence contains.
pub fn intersection<T>(sequences: &[&[T]]) -> Vec<T>
where
    T: Clone + StrictEq,
{
    let Some((first, rest)) = sequences.split_first() else {
        return Vec::new();
    };
    filter(*first, |item| every(rest, |other| contains(*other, item)))
}

/// Elements of `sequence` that appear in none of `others`.
pub fn difference<T>(sequence: &[T], others: &[&[T]]) -> Vec<T>
where
    T: Clone + StrictEq,
{
    let excluded: Vec<T> = others.concat();
    reject(sequence, |item| index_of(&excluded, item).is_some())
}

/// Call `func(element, args)` on every element and collect the results.
pub fn invoke<'a, C, A, R, F>(collection: C, mut func: F, args: &[A]) -> Vec<R>
where
    C: IntoCollection<'a>,
    F: FnMut(&C::Item, &[A]) -> R,
{
    map(collection, |item, _| func(item, args))
}

/// Call the method named `method` on every element.
///
/// Fails with [`Error::MethodNotFound`] on the first element that has no such
/// method.
pub fn invoke_method<'a, C>(collection: C, method: &str, args: &[Value]) -> Result<Vec<Value>>
where
    C: IntoCollection<'a>,
    C::Item: Methods,
{
    map(collection, |item, _| {
        item.call_method(method, args)
            .ok_or_else(|| Error::MethodNotFound(method.to_string()))
    })
    .into_iter()
    .collect()
}

/// A uniformly random permutation of `sequence`, leaving the input untouched.
pub fn shuffle<T: Clone>(sequence: &[T]) -> Vec<T> {
    shuffle_with(sequence, &mut rand::rng())
}

/// [`shuffle`] driven by a caller-supplied random number generator.
pub fn shuffle_with<T, R>(sequence: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut shuffled = sequence.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
