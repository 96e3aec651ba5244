//! Collection transformers
//!
//! Every function here returns a fresh `Vec` and leaves its input untouched.

use super::collection::{each, fold, IntoCollection, Key};
use super::value::{Record, StrictEq};
use serde_json::Value;

/// Return the argument unchanged.
///
/// ```
/// use underbar::{identity, map};
///
/// assert_eq!(map(&[1, 2], |n, _| identity(*n)), vec![1, 2]);
/// ```
pub fn identity<T>(value: T) -> T {
    value
}

/// Apply `transform(value, key)` to every element.
pub fn map<'a, C, R, F>(collection: C, mut transform: F) -> Vec<R>
where
    C: IntoCollection<'a>,
    F: FnMut(&'a C::Item, Key<'a>) -> R,
{
    let mut results = Vec::new();
    each(collection, |value, key, _| results.push(transform(value, key)));
    results
}

/// Keep the elements that pass the predicate.
pub fn filter<'a, C, P>(collection: C, mut predicate: P) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    fold(collection, Vec::new(), |kept, value| {
        if predicate(value) {
            kept.push(value.clone());
        }
    })
}

/// Keep the elements that fail the predicate.
pub fn reject<'a, C, P>(collection: C, mut predicate: P) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    filter(collection, |value| !predicate(value))
}

/// Remove duplicate elements, keeping the first occurrence of each.
///
/// `is_sorted` is a hint that equal elements are adjacent; the result is the same
/// either way.
pub fn uniq<T>(sequence: &[T], is_sorted: bool) -> Vec<T>
where
    T: Clone + StrictEq,
{
    uniq_by(sequence, is_sorted, T::clone)
}

/// Remove elements whose `transform` result has already been seen.
///
/// With `is_sorted`, a key equal to the previous one is dropped without scanning
/// the keys seen so far.
///
/// ```
/// use underbar::uniq_by;
///
/// let values = [1, -1, 2, -2];
/// assert_eq!(uniq_by(&values, false, |n: &i32| n.abs()), vec![1, 2]);
/// ```
pub fn uniq_by<T, K, F>(sequence: &[T], is_sorted: bool, mut transform: F) -> Vec<T>
where
    T: Clone,
    K: StrictEq,
    F: FnMut(&T) -> K,
{
    let mut seen: Vec<K> = Vec::new();
    fold(sequence, Vec::new(), |unique, value| {
        let key = transform(value);
        let repeats_previous = is_sorted && seen.last().is_some_and(|last| last.strict_eq(&key));
        if !repeats_previous && !seen.iter().any(|kept| kept.strict_eq(&key)) {
            unique.push(value.clone());
            seen.push(key);
        }
    })
}

/// Extract the named property of every element; missing properties are `None`.
pub fn pluck<'a, C>(collection: C, key: &str) -> Vec<Option<Value>>
where
    C: IntoCollection<'a>,
    C::Item: Record,
{
    map(collection, |item, _| item.field(key))
}

pub fn first<T>(sequence: &[T]) -> Option<&T> {
    sequence.first()
}

/// The first `n` elements, or the whole sequence when it is shorter.
pub fn first_n<T: Clone>(sequence: &[T], n: usize) -> Vec<T> {
    sequence[..n.min(sequence.len())].to_vec()
}

pub fn last<T>(sequence: &[T]) -> Option<&T> {
    sequence.last()
}

/// The last `n` elements, or the whole sequence when it is shorter.
pub fn last_n<T: Clone>(sequence: &[T], n: usize) -> Vec<T> {
    sequence[sequence.len().saturating_sub(n)..].to_vec()
}

/// Index of the first element strictly equal to `target`.
pub fn index_of<T: StrictEq>(sequence: &[T], target: &T) -> Option<usize> {
    let mut found = None;
    each(sequence, |item, key, _| {
        if found.is_none() && item.strict_eq(target) {
            found = key.as_index();
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_map_identity_preserves_order() {
        let items = vec![3, 1, 2];
        assert_eq!(map(&items, |v, _| *v), items);
    }

    #[test]
    fn test_map_passes_index() {
        let doubled = map(&["a", "b"], |v, key| format!("{v}{key}"));
        assert_eq!(doubled, vec!["a0", "b1"]);
    }

    #[test]
    fn test_map_over_mapping() {
        let mut stock = BTreeMap::new();
        stock.insert("apples".to_string(), 2);
        stock.insert("pears".to_string(), 5);
        let labels = map(&stock, |count, key| format!("{key}={count}"));
        assert_eq!(labels, vec!["apples=2", "pears=5"]);
    }

    #[test]
    fn test_filter_and_reject_partition() {
        let numbers = vec![1, 2, 3, 4, 5, 6];
        let evens = filter(&numbers, |n| n % 2 == 0);
        let odds = reject(&numbers, |n| n % 2 == 0);
        assert_eq!(evens, vec![2, 4, 6]);
        assert_eq!(odds, vec![1, 3, 5]);
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_filter_json_object_values() {
        let scores = json!({"a": 10, "b": 3, "c": 8});
        let high = filter(&scores, |v| v.as_i64().unwrap_or(0) > 5);
        assert_eq!(high, vec![json!(10), json!(8)]);
    }

    #[test]
    fn test_uniq() {
        assert_eq!(uniq(&[1, 1, 2, 2, 3], false), vec![1, 2, 3]);
        assert_eq!(uniq(&[1, 2, 1, 3, 2], false), vec![1, 2, 3]);
        assert!(uniq::<i32>(&[], false).is_empty());
    }

    #[test]
    fn test_uniq_sorted_hint() {
        assert_eq!(uniq(&[1, 1, 2, 3, 3, 3], true), vec![1, 2, 3]);
    }

    #[test]
    fn test_uniq_sorted_hint_on_unsorted_input_still_removes_duplicates() {
        assert_eq!(uniq(&[1, 2, 1], true), vec![1, 2]);
        assert_eq!(uniq(&[3, 1, 3, 1, 2], true), uniq(&[3, 1, 3, 1, 2], false));
    }

    #[test]
    fn test_uniq_json_numbers_by_value() {
        let values = json!([1, 1.0, 2, 2.0]);
        let items = values.as_array().map(Vec::as_slice).unwrap_or_default();
        assert_eq!(uniq(items, false), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_identity() {
        assert_eq!(identity(5), 5);
        assert_eq!(identity("same"), "same");
        assert_eq!(map(&[3, 4], |n, _| identity(*n)), vec![3, 4]);
    }

    #[test]
    fn test_uniq_by_transform_keeps_first() {
        assert_eq!(uniq_by(&[1, -1, 2, -2], false, |n: &i32| n.abs()), vec![1, 2]);
        let words = ["apple", "Avocado", "banana", "Blueberry"];
        let by_initial = uniq_by(&words, false, |w: &&str| {
            w.chars().next().map(|c| c.to_ascii_lowercase())
        });
        assert_eq!(by_initial, vec!["apple", "banana"]);
    }

    #[test]
    fn test_pluck() {
        let people = json!([{"name": "moe", "age": 30}, {"name": "curly"}]);
        assert_eq!(pluck(&people, "age"), vec![Some(json!(30)), None]);
        assert_eq!(
            pluck(&people, "name"),
            vec![Some(json!("moe")), Some(json!("curly"))]
        );
    }

    #[test]
    fn test_first_and_last() {
        let items = [1, 2, 3];
        assert_eq!(first(&items), Some(&1));
        assert_eq!(last(&items), Some(&3));
        assert_eq!(first::<i32>(&[]), None);
        assert_eq!(last::<i32>(&[]), None);
    }

    #[test]
    fn test_first_n_and_last_n() {
        let items = [1, 2, 3];
        assert_eq!(first_n(&items, 2), vec![1, 2]);
        assert_eq!(last_n(&items, 2), vec![2, 3]);
        assert_eq!(first_n(&items, 0), Vec::<i32>::new());
        assert_eq!(last_n(&items, 0), Vec::<i32>::new());
        assert_eq!(first_n(&items, 5), vec![1, 2, 3]);
        assert_eq!(last_n(&items, 3), vec![1, 2, 3]);
        assert_eq!(last_n(&items, 5), vec![1, 2, 3]);
        assert!(first_n::<i32>(&[], 2).is_empty());
    }

    #[test]
    fn test_index_of() {
        let items = [10, 20, 30, 20];
        assert_eq!(index_of(&items, &20), Some(1));
        assert_eq!(index_of(&items, &40), None);
        assert_eq!(index_of::<i32>(&[], &1), None);
    }

    #[test]
    fn test_index_of_json_numbers_by_value() {
        let values = json!([1.0, 2]);
        let items = values.as_array().map(Vec::as_slice).unwrap_or_default();
        assert_eq!(index_of(items, &json!(1)), Some(0));
        assert_eq!(index_of(items, &json!(2.0)), Some(1));
        assert_eq!(index_of(items, &json!("1")), None);
    }
}
