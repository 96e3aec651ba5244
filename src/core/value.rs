//! Capabilities for loosely-typed data
//!
//! Several operations need more than equality from their elements: truthiness for
//! `every_truthy`, property lookup for `pluck` and `sort_by_property`, named methods
//! for `invoke_method`, and nesting for `flatten`. Each is a small trait here, with
//! an implementation for `serde_json::Value` so JSON documents work out of the box.

use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// JavaScript-style truthiness
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_for_integers {
    ($($ty:ty),*) => {
        $(
            impl Truthy for $ty {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f.is_truthy()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// Strict equality, as used by `contains`, `index_of`, `uniq` and the set
/// operations
///
/// For plain Rust values this is `==`. JSON numbers compare by numeric value, so
/// `1` and `1.0` are the same element; arrays and objects compare member by member.
pub trait StrictEq {
    fn strict_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_strict_eq_via_partial_eq {
    ($($ty:ty),*) => {
        $(
            impl StrictEq for $ty {
                fn strict_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_strict_eq_via_partial_eq!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String
);

impl<T: StrictEq + ?Sized> StrictEq for &T {
    fn strict_eq(&self, other: &Self) -> bool {
        (**self).strict_eq(*other)
    }
}

impl<T: StrictEq> StrictEq for Option<T> {
    fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.strict_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: StrictEq> StrictEq for [T] {
    fn strict_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.strict_eq(b))
    }
}

impl<T: StrictEq> StrictEq for Vec<T> {
    fn strict_eq(&self, other: &Self) -> bool {
        self.as_slice().strict_eq(other.as_slice())
    }
}

impl StrictEq for Number {
    fn strict_eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.as_u64(), other.as_u64()) {
            return a == b;
        }
        matches!((self.as_f64(), other.as_f64()), (Some(a), Some(b)) if a == b)
    }
}

impl StrictEq for Value {
    fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.strict_eq(b),
            (Value::Array(a), Value::Array(b)) => a.strict_eq(b),
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value.strict_eq(other)))
            }
            _ => self == other,
        }
    }
}

/// Property lookup by name (`element[key]`)
pub trait Record {
    fn field(&self, name: &str) -> Option<Value>;
}

impl Record for Value {
    /// Objects answer their members. Arrays and strings answer `"length"` and
    /// numeric indices.
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.get(name).cloned(),
            Value::Array(items) => match name {
                "length" => Some(Value::from(items.len())),
                _ => name.parse::<usize>().ok().and_then(|i| items.get(i).cloned()),
            },
            Value::String(s) => match name {
                "length" => Some(Value::from(s.chars().count())),
                _ => name
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| s.chars().nth(i))
                    .map(|c| Value::String(c.to_string())),
            },
            _ => None,
        }
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Method lookup by name, used by `invoke_method`
///
/// Returns `None` when the receiver has no method with that name.
pub trait Methods {
    fn call_method(&self, name: &str, args: &[Value]) -> Option<Value>;
}

impl Methods for Value {
    fn call_method(&self, name: &str, args: &[Value]) -> Option<Value> {
        match (name, self) {
            ("to_uppercase", Value::String(s)) => Some(Value::String(s.to_uppercase())),
            ("to_lowercase", Value::String(s)) => Some(Value::String(s.to_lowercase())),
            ("trim", Value::String(s)) => Some(Value::String(s.trim().to_string())),
            ("len" | "length", _) => self.field("length").or_else(|| match self {
                Value::Object(map) => Some(Value::from(map.len())),
                _ => None,
            }),
            ("reverse", Value::String(s)) => Some(Value::String(s.chars().rev().collect())),
            ("reverse", Value::Array(items)) => {
                Some(Value::Array(items.iter().rev().cloned().collect()))
            }
            ("sort", Value::Array(items)) => {
                let mut sorted = items.clone();
                sorted.sort_by(compare_values);
                Some(Value::Array(sorted))
            }
            ("keys", Value::Object(map)) => Some(Value::Array(
                map.keys().map(|k| Value::String(k.clone())).collect(),
            )),
            ("values", Value::Object(map)) => Some(Value::Array(map.values().cloned().collect())),
            ("join", Value::Array(items)) => {
                let separator = args.first().and_then(Value::as_str).unwrap_or(",");
                let parts: Vec<String> = items.iter().map(display_value).collect();
                Some(Value::String(parts.join(separator)))
            }
            ("to_string", value) => Some(Value::String(display_value(value))),
            _ => None,
        }
    }
}

/// Numbers sort first, then strings, booleans, arrays, objects and finally
/// nulls. Numbers compare numerically, strings lexicographically, booleans
/// `false` first and arrays element by element; objects tie with each other.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y)
            .map(|(left, right)| compare_values(left, right))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => sort_rank(a).cmp(&sort_rank(b)),
    }
}

fn sort_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One level of a nested structure
pub enum Node<'a, N: Nest> {
    Branch(&'a [N]),
    Leaf(&'a N::Leaf),
}

/// Arbitrarily nested sequences, as consumed by `flatten`
pub trait Nest: Sized {
    type Leaf: Clone;

    fn node(&self) -> Node<'_, Self>;
}

impl Nest for Value {
    type Leaf = Value;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Value::Array(items) => Node::Branch(items),
            leaf => Node::Leaf(leaf),
        }
    }
}

/// Typed nesting for values that are not JSON
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Nested<T>>,
    {
        Nested::List(items.into_iter().collect())
    }
}

impl<T> From<T> for Nested<T> {
    fn from(item: T) -> Self {
        Nested::Item(item)
    }
}

impl<T: Clone> Nest for Nested<T> {
    type Leaf = T;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Nested::Item(item) => Node::Leaf(item),
            Nested::List(items) => Node::Branch(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_truthiness() {
        let falsy = [json!(null), json!(false), json!(0), json!(0.0), json!("")];
        let truthy = [json!(true), json!(1), json!(-2.5), json!("0"), json!([]), json!({})];

        assert!(falsy.iter().all(|v| !v.is_truthy()));
        assert!(truthy.iter().all(Truthy::is_truthy));
    }

    #[test]
    fn test_primitive_truthiness() {
        assert!(!0i32.is_truthy());
        assert!(7u8.is_truthy());
        assert!(!f64::NAN.is_truthy());
        assert!("x".is_truthy());
        assert!(!String::new().is_truthy());
        assert!(!None::<bool>.is_truthy());
        assert!(Some(true).is_truthy());
    }

    #[test]
    fn test_value_field_lookup() {
        let person = json!({"name": "moe", "age": 40});
        assert_eq!(person.field("name"), Some(json!("moe")));
        assert_eq!(person.field("missing"), None);

        let list = json!([10, 20, 30]);
        assert_eq!(list.field("length"), Some(json!(3)));
        assert_eq!(list.field("1"), Some(json!(20)));

        assert_eq!(json!("hello").field("length"), Some(json!(5)));
        assert_eq!(json!(42).field("length"), None);
    }

    #[test]
    fn test_value_methods() {
        assert_eq!(
            json!("dog").call_method("to_uppercase", &[]),
            Some(json!("DOG"))
        );
        assert_eq!(
            json!([5, 1, 7]).call_method("sort", &[]),
            Some(json!([1, 5, 7]))
        );
        assert_eq!(
            json!(["a", "b"]).call_method("join", &[json!("-")]),
            Some(json!("a-b"))
        );
        assert_eq!(json!({"a": 1, "b": 2}).call_method("len", &[]), Some(json!(2)));
        assert_eq!(json!(3).call_method("to_uppercase", &[]), None);
        assert_eq!(json!("x").call_method("no_such_method", &[]), None);
    }

    #[test]
    fn test_sort_mixed_values_numbers_first() {
        let sorted = json!(["b", 3, "a", 1]).call_method("sort", &[]);
        assert_eq!(sorted, Some(json!([1, 3, "a", "b"])));
    }

    #[test]
    fn test_strict_eq_compares_json_numbers_by_value() {
        assert!(json!(1).strict_eq(&json!(1.0)));
        assert!(json!(-3).strict_eq(&json!(-3.0)));
        assert!(!json!(1).strict_eq(&json!(1.5)));
        assert!(!json!(1).strict_eq(&json!("1")));
        assert!(json!(u64::MAX).strict_eq(&json!(u64::MAX)));
        assert!(!json!(u64::MAX).strict_eq(&json!(u64::MAX - 1)));
    }

    #[test]
    fn test_strict_eq_recurses_into_arrays_and_objects() {
        assert!(json!([1, {"a": 2.0}]).strict_eq(&json!([1.0, {"a": 2}])));
        assert!(!json!([1, 2]).strict_eq(&json!([1, 2, 3])));
        assert!(!json!({"a": 1}).strict_eq(&json!({"b": 1})));
        assert!(!json!({"a": 1}).strict_eq(&json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_strict_eq_for_rust_values() {
        assert!(3i32.strict_eq(&3));
        assert!("a".strict_eq("a"));
        assert!(Some('x').strict_eq(&Some('x')));
        assert!(!Some('x').strict_eq(&None));
        assert!(!f64::NAN.strict_eq(&f64::NAN));
        assert!(0.0f64.strict_eq(&-0.0));
    }

    #[test]
    fn test_sort_ranks_every_kind() {
        let sorted = json!([null, {"k": 1}, [2], "a", true, 1, false, [1, 5], "B"])
            .call_method("sort", &[]);
        assert_eq!(
            sorted,
            Some(json!([1, "B", "a", false, true, [1, 5], [2], {"k": 1}, null]))
        );
    }

    #[test]
    fn test_nested_from_and_list() {
        let nested = Nested::list([Nested::from(1), Nested::list([Nested::from(2)])]);
        match nested.node() {
            Node::Branch(children) => assert_eq!(children.len(), 2),
            Node::Leaf(_) => panic!("expected a branch"),
        }
    }
}
