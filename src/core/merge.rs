//! Object mergers over string-keyed mappings

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// A mutable string-keyed mapping
pub trait Mapping {
    type Value: Clone;

    fn has_key(&self, key: &str) -> bool;

    fn put(&mut self, key: String, value: Self::Value);

    fn entries(&self) -> Vec<(&str, &Self::Value)>;
}

impl<V: Clone> Mapping for BTreeMap<String, V> {
    type Value = V;

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

impl<V: Clone> Mapping for HashMap<String, V> {
    type Value = V;

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> Vec<(&str, &V)> {
        let mut entries: Vec<(&str, &V)> = self.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl Mapping for Map<String, Value> {
    type Value = Value;

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }

    fn entries(&self) -> Vec<(&str, &Value)> {
        self.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

/// Copy every entry of each source into `target`, in order.
///
/// Later sources overwrite earlier ones as well as the target's own entries.
pub fn extend<'t, M, S>(target: &'t mut M, sources: &[&S]) -> &'t mut M
where
    M: Mapping,
    S: Mapping<Value = M::Value>,
{
    for source in sources {
        for (key, value) in source.entries() {
            target.put(key.to_string(), value.clone());
        }
    }
    target
}

/// Like [`extend`], but never overwrites a key that `target` already holds.
pub fn defaults<'t, M, S>(target: &'t mut M, sources: &[&S]) -> &'t mut M
where
    M: Mapping,
    S: Mapping<Value = M::Value>,
{
    for source in sources {
        for (key, value) in source.entries() {
            if !target.has_key(key) {
                target.put(key.to_string(), value.clone());
            }
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map_of(pairs: &[(&str, i32)]) -> BTreeMap<String, i32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_extend_later_sources_win() {
        let mut target = map_of(&[("a", 1), ("b", 1)]);
        let first = map_of(&[("b", 2), ("c", 2)]);
        let second = map_of(&[("c", 3)]);

        extend(&mut target, &[&first, &second]);

        assert_eq!(target, map_of(&[("a", 1), ("b", 2), ("c", 3)]));
    }

    #[test]
    fn test_extend_returns_target() {
        let mut target = map_of(&[]);
        let source = map_of(&[("x", 9)]);
        let returned = extend(&mut target, &[&source]);
        returned.insert("y".to_string(), 10);
        assert_eq!(target.len(), 2);
    }

    #[test]
    fn test_extend_with_no_sources() {
        let mut target = map_of(&[("a", 1)]);
        extend::<_, BTreeMap<String, i32>>(&mut target, &[]);
        assert_eq!(target, map_of(&[("a", 1)]));
    }

    #[test]
    fn test_defaults_never_overwrites() {
        let mut target = map_of(&[("a", 1)]);
        let first = map_of(&[("a", 5), ("b", 2)]);
        let second = map_of(&[("b", 7), ("c", 3)]);

        defaults(&mut target, &[&first, &second]);

        assert_eq!(target, map_of(&[("a", 1), ("b", 2), ("c", 3)]));
    }

    #[test]
    fn test_merge_json_objects() {
        let mut target = json!({"name": "moe"}).as_object().cloned().unwrap_or_default();
        let source = json!({"name": "larry", "age": 50})
            .as_object()
            .cloned()
            .unwrap_or_default();

        defaults(&mut target, &[&source]);
        assert_eq!(Value::Object(target.clone()), json!({"name": "moe", "age": 50}));

        extend(&mut target, &[&source]);
        assert_eq!(Value::Object(target), json!({"name": "larry", "age": 50}));
    }

    #[test]
    fn test_extend_hash_map_from_btree_map_source() {
        let mut target: HashMap<String, i32> = HashMap::new();
        let source = map_of(&[("k", 1)]);
        extend(&mut target, &[&source]);
        assert_eq!(target.get("k"), Some(&1));
    }
}
