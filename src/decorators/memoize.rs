use crate::config::MemoizeConfig;
use crate::error::Result;
use lru::LruCache;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use tracing::trace;

/// Cache key for an argument list: SHA-256 of its canonical JSON encoding.
///
/// Arguments go through `serde_json::Value` first, whose objects keep their keys
/// sorted, so maps with the same entries produce the same key regardless of
/// insertion order. Non-finite floats encode as `null` and therefore share a key
/// with `None`. Values that JSON cannot represent (maps with non-string keys,
/// for instance) are an error.
pub fn cache_key<A: Serialize + ?Sized>(args: &A) -> Result<String> {
    let canonical = serde_json::to_value(args)?;
    let encoded = serde_json::to_vec(&canonical)?;
    let mut hasher = Sha256::new();
    hasher.update(&encoded);
    Ok(format!("{:x}", hasher.finalize()))
}

enum Cache<R> {
    Unbounded(HashMap<String, R>),
    Bounded(LruCache<String, R>),
}

impl<R> Cache<R> {
    fn get(&mut self, key: &str) -> Option<&R> {
        match self {
            Cache::Unbounded(map) => map.get(key),
            Cache::Bounded(lru) => lru.get(key),
        }
    }

    fn put(&mut self, key: String, value: R) {
        match self {
            Cache::Unbounded(map) => {
                map.insert(key, value);
            }
            Cache::Bounded(lru) => {
                lru.put(key, value);
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Cache::Unbounded(map) => map.len(),
            Cache::Bounded(lru) => lru.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Cache::Unbounded(map) => map.clear(),
            Cache::Bounded(lru) => lru.clear(),
        }
    }
}

/// Wrapper that caches results by argument list
///
/// Each instance owns its cache. The cache is unbounded unless built with
/// [`Memoize::with_capacity`], in which case the least recently used entry is
/// evicted once it is full.
pub struct Memoize<F, A, R> {
    func: F,
    cache: Cache<R>,
    _args: PhantomData<fn(A) -> R>,
}

/// Wrap `func` with an unbounded result cache.
///
/// ```
/// use underbar::memoize;
///
/// let mut square = memoize(|n: u64| n * n);
/// assert_eq!(square.call(12).ok(), Some(144));
/// assert_eq!(square.len(), 1);
/// ```
pub fn memoize<A, F, R>(func: F) -> Memoize<F, A, R>
where
    F: FnMut(A) -> R,
{
    Memoize::new(func)
}

impl<F, A, R> Memoize<F, A, R>
where
    F: FnMut(A) -> R,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            cache: Cache::Unbounded(HashMap::new()),
            _args: PhantomData,
        }
    }

    /// Keep at most `capacity` results, evicting the least recently used.
    pub fn with_capacity(func: F, capacity: NonZeroUsize) -> Self {
        Self {
            func,
            cache: Cache::Bounded(LruCache::new(capacity)),
            _args: PhantomData,
        }
    }

    /// Build from configuration; a missing or zero capacity means unbounded.
    pub fn from_config(func: F, config: &MemoizeConfig) -> Self {
        match config.capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => Self::with_capacity(func, capacity),
            None => Self::new(func),
        }
    }

    /// Return the cached result for `args`, computing and storing it on a miss.
    pub fn call(&mut self, args: A) -> Result<R>
    where
        A: Serialize,
        R: Clone,
    {
        let key = cache_key(&args)?;
        if let Some(hit) = self.cache.get(&key) {
            trace!("Memoize cache hit for {}", key);
            return Ok(hit.clone());
        }

        trace!("Memoize cache miss for {}", key);
        let result = (self.func)(args);
        self.cache.put(key, result.clone());
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;
    use std::collections::BTreeMap;

    #[test]
    fn test_same_arguments_compute_once() {
        let counter = CallCounter::new();
        let calls = counter.clone();
        let mut add = memoize(move |(a, b): (i32, i32)| {
            calls.hit();
            a + b
        });

        assert_eq!(add.call((1, 2)).ok(), Some(3));
        assert_eq!(add.call((1, 2)).ok(), Some(3));
        assert_eq!(counter.count(), 1);

        assert_eq!(add.call((2, 1)).ok(), Some(3));
        assert_eq!(counter.count(), 2);
        assert_eq!(add.len(), 2);
    }

    #[test]
    fn test_instances_do_not_share_cache() {
        let counter = CallCounter::new();
        let make = |counter: CallCounter| {
            memoize(move |n: i32| {
                counter.hit();
                n
            })
        };
        let mut first = make(counter.clone());
        let mut second = make(counter.clone());

        assert!(first.call(1).is_ok());
        assert!(second.call(1).is_ok());
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_key_distinguishes_argument_structure() {
        assert_ne!(cache_key(&("1", 1)).ok(), cache_key(&(1, "1")).ok());
        assert_ne!(cache_key(&vec![1, 2]).ok(), cache_key(&vec![2, 1]).ok());
        assert_eq!(cache_key(&(1, 2)).ok(), cache_key(&[1, 2]).ok());
    }

    #[test]
    fn test_key_is_independent_of_map_insertion_order() {
        let mut a = HashMap::new();
        a.insert("x".to_string(), 1);
        a.insert("y".to_string(), 2);
        let mut b = HashMap::new();
        b.insert("y".to_string(), 2);
        b.insert("x".to_string(), 1);
        assert_eq!(cache_key(&a).ok(), cache_key(&b).ok());
    }

    #[test]
    fn test_unrepresentable_arguments_are_an_error() {
        let mut by_pair: BTreeMap<(i32, i32), i32> = BTreeMap::new();
        by_pair.insert((1, 2), 3);
        let mut size = memoize(|m: BTreeMap<(i32, i32), i32>| m.len());
        assert!(matches!(
            size.call(by_pair),
            Err(crate::error::Error::Serialization(_))
        ));
        assert!(size.is_empty());
    }

    #[test]
    fn test_bounded_cache_evicts_least_recently_used() {
        let counter = CallCounter::new();
        let calls = counter.clone();
        let capacity = NonZeroUsize::new(2).unwrap_or(NonZeroUsize::MIN);
        let mut double = Memoize::with_capacity(
            move |n: i32| {
                calls.hit();
                n * 2
            },
            capacity,
        );

        for n in [1, 2, 1, 3] {
            assert!(double.call(n).is_ok());
        }
        assert_eq!(counter.count(), 3);
        assert_eq!(double.len(), 2);

        // 2 was the least recently used entry when 3 arrived
        assert!(double.call(2).is_ok());
        assert_eq!(counter.count(), 4);
    }

    #[test]
    fn test_from_config_zero_capacity_is_unbounded() {
        let config = MemoizeConfig { capacity: Some(0) };
        let mut identity = Memoize::from_config(|n: i32| n, &config);
        for n in 0..10 {
            assert!(identity.call(n).is_ok());
        }
        assert_eq!(identity.len(), 10);
    }

    #[test]
    fn test_clear() {
        let mut identity = memoize(|n: i32| n);
        assert!(identity.call(1).is_ok());
        identity.clear();
        assert!(identity.is_empty());
    }
}
