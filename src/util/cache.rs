/*!
A small read-through cache shared across threads.

Values are computed without holding any lock. If two threads race to fill the
same key, both compute the value and the last one to acquire the write lock
wins. Since cached values are pure functions of their keys, the only cost of
a race is redundant work.
*/

use std::{collections::HashMap, hash::Hash, sync::RwLock};

#[derive(Debug)]
pub(crate) struct Cache<K, V> {
    map: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    pub(crate) fn new() -> Cache<K, V> {
        Cache { map: RwLock::new(HashMap::new()) }
    }

    /// Returns the value for the given key, if one has been cached.
    pub(crate) fn get(&self, key: &K) -> Option<V> {
        self.map.read().unwrap().get(key).cloned()
    }

    /// Returns the cached value for the given key or computes it with
    /// `create` and publishes it.
    pub(crate) fn get_or_insert_with(
        &self,
        key: K,
        create: impl FnOnce(&K) -> V,
    ) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = create(&key);
        self.map.write().unwrap().insert(key, value.clone());
        value
    }

    /// Like `get_or_insert_with`, but the computation may fail. Failures are
    /// not cached.
    pub(crate) fn get_or_try_insert_with<E>(
        &self,
        key: K,
        create: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = create(&key)?;
        self.map.write().unwrap().insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once() {
        let cache: Cache<&str, usize> = Cache::new();
        assert_eq!(cache.get_or_insert_with("abc", |k| k.len()), 3);
        assert_eq!(cache.get_or_insert_with("abc", |_| unreachable!()), 3);
        assert_eq!(cache.get(&"xyz"), None);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache: Cache<u8, u8> = Cache::new();
        let got: Result<u8, &str> =
            cache.get_or_try_insert_with(1, |_| Err("nope"));
        assert!(got.is_err());
        let got: Result<u8, &str> = cache.get_or_try_insert_with(1, |_| Ok(5));
        assert_eq!(got, Ok(5));
    }
}
