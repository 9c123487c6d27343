//! Shared cache of immutable resources keyed by path.

use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type Entries<T> = RwLock<HashMap<PathBuf, Arc<T>>>;

/// Path to `Arc<T>` map, lazily created and safe to share between threads.
///
/// Values are never mutated once cached. `new` is `const`, so a cache can
/// live in a `static`.
pub struct ResourceCache<T> {
    entries: OnceLock<Entries<T>>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceCache<T> {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self { entries: OnceLock::new() }
    }

    fn entries(&self) -> &Entries<T> {
        self.entries.get_or_init(|| RwLock::new(HashMap::new()))
    }

    /// Cached value for `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<T>> {
        let entries = self.entries().read().unwrap_or_else(PoisonError::into_inner);
        entries.get(path.as_ref()).cloned()
    }

    /// True when `path` is cached.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.get(path).is_some()
    }

    /// Cache a value, returning the shared handle.
    ///
    /// A value already cached under `path` wins and is returned instead.
    pub fn insert(&self, path: impl Into<PathBuf>, value: T) -> Arc<T> {
        let mut entries = self.entries().write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(path.into()).or_insert_with(|| Arc::new(value)).clone()
    }

    /// Cached value for `path`, loading it with `load` on a miss.
    ///
    /// Failed loads are not cached.
    pub fn load<F>(&self, path: impl AsRef<Path>, load: F) -> Result<Arc<T>>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let path = path.as_ref();
        if let Some(value) = self.get(path) {
            return Ok(value);
        }
        let value = load(path)?;
        log::debug!("cached {}", path.display());
        Ok(self.insert(path, value))
    }

    /// Drop the entry for `path`. Outstanding handles stay valid.
    pub fn remove(&self, path: impl AsRef<Path>) -> Option<Arc<T>> {
        let mut entries = self.entries().write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(path.as_ref())
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries().read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries().write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::thread;

    #[test]
    fn test_load_once() {
        let cache = ResourceCache::new();
        let mut calls = 0;
        let a = cache.load("a.txt", |_| {
            calls += 1;
            Ok(1)
        });
        let b = cache.load("a.txt", |_| Ok(2));
        assert_eq!(calls, 1);
        assert!(matches!((a, b), (Ok(a), Ok(b)) if Arc::ptr_eq(&a, &b) && *a == 1));
    }

    #[test]
    fn test_failed_load_not_cached() {
        let cache: ResourceCache<u32> = ResourceCache::new();
        let err = cache.load("missing.png", |p| Err(Error::ResourceMissing(p.to_path_buf())));
        assert_eq!(err, Err(Error::ResourceMissing(PathBuf::from("missing.png"))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_between_threads() {
        static CACHE: ResourceCache<String> = ResourceCache::new();
        let handles: Vec<_> = (0..4)
            .map(|i| thread::spawn(move || CACHE.insert("shared", format!("value {}", i))))
            .collect();
        let values: Vec<Arc<String>> = handles.into_iter().filter_map(|h| h.join().ok()).collect();
        assert_eq!(values.len(), 4);
        assert!(values.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(CACHE.len(), 1);
    }

    #[test]
    fn test_remove_keeps_handles() {
        let cache = ResourceCache::new();
        let handle = cache.insert("x", 5u8);
        assert_eq!(cache.remove("x").as_deref(), Some(&5));
        assert_eq!(*handle, 5);
        assert!(!cache.contains("x"));
    }
}
