//! Time-bounded response cache shared by every `use_api` call under one
//! `ContextProvider<ResponseCache>`.

use jiff::{SignedDuration, Timestamp};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::time::TimeSource;

struct CacheEntry {
    value: Box<dyn Any>,
    stored_at: Timestamp,
}

/// Responses keyed by request path (query string included).
///
/// Cloning yields another handle to the same entries. Two handles compare
/// equal when they share entries, which is what `ContextProvider` needs to
/// decide whether consumers must re-render.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Rc<RefCell<HashMap<String, CacheEntry>>>,
    time_source: TimeSource,
}

impl PartialEq for ResponseCache {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(TimeSource::new())
    }
}

impl ResponseCache {
    pub fn new(time_source: TimeSource) -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
            time_source,
        }
    }

    /// The value stored for `path`, unless it is older than `cache_time` or
    /// was stored with a different type.
    pub fn get<T: Clone + 'static>(
        &self,
        path: &str,
        cache_time: SignedDuration,
    ) -> Option<T> {
        let entries = self.entries.borrow();
        let entry = entries.get(path)?;
        let age = self.time_source.now().duration_since(entry.stored_at);
        if age > cache_time {
            tracing::debug!(path, %age, "Cache entry is stale");
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Store `value` for `path`, replacing any previous entry.
    pub fn insert<T: 'static>(&self, path: impl Into<String>, value: T) {
        let entry = CacheEntry {
            value: Box::new(value),
            stored_at: self.time_source.now(),
        };
        self.entries.borrow_mut().insert(path.into(), entry);
    }

    /// Returns true if an entry was removed.
    pub fn invalidate(&self, path: &str) -> bool {
        self.entries.borrow_mut().remove(path).is_some()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Drop every entry older than `ttl`, returning how many were dropped.
    pub fn evict_older_than(&self, ttl: SignedDuration) -> usize {
        let now = self.time_source.now();
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.stored_at) <= ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
