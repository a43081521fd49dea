//! Compute-once caches shared across worker threads.
//!
//! Both caches hand out one `Arc` slot per key from a `DashMap` and then
//! initialise the slot outside the map's shard lock, so a computation may
//! freely consult *other* keys of the same cache.
//!
//! - [`SessionCache`]: plain compute-if-absent. Concurrent first accesses of
//!   one key block until the single computation finishes.
//! - [`PostComputeCache`]: two-phase compute-if-absent for classifiers. The
//!   value produced by `create` is published as soon as it exists; `post`
//!   then runs on the creating thread and may look the same key up again
//!   (re-entrant lookups observe the published value).

use crate::error::{InteropError, Result};
use crate::names::ClassId;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, ThreadId};
use tracing::trace;

// =============================================================================
// SessionCache
// =============================================================================

pub struct SessionCache<K, V> {
    name: &'static str,
    slots: DashMap<K, Arc<OnceLock<V>>, FxBuildHasher>,
}

impl<K, V> SessionCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: DashMap::with_hasher(FxBuildHasher),
        }
    }

    fn slot(&self, key: &K) -> Arc<OnceLock<V>> {
        if let Some(slot) = self.slots.get(key) {
            return Arc::clone(&slot);
        }
        Arc::clone(&self.slots.entry(key.clone()).or_default())
    }

    /// Returns the cached value for `key`, computing it at most once.
    ///
    /// `compute` must not request `key` itself.
    pub fn get_or_compute(&self, key: &K, compute: impl FnOnce() -> V) -> V {
        let slot = self.slot(key);
        slot.get_or_init(|| {
            trace!(cache = self.name, key = ?key, "SessionCache::compute");
            compute()
        })
        .clone()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.slots.get(key).and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of computed entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// PostComputeCache
// =============================================================================

struct PostComputeSlot<V> {
    value: OnceLock<Result<V>>,
    builder: Mutex<Option<ThreadId>>,
    failure: OnceLock<InteropError>,
    completed: AtomicBool,
}

impl<V> Default for PostComputeSlot<V> {
    fn default() -> Self {
        Self {
            value: OnceLock::new(),
            builder: Mutex::new(None),
            failure: OnceLock::new(),
            completed: AtomicBool::new(false),
        }
    }
}

/// Classifier cache with early publication.
///
/// Other threads asking for a key only wait for `create`; they never wait
/// for `post`, so two threads finishing mutually dependent classes cannot
/// deadlock. A failure in either phase poisons only its own key.
pub struct PostComputeCache<V> {
    slots: DashMap<ClassId, Arc<PostComputeSlot<V>>, FxBuildHasher>,
}

impl<V: Clone> Default for PostComputeCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> PostComputeCache<V> {
    pub fn new() -> Self {
        Self {
            slots: DashMap::with_capacity_and_hasher(
                crate::limits::CLASS_CACHE_INITIAL_CAPACITY,
                FxBuildHasher,
            ),
        }
    }

    fn slot(&self, key: &ClassId) -> Arc<PostComputeSlot<V>> {
        if let Some(slot) = self.slots.get(key) {
            return Arc::clone(&slot);
        }
        Arc::clone(&self.slots.entry(key.clone()).or_default())
    }

    pub fn get_or_compute(
        &self,
        key: &ClassId,
        create: impl FnOnce() -> Result<V>,
        post: impl FnOnce(&V) -> Result<()>,
    ) -> Result<V> {
        let slot = self.slot(key);
        let current = thread::current().id();

        if slot.value.get().is_none() {
            let builder = slot.builder.lock().map(|guard| *guard).unwrap_or(None);
            if builder == Some(current) {
                return Err(InteropError::ReentrantStructure(key.clone()));
            }
        }

        let mut created_here = false;
        let published = slot.value.get_or_init(|| {
            if let Ok(mut guard) = slot.builder.lock() {
                *guard = Some(current);
            }
            created_here = true;
            trace!(class_id = %key, "PostComputeCache::create");
            create()
        });
        let value = published.clone()?;

        if created_here {
            trace!(class_id = %key, "PostComputeCache::post");
            let outcome = post(&value);
            match outcome {
                Ok(()) => slot.completed.store(true, Ordering::Release),
                Err(error) => {
                    let _ = slot.failure.set(error.clone());
                    return Err(error);
                }
            }
        } else if let Some(error) = slot.failure.get() {
            return Err(InteropError::Poisoned {
                class_id: key.clone(),
                reason: error.to_string(),
            });
        }
        Ok(value)
    }

    /// The published value, if `create` already ran for `key` and neither
    /// phase failed.
    pub fn get(&self, key: &ClassId) -> Option<V> {
        let slot = self.slots.get(key)?;
        if slot.failure.get().is_some() {
            return None;
        }
        slot.value.get().and_then(|value| value.as_ref().ok().cloned())
    }

    pub fn is_completed(&self, key: &ClassId) -> bool {
        self.slots
            .get(key)
            .is_some_and(|slot| slot.completed.load(Ordering::Acquire))
    }
}

#[cfg(test)]
#[path = "../tests/caches_tests.rs"]
mod tests;
