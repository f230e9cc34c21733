//! Member caches behind the four caching strategies.
//!
//! One [`MemberCache`] exists per (facade interface, target type) pair. It maps the methods of
//! the facade onto the members of the target type, resolving lazily through the configured
//! [`MemberResolver`] and memoizing according to its [`Strategy`]. All strategies share one
//! resolution path; they only differ in how a cache key is derived and how an entry is stored.
//!
//! # Strategies
//!
//! | Strategy                   | Key                    | Store                              |
//! |----------------------------|------------------------|------------------------------------|
//! | No-Cache                   | none                   | none, resolves on every call       |
//! | Indexed-Slot               | validated slot index   | fixed array, one slot per method   |
//! | Identity-Hash              | identity hash (`u32`)  | hash map, plain get / put          |
//! | Concurrent Identity-Hash   | identity hash (`u32`)  | concurrent map, insert-if-absent   |
//!
//! # Thread Safety
//!
//! Every cache is memory safe to share, but only the concurrent identity-hash store gives a
//! convergence guarantee for racing first calls: all threads end up with the single retained
//! member for a key. The indexed-slot and identity-hash stores are meant for single-threaded
//! first use; racing first calls may each resolve and use their own lookup result. After
//! [`MemberCache::warm_up`] every store is read-only and can be shared freely.
//!
//! # Key Collisions
//!
//! The identity hash is not unique. When two facade methods share a key, the member resolved for
//! the first one is returned for the second. The dispatch layer detects this and reports
//! [`crate::Error::AmbiguousResolution`]; a better hash is deliberately not attempted.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, RwLock},
};

use dashmap::DashMap;
use rayon::prelude::*;

use crate::{
    metadata::{FacadeMethod, Member, MemberResolver, TargetType},
    policy::{IdentityHasher, PublisherConfig, Strategy},
    Error, Result,
};

/// Cache key of a facade method under a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheKey {
    Uncached,
    Slot(usize),
    Identity(u32),
}

/// Backing storage of a strategy
enum Store {
    Uncached,
    IndexedSlot(Box<[OnceLock<Arc<Member>>]>),
    IdentityHash(RwLock<HashMap<u32, Arc<Member>>>),
    ConcurrentIdentityHash(DashMap<u32, Arc<Member>>),
}

/// Memoized mapping of one facade interface onto one target type.
pub struct MemberCache {
    strategy: Strategy,
    store: Store,
    target: Arc<TargetType>,
    resolver: Arc<dyn MemberResolver>,
    hasher: IdentityHasher,
}

impl MemberCache {
    /// Creates an empty cache for a facade with `method_count` methods.
    #[must_use]
    pub fn new(
        strategy: Strategy,
        method_count: usize,
        target: Arc<TargetType>,
        config: &PublisherConfig,
    ) -> Self {
        let store = match strategy {
            Strategy::NoCache => Store::Uncached,
            Strategy::IndexedSlot => {
                Store::IndexedSlot((0..method_count).map(|_| OnceLock::new()).collect())
            }
            Strategy::IdentityHash => {
                Store::IdentityHash(RwLock::new(HashMap::with_capacity(method_count)))
            }
            Strategy::ConcurrentIdentityHash => {
                Store::ConcurrentIdentityHash(DashMap::with_capacity(method_count))
            }
        };

        MemberCache {
            strategy,
            store,
            target,
            resolver: Arc::clone(&config.resolver),
            hasher: config.identity_hasher,
        }
    }

    /// The strategy this cache implements.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The target type members are resolved against.
    #[must_use]
    pub fn target(&self) -> &Arc<TargetType> {
        &self.target
    }

    /// Number of members currently held by the cache.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Uncached => 0,
            Store::IndexedSlot(slots) => slots.iter().filter(|slot| slot.get().is_some()).count(),
            Store::IdentityHash(map) => read_lock!(map).len(),
            Store::ConcurrentIdentityHash(map) => map.len(),
        }
    }

    /// Returns `true` if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the member for `method`, resolving and storing it on a miss.
    ///
    /// `owner` names the facade interface in diagnostics. The returned member is whatever the
    /// cache holds for the method's key; under the identity-hash strategies it may belong to
    /// another method whose key collided.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameConflict`] if the target type has no member with the method's name
    /// and parameter types.
    pub fn resolve(&self, method: &FacadeMethod, owner: &str) -> Result<Arc<Member>> {
        let key = self.key(method)?;
        if let Some(member) = self.lookup(key) {
            return Ok(member);
        }

        tracing::trace!(
            facade = owner,
            target = %self.target.name,
            method = %method.name,
            strategy = %self.strategy,
            "resolving target member"
        );
        let member = self
            .resolver
            .resolve(&self.target, &method.name, &method.params)
            .ok_or_else(|| Error::NameConflict(method.signature(owner)))?;

        Ok(self.store(key, member))
    }

    /// Resolves every method up front.
    ///
    /// The concurrent identity-hash store is populated in parallel; the others sequentially.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::NameConflict`] encountered.
    pub fn warm_up(&self, methods: &[Arc<FacadeMethod>], owner: &str) -> Result<()> {
        if matches!(self.store, Store::ConcurrentIdentityHash(_)) {
            return methods
                .par_iter()
                .try_for_each(|method| self.resolve(method, owner).map(|_| ()));
        }

        for method in methods {
            self.resolve(method, owner)?;
        }
        Ok(())
    }

    fn key(&self, method: &FacadeMethod) -> Result<CacheKey> {
        match &self.store {
            Store::Uncached => Ok(CacheKey::Uncached),
            Store::IndexedSlot(slots) => match method.slot {
                Some(slot) if (slot as usize) < slots.len() => Ok(CacheKey::Slot(slot as usize)),
                _ => Err(internal_error!(
                    "facade method '{}' has no valid slot index",
                    method.key
                )),
            },
            Store::IdentityHash(_) | Store::ConcurrentIdentityHash(_) => {
                Ok(CacheKey::Identity((self.hasher)(method)))
            }
        }
    }

    fn lookup(&self, key: CacheKey) -> Option<Arc<Member>> {
        match (&self.store, key) {
            (Store::IndexedSlot(slots), CacheKey::Slot(slot)) => slots[slot].get().cloned(),
            (Store::IdentityHash(map), CacheKey::Identity(hash)) => {
                read_lock!(map).get(&hash).cloned()
            }
            (Store::ConcurrentIdentityHash(map), CacheKey::Identity(hash)) => {
                map.get(&hash).map(|entry| Arc::clone(entry.value()))
            }
            _ => None,
        }
    }

    fn store(&self, key: CacheKey, member: Arc<Member>) -> Arc<Member> {
        match (&self.store, key) {
            (Store::IndexedSlot(slots), CacheKey::Slot(slot)) => {
                // A racing first call may have filled the slot; keep ours for this call.
                let _ = slots[slot].set(Arc::clone(&member));
                member
            }
            (Store::IdentityHash(map), CacheKey::Identity(hash)) => {
                write_lock!(map).insert(hash, Arc::clone(&member));
                member
            }
            (Store::ConcurrentIdentityHash(map), CacheKey::Identity(hash)) => {
                Arc::clone(map.entry(hash).or_insert(member).value())
            }
            _ => member,
        }
    }
}

impl std::fmt::Debug for MemberCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberCache")
            .field("strategy", &self.strategy)
            .field("target", &self.target.name)
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}
