//! Publishing policies: strategy selection and per-target member caches.
//!
//! A [`PublishingPolicy`] is created once per facade interface. It holds the facade descriptor,
//! the caching [`Strategy`] chosen for it by [`select_strategy`], and one [`MemberCache`] per
//! target type the facade has been published against.
//!
//! # Key Components
//!
//! - [`Strategy`] - The four caching strategies
//! - [`select_strategy`] - Marker precedence and slot-index validation
//! - [`MemberCache`] - Lazy, memoized facade-method to member mapping
//! - [`PublisherConfig`] - Member resolver and identity hasher shared by all policies
//!
//! # Target Tables
//!
//! Tables are keyed by the (facade, target type) pair, never by the facade alone. Publishing one
//! facade against two different target types therefore yields two independent caches, and a
//! member resolved for one target is never handed to a call on the other. Instances are bound
//! per publish by [`crate::Dispatch`], so any number of instances of one target type share a
//! table.

mod cache;
mod config;
mod validator;

pub use cache::MemberCache;
pub use config::{identity_hash, IdentityHasher, PublisherConfig};
pub use validator::select_strategy;

use std::{any::TypeId, sync::Arc};

use dashmap::DashMap;
use strum::{Display, EnumIter};

use crate::{
    metadata::{Exposed, FacadeDescriptor},
    Error, Result,
};

/// Caching strategy of a facade interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Strategy {
    /// Resolve the member on every call
    #[strum(serialize = "No-Cache")]
    NoCache,
    /// Fixed array addressed by validated slot indices
    #[strum(serialize = "Indexed-Slot")]
    IndexedSlot,
    /// Hash map keyed by the facade method's identity hash
    #[strum(serialize = "Identity-Hash")]
    IdentityHash,
    /// Concurrent hash map keyed by the facade method's identity hash
    #[strum(serialize = "Concurrent Identity-Hash")]
    ConcurrentIdentityHash,
}

/// The cached publishing state of one facade interface.
pub struct PublishingPolicy {
    descriptor: Arc<FacadeDescriptor>,
    strategy: Strategy,
    config: PublisherConfig,
    tables: DashMap<TypeId, Arc<MemberCache>>,
}

impl PublishingPolicy {
    /// Creates the policy of `descriptor`, selecting its caching strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFacadeType`] if the descriptor is not an interface, or
    /// [`Error::Validation`] if its slot-index scheme is malformed.
    pub fn new(descriptor: Arc<FacadeDescriptor>, config: PublisherConfig) -> Result<Self> {
        if !descriptor.is_interface() {
            return Err(Error::InvalidFacadeType(descriptor.name.clone()));
        }

        let strategy = select_strategy(&descriptor)?;
        tracing::debug!(
            facade = %descriptor.name,
            methods = descriptor.methods.len(),
            %strategy,
            "selected caching strategy"
        );

        Ok(PublishingPolicy {
            descriptor,
            strategy,
            config,
            tables: DashMap::new(),
        })
    }

    /// The facade descriptor this policy serves.
    #[must_use]
    pub fn descriptor(&self) -> &Arc<FacadeDescriptor> {
        &self.descriptor
    }

    /// The selected caching strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of target types this facade has been published against.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.tables.len()
    }

    /// Returns the member cache for target type `T`, creating it on first use.
    ///
    /// `T::expose()` runs at most once per policy and target type.
    pub fn table_for<T: Exposed>(&self) -> Arc<MemberCache> {
        let entry = self.tables.entry(TypeId::of::<T>()).or_insert_with(|| {
            let target = Arc::new(T::expose());
            tracing::debug!(
                facade = %self.descriptor.name,
                target = %target.name,
                strategy = %self.strategy,
                "created member table"
            );
            Arc::new(MemberCache::new(
                self.strategy,
                self.descriptor.methods.len(),
                target,
                &self.config,
            ))
        });
        Arc::clone(entry.value())
    }
}

impl std::fmt::Debug for PublishingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishingPolicy")
            .field("facade", &self.descriptor.name)
            .field("strategy", &self.strategy)
            .field("targets", &self.tables.len())
            .finish_non_exhaustive()
    }
}
