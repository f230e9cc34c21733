//! Process-wide store of publishing policies.
//!
//! The [`Registry`] maps every facade interface to its [`PublishingPolicy`], so that strategy
//! selection and slot validation run once per facade and member tables are shared across all
//! publishes of that facade. Creation is race-tolerant: concurrent first requests for one facade
//! may each build a policy, but exactly one is retained and returned to every caller.
//!
//! Most code uses the lazily initialized [`Registry::global`] through [`crate::Publisher::create`].
//! Separate registries isolate caches, which is mostly useful in tests and benchmarks.

use std::{
    any::TypeId,
    sync::{Arc, OnceLock},
};

use crossbeam_skiplist::SkipMap;

use crate::{
    metadata::FacadeDescriptor,
    policy::{PublisherConfig, PublishingPolicy},
    publisher::Facade,
    Result,
};

/// Store of publishing policies keyed by facade interface.
#[derive(Debug)]
pub struct Registry {
    config: PublisherConfig,
    policies: SkipMap<TypeId, Arc<PublishingPolicy>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PublisherConfig::default())
    }

    /// Creates an empty registry whose policies use `config`.
    #[must_use]
    pub fn with_config(config: PublisherConfig) -> Self {
        Registry {
            config,
            policies: SkipMap::new(),
        }
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// The configuration handed to new policies.
    #[must_use]
    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Returns the policy of facade `F`, creating it on first use.
    ///
    /// The policy is stored under the type of `F`, whatever `id` its descriptor carries, so
    /// two facade types never share a policy.
    ///
    /// # Errors
    ///
    /// Returns the setup errors of [`PublishingPolicy::new`]. Nothing is stored on failure, so
    /// every later request reports the same error.
    pub fn get_or_create<F: Facade>(&self) -> Result<Arc<PublishingPolicy>> {
        if let Some(entry) = self.policies.get(&TypeId::of::<F>()) {
            return Ok(Arc::clone(entry.value()));
        }
        self.get_or_create_with(TypeId::of::<F>(), F::descriptor)
    }

    /// Returns the policy of a hand-built descriptor, creating it on first use.
    ///
    /// The descriptor's `id` is the registry key; a later call with the same `id` returns the
    /// policy built from the first descriptor.
    ///
    /// # Errors
    ///
    /// Returns the setup errors of [`PublishingPolicy::new`].
    pub fn get_or_create_dyn(&self, descriptor: FacadeDescriptor) -> Result<Arc<PublishingPolicy>> {
        if let Some(entry) = self.policies.get(&descriptor.id) {
            return Ok(Arc::clone(entry.value()));
        }
        self.get_or_create_with(descriptor.id, || descriptor)
    }

    fn get_or_create_with(
        &self,
        id: TypeId,
        descriptor: impl FnOnce() -> FacadeDescriptor,
    ) -> Result<Arc<PublishingPolicy>> {
        let descriptor = Arc::new(descriptor());
        let policy = Arc::new(PublishingPolicy::new(descriptor, self.config.clone())?);

        let entry = self.policies.get_or_insert(id, policy);
        Ok(Arc::clone(entry.value()))
    }

    /// Returns the policy of facade `F` if one has been created.
    #[must_use]
    pub fn get<F: Facade>(&self) -> Option<Arc<PublishingPolicy>> {
        self.policies
            .get(&TypeId::of::<F>())
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Number of facades with a policy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns `true` if no policy has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Drops every policy.
    ///
    /// Facades already handed out keep their policy alive and keep working; the next request
    /// for a facade builds a fresh one.
    pub fn clear(&self) {
        self.policies.clear();
    }
}
