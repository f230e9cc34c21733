//! Publishing configuration
//!
//! Collects the collaborators a registry hands to every policy it creates: the member lookup
//! primitive and the identity hasher used by the identity-hash strategies.

use std::{fmt, sync::Arc};

use crate::metadata::{DeclaredMemberResolver, FacadeMethod, MemberResolver};

/// Derives the identity-hash cache key of a facade method.
pub type IdentityHasher = fn(&FacadeMethod) -> u32;

/// Identity hash of a facade method: its address folded into 32 bits.
///
/// Distinct methods of one descriptor usually get distinct keys, but nothing guarantees it. A
/// collision makes the identity-hash strategies return the member cached for the other method,
/// which surfaces as [`crate::Error::AmbiguousResolution`].
#[must_use]
pub fn identity_hash(method: &FacadeMethod) -> u32 {
    let address = method as *const FacadeMethod as usize as u64;
    ((address >> 32) ^ address) as u32
}

/// Configuration shared by every policy of a registry
#[derive(Clone)]
pub struct PublisherConfig {
    /// Lookup primitive behind every caching strategy
    pub resolver: Arc<dyn MemberResolver>,

    /// Key derivation for the identity-hash strategies
    pub identity_hasher: IdentityHasher,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            resolver: Arc::new(DeclaredMemberResolver),
            identity_hasher: identity_hash,
        }
    }
}

impl PublisherConfig {
    /// Uses `resolver` for member lookup.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn MemberResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Uses `hasher` to derive identity-hash cache keys.
    #[must_use]
    pub fn with_identity_hasher(mut self, hasher: IdentityHasher) -> Self {
        self.identity_hasher = hasher;
        self
    }

    /// Creates a configuration whose identity hasher maps every method onto one key
    ///
    /// Makes the key collisions of the identity-hash strategies deterministic, for exercising
    /// ambiguous resolution.
    #[must_use]
    pub fn colliding() -> Self {
        Self::default().with_identity_hasher(|_| 0)
    }
}

impl fmt::Debug for PublisherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublisherConfig")
            .field("identity_hasher", &(self.identity_hasher as usize))
            .finish_non_exhaustive()
    }
}
