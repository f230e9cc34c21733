//! Facade interface descriptors.
//!
//! A [`FacadeDescriptor`] is the explicit description of a facade interface: its name, its
//! ordered methods and the caching markers attached to it. Descriptors are normally produced by
//! the [`facade!`](crate::facade) macro, but can also be assembled by hand through
//! [`FacadeDescriptor::builder`].
//!
//! # Markers and Slot Indices
//!
//! The caching strategy of a facade is configured by data, not by language attributes:
//!
//! - [`CacheMarkers`] on the descriptor select one of the identity-hash strategies, or force
//!   resolution without caching
//! - An optional slot index on every [`FacadeMethod`] opts into the indexed-slot cache
//!
//! See [`crate::policy::select_strategy`] for how these are combined.

use std::{any::TypeId, sync::Arc};

use bitflags::bitflags;

use crate::metadata::{ParamType, Signature};

bitflags! {
    /// Caching markers attached to a facade interface as a whole.
    ///
    /// The markers are mutually exclusive by precedence: `NO_CACHE` wins over `IDENTITY_HASH`,
    /// which wins over `CONCURRENT_IDENTITY_HASH`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CacheMarkers: u8 {
        /// Resolve the target member on every call
        const NO_CACHE = 0x01;
        /// Cache resolved members keyed by the facade method's identity hash
        const IDENTITY_HASH = 0x02;
        /// Like `IDENTITY_HASH`, backed by a map safe for concurrent first use
        const CONCURRENT_IDENTITY_HASH = 0x04;
    }
}

/// Whether a descriptor describes a pure method contract or a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TypeKind {
    /// A pure method contract; the only kind that can be published as a facade
    Interface,
    /// A concrete type with members
    Class,
}

/// One method of a facade interface.
#[derive(Debug, Clone)]
pub struct FacadeMethod {
    /// Method name as seen by callers of the facade
    pub key: String,
    /// Name of the target member this method forwards to
    pub name: String,
    /// Ordered parameter types
    pub params: Vec<ParamType>,
    /// Return type
    pub returns: ParamType,
    /// Optional slot index used by the indexed-slot cache
    pub slot: Option<i32>,
}

impl FacadeMethod {
    /// Creates a facade method forwarding to the target member `name`.
    pub fn new(name: impl Into<String>, params: Vec<ParamType>, returns: ParamType) -> Self {
        let name = name.into();
        FacadeMethod {
            key: name.clone(),
            name,
            params,
            returns,
            slot: None,
        }
    }

    /// Sets the caller-facing key, when it differs from the target member name.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the slot index.
    #[must_use]
    pub fn with_slot(mut self, slot: i32) -> Self {
        self.slot = Some(slot);
        self
    }

    /// The signature of this method, owned by `owner`.
    #[must_use]
    pub fn signature(&self, owner: &str) -> Signature {
        Signature::new(owner, self.name.clone(), self.params.clone())
    }
}

/// Description of a facade interface.
///
/// Immutable once built. The methods are reference counted so that their addresses stay stable
/// for the lifetime of the descriptor, which the identity-hash strategies rely on.
#[derive(Debug, Clone)]
pub struct FacadeDescriptor {
    /// Identity of the facade, used as the registry key
    pub id: TypeId,
    /// Human readable name used in signatures
    pub name: String,
    /// Interface or concrete type
    pub kind: TypeKind,
    /// Caching markers
    pub markers: CacheMarkers,
    /// Methods in declaration order
    pub methods: Vec<Arc<FacadeMethod>>,
}

impl FacadeDescriptor {
    /// Starts building an interface descriptor identified by the Rust type `F`.
    pub fn builder<F: 'static>(name: impl Into<String>) -> FacadeDescriptorBuilder {
        FacadeDescriptorBuilder {
            descriptor: FacadeDescriptor {
                id: TypeId::of::<F>(),
                name: name.into(),
                kind: TypeKind::Interface,
                markers: CacheMarkers::empty(),
                methods: Vec::new(),
            },
        }
    }

    /// Returns `true` if this descriptor can be published as a facade.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Position of the method with the caller-facing `key`.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.methods.iter().position(|method| method.key == key)
    }
}

/// Builder for [`FacadeDescriptor`].
pub struct FacadeDescriptorBuilder {
    descriptor: FacadeDescriptor,
}

impl FacadeDescriptorBuilder {
    /// Sets the kind of the described type.
    #[must_use]
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.descriptor.kind = kind;
        self
    }

    /// Adds caching markers.
    #[must_use]
    pub fn markers(mut self, markers: CacheMarkers) -> Self {
        self.descriptor.markers |= markers;
        self
    }

    /// Appends a method.
    #[must_use]
    pub fn method(mut self, method: FacadeMethod) -> Self {
        self.descriptor.methods.push(Arc::new(method));
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> FacadeDescriptor {
        self.descriptor
    }
}
