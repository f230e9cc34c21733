//! # publisher Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the publisher library. Import this module to get quick access to everything needed
//! to describe a target type, declare a facade and publish it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all publisher operations
pub use crate::Error;

/// Malformed slot-index schemes
pub use crate::ValidationError;

/// The result type used throughout publisher
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Facade trait, publisher and the free publishing functions
pub use crate::{publish, publish_static, Facade, Publisher};

/// Declarative facade definitions
pub use crate::{args, facade};

/// Policy store and configuration
pub use crate::{PublisherConfig, Registry, Strategy};

/// Forwarding state behind every facade
pub use crate::Dispatch;

// ================================================================================================
// Metadata
// ================================================================================================

/// Target types and member resolution
pub use crate::metadata::{Exposed, MemberKind, MemberResolver, TargetType};

/// Facade descriptors
pub use crate::metadata::{CacheMarkers, FacadeDescriptor, FacadeMethod, TypeKind};

/// Signatures and type-erased values
pub use crate::metadata::{ParamType, Signature, Value};
