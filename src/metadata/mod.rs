//! Descriptions of facade interfaces and target types.
//!
//! This module holds the explicit, in-process "metadata" the publishing engine works on. Nothing
//! here is read from language-level attributes; facades and targets describe themselves once,
//! as plain values.
//!
//! # Key Components
//!
//! - [`FacadeDescriptor`] / [`FacadeMethod`] - The facade interface, its methods, markers and slots
//! - [`TargetType`] / [`Member`] - Dispatch table of a type whose members are being reached
//! - [`MemberResolver`] - Lookup primitive matching a facade method to a target member
//! - [`Signature`] / [`ParamType`] - Exact-match keys and diagnostics

mod facade;
mod signature;
mod target;

pub use facade::{CacheMarkers, FacadeDescriptor, FacadeDescriptorBuilder, FacadeMethod, TypeKind};
pub use signature::{ArgTuple, ParamType, Signature, Value};
pub use target::{
    DeclaredMemberResolver, Exposed, Invoker, Member, MemberKind, MemberResolver, Receiver,
    TargetType, TargetTypeBuilder,
};
