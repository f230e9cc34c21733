//! Target types and their member dispatch tables.
//!
//! A [`TargetType`] is the explicit dispatch table of a type whose members are otherwise out of
//! reach: every member is registered once, together with a bound invoker, by implementing
//! [`Exposed`] for the type. Member lookup goes through a [`MemberResolver`], which by default
//! matches declared members by exact name and exact parameter-type sequence.
//!
//! # Examples
//!
//! ```rust
//! use publisher::metadata::{Exposed, ParamType, TargetType};
//!
//! struct Counter { step: i32 }
//!
//! impl Counter {
//!     fn advance(&self, from: i32) -> i32 { from + self.step }
//!     fn zero() -> i32 { 0 }
//! }
//!
//! impl Exposed for Counter {
//!     fn expose() -> TargetType {
//!         TargetType::builder::<Counter>("Counter")
//!             .instance_method("advance", |this: &Counter, (from,): (i32,)| this.advance(from))
//!             .static_method("zero", |(): ()| Counter::zero())
//!             .build()
//!     }
//! }
//!
//! let table = Counter::expose();
//! assert_eq!(table.name, "Counter");
//! assert_eq!(table.members().len(), 2);
//! assert!(table.find_declared("advance", &[ParamType::of::<i32>()]).is_some());
//! assert!(table.find_declared("advance", &[ParamType::of::<i64>()]).is_none());
//! ```

use std::{
    any::{Any, TypeId},
    fmt,
    marker::PhantomData,
    sync::Arc,
};

use crate::{
    metadata::{
        ArgTuple, FacadeDescriptor, FacadeMethod, ParamType, Signature, TypeKind, Value,
    },
    Result,
};

/// A type-erased receiver instance.
pub type Receiver = Arc<dyn Any + Send + Sync>;

/// A bound member invoker: receiver (absent for static calls) and arguments in, result out.
pub type Invoker =
    Arc<dyn Fn(Option<&(dyn Any + Send + Sync)>, Vec<Value>) -> Result<Value> + Send + Sync>;

/// Whether a member can be called without an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MemberKind {
    /// Callable without an instance
    Static,
    /// Needs an instance of the target type
    Instance,
}

/// A member of a target type, bound to its invoker.
pub struct Member {
    /// Name and parameter types, owned by the target type
    pub signature: Signature,
    /// Return type
    pub returns: ParamType,
    /// Static or instance member
    pub kind: MemberKind,
    invoker: Invoker,
}

impl Member {
    /// Calls the member.
    ///
    /// `receiver` must be an instance of the declaring target type for instance members; static
    /// members ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Error`] if the receiver or the arguments are not of the
    /// declared types.
    pub fn invoke(
        &self,
        receiver: Option<&(dyn Any + Send + Sync)>,
        args: Vec<Value>,
    ) -> Result<Value> {
        (self.invoker)(receiver, args)
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("signature", &self.signature)
            .field("returns", &self.returns)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Dispatch table of one target type.
#[derive(Debug)]
pub struct TargetType {
    /// Identity of the described Rust type
    pub id: TypeId,
    /// Human readable name used in signatures
    pub name: String,
    /// Always [`TypeKind::Class`] for registered targets
    pub kind: TypeKind,
    members: Vec<Arc<Member>>,
}

impl TargetType {
    /// Starts building the dispatch table of `T`.
    pub fn builder<T: Any + Send + Sync>(name: impl Into<String>) -> TargetTypeBuilder<T> {
        TargetTypeBuilder {
            target: TargetType {
                id: TypeId::of::<T>(),
                name: name.into(),
                kind: TypeKind::Class,
                members: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    /// All declared members in registration order.
    #[must_use]
    pub fn members(&self) -> &[Arc<Member>] {
        &self.members
    }

    /// Finds the declared member with exactly this name and parameter-type sequence.
    #[must_use]
    pub fn find_declared(&self, name: &str, params: &[ParamType]) -> Option<&Arc<Member>> {
        self.members
            .iter()
            .find(|member| member.signature.matches(name, params))
    }

    /// Views this concrete type as a method contract.
    ///
    /// The resulting descriptor is of kind [`TypeKind::Class`] and is rejected when published
    /// as a facade.
    #[must_use]
    pub fn as_facade(&self) -> FacadeDescriptor {
        let mut descriptor = FacadeDescriptor {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            markers: crate::metadata::CacheMarkers::empty(),
            methods: Vec::with_capacity(self.members.len()),
        };
        for member in &self.members {
            descriptor.methods.push(Arc::new(FacadeMethod::new(
                member.signature.name.clone(),
                member.signature.params.clone(),
                member.returns,
            )));
        }
        descriptor
    }
}

/// Builder for [`TargetType`].
pub struct TargetTypeBuilder<T> {
    target: TargetType,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TargetTypeBuilder<T> {
    /// Registers a member that needs an instance of `T`.
    ///
    /// The parameter-type sequence of the member is taken from the tuple type `A`.
    #[must_use]
    pub fn instance_method<A, R, F>(mut self, name: &str, member: F) -> Self
    where
        A: ArgTuple,
        R: Any + Send,
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        let signature = Signature::new(self.target.name.clone(), name, A::param_types());
        let diagnostic = signature.clone();
        let invoker: Invoker = Arc::new(
            move |receiver: Option<&(dyn Any + Send + Sync)>, args: Vec<Value>| {
                let this = receiver
                    .and_then(|receiver| receiver.downcast_ref::<T>())
                    .ok_or_else(|| internal_error!("receiver does not fit {}", diagnostic))?;
                let args = A::from_values(args)
                    .ok_or_else(|| internal_error!("arguments do not fit {}", diagnostic))?;
                Ok(Box::new(member(this, args)) as Value)
            },
        );

        self.push(signature, ParamType::of::<R>(), MemberKind::Instance, invoker);
        self
    }

    /// Registers a member callable without an instance.
    #[must_use]
    pub fn static_method<A, R, F>(mut self, name: &str, member: F) -> Self
    where
        A: ArgTuple,
        R: Any + Send,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let signature = Signature::new(self.target.name.clone(), name, A::param_types());
        let diagnostic = signature.clone();
        let invoker: Invoker = Arc::new(
            move |_: Option<&(dyn Any + Send + Sync)>, args: Vec<Value>| {
                let args = A::from_values(args)
                    .ok_or_else(|| internal_error!("arguments do not fit {}", diagnostic))?;
                Ok(Box::new(member(args)) as Value)
            },
        );

        self.push(signature, ParamType::of::<R>(), MemberKind::Static, invoker);
        self
    }

    fn push(
        &mut self,
        signature: Signature,
        returns: ParamType,
        kind: MemberKind,
        invoker: Invoker,
    ) {
        self.target.members.push(Arc::new(Member {
            signature,
            returns,
            kind,
            invoker,
        }));
    }

    /// Finishes the dispatch table.
    #[must_use]
    pub fn build(self) -> TargetType {
        self.target
    }
}

/// A type whose members can be reached through a facade.
///
/// Implementations describe the type's dispatch table; it is built once per facade and target type.
pub trait Exposed: Any + Send + Sync {
    /// Builds the dispatch table of this type.
    fn expose() -> TargetType;
}

/// Lookup primitive behind every caching strategy.
///
/// Given a target type, a member name and a parameter-type sequence, returns the matching member
/// or `None`. Implementations must be deterministic for a given target type.
pub trait MemberResolver: Send + Sync {
    /// Resolves a member on `target`.
    fn resolve(&self, target: &TargetType, name: &str, params: &[ParamType])
        -> Option<Arc<Member>>;
}

/// Resolves members declared directly on the target type by exact name and parameter types.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredMemberResolver;

impl MemberResolver for DeclaredMemberResolver {
    fn resolve(
        &self,
        target: &TargetType,
        name: &str,
        params: &[ParamType],
    ) -> Option<Arc<Member>> {
        target.find_declared(name, params).cloned()
    }
}
