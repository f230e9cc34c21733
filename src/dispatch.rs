//! The call path behind every facade.
//!
//! A [`Dispatch`] binds a facade interface to one target: either an instance, or a target type
//! alone for static dispatch. Each call locates the facade method, checks the arguments against
//! the method's own declaration, asks the member cache for the member and verifies that the
//! member actually fits the call before invoking it.
//!
//! The verification step is what turns a cache-key collision into
//! [`Error::AmbiguousResolution`] instead of a silently wrong result: the member a cache hands
//! back must match the facade method by name, parameter types and return type.

use std::{any::Any, fmt, sync::Arc};

use crate::{
    metadata::{FacadeMethod, Member, MemberKind, ParamType, Receiver, Signature, Value},
    policy::{MemberCache, PublishingPolicy, Strategy},
    Error, Result,
};

/// What a dispatch forwards to.
#[derive(Clone)]
pub enum Target {
    /// An instance of the target type; instance and static members are both reachable
    Instance(Receiver),
    /// The target type alone; only static members are reachable
    Static,
}

/// Forwarding state of one published facade.
///
/// Cloning is cheap; clones share the policy, the member cache and the bound instance.
#[derive(Clone)]
pub struct Dispatch {
    policy: Arc<PublishingPolicy>,
    cache: Arc<MemberCache>,
    target: Target,
}

impl Dispatch {
    /// Binds `cache` to `target` under `policy`.
    pub(crate) fn new(
        policy: Arc<PublishingPolicy>,
        cache: Arc<MemberCache>,
        target: Target,
    ) -> Self {
        Dispatch {
            policy,
            cache,
            target,
        }
    }

    /// The caching strategy of the facade.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.policy.strategy()
    }

    /// Returns `true` if this dispatch has no bound instance.
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self.target, Target::Static)
    }

    /// Number of members the underlying cache holds.
    ///
    /// Shared by every facade of the same interface published against the same target type.
    #[must_use]
    pub fn cached_members(&self) -> usize {
        self.cache.len()
    }

    /// Resolves every facade method ahead of the first call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameConflict`] if any facade method has no matching member.
    pub fn warm_up(&self) -> Result<()> {
        let descriptor = self.policy.descriptor();
        self.cache.warm_up(&descriptor.methods, &descriptor.name)
    }

    /// Calls facade method `index` and downcasts the result to `R`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentMismatch`] if `R` is not the method's declared return type, plus
    /// every error of [`Dispatch::invoke_value`].
    pub fn invoke<R: Any>(&self, index: usize, args: Vec<Value>) -> Result<R> {
        let method = self.method(index)?;
        if ParamType::of::<R>() != method.returns {
            return Err(Error::ArgumentMismatch(
                method.signature(&self.policy.descriptor().name),
            ));
        }

        let value = self.call(method, args)?;
        value
            .downcast::<R>()
            .map(|value| *value)
            .map_err(|_| internal_error!("member returned a value that is not {}", method.returns))
    }

    /// Calls facade method `index` and returns the type-erased result.
    ///
    /// # Errors
    ///
    /// - [`Error::NoSuchFacadeMethod`] if `index` is outside of the facade
    /// - [`Error::ArgumentMismatch`] if `args` do not fit the method's parameter types
    /// - [`Error::NameConflict`] if the target type has no matching member
    /// - [`Error::AmbiguousResolution`] if the cache returned a member of another method
    /// - [`Error::StaticInstanceMismatch`] if a static dispatch reached an instance member
    pub fn invoke_value(&self, index: usize, args: Vec<Value>) -> Result<Value> {
        let method = self.method(index)?;
        self.call(method, args)
    }

    fn method(&self, index: usize) -> Result<&FacadeMethod> {
        self.policy
            .descriptor()
            .methods
            .get(index)
            .map(|method| &**method)
            .ok_or(Error::NoSuchFacadeMethod(index))
    }

    fn call(&self, method: &FacadeMethod, args: Vec<Value>) -> Result<Value> {
        let owner = &self.policy.descriptor().name;
        let expected = method.signature(owner);
        if !expected.accepts(&args) {
            return Err(Error::ArgumentMismatch(expected));
        }

        let member = self.cache.resolve(method, owner)?;
        self.verify(method, &member, expected)?;

        match &self.target {
            Target::Instance(receiver) => member.invoke(Some(&**receiver), args),
            Target::Static => member.invoke(None, args),
        }
    }

    fn verify(&self, method: &FacadeMethod, member: &Member, expected: Signature) -> Result<()> {
        if !member.signature.matches(&method.name, &method.params)
            || member.returns != method.returns
        {
            tracing::warn!(
                expected = %expected,
                found = %member.signature,
                strategy = %self.strategy(),
                "cache returned a member of another facade method"
            );
            return Err(Error::AmbiguousResolution {
                expected,
                found: member.signature.clone(),
            });
        }

        if self.is_static() && member.kind == MemberKind::Instance {
            tracing::warn!(
                member = %member.signature,
                "static dispatch reached an instance member"
            );
            return Err(Error::StaticInstanceMismatch(member.signature.clone()));
        }

        Ok(())
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("facade", &self.policy.descriptor().name)
            .field("target", &self.cache.target().name)
            .field("strategy", &self.strategy())
            .field("static", &self.is_static())
            .finish_non_exhaustive()
    }
}
