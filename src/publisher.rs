//! Publishing facades over target types.
//!
//! A facade is a plain Rust type implementing [`Facade`], usually generated by the
//! [`facade!`](crate::facade) macro. Publishing binds it to a target: an instance of an
//! [`Exposed`] type, or the type alone for static-only facades.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use publisher::{facade, publish, Publisher};
//! # use publisher::metadata::{Exposed, TargetType};
//! #
//! # struct Counter { step: i32 }
//! #
//! # impl Exposed for Counter {
//! #     fn expose() -> TargetType {
//! #         TargetType::builder::<Counter>("Counter")
//! #             .instance_method("advance", |this: &Counter, (from,): (i32,)| from + this.step)
//! #             .static_method("zero", |(): ()| 0_i32)
//! #             .build()
//! #     }
//! # }
//!
//! facade! {
//!     pub struct SCounter {
//!         #[slot(0)] fn advance(from: i32) -> i32;
//!         #[slot(1)] fn zero() -> i32;
//!     }
//! }
//!
//! let counter: SCounter = publish(Arc::new(Counter { step: 2 }))?;
//! assert_eq!(counter.advance(40)?, 42);
//!
//! let publisher = Publisher::<SCounter>::create()?;
//! assert_eq!(publisher.strategy().to_string(), "Indexed-Slot");
//! # Ok::<(), publisher::Error>(())
//! ```

use std::{marker::PhantomData, sync::Arc};

use crate::{
    dispatch::{Dispatch, Target},
    metadata::{Exposed, FacadeDescriptor},
    policy::{PublishingPolicy, Strategy},
    registry::Registry,
    Result,
};

/// A facade interface: a typed front for the members of some target type.
pub trait Facade: Sized + 'static {
    /// Describes the facade's methods and caching configuration.
    fn descriptor() -> FacadeDescriptor;

    /// Wraps a bound dispatch.
    fn from_dispatch(dispatch: Dispatch) -> Self;

    /// The dispatch behind this facade.
    fn dispatch(&self) -> &Dispatch;
}

/// Factory of facades of type `F`.
///
/// Holds the policy of `F`, so repeated publishes skip the registry lookup.
pub struct Publisher<F: Facade> {
    policy: Arc<PublishingPolicy>,
    _facade: PhantomData<fn() -> F>,
}

impl<F: Facade> Clone for Publisher<F> {
    fn clone(&self) -> Self {
        Publisher {
            policy: Arc::clone(&self.policy),
            _facade: PhantomData,
        }
    }
}

impl<F: Facade> std::fmt::Debug for Publisher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<F: Facade> Publisher<F> {
    /// Creates a publisher backed by the global registry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidFacadeType`] or [`crate::Error::Validation`] if `F` cannot
    /// be published.
    pub fn create() -> Result<Self> {
        Self::create_in(Registry::global())
    }

    /// Creates a publisher backed by `registry`.
    ///
    /// # Errors
    ///
    /// See [`Publisher::create`].
    pub fn create_in(registry: &Registry) -> Result<Self> {
        Ok(Publisher {
            policy: registry.get_or_create::<F>()?,
            _facade: PhantomData,
        })
    }

    /// The caching strategy selected for `F`.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.policy.strategy()
    }

    /// Binds a facade to `instance`.
    ///
    /// Every facade method can reach both instance and static members of `T`.
    pub fn publish_instance<T: Exposed>(&self, instance: Arc<T>) -> F {
        let table = self.policy.table_for::<T>();
        F::from_dispatch(Dispatch::new(
            Arc::clone(&self.policy),
            table,
            Target::Instance(instance),
        ))
    }

    /// Binds a facade to the target type `T` alone.
    ///
    /// Calls that reach an instance member of `T` fail with
    /// [`crate::Error::StaticInstanceMismatch`].
    pub fn publish_static<T: Exposed>(&self) -> F {
        let table = self.policy.table_for::<T>();
        F::from_dispatch(Dispatch::new(
            Arc::clone(&self.policy),
            table,
            Target::Static,
        ))
    }
}

/// Publishes facade `F` over `instance`, using the global registry.
///
/// # Errors
///
/// Returns the setup errors of [`Publisher::create`].
pub fn publish<F: Facade, T: Exposed>(instance: Arc<T>) -> Result<F> {
    Ok(Publisher::<F>::create()?.publish_instance(instance))
}

/// Publishes facade `F` over the static members of `T`, using the global registry.
///
/// # Errors
///
/// Returns the setup errors of [`Publisher::create`].
pub fn publish_static<F: Facade, T: Exposed>() -> Result<F> {
    Ok(Publisher::<F>::create()?.publish_static::<T>())
}
