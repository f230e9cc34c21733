use thiserror::Error;

use crate::metadata::Signature;

/// Builds an [`Error::Error`] carrying the source location of an internal invariant break.
macro_rules! internal_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Error(format!("{}:{}: {}", file!(), line!(), $msg))
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Error(format!("{}:{}: {}", file!(), line!(), format!($fmt, $($arg)*)))
    };
}

/// A malformed slot-index scheme on a facade interface.
///
/// Raised by the policy validator the first time a strategy is selected for a facade. Every
/// variant is fatal; the facade has to be fixed before it can be published.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Some, but not all, facade methods carry a slot index.
    #[error("Every facade method needs a slot index.")]
    MissingIndex,

    /// At least one slot index is below zero.
    #[error("Slot index values cannot be negative numbers.")]
    NegativeIndex,

    /// Two facade methods declare the same slot index.
    #[error("Same slot index values are not allowed.")]
    DuplicateIndex,

    /// No facade method declares slot index `0`.
    #[error("Slot index values must start from zero (0).")]
    MissingZero,

    /// The slot indices do not form the sequence `0..n`.
    #[error("Slot index values must be sequential.")]
    NotSequential,
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is a distinct, matchable kind so that test code can assert on the exact failure
/// instead of inspecting messages.
///
/// # Error Categories
///
/// ## Setup Errors (raised by `create` / the first `publish`)
/// - [`Error::Validation`] - Malformed slot-index scheme
/// - [`Error::InvalidFacadeType`] - The facade descriptor does not describe an interface
///
/// ## Dispatch Errors (raised by a facade call)
/// - [`Error::NameConflict`] - No target member matches the facade method
/// - [`Error::AmbiguousResolution`] - A collision-prone cache returned the wrong member
/// - [`Error::StaticInstanceMismatch`] - A static dispatch reached an instance-only member
///
/// ## Boundary Misuse (untyped API only)
/// - [`Error::NoSuchFacadeMethod`] - Method index outside of the facade
/// - [`Error::ArgumentMismatch`] - Arguments do not fit the facade method's own declaration
///
/// # Examples
///
/// ```rust,ignore
/// use publisher::{Error, ValidationError};
///
/// match Publisher::<MyFacade>::create() {
///     Ok(publisher) => println!("strategy: {}", publisher.strategy()),
///     Err(Error::Validation(ValidationError::MissingZero)) => eprintln!("slots must start at 0"),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The facade interface carries a malformed slot-index scheme.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The supplied facade descriptor does not describe an interface.
    ///
    /// Only pure method contracts can be published; a concrete type handed in as the facade is
    /// rejected before any strategy work begins.
    #[error("'{0}' is not a facade interface")]
    InvalidFacadeType(String),

    /// The facade interface names a member which does not exist on the target type.
    ///
    /// Matching is by exact name and exact parameter-type sequence.
    #[error(
        "\nFacade interface has a method which does not exist in the published type:\n  {0}\n"
    )]
    NameConflict(Signature),

    /// The member cache handed back a member that does not fit the call.
    ///
    /// Only the identity-hash strategies can produce this: two facade methods shared one
    /// cache key and the first resolution won. Switching the facade to another caching
    /// strategy resolves it.
    #[error(
        "\nA cache key conflict. Change the caching strategy.\n\
         Published type has multiple members which share a cache key and \
         the cache fetched a wrong member.\n  expected: {expected}\n       was: {found}\n"
    )]
    AmbiguousResolution {
        /// Signature of the facade method being called
        expected: Signature,
        /// Signature of the member the cache returned
        found: Signature,
    },

    /// A static dispatch resolved to a member that needs an instance.
    #[error(
        "\nFacade interface has a method which is an instance member in the published type:\n  {0}\n"
    )]
    StaticInstanceMismatch(Signature),

    /// The facade has no method at this index.
    #[error("Facade method index {0} is out of range")]
    NoSuchFacadeMethod(usize),

    /// The supplied arguments do not match the facade method's declared parameter types.
    #[error("Arguments do not match the facade method {0}")]
    ArgumentMismatch(Signature),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
