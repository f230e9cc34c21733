//! Parameter types, member signatures and argument decoding.
//!
//! A [`Signature`] is the matching key between a facade method and a target member: the member
//! name plus the exact, ordered parameter-type sequence. Parameter types are identified by
//! [`TypeId`], so matching never goes through names and cannot be fooled by two types that
//! happen to print identically.
//!
//! # Key Components
//!
//! - [`ParamType`] - A runtime type identity with a printable name
//! - [`Signature`] - `Owner.name(type,type)` descriptor used for matching and diagnostics
//! - [`Value`] - A type-erased argument or return value
//! - [`ArgTuple`] - Decoding of a `Vec<Value>` into a typed parameter tuple

use std::{
    any::{Any, TypeId},
    fmt,
};

/// A type-erased argument or return value passed through a dispatch facade.
pub type Value = Box<dyn Any + Send>;

/// Runtime identity of a parameter or return type.
///
/// Two `ParamType`s are equal exactly when their [`TypeId`]s are equal; the name is carried for
/// diagnostics only.
#[derive(Debug, Clone, Copy)]
pub struct ParamType {
    id: TypeId,
    name: &'static str,
}

impl ParamType {
    /// Returns the `ParamType` describing `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        ParamType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The [`TypeId`] of the described type.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The printable name of the described type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if `value` holds an instance of the described type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        (**value).type_id() == self.id
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamType {}

impl std::hash::Hash for ParamType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Name and parameter-type sequence of a facade method or target member, qualified by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Name of the declaring facade interface or target type
    pub owner: String,
    /// Member name
    pub name: String,
    /// Ordered parameter types
    pub params: Vec<ParamType>,
}

impl Signature {
    /// Creates a new signature.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, params: Vec<ParamType>) -> Self {
        Signature {
            owner: owner.into(),
            name: name.into(),
            params,
        }
    }

    /// Returns `true` if name and parameter types match, ignoring the owner.
    #[must_use]
    pub fn matches(&self, name: &str, params: &[ParamType]) -> bool {
        self.name == name && self.params == params
    }

    /// Returns `true` if `args` has exactly the shape of this signature's parameters.
    #[must_use]
    pub fn accepts(&self, args: &[Value]) -> bool {
        self.params.len() == args.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.accepts(arg))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.owner, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

/// A tuple of parameter types that can be decoded from type-erased arguments.
///
/// Implemented for tuples of up to eight elements. Target members are registered with a closure
/// taking one of these tuples, which is how the member's parameter-type sequence is derived.
pub trait ArgTuple: Sized + 'static {
    /// The ordered parameter types of this tuple.
    fn param_types() -> Vec<ParamType>;

    /// Moves `values` into the tuple, or returns `None` on a count or type mismatch.
    fn from_values(values: Vec<Value>) -> Option<Self>;
}

macro_rules! impl_arg_tuple {
    ($len:expr; $($name:ident),*) => {
        impl<$($name: Any + Send),*> ArgTuple for ($($name,)*) {
            fn param_types() -> Vec<ParamType> {
                vec![$(ParamType::of::<$name>()),*]
            }

            #[allow(unused_mut, unused_variables, non_snake_case)]
            fn from_values(values: Vec<Value>) -> Option<Self> {
                if values.len() != $len {
                    return None;
                }
                let mut values = values.into_iter();
                $(let $name = *values.next()?.downcast::<$name>().ok()?;)*
                Some(($($name,)*))
            }
        }
    };
}

impl_arg_tuple!(0;);
impl_arg_tuple!(1; A);
impl_arg_tuple!(2; A, B);
impl_arg_tuple!(3; A, B, C);
impl_arg_tuple!(4; A, B, C, D);
impl_arg_tuple!(5; A, B, C, D, E);
impl_arg_tuple!(6; A, B, C, D, E, F);
impl_arg_tuple!(7; A, B, C, D, E, F, G);
impl_arg_tuple!(8; A, B, C, D, E, F, G, H);
