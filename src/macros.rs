#![allow(unused_macros)]

/// Helper macro for reading locked items
///
/// ```rust, ignore
///  let data = read_lock!(my_arc_rwlock);
///  println!("{}", data.some_field);
/// ```
macro_rules! read_lock {
    ($arc_rwlock:expr) => {
        $arc_rwlock.read().expect("Failed to acquire read lock")
    };
}

/// Helper macro for writing to locked items
///
/// ```rust, ignore
///  let mut data = write_lock!(my_arc_rwlock);
///  data.some_field = 42;
/// ```
macro_rules! write_lock {
    ($arc_rwlock:expr) => {
        $arc_rwlock.write().expect("Failed to acquire write lock")
    };
}

/// Boxes a list of expressions into type-erased facade arguments
///
/// ```rust, ignore
///  let args = args![313_i32, 303_i32];
///  let sum: i32 = dispatch.invoke(0, args)?;
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$(Box::new($arg) as $crate::metadata::Value),*]
    };
}

/// Declares a facade interface.
///
/// Generates a struct wrapping a [`Dispatch`](crate::Dispatch), its [`Facade`](crate::Facade)
/// implementation and one typed forwarding method per declared method. Every generated method
/// returns [`Result`](crate::Result).
///
/// - Markers after the struct name (`IDENTITY_HASH`, `CONCURRENT_IDENTITY_HASH`, `NO_CACHE`)
///   select a caching strategy, joined with `|`
/// - `#[slot(n)]` assigns the slot index used by the indexed-slot cache
/// - `= "name"` forwards to a target member named differently from the facade method, which is
///   how overloaded target members are reached
///
/// ```rust, ignore
/// facade! {
///     pub struct SPrivateMethods {
///         #[slot(0)] fn add_ints(a: i32, b: i32) -> i32 = "add";
///         #[slot(1)] fn add_floats(a: f64, b: f64) -> f64 = "add";
///         #[slot(2)] fn do_something();
///     }
/// }
///
/// facade! {
///     pub struct SHashed: IDENTITY_HASH {
///         fn add(a: i32, b: i32) -> i32;
///     }
/// }
/// ```
#[macro_export]
macro_rules! facade {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident $(: $($marker:ident)|+)? {
            $(
                $(#[slot($slot:literal)])?
                fn $method:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? $(= $target:literal)?;
            )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone)]
        $vis struct $name {
            dispatch: $crate::Dispatch,
        }

        const _: () = {
            #[allow(non_camel_case_types, dead_code)]
            enum Method {
                $($method),*
            }

            impl $crate::Facade for $name {
                fn descriptor() -> $crate::metadata::FacadeDescriptor {
                    $crate::metadata::FacadeDescriptor::builder::<$name>(stringify!($name))
                        $(.markers($($crate::metadata::CacheMarkers::$marker)|+))?
                        $(
                            .method({
                                let method = $crate::metadata::FacadeMethod::new(
                                    [$($target,)? stringify!($method)][0],
                                    vec![$($crate::metadata::ParamType::of::<$ty>()),*],
                                    $crate::metadata::ParamType::of::<
                                        $crate::__facade_return!($($ret)?)
                                    >(),
                                )
                                .with_key(stringify!($method));
                                $(let method = method.with_slot($slot);)?
                                method
                            })
                        )*
                        .build()
                }

                fn from_dispatch(dispatch: $crate::Dispatch) -> Self {
                    $name { dispatch }
                }

                fn dispatch(&self) -> &$crate::Dispatch {
                    &self.dispatch
                }
            }

            impl $name {
                $(
                    #[allow(dead_code, missing_docs)]
                    $vis fn $method(
                        &self,
                        $($arg: $ty),*
                    ) -> $crate::Result<$crate::__facade_return!($($ret)?)> {
                        self.dispatch
                            .invoke(Method::$method as usize, $crate::args![$($arg),*])
                    }
                )*
            }
        };
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __facade_return {
    () => {
        ()
    };
    ($ret:ty) => {
        $ret
    };
}
