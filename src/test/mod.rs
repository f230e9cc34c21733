//! Shared fixtures for unit tests.
//!
//! [`PrivateMethods`] is a target type with overloaded, static and instance members;
//! [`SPrivateMethods`] and [`SStaticMethods`] are facades over it.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::metadata::{
    DeclaredMemberResolver, Exposed, FacadeDescriptor, FacadeMethod, Member, MemberResolver,
    ParamType, TargetType,
};

/// Target type whose members are only reachable through its dispatch table
#[derive(Debug, Default)]
pub struct PrivateMethods;

impl PrivateMethods {
    fn do_something() {}

    fn super_algorithm(&self, value: String, num: i32) -> String {
        value.repeat(num.max(0) as usize)
    }

    fn add_strings(&self, first: String, second: String) -> String {
        first + &second
    }

    fn add_floats(&self, first: f64, second: f64) -> f64 {
        first + second
    }

    fn add_ints(&self, first: i32, second: i32) -> i32 {
        first + second
    }

    fn concat(mut left: Vec<u8>, right: Vec<u8>) -> Vec<u8> {
        left.extend(right);
        left
    }
}

impl Exposed for PrivateMethods {
    fn expose() -> TargetType {
        TargetType::builder::<PrivateMethods>("PrivateMethods")
            .static_method("do_something", |(): ()| PrivateMethods::do_something())
            .instance_method(
                "super_algorithm",
                |this: &PrivateMethods, (value, num): (String, i32)| {
                    this.super_algorithm(value, num)
                },
            )
            .instance_method("add", |this: &PrivateMethods, (a, b): (String, String)| {
                this.add_strings(a, b)
            })
            .instance_method("add", |this: &PrivateMethods, (a, b): (f64, f64)| {
                this.add_floats(a, b)
            })
            .instance_method("add", |this: &PrivateMethods, (a, b): (i32, i32)| {
                this.add_ints(a, b)
            })
            .static_method("concat", |(left, right): (Vec<u8>, Vec<u8>)| {
                PrivateMethods::concat(left, right)
            })
            .build()
    }
}

facade! {
    /// Facade over every member of [`PrivateMethods`], cached by slot index
    pub struct SPrivateMethods {
        #[slot(3)] fn do_something();
        #[slot(1)] fn super_algorithm(value: String, num: i32) -> String;
        #[slot(5)] fn add_strings(first: String, second: String) -> String = "add";
        #[slot(0)] fn add_floats(first: f64, second: f64) -> f64 = "add";
        #[slot(2)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(4)] fn concat(left: Vec<u8>, right: Vec<u8>) -> Vec<u8>;
    }
}

facade! {
    /// Facade meant for static dispatch over [`PrivateMethods`]
    pub struct SStaticMethods {
        fn do_something();
        fn add(first: i32, second: i32) -> i32;
        fn concat(left: Vec<u8>, right: Vec<u8>) -> Vec<u8>;
    }
}

struct HandBuilt;

/// Hand-built descriptor with the method layout of [`SPrivateMethods`]
///
/// Methods in order: `do_something`, `super_algorithm`, `add_strings`, `add_floats`,
/// `add_ints`, `concat`. Slot indices are a shuffled `0..6` when `slotted` is set.
pub fn private_methods_facade(slotted: bool) -> FacadeDescriptor {
    let methods = [
        FacadeMethod::new("do_something", vec![], ParamType::of::<()>()),
        FacadeMethod::new(
            "super_algorithm",
            vec![ParamType::of::<String>(), ParamType::of::<i32>()],
            ParamType::of::<String>(),
        ),
        FacadeMethod::new(
            "add",
            vec![ParamType::of::<String>(), ParamType::of::<String>()],
            ParamType::of::<String>(),
        )
        .with_key("add_strings"),
        FacadeMethod::new(
            "add",
            vec![ParamType::of::<f64>(), ParamType::of::<f64>()],
            ParamType::of::<f64>(),
        )
        .with_key("add_floats"),
        FacadeMethod::new(
            "add",
            vec![ParamType::of::<i32>(), ParamType::of::<i32>()],
            ParamType::of::<i32>(),
        )
        .with_key("add_ints"),
        FacadeMethod::new(
            "concat",
            vec![ParamType::of::<Vec<u8>>(), ParamType::of::<Vec<u8>>()],
            ParamType::of::<Vec<u8>>(),
        ),
    ];

    let mut builder = FacadeDescriptor::builder::<HandBuilt>("SPrivateMethods");
    for (method, slot) in methods.into_iter().zip([3, 1, 5, 0, 2, 4]) {
        builder = builder.method(if slotted { method.with_slot(slot) } else { method });
    }
    builder.build()
}

/// Member resolver counting its lookups
#[derive(Debug, Default)]
pub struct CountingResolver {
    pub lookups: AtomicUsize,
}

impl MemberResolver for CountingResolver {
    fn resolve(&self, target: &TargetType, name: &str, params: &[ParamType]) -> Option<Arc<Member>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        DeclaredMemberResolver.resolve(target, name, params)
    }
}

mod tests {
    use super::*;

    #[test]
    fn fixture_calls_through_facade() {
        let facade: SPrivateMethods = crate::publish(Arc::new(PrivateMethods)).unwrap();

        assert_eq!(facade.add_ints(313, 303).unwrap(), 616);
        assert!((facade.add_floats(1.5, -273.25).unwrap() - (-271.75)).abs() < 1e-9);
        #[allow(clippy::approx_constant)]
        let sum = facade.add_floats(3.14, -273.16).unwrap();
        assert!((sum - (-270.02)).abs() < 1e-9);
        assert_eq!(
            facade
                .add_strings("Hello ".to_string(), "World!".to_string())
                .unwrap(),
            "Hello World!"
        );
        assert_eq!(
            facade.super_algorithm("miu".to_string(), 3).unwrap(),
            "miumiumiu"
        );
        facade.do_something().unwrap();

        let joined = facade
            .concat(vec![10, 20, 30, 40], vec![1, 2, 3, 4, 50])
            .unwrap();
        assert_eq!(joined.len(), 9);
        assert_eq!(joined.iter().map(|&b| u32::from(b)).sum::<u32>(), 160);
    }
}
