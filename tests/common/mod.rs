//! Target types and facades shared by the integration tests.
#![allow(dead_code, unused_macros)]

use publisher::prelude::*;

/// Target type with overloaded instance members and static helpers.
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

/// Target type with per-instance state.
#[derive(Debug)]
pub struct Accumulator {
    pub base: i64,
}

impl Exposed for Accumulator {
    fn expose() -> TargetType {
        TargetType::builder::<Accumulator>("Accumulator")
            .instance_method("offset", |this: &Accumulator, (by,): (i64,)| this.base + by)
            .build()
    }
}

/// Second target type exposing the same member shape as [`Accumulator`].
#[derive(Debug)]
pub struct Multiplier {
    pub factor: i64,
}

impl Exposed for Multiplier {
    fn expose() -> TargetType {
        TargetType::builder::<Multiplier>("Multiplier")
            .instance_method("offset", |this: &Multiplier, (by,): (i64,)| this.factor * by)
            .build()
    }
}

facade! {
    pub struct SPrivateMethods {
        #[slot(0)] fn add_strings(first: String, second: String) -> String = "add";
        #[slot(1)] fn add_floats(first: f64, second: f64) -> f64 = "add";
        #[slot(2)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(3)] fn super_algorithm(value: String, num: i32) -> String;
        #[slot(4)] fn do_something();
        #[slot(5)] fn concat(left: Vec<u8>, right: Vec<u8>) -> Vec<u8>;
    }
}

facade! {
    pub struct SHashedMethods: IDENTITY_HASH {
        fn add_strings(first: String, second: String) -> String = "add";
        fn add_floats(first: f64, second: f64) -> f64 = "add";
        fn add_ints(first: i32, second: i32) -> i32 = "add";
        fn super_algorithm(value: String, num: i32) -> String;
        fn do_something();
        fn concat(left: Vec<u8>, right: Vec<u8>) -> Vec<u8>;
    }
}

facade! {
    pub struct SConcurrentMethods: CONCURRENT_IDENTITY_HASH {
        fn add_strings(first: String, second: String) -> String = "add";
        fn add_floats(first: f64, second: f64) -> f64 = "add";
        fn add_ints(first: i32, second: i32) -> i32 = "add";
        fn super_algorithm(value: String, num: i32) -> String;
        fn do_something();
        fn concat(left: Vec<u8>, right: Vec<u8>) -> Vec<u8>;
    }
}

facade! {
    pub struct SUncachedMethods {
        fn add_strings(first: String, second: String) -> String = "add";
        fn add_floats(first: f64, second: f64) -> f64 = "add";
        fn add_ints(first: i32, second: i32) -> i32 = "add";
        fn super_algorithm(value: String, num: i32) -> String;
        fn do_something();
        fn concat(left: Vec<u8>, right: Vec<u8>) -> Vec<u8>;
    }
}

facade! {
    pub struct SStaticMethods {
        fn do_something();
        fn concat(left: Vec<u8>, right: Vec<u8>) -> Vec<u8>;
        fn add(first: i32, second: i32) -> i32;
    }
}

facade! {
    pub struct SOffset {
        #[slot(0)] fn offset(by: i64) -> i64;
    }
}

/// Asserts the reference results of a facade over [`PrivateMethods`].
macro_rules! assert_private_methods {
    ($facade:expr) => {{
        let facade = &$facade;
        assert_eq!(
            facade
                .add_strings("Hello ".to_string(), "World!".to_string())
                .unwrap(),
            "Hello World!"
        );
        assert!((facade.add_floats(1.5, -273.25).unwrap() + 271.75).abs() < 1e-9);
        #[allow(clippy::approx_constant)]
        let sum = facade.add_floats(3.14, -273.16).unwrap();
        assert!((sum + 270.02).abs() < 1e-9);
        assert_eq!(facade.add_ints(313, 303).unwrap(), 616);
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
    }};
}
