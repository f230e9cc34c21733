//! Integration tests for strategy selection and setup failures.
//!
//! Malformed slot-index schemes must be rejected by `create`, before any call is made, and a
//! rejected facade must stay rejected.

mod common;

use std::sync::Arc;

use common::*;
use publisher::prelude::*;

facade! {
    pub struct SPartial {
        #[slot(0)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(1)] fn add_floats(first: f64, second: f64) -> f64 = "add";
        fn do_something();
    }
}

facade! {
    pub struct SDuplicate {
        #[slot(0)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(1)] fn add_floats(first: f64, second: f64) -> f64 = "add";
        #[slot(1)] fn do_something();
    }
}

facade! {
    pub struct SNegative {
        #[slot(0)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(-1)] fn add_floats(first: f64, second: f64) -> f64 = "add";
        #[slot(1)] fn do_something();
    }
}

facade! {
    pub struct SNoZero {
        #[slot(1)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(2)] fn add_floats(first: f64, second: f64) -> f64 = "add";
        #[slot(3)] fn do_something();
    }
}

facade! {
    pub struct SGap {
        #[slot(0)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(1)] fn add_floats(first: f64, second: f64) -> f64 = "add";
        #[slot(3)] fn do_something();
    }
}

facade! {
    pub struct SMarkedOverSlots: NO_CACHE {
        #[slot(7)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(7)] fn do_something();
    }
}

facade! {
    pub struct SBothHashes: IDENTITY_HASH | CONCURRENT_IDENTITY_HASH {
        fn add_ints(first: i32, second: i32) -> i32 = "add";
    }
}

facade! {
    pub struct SMissingMember {
        #[slot(0)] fn add_ints(first: i32, second: i32) -> i32 = "add";
        #[slot(1)] fn add_longs(first: i64, second: i64) -> i64 = "add";
        #[slot(2)] fn subtract(first: i32, second: i32) -> i32;
    }
}

facade! {
    pub struct SMissingHashed: CONCURRENT_IDENTITY_HASH {
        fn add_longs(first: i64, second: i64) -> i64 = "add";
    }
}

fn validation_error<F: Facade>() -> ValidationError {
    let registry = Registry::new();
    match Publisher::<F>::create_in(&registry) {
        Err(Error::Validation(error)) => {
            assert!(registry.is_empty());
            error
        }
        Err(other) => panic!("expected a validation error, got {other}"),
        Ok(_) => panic!("expected a validation error"),
    }
}

#[test]
fn malformed_slot_schemes() {
    assert_eq!(validation_error::<SPartial>(), ValidationError::MissingIndex);
    assert_eq!(
        validation_error::<SDuplicate>(),
        ValidationError::DuplicateIndex
    );
    assert_eq!(
        validation_error::<SNegative>(),
        ValidationError::NegativeIndex
    );
    assert_eq!(validation_error::<SNoZero>(), ValidationError::MissingZero);
    assert_eq!(validation_error::<SGap>(), ValidationError::NotSequential);
}

#[test]
fn rejection_is_repeatable() {
    for _ in 0..3 {
        assert!(matches!(
            publish::<SPartial, PrivateMethods>(Arc::new(PrivateMethods)),
            Err(Error::Validation(ValidationError::MissingIndex))
        ));
    }
}

#[test]
fn validation_messages() {
    let message = Publisher::<SNoZero>::create_in(&Registry::new())
        .unwrap_err()
        .to_string();
    assert_eq!(message, "Slot index values must start from zero (0).");
}

#[test]
fn markers_take_precedence() {
    let registry = Registry::new();
    assert_eq!(
        Publisher::<SMarkedOverSlots>::create_in(&registry)
            .unwrap()
            .strategy(),
        Strategy::NoCache
    );
    assert_eq!(
        Publisher::<SBothHashes>::create_in(&registry)
            .unwrap()
            .strategy(),
        Strategy::IdentityHash
    );
}

#[test]
fn missing_member_is_a_name_conflict() {
    let registry = Registry::new();
    let facade = Publisher::<SMissingMember>::create_in(&registry)
        .unwrap()
        .publish_instance(Arc::new(PrivateMethods));

    assert_eq!(facade.add_ints(1, 2).unwrap(), 3);
    match facade.add_longs(1, 2) {
        Err(Error::NameConflict(signature)) => {
            assert_eq!(signature.owner, "SMissingMember");
            assert_eq!(signature.name, "add");
            assert_eq!(signature.params, vec![ParamType::of::<i64>(); 2]);
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert!(matches!(
        facade.subtract(1, 2),
        Err(Error::NameConflict(_))
    ));
    assert!(matches!(
        facade.dispatch().warm_up(),
        Err(Error::NameConflict(_))
    ));

    let hashed = Publisher::<SMissingHashed>::create_in(&registry)
        .unwrap()
        .publish_instance(Arc::new(PrivateMethods));
    assert!(matches!(
        hashed.add_longs(1, 2),
        Err(Error::NameConflict(_))
    ));
    assert_eq!(hashed.dispatch().cached_members(), 0);
}
