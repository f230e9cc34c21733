//! Strategy selection and slot-index validation.
//!
//! The validator inspects a [`FacadeDescriptor`] once and decides which caching [`Strategy`]
//! resolves its calls. Markers take precedence over slot indices:
//!
//! | Precedence | Condition                                 | Strategy                   |
//! |------------|-------------------------------------------|----------------------------|
//! | 1          | `NO_CACHE` marker                         | No-Cache                   |
//! | 2          | `IDENTITY_HASH` marker                    | Identity-Hash              |
//! | 3          | `CONCURRENT_IDENTITY_HASH` marker         | Concurrent Identity-Hash   |
//! | 4          | every method carries a valid slot index   | Indexed-Slot               |
//! | 5          | no method carries a slot index            | No-Cache                   |
//!
//! A slot-index scheme is valid when the indices are non-negative, unique, start at `0` and
//! form the sequence `0..n` for `n` methods. Distinct non-negative integers summing to
//! `n(n-1)/2` can only be that sequence; the bounds check below makes it explicit since the
//! indexed-slot cache addresses its array with these values.

use std::collections::HashSet;

use crate::{
    metadata::{CacheMarkers, FacadeDescriptor},
    policy::Strategy,
    Result, ValidationError,
};

/// Selects the caching strategy for `descriptor`.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] if the facade opts into the indexed-slot cache with a
/// malformed slot-index scheme. Markers bypass slot validation entirely.
pub fn select_strategy(descriptor: &FacadeDescriptor) -> Result<Strategy> {
    if descriptor.markers.contains(CacheMarkers::NO_CACHE) {
        return Ok(Strategy::NoCache);
    }
    if descriptor.markers.contains(CacheMarkers::IDENTITY_HASH) {
        return Ok(Strategy::IdentityHash);
    }
    if descriptor
        .markers
        .contains(CacheMarkers::CONCURRENT_IDENTITY_HASH)
    {
        return Ok(Strategy::ConcurrentIdentityHash);
    }

    validate_slots(descriptor.methods.iter().map(|method| method.slot))
}

/// Validates a slot-index scheme given in method declaration order.
fn validate_slots(slots: impl ExactSizeIterator<Item = Option<i32>>) -> Result<Strategy> {
    let count = slots.len();
    let mut expected_sum: i64 = 0;
    let mut total_sum: i64 = 0;
    let mut annotated = 0_usize;
    let mut zero_found = false;
    let mut seen = HashSet::with_capacity(count);

    for (position, slot) in slots.enumerate() {
        expected_sum += position as i64;
        let Some(slot) = slot else {
            continue;
        };

        if slot < 0 {
            return Err(ValidationError::NegativeIndex.into());
        }
        annotated += 1;
        if slot == 0 {
            zero_found = true;
        }
        if !seen.insert(slot) {
            return Err(ValidationError::DuplicateIndex.into());
        }
        total_sum += i64::from(slot);
    }

    if annotated == 0 {
        return Ok(Strategy::NoCache);
    }
    if annotated != count {
        return Err(ValidationError::MissingIndex.into());
    }
    if !zero_found {
        return Err(ValidationError::MissingZero.into());
    }
    if expected_sum != total_sum || seen.iter().any(|&slot| slot as usize >= count) {
        return Err(ValidationError::NotSequential.into());
    }

    Ok(Strategy::IndexedSlot)
}
