// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # publisher
//!
//! Typed facades over members that are otherwise out of reach.
//!
//! A *facade* is a small interface type whose methods forward, by name and exact parameter
//! types, to members of a *target type*. The target describes its members once in an explicit
//! dispatch table; publishing binds a facade to an instance of the target (or to the type alone
//! for static members) and every call is routed through a per-facade caching strategy.
//!
//! ## Features
//!
//! - **Four caching strategies** - No-Cache, Indexed-Slot, Identity-Hash and Concurrent
//!   Identity-Hash, selected from data on the facade descriptor
//! - **Up-front validation** - Malformed slot-index schemes are rejected when the facade is
//!   first published, never during a call
//! - **Exact resolution** - Members match by name and `TypeId`-based parameter types; a cache
//!   that hands back the wrong member is reported, not executed
//! - **Shared policies** - Strategy selection and member tables are built once per facade and
//!   target type, in a race-tolerant registry
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use publisher::prelude::*;
//!
//! #[derive(Default)]
//! struct Calculator;
//!
//! impl Calculator {
//!     fn add(&self, a: i32, b: i32) -> i32 { a + b }
//! }
//!
//! impl Exposed for Calculator {
//!     fn expose() -> TargetType {
//!         TargetType::builder::<Calculator>("Calculator")
//!             .instance_method("add", |this: &Calculator, (a, b): (i32, i32)| this.add(a, b))
//!             .build()
//!     }
//! }
//!
//! facade! {
//!     pub struct SCalculator {
//!         #[slot(0)] fn add(a: i32, b: i32) -> i32;
//!     }
//! }
//!
//! let calc: SCalculator = publish(Arc::new(Calculator))?;
//! assert_eq!(calc.add(313, 303)?, 616);
//! # Ok::<(), publisher::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - Facade descriptors, target dispatch tables and signatures
//! - [`policy`] - Strategy selection, slot validation and member caches
//! - [`Dispatch`] - The per-call path: locate, check, resolve, verify, invoke
//! - [`Registry`] - Process-wide, race-tolerant store of policies
//! - [`Publisher`] - Binding facades to instances or static targets
//! - [`Error`] and [`Result`] - Distinct, matchable failure kinds
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` when a strategy is selected or a member table is
//! created, `trace` on every cache miss and `warn` for ambiguous resolutions and static dispatch
//! onto instance members. Install any subscriber to see them.
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,ignore
/// use publisher::prelude::*;
///
/// let publisher = Publisher::<SCalculator>::create()?;
/// println!("{}", publisher.strategy());
/// # Ok::<(), publisher::Error>(())
/// ```
pub mod prelude;

/// Descriptions of facade interfaces and target types
pub mod metadata;

/// Strategy selection, slot-index validation and member caches
///
/// # Key Components
///
/// - [`policy::Strategy`] - The four caching strategies
/// - [`policy::select_strategy`] - Marker precedence and slot-index validation
/// - [`policy::PublishingPolicy`] - Per-facade strategy and member tables
/// - [`policy::PublisherConfig`] - Member resolver and identity hasher
pub mod policy;

mod dispatch;
mod publisher;
mod registry;

/// `publisher` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `publisher` Error type
///
/// Every setup and dispatch failure is a distinct variant; see [`Error`] for the categories.
pub use error::{Error, ValidationError};

pub use dispatch::{Dispatch, Target};
pub use publisher::{publish, publish_static, Facade, Publisher};
pub use registry::Registry;

pub use policy::{PublisherConfig, Strategy};
