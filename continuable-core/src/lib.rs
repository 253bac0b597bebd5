#![warn(missing_docs)]
//!
//! Data model and traversal engine backing the `continuable` continuation
//! algebra.
//!
//! This crate has no opinion on what a continuation *is* — that's
//! `continuable`'s job. It only provides the pieces every layer of that
//! algebra is built from: the opaque [`error::Error`] carrier, the
//! tri-state [`result::Outcome`], the [`token::Ownership`] bits every
//! continuation handle carries, the [`spread::Spread`] marker, the
//! [`scheduler::Scheduler`]/[`scheduler::Work`] capability traits an
//! executor plugs into, and the [`traverse`] engine the composition
//! strategies walk heterogeneous operand packs with.

/// The opaque error/cancellation carrier.
pub mod error;
/// The two-bit ownership/freeze token attached to every continuation.
pub mod token;
/// The tri-state (empty/value/exception) outcome type.
pub mod result;
/// The spread marker for 1:N flattening during traversal.
pub mod spread;
/// The scheduler/work capability traits consumed by the chain transform.
pub mod scheduler;
/// Synchronous and asynchronous traversal over heterogeneous packs.
pub mod traverse;
