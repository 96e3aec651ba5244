//! Core collection logic with pure functions
//!
//! Everything here is built on two primitives from [`collection`]: `each`, which
//! visits every element of a sequence or mapping, and `fold`, which reduces one.
//! Following the "functional core, imperative shell" pattern, all functions here:
//! - Take inputs and return new outputs
//! - Never mutate the collections they are given
//! - Don't perform file system, network, or timer operations
//! - Are easily testable without mocks

pub mod advanced;
pub mod collection;
pub mod merge;
pub mod predicate;
pub mod transform;
pub mod value;
