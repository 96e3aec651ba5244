//! # Underbar
//!
//! Functional helpers over sequences and string-keyed mappings, plus decorators
//! that control how often and when a function runs.
//!
//! ## Usage
//!
//! ```bash
//! echo '[1, [2, [3, [4]], 5]]' | underbar flatten
//! underbar --input '[{"age": 40}, {"age": 7}]' sort-by age
//! ```
//!
//! ## Modules
//!
//! - `core` - Pure collection operations built on `each` and `fold`
//! - `decorators` - `once`, `memoize`, `delay` and `throttle`
//! - `scheduler` - Timer capability consumed by `delay` and `throttle`
//! - `config` - Configuration loading (TOML file plus environment overrides)
//! - `cli` - Argument parsing and command execution for the `underbar` binary
//! - `error` - Crate error type
//! - `testing` - Helpers shared by unit and integration tests
pub mod cli;
pub mod config;
pub mod core;
pub mod decorators;
pub mod error;
pub mod scheduler;

pub mod testing;

pub use crate::core::advanced::{
    difference, flatten, intersection, invoke, invoke_method, shuffle, shuffle_with, sort_by,
    sort_by_property, zip,
};
pub use crate::core::collection::{each, fold, reduce, Collection, IntoCollection, Key};
pub use crate::core::merge::{defaults, extend, Mapping};
pub use crate::core::predicate::{contains, every, every_truthy, some, some_truthy};
pub use crate::core::transform::{
    filter, first, first_n, identity, index_of, last, last_n, map, pluck, reject, uniq, uniq_by,
};
pub use crate::core::value::{Methods, Nest, Nested, Node, Record, StrictEq, Truthy};
pub use decorators::{delay, memoize, once, throttle, Memoize, Once, Throttle};
pub use error::{Error, Result};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
