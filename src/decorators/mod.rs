//! Function decorators
//!
//! Each decorator wraps a function in a struct that owns all of its state. Building
//! two wrappers around the same function gives two independent states; nothing is
//! shared between decorated instances.
//!
//! Wrapped functions take a single argument. Use a tuple for several arguments and
//! `()` for none.

mod delay;
mod memoize;
mod once;
mod throttle;

pub use delay::delay;
pub use memoize::{cache_key, memoize, Memoize};
pub use once::{once, Once};
pub use throttle::{throttle, Throttle};
