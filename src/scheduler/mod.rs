//! Timer capability used by `delay` and `throttle`
//!
//! The decorators never sleep or spawn on their own; they hand a callback and a
//! duration to a [`Scheduler`] and get back a [`TimerHandle`]. Two implementations
//! are provided:
//!
//! - [`TokioScheduler`] runs callbacks on the tokio runtime after a real sleep
//! - [`ManualScheduler`] keeps a virtual clock that the host advances explicitly

mod manual;
mod tokio_timer;

pub use manual::{ManualScheduler, ManualTimer};
pub use tokio_timer::{TokioScheduler, TokioTimer};

use std::time::Duration;

/// Deferred callback submitted to a scheduler
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled callback
pub trait TimerHandle {
    /// Prevent the callback from running if it has not run yet.
    fn cancel(&self);

    /// Whether the callback has run or been cancelled.
    fn is_finished(&self) -> bool;
}

/// Schedules a callback to run no earlier than `after` from now
pub trait Scheduler {
    type Handle: TimerHandle;

    fn schedule(&self, after: Duration, task: Task) -> Self::Handle;
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    type Handle = S::Handle;

    fn schedule(&self, after: Duration, task: Task) -> Self::Handle {
        (**self).schedule(after, task)
    }
}
