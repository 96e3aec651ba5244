use crate::scheduler::Scheduler;
use std::time::Duration;
use tracing::debug;

/// Call `func(args)` once, no earlier than `wait` from now.
///
/// Returns immediately with the scheduler's handle, which can cancel the call
/// before it runs.
pub fn delay<S, F, A>(scheduler: &S, func: F, wait: Duration, args: A) -> S::Handle
where
    S: Scheduler + ?Sized,
    F: FnOnce(A) + Send + 'static,
    A: Send + 'static,
{
    debug!("Delaying call by {:?}", wait);
    scheduler.schedule(wait, Box::new(move || func(args)))
}
