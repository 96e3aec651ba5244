use super::delay::delay;
use crate::config::ThrottleConfig;
use crate::scheduler::{Scheduler, TimerHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Wrapper that runs its function at most once per window
///
/// A call made while no window is open runs the function immediately with that
/// call's arguments and opens a window of `wait`. Calls made while the window is
/// open are dropped along with their arguments. The window closes when the
/// scheduler fires the reopen timer.
pub struct Throttle<F, S: Scheduler> {
    func: F,
    wait: Duration,
    scheduler: S,
    available: Arc<AtomicBool>,
    reopen: Option<S::Handle>,
}

/// Wrap `func` so that it runs at most once per `wait`.
pub fn throttle<F, S: Scheduler>(scheduler: S, func: F, wait: Duration) -> Throttle<F, S> {
    Throttle::new(scheduler, func, wait)
}

impl<F, S: Scheduler> Throttle<F, S> {
    pub fn new(scheduler: S, func: F, wait: Duration) -> Self {
        Self {
            func,
            wait,
            scheduler,
            available: Arc::new(AtomicBool::new(true)),
            reopen: None,
        }
    }

    /// Use the configured window length.
    pub fn from_config(scheduler: S, func: F, config: &ThrottleConfig) -> Self {
        Self::new(scheduler, func, config.wait())
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Whether a window is currently open, i.e. calls are being dropped.
    pub fn is_open(&self) -> bool {
        !self.available.load(Ordering::Acquire)
    }

    /// Run the function if no window is open; `None` means the call was dropped.
    pub fn call<A, R>(&mut self, args: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self
            .available
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            trace!("Throttle window open, dropping call");
            return None;
        }

        let result = (self.func)(args);

        let available = Arc::clone(&self.available);
        let reopen = delay(
            &self.scheduler,
            move |()| {
                available.store(true, Ordering::Release);
                trace!("Throttle window closed");
            },
            self.wait,
            (),
        );
        self.reopen = Some(reopen);
        Some(result)
    }
}

impl<F, S: Scheduler> Drop for Throttle<F, S> {
    fn drop(&mut self) {
        if let Some(reopen) = self.reopen.take() {
            reopen.cancel();
        }
    }
}
