use super::{Scheduler, Task, TimerHandle};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// Scheduler backed by a tokio runtime
///
/// Without an explicit runtime handle, callbacks are spawned on the runtime that
/// is current when [`Scheduler::schedule`] is called, which panics outside of one.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    runtime: Option<Handle>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn callbacks on the given runtime instead of the current one.
    pub fn with_handle(runtime: Handle) -> Self {
        Self {
            runtime: Some(runtime),
        }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTimer;

    fn schedule(&self, after: Duration, task: Task) -> TokioTimer {
        trace!("Scheduling tokio timer in {:?}", after);
        let timer = async move {
            tokio::time::sleep(after).await;
            task();
        };
        let join = match &self.runtime {
            Some(runtime) => runtime.spawn(timer),
            None => tokio::spawn(timer),
        };
        TokioTimer { join }
    }
}

/// Handle to a callback spawned by [`TokioScheduler`]
#[derive(Debug)]
pub struct TokioTimer {
    join: JoinHandle<()>,
}

impl TimerHandle for TokioTimer {
    fn cancel(&self) {
        self.join.abort();
    }

    fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_callback_runs_after_duration() {
        let scheduler = TokioScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let timer = scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!timer.is_finished());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_callback_never_runs() {
        let scheduler = TokioScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let timer = scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        timer.cancel();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
