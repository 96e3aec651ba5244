use super::{Scheduler, Task, TimerHandle};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::trace;

/// Deadline plus submission sequence, so equal deadlines run in FIFO order
type TimerId = (Duration, u64);

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<TimerId, Task>,
}

/// Scheduler driven by a virtual clock
///
/// Nothing runs until the host calls [`advance`](Self::advance) or
/// [`run_until_idle`](Self::run_until_idle); callbacks then run on the caller's
/// thread, in deadline order. Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Arc<Mutex<Timeline>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &timeline.now)
            .field("pending", &timeline.queue.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from the scheduler's creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of callbacks waiting to run.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Move the clock forward by `by`, running every callback that falls due.
    ///
    /// Callbacks scheduled by a running callback also run if they fall due within
    /// the same window. Returns the number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let ran = self.run_while(|deadline| deadline <= target);
        self.lock().now = target;
        ran
    }

    /// Run callbacks in deadline order until none are left, moving the clock to
    /// each deadline in turn.
    pub fn run_until_idle(&self) -> usize {
        self.run_while(|_| true)
    }

    fn run_while<P>(&self, due: P) -> usize
    where
        P: Fn(Duration) -> bool,
    {
        let mut ran = 0;
        loop {
            // The lock is released before the callback runs so it can schedule more work.
            let task = {
                let mut timeline = self.lock();
                let next_deadline = timeline.queue.keys().next().map(|(deadline, _)| *deadline);
                match next_deadline {
                    Some(deadline) if due(deadline) => {
                        timeline.now = timeline.now.max(deadline);
                        timeline.queue.pop_first().map(|(_, task)| task)
                    }
                    _ => None,
                }
            };
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        if ran > 0 {
            trace!("Manual scheduler ran {} callback(s)", ran);
        }
        ran
    }

    fn lock(&self) -> MutexGuard<'_, Timeline> {
        lock_timeline(&self.timeline)
    }
}

fn lock_timeline(timeline: &Mutex<Timeline>) -> MutexGuard<'_, Timeline> {
    timeline.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, after: Duration, task: Task) -> ManualTimer {
        let mut timeline = self.lock();
        let id = (timeline.now + after, timeline.next_seq);
        timeline.next_seq += 1;
        timeline.queue.insert(id, task);
        trace!("Scheduled manual timer at {:?}", id.0);
        ManualTimer {
            id,
            timeline: Arc::clone(&self.timeline),
        }
    }
}

/// Handle to a callback queued on a [`ManualScheduler`]
pub struct ManualTimer {
    id: TimerId,
    timeline: Arc<Mutex<Timeline>>,
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimer")
            .field("deadline", &self.id.0)
            .finish()
    }
}

impl TimerHandle for ManualTimer {
    fn cancel(&self) {
        lock_timeline(&self.timeline).queue.remove(&self.id);
    }

    fn is_finished(&self) -> bool {
        !lock_timeline(&self.timeline).queue.contains_key(&self.id)
    }
}
