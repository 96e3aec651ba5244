use tracing::debug;

enum OnceState<F, R> {
    Pending(F),
    Complete(R),
    Poisoned,
}

/// Wrapper that runs its function at most once
///
/// The first call runs the function and caches the result; every later call
/// returns a clone of that result, whatever arguments it is given.
pub struct Once<F, R> {
    state: OnceState<F, R>,
}

/// Wrap `func` so that it runs at most once.
///
/// ```
/// use underbar::once;
///
/// let mut init = once(|n: i32| n * 10);
/// assert_eq!(init.call(1), 10);
/// assert_eq!(init.call(2), 10);
/// ```
pub fn once<A, F, R>(func: F) -> Once<F, R>
where
    F: FnOnce(A) -> R,
{
    Once::new(func)
}

impl<F, R> Once<F, R> {
    pub fn new(func: F) -> Self {
        Self {
            state: OnceState::Pending(func),
        }
    }

    pub fn has_run(&self) -> bool {
        matches!(self.state, OnceState::Complete(_))
    }

    /// Run the function on the first call; afterwards return its result.
    ///
    /// # Panics
    ///
    /// Panics if a previous first call panicked before producing a result.
    pub fn call<A>(&mut self, args: A) -> R
    where
        F: FnOnce(A) -> R,
        R: Clone,
    {
        let result = match std::mem::replace(&mut self.state, OnceState::Poisoned) {
            OnceState::Pending(func) => {
                debug!("Running once-wrapped function");
                func(args)
            }
            OnceState::Complete(result) => result,
            OnceState::Poisoned => panic!("once-wrapped function panicked on its first call"),
        };
        self.state = OnceState::Complete(result.clone());
        result
    }
}

impl<F, R: std::fmt::Debug> std::fmt::Debug for Once<F, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match &self.state {
            OnceState::Complete(result) => Some(result),
            _ => None,
        };
        f.debug_struct("Once").field("result", &result).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;

    #[test]
    fn test_runs_once_and_returns_first_result() {
        let counter = CallCounter::new();
        let calls = counter.clone();
        let mut add = once(move |(a, b): (i32, i32)| {
            calls.hit();
            a + b
        });

        assert!(!add.has_run());
        assert_eq!(add.call((1, 2)), 3);
        assert_eq!(add.call((10, 20)), 3);
        assert_eq!(add.call((100, 200)), 3);
        assert!(add.has_run());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_independent_instances() {
        let mut first = once(|n: i32| n);
        let mut second = once(|n: i32| n);
        assert_eq!(first.call(1), 1);
        assert_eq!(second.call(2), 2);
        assert_eq!(first.call(3), 1);
    }

    #[test]
    #[should_panic(expected = "panicked on its first call")]
    fn test_call_after_panicking_first_call_panics() {
        let mut fails = once(|()| -> i32 { panic!("first call fails") });
        let first = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| fails.call(())));
        assert!(first.is_err());
        assert!(!fails.has_run());
        fails.call(());
    }

    #[test]
    fn test_consumes_captured_state() {
        let owned = vec![1, 2, 3];
        let mut take = once(move |()| owned);
        assert_eq!(take.call(()), vec![1, 2, 3]);
        assert_eq!(take.call(()), vec![1, 2, 3]);
    }
}
