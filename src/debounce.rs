//! Quiet-period debouncing on top of a minimal scheduling capability.
//!
//! [`Debouncer`] never talks to a timer API directly; it asks a
//! [`Scheduler`] to run a task after a delay and to cancel it again. Tests
//! and runtime-less hosts use [`ManualScheduler`], the session driver uses
//! `TokioScheduler`.
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Deferred unit of work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle identifying one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

pub trait Scheduler {
    /// Runs `task` once after `delay` unless cancelled first.
    fn schedule(&self, delay: Duration, task: Task) -> TimerToken;

    /// Cancels a pending task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, token: TimerToken);
}

/// Coalesces bursts of calls into a single call of `target` with the last
/// arguments, once no call has happened for the quiet period.
///
/// Dropping the debouncer cancels the pending execution.
pub struct Debouncer<A, S: Scheduler> {
    scheduler: S,
    quiet_period: Duration,
    target: Arc<dyn Fn(A) + Send + Sync>,
    pending: Option<TimerToken>,
}

impl<A, S> Debouncer<A, S>
where
    A: Send + 'static,
    S: Scheduler,
{
    pub fn new(
        scheduler: S,
        quiet_period: Duration,
        target: impl Fn(A) + Send + Sync + 'static,
    ) -> Self {
        Self {
            scheduler,
            quiet_period,
            target: Arc::new(target),
            pending: None,
        }
    }

    pub fn call(&mut self, args: A) {
        self.cancel();
        let target = Arc::clone(&self.target);
        let token = self
            .scheduler
            .schedule(self.quiet_period, Box::new(move || target(args)));
        self.pending = Some(token);
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl<A, S: Scheduler> Debouncer<A, S> {
    /// Drops the pending execution, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

impl<A, S: Scheduler> Drop for Debouncer<A, S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct ManualTimer {
    token: TimerToken,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

/// Virtual-clock scheduler: tasks only run when [`ManualScheduler::advance`]
/// moves the clock past their deadline.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualClock> {
        self.clock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn now(&self) -> Duration {
        self.lock().now
    }

    pub fn pending(&self) -> usize {
        self.lock().timers.len()
    }

    /// Moves the clock forward, running due tasks in deadline order. Tasks run
    /// without the clock locked, so they may schedule further work.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;
        loop {
            let next = {
                let mut clock = self.lock();
                let due = clock
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.token.id()))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let timer = clock.timers.remove(index);
                        clock.now = timer.due;
                        Some(timer.task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerToken {
        let mut clock = self.lock();
        clock.next_id += 1;
        let token = TimerToken(clock.next_id);
        let due = clock.now + delay;
        clock.timers.push(ManualTimer { token, due, task });
        token
    }

    fn cancel(&self, token: TimerToken) {
        self.lock().timers.retain(|timer| timer.token != token);
    }
}

#[cfg(feature = "runtime")]
pub use self::tokio_scheduler::TokioScheduler;

#[cfg(feature = "runtime")]
mod tokio_scheduler {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::task::JoinHandle;

    use super::{Scheduler, Task, TimerToken};

    /// Scheduler backed by `tokio::time::sleep`; cancelling aborts the sleeping
    /// task. Must be used from within a tokio runtime.
    #[derive(Clone, Default)]
    pub struct TokioScheduler {
        next_id: Arc<AtomicU64>,
        handles: Arc<Mutex<HashMap<u64, JoinHandle<()>>>>,
    }

    impl TokioScheduler {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Scheduler for TokioScheduler {
        fn schedule(&self, delay: Duration, task: Task) -> TimerToken {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            let handles = Arc::clone(&self.handles);
            let mut guard = self
                .handles
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            // The lock is held until the handle is stored, so the completed
            // task always finds its own entry to remove.
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                handles
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .remove(&id);
                task();
            });
            guard.insert(id, handle);
            TimerToken::new(id)
        }

        fn cancel(&self, token: TimerToken) {
            let handle = self
                .handles
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .remove(&token.id());
            if let Some(handle) = handle {
                handle.abort();
            }
        }
    }
}
