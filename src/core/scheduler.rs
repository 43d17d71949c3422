//! Deferred execution primitives
//!
//! Every delay in the behavior layer (transition phases, staggered reveals,
//! counter ticks, delayed menu close) is expressed through [`Scheduler`].
//! The browser implementation lives in `ui::scheduler`; tests drive the
//! same state machines with [`testing::ManualScheduler`].

use std::cell::RefCell;
use std::rc::Rc;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Timer and animation-frame primitive.
///
/// Tasks are fire-and-forget: there is no cancellation handle.
pub trait Scheduler {
    /// Run `task` once after `delay_ms` milliseconds.
    fn set_timeout(&self, delay_ms: u32, task: Task);

    /// Run `task` before the next repaint.
    fn request_animation_frame(&self, task: Task);
}

/// Hand `task` to `request`. If `request` reports it was refused, the
/// task goes to `fallback` instead, so it runs exactly once either way.
pub fn request_or_fallback(
    task: Task,
    request: impl FnOnce(Task) -> bool,
    fallback: impl FnOnce(Task),
) {
    let slot = Rc::new(RefCell::new(Some(task)));
    let pending = slot.clone();
    let accepted = request(Box::new(move || {
        let task = pending.borrow_mut().take();
        if let Some(task) = task {
            task();
        }
    }));
    if !accepted {
        let task = slot.borrow_mut().take();
        if let Some(task) = task {
            fallback(task);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Scheduler, Task};
    use std::cell::{Cell, RefCell};

    /// Nominal frame length used when stepping animation-frame callbacks
    pub const FRAME_MS: u64 = 16;

    struct Pending {
        due: u64,
        seq: u64,
        task: Task,
    }

    /// Virtual-clock scheduler.
    ///
    /// Time only moves when [`ManualScheduler::advance`] is called, and tasks
    /// with equal due times run in the order they were scheduled.
    #[derive(Default)]
    pub struct ManualScheduler {
        now: Cell<u64>,
        seq: Cell<u64>,
        queue: RefCell<Vec<Pending>>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.now.get()
        }

        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        fn push(&self, delay: u64, task: Task) {
            let seq = self.seq.get();
            self.seq.set(seq + 1);
            self.queue.borrow_mut().push(Pending {
                due: self.now.get() + delay,
                seq,
                task,
            });
        }

        fn pop_due(&self, limit: u64) -> Option<Pending> {
            let mut queue = self.queue.borrow_mut();
            let index = queue
                .iter()
                .enumerate()
                .filter(|(_, p)| p.due <= limit)
                .min_by_key(|(_, p)| (p.due, p.seq))
                .map(|(i, _)| i)?;
            Some(queue.swap_remove(index))
        }

        /// Advance the clock by `ms`, running every task that falls due.
        ///
        /// Tasks scheduled by running tasks are picked up in the same pass
        /// if they fall inside the window.
        pub fn advance(&self, ms: u64) {
            let limit = self.now.get() + ms;
            while let Some(pending) = self.pop_due(limit) {
                self.now.set(pending.due);
                (pending.task)();
            }
            self.now.set(limit);
        }

        /// Advance one millisecond at a time, calling `observe` after each step.
        pub fn advance_by_steps(&self, ms: u64, mut observe: impl FnMut(u64)) {
            for _ in 0..ms {
                self.advance(1);
                observe(self.now.get());
            }
        }

        /// Run everything currently queued, and everything those tasks queue.
        pub fn run_until_idle(&self) {
            loop {
                let latest = self.queue.borrow().iter().map(|p| p.due).max();
                let Some(due) = latest else {
                    break;
                };
                let now = self.now.get();
                self.advance(due.saturating_sub(now));
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn set_timeout(&self, delay_ms: u32, task: Task) {
            self.push(u64::from(delay_ms), task);
        }

        fn request_animation_frame(&self, task: Task) {
            self.push(FRAME_MS, task);
        }
    }
}
