//! Standard-library backed runtime services.
//!
//! [`StdScheduler`] implements the [`Scheduler`] boundary on top of a
//! monotonic clock and a due-task queue. It does not spin its own thread:
//! the host's event loop calls [`StdScheduler::run_due`] each turn and can
//! use [`StdScheduler::idle_delay_ms`] to pick its wakeup timeout.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use log::trace;
use web_time::Instant;

use sizewise_core::Scheduler;

struct DueTask {
    due_ms: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

// BinaryHeap is a max-heap; order inverted so the earliest task surfaces
// first, with submission order breaking ties.
impl Ord for DueTask {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for DueTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DueTask {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for DueTask {}

/// Scheduler driven by real elapsed time.
pub struct StdScheduler {
    origin: Instant,
    queue: RefCell<BinaryHeap<DueTask>>,
    next_seq: Cell<u64>,
}

impl StdScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            origin: Instant::now(),
            queue: RefCell::new(BinaryHeap::new()),
            next_seq: Cell::new(0),
        })
    }

    /// Milliseconds until the earliest pending task, or `None` when idle.
    /// Zero means a task is already due.
    pub fn idle_delay_ms(&self) -> Option<u64> {
        let queue = self.queue.borrow();
        let next = queue.peek()?;
        Some(next.due_ms.saturating_sub(self.now_millis()))
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    /// Run every task whose due time has passed, including tasks that
    /// become due while earlier ones run. Returns how many ran.
    pub fn run_due(&self) -> usize {
        let mut ran = 0;
        loop {
            let now = self.now_millis();
            let task = {
                let mut queue = self.queue.borrow_mut();
                match queue.peek() {
                    Some(next) if next.due_ms <= now => queue.pop(),
                    _ => None,
                }
            };
            let Some(task) = task else {
                break;
            };
            // Queue borrow released: the task may schedule follow-ups.
            (task.task)();
            ran += 1;
        }
        if ran > 0 {
            trace!("std scheduler: ran {ran} due tasks");
        }
        ran
    }
}

impl Scheduler for StdScheduler {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn post_delayed(&self, delay_ms: u64, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(DueTask {
            due_ms: self.now_millis() + delay_ms,
            seq,
            task,
        });
    }
}
