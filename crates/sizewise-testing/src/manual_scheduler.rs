use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sizewise_core::Scheduler;

/// Scheduler whose clock only moves when the test advances it.
///
/// Tasks run in due order (submission order within the same millisecond),
/// and a task scheduled by a running task still runs in the same
/// `advance_to` call if its due time is inside the advanced range, which is
/// what a debounce re-arm needs to behave realistically.
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    queue: RefCell<Vec<Due>>,
    next_seq: Cell<u64>,
}

struct Due {
    due_ms: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            now_ms: Cell::new(0),
            queue: RefCell::new(Vec::new()),
            next_seq: Cell::new(0),
        })
    }

    /// Move the clock to `at_ms`, running every task that falls due on the
    /// way, each at its own due timestamp.
    pub fn advance_to(&self, at_ms: u64) {
        loop {
            let next_index = {
                let queue = self.queue.borrow();
                queue
                    .iter()
                    .enumerate()
                    .filter(|(_, due)| due.due_ms <= at_ms)
                    .min_by_key(|(_, due)| (due.due_ms, due.seq))
                    .map(|(index, _)| index)
            };
            let Some(index) = next_index else {
                break;
            };
            let due = self.queue.borrow_mut().remove(index);
            self.now_ms.set(self.now_ms.get().max(due.due_ms));
            (due.task)();
        }
        self.now_ms.set(self.now_ms.get().max(at_ms));
    }

    pub fn advance_by(&self, delta_ms: u64) {
        self.advance_to(self.now_ms.get() + delta_ms);
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Scheduler for ManualScheduler {
    fn now_millis(&self) -> u64 {
        self.now_ms.get()
    }

    fn post_delayed(&self, delay_ms: u64, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(Due {
            due_ms: self.now_ms.get() + delay_ms,
            seq,
            task,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_tasks_in_due_order_at_their_timestamps() {
        let scheduler = ManualScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(30_u64, "late"), (10, "early")] {
            let seen = Rc::clone(&seen);
            let scheduler_inner = Rc::clone(&scheduler);
            scheduler.post_delayed(
                delay,
                Box::new(move || {
                    seen.borrow_mut().push((label, scheduler_inner.now_millis()));
                }),
            );
        }
        scheduler.advance_to(40);
        assert_eq!(*seen.borrow(), [("early", 10), ("late", 30)]);
        assert_eq!(scheduler.now_millis(), 40);
    }

    #[test]
    fn tasks_armed_mid_advance_run_within_the_same_advance() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0_u32));
        {
            let scheduler_inner = Rc::clone(&scheduler);
            let hits = Rc::clone(&hits);
            scheduler.post_delayed(
                10,
                Box::new(move || {
                    let hits = Rc::clone(&hits);
                    scheduler_inner.post_delayed(10, Box::new(move || hits.set(hits.get() + 1)));
                }),
            );
        }
        scheduler.advance_to(25);
        assert_eq!(hits.get(), 1, "follow-up due at 20 runs before the clock reaches 25");
    }
}
