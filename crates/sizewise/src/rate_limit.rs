use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::trace;

use sizewise_core::Scheduler;

use crate::config::RefreshMode;

/// Rate-limited wrapper around the change-detection callback.
///
/// One `RateLimited` exists per controller instance, constructed at instance
/// construction and reused across every render pass. The limiter's window
/// state lives inside it, so rebuilding it per render would restart the
/// window each time.
///
/// The scheduler offers no cancellation, and teardown does not need one:
/// [`RateLimited::neutralize`] empties the callback slot and any timer still
/// in flight fires into a no-op.
#[derive(Clone)]
pub struct RateLimited {
    inner: Rc<Inner>,
}

struct Inner {
    mode: RefreshMode,
    interval_ms: u64,
    scheduler: Rc<dyn Scheduler>,
    callback: RefCell<Option<Rc<dyn Fn()>>>,
    // Throttle window state.
    last_fired_at: Cell<Option<u64>>,
    trailing_armed: Cell<bool>,
    // Debounce quiescence state.
    last_invoked_at: Cell<u64>,
    debounce_armed: Cell<bool>,
}

impl RateLimited {
    pub fn new(
        mode: RefreshMode,
        interval_ms: u64,
        scheduler: Rc<dyn Scheduler>,
        callback: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                mode,
                interval_ms,
                scheduler,
                callback: RefCell::new(Some(callback)),
                last_fired_at: Cell::new(None),
                trailing_armed: Cell::new(false),
                last_invoked_at: Cell::new(0),
                debounce_armed: Cell::new(false),
            }),
        }
    }

    /// Route one raw event through the configured policy.
    pub fn invoke(&self) {
        match self.inner.mode {
            RefreshMode::Throttle => self.invoke_throttle(),
            RefreshMode::Debounce => self.invoke_debounce(),
        }
    }

    /// Drop the wrapped callback. Timers already armed still fire, into
    /// nothing; no further invocation reaches the old target.
    pub fn neutralize(&self) {
        self.inner.callback.borrow_mut().take();
    }

    fn invoke_throttle(&self) {
        let inner = &self.inner;
        let now = inner.scheduler.now_millis();
        match inner.last_fired_at.get() {
            Some(last) if now < last + inner.interval_ms => {
                // Inside an open window: collapse into one trailing call at
                // the window boundary.
                if !inner.trailing_armed.get() {
                    inner.trailing_armed.set(true);
                    let due = last + inner.interval_ms;
                    let target = Rc::clone(inner);
                    inner.scheduler.post_delayed(
                        due - now,
                        Box::new(move || {
                            target.trailing_armed.set(false);
                            let at = target.scheduler.now_millis();
                            target.fire(at);
                        }),
                    );
                }
            }
            _ => inner.fire(now),
        }
    }

    fn invoke_debounce(&self) {
        let inner = &self.inner;
        inner.last_invoked_at.set(inner.scheduler.now_millis());
        if !inner.debounce_armed.get() {
            inner.debounce_armed.set(true);
            Inner::arm_debounce(Rc::clone(inner), inner.interval_ms);
        }
    }
}

impl Inner {
    fn fire(&self, at: u64) {
        self.last_fired_at.set(Some(at));
        let callback = self.callback.borrow().clone();
        match callback {
            Some(callback) => callback(),
            None => trace!("rate limiter fired after neutralization"),
        }
    }

    fn arm_debounce(inner: Rc<Inner>, delay_ms: u64) {
        let scheduler = Rc::clone(&inner.scheduler);
        scheduler.post_delayed(
            delay_ms,
            Box::new(move || {
                let now = inner.scheduler.now_millis();
                let since_last = now.saturating_sub(inner.last_invoked_at.get());
                if since_last >= inner.interval_ms {
                    inner.debounce_armed.set(false);
                    inner.fire(now);
                } else {
                    // Events kept arriving; sleep out the rest of the
                    // quiescence window.
                    let remaining = inner.interval_ms - since_last;
                    Inner::arm_debounce(Rc::clone(&inner), remaining);
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use sizewise_testing::ManualScheduler;

    fn counted(
        mode: RefreshMode,
        interval_ms: u64,
        scheduler: &Rc<ManualScheduler>,
    ) -> (RateLimited, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0_u32));
        let callback: Rc<dyn Fn()> = {
            let fired = Rc::clone(&fired);
            Rc::new(move || fired.set(fired.get() + 1))
        };
        let scheduler: Rc<dyn Scheduler> = Rc::clone(scheduler) as Rc<dyn Scheduler>;
        (RateLimited::new(mode, interval_ms, scheduler, callback), fired)
    }

    #[test]
    fn throttle_fires_leading_edge_immediately() {
        let scheduler = ManualScheduler::new();
        let (limited, fired) = counted(RefreshMode::Throttle, 16, &scheduler);
        limited.invoke();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn throttle_collapses_window_burst_into_one_trailing_call() {
        let scheduler = ManualScheduler::new();
        let (limited, fired) = counted(RefreshMode::Throttle, 16, &scheduler);

        limited.invoke();
        scheduler.advance_to(5);
        limited.invoke();
        scheduler.advance_to(9);
        limited.invoke();
        assert_eq!(fired.get(), 1, "burst stays collapsed until the boundary");

        scheduler.advance_to(16);
        assert_eq!(fired.get(), 2, "one trailing call at the window edge");

        scheduler.advance_to(100);
        assert_eq!(fired.get(), 2, "nothing further without new events");
    }

    #[test]
    fn throttle_reopens_window_after_expiry() {
        let scheduler = ManualScheduler::new();
        let (limited, fired) = counted(RefreshMode::Throttle, 16, &scheduler);

        limited.invoke();
        scheduler.advance_to(40);
        limited.invoke();
        assert_eq!(fired.get(), 2, "past the window the leading edge fires again");
    }

    #[test]
    fn debounce_waits_for_quiescence() {
        let scheduler = ManualScheduler::new();
        let (limited, fired) = counted(RefreshMode::Debounce, 16, &scheduler);

        limited.invoke();
        scheduler.advance_to(5);
        limited.invoke();
        scheduler.advance_to(20);
        assert_eq!(fired.get(), 0, "still within 16ms of the last event");

        scheduler.advance_to(21);
        assert_eq!(fired.get(), 1, "fires 16ms after the last event");

        scheduler.advance_to(200);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn debounce_collapses_a_long_burst_into_one_call() {
        let scheduler = ManualScheduler::new();
        let (limited, fired) = counted(RefreshMode::Debounce, 16, &scheduler);

        for at in [0_u64, 4, 8, 12, 16, 20] {
            scheduler.advance_to(at);
            limited.invoke();
        }
        scheduler.advance_to(35);
        assert_eq!(fired.get(), 0);
        scheduler.advance_to(36);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn neutralized_limiter_lets_pending_timer_fire_into_nothing() {
        let scheduler = ManualScheduler::new();
        let (limited, fired) = counted(RefreshMode::Throttle, 16, &scheduler);

        limited.invoke();
        scheduler.advance_to(5);
        limited.invoke();
        assert_eq!(fired.get(), 1);

        limited.neutralize();
        scheduler.advance_to(100);
        assert_eq!(fired.get(), 1, "armed trailing timer must not reach the callback");
    }

    #[test]
    fn neutralized_limiter_ignores_later_invocations() {
        let scheduler = ManualScheduler::new();
        let (limited, fired) = counted(RefreshMode::Throttle, 16, &scheduler);

        limited.neutralize();
        limited.invoke();
        scheduler.advance_to(100);
        assert_eq!(fired.get(), 0);
    }
}
