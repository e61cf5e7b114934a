//! Platform abstraction for runtime services.
//!
//! These traits let the size machinery delegate clock and deferred-execution
//! responsibilities to the host platform, so the same code runs against a
//! real event loop or a manual test clock.

use std::rc::Rc;

use crate::detector::ResizeDetector;

/// Schedules deferred work on the UI loop and tells the time.
///
/// There is deliberately no cancellation operation: owners that stop caring
/// about a scheduled task neutralize their own callback state and let the
/// task fire into a no-op. Timestamps are milliseconds from an arbitrary
/// per-scheduler origin and must be monotonic.
pub trait Scheduler {
    /// Current time in milliseconds since this scheduler's origin.
    fn now_millis(&self) -> u64;

    /// Run `task` on the UI loop once at least `delay_ms` have elapsed.
    fn post_delayed(&self, delay_ms: u64, task: Box<dyn FnOnce()>);
}

/// Bundle of the platform services one composition needs.
#[derive(Clone)]
pub struct Platform {
    detector: Rc<dyn ResizeDetector>,
    scheduler: Rc<dyn Scheduler>,
}

impl Platform {
    pub fn new(detector: Rc<dyn ResizeDetector>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            detector,
            scheduler,
        }
    }

    pub fn detector(&self) -> &Rc<dyn ResizeDetector> {
        &self.detector
    }

    pub fn scheduler(&self) -> &Rc<dyn Scheduler> {
        &self.scheduler
    }
}
