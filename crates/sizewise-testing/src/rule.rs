use std::rc::Rc;

use sizewise_core::{
    Mount, MountableComponent, NodeHandle, Platform, RenderHost, ResizeDetector, Scheduler,
};

use crate::fake_detector::FakeResizeDetector;
use crate::manual_scheduler::ManualScheduler;
use crate::memory_host::MemoryHost;

/// Headless harness for exercising size-aware compositions.
///
/// Bundles the memory render host, the fake resize registry and the manual
/// clock behind mount/drive/assert helpers, mirroring the ergonomics of a
/// windowed test rule without requiring a windowing backend.
pub struct SizeTestRule {
    host: Rc<MemoryHost>,
    detector: Rc<FakeResizeDetector>,
    scheduler: Rc<ManualScheduler>,
}

impl SizeTestRule {
    pub fn new() -> Self {
        Self {
            host: MemoryHost::new(),
            detector: FakeResizeDetector::new(),
            scheduler: ManualScheduler::new(),
        }
    }

    /// Platform services to hand to `with_size`.
    pub fn platform(&self) -> Platform {
        Platform::new(
            Rc::clone(&self.detector) as Rc<dyn ResizeDetector>,
            Rc::clone(&self.scheduler) as Rc<dyn Scheduler>,
        )
    }

    pub fn host(&self) -> &Rc<MemoryHost> {
        &self.host
    }

    pub fn detector(&self) -> &Rc<FakeResizeDetector> {
        &self.detector
    }

    pub fn scheduler(&self) -> &Rc<ManualScheduler> {
        &self.scheduler
    }

    /// Mount `component` against the memory host.
    pub fn mount<C: MountableComponent>(&self, component: &C, props: C::Props) -> Mount<C> {
        Mount::new(
            Rc::clone(&self.host) as Rc<dyn RenderHost>,
            component,
            props,
        )
    }

    /// Write new bounds into `node` and fire its resize listeners, as the
    /// platform would on a real size change.
    pub fn resize(&self, node: &NodeHandle, width: f32, height: f32) {
        self.host.set_node_bounds(node, width, height);
        self.detector.emit(node);
    }

    pub fn advance_to(&self, at_ms: u64) {
        self.scheduler.advance_to(at_ms);
    }

    pub fn advance_by(&self, delta_ms: u64) {
        self.scheduler.advance_by(delta_ms);
    }
}

impl Default for SizeTestRule {
    fn default() -> Self {
        Self::new()
    }
}
