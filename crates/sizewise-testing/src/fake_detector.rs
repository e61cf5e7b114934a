use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use sizewise_core::{NodeHandle, NodeIdentity, ResizeCallback, ResizeDetector};

/// In-memory stand-in for the platform's resize-detection primitive.
///
/// Listeners are keyed by node identity, as the real registry would be.
/// Nothing fires on its own: tests call [`FakeResizeDetector::emit`] to
/// simulate the platform noticing a size change.
pub struct FakeResizeDetector {
    listeners: RefCell<FxHashMap<NodeIdentity, Vec<ResizeCallback>>>,
    observe_calls: Cell<u32>,
    unobserve_calls: Cell<u32>,
}

impl FakeResizeDetector {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            listeners: RefCell::new(FxHashMap::default()),
            observe_calls: Cell::new(0),
            unobserve_calls: Cell::new(0),
        })
    }

    /// Fire every callback registered for `node`.
    pub fn emit(&self, node: &NodeHandle) {
        let callbacks = self
            .listeners
            .borrow()
            .get(&node.identity())
            .cloned()
            .unwrap_or_default();
        for callback in callbacks {
            callback();
        }
    }

    /// How many callbacks are currently registered for `node`.
    pub fn observer_count(&self, node: &NodeHandle) -> usize {
        self.listeners
            .borrow()
            .get(&node.identity())
            .map_or(0, Vec::len)
    }

    /// Total `observe` calls ever made.
    pub fn observe_calls(&self) -> u32 {
        self.observe_calls.get()
    }

    /// Total `unobserve_all` calls ever made.
    pub fn unobserve_calls(&self) -> u32 {
        self.unobserve_calls.get()
    }

    /// Nodes that still have at least one listener.
    pub fn observed_node_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ResizeDetector for FakeResizeDetector {
    fn observe(&self, node: &NodeHandle, callback: ResizeCallback) {
        self.observe_calls.set(self.observe_calls.get() + 1);
        self.listeners
            .borrow_mut()
            .entry(node.identity())
            .or_default()
            .push(callback);
    }

    fn unobserve_all(&self, node: &NodeHandle) {
        self.unobserve_calls.set(self.unobserve_calls.get() + 1);
        self.listeners.borrow_mut().remove(&node.identity());
    }
}
