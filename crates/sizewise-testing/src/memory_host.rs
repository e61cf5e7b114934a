use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use rustc_hash::FxHashMap;

use sizewise_core::{Bounds, HostNode, NodeHandle, NodeIdentity, NodeSpec, RenderHost, Style};

/// Node produced by [`MemoryHost`]: records the applied spec and carries
/// whatever bounds the test writes into it.
pub struct MemoryNode {
    kind: &'static str,
    class_name: RefCell<Option<String>>,
    style: RefCell<Option<Style>>,
    bounds: Cell<Bounds>,
}

impl MemoryNode {
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn class_name(&self) -> Option<String> {
        self.class_name.borrow().clone()
    }

    pub fn style(&self) -> Option<Style> {
        self.style.borrow().clone()
    }

    pub fn set_bounds(&self, width: f32, height: f32) {
        self.bounds.set(Bounds::new(width, height));
    }
}

impl HostNode for MemoryNode {
    fn bounding_box(&self) -> Bounds {
        self.bounds.get()
    }
}

/// In-memory render host for headless tests.
///
/// Flip [`MemoryHost::set_resolvable`] off to emulate a no-DOM environment
/// in which `create_node` produces nothing.
pub struct MemoryHost {
    nodes: RefCell<FxHashMap<NodeIdentity, Rc<MemoryNode>>>,
    created: Cell<u32>,
    removed: Cell<u32>,
    resolvable: Cell<bool>,
}

impl MemoryHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            nodes: RefCell::new(FxHashMap::default()),
            created: Cell::new(0),
            removed: Cell::new(0),
            resolvable: Cell::new(true),
        })
    }

    /// Whether `create_node` produces nodes at all.
    pub fn set_resolvable(&self, resolvable: bool) {
        self.resolvable.set(resolvable);
    }

    /// The live node behind `handle`.
    ///
    /// # Panics
    /// Panics if the handle does not belong to a live node of this host.
    pub fn node(&self, handle: &NodeHandle) -> Rc<MemoryNode> {
        self.nodes
            .borrow()
            .get(&handle.identity())
            .cloned()
            .expect("memory host: handle does not designate a live node")
    }

    pub fn set_node_bounds(&self, handle: &NodeHandle, width: f32, height: f32) {
        self.node(handle).set_bounds(width, height);
    }

    pub fn created_count(&self) -> u32 {
        self.created.get()
    }

    pub fn removed_count(&self) -> u32 {
        self.removed.get()
    }

    pub fn live_count(&self) -> usize {
        self.nodes.borrow().len()
    }
}

impl RenderHost for MemoryHost {
    fn create_node(&self, spec: &NodeSpec) -> Option<NodeHandle> {
        if !self.resolvable.get() {
            return None;
        }
        let node = Rc::new(MemoryNode {
            kind: spec.kind_name(),
            class_name: RefCell::new(spec.class().map(str::to_owned)),
            style: RefCell::new(spec.style_decls().cloned()),
            bounds: Cell::new(Bounds::ZERO),
        });
        let handle = NodeHandle::new(Rc::clone(&node) as Rc<dyn HostNode>);
        self.nodes.borrow_mut().insert(handle.identity(), node);
        self.created.set(self.created.get() + 1);
        Some(handle)
    }

    fn update_node(&self, node: &NodeHandle, spec: &NodeSpec) {
        match self.nodes.borrow().get(&node.identity()) {
            Some(live) => {
                *live.class_name.borrow_mut() = spec.class().map(str::to_owned);
                *live.style.borrow_mut() = spec.style_decls().cloned();
            }
            None => warn!("memory host: update for a node that is not live"),
        }
    }

    fn remove_node(&self, node: &NodeHandle) {
        if self.nodes.borrow_mut().remove(&node.identity()).is_some() {
            self.removed.set(self.removed.get() + 1);
        }
    }
}
