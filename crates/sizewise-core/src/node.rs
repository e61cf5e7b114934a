use std::fmt;
use std::rc::Rc;

use crate::geometry::Bounds;

/// A concrete rendered unit whose geometry can be measured.
///
/// Hosts implement this for whatever their platform node is (a DOM element,
/// a retained scene node, an in-memory test node). The only capability the
/// size machinery needs from it is reading the current bounding box.
pub trait HostNode {
    fn bounding_box(&self) -> Bounds;
}

/// Cheaply cloneable handle onto a live host node.
///
/// Identity is pointer identity of the underlying allocation: two handles
/// designate the same node iff they share it. Handles never outlive their
/// observer subscription; the owner detaches before dropping or
/// reassigning one.
#[derive(Clone)]
pub struct NodeHandle {
    inner: Rc<dyn HostNode>,
}

/// Stable map key for a node, derived from its allocation address.
///
/// Valid only while the node is alive; registries keyed by it must remove
/// entries before the node can be dropped.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct NodeIdentity(usize);

impl NodeHandle {
    pub fn new(node: Rc<dyn HostNode>) -> Self {
        Self { inner: node }
    }

    pub fn bounding_box(&self) -> Bounds {
        self.inner.bounding_box()
    }

    /// Whether `self` and `other` designate the same host node.
    pub fn same_node(&self, other: &NodeHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn identity(&self) -> NodeIdentity {
        NodeIdentity(Rc::as_ptr(&self.inner) as *const () as usize)
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeHandle").field(&self.identity().0).finish()
    }
}
