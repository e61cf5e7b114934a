use std::rc::Rc;

use crate::node::NodeHandle;

/// Callback invoked when an observed node's size may have changed.
///
/// Deliberately takes no arguments: the subscriber re-reads the node's
/// bounding box itself, so a stale or coalesced notification costs one
/// redundant measurement rather than delivering stale geometry.
pub type ResizeCallback = Rc<dyn Fn()>;

/// The platform's resize-detection primitive.
///
/// Subscriptions are keyed by node identity. Callers pair every `observe`
/// with an `unobserve_all` on the same node before re-attaching or dropping
/// the handle, so a node never accumulates ghost listeners. Both operations
/// are infallible; a host that cannot watch a node simply never invokes the
/// callback.
pub trait ResizeDetector {
    fn observe(&self, node: &NodeHandle, callback: ResizeCallback);
    fn unobserve_all(&self, node: &NodeHandle);
}
