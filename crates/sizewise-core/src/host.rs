use crate::element::NodeSpec;
use crate::node::NodeHandle;

/// Node factory side of the host framework.
///
/// The mount driver turns element trees into host nodes through this trait.
/// A host that has no real node backing (server-side rendering, headless
/// environments) returns `None` from [`RenderHost::create_node`]; the
/// element tree is still walked, but nothing downstream ever sees a handle.
pub trait RenderHost {
    /// Create a node for `spec`, or `None` if this host cannot produce one.
    fn create_node(&self, spec: &NodeSpec) -> Option<NodeHandle>;

    /// Apply `spec` to an existing node created by this host.
    fn update_node(&self, node: &NodeHandle, spec: &NodeSpec);

    /// Release a node this host created. Called when an element disappears
    /// from the tree or its kind changes, and at unmount.
    fn remove_node(&self, node: &NodeHandle);
}
