use sizewise_core::{Element, NodeRef};

/// Single-child passthrough that exposes a stable handle onto whichever
/// element currently occupies the slot.
///
/// The child renders unmodified; the supplied callback is attached so it
/// receives the host node of whatever is rendered there, placeholder or
/// real component. The owner keeps observing one logical slot across the
/// swap instead of re-resolving from scratch.
///
/// # Panics
///
/// Panics unless given exactly one child. That is a structural precondition
/// violation by the caller, not a recoverable runtime state.
pub fn slot(mut children: Vec<Element>, node_ref: NodeRef) -> Element {
    assert!(
        children.len() == 1,
        "reference slot requires exactly one child element, got {}",
        children.len()
    );
    let mut child = children.pop().expect("slot child present");
    child.push_node_ref(node_ref);
    child
}
