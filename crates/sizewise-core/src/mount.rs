use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::trace;

use crate::component::{Instance, MountableComponent, Updater};
use crate::element::Element;
use crate::host::RenderHost;
use crate::node::NodeHandle;

// An instance that keeps invalidating itself during its own commit is a bug
// in the instance, not load; fail loudly instead of spinning.
const MAX_RENDER_PASSES: usize = 64;

/// A realized element: the host node (if the host produced one) plus the
/// realized children, remembered across passes so unchanged elements update
/// their existing node instead of churning through create/remove.
struct Realized {
    kind: &'static str,
    handle: Option<NodeHandle>,
    children: Vec<Realized>,
}

/// Driver for one mounted component.
///
/// Owns the instance, realizes its element tree against the [`RenderHost`],
/// fires node-ref callbacks during realization, invokes
/// [`Instance::committed`] after every pass, and services re-render requests
/// issued through the instance's [`Updater`]. Requests that arrive while a
/// pass is in flight are coalesced into one follow-up pass.
pub struct Mount<C: MountableComponent> {
    core: Rc<MountCore<C>>,
}

struct MountCore<C: MountableComponent> {
    host: Rc<dyn RenderHost>,
    instance: RefCell<Option<C::Instance>>,
    realized: RefCell<Option<Realized>>,
    rendering: Cell<bool>,
    pending: Cell<bool>,
    // Keeps the updater's render entry point alive until unmount.
    render_request: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<C: MountableComponent> Mount<C> {
    pub fn new(host: Rc<dyn RenderHost>, component: &C, props: C::Props) -> Self {
        let core = Rc::new(MountCore {
            host,
            instance: RefCell::new(None),
            realized: RefCell::new(None),
            rendering: Cell::new(false),
            pending: Cell::new(false),
            render_request: RefCell::new(None),
        });
        let request: Rc<dyn Fn()> = {
            let weak = Rc::downgrade(&core);
            Rc::new(move || {
                if let Some(core) = weak.upgrade() {
                    MountCore::request_render(&core);
                }
            })
        };
        let updater = Updater::new(Rc::downgrade(&request));
        *core.render_request.borrow_mut() = Some(request);
        *core.instance.borrow_mut() = Some(component.instantiate(props, updater));
        MountCore::render_pass(&core);
        Self { core }
    }

    /// Deliver new props and re-render. A no-op after unmount.
    pub fn set_props(&self, props: C::Props) {
        let updated = {
            let mut slot = self.core.instance.borrow_mut();
            match slot.as_mut() {
                Some(instance) => {
                    instance.update_props(props);
                    true
                }
                None => false,
            }
        };
        if updated {
            MountCore::request_render(&self.core);
        }
    }

    /// The host node realized for the root element, if any.
    pub fn root_handle(&self) -> Option<NodeHandle> {
        self.core
            .realized
            .borrow()
            .as_ref()
            .and_then(|realized| realized.handle.clone())
    }

    /// Kind of the currently realized root element, if any.
    pub fn root_kind(&self) -> Option<&'static str> {
        self.core.realized.borrow().as_ref().map(|realized| realized.kind)
    }

    pub fn is_mounted(&self) -> bool {
        self.core.instance.borrow().is_some()
    }

    /// Tear the instance down and release every realized node.
    /// Idempotent; later `set_props`/updater requests become no-ops.
    pub fn unmount(&self) {
        let instance = self.core.instance.borrow_mut().take();
        let Some(mut instance) = instance else {
            return;
        };
        instance.unmount();
        if let Some(realized) = self.core.realized.borrow_mut().take() {
            release(self.core.host.as_ref(), realized);
        }
        self.core.render_request.borrow_mut().take();
        trace!("mount: unmounted");
    }
}

impl<C: MountableComponent> MountCore<C> {
    fn request_render(core: &Rc<Self>) {
        // Checked before touching the instance slot: requests issued from
        // inside commit arrive while the slot is mutably borrowed.
        if core.rendering.get() {
            core.pending.set(true);
            return;
        }
        if core.instance.borrow().is_none() {
            return;
        }
        Self::render_pass(core);
    }

    fn render_pass(core: &Rc<Self>) {
        core.rendering.set(true);
        let mut passes = 0;
        loop {
            core.pending.set(false);
            passes += 1;
            if passes > MAX_RENDER_PASSES {
                core.rendering.set(false);
                panic!("mount: render did not settle after {MAX_RENDER_PASSES} passes");
            }
            let element = {
                let mut slot = core.instance.borrow_mut();
                let Some(instance) = slot.as_mut() else {
                    break;
                };
                instance.render()
            };
            let previous = core.realized.borrow_mut().take();
            // Node refs fire in here, outside any instance borrow.
            let next = realize(core.host.as_ref(), &element, previous);
            *core.realized.borrow_mut() = Some(next);
            {
                let mut slot = core.instance.borrow_mut();
                if let Some(instance) = slot.as_mut() {
                    instance.committed();
                }
            }
            if !core.pending.get() {
                break;
            }
            trace!("mount: follow-up render pass {passes}");
        }
        core.rendering.set(false);
    }
}

fn realize(host: &dyn RenderHost, element: &Element, previous: Option<Realized>) -> Realized {
    let mut current = match previous {
        Some(mut existing) if existing.kind == element.kind() => {
            match &existing.handle {
                Some(handle) => host.update_node(handle, element.spec()),
                // A pass that realized nothing is a retry-next-render
                // condition, not a settled state: ask the host again.
                None => existing.handle = host.create_node(element.spec()),
            }
            existing
        }
        other => {
            if let Some(stale) = other {
                release(host, stale);
            }
            Realized {
                kind: element.kind(),
                handle: host.create_node(element.spec()),
                children: Vec::new(),
            }
        }
    };

    // Children reconcile positionally; trailing leftovers are released.
    let mut old_iter = std::mem::take(&mut current.children).into_iter();
    for child in element.children() {
        let prev = old_iter.next();
        current.children.push(realize(host, child, prev));
    }
    for extra in old_iter {
        release(host, extra);
    }

    if let Some(handle) = &current.handle {
        for node_ref in element.node_refs() {
            node_ref(handle);
        }
    }
    current
}

fn release(host: &dyn RenderHost, realized: Realized) {
    for child in realized.children {
        release(host, child);
    }
    if let Some(handle) = realized.handle {
        host.remove_node(&handle);
    }
}
