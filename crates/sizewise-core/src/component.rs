use std::rc::{Rc, Weak};

use crate::element::Element;

/// One mounted, stateful occurrence of a component.
///
/// The mount driver owns the instance and drives it through the host
/// lifecycle: `render` produces the element tree, `committed` runs after the
/// tree has been realized against the host (this is where node resolution
/// results become visible), and `unmount` releases everything the instance
/// acquired. `update_props` delivers new props from the parent; the driver
/// re-renders afterwards.
pub trait Instance: 'static {
    type Props: 'static;

    fn update_props(&mut self, props: Self::Props);
    fn render(&mut self) -> Element;
    fn committed(&mut self);
    fn unmount(&mut self);
}

/// A component that can be mounted: a factory for [`Instance`]s.
///
/// The factory itself is stateless with respect to any one mount; it may be
/// mounted any number of times, and every instance owns disjoint state.
pub trait MountableComponent: 'static {
    type Props: 'static;
    type Instance: Instance<Props = Self::Props>;

    fn instantiate(&self, props: Self::Props, updater: Updater) -> Self::Instance;
}

/// Handle an instance uses to ask its mount for a re-render.
///
/// Holds only a weak reference to the mount's render entry point, so a
/// request arriving after unmount silently drops instead of reviving a dead
/// mount. Cheap to clone into callbacks.
#[derive(Clone)]
pub struct Updater {
    request: Weak<dyn Fn()>,
}

impl Updater {
    pub(crate) fn new(request: Weak<dyn Fn()>) -> Self {
        Self { request }
    }

    /// An updater with no mount behind it; every request is dropped.
    pub fn detached() -> Self {
        let alive: Rc<dyn Fn()> = Rc::new(|| {});
        let request = Rc::downgrade(&alive);
        drop(alive);
        Self { request }
    }

    pub fn request_render(&self) {
        if let Some(request) = self.request.upgrade() {
            request();
        }
    }
}
