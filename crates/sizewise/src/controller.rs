use std::cell::Cell;
use std::rc::Rc;

use log::{debug, trace, warn};

use sizewise_core::{
    Element, Instance, NodeHandle, NodeRef, Platform, ResizeCallback, StateCell, Updater,
};

use crate::compose::{SizeAwareProps, SizedRender};
use crate::config::ValidConfig;
use crate::indirection::slot;
use crate::rate_limit::RateLimited;
use crate::selector::select;
use crate::size::Size;
use crate::ssr;

// Consecutive render passes without a resolvable node before the one-shot
// diagnostic fires. A tree that legitimately never produces a node stays
// silent after that.
const RESOLUTION_WARN_AFTER: u32 = 8;

/// Stateful heart of a composed instance.
///
/// Owns the measured [`Size`], re-resolves the live host node after every
/// render pass through the indirection slot, and keeps exactly one resize
/// subscription alive at a time: every re-attach is preceded by a detach
/// from the previous node, an unchanged node is never re-subscribed, and
/// unmount releases the subscription and neutralizes every callback that
/// could still fire afterwards.
pub struct SizeController<C: SizedRender> {
    component: Rc<C>,
    platform: Platform,
    props: SizeAwareProps<C::Passthrough>,
    shared: Rc<Shared>,
    // One rate-limited callback per instance, created here and never rebuilt
    // in the render path: its window state must survive re-renders.
    limited: RateLimited,
    // The resolution callback handed to the indirection slot, also created
    // once; `Shared::torn_down` turns it into a no-op at teardown.
    node_ref: NodeRef,
}

/// State shared between the controller, the resolution callback and the
/// rate-limited measurement callback.
struct Shared {
    size: Cell<Size>,
    /// Node realized by the current render pass, written by the slot's
    /// resolution callback. Cleared at the start of every pass.
    resolved: StateCell<Option<NodeHandle>>,
    /// Node the resize observer is currently attached to.
    observing: StateCell<Option<NodeHandle>>,
    torn_down: Cell<bool>,
    missed_resolutions: Cell<u32>,
    resolution_warned: Cell<bool>,
    updater: Updater,
}

impl Shared {
    /// Rate-limited change detection: re-read the observed node's bounding
    /// box, project it onto the monitored axes, and re-render on difference.
    /// Unmonitored axes never participate in the comparison.
    fn measure(&self, config: &ValidConfig) {
        if self.torn_down.get() {
            return;
        }
        let Some(node) = self.observing.get() else {
            return;
        };
        let projected = Size::project(node.bounding_box(), config);
        if projected != self.size.get() {
            trace!(
                "size controller: {:?} -> {:?}",
                self.size.get(),
                projected
            );
            self.size.set(projected);
            self.updater.request_render();
        }
    }
}

impl<C: SizedRender> SizeController<C> {
    pub(crate) fn new(
        component: Rc<C>,
        config: ValidConfig,
        platform: Platform,
        props: SizeAwareProps<C::Passthrough>,
        updater: Updater,
    ) -> Self {
        let shared = Rc::new(Shared {
            size: Cell::new(Size::UNMEASURED),
            resolved: StateCell::new(None),
            observing: StateCell::new(None),
            torn_down: Cell::new(false),
            missed_resolutions: Cell::new(0),
            resolution_warned: Cell::new(false),
            updater,
        });
        let limited = {
            let shared = Rc::clone(&shared);
            let measure: Rc<dyn Fn()> = Rc::new(move || shared.measure(&config));
            RateLimited::new(
                config.refresh_mode(),
                config.refresh_rate_ms(),
                Rc::clone(platform.scheduler()),
                measure,
            )
        };
        let node_ref: NodeRef = {
            let shared = Rc::clone(&shared);
            Rc::new(move |handle: &NodeHandle| {
                if !shared.torn_down.get() {
                    shared.resolved.replace(Some(handle.clone()));
                }
            })
        };
        Self {
            component,
            platform,
            props,
            shared,
            limited,
            node_ref,
        }
    }

    fn track_resolution_misses(&self, resolved_this_pass: bool) {
        if resolved_this_pass {
            self.shared.missed_resolutions.set(0);
            return;
        }
        let missed = self.shared.missed_resolutions.get() + 1;
        self.shared.missed_resolutions.set(missed);
        if missed == RESOLUTION_WARN_AFTER && !self.shared.resolution_warned.get() {
            self.shared.resolution_warned.set(true);
            warn!(
                "size controller: no host node resolved after {RESOLUTION_WARN_AFTER} \
                 consecutive renders; size stays unmeasured until one appears"
            );
        }
    }
}

impl<C: SizedRender> Instance for SizeController<C> {
    type Props = SizeAwareProps<C::Passthrough>;

    fn update_props(&mut self, props: Self::Props) {
        self.props = props;
    }

    fn render(&mut self) -> Element {
        // Resolution is per pass: a pass whose tree realizes no node must
        // not inherit the previous pass's handle.
        self.shared.resolved.replace(None);
        let disable_placeholder = self.props.disable_placeholder || ssr::ssr_behaviour_enabled();
        let content = select(
            self.component.as_ref(),
            self.shared.size.get(),
            disable_placeholder,
            self.props.class_name.as_deref(),
            self.props.style.as_ref(),
            &self.props.rest,
        );
        slot(vec![content], Rc::clone(&self.node_ref))
    }

    fn committed(&mut self) {
        let resolved = self.shared.resolved.get();
        let observing = self.shared.observing.get();

        let same = match (&resolved, &observing) {
            (Some(new), Some(old)) => new.same_node(old),
            (None, None) => true,
            _ => false,
        };
        if !same {
            // Detach-before-attach, always on the node we actually hold.
            if let Some(old) = &observing {
                self.platform.detector().unobserve_all(old);
                debug!("size controller: detached from previous node");
            }
            if let Some(new) = &resolved {
                let callback: ResizeCallback = {
                    let limited = self.limited.clone();
                    Rc::new(move || limited.invoke())
                };
                self.platform.detector().observe(new, callback);
                debug!("size controller: observing resolved node");
            }
            self.shared.observing.replace(resolved.clone());
        }

        self.track_resolution_misses(resolved.is_some());
    }

    fn unmount(&mut self) {
        if let Some(node) = self.shared.observing.replace(None) {
            self.platform.detector().unobserve_all(&node);
        }
        self.shared.torn_down.set(true);
        self.shared.resolved.replace(None);
        self.limited.neutralize();
        trace!("size controller: torn down");
    }
}
