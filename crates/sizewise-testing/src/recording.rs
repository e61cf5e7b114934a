use std::cell::RefCell;
use std::rc::Rc;

use sizewise::{SizedProps, SizedRender};
use sizewise_core::{Element, NodeSpec};

/// Element kind rendered by [`Recording`].
pub const RECORDED_KIND: &str = "recorded";

/// Every set of props a [`Recording`] component has rendered with, in
/// render order.
pub type FrameLog = Rc<RefCell<Vec<SizedProps<String>>>>;

/// Wrapped component that records the props delivered to it.
///
/// Renders a single `recorded` element carrying the forwarded class/style,
/// so tests can assert both on what the component received and on what
/// landed in the realized tree.
pub struct Recording {
    frames: FrameLog,
}

impl Recording {
    pub fn new() -> (Self, FrameLog) {
        let frames: FrameLog = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                frames: Rc::clone(&frames),
            },
            frames,
        )
    }
}

impl SizedRender for Recording {
    type Passthrough = String;

    fn render(&self, props: &SizedProps<String>) -> Element {
        self.frames.borrow_mut().push(props.clone());
        Element::new(
            NodeSpec::new(RECORDED_KIND)
                .class_name(props.class_name.clone())
                .style(props.style.clone()),
        )
    }
}
