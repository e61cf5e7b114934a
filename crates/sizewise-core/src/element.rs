use std::borrow::Cow;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::node::NodeHandle;

/// Callback receiving the realized host node for an element.
///
/// Fired by the mount driver during tree realization, once per render pass,
/// and only when the host actually produced a node.
pub type NodeRef = Rc<dyn Fn(&NodeHandle)>;

/// Inline style declarations carried by an element, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    declarations: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        property: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(property, value)| (property.as_ref(), value.as_ref()))
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(candidate, _)| candidate.as_ref() == property)
            .map(|(_, value)| value.as_ref())
    }
}

/// Description of a single host node: what kind of node to create and the
/// class/style it should carry. Hosts interpret `kind` however they like;
/// the mount driver only uses it to decide whether an existing node can be
/// updated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    kind: &'static str,
    class_name: Option<String>,
    style: Option<Style>,
}

impl NodeSpec {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            class_name: None,
            style: None,
        }
    }

    pub fn class_name(mut self, class_name: Option<String>) -> Self {
        self.class_name = class_name;
        self
    }

    pub fn style(mut self, style: Option<Style>) -> Self {
        self.style = style;
        self
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind
    }

    pub fn class(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn style_decls(&self) -> Option<&Style> {
        self.style.as_ref()
    }
}

/// One element of a render output tree.
pub struct Element {
    spec: NodeSpec,
    children: Vec<Element>,
    // Usually zero or one ref per element; the indirection slot adds one.
    node_refs: SmallVec<[NodeRef; 1]>,
}

impl Element {
    pub fn new(spec: NodeSpec) -> Self {
        Self {
            spec,
            children: Vec::new(),
            node_refs: SmallVec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Attach a callback that will receive this element's realized node.
    /// Multiple refs may be attached; all fire on every realization.
    pub fn push_node_ref(&mut self, node_ref: NodeRef) {
        self.node_refs.push(node_ref);
    }

    pub fn spec(&self) -> &NodeSpec {
        &self.spec
    }

    pub fn kind(&self) -> &'static str {
        self.spec.kind_name()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub(crate) fn node_refs(&self) -> &[NodeRef] {
        &self.node_refs
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
