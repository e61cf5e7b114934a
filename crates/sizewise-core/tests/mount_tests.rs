use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sizewise_testing::MemoryHost;

use sizewise_core::{Element, Instance, Mount, MountableComponent, NodeSpec, RenderHost, Updater};

type BuildFn = Rc<dyn Fn() -> Element>;

struct TreeProps {
    build: BuildFn,
    renders: Rc<Cell<u32>>,
}

impl TreeProps {
    fn new(build: impl Fn() -> Element + 'static) -> Self {
        Self {
            build: Rc::new(build),
            renders: Rc::new(Cell::new(0)),
        }
    }

    fn with_counter(build: impl Fn() -> Element + 'static, renders: &Rc<Cell<u32>>) -> Self {
        Self {
            build: Rc::new(build),
            renders: Rc::clone(renders),
        }
    }
}

struct TreeComponent;

struct TreeInstance {
    props: TreeProps,
}

impl MountableComponent for TreeComponent {
    type Props = TreeProps;
    type Instance = TreeInstance;

    fn instantiate(&self, props: Self::Props, _updater: Updater) -> Self::Instance {
        TreeInstance { props }
    }
}

impl Instance for TreeInstance {
    type Props = TreeProps;

    fn update_props(&mut self, props: Self::Props) {
        self.props = props;
    }

    fn render(&mut self) -> Element {
        self.props.renders.set(self.props.renders.get() + 1);
        (self.props.build)()
    }

    fn committed(&mut self) {}

    fn unmount(&mut self) {}
}

fn panel(class: &str) -> Element {
    Element::new(NodeSpec::new("panel").class_name(Some(class.to_owned())))
}

#[test]
fn same_kind_updates_the_existing_node_in_place() {
    let host = MemoryHost::new();
    let mount = Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &TreeComponent,
        TreeProps::new(|| panel("first")),
    );
    assert_eq!(host.created_count(), 1);

    mount.set_props(TreeProps::new(|| panel("second")));
    assert_eq!(host.created_count(), 1, "no node churn for an unchanged kind");
    let root = mount.root_handle().expect("root realized");
    assert_eq!(host.node(&root).class_name().as_deref(), Some("second"));
}

#[test]
fn kind_change_swaps_the_node() {
    let host = MemoryHost::new();
    let mount = Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &TreeComponent,
        TreeProps::new(|| panel("only")),
    );
    let first = mount.root_handle().expect("root realized");

    mount.set_props(TreeProps::new(|| Element::new(NodeSpec::new("label"))));
    let second = mount.root_handle().expect("root realized");

    assert!(!second.same_node(&first));
    assert_eq!(host.created_count(), 2);
    assert_eq!(host.removed_count(), 1);
    assert_eq!(host.node(&second).kind(), "label");
}

#[test]
fn trailing_children_are_released_when_the_tree_shrinks() {
    let host = MemoryHost::new();
    let two_children = || {
        Element::new(NodeSpec::new("column"))
            .with_children(vec![panel("a"), panel("b")])
    };
    let one_child = || Element::new(NodeSpec::new("column")).with_children(vec![panel("a")]);

    let mount = Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &TreeComponent,
        TreeProps::new(two_children),
    );
    assert_eq!(host.live_count(), 3);

    mount.set_props(TreeProps::new(one_child));
    assert_eq!(host.live_count(), 2);
    assert_eq!(host.removed_count(), 1);
}

#[test]
fn unresolvable_host_is_retried_on_the_next_render() {
    let host = MemoryHost::new();
    host.set_resolvable(false);
    let mount = Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &TreeComponent,
        TreeProps::new(|| panel("late")),
    );
    assert!(mount.root_handle().is_none());

    host.set_resolvable(true);
    mount.set_props(TreeProps::new(|| panel("late")));
    assert!(mount.root_handle().is_some(), "resolution retried once the host can deliver");
}

#[test]
fn node_refs_receive_the_realized_handle() {
    let host = MemoryHost::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let build = {
        let seen = Rc::clone(&seen);
        move || {
            let mut element = panel("tracked");
            let seen = Rc::clone(&seen);
            element.push_node_ref(Rc::new(move |handle| {
                seen.borrow_mut().push(handle.identity());
            }));
            element
        }
    };
    let mount = Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &TreeComponent,
        TreeProps::new(build),
    );
    let root = mount.root_handle().expect("root realized");
    assert_eq!(*seen.borrow(), vec![root.identity()]);
}

#[test]
fn node_refs_stay_silent_without_a_node() {
    let host = MemoryHost::new();
    host.set_resolvable(false);
    let fired = Rc::new(Cell::new(false));
    let build = {
        let fired = Rc::clone(&fired);
        move || {
            let mut element = panel("tracked");
            let fired = Rc::clone(&fired);
            element.push_node_ref(Rc::new(move |_| fired.set(true)));
            element
        }
    };
    Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &TreeComponent,
        TreeProps::new(build),
    );
    assert!(!fired.get());
}

#[test]
fn unmount_releases_every_realized_node() {
    let host = MemoryHost::new();
    let renders = Rc::new(Cell::new(0));
    let mount = Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &TreeComponent,
        TreeProps::with_counter(
            || Element::new(NodeSpec::new("column")).with_children(vec![panel("a"), panel("b")]),
            &renders,
        ),
    );
    assert_eq!(host.live_count(), 3);
    assert_eq!(renders.get(), 1);

    mount.unmount();
    assert_eq!(host.live_count(), 0);
    assert!(!mount.is_mounted());

    // Delivering props after unmount is a no-op.
    mount.set_props(TreeProps::with_counter(|| panel("gone"), &renders));
    assert_eq!(renders.get(), 1);
    assert_eq!(host.live_count(), 0);
}

struct ReentrantComponent;

struct ReentrantInstance {
    updater: Updater,
    requested: bool,
    renders: Rc<Cell<u32>>,
}

impl MountableComponent for ReentrantComponent {
    type Props = Rc<Cell<u32>>;
    type Instance = ReentrantInstance;

    fn instantiate(&self, props: Self::Props, updater: Updater) -> Self::Instance {
        ReentrantInstance {
            updater,
            requested: false,
            renders: props,
        }
    }
}

impl Instance for ReentrantInstance {
    type Props = Rc<Cell<u32>>;

    fn update_props(&mut self, props: Self::Props) {
        self.renders = props;
    }

    fn render(&mut self) -> Element {
        self.renders.set(self.renders.get() + 1);
        Element::new(NodeSpec::new("panel"))
    }

    fn committed(&mut self) {
        // First commit invalidates itself, as a state write during commit would.
        if !self.requested {
            self.requested = true;
            self.updater.request_render();
        }
    }

    fn unmount(&mut self) {}
}

#[test]
fn render_request_during_commit_coalesces_into_a_follow_up_pass() {
    let host = MemoryHost::new();
    let renders = Rc::new(Cell::new(0));
    let mount = Mount::new(
        Rc::clone(&host) as Rc<dyn RenderHost>,
        &ReentrantComponent,
        Rc::clone(&renders),
    );
    assert_eq!(renders.get(), 2, "exactly one follow-up pass");
    assert_eq!(host.created_count(), 1, "same node reused across passes");
    mount.unmount();
}

#[test]
fn detached_updater_drops_requests() {
    let updater = Updater::detached();
    updater.request_render();
}
