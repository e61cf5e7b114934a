//! Host-substrate boundary for the sizewise composition utility.
//!
//! The utility itself (`sizewise`) augments a component with live awareness
//! of its rendered size. Everything it has to coordinate with is owned by
//! the host: the framework's render/lifecycle machinery, the platform's
//! resize-detection primitive, and delayed-invocation scheduling. This crate
//! pins those collaborators down as traits and provides the small mount
//! driver that realizes element trees against them.
//!
//! All of this runs on the host's single UI thread; shared state is
//! `Rc`/`RefCell`/`Cell` throughout and nothing here is `Send`.

mod component;
mod detector;
mod element;
mod geometry;
mod host;
mod mount;
mod node;
mod platform;
mod state_cell;

pub use component::{Instance, MountableComponent, Updater};
pub use detector::{ResizeCallback, ResizeDetector};
pub use element::{Element, NodeRef, NodeSpec, Style};
pub use geometry::Bounds;
pub use host::RenderHost;
pub use mount::Mount;
pub use node::{HostNode, NodeHandle, NodeIdentity};
pub use platform::{Platform, Scheduler};
pub use state_cell::StateCell;
