//! Size-aware component composition.
//!
//! `sizewise` wraps an arbitrary component so it always knows its own
//! rendered width/height, without the component managing measurement itself.
//! Applications use it for size-driven rendering logic ("render the compact
//! view below 400px") inside a component-tree UI.
//!
//! The entry point is [`with_size`]: validate a [`MonitorConfig`] once,
//! capture it, and produce a composed component. Every mounted instance of
//! the composed component renders a sized placeholder until a first
//! measurement arrives, keeps a resize-observer subscription attached to the
//! live host node across re-renders and across the placeholder→real swap,
//! and funnels change detection through a throttled or debounced callback.
//!
//! ```no_run
//! use std::rc::Rc;
//! use sizewise::{with_size, MonitorConfig, RefreshMode, SizeAwareProps, SizedProps, SizedRender};
//! use sizewise_core::{Element, Mount, NodeSpec, Platform};
//!
//! struct Chart;
//!
//! impl SizedRender for Chart {
//!     type Passthrough = String;
//!
//!     fn render(&self, props: &SizedProps<String>) -> Element {
//!         let kind = match props.size.width {
//!             Some(width) if width < 400.0 => "chart-compact",
//!             _ => "chart-full",
//!         };
//!         Element::new(NodeSpec::new(kind))
//!     }
//! }
//!
//! fn build(platform: Platform, host: Rc<dyn sizewise_core::RenderHost>) {
//!     let config = MonitorConfig::default()
//!         .monitor_height(true)
//!         .refresh_mode(RefreshMode::Debounce);
//!     let chart = with_size(config, platform, Chart).expect("valid config");
//!     let mount = Mount::new(host, &chart, SizeAwareProps::new("revenue".to_owned()));
//!     let _ = mount;
//! }
//! ```

mod compose;
mod config;
mod controller;
mod indirection;
mod placeholder;
mod rate_limit;
mod selector;
mod size;
pub mod ssr;

pub use compose::{with_size, with_size_default, SizeAware, SizeAwareProps, SizedProps, SizedRender};
pub use config::{ConfigError, MonitorConfig, RefreshMode, ValidConfig, MIN_REFRESH_RATE_MS};
pub use controller::SizeController;
pub use indirection::slot;
pub use placeholder::{placeholder, PLACEHOLDER_KIND};
pub use rate_limit::RateLimited;
pub use size::Size;
