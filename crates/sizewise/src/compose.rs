use std::rc::Rc;

use sizewise_core::{Element, MountableComponent, Platform, Style, Updater};

use crate::config::{ConfigError, MonitorConfig, ValidConfig};
use crate::controller::SizeController;
use crate::size::Size;

/// Props delivered to the wrapped component: the injected size, the
/// forwarded class/style, and the caller's own props untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct SizedProps<P> {
    pub size: Size,
    pub class_name: Option<String>,
    pub style: Option<Style>,
    pub rest: P,
}

/// A component that can be wrapped with size awareness.
///
/// `Passthrough` is whatever props the component takes besides the injected
/// ones; the composed component forwards them unchanged.
pub trait SizedRender: 'static {
    type Passthrough: Clone + 'static;

    fn render(&self, props: &SizedProps<Self::Passthrough>) -> Element;
}

/// Props accepted by the composed component.
#[derive(Clone, Debug)]
pub struct SizeAwareProps<P> {
    pub class_name: Option<String>,
    pub style: Option<Style>,
    /// Skip the placeholder and render the wrapped component immediately,
    /// with an unmeasured size. Also forced on process-wide by
    /// [`crate::ssr::enable_ssr_behaviour`].
    pub disable_placeholder: bool,
    pub rest: P,
}

impl<P> SizeAwareProps<P> {
    pub fn new(rest: P) -> Self {
        Self {
            class_name: None,
            style: None,
            disable_placeholder: false,
            rest,
        }
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn disable_placeholder(mut self, disable: bool) -> Self {
        self.disable_placeholder = disable;
        self
    }
}

/// The composed, size-aware component produced by [`with_size`].
///
/// Mountable any number of times; every mounted instance owns one
/// [`SizeController`] with its own size, node handle and rate limiter.
pub struct SizeAware<C: SizedRender> {
    component: Rc<C>,
    config: ValidConfig,
    platform: Platform,
}

impl<C: SizedRender> MountableComponent for SizeAware<C> {
    type Props = SizeAwareProps<C::Passthrough>;
    type Instance = SizeController<C>;

    fn instantiate(&self, props: Self::Props, updater: Updater) -> Self::Instance {
        SizeController::new(
            Rc::clone(&self.component),
            self.config,
            self.platform.clone(),
            props,
            updater,
        )
    }
}

/// Compose `component` with size awareness under `config`.
///
/// The configuration is validated here, once; on violation the composed
/// component is never produced. The validated config and the platform
/// services are captured and shared by every instance created from the
/// result.
pub fn with_size<C: SizedRender>(
    config: MonitorConfig,
    platform: Platform,
    component: C,
) -> Result<SizeAware<C>, ConfigError> {
    let config = config.validate()?;
    Ok(SizeAware {
        component: Rc::new(component),
        config,
        platform,
    })
}

/// [`with_size`] under the default configuration: width monitoring only,
/// 16ms throttle.
pub fn with_size_default<C: SizedRender>(platform: Platform, component: C) -> SizeAware<C> {
    with_size(MonitorConfig::default(), platform, component)
        .expect("default monitor config satisfies its own invariants")
}
