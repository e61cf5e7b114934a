use sizewise_core::Bounds;

use crate::config::ValidConfig;

/// Last-known measured bounding box, restricted to the monitored axes.
///
/// An unmonitored axis is always `None`, never a stale value, so equality
/// between two projections is exactly per-axis comparison over the monitored
/// axes. Owned by a single controller instance and reset to unmeasured at
/// its construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Size {
    pub const UNMEASURED: Size = Size {
        width: None,
        height: None,
    };

    /// True while no monitored axis has ever been measured.
    pub fn is_unmeasured(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// Project a raw bounding box onto the monitored axes.
    pub(crate) fn project(bounds: Bounds, config: &ValidConfig) -> Size {
        Size {
            width: config.monitors_width().then_some(bounds.width),
            height: config.monitors_height().then_some(bounds.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;

    #[test]
    fn projection_blanks_unmonitored_axes() {
        let config = MonitorConfig::default().validate().expect("valid");
        let size = Size::project(Bounds::new(120.0, 48.0), &config);
        assert_eq!(size.width, Some(120.0));
        assert_eq!(size.height, None);
    }

    #[test]
    fn unmonitored_axis_change_compares_equal() {
        let config = MonitorConfig::default().validate().expect("valid");
        let before = Size::project(Bounds::new(120.0, 48.0), &config);
        let after = Size::project(Bounds::new(120.0, 300.0), &config);
        assert_eq!(before, after);
    }
}
