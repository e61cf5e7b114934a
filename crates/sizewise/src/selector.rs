use sizewise_core::{Element, Style};

use crate::compose::{SizedProps, SizedRender};
use crate::placeholder::placeholder;
use crate::size::Size;

/// Per-render choice between the placeholder and the wrapped component.
///
/// The placeholder appears only while no monitored axis has ever been
/// measured and placeholder rendering is not disabled. Measured projections
/// always carry a value on the monitored axes, so once either axis is known
/// the wrapped component stays for the rest of the instance's lifetime,
/// whatever later sizes arrive.
pub(crate) fn select<C: SizedRender>(
    component: &C,
    size: Size,
    disable_placeholder: bool,
    class_name: Option<&str>,
    style: Option<&Style>,
    rest: &C::Passthrough,
) -> Element {
    if size.is_unmeasured() && !disable_placeholder {
        return placeholder(class_name, style);
    }
    let props = SizedProps {
        size,
        class_name: class_name.map(str::to_owned),
        style: style.cloned(),
        rest: rest.clone(),
    };
    component.render(&props)
}
