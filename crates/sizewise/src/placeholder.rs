use sizewise_core::{Element, NodeSpec, Style};

/// Element kind of the pre-measurement filler.
pub const PLACEHOLDER_KIND: &str = "placeholder";

/// Empty element rendered before any real measurement exists.
///
/// Its own size is irrelevant; it exists so the resize observer has a node
/// of known, attachable presence to measure. With no override it fills 100%
/// of the parent's box. A caller-supplied class or style replaces the
/// default entirely; overrides are never merged with it.
pub fn placeholder(class_name: Option<&str>, style: Option<&Style>) -> Element {
    let spec = if class_name.is_none() && style.is_none() {
        NodeSpec::new(PLACEHOLDER_KIND).style(Some(fill_parent()))
    } else {
        NodeSpec::new(PLACEHOLDER_KIND)
            .class_name(class_name.map(str::to_owned))
            .style(style.cloned())
    };
    Element::new(spec)
}

fn fill_parent() -> Style {
    Style::new().with("width", "100%").with("height", "100%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_placeholder_fills_parent() {
        let element = placeholder(None, None);
        assert_eq!(element.kind(), PLACEHOLDER_KIND);
        assert_eq!(element.child_count(), 0);
        let style = element.spec().style_decls().expect("default style present");
        assert_eq!(style.get("width"), Some("100%"));
        assert_eq!(style.get("height"), Some("100%"));
    }

    #[test]
    fn class_override_suppresses_default_style() {
        let element = placeholder(Some("chart-shell"), None);
        assert_eq!(element.spec().class(), Some("chart-shell"));
        assert!(element.spec().style_decls().is_none());
    }

    #[test]
    fn style_override_replaces_default_entirely() {
        let style = Style::new().with("min-height", "2rem");
        let element = placeholder(None, Some(&style));
        let applied = element.spec().style_decls().expect("override style present");
        assert_eq!(applied.get("min-height"), Some("2rem"));
        assert_eq!(applied.get("width"), None);
    }
}
