//! Locating widget elements in a parsed layout

use markup5ever_rcdom::Handle;

use pagewright_render::dom::{self, Descend};

use crate::handler::WidgetTag;
use crate::prelude::*;

/// Reserved element name marking a widget
pub const WIDGET_ELEMENT: &str = "widget";
/// Attribute carrying the widget type
pub const WIDGET_TYPE_ATTR: &str = "type";

/// Collect all widgets below `root` in document order.
///
/// Widgets nested inside another widget are part of the outer widget's body
/// and are not returned separately. A widget element without a `type`
/// attribute is returned with an empty type, so it ends up as an unknown
/// widget instead of leaking into the page.
pub fn extract_widgets(root: &Handle) -> PwResult<Vec<(WidgetTag, Handle)>> {
	let mut nodes = Vec::new();
	dom::walk_elements(root, &mut |node| {
		if dom::is_element(node, WIDGET_ELEMENT) {
			nodes.push(node.clone());
			Descend::No
		} else {
			Descend::Yes
		}
	});

	let mut widgets = Vec::with_capacity(nodes.len());
	for (index, node) in nodes.into_iter().enumerate() {
		let typ = dom::get_attr(&node, WIDGET_TYPE_ATTR).unwrap_or_default();
		let mut tag = WidgetTag::new(index, &typ);
		for (name, value) in dom::attrs(&node) {
			if !name.eq_ignore_ascii_case(WIDGET_TYPE_ATTR) {
				tag.attrs.push((name.into(), value.into()));
			}
		}
		tag.text = dom::text_content(&node);
		tag.body = dom::serialize_children(&node)?;
		widgets.push((tag, node));
	}
	Ok(widgets)
}


// vim: ts=4
