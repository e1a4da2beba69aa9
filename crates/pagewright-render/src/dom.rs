//! Helpers over the html5ever / rcdom tree.
//!
//! Everything that needs to look at markup structure (widget extraction,
//! sanitization) goes through these functions instead of matching on text.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
	parse_document, parse_fragment, Attribute, LocalName, Namespace, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::prelude::*;

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Parse a complete page. Missing `html`/`head`/`body` elements are created.
pub fn parse_page(html: &str) -> RcDom {
	parse_document(RcDom::default(), ParseOpts::default()).one(html)
}

/// Parse markup as if it were the content of a `<body>` element.
///
/// Returns the dom and the synthetic root element holding the parsed nodes.
pub fn parse_body_fragment(html: &str) -> PwResult<(RcDom, Handle)> {
	let context = QualName::new(None, Namespace::from(HTML_NS), LocalName::from("body"));
	let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new()).one(html);
	let root = dom
		.document
		.children
		.borrow()
		.first()
		.cloned()
		.ok_or_else(|| Error::Internal("fragment parser produced no root".into()))?;
	Ok((dom, root))
}

/// Serialize a whole page (doctype included)
pub fn serialize_page(dom: &RcDom) -> PwResult<String> {
	serialize_children(&dom.document)
}

/// Serialize the children of `node` without the node itself
pub fn serialize_children(node: &Handle) -> PwResult<String> {
	inline_template_contents(node);
	let mut out = Vec::new();
	let handle: SerializableHandle = node.clone().into();
	serialize(
		&mut out,
		&handle,
		SerializeOpts { traversal_scope: TraversalScope::ChildrenOnly(None), ..Default::default() },
	)?;
	String::from_utf8(out).map_err(|e| Error::Internal(format!("serializer produced invalid UTF-8: {}", e)))
}

/// Move `<template>` contents back under the element so they get serialized
fn inline_template_contents(node: &Handle) {
	if let NodeData::Element { template_contents, .. } = &node.data {
		if let Some(contents) = template_contents.borrow_mut().take() {
			let moved: Vec<Handle> = contents.children.borrow_mut().drain(..).collect();
			for child in moved {
				child.parent.set(Some(Rc::downgrade(node)));
				node.children.borrow_mut().push(child);
			}
		}
	}
	let children: Vec<Handle> = node.children.borrow().clone();
	for child in &children {
		inline_template_contents(child);
	}
}

/// Local name of an element node, `None` for anything else
pub fn element_name(node: &Handle) -> Option<&str> {
	match &node.data {
		NodeData::Element { name, .. } => Some(&*name.local),
		_ => None,
	}
}

pub fn is_element(node: &Handle, local: &str) -> bool {
	element_name(node).is_some_and(|name| name.eq_ignore_ascii_case(local))
}

pub fn get_attr(node: &Handle, local: &str) -> Option<String> {
	match &node.data {
		NodeData::Element { attrs, .. } => attrs
			.borrow()
			.iter()
			.find(|attr| (*attr.name.local).eq_ignore_ascii_case(local))
			.map(|attr| attr.value.to_string()),
		_ => None,
	}
}

/// All attributes of an element as (name, value) pairs, in source order
pub fn attrs(node: &Handle) -> Vec<(String, String)> {
	match &node.data {
		NodeData::Element { attrs, .. } => attrs
			.borrow()
			.iter()
			.map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
			.collect(),
		_ => Vec::new(),
	}
}

pub fn set_attr(node: &Handle, local: &str, value: &str) {
	if let NodeData::Element { attrs, .. } = &node.data {
		let mut attrs = attrs.borrow_mut();
		if let Some(attr) = attrs.iter_mut().find(|attr| (*attr.name.local).eq_ignore_ascii_case(local)) {
			attr.value = StrTendril::from(value);
		} else {
			attrs.push(Attribute {
				name: QualName::new(None, Namespace::from(""), LocalName::from(local)),
				value: StrTendril::from(value),
			});
		}
	}
}

/// Drop every attribute for which `reject(name, value)` returns true.
///
/// Returns the number of attributes removed.
pub fn retain_attrs(node: &Handle, mut reject: impl FnMut(&str, &str) -> bool) -> usize {
	match &node.data {
		NodeData::Element { attrs, .. } => {
			let mut attrs = attrs.borrow_mut();
			let before = attrs.len();
			attrs.retain(|attr| !reject(&*attr.name.local, &*attr.value));
			before - attrs.len()
		}
		_ => 0,
	}
}

/// Concatenated text of all descendant text nodes
pub fn text_content(node: &Handle) -> String {
	let mut out = String::new();
	collect_text(node, &mut out);
	out
}

fn collect_text(node: &Handle, out: &mut String) {
	if let NodeData::Text { contents } = &node.data {
		out.push_str(&contents.borrow());
	}
	for child in node.children.borrow().iter() {
		collect_text(child, out);
	}
}

pub fn new_comment(text: &str) -> Handle {
	Node::new(NodeData::Comment { contents: StrTendril::from(text) })
}

/// Detached HTML element with the given attributes, in order
pub fn new_element(local: &str, attrs: &[(&str, &str)]) -> Handle {
	Node::new(NodeData::Element {
		name: QualName::new(None, Namespace::from(HTML_NS), LocalName::from(local)),
		attrs: RefCell::new(
			attrs
				.iter()
				.map(|(name, value)| Attribute {
					name: QualName::new(None, Namespace::from(""), LocalName::from(*name)),
					value: StrTendril::from(*value),
				})
				.collect(),
		),
		template_contents: RefCell::new(None),
		mathml_annotation_xml_integration_point: false,
	})
}

/// Append `child` as the last child of `parent`
pub fn append_child(parent: &Handle, child: Handle) {
	child.parent.set(Some(Rc::downgrade(parent)));
	parent.children.borrow_mut().push(child);
}

/// First element named `local` below `node`, in document order
pub fn find_element(node: &Handle, local: &str) -> Option<Handle> {
	let mut found = None;
	walk_elements(node, &mut |child| {
		if found.is_some() {
			return Descend::No;
		}
		if is_element(child, local) {
			found = Some(child.clone());
			return Descend::No;
		}
		Descend::Yes
	});
	found
}

pub fn parent(node: &Handle) -> Option<Handle> {
	let weak = node.parent.take()?;
	let parent = weak.upgrade();
	node.parent.set(Some(weak));
	parent
}

/// Put `replacement` where `node` is. No-op for detached nodes.
pub fn replace_node(node: &Handle, replacement: Handle) {
	let Some(parent) = parent(node) else {
		return;
	};
	let mut children = parent.children.borrow_mut();
	if let Some(pos) = children.iter().position(|child| Rc::ptr_eq(child, node)) {
		replacement.parent.set(Some(Rc::downgrade(&parent)));
		node.parent.set(None);
		children[pos] = replacement;
	}
}

/// Remove `node` (and its subtree) from its parent
pub fn detach(node: &Handle) {
	let Some(parent) = parent(node) else {
		return;
	};
	parent.children.borrow_mut().retain(|child| !Rc::ptr_eq(child, node));
	node.parent.set(None);
}

/// Depth-first, document-order walk over the elements below `node`.
///
/// `visit` decides whether to descend into each element's children, so
/// callers can stop at subtrees they take over.
pub fn walk_elements(node: &Handle, visit: &mut impl FnMut(&Handle) -> Descend) {
	let children: Vec<Handle> = node.children.borrow().clone();
	for child in &children {
		if matches!(child.data, NodeData::Element { .. }) && visit(child) == Descend::Yes {
			walk_elements(child, visit);
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
	Yes,
	No,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_and_serialize_page() {
		let dom = parse_page("<title>T</title><p class=\"x\">Hi</p>");
		let html = serialize_page(&dom).unwrap();
		assert_eq!(html, "<html><head><title>T</title></head><body><p class=\"x\">Hi</p></body></html>");
	}

	#[test]
	fn test_doctype_kept() {
		let dom = parse_page("<!DOCTYPE html><html><body>x</body></html>");
		let html = serialize_page(&dom).unwrap();
		assert!(html.starts_with("<!DOCTYPE html>"));
	}

	#[test]
	fn test_fragment_roundtrip() {
		let (_dom, root) = parse_body_fragment("<b>bold</b> text <i>it</i>").unwrap();
		assert_eq!(serialize_children(&root).unwrap(), "<b>bold</b> text <i>it</i>");
	}

	#[test]
	fn test_attrs() {
		let (_dom, root) = parse_body_fragment(r#"<div id="a" data-x="1"></div>"#).unwrap();
		let div = root.children.borrow()[0].clone();
		assert!(is_element(&div, "DIV"));
		assert_eq!(get_attr(&div, "data-x").as_deref(), Some("1"));
		assert_eq!(get_attr(&div, "DATA-X").as_deref(), Some("1"));
		set_attr(&div, "data-x", "2");
		set_attr(&div, "title", "t");
		assert_eq!(get_attr(&div, "data-x").as_deref(), Some("2"));
		let removed = retain_attrs(&div, |name, _| name == "id");
		assert_eq!(removed, 1);
		assert_eq!(
			attrs(&div),
			vec![("data-x".to_string(), "2".to_string()), ("title".to_string(), "t".to_string())]
		);
	}

	#[test]
	fn test_replace_and_detach() {
		let (_dom, root) = parse_body_fragment("<p>a</p><p>b</p><p>c</p>").unwrap();
		let (first, second) = {
			let children = root.children.borrow();
			(children[0].clone(), children[1].clone())
		};
		replace_node(&first, new_comment("gone"));
		detach(&second);
		assert_eq!(serialize_children(&root).unwrap(), "<!--gone--><p>c</p>");
	}

	#[test]
	fn test_new_element_appended() {
		let dom = parse_page("<head><title>T</title></head><body><p>x</p></body>");
		let head = find_element(&dom.document, "head").unwrap();
		append_child(&head, new_element("link", &[("rel", "stylesheet"), ("href", "/a.css?x=1&y=2")]));
		let body = find_element(&dom.document, "BODY").unwrap();
		append_child(&body, new_element("script", &[("src", "/b.js")]));
		assert_eq!(
			serialize_page(&dom).unwrap(),
			"<html><head><title>T</title><link rel=\"stylesheet\" href=\"/a.css?x=1&amp;y=2\"></head>\
			<body><p>x</p><script src=\"/b.js\"></script></body></html>"
		);
	}

	#[test]
	fn test_find_element_first_match() {
		let (_dom, root) = parse_body_fragment("<div><p id=\"a\"></p></div><p id=\"b\"></p>").unwrap();
		let p = find_element(&root, "p").unwrap();
		assert_eq!(get_attr(&p, "id").as_deref(), Some("a"));
		assert!(find_element(&root, "table").is_none());
	}

	#[test]
	fn test_text_content() {
		let (_dom, root) = parse_body_fragment("<p>Hello <b>big</b> world</p>").unwrap();
		assert_eq!(text_content(&root), "Hello big world");
	}

	#[test]
	fn test_walk_order_and_descend() {
		let (_dom, root) =
			parse_body_fragment("<div><span></span></div><section><em></em></section>").unwrap();
		let mut seen = Vec::new();
		walk_elements(&root, &mut |node| {
			let name = element_name(node).unwrap_or_default().to_string();
			let descend = if name == "section" { Descend::No } else { Descend::Yes };
			seen.push(name);
			descend
		});
		assert_eq!(seen, vec!["div", "span", "section"]);
	}

	#[test]
	fn test_template_contents_serialized() {
		let dom = parse_page("<body><template><p>inner</p></template></body>");
		let html = serialize_page(&dom).unwrap();
		assert!(html.contains("<template><p>inner</p></template>"));
	}
}

// vim: ts=4
