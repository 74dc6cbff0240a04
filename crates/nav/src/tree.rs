//! The resolved navigation tree handed to rendering.

use indexmap::IndexMap;
use serde::Serialize;
use waymark_registry::{IconResolver, NavItem, UrlBase};

/// Items grouped by section display name, in render order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NavTree {
	sections: IndexMap<String, Vec<NavItem>>,
}

impl NavTree {
	pub fn get(&self, section: &str) -> Option<&[NavItem]> {
		self.sections.get(section).map(Vec::as_slice)
	}

	/// Section display names in render order.
	pub fn sections(&self) -> impl Iterator<Item = &str> {
		self.sections.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[NavItem])> {
		self.sections.iter().map(|(display, items)| (display.as_str(), items.as_slice()))
	}

	pub fn len(&self) -> usize {
		self.sections.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	/// Item with `id` anywhere in the tree, children included.
	pub fn find(&self, id: &str) -> Option<&NavItem> {
		fn search<'a>(items: &'a [NavItem], id: &str) -> Option<&'a NavItem> {
			items.iter().find_map(|item| {
				if item.id() == id {
					return Some(item);
				}
				search(item.resolved_children()?, id)
			})
		}
		self.sections.values().find_map(|items| search(items, id))
	}

	pub fn into_inner(self) -> IndexMap<String, Vec<NavItem>> {
		self.sections
	}

	/// Appends `items` under `display`; two sections sharing a display name render as one.
	pub(crate) fn extend_section(&mut self, display: String, items: Vec<NavItem>) {
		self.sections.entry(display).or_default().extend(items);
	}

	pub(crate) fn resolve_urls(&mut self, base: &UrlBase) {
		for item in self.sections.values_mut().flatten() {
			item.resolve_urls(base);
		}
	}

	/// Unreadable icons keep their name.
	pub(crate) fn resolve_icons(&mut self, icons: &dyn IconResolver) {
		for item in self.sections.values_mut().flatten() {
			if let Err(error) = item.resolve_icons(icons) {
				tracing::warn!(domain = "nav", id = item.id(), %error, "icon could not be resolved; keeping its name");
			}
		}
	}
}
