//! Child collections: concrete sequences or deferred producers.

use std::fmt;
use std::sync::Arc;

use super::NavItem;
use crate::auth::Actor;

/// Closure producing an item's children when they are first needed.
///
/// Receives the actor of the build in progress.
pub type ChildProducer = Arc<dyn Fn(&dyn Actor) -> anyhow::Result<Vec<ChildEntry>> + Send + Sync>;

/// Children of a navigation item.
#[derive(Clone)]
pub enum Children {
	/// Concrete children in display order.
	Resolved(Vec<NavItem>),
	/// Not yet produced.
	Deferred(ChildProducer),
}

impl Children {
	pub fn is_deferred(&self) -> bool {
		matches!(self, Self::Deferred(_))
	}

	pub fn as_resolved(&self) -> Option<&[NavItem]> {
		match self {
			Self::Resolved(items) => Some(items),
			Self::Deferred(_) => None,
		}
	}
}

impl fmt::Debug for Children {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Resolved(items) => f.debug_tuple("Resolved").field(items).finish(),
			Self::Deferred(_) => f.write_str("Deferred(<producer>)"),
		}
	}
}

/// One entry handed to [`NavItem::set_children`] or returned by a producer.
#[derive(Debug, Clone)]
pub enum ChildEntry {
	/// `"Label" => "/url"` shorthand.
	Link { display: String, url: String },
	/// A fully configured item.
	Item(NavItem),
}

impl ChildEntry {
	pub fn link(display: impl Into<String>, url: impl Into<String>) -> Self {
		Self::Link {
			display: display.into(),
			url: url.into(),
		}
	}

	pub fn into_item(self) -> NavItem {
		match self {
			Self::Link { display, url } => NavItem::new(display).with(|item| {
				item.set_url(url);
			}),
			Self::Item(item) => item,
		}
	}
}

impl From<NavItem> for ChildEntry {
	fn from(item: NavItem) -> Self {
		Self::Item(item)
	}
}

impl<D: Into<String>, U: Into<String>> From<(D, U)> for ChildEntry {
	fn from((display, url): (D, U)) -> Self {
		Self::link(display, url)
	}
}
