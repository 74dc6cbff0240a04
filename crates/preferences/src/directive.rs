//! Canonical preference directives.
//!
//! These are the output of [`normalize`](crate::normalize()): every entry has
//! an explicit action, explicit fields are kept as given, and entries that could
//! never apply are already gone. The merger consumes them without further
//! validation.

use indexmap::IndexMap;
use serde::Serialize;
use waymark_registry::id::deslugify;

use crate::action::Action;

/// One normalized preference document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavPreferences {
	/// Whether section order follows the document.
	pub reorder: bool,
	/// Section directives keyed by section key, in document order.
	pub sections: IndexMap<String, SectionDirective>,
}

impl NavPreferences {
	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	pub fn section(&self, key: &str) -> Option<&SectionDirective> {
		self.sections.get(key)
	}
}

/// Directive for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionDirective {
	/// Explicit section action. `None` lets the merger infer one from whether
	/// the section already exists.
	pub action: Option<Action>,
	/// Display name set by the document. `None` keeps the current name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display: Option<String>,
	/// Whether item order follows this directive; unlisted items are dropped.
	pub reorder: bool,
	/// Item directives keyed by item id, in document order.
	pub items: IndexMap<String, ItemDirective>,
}

impl SectionDirective {
	pub fn new() -> Self {
		Self::default()
	}

	/// Display name for a section this directive creates under `key`.
	pub fn display_for(&self, key: &str) -> String {
		self.display.clone().unwrap_or_else(|| deslugify(key))
	}
}

/// Directive for one item or child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDirective {
	pub action: Action,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub route: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	/// Child directives keyed by child id. Never nested further.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub children: Option<IndexMap<String, ItemDirective>>,
}

impl ItemDirective {
	pub fn new(action: Action) -> Self {
		Self {
			action,
			display: None,
			url: None,
			route: None,
			icon: None,
			children: None,
		}
	}

	/// Whether the directive overrides any field of its target.
	pub fn is_modification(&self) -> bool {
		self.display.is_some() || self.url.is_some() || self.route.is_some() || self.icon.is_some() || self.children.is_some()
	}
}
