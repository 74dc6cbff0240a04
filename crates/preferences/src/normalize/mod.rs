//! Raw preference documents to canonical directives.
//!
//! Normalization never fails. Entries that are malformed or can never apply
//! are dropped and reported as [`NormalizeWarning`]s; everything else comes
//! out with an explicit action and the defaults filled in.

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use waymark_registry::id::{TOP_LEVEL, is_home};

use crate::action::Action;
use crate::directive::{ItemDirective, NavPreferences, SectionDirective};
use crate::error::NormalizeWarning;
use crate::raw::{RawDocument, RawEntry, RawItem, RawSection};

/// Canonical preferences plus the warnings produced on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
	pub preferences: NavPreferences,
	pub warnings: Vec<NormalizeWarning>,
}

/// Normalizes a raw preference document, discarding warnings.
pub fn normalize(document: &Value) -> NavPreferences {
	normalize_with_warnings(document).preferences
}

/// Normalizes a raw preference document.
///
/// `null` is an empty document.
pub fn normalize_with_warnings(document: &Value) -> NormalizeReport {
	let mut normalizer = Normalizer::default();
	let preferences = normalizer.document(document);
	NormalizeReport {
		preferences,
		warnings: normalizer.warnings,
	}
}

#[derive(Default)]
struct Normalizer {
	warnings: Vec<NormalizeWarning>,
}

impl Normalizer {
	fn record(&mut self, warning: NormalizeWarning) {
		match &warning {
			NormalizeWarning::RejectedAction { .. } => tracing::debug!(domain = "nav", %warning, "dropping directive"),
			_ => tracing::warn!(domain = "nav", %warning, "malformed preference entry"),
		}
		self.warnings.push(warning);
	}

	fn document(&mut self, document: &Value) -> NavPreferences {
		if document.is_null() {
			return NavPreferences::default();
		}

		let raw = match RawDocument::deserialize(document) {
			Ok(raw) => raw,
			Err(error) => {
				self.record(NormalizeWarning::MalformedDocument { reason: error.to_string() });
				return NavPreferences::default();
			}
		};

		let reorder = raw.reorder;
		let mut entries = raw.into_sections();
		let top_level = entries.shift_remove(TOP_LEVEL).unwrap_or_else(|| Value::from("@inherit"));

		let mut sections = IndexMap::with_capacity(entries.len() + 1);
		for (key, value) in std::iter::once((TOP_LEVEL.to_string(), top_level)).chain(entries) {
			let Some(section) = self.section(&key, &value) else {
				continue;
			};
			if section.action == Some(Action::Inherit) && !reorder {
				continue;
			}
			sections.insert(key, section);
		}

		NavPreferences { reorder, sections }
	}

	fn section(&mut self, key: &str, value: &Value) -> Option<SectionDirective> {
		let raw = match RawEntry::<RawSection>::parse(value) {
			Ok(raw) => raw,
			Err(error) => {
				self.record(NormalizeWarning::MalformedSection {
					section: key.to_string(),
					reason: error.to_string(),
				});
				return None;
			}
		};

		let mut directive = SectionDirective::new();
		let items = match raw {
			RawEntry::Bare(action) => {
				directive.action = self.action(key, &action);
				IndexMap::new()
			}
			RawEntry::Full(section) => {
				directive.action = section.action.as_deref().and_then(|action| self.action(key, action));
				directive.display = section.display.clone();
				directive.reorder = section.reorder;
				section.into_items()
			}
		};

		for (id, value) in &items {
			let Some(item) = self.item(key, id, value) else {
				continue;
			};
			if item.action == Action::Inherit && !directive.reorder {
				continue;
			}
			directive.items.insert(id.clone(), item);
		}

		Some(directive)
	}

	fn item(&mut self, section: &str, id: &str, value: &Value) -> Option<ItemDirective> {
		let raw = self.parse_item(section, id, value)?;
		self.item_entry(section, id, raw, true)
	}

	fn child(&mut self, section: &str, id: &str, value: &Value) -> Option<ItemDirective> {
		let raw = match self.parse_item(section, id, value)? {
			RawEntry::Bare(url) if !url.starts_with('@') => RawEntry::Full(RawItem {
				action: Some(Action::Create.to_string()),
				display: Some(id.to_string()),
				url: Some(url),
				..RawItem::default()
			}),
			RawEntry::Full(item) => RawEntry::Full(RawItem { children: None, ..item }),
			bare => bare,
		};
		self.item_entry(section, id, raw, false)
	}

	fn parse_item(&mut self, section: &str, id: &str, value: &Value) -> Option<RawEntry<RawItem>> {
		RawEntry::parse(value)
			.map_err(|error| {
				self.record(NormalizeWarning::MalformedItem {
					section: section.to_string(),
					item: id.to_string(),
					reason: error.to_string(),
				})
			})
			.ok()
	}

	/// Shared item and child rules. Children skip the placement check.
	fn item_entry(&mut self, section: &str, id: &str, raw: RawEntry<RawItem>, check_placement: bool) -> Option<ItemDirective> {
		let at_home = is_home(id, section);
		let (action, item) = match raw {
			RawEntry::Bare(action) => (self.action(&format!("{section}.{id}"), &action), RawItem::default()),
			RawEntry::Full(item) => (item.action.as_deref().and_then(|action| self.action(&format!("{section}.{id}"), action)), item),
		};

		if check_placement
			&& let Some(action) = action
			&& ((at_home && action.requires_foreign()) || (!at_home && action.requires_home()))
		{
			self.record(NormalizeWarning::RejectedAction {
				section: section.to_string(),
				item: id.to_string(),
				action,
			});
			return None;
		}

		let action = action.unwrap_or(match (item.is_modified(), at_home) {
			(true, true) => Action::Modify,
			(false, true) => Action::Inherit,
			(_, false) => Action::Alias,
		});

		let children = item.children.as_ref().map(|children| {
			children
				.iter()
				.filter_map(|(child_id, value)| Some((child_id.clone(), self.child(section, child_id, value)?)))
				.collect::<IndexMap<_, _>>()
		});

		Some(ItemDirective {
			action,
			display: item.display,
			url: item.url,
			route: item.route,
			icon: item.icon,
			children: children.filter(|children| !children.is_empty()),
		})
	}

	/// Parses an action keyword, recording unknown ones.
	fn action(&mut self, path: &str, raw: &str) -> Option<Action> {
		let action = Action::parse(raw);
		if action.is_none() {
			self.record(NormalizeWarning::UnknownAction {
				path: path.to_string(),
				action: raw.to_string(),
			});
		}
		action
	}
}
