//! Applies normalized preference layers to a registry snapshot.
//!
//! Each [`TreeMerger::apply`] call is one layer and runs in fixed phases:
//!
//! 1. section directives create, rename, or anchor sections
//! 2. item directives create, hide, edit, alias, or move items
//! 3. removed sections are dropped with their items
//! 4. reordering sections take the directive order, dropping unlisted items
//! 5. a reordering document puts its sections first, in document order
//!
//! Without reordering, existing items keep their relative order and new
//! items are appended in directive order. Later layers see the result of
//! earlier ones, so the latest layer decides the shape of anything it touches.


use std::collections::HashSet;

use indexmap::IndexMap;
use waymark_preferences::{Action, ItemDirective, NavPreferences, SectionDirective};
use waymark_registry::id::{ID_SEPARATOR, is_home};
use waymark_registry::{ItemRegistry, NavItem};

use crate::overrides::apply_fields;

/// Child directives keyed by child id, waiting for the children to resolve.
pub type ChildDirectives = IndexMap<String, ItemDirective>;

/// An item of the merged tree.
#[derive(Debug, Clone)]
pub struct MergedItem {
	pub item: NavItem,
	/// Child directives from each layer, in layer order.
	pub child_directives: Vec<ChildDirectives>,
}

impl MergedItem {
	pub fn new(item: NavItem) -> Self {
		Self {
			item,
			child_directives: Vec::new(),
		}
	}

	fn apply(&mut self, directive: &ItemDirective) {
		apply_fields(&mut self.item, directive);
		if let Some(children) = &directive.children {
			self.child_directives.push(children.clone());
		}
	}
}

#[derive(Debug, Clone)]
pub struct MergedSection {
	pub display: String,
	pub items: Vec<MergedItem>,
}

impl MergedSection {
	fn new(display: impl Into<String>) -> Self {
		Self {
			display: display.into(),
			items: Vec::new(),
		}
	}

	fn item_mut(&mut self, id: &str) -> Option<&mut MergedItem> {
		self.items.iter_mut().find(|merged| merged.item.id() == id)
	}
}

/// Sections keyed by section key, in render order.
#[derive(Debug, Clone, Default)]
pub struct MergedTree {
	sections: IndexMap<String, MergedSection>,
}

impl MergedTree {
	pub fn sections(&self) -> &IndexMap<String, MergedSection> {
		&self.sections
	}

	pub fn section(&self, key: &str) -> Option<&MergedSection> {
		self.sections.get(key)
	}

	pub fn into_sections(self) -> IndexMap<String, MergedSection> {
		self.sections
	}

	/// First item with `id`, searching sections in order.
	pub fn find(&self, id: &str) -> Option<&MergedItem> {
		let (section, item) = self.locate(id)?;
		Some(&self.sections[section].items[item])
	}

	fn locate(&self, id: &str) -> Option<(usize, usize)> {
		self.sections
			.values()
			.enumerate()
			.find_map(|(section, merged)| Some((section, merged.items.iter().position(|entry| entry.item.id() == id)?)))
	}
}

/// Layers preference documents onto a working copy of the registry.
#[derive(Debug)]
pub struct TreeMerger {
	tree: MergedTree,
	/// Section keys present before any layer applied.
	home_sections: HashSet<String>,
}

impl TreeMerger {
	/// Starts from `registry`. Item ids are pinned so edits never re-derive them.
	pub fn new(registry: ItemRegistry) -> Self {
		let sections: IndexMap<_, _> = registry
			.into_sections()
			.into_iter()
			.map(|(key, (display, items))| {
				let items = items
					.into_iter()
					.map(|mut item| {
						item.pin_id();
						MergedItem::new(item)
					})
					.collect();
				(key, MergedSection { display, items })
			})
			.collect();
		let home_sections = sections.keys().cloned().collect();
		Self {
			tree: MergedTree { sections },
			home_sections,
		}
	}

	pub fn tree(&self) -> &MergedTree {
		&self.tree
	}

	/// Applies one layer.
	pub fn apply(&mut self, preferences: &NavPreferences) -> &mut Self {
		let mut removed = Vec::new();
		let mut applied = Vec::new();
		for (key, directive) in &preferences.sections {
			match self.prepare_section(key, directive) {
				Some(Action::Remove) => removed.push(key.as_str()),
				Some(_) => applied.push((key.as_str(), directive)),
				None => {}
			}
		}

		for (key, directive) in &applied {
			for (id, item) in &directive.items {
				self.apply_item(key, id, item);
			}
		}

		for key in removed {
			if let Some(section) = self.tree.sections.shift_remove(key) {
				tracing::debug!(domain = "nav", section = key, items = section.items.len(), "removed section");
			}
		}

		for (key, directive) in &applied {
			if directive.reorder {
				self.reorder_items(key, directive);
			}
		}

		if preferences.reorder {
			self.reorder_sections(preferences);
		}
		self
	}

	/// Finishes merging. Duplicate ids keep their last occurrence and every
	/// item carries the display name of the section it ended up in.
	pub fn finish(mut self) -> MergedTree {
		let mut seen = HashSet::new();
		for section in self.tree.sections.values_mut().rev() {
			let before = section.items.len();
			section.items.reverse();
			section.items.retain(|merged| seen.insert(merged.item.id().to_string()));
			section.items.reverse();
			if section.items.len() != before {
				tracing::debug!(domain = "nav", section = %section.display, dropped = before - section.items.len(), "dropped duplicate item ids");
			}

			for merged in &mut section.items {
				if merged.item.section() != Some(section.display.as_str()) {
					merged.item.set_section(section.display.as_str());
				}
			}
		}
		self.tree
	}

	/// Applies the section-level action and returns it, or `None` when the
	/// directive cannot apply to this section.
	fn prepare_section(&mut self, key: &str, directive: &SectionDirective) -> Option<Action> {
		let home = self.home_sections.contains(key);
		let action = directive.action.unwrap_or_else(|| match (self.tree.sections.get(key), &directive.display) {
			(Some(section), Some(display)) if home && section.display != *display => Action::Modify,
			_ if home => Action::Inherit,
			_ => Action::Create,
		});

		match (action, home) {
			(Action::Alias | Action::Move, true) | (Action::Remove | Action::Modify, false) => {
				tracing::debug!(domain = "nav", section = key, %action, home, "dropping section directive");
				return None;
			}
			(Action::Remove | Action::Inherit, _) => {}
			(Action::Create | Action::Modify, true) | (Action::Create | Action::Alias | Action::Move, false) => {
				let section = self.ensure_section(key, directive.display_for(key));
				if let Some(display) = &directive.display {
					section.display = display.clone();
				}
			}
		}
		Some(action)
	}

	fn ensure_section(&mut self, key: &str, display: String) -> &mut MergedSection {
		self.tree.sections.entry(key.to_string()).or_insert_with(|| MergedSection::new(display))
	}

	fn apply_item(&mut self, section: &str, id: &str, directive: &ItemDirective) {
		match directive.action {
			Action::Inherit => {}
			Action::Create => self.create_item(section, id, directive),
			Action::Remove => {
				if let Some(merged) = self.home_item(section, id) {
					merged.item.set_hidden(true);
				}
			}
			Action::Modify => {
				if let Some(merged) = self.home_item(section, id) {
					merged.apply(directive);
				}
			}
			Action::Alias => self.alias_item(section, id, directive),
			Action::Move => self.move_item(section, id, directive),
		}
	}

	fn home_item(&mut self, section: &str, id: &str) -> Option<&mut MergedItem> {
		let found = self.tree.sections.get_mut(section).and_then(|merged| merged.item_mut(id));
		if found.is_none() {
			tracing::debug!(domain = "nav", section, id, "directive target missing");
		}
		found
	}

	fn create_item(&mut self, section_key: &str, id: &str, directive: &ItemDirective) {
		let Some(section) = self.tree.sections.get_mut(section_key) else {
			return;
		};
		if let Some(existing) = section.item_mut(id) {
			existing.apply(directive);
			return;
		}
		let Some(display) = directive.display.as_deref() else {
			tracing::debug!(domain = "nav", section = section_key, id, "dropping create directive without a display");
			return;
		};

		let mut merged = MergedItem::new(NavItem::in_section(section.display.as_str(), display).with(|item| {
			item.set_id(id);
		}));
		merged.apply(directive);
		section.items.push(merged);
	}

	fn alias_item(&mut self, section_key: &str, id: &str, directive: &ItemDirective) {
		if is_home(id, section_key) {
			tracing::debug!(domain = "nav", section = section_key, id, "dropping alias into the item's home section");
			return;
		}
		let alias_id = format!("{section_key}{ID_SEPARATOR}{id}");
		let Some(source) = self.tree.find(id).cloned() else {
			tracing::debug!(domain = "nav", section = section_key, id, "alias source missing");
			return;
		};
		let Some(section) = self.tree.sections.get_mut(section_key) else {
			return;
		};
		if let Some(existing) = section.item_mut(&alias_id) {
			existing.apply(directive);
			return;
		}

		let mut copy = source;
		copy.item.set_id(alias_id).set_section(section.display.as_str()).set_hidden(false);
		copy.apply(directive);
		section.items.push(copy);
	}

	fn move_item(&mut self, section_key: &str, id: &str, directive: &ItemDirective) {
		let Some(target) = self.tree.sections.get_index_of(section_key) else {
			return;
		};
		let Some((source, position)) = self.tree.locate(id) else {
			tracing::debug!(domain = "nav", section = section_key, id, "move source missing");
			return;
		};

		if source == target {
			self.tree.sections[target].items[position].apply(directive);
			return;
		}

		let mut moved = self.tree.sections[source].items.remove(position);
		let section = &mut self.tree.sections[target];
		moved.item.set_section(section.display.as_str());
		moved.apply(directive);
		section.items.push(moved);
	}

	fn reorder_items(&mut self, section_key: &str, directive: &SectionDirective) {
		let Some(section) = self.tree.sections.get_mut(section_key) else {
			return;
		};
		let mut remaining = std::mem::take(&mut section.items);
		let mut ordered = Vec::with_capacity(directive.items.len());
		for (id, item) in &directive.items {
			let target = match item.action {
				Action::Alias => format!("{section_key}{ID_SEPARATOR}{id}"),
				_ => id.clone(),
			};
			if let Some(position) = remaining.iter().position(|merged| merged.item.id() == target) {
				ordered.push(remaining.remove(position));
			}
		}
		if !remaining.is_empty() {
			tracing::debug!(domain = "nav", section = section_key, dropped = remaining.len(), "reorder dropped unlisted items");
		}
		section.items = ordered;
	}

	fn reorder_sections(&mut self, preferences: &NavPreferences) {
		let mut ordered = IndexMap::with_capacity(self.tree.sections.len());
		for key in preferences.sections.keys() {
			if let Some(section) = self.tree.sections.shift_remove(key) {
				ordered.insert(key.clone(), section);
			}
		}
		ordered.extend(self.tree.sections.drain(..));
		self.tree.sections = ordered;
	}
}
