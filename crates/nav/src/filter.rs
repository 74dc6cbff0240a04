//! Authorization filtering of the merged tree.

use waymark_preferences::{Action, ItemDirective};
use waymark_registry::{Actor, NavItem};

use crate::merge::{ChildDirectives, MergedItem, MergedTree};
use crate::overrides::apply_fields;
use crate::tree::NavTree;

/// Drops what `actor` may not see.
///
/// Filtering is depth-first and fails closed: an authorization predicate that
/// errors hides its item. Children are resolved right before they are
/// filtered, so deferred producers only run for visible parents.
pub struct AuthorizationFilter<'a> {
	actor: &'a dyn Actor,
	include_hidden: bool,
}

impl<'a> AuthorizationFilter<'a> {
	pub fn new(actor: &'a dyn Actor) -> Self {
		Self { actor, include_hidden: false }
	}

	/// Keeps items hidden by `@remove` directives.
	pub fn include_hidden(mut self, include: bool) -> Self {
		self.include_hidden = include;
		self
	}

	/// Whether `item` itself survives, ignoring its children.
	pub fn allows(&self, item: &NavItem) -> bool {
		if item.is_hidden() && !self.include_hidden {
			return false;
		}
		let Some(authorization) = item.authorization() else {
			return true;
		};
		match self.actor.can(authorization) {
			Ok(allowed) => allowed,
			Err(error) => {
				tracing::warn!(domain = "nav", id = item.id(), ability = %authorization.ability, %error, "authorization check failed");
				false
			}
		}
	}

	/// Filters a merged tree into render order. Empty sections are omitted.
	pub fn filter(&self, tree: MergedTree) -> NavTree {
		let mut output = NavTree::default();
		if !self.actor.is_control_panel_user() {
			tracing::debug!(domain = "nav", "actor cannot access the control panel");
			return output;
		}

		for (key, section) in tree.into_sections() {
			let items: Vec<_> = section.items.into_iter().filter_map(|merged| self.filter_merged(merged)).collect();
			if items.is_empty() {
				tracing::debug!(domain = "nav", section = %key, "omitting empty section");
				continue;
			}
			output.extend_section(section.display, items);
		}
		output
	}

	fn filter_merged(&self, merged: MergedItem) -> Option<NavItem> {
		let MergedItem { item, child_directives } = merged;
		self.filter_item(item, &child_directives)
	}

	/// Filters one item and its subtree. Returns `None` when the item is dropped.
	pub fn filter_item(&self, mut item: NavItem, child_directives: &[ChildDirectives]) -> Option<NavItem> {
		if !self.allows(&item) {
			return None;
		}

		self.resolve_children(&mut item);
		if !child_directives.is_empty() {
			apply_child_directives(&mut item, child_directives);
			self.resolve_children(&mut item);
		}

		if let Some(children) = item.resolved_children_mut() {
			let kept: Vec<_> = std::mem::take(children).into_iter().filter_map(|child| self.filter_item(child, &[])).collect();
			if kept.is_empty() {
				item.clear_children();
			} else {
				*children = kept;
			}
		}
		Some(item)
	}

	fn resolve_children(&self, item: &mut NavItem) {
		if let Err(error) = item.resolve_children(self.actor) {
			tracing::warn!(domain = "nav", id = item.id(), %error, "child producer failed; rendering without children");
		}
	}
}

/// Applies child directives to resolved children. Existing children keep
/// their ids; created ones are adopted by the next resolution.
fn apply_child_directives(item: &mut NavItem, layers: &[ChildDirectives]) {
	if item.children().is_none() {
		item.set_children(Vec::<NavItem>::new());
	}
	let Some(children) = item.resolved_children_mut() else {
		return;
	};
	for child in children.iter_mut() {
		child.pin_id();
	}

	for directives in layers {
		for (id, directive) in directives {
			apply_child_directive(children, id, directive);
		}
	}
}

fn apply_child_directive(children: &mut Vec<NavItem>, id: &str, directive: &ItemDirective) {
	let position = children.iter().position(|child| child.id() == id);
	match (directive.action, position) {
		(Action::Create | Action::Modify, Some(position)) => apply_fields(&mut children[position], directive),
		(Action::Create, None) => {
			let mut child = NavItem::new(directive.display.as_deref().unwrap_or(id));
			apply_fields(&mut child, directive);
			children.push(child);
		}
		(Action::Remove, Some(position)) => {
			children[position].set_hidden(true);
		}
		(Action::Inherit, _) => {}
		(action, _) => {
			tracing::debug!(domain = "nav", id, %action, "dropping child directive");
		}
	}
}
