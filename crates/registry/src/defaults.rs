//! Built-in control panel navigation.

use crate::auth::Authorization;
use crate::registry::ItemRegistry;

/// A built-in entry: section, display, cp-relative url, icon, required ability.
struct CoreEntry {
	section: &'static str,
	display: &'static str,
	url: &'static str,
	icon: &'static str,
	ability: Option<&'static str>,
}

const fn entry(section: &'static str, display: &'static str, url: &'static str, icon: &'static str, ability: Option<&'static str>) -> CoreEntry {
	CoreEntry {
		section,
		display,
		url,
		icon,
		ability,
	}
}

const CORE_NAV: &[CoreEntry] = &[
	entry("Top Level", "Dashboard", "dashboard", "charts", None),
	entry("Top Level", "Playground", "playground", "playground", None),
	entry("Content", "Collections", "collections", "content-writing", Some("configure collections")),
	entry("Content", "Navigation", "navigation", "hierarchy-files", Some("configure navs")),
	entry("Content", "Taxonomies", "taxonomies", "tags", Some("configure taxonomies")),
	entry("Content", "Assets", "assets", "assets", Some("configure asset containers")),
	entry("Content", "Globals", "globals", "earth", Some("configure globals")),
	entry("Fields", "Blueprints", "fields/blueprints", "blueprint", Some("configure fields")),
	entry("Fields", "Fieldsets", "fields/fieldsets", "fieldsets", Some("configure fields")),
	entry("Tools", "Forms", "forms", "drawer-file", Some("configure forms")),
	entry("Tools", "Updates", "updater", "loading-bar", Some("view updates")),
	entry("Tools", "Addons", "addons", "addons", Some("configure addons")),
	entry("Tools", "Utilities", "utilities", "settings-slider", Some("access utility")),
	entry("Tools", "GraphQL", "graphql", "array", Some("view graphql")),
	entry("Users", "Users", "users", "users-box", Some("view users")),
	entry("Users", "Groups", "user-groups", "users-multiple", Some("edit user groups")),
	entry("Users", "Permissions", "roles", "shield-key", Some("edit roles")),
];

/// Seeds `registry` with the built-in sections and items.
pub fn seed_core_nav(registry: &mut ItemRegistry) {
	for core in CORE_NAV {
		let item = registry.register(core.section, core.display);
		item.set_url(core.url).set_icon(core.icon);
		if let Some(ability) = core.ability {
			item.can(Authorization::new(ability));
		}
	}
}

/// A registry holding only the built-in navigation.
pub fn core_registry() -> ItemRegistry {
	let mut registry = ItemRegistry::new();
	seed_core_nav(&mut registry);
	registry
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn core_sections_in_order() {
		let registry = core_registry();
		let sections = registry.sections();
		assert_eq!(sections.keys().collect::<Vec<_>>(), ["top_level", "content", "fields", "tools", "users"]);

		let content: Vec<_> = sections["content"].items.iter().map(|item| item.display()).collect();
		assert_eq!(content, ["Collections", "Navigation", "Taxonomies", "Assets", "Globals"]);
		assert_eq!(sections["top_level"].display, "Top Level");
	}

	#[test]
	fn core_items_carry_ids_and_abilities() {
		let registry = core_registry();
		let forms = registry.find("tools::forms").unwrap();
		assert_eq!(forms.url(), Some("forms"));
		assert_eq!(forms.authorization().map(|auth| auth.ability.as_str()), Some("configure forms"));
		assert!(registry.find("top_level::dashboard").unwrap().authorization().is_none());
	}
}
