//! Identifier grammar for navigation items.
//!
//! Item ids are `::`-delimited paths of slugs: `section::item` for top-level
//! items and `section::item::child` for children. A section key is the slug of
//! the section's display name.

use heck::ToTitleCase;

/// Separator between id path segments.
pub const ID_SEPARATOR: &str = "::";

/// Section key that holds items rendered above every named section.
pub const TOP_LEVEL: &str = "top_level";

/// Slugifies `input` with `_` as the word separator.
///
/// Letters and digits are lowercased and kept, `@` reads as `at`, apostrophes
/// are dropped, and every other run of characters collapses into one `_`.
/// `heck::ToSnakeCase` splits on case changes (`GraphQL` -> `graph_ql`) and
/// has neither rule, so ids would drift from the slugs preference documents use.
pub fn slugify(input: &str) -> String {
	let mut slug = String::with_capacity(input.len());
	let mut pending_separator = false;

	for ch in input.chars() {
		match ch {
			'\'' | '\u{2019}' => continue,
			'@' => {
				push_word(&mut slug, &mut pending_separator, "at");
				pending_separator = true;
			}
			c if c.is_alphanumeric() => {
				if pending_separator && !slug.is_empty() {
					slug.push('_');
				}
				pending_separator = false;
				slug.extend(c.to_lowercase());
			}
			_ => pending_separator = true,
		}
	}

	slug
}

fn push_word(slug: &mut String, pending_separator: &mut bool, word: &str) {
	if !slug.is_empty() {
		slug.push('_');
	}
	*pending_separator = false;
	slug.push_str(word);
}

/// Turns a section key back into a display name (`top_level` -> `Top Level`).
pub fn deslugify(key: &str) -> String {
	key.to_title_case()
}

/// Derives an item id from an optional section and a display name.
pub fn derive_id(section: Option<&str>, display: &str) -> String {
	match section {
		Some(section) => format!("{}{ID_SEPARATOR}{}", slugify(section), slugify(display)),
		None => slugify(display),
	}
}

/// Derives the id of a child item namespaced under `parent_id`.
pub fn child_id(parent_id: &str, display: &str) -> String {
	format!("{parent_id}{ID_SEPARATOR}{}", slugify(display))
}

/// Returns the section key an id claims as its home (`content::collections` -> `content`).
pub fn home_section(id: &str) -> Option<&str> {
	id.split_once(ID_SEPARATOR).map(|(section, _)| section)
}

/// Whether the item addressed by `id` lives in `section_key` by origin.
pub fn is_home(id: &str, section_key: &str) -> bool {
	id.strip_prefix(section_key).is_some_and(|rest| rest.starts_with(ID_SEPARATOR))
}
