use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use super::*;

fn items(preferences: &NavPreferences, section: &str) -> Vec<(String, Action)> {
	preferences.sections[section].items.iter().map(|(id, item)| (id.clone(), item.action)).collect()
}

#[test]
fn null_document_is_empty() {
	let report = normalize_with_warnings(&Value::Null);
	assert_eq!(report.preferences, NavPreferences::default());
	assert!(report.warnings.is_empty());
}

#[test]
fn top_level_leads_and_is_pruned_without_reorder() {
	let preferences = normalize(&json!({
		"content": { "content::collections": "@remove" },
	}));
	assert!(!preferences.reorder);
	assert_eq!(preferences.sections.keys().collect::<Vec<_>>(), ["content"]);

	let preferences = normalize(&json!({
		"reorder": true,
		"content": { "content::collections": "@remove" },
	}));
	assert_eq!(preferences.sections.keys().collect::<Vec<_>>(), ["top_level", "content"]);
	assert_eq!(preferences.sections["top_level"].action, Some(Action::Inherit));
	assert_eq!(preferences.sections["top_level"].display, None);
	assert_eq!(preferences.sections["top_level"].display_for("top_level"), "Top Level");
}

#[test]
fn explicit_top_level_keeps_first_position() {
	let preferences = normalize(&json!({
		"sections": {
			"content": { "content::taxonomies": "@remove" },
			"top_level": { "top_level::dashboard": { "display": "Home" } },
		},
	}));
	assert_eq!(preferences.sections.keys().collect::<Vec<_>>(), ["top_level", "content"]);
	assert_eq!(preferences.sections["top_level"].items["top_level::dashboard"].action, Action::Modify);
}

#[test]
fn sections_nest_under_sections_or_inline() {
	let nested = normalize(&json!({ "reorder": true, "sections": { "tools": "@inherit" } }));
	let inline = normalize(&json!({ "reorder": true, "tools": "@inherit" }));
	assert_eq!(nested, inline);
	assert_eq!(nested.sections.keys().collect::<Vec<_>>(), ["top_level", "tools"]);
}

#[test]
fn items_nest_under_items_or_inline() {
	let nested = normalize(&json!({
		"content": { "display": "Stuff", "reorder": true, "items": { "content::globals": "@inherit" } },
	}));
	let inline = normalize(&json!({
		"content": { "display": "Stuff", "reorder": true, "content::globals": "@inherit" },
	}));
	assert_eq!(nested, inline);

	let section = &nested.sections["content"];
	assert_eq!(section.display.as_deref(), Some("Stuff"));
	assert!(section.reorder);
	assert_eq!(items(&nested, "content"), [("content::globals".to_string(), Action::Inherit)]);
}

#[test]
fn section_display_is_only_set_when_given() {
	let preferences = normalize(&json!({
		"the_empire": { "content::collections": "@alias" },
		"seo": { "display": "SEO", "seo::sitemap": "@remove" },
	}));
	assert_eq!(preferences.sections["the_empire"].display, None);
	assert_eq!(preferences.sections["the_empire"].display_for("the_empire"), "The Empire");
	assert_eq!(preferences.sections["seo"].display_for("seo"), "SEO");
	assert_eq!(preferences.sections["the_empire"].action, None);
}

#[rstest]
#[case::move_at_home("content", "content::collections", "@move")]
#[case::remove_abroad("tools", "content::collections", "@remove")]
#[case::modify_abroad("tools", "content::collections", "@modify")]
#[case::inherit_abroad("tools", "content::collections", "@inherit")]
fn misplaced_actions_are_rejected(#[case] section: &str, #[case] id: &str, #[case] action: &str) {
	let report = normalize_with_warnings(&json!({ "reorder": true, section: { "reorder": true, id: action } }));
	assert!(report.preferences.sections[section].items.is_empty());
	assert!(matches!(
		report.warnings.as_slice(),
		[NormalizeWarning::RejectedAction { item, .. }] if item == id
	));
}

#[rstest]
#[case::alias_abroad("tools", "content::collections", "@alias", Action::Alias)]
#[case::move_abroad("tools", "content::collections", "@move", Action::Move)]
#[case::remove_at_home("content", "content::collections", "@remove", Action::Remove)]
#[case::create_anywhere("tools", "tools::importer", "@create", Action::Create)]
#[case::bare_word("content", "content::collections", "remove", Action::Remove)]
fn placed_actions_are_kept(#[case] section: &str, #[case] id: &str, #[case] action: &str, #[case] expected: Action) {
	let preferences = normalize(&json!({ section: { id: action } }));
	assert_eq!(items(&preferences, section), [(id.to_string(), expected)]);
}

#[test]
fn missing_actions_are_inferred() {
	let preferences = normalize(&json!({
		"content": {
			"reorder": true,
			"content::collections": { "display": "Things" },
			"content::globals": {},
			"tools::forms": { "icon": "drawer" },
		},
	}));
	assert_eq!(
		items(&preferences, "content"),
		[
			("content::collections".to_string(), Action::Modify),
			("content::globals".to_string(), Action::Inherit),
			("tools::forms".to_string(), Action::Alias),
		]
	);
}

#[test]
fn unknown_action_is_reported_and_inferred() {
	let report = normalize_with_warnings(&json!({
		"content": { "content::collections": { "action": "@hide", "display": "Things" } },
	}));
	assert_eq!(items(&report.preferences, "content"), [("content::collections".to_string(), Action::Modify)]);
	assert_eq!(
		report.warnings,
		[NormalizeWarning::UnknownAction {
			path: "content.content::collections".into(),
			action: "@hide".into(),
		}]
	);
}

#[test]
fn inherit_is_pruned_unless_reordering() {
	let preferences = normalize(&json!({
		"content": { "content::collections": "@inherit", "content::globals": "@remove" },
	}));
	assert_eq!(items(&preferences, "content"), [("content::globals".to_string(), Action::Remove)]);

	let preferences = normalize(&json!({ "content": "@inherit", "tools": "@create" }));
	assert_eq!(preferences.sections.keys().collect::<Vec<_>>(), ["tools"]);
	assert_eq!(preferences.sections["tools"].action, Some(Action::Create));
}

#[test]
fn children_normalize_without_placement_checks() {
	let preferences = normalize(&json!({
		"content": {
			"content::collections": {
				"children": {
					"content::collections::pages": "@remove",
					"Blog": "/blog",
					"other::thing": "@modify",
					"content::collections::articles": {
						"display": "Posts",
						"children": { "deep": "/deep" },
					},
				},
			},
		},
	}));

	let collections = &preferences.sections["content"].items["content::collections"];
	assert_eq!(collections.action, Action::Modify);
	let children = collections.children.as_ref().unwrap();
	assert_eq!(children["content::collections::pages"], ItemDirective::new(Action::Remove));
	assert_eq!(children["other::thing"].action, Action::Modify);
	assert_eq!(
		children["Blog"],
		ItemDirective {
			display: Some("Blog".into()),
			url: Some("/blog".into()),
			..ItemDirective::new(Action::Create)
		}
	);

	let articles = &children["content::collections::articles"];
	assert_eq!(articles.action, Action::Modify);
	assert_eq!(articles.display.as_deref(), Some("Posts"));
	assert_eq!(articles.children, None);
}

#[test]
fn malformed_entries_are_dropped_with_warnings() {
	let report = normalize_with_warnings(&json!({
		"content": 42,
		"tools": { "tools::forms": 5, "tools::addons": "@remove" },
		"users": { "users::users": { "display": 7 } },
	}));

	assert_eq!(report.preferences.sections.keys().collect::<Vec<_>>(), ["tools", "users"]);
	assert_eq!(items(&report.preferences, "tools"), [("tools::addons".to_string(), Action::Remove)]);
	assert!(report.preferences.sections["users"].items.is_empty());

	let kinds: Vec<_> = report
		.warnings
		.iter()
		.map(|warning| match warning {
			NormalizeWarning::MalformedSection { section, .. } => format!("section {section}"),
			NormalizeWarning::MalformedItem { item, .. } => format!("item {item}"),
			other => other.to_string(),
		})
		.collect();
	assert_eq!(kinds, ["section content", "item tools::forms", "item users::users"]);
}

#[test]
fn non_object_document_is_ignored() {
	let report = normalize_with_warnings(&json!(["content"]));
	assert_eq!(report.preferences, NavPreferences::default());
	assert!(matches!(report.warnings.as_slice(), [NormalizeWarning::MalformedDocument { .. }]));
}

#[test]
fn canonical_form_serializes() {
	let preferences = normalize(&json!({
		"reorder": true,
		"content": { "content::collections": { "display": "Things" } },
	}));
	assert_eq!(
		serde_json::to_value(&preferences).unwrap(),
		json!({
			"reorder": true,
			"sections": {
				"top_level": { "action": "@inherit", "reorder": false, "items": {} },
				"content": {
					"action": null,
					"reorder": false,
					"items": { "content::collections": { "action": "@modify", "display": "Things" } },
				},
			},
		})
	);
}
