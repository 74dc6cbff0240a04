use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;
use crate::auth::SuperUser;

fn child_ids(item: &NavItem) -> Vec<&str> {
	item.resolved_children().unwrap_or_default().iter().map(NavItem::id).collect()
}

fn child_displays(item: &NavItem) -> Vec<&str> {
	item.resolved_children().unwrap_or_default().iter().map(NavItem::display).collect()
}

#[test]
fn id_derives_from_section_and_display_until_pinned() {
	let mut item = NavItem::in_section("Droids", "3PO");
	assert_eq!(item.id(), "droids::3po");

	item.set_section("Droids Preserved").set_display("R2");
	assert_eq!(item.id(), "droids_preserved::r2");

	item.pin_id().set_section("CHANGED").set_display("CHANGED");
	assert_eq!(item.id(), "droids_preserved::r2");
	assert_eq!(item.section(), Some("CHANGED"));
}

#[test]
fn explicit_id_is_pinned() {
	let mut item = NavItem::in_section("Droids", "C-3PO");
	item.set_id("some::custom::id").set_display("NOT 3PO");
	assert_eq!(item.id(), "some::custom::id");
	assert_eq!(item.name(), "NOT 3PO");
}

#[test]
fn url_setter_derives_active_for_cp_relative_urls_only() {
	let absolute = NavItem::new("absolute").with(|item| {
		item.set_url("http://domain.com");
	});
	assert_eq!(absolute.url(), Some("http://domain.com"));
	assert_eq!(absolute.active(), None);

	let site_relative = NavItem::new("site-relative").with(|item| {
		item.set_url("/foo/bar");
	});
	assert_eq!(site_relative.active(), None);

	let cp_relative = NavItem::new("cp-relative").with(|item| {
		item.set_url("foo/bar");
	});
	assert_eq!(cp_relative.active(), Some("^foo/bar(/(.*)?|$)"));
}

#[test]
fn explicit_active_survives_url_changes() {
	let item = NavItem::new("cp-relative").with(|item| {
		item.set_active("foo.*").set_url("foo/bar");
	});
	assert_eq!(item.active(), Some("foo.*"));
}

#[test]
fn retarget_rederives_only_derived_patterns() {
	let mut item = NavItem::new("cp").with(|item| {
		item.set_url("foo/bar");
	});
	item.retarget("baz");
	assert_eq!(item.active(), Some("^baz(/(.*)?|$)"));

	item.set_active("custom").retarget("qux");
	assert_eq!(item.active(), Some("custom"));

	let mut routed = NavItem::new("routed").with(|item| {
		item.set_url("foo");
	});
	routed.reroute("foo.index");
	assert_eq!(routed.url(), None);
	assert_eq!(routed.active(), None);
	assert_eq!(routed.route(), Some("foo.index"));
}

#[test]
fn resolve_urls_absolutizes_and_uses_routes() {
	let base = UrlBase::default().with_route("wordpress-importer.index", "/wordpress-importer");

	let mut site = NavItem::new("r2").with(|item| {
		item.set_url("/r2");
	});
	site.resolve_urls(&base);
	assert_eq!(site.url(), Some("http://localhost/r2"));

	let mut cp = NavItem::new("cp").with(|item| {
		item.set_url("foo/bar");
	});
	cp.resolve_urls(&base);
	assert_eq!(cp.url(), Some("http://localhost/cp/foo/bar"));
	assert_eq!(cp.active(), Some("^foo/bar(/(.*)?|$)"));

	let mut routed = NavItem::in_section("Utilities", "Wordpress Importer").with(|item| {
		item.set_route("wordpress-importer.index");
	});
	routed.resolve_urls(&base);
	assert_eq!(routed.url(), Some("http://localhost/wordpress-importer"));
}

#[test]
fn active_matching_is_scoped_to_the_control_panel() {
	let base = UrlBase::default();
	let url = |url: &str| {
		let url = url.to_string();
		NavItem::new("x").with(move |item| {
			item.set_url(url);
		})
	};
	let hello = url("http://localhost/cp/hello");
	let hell = url("http://localhost/cp/hell");
	let local_not_cp = url("/dashboard");
	let external = url("http://external.com");
	let external_secure = url("https://external.com");

	for (request, hello_active, hell_active) in [
		("http://localhost/cp/hell", false, true),
		("http://localhost/cp/hello", true, false),
		("http://localhost/cp/hell/test", false, true),
		("http://localhost/cp/hello/test", true, false),
	] {
		assert_eq!(hello.is_active(request, &base), hello_active, "hello @ {request}");
		assert_eq!(hell.is_active(request, &base), hell_active, "hell @ {request}");
		assert!(!local_not_cp.is_active(request, &base));
		assert!(!external.is_active(request, &base));
		assert!(!external_secure.is_active(request, &base));
	}
}

#[test]
fn external_item_with_matching_pattern_is_never_active() {
	let base = UrlBase::default();
	let item = NavItem::new("external").with(|item| {
		item.set_url("http://external.com/cp/hell").set_active(".*");
	});
	assert!(!item.is_active("http://localhost/cp/hell", &base));
}

#[test]
fn children_are_namespaced_under_the_parent() {
	let mut item = NavItem::in_section("Droids", "Battle Droids").with(|item| {
		item.set_url("/battle-droids").set_children(vec![
			ChildEntry::from(NavItem::new("B1").with(|b1| {
				b1.set_url("/b1");
			})),
			NavItem::new("B2").into(),
			("HK-47", "/hk-47").into(),
		]);
	});

	item.resolve_children(&SuperUser).unwrap();

	assert_eq!(child_displays(&item), ["B1", "B2", "HK-47"]);
	assert_eq!(child_ids(&item), ["droids::battle_droids::b1", "droids::battle_droids::b2", "droids::battle_droids::hk_47"]);
	let children = item.resolved_children().unwrap();
	assert_eq!(children[0].section(), Some("Droids"));
	assert_eq!(children[2].url(), Some("/hk-47"));
}

#[test]
fn children_inherit_the_parent_icon() {
	let mut item = NavItem::in_section("Droids", "Battle Droids").with(|item| {
		item.set_icon("droid").set_children(vec![
			ChildEntry::link("B1", "/b1"),
			NavItem::new("B2").with(|b2| {
				b2.set_icon("<svg>b2</svg>");
			}).into(),
		]);
	});

	item.resolve_children(&SuperUser).unwrap();

	let icons: Vec<_> = item.resolved_children().unwrap().iter().map(NavItem::icon).collect();
	assert_eq!(icons, [Some("droid"), Some("<svg>b2</svg>")]);
}

#[test]
fn deferred_children_resolve_once() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);

	let mut item = NavItem::in_section("Droids", "Security Droids").with(move |item| {
		item.defer_children(move |_| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(vec![ChildEntry::link("IG-86", "/ig-86"), ChildEntry::link("K-2SO", "/k-2so")])
		});
	});

	assert!(item.children().is_some_and(Children::is_deferred));

	item.resolve_children(&SuperUser).unwrap();
	item.resolve_children(&SuperUser).unwrap();

	assert!(!item.children().is_some_and(Children::is_deferred));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert_eq!(child_ids(&item), ["droids::security_droids::ig_86", "droids::security_droids::k_2so"]);
}

#[test]
fn failing_producer_leaves_empty_children() {
	let mut item = NavItem::in_section("Droids", "Broken").with(|item| {
		item.defer_children(|_| Err(anyhow::anyhow!("database unavailable")));
	});

	let error = item.resolve_children(&SuperUser).unwrap_err();
	assert!(matches!(error, RegistryError::ChildProducer { ref id, .. } if id == "droids::broken"));
	assert_eq!(item.resolved_children().map(<[NavItem]>::len), Some(0));
	assert!(item.resolve_children(&SuperUser).is_ok());
}

#[test]
fn attributes_render_as_html() {
	let item = NavItem::new("C-3PO").with(|item| {
		item.set_attributes([("target", "_blank"), ("class", "red \"x\"")]);
	});
	assert_eq!(item.render_attributes().as_deref(), Some(r#" target="_blank" class="red &quot;x&quot;""#));
	assert_eq!(NavItem::new("plain").render_attributes(), None);
}

#[test]
fn authorization_with_arguments() {
	let item = NavItem::new("C-3PO").with(|item| {
		item.can(Authorization::new("index").with_argument("DroidsClass"));
	});
	let auth = item.authorization().unwrap();
	assert_eq!(auth.ability, "index");
	assert_eq!(auth.arguments, ["DroidsClass"]);
}

#[test]
fn serializes_resolved_children_only() {
	let mut item = NavItem::in_section("Droids", "Battle Droids").with(|item| {
		item.set_children([("B1", "/b1")]);
	});
	item.resolve_children(&SuperUser).unwrap();

	let json = serde_json::to_value(&item).unwrap();
	assert_eq!(json["id"], "droids::battle_droids");
	assert_eq!(json["children"][0]["id"], "droids::battle_droids::b1");

	let deferred = NavItem::new("Later").with(|item| {
		item.defer_children(|_| Ok(Vec::new()));
	});
	assert!(serde_json::to_value(&deferred).unwrap()["children"].is_null());
}
