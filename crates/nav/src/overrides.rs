//! Field overrides carried by `create`, `modify`, `alias`, and `move` directives.

use waymark_preferences::ItemDirective;
use waymark_registry::NavItem;

/// Applies the directive's field overrides to `item`. Child directives are
/// not handled here; they wait until the item's children are resolved.
pub(crate) fn apply_fields(item: &mut NavItem, directive: &ItemDirective) {
	if let Some(display) = &directive.display {
		item.set_display(display.as_str());
	}
	if let Some(url) = &directive.url {
		item.retarget(url.as_str());
	}
	if let Some(route) = &directive.route {
		item.reroute(route.as_str());
	}
	if let Some(icon) = &directive.icon {
		item.set_icon(icon.as_str());
	}
}
