//! Navigation item model.
//!
//! A [`NavItem`] is a mutable node: registrations and preference directives
//! edit it in place through the `set_*` methods, which return `&mut Self` so
//! calls chain off [`ItemRegistry::register`](crate::ItemRegistry::register).
//! Owned items (children, standalone values) are configured with [`NavItem::with`].

mod children;
mod serialize;
#[cfg(test)]
mod tests;

use indexmap::IndexMap;

pub use children::{ChildEntry, ChildProducer, Children};

use crate::auth::{Actor, Authorization};
use crate::error::{RegistryError, Result};
use crate::icon::{IconResolver, icon_markup};
use crate::id::{child_id, derive_id, slugify};
use crate::urls::{UrlBase, UrlKind, active_pattern_for};

/// One entry of the navigation tree.
#[derive(Debug, Clone)]
pub struct NavItem {
	id: String,
	id_pinned: bool,
	section: Option<String>,
	display: String,
	url: Option<String>,
	route: Option<String>,
	view: Option<String>,
	icon: Option<String>,
	active: Option<String>,
	children: Option<Children>,
	authorization: Option<Authorization>,
	hidden: bool,
	attributes: Option<IndexMap<String, String>>,
}

impl NavItem {
	/// Creates an unsectioned item.
	pub fn new(display: impl Into<String>) -> Self {
		let display = display.into();
		Self {
			id: derive_id(None, &display),
			id_pinned: false,
			section: None,
			display,
			url: None,
			route: None,
			view: None,
			icon: None,
			active: None,
			children: None,
			authorization: None,
			hidden: false,
			attributes: None,
		}
	}

	pub fn in_section(section: impl Into<String>, display: impl Into<String>) -> Self {
		let mut item = Self::new(display);
		item.set_section(section);
		item
	}

	/// Applies `configure` to an owned item and returns it.
	pub fn with(mut self, configure: impl FnOnce(&mut Self)) -> Self {
		configure(&mut self);
		self
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn is_id_pinned(&self) -> bool {
		self.id_pinned
	}

	pub fn section(&self) -> Option<&str> {
		self.section.as_deref()
	}

	/// Slug of the section name.
	pub fn section_key(&self) -> Option<String> {
		self.section.as_deref().map(slugify)
	}

	pub fn display(&self) -> &str {
		&self.display
	}

	/// Alias of [`display`](Self::display).
	pub fn name(&self) -> &str {
		&self.display
	}

	pub fn url(&self) -> Option<&str> {
		self.url.as_deref()
	}

	pub fn route(&self) -> Option<&str> {
		self.route.as_deref()
	}

	pub fn view(&self) -> Option<&str> {
		self.view.as_deref()
	}

	pub fn icon(&self) -> Option<&str> {
		self.icon.as_deref()
	}

	pub fn active(&self) -> Option<&str> {
		self.active.as_deref()
	}

	pub fn children(&self) -> Option<&Children> {
		self.children.as_ref()
	}

	/// Resolved children, or `None` when there are none or they are still deferred.
	pub fn resolved_children(&self) -> Option<&[NavItem]> {
		self.children.as_ref().and_then(Children::as_resolved)
	}

	/// Mutable access to resolved children.
	pub fn resolved_children_mut(&mut self) -> Option<&mut Vec<NavItem>> {
		match &mut self.children {
			Some(Children::Resolved(items)) => Some(items),
			_ => None,
		}
	}

	pub fn authorization(&self) -> Option<&Authorization> {
		self.authorization.as_ref()
	}

	pub fn is_hidden(&self) -> bool {
		self.hidden
	}

	pub fn attributes(&self) -> Option<&IndexMap<String, String>> {
		self.attributes.as_ref()
	}

	/// Attributes rendered as ` key="value"` pairs, escaped for HTML.
	pub fn render_attributes(&self) -> Option<String> {
		let attributes = self.attributes.as_ref()?;
		Some(attributes.iter().map(|(key, value)| format!(" {}=\"{}\"", escape_html(key), escape_html(value))).collect())
	}

	/// Pins `id`; later section or display changes keep it.
	pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
		self.id = id.into();
		self.id_pinned = true;
		self
	}

	/// Pins the id currently derived from section and display.
	pub fn pin_id(&mut self) -> &mut Self {
		self.id_pinned = true;
		self
	}

	pub fn set_section(&mut self, section: impl Into<String>) -> &mut Self {
		self.section = Some(section.into());
		self.refresh_id();
		self
	}

	pub fn set_display(&mut self, display: impl Into<String>) -> &mut Self {
		self.display = display.into();
		self.refresh_id();
		self
	}

	/// Alias of [`set_display`](Self::set_display).
	pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
		self.set_display(name)
	}

	/// Sets the target url.
	///
	/// A control-panel-relative url also becomes the `active` pattern unless
	/// one was set explicitly.
	pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
		let url = url.into();
		if self.active.is_none() && UrlKind::of(&url) == UrlKind::CpRelative {
			self.active = Some(active_pattern_for(&url));
		}
		self.url = Some(url);
		self
	}

	/// Points the item at a named route; resolved by [`resolve_urls`](Self::resolve_urls).
	pub fn set_route(&mut self, route: impl Into<String>) -> &mut Self {
		self.route = Some(route.into());
		self
	}

	/// Replaces the url, re-deriving `active` when the old pattern came from the old url.
	pub fn retarget(&mut self, url: impl Into<String>) -> &mut Self {
		self.forget_derived_active();
		self.set_url(url)
	}

	/// Replaces any url with a named route.
	pub fn reroute(&mut self, route: impl Into<String>) -> &mut Self {
		self.forget_derived_active();
		self.url = None;
		self.set_route(route)
	}

	fn forget_derived_active(&mut self) {
		let derived = self.url.as_deref().filter(|url| UrlKind::of(url) == UrlKind::CpRelative).map(active_pattern_for);
		if derived.is_some() && self.active == derived {
			self.active = None;
		}
	}

	pub fn set_view(&mut self, view: impl Into<String>) -> &mut Self {
		self.view = Some(view.into());
		self
	}

	/// Sets an icon name or inline markup.
	pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
		self.icon = Some(icon.into());
		self
	}

	pub fn set_active(&mut self, pattern: impl Into<String>) -> &mut Self {
		self.active = Some(pattern.into());
		self
	}

	pub fn set_attributes<K, V>(&mut self, attributes: impl IntoIterator<Item = (K, V)>) -> &mut Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.attributes = Some(attributes.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
		self
	}

	pub fn set_hidden(&mut self, hidden: bool) -> &mut Self {
		self.hidden = hidden;
		self
	}

	/// Requires `authorization` for the item to be visible.
	pub fn can(&mut self, authorization: impl Into<Authorization>) -> &mut Self {
		self.authorization = Some(authorization.into());
		self
	}

	/// Replaces the children with a concrete sequence.
	pub fn set_children<E: Into<ChildEntry>>(&mut self, entries: impl IntoIterator<Item = E>) -> &mut Self {
		let items = entries.into_iter().map(|entry| entry.into().into_item()).collect();
		self.children = Some(Children::Resolved(items));
		self
	}

	/// Defers the children to `producer`, invoked on first resolution.
	pub fn defer_children<F>(&mut self, producer: F) -> &mut Self
	where
		F: Fn(&dyn Actor) -> anyhow::Result<Vec<ChildEntry>> + Send + Sync + 'static,
	{
		self.children = Some(Children::Deferred(std::sync::Arc::new(producer)));
		self
	}

	pub fn clear_children(&mut self) -> &mut Self {
		self.children = None;
		self
	}

	/// Resolves deferred children and adopts every child under this item.
	///
	/// Children get ids namespaced under this item's id (unless pinned), this
	/// item's section, and this item's icon when they have none. Resolution is
	/// memoized: a producer runs at most once. A failing producer leaves an
	/// empty child list behind and its error is returned.
	pub fn resolve_children(&mut self, actor: &dyn Actor) -> Result<()> {
		let (items, failure) = match self.children.take() {
			None => return Ok(()),
			Some(Children::Resolved(items)) => (items, None),
			Some(Children::Deferred(producer)) => match producer(actor) {
				Ok(entries) => (entries.into_iter().map(ChildEntry::into_item).collect(), None),
				Err(source) => (
					Vec::new(),
					Some(RegistryError::ChildProducer {
						id: self.id.clone(),
						source,
					}),
				),
			},
		};

		let items = items.into_iter().map(|child| self.adopt(child)).collect();
		self.children = Some(Children::Resolved(items));

		match failure {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}

	fn adopt(&self, mut child: NavItem) -> NavItem {
		if let Some(section) = &self.section {
			child.section = Some(section.clone());
		}
		if !child.id_pinned {
			child.id = child_id(&self.id, &child.display);
		}
		if child.icon.is_none() {
			child.icon = self.icon.clone();
		}
		child
	}

	/// Re-derives the id from section and display unless pinned.
	pub fn refresh_id(&mut self) {
		if !self.id_pinned {
			self.id = derive_id(self.section.as_deref(), &self.display);
		}
	}

	/// Rewrites the url into its absolute form, filling it from the route table
	/// when only a route is set. Applies to resolved children as well.
	pub fn resolve_urls(&mut self, base: &UrlBase) {
		if self.url.is_none()
			&& let Some(target) = self.route.as_deref().and_then(|route| base.route(route))
		{
			self.set_url(target);
		}
		if let Some(url) = &self.url {
			self.url = Some(base.absolute(url));
		}
		if let Some(children) = self.resolved_children_mut() {
			for child in children {
				child.resolve_urls(base);
			}
		}
	}

	/// Whether `request_url` falls under this item.
	pub fn is_active(&self, request_url: &str, base: &UrlBase) -> bool {
		base.is_active(self.url(), self.active(), request_url)
	}

	/// Icon as markup, resolving registered names through `resolver`.
	pub fn icon_markup(&self, resolver: &dyn IconResolver) -> Result<Option<String>> {
		self.icon.as_deref().map(|icon| icon_markup(icon, resolver)).transpose()
	}

	/// Replaces registered icon names with markup, children included.
	///
	/// Every icon is attempted. One that fails to resolve keeps its name and
	/// the first such error is returned.
	pub fn resolve_icons(&mut self, resolver: &dyn IconResolver) -> Result<()> {
		let mut failure = match self.icon_markup(resolver) {
			Ok(markup) => {
				if let Some(markup) = markup {
					self.icon = Some(markup);
				}
				None
			}
			Err(error) => Some(error),
		};
		if let Some(children) = self.resolved_children_mut() {
			for child in children {
				if let Err(error) = child.resolve_icons(resolver) {
					failure.get_or_insert(error);
				}
			}
		}
		failure.map_or(Ok(()), Err)
	}
}

fn escape_html(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());
	for ch in raw.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'"' => escaped.push_str("&quot;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			c => escaped.push(c),
		}
	}
	escaped
}
