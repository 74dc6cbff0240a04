//! URL normalization and control-panel active matching.

use indexmap::IndexMap;
use regex::Regex;
use url::Url;

use crate::error::{RegistryError, Result};

/// Shape of a url as written by a registration or directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
	/// Carries its own scheme (`https://example.com`).
	Absolute,
	/// Relative to the site root (`/foo`).
	SiteRelative,
	/// Relative to the control panel root (`foo/bar`).
	CpRelative,
}

impl UrlKind {
	pub fn of(raw: &str) -> Self {
		if raw.starts_with('/') {
			Self::SiteRelative
		} else if Url::parse(raw).is_ok() {
			Self::Absolute
		} else {
			Self::CpRelative
		}
	}
}

/// Builds the default `active` pattern for a control-panel-relative path.
///
/// The pattern matches the path itself and anything below it.
pub fn active_pattern_for(cp_path: &str) -> String {
	format!("^{}(/(.*)?|$)", regex::escape(cp_path))
}

/// Application and control panel roots used to absolutize and match urls,
/// plus the named routes items may point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBase {
	app_url: Url,
	cp_route: String,
	routes: IndexMap<String, String>,
}

impl Default for UrlBase {
	fn default() -> Self {
		Self {
			app_url: Url::parse("http://localhost").expect("static url is valid"),
			cp_route: "cp".to_string(),
			routes: IndexMap::new(),
		}
	}
}

impl UrlBase {
	pub fn new(app_url: &str, cp_route: &str) -> Result<Self> {
		let parsed = Url::parse(app_url).map_err(|source| RegistryError::InvalidAppUrl {
			url: app_url.to_string(),
			source,
		})?;
		if parsed.cannot_be_a_base() {
			return Err(RegistryError::InvalidAppUrl {
				url: app_url.to_string(),
				source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
			});
		}
		Ok(Self {
			app_url: parsed,
			cp_route: cp_route.trim_matches('/').to_string(),
			routes: IndexMap::new(),
		})
	}

	/// Registers a named route pointing at a raw url (any [`UrlKind`]).
	pub fn with_route(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
		self.routes.insert(name.into(), target.into());
		self
	}

	pub fn with_routes(mut self, routes: impl IntoIterator<Item = (String, String)>) -> Self {
		self.routes.extend(routes);
		self
	}

	/// Raw target of a named route.
	pub fn route(&self, name: &str) -> Option<&str> {
		self.routes.get(name).map(String::as_str)
	}

	pub fn cp_route(&self) -> &str {
		&self.cp_route
	}

	/// App url without a trailing slash.
	pub fn app_root(&self) -> &str {
		self.app_url.as_str().trim_end_matches('/')
	}

	/// Control panel root url (`http://localhost/cp`).
	pub fn cp_root(&self) -> String {
		format!("{}/{}", self.app_root(), self.cp_route)
	}

	/// Resolves `raw` against the app or control panel root according to its [`UrlKind`].
	pub fn absolute(&self, raw: &str) -> String {
		match UrlKind::of(raw) {
			UrlKind::Absolute => raw.to_string(),
			UrlKind::SiteRelative => format!("{}{raw}", self.app_root()),
			UrlKind::CpRelative => format!("{}/{raw}", self.cp_root()),
		}
	}

	/// Path of `url` below the control panel root, or `None` when the url is
	/// off-origin or outside the control panel.
	pub fn cp_path(&self, url: &str) -> Option<String> {
		let parsed = Url::parse(&self.absolute(url)).ok()?;
		if parsed.origin() != self.app_url.origin() {
			return None;
		}

		let app_path = self.app_url.path().trim_end_matches('/');
		let below_app = parsed.path().strip_prefix(app_path)?.strip_prefix('/')?;
		let below_cp = below_app.strip_prefix(self.cp_route.as_str())?;

		if below_cp.is_empty() {
			Some(String::new())
		} else {
			below_cp.strip_prefix('/').map(str::to_string)
		}
	}

	/// Whether a request for `request_url` activates an item at `item_url`.
	///
	/// Items outside the control panel are never active. `active` overrides the
	/// pattern derived from the item's own path.
	pub fn is_active(&self, item_url: Option<&str>, active: Option<&str>, request_url: &str) -> bool {
		let Some(item_path) = item_url.and_then(|url| self.cp_path(url)) else {
			return false;
		};
		let Some(request_path) = self.cp_path(request_url) else {
			return false;
		};

		let pattern = match active {
			Some(active) => active.to_string(),
			None => active_pattern_for(&item_path),
		};

		match Regex::new(&pattern) {
			Ok(regex) => regex.is_match(&request_path),
			Err(error) => {
				tracing::warn!(domain = "nav", %pattern, %error, "invalid active pattern");
				false
			}
		}
	}
}
