//! Application-lifetime navigation state.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use waymark_preferences::PreferenceSource;
use waymark_registry::{Actor, IconResolver, ItemRegistry, NavItem, UrlBase, core_registry};

use crate::builder::Builder;
use crate::config::NavConfig;
use crate::error::Result;
use crate::tree::NavTree;

/// Deferred registration replayed against a fresh registry on every build.
pub type Extension = Arc<dyn Fn(&mut ItemRegistry) + Send + Sync>;

struct Registrations {
	/// Built-in navigation plus every direct registration applied to it.
	items: ItemRegistry,
	extensions: Vec<Extension>,
}

impl Default for Registrations {
	fn default() -> Self {
		Self {
			items: core_registry(),
			extensions: Vec::new(),
		}
	}
}

/// Holds direct registrations and extensions for the lifetime of the application.
///
/// Direct registrations edit a registry seeded with the built-in navigation,
/// so registering an existing item mutates it in place. Builds never mutate
/// this state: each one takes a snapshot of that registry and replays the
/// extensions in registration order on it.
pub struct NavContext {
	registrations: RwLock<Registrations>,
	urls: UrlBase,
	icons: Option<Box<dyn IconResolver + Send + Sync>>,
}

impl NavContext {
	pub fn new(urls: UrlBase) -> Self {
		Self {
			registrations: RwLock::new(Registrations::default()),
			urls,
			icons: None,
		}
	}

	pub fn from_config(config: &NavConfig) -> Result<Self> {
		let context = Self::new(config.url_base()?);
		Ok(match config.icons() {
			Some(icons) => context.with_icons(icons),
			None => context,
		})
	}

	/// Resolves registered icon names to markup during builds.
	pub fn with_icons(mut self, icons: impl IconResolver + Send + Sync + 'static) -> Self {
		self.icons = Some(Box::new(icons));
		self
	}

	pub fn urls(&self) -> &UrlBase {
		&self.urls
	}

	pub fn icons(&self) -> Option<&dyn IconResolver> {
		self.icons.as_deref().map(|icons| icons as &dyn IconResolver)
	}

	/// Registers or updates the item named `display` in `section`.
	pub fn register(&self, section: &str, display: &str, configure: impl FnOnce(&mut NavItem)) {
		self.with_registry(|registry| configure(registry.register(section, display)));
	}

	/// Runs `edit` against the built-in navigation and direct registrations.
	pub fn with_registry<R>(&self, edit: impl FnOnce(&mut ItemRegistry) -> R) -> R {
		edit(&mut self.registrations.write().items)
	}

	/// Queues `extension` for every subsequent build.
	pub fn extend(&self, extension: impl Fn(&mut ItemRegistry) + Send + Sync + 'static) {
		self.registrations.write().extensions.push(Arc::new(extension));
	}

	/// Removes a section, or one item of it, from every subsequent build.
	///
	/// Recorded as an extension so it also applies to items that extensions
	/// queued earlier will register.
	pub fn remove(&self, section: impl Into<String>, item: Option<&str>) {
		let section = section.into();
		let item = item.map(str::to_string);
		self.extend(move |registry| {
			registry.remove(&section, item.as_deref());
		});
	}

	/// Drops every registration and extension, leaving the built-in navigation.
	pub fn clear(&self) {
		*self.registrations.write() = Registrations::default();
	}

	pub fn extension_count(&self) -> usize {
		self.registrations.read().extensions.len()
	}

	/// Realizes the registry a build starts from.
	pub fn registry(&self) -> ItemRegistry {
		let (mut registry, extensions) = {
			let registrations = self.registrations.read();
			(registrations.items.clone(), registrations.extensions.clone())
		};

		for extension in &extensions {
			extension(&mut registry);
		}
		tracing::trace!(domain = "nav", items = registry.len(), extensions = extensions.len(), "realized registry");
		registry
	}

	pub fn builder(&self) -> Builder<'_> {
		Builder::new(self)
	}

	/// Builds the tree `actor` sees under the layers of `source`.
	pub fn build(&self, actor: &dyn Actor, source: &dyn PreferenceSource) -> Result<NavTree> {
		self.builder().with_source(source).build(actor)
	}
}

impl Default for NavContext {
	fn default() -> Self {
		Self::new(UrlBase::default())
	}
}

impl fmt::Debug for NavContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let registrations = self.registrations.read();
		f.debug_struct("NavContext")
			.field("items", &registrations.items.len())
			.field("extensions", &registrations.extensions.len())
			.field("urls", &self.urls)
			.field("icons", &self.icons.is_some())
			.finish()
	}
}
