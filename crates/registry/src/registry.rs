//! Ordered store of navigation items grouped by section.

use indexmap::IndexMap;

use crate::id::slugify;
use crate::item::NavItem;

/// Items registered for navigation, in registration order.
///
/// Items are kept flat so an item created without a section can be assigned
/// one later; [`sections`](Self::sections) groups them by section in order of
/// first appearance.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
	items: Vec<NavItem>,
}

impl ItemRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the item named `display` in `section`, creating it if needed.
	///
	/// Re-registering an existing display name hands back the existing item for
	/// further mutation instead of adding a duplicate.
	pub fn register(&mut self, section: &str, display: &str) -> &mut NavItem {
		let section_key = slugify(section);
		let position = self
			.items
			.iter()
			.position(|item| item.display() == display && item.section_key().as_deref() == Some(section_key.as_str()));

		let index = match position {
			Some(index) => index,
			None => {
				self.items.push(NavItem::in_section(section, display));
				self.items.len() - 1
			}
		};
		&mut self.items[index]
	}

	/// Appends a new item with no section; set one before building.
	pub fn create(&mut self, display: &str) -> &mut NavItem {
		self.push(NavItem::new(display))
	}

	/// Appends a fully configured item.
	pub fn push(&mut self, item: NavItem) -> &mut NavItem {
		self.items.push(item);
		let last = self.items.len() - 1;
		&mut self.items[last]
	}

	/// Removes a whole section, or only the item named `display` within it.
	/// Returns the number of items removed.
	pub fn remove(&mut self, section: &str, display: Option<&str>) -> usize {
		let section_key = slugify(section);
		let before = self.items.len();
		self.items.retain(|item| {
			let in_section = item.section_key().as_deref() == Some(section_key.as_str());
			!(in_section && display.is_none_or(|display| item.display() == display))
		});
		before - self.items.len()
	}

	pub fn find(&self, id: &str) -> Option<&NavItem> {
		self.items.iter().find(|item| item.id() == id)
	}

	pub fn find_mut(&mut self, id: &str) -> Option<&mut NavItem> {
		self.items.iter_mut().find(|item| item.id() == id)
	}

	pub fn items(&self) -> &[NavItem] {
		&self.items
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Groups items by section key in order of first appearance.
	///
	/// Items without a section are skipped.
	pub fn sections(&self) -> IndexMap<String, RegistrySection<'_>> {
		let mut sections: IndexMap<String, RegistrySection<'_>> = IndexMap::new();
		for item in &self.items {
			let Some(section) = item.section() else {
				tracing::debug!(domain = "nav", id = item.id(), "skipping item without a section");
				continue;
			};
			sections
				.entry(slugify(section))
				.or_insert_with(|| RegistrySection { display: section, items: Vec::new() })
				.items
				.push(item);
		}
		sections
	}

	/// Consumes the registry into owned section groups.
	pub fn into_sections(self) -> IndexMap<String, (String, Vec<NavItem>)> {
		let mut sections: IndexMap<String, (String, Vec<NavItem>)> = IndexMap::new();
		for item in self.items {
			let Some(section) = item.section().map(str::to_string) else {
				tracing::debug!(domain = "nav", id = item.id(), "skipping item without a section");
				continue;
			};
			sections.entry(slugify(&section)).or_insert_with(|| (section, Vec::new())).1.push(item);
		}
		sections
	}
}

/// Borrowed view of one section's items.
#[derive(Debug)]
pub struct RegistrySection<'a> {
	/// Display name of the section as first registered.
	pub display: &'a str,
	pub items: Vec<&'a NavItem>,
}
