//! Loosely shaped preference documents as written by users.
//!
//! Each level accepts either a bare directive string (`"@remove"`) or an
//! object; [`RawEntry`] captures which one was found so the normalizer can
//! match on it.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A section, item, or child entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawEntry<T> {
	Bare(String),
	Full(T),
}

impl<T: DeserializeOwned + Default> RawEntry<T> {
	/// Parses one entry; `null` reads as an empty object.
	pub(crate) fn parse(value: &Value) -> Result<Self, serde_json::Error> {
		if value.is_null() {
			return Ok(Self::Full(T::default()));
		}
		Self::deserialize(value)
	}
}

/// Document root. Sections live under `sections` or inline beside `reorder`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDocument {
	#[serde(default)]
	pub reorder: bool,
	#[serde(default)]
	pub sections: Option<IndexMap<String, Value>>,
	#[serde(flatten)]
	pub inline: IndexMap<String, Value>,
}

impl RawDocument {
	pub(crate) fn into_sections(self) -> IndexMap<String, Value> {
		self.sections.unwrap_or(self.inline)
	}
}

/// Section object. Items live under `items` or inline beside the section fields.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSection {
	#[serde(default)]
	pub action: Option<String>,
	#[serde(default)]
	pub display: Option<String>,
	#[serde(default)]
	pub reorder: bool,
	#[serde(default)]
	pub items: Option<IndexMap<String, Value>>,
	#[serde(flatten)]
	pub inline: IndexMap<String, Value>,
}

impl RawSection {
	pub(crate) fn into_items(self) -> IndexMap<String, Value> {
		self.items.unwrap_or(self.inline)
	}
}

/// Item or child object. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawItem {
	#[serde(default)]
	pub action: Option<String>,
	#[serde(default)]
	pub display: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub route: Option<String>,
	#[serde(default)]
	pub icon: Option<String>,
	#[serde(default)]
	pub children: Option<IndexMap<String, Value>>,
}

impl RawItem {
	/// Whether the entry carries any field override.
	pub(crate) fn is_modified(&self) -> bool {
		self.display.is_some() || self.url.is_some() || self.route.is_some() || self.icon.is_some() || self.children.is_some()
	}
}
