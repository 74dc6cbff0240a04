use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{Children, NavItem};

/// Serializes the render-facing view of an item. Deferred children are
/// written as `null`; resolve them first to include them.
impl Serialize for NavItem {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("NavItem", 12)?;
		state.serialize_field("id", &self.id)?;
		state.serialize_field("section", &self.section)?;
		state.serialize_field("display", &self.display)?;
		state.serialize_field("url", &self.url)?;
		state.serialize_field("route", &self.route)?;
		state.serialize_field("view", &self.view)?;
		state.serialize_field("icon", &self.icon)?;
		state.serialize_field("active", &self.active)?;
		state.serialize_field("authorization", &self.authorization)?;
		state.serialize_field("hidden", &self.hidden)?;
		state.serialize_field("attributes", &self.attributes)?;
		let children = match &self.children {
			Some(Children::Resolved(items)) => Some(items.as_slice()),
			Some(Children::Deferred(_)) | None => None,
		};
		state.serialize_field("children", &children)?;
		state.end()
	}
}
