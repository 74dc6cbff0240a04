//! Preference layers and where their documents come from.

use serde_json::Value;

/// One override layer. Layers apply in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
	/// Site-wide preferences.
	Default,
	/// Preferences of the actor's role.
	Role,
	/// Preferences of the actor.
	User,
}

impl Layer {
	/// All layers in application order.
	pub const ALL: [Layer; 3] = [Self::Default, Self::Role, Self::User];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Default => "default",
			Self::Role => "role",
			Self::User => "user",
		}
	}
}

/// Supplies the raw document stored for each layer.
///
/// Persistence lives behind this trait; a missing layer is simply skipped.
pub trait PreferenceSource {
	fn get(&self, layer: Layer) -> Option<Value>;
}

/// In-memory [`PreferenceSource`].
#[derive(Debug, Clone, Default)]
pub struct PreferenceLayers {
	default: Option<Value>,
	role: Option<Value>,
	user: Option<Value>,
}

impl PreferenceLayers {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, layer: Layer, document: Value) -> Self {
		self.set(layer, document);
		self
	}

	pub fn set(&mut self, layer: Layer, document: Value) -> &mut Self {
		*self.slot(layer) = Some(document);
		self
	}

	pub fn clear(&mut self, layer: Layer) -> Option<Value> {
		self.slot(layer).take()
	}

	fn slot(&mut self, layer: Layer) -> &mut Option<Value> {
		match layer {
			Layer::Default => &mut self.default,
			Layer::Role => &mut self.role,
			Layer::User => &mut self.user,
		}
	}
}

impl PreferenceSource for PreferenceLayers {
	fn get(&self, layer: Layer) -> Option<Value> {
		match layer {
			Layer::Default => self.default.clone(),
			Layer::Role => self.role.clone(),
			Layer::User => self.user.clone(),
		}
	}
}

/// A source with no stored preferences.
impl PreferenceSource for () {
	fn get(&self, _layer: Layer) -> Option<Value> {
		None
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn layers_store_independent_documents() {
		let mut layers = PreferenceLayers::new().with(Layer::Role, json!({ "tools": "@remove" }));
		layers.set(Layer::User, json!({ "reorder": true }));

		assert_eq!(layers.get(Layer::Default), None);
		assert_eq!(layers.get(Layer::Role), Some(json!({ "tools": "@remove" })));
		assert_eq!(layers.clear(Layer::User), Some(json!({ "reorder": true })));
		assert_eq!(layers.get(Layer::User), None);
	}

	#[test]
	fn layers_apply_default_role_user() {
		let mut sorted = [Layer::User, Layer::Default, Layer::Role];
		sorted.sort();
		assert_eq!(sorted, Layer::ALL);
	}
}
