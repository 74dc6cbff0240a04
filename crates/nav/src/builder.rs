//! Build orchestration.

use serde_json::Value;
use waymark_preferences::{Layer, PreferenceSource, normalize_with_warnings};
use waymark_registry::{Actor, IconResolver};

use crate::context::NavContext;
use crate::error::Result;
use crate::filter::AuthorizationFilter;
use crate::merge::TreeMerger;
use crate::tree::NavTree;

#[derive(Clone, Copy)]
enum Preferences<'a> {
	None,
	Layers(&'a dyn PreferenceSource),
	/// A single document standing in for the default layer.
	Explicit(&'a Value),
}

/// Configures one navigation build.
///
/// ```ignore
/// let tree = context.builder().with_source(&layers).with_hidden().build(&actor)?;
/// ```
pub struct Builder<'a> {
	context: &'a NavContext,
	preferences: Preferences<'a>,
	include_hidden: bool,
	icons: Option<&'a dyn IconResolver>,
}

impl<'a> Builder<'a> {
	pub fn new(context: &'a NavContext) -> Self {
		Self {
			context,
			preferences: Preferences::None,
			include_hidden: false,
			icons: None,
		}
	}

	/// Applies the default, role, and user layers stored in `source`.
	pub fn with_source(mut self, source: &'a dyn PreferenceSource) -> Self {
		self.preferences = Preferences::Layers(source);
		self
	}

	/// Applies `document` alone, as the default layer.
	pub fn with_preferences(mut self, document: &'a Value) -> Self {
		self.preferences = Preferences::Explicit(document);
		self
	}

	/// Builds from the registry alone.
	pub fn without_preferences(mut self) -> Self {
		self.preferences = Preferences::None;
		self
	}

	/// Keeps items hidden by `@remove`, flagged as hidden.
	pub fn with_hidden(mut self) -> Self {
		self.include_hidden = true;
		self
	}

	/// Overrides the context's icon resolver.
	pub fn with_icons(mut self, icons: &'a dyn IconResolver) -> Self {
		self.icons = Some(icons);
		self
	}

	pub fn build(&self, actor: &dyn Actor) -> Result<NavTree> {
		let mut merger = TreeMerger::new(self.context.registry());
		for (layer, document) in self.documents() {
			let report = normalize_with_warnings(&document);
			if !report.warnings.is_empty() {
				tracing::warn!(domain = "nav", layer = layer.name(), warnings = report.warnings.len(), "ignored malformed preference entries");
			}
			merger.apply(&report.preferences);
		}

		let mut tree = AuthorizationFilter::new(actor).include_hidden(self.include_hidden).filter(merger.finish());
		tree.resolve_urls(self.context.urls());
		if let Some(icons) = self.icons.or_else(|| self.context.icons()) {
			tree.resolve_icons(icons);
		}

		tracing::debug!(domain = "nav", sections = tree.len(), include_hidden = self.include_hidden, "built navigation");
		Ok(tree)
	}

	fn documents(&self) -> Vec<(Layer, Value)> {
		match self.preferences {
			Preferences::None => Vec::new(),
			Preferences::Explicit(document) => vec![(Layer::Default, document.clone())],
			Preferences::Layers(source) => Layer::ALL.into_iter().filter_map(|layer| Some((layer, source.get(layer)?))).collect(),
		}
	}
}
