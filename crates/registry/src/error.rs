//! Error types for the item registry.

use thiserror::Error;

/// Errors raised while configuring or resolving registry items.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// The configured application url could not be used as a base.
	#[error("invalid app url '{url}': {source}")]
	InvalidAppUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	/// A deferred child producer failed.
	#[error("children of '{id}' could not be resolved: {source}")]
	ChildProducer {
		/// Id of the parent item.
		id: String,
		#[source]
		source: anyhow::Error,
	},

	/// An icon file existed but could not be read.
	#[error("icon '{name}' could not be read: {source}")]
	Icon {
		name: String,
		#[source]
		source: std::io::Error,
	},
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
