//! Reading preference documents from JSON or TOML.

use std::path::Path;

use serde_json::Value;

use crate::error::{PreferenceError, Result};

/// Serialization format of a stored preference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceFormat {
	Json,
	Toml,
}

impl PreferenceFormat {
	/// Picks the format from a file extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		match path.extension()?.to_str()? {
			"json" => Some(Self::Json),
			"toml" => Some(Self::Toml),
			_ => None,
		}
	}

	/// Parses `input` into a raw document. Key order is preserved.
	pub fn parse(self, input: &str) -> Result<Value> {
		match self {
			Self::Json => Ok(serde_json::from_str(input)?),
			Self::Toml => Ok(toml::from_str(input)?),
		}
	}
}

/// Reads a raw document from `path`, choosing the format by extension.
pub fn load_document(path: &Path) -> Result<Value> {
	let format = PreferenceFormat::from_path(path).ok_or_else(|| PreferenceError::UnsupportedFormat(path.to_path_buf()))?;
	let content = std::fs::read_to_string(path).map_err(|source| PreferenceError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let document = format.parse(&content)?;
	tracing::debug!(domain = "nav", path = %path.display(), "loaded preference document");
	Ok(document)
}
