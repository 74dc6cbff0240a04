//! Preference loading errors and normalization warnings.

use std::fmt;
use std::path::PathBuf;

use crate::action::Action;

/// Failure to read or parse a preference document.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
	#[error("invalid JSON preference document: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid TOML preference document: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The file extension names no supported format.
	#[error("unsupported preference format: {}", .0.display())]
	UnsupportedFormat(PathBuf),
}

/// Result type for preference loading.
pub type Result<T> = std::result::Result<T, PreferenceError>;

/// Non-fatal problem found while normalizing a preference document.
///
/// The offending entry is dropped; the rest of the document still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeWarning {
	/// The document root or its `sections` entry is not an object.
	MalformedDocument { reason: String },
	/// A section entry is neither a directive string nor an object.
	MalformedSection { section: String, reason: String },
	/// An item or child entry is neither a directive string nor an object.
	MalformedItem { section: String, item: String, reason: String },
	/// An action keyword that names no known action; the action is inferred instead.
	UnknownAction { path: String, action: String },
	/// An action used where it cannot apply, such as `@move` inside the item's home section.
	RejectedAction { section: String, item: String, action: Action },
}

impl fmt::Display for NormalizeWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MalformedDocument { reason } => write!(f, "preference document ignored: {reason}"),
			Self::MalformedSection { section, reason } => write!(f, "section '{section}' ignored: {reason}"),
			Self::MalformedItem { section, item, reason } => write!(f, "item '{item}' in section '{section}' ignored: {reason}"),
			Self::UnknownAction { path, action } => write!(f, "unknown action '{action}' at '{path}'"),
			Self::RejectedAction { section, item, action } => {
				let reason = if action.requires_foreign() { "item already lives there" } else { "item does not live there" };
				write!(f, "{action} on '{item}' in section '{section}' ignored: {reason}")
			}
		}
	}
}
