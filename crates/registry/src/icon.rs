//! Icon values and their resolution to inline markup.

use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};

/// Whether an icon value is already inline markup rather than a registered name.
pub fn is_inline_markup(icon: &str) -> bool {
	icon.trim_start().starts_with('<')
}

/// Turns a registered icon name into markup.
pub trait IconResolver {
	/// Returns markup for `name`, or `None` when no such icon is registered.
	fn resolve_icon(&self, name: &str) -> Result<Option<String>>;
}

/// Resolves icon names against `<dir>/<name>.svg` files.
#[derive(Debug, Clone)]
pub struct SvgDirectory {
	root: PathBuf,
}

impl SvgDirectory {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl IconResolver for SvgDirectory {
	fn resolve_icon(&self, name: &str) -> Result<Option<String>> {
		if name.contains(['/', '\\']) || name.starts_with('.') {
			return Ok(None);
		}

		let path = self.root.join(format!("{name}.svg"));
		match std::fs::read_to_string(&path) {
			Ok(markup) => Ok(Some(markup)),
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(source) => Err(RegistryError::Icon {
				name: name.to_string(),
				source,
			}),
		}
	}
}

/// Resolves `icon` to markup: inline markup is returned verbatim, names go
/// through `resolver`, and unknown names fall back to the raw value.
pub fn icon_markup(icon: &str, resolver: &dyn IconResolver) -> Result<String> {
	if is_inline_markup(icon) {
		return Ok(icon.to_string());
	}
	Ok(resolver.resolve_icon(icon)?.unwrap_or_else(|| icon.to_string()))
}
