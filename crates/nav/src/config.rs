//! Navigation context configuration.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use waymark_registry::{SvgDirectory, UrlBase};

use crate::error::{NavError, Result};

/// Site settings the navigation needs to produce urls and icons.
///
/// ```toml
/// app_url = "https://example.com"
/// cp_route = "cp"
/// icon_dir = "resources/svg"
///
/// [routes]
/// "wordpress-importer.index" = "/cp/wordpress-importer"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
	/// Origin every relative url is resolved against.
	pub app_url: String,
	/// Path prefix of the control panel.
	pub cp_route: String,
	/// Named routes items can point at instead of a url.
	pub routes: IndexMap<String, String>,
	/// Directory of bundled `<name>.svg` icons.
	pub icon_dir: Option<PathBuf>,
}

impl Default for NavConfig {
	fn default() -> Self {
		Self {
			app_url: "http://localhost".to_string(),
			cp_route: "cp".to_string(),
			routes: IndexMap::new(),
			icon_dir: None,
		}
	}
}

impl NavConfig {
	pub fn from_toml(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|source| NavError::ConfigIo {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml(&content)
	}

	pub fn url_base(&self) -> Result<UrlBase> {
		let base = UrlBase::new(&self.app_url, &self.cp_route)?;
		Ok(base.with_routes(self.routes.iter().map(|(name, target)| (name.clone(), target.clone()))))
	}

	pub fn icons(&self) -> Option<SvgDirectory> {
		self.icon_dir.as_ref().map(|dir| SvgDirectory::new(dir.clone()))
	}
}
