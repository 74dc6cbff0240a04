use std::path::PathBuf;

use waymark_preferences::PreferenceError;
use waymark_registry::RegistryError;

/// Errors raised while configuring the navigation context or building a tree.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
	#[error("invalid navigation config: {0}")]
	Config(#[from] toml::de::Error),

	#[error("failed to read navigation config {}: {source}", path.display())]
	ConfigIo {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error(transparent)]
	Preferences(#[from] PreferenceError),
}

pub type Result<T> = std::result::Result<T, NavError>;
