//! Capability requirements attached to items, and the actor checked against them.

use serde::{Deserialize, Serialize};

/// Ability (plus optional arguments) an actor must hold to see an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
	pub ability: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub arguments: Vec<String>,
}

impl Authorization {
	pub fn new(ability: impl Into<String>) -> Self {
		Self {
			ability: ability.into(),
			arguments: Vec::new(),
		}
	}

	pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
		self.arguments.push(argument.into());
		self
	}
}

impl From<&str> for Authorization {
	fn from(ability: &str) -> Self {
		Self::new(ability)
	}
}

impl From<String> for Authorization {
	fn from(ability: String) -> Self {
		Self::new(ability)
	}
}

/// The user a navigation tree is being built for.
///
/// Implemented by the host application's auth layer.
pub trait Actor {
	/// Whether the actor may use the control panel at all.
	fn is_control_panel_user(&self) -> bool;

	/// Checks one capability. Errors are treated as a denial by callers.
	fn can(&self, authorization: &Authorization) -> anyhow::Result<bool>;
}

/// Actor holding every ability; used for previews and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuperUser;

impl Actor for SuperUser {
	fn is_control_panel_user(&self) -> bool {
		true
	}

	fn can(&self, _authorization: &Authorization) -> anyhow::Result<bool> {
		Ok(true)
	}
}
