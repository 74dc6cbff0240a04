//! Directive actions.

use std::fmt;

use serde::{Serialize, Serializer};

/// Structural edit a directive performs on a section or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	/// Supplies an item or section absent from the defaults.
	Create,
	/// Hides an item in its home section.
	Remove,
	/// Edits an item in its home section.
	Modify,
	/// Copies an item into a foreign section.
	Alias,
	/// Relocates an item into a foreign section.
	Move,
	/// Keeps an item unchanged; only anchors its position when reordering.
	Inherit,
}

impl Action {
	pub const ALL: [Action; 6] = [Self::Create, Self::Remove, Self::Modify, Self::Alias, Self::Move, Self::Inherit];

	/// Parses `@create` style keywords; the `@` marker is optional.
	pub fn parse(raw: &str) -> Option<Self> {
		let keyword = raw.trim();
		let keyword = keyword.strip_prefix('@').unwrap_or(keyword);
		Self::ALL.into_iter().find(|action| action.keyword() == keyword)
	}

	/// Keyword without the `@` marker.
	pub const fn keyword(self) -> &'static str {
		match self {
			Self::Create => "create",
			Self::Remove => "remove",
			Self::Modify => "modify",
			Self::Alias => "alias",
			Self::Move => "move",
			Self::Inherit => "inherit",
		}
	}

	/// Whether the action is only meaningful for an item in its home section.
	pub const fn requires_home(self) -> bool {
		matches!(self, Self::Remove | Self::Modify | Self::Inherit)
	}

	/// Whether the action is only meaningful outside the item's home section.
	pub const fn requires_foreign(self) -> bool {
		matches!(self, Self::Move)
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "@{}", self.keyword())
	}
}

impl Serialize for Action {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("@create", Some(Action::Create))]
	#[case("remove", Some(Action::Remove))]
	#[case(" @inherit ", Some(Action::Inherit))]
	#[case("@hide", None)]
	#[case("", None)]
	fn parses_keywords(#[case] raw: &str, #[case] expected: Option<Action>) {
		assert_eq!(Action::parse(raw), expected);
	}

	#[test]
	fn displays_with_marker() {
		assert_eq!(Action::Move.to_string(), "@move");
	}
}
