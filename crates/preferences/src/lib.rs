//! Navigation preference documents.
//!
//! A preference document is a loosely shaped override tree stored per layer
//! (site default, role, user). [`normalize`] turns one into [`NavPreferences`],
//! the canonical directive form consumed by the tree merger.

mod action;
mod directive;
mod error;
mod layer;
mod load;
mod normalize;
mod raw;

pub use action::Action;
pub use directive::{ItemDirective, NavPreferences, SectionDirective};
pub use error::{NormalizeWarning, PreferenceError, Result};
pub use layer::{Layer, PreferenceLayers, PreferenceSource};
pub use load::{PreferenceFormat, load_document};
pub use normalize::{NormalizeReport, normalize, normalize_with_warnings};
