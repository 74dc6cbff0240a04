//! Navigation tree resolution.
//!
//! A build realizes the registry from a [`NavContext`], applies the default,
//! role, and user preference layers with the [`TreeMerger`], drops what the
//! actor may not see with the [`AuthorizationFilter`], and returns the
//! [`NavTree`] grouped by section.
//!
//! ```ignore
//! let context = NavContext::from_config(&NavConfig::load(path)?)?;
//! context.register("Droids", "C-3PO", |item| {
//! 	item.set_url("/c3po").can("view droids");
//! });
//! let tree = context.build(&actor, &layers)?;
//! ```

mod builder;
mod config;
mod context;
mod error;
mod filter;
pub mod merge;
mod overrides;
mod tree;

pub use builder::Builder;
pub use config::NavConfig;
pub use context::{Extension, NavContext};
pub use error::{NavError, Result};
pub use filter::AuthorizationFilter;
pub use merge::{MergedTree, TreeMerger};
pub use tree::NavTree;
pub use waymark_preferences as preferences;
pub use waymark_registry as registry;
