//! Navigation items and the registry they are declared in.
//!
//! - [`item`] - the [`NavItem`] node, its children, and deferred producers
//! - [`id`] - slug and `::`-path identifier grammar
//! - [`urls`] - url normalization and control panel active matching
//! - [`registry`] - the ordered [`ItemRegistry`]
//! - [`defaults`] - built-in sections and items
//! - [`icon`] - icon names versus inline markup
//! - [`auth`] - capability requirements and the [`Actor`] trait

pub mod auth;
pub mod defaults;
pub mod error;
pub mod icon;
pub mod id;
pub mod item;
pub mod registry;
pub mod urls;

pub use auth::{Actor, Authorization, SuperUser};
pub use defaults::{core_registry, seed_core_nav};
pub use error::{RegistryError, Result};
pub use icon::{IconResolver, SvgDirectory};
pub use item::{ChildEntry, ChildProducer, Children, NavItem};
pub use registry::{ItemRegistry, RegistrySection};
pub use urls::{UrlBase, UrlKind};
