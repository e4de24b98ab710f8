//! Media module for item representation and resolution.

pub mod item;
pub mod resolver;

pub use item::{MediaKind, ResolvedItem};
pub use resolver::MediaResolver;
