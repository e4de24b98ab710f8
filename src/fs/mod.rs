//! Filesystem module.
//!
//! Provides destination routing under the configured download root.

pub mod paths;

pub use paths::StorageRouter;
