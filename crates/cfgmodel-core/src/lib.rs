//! Ordered configuration value tree, codec registry, and entry combinators.
//!
//! The document model is an order-preserving tree of [`ConfigValue`] nodes
//! rooted in [`Section`]s. Typed domain values move in and out of the tree
//! through codecs: inline codecs handle single string tokens, structured
//! codecs handle whole sections, and the [`serializer::SerializerRegistry`]
//! resolves the right codec for a runtime type in either direction.
//!
//! Everything here is synchronous and in-memory. A registry is populated
//! once at startup and then shared read-only; sections are built and read
//! single-threaded.

mod error;
mod section;
mod value;

pub mod serializer;

pub use error::ConfigError;
pub use section::Section;
pub use value::ConfigValue;
