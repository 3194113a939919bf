//! Ordered configuration data model, codec registry, range grammar, and JSON
//! provider.
//!
//! This facade crate re-exports the core document model
//! ([`Section`]/[`ConfigValue`]), the codec machinery under [`serializer`],
//! the [`Range`] grammar, and the [`JsonProvider`], and adds a set of
//! ready-made payload types together with [`default_registry`], which wires
//! their codecs into a [`SerializerRegistry`].

pub mod identifier;
pub mod math;
pub mod requirement;

pub use cfgmodel_core::serializer;
pub use cfgmodel_core::{ConfigError, ConfigValue, Section};
pub use cfgmodel_json::{JsonError, JsonProvider};
pub use cfgmodel_range::{FloatRangeCodec, IntRangeCodec, Range, RangeCodec};

pub use identifier::Identifier;
pub use math::{Color, Vec2d, Vec2i, Vec3d, Vec3i};
pub use requirement::CompositeCheck;

use cfgmodel_core::serializer::{inline_codec, SerializerRegistry};
use uuid::Uuid;

/// Builds a registry covering every payload type this crate ships.
///
/// Identifiers decoded from bare paths take `default_namespace`. `Vec3d`
/// gets both its compact token codec and the structured `{x, y, z}` codec,
/// so either input form decodes while output stays compact.
pub fn default_registry(default_namespace: &str) -> Result<SerializerRegistry, ConfigError> {
    let mut reg = SerializerRegistry::new();
    reg.register_inline::<Vec3d>(Vec3d::codec())?;
    reg.register_structured::<Vec3d>(Vec3d::structured())?;
    reg.register_inline::<Vec3i>(Vec3i::codec())?;
    reg.register_inline::<Vec2d>(Vec2d::codec())?;
    reg.register_inline::<Vec2i>(Vec2i::codec())?;
    reg.register_inline::<Color>(Color::codec())?;
    reg.register_inline::<Identifier>(Identifier::codec(default_namespace.to_string()))?;
    reg.register_inline::<Uuid>(inline_codec(
        |id: &Uuid| id.to_string(),
        |token| {
            Uuid::parse_str(token).map_err(|_| ConfigError::malformed(token, "expected a UUID"))
        },
    ))?;
    reg.register_inline::<Range<i64>>(IntRangeCodec::new())?;
    reg.register_inline::<Range<f64>>(FloatRangeCodec::new())?;
    Ok(reg)
}
