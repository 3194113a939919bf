//! Type-indexed codec registry with direction-aware lookup.
//!
//! Two independent tables (inline and structured) keyed by exact `TypeId`,
//! plus an ordered list of variant edges replacing reflective assignability
//! scans: an edge `Narrow -> Wide` declares that values of `Narrow` may be
//! widened into `Wide`. Encode-direction lookups follow edges from the
//! requested type to a registered wide codec; decode-direction lookups follow
//! edges from a registered narrow codec to the requested type. Exact matches
//! always win; otherwise edges are tried in registration order.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::marker::PhantomData;

use crate::serializer::{InlineCodec, StructuredCodec};
use crate::{ConfigError, ConfigValue, Section};

/// Whether a codec lookup is for serialization or deserialization.
///
/// Governs assignability polarity: a codec registered for a wide type may
/// encode narrower values, while a codec registered for a narrow type may
/// satisfy a decode request for a wider one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

pub(crate) trait ErasedStructured: Send + Sync {
    fn encode_any(&self, reg: &SerializerRegistry, value: &dyn Any)
        -> Result<Section, ConfigError>;
    fn decode_any(
        &self,
        reg: &SerializerRegistry,
        section: &Section,
    ) -> Result<Box<dyn Any>, ConfigError>;
    fn can_decode_any(&self, reg: &SerializerRegistry, section: &Section) -> bool;
}

struct StructuredSlot<T, C> {
    codec: C,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Any, C: StructuredCodec<T> + Send + Sync> ErasedStructured for StructuredSlot<T, C> {
    fn encode_any(
        &self,
        reg: &SerializerRegistry,
        value: &dyn Any,
    ) -> Result<Section, ConfigError> {
        let value = value
            .downcast_ref::<T>()
            .ok_or_else(|| ConfigError::mismatch(type_name::<T>(), "foreign value"))?;
        Ok(self.codec.encode(reg, value))
    }

    fn decode_any(
        &self,
        reg: &SerializerRegistry,
        section: &Section,
    ) -> Result<Box<dyn Any>, ConfigError> {
        let value = self.codec.decode(reg, section)?;
        Ok(Box::new(value))
    }

    fn can_decode_any(&self, reg: &SerializerRegistry, section: &Section) -> bool {
        self.codec.can_decode(reg, section)
    }
}

pub(crate) trait ErasedInline: Send + Sync {
    fn encode_any(&self, value: &dyn Any) -> Result<String, ConfigError>;
    fn decode_any(&self, token: &str) -> Result<Box<dyn Any>, ConfigError>;
    fn can_decode_any(&self, token: &str) -> bool;
}

struct InlineSlot<T, C> {
    codec: C,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Any, C: InlineCodec<T> + Send + Sync> ErasedInline for InlineSlot<T, C> {
    fn encode_any(&self, value: &dyn Any) -> Result<String, ConfigError> {
        let value = value
            .downcast_ref::<T>()
            .ok_or_else(|| ConfigError::mismatch(type_name::<T>(), "foreign value"))?;
        Ok(self.codec.encode(value))
    }

    fn decode_any(&self, token: &str) -> Result<Box<dyn Any>, ConfigError> {
        let value = self.codec.decode(token)?;
        Ok(Box::new(value))
    }

    fn can_decode_any(&self, token: &str) -> bool {
        self.codec.can_decode(token)
    }
}

struct Table<E: ?Sized> {
    order: Vec<Box<E>>,
    by_type: HashMap<TypeId, usize>,
}

impl<E: ?Sized> Table<E> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            by_type: HashMap::new(),
        }
    }

    /// Duplicate exact-type registrations keep the first codec.
    fn insert(
        &mut self,
        type_id: TypeId,
        type_name: &'static str,
        codec: Box<E>,
    ) -> Result<(), ConfigError> {
        if self.by_type.contains_key(&type_id) {
            return Err(ConfigError::DuplicateRegistration(type_name));
        }
        self.by_type.insert(type_id, self.order.len());
        self.order.push(codec);
        Ok(())
    }

    fn exact(&self, type_id: TypeId) -> Option<&E> {
        self.by_type
            .get(&type_id)
            .map(|&idx| self.order[idx].as_ref())
    }
}

type WidenFn = Box<dyn Fn(&dyn Any) -> Option<Box<dyn Any>> + Send + Sync>;

struct VariantEdge {
    narrow: TypeId,
    wide: TypeId,
    narrow_name: &'static str,
    widen: WidenFn,
}

/// Registry of inline and structured codecs, populated once at startup.
///
/// The registry is an explicit value handed to document construction and
/// codec resolution; there is no ambient global instance. It provides no
/// interior locking: share it behind an `Arc` once registration is done.
pub struct SerializerRegistry {
    structured: Table<dyn ErasedStructured>,
    inline: Table<dyn ErasedInline>,
    edges: Vec<VariantEdge>,
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializerRegistry {
    pub fn new() -> Self {
        Self {
            structured: Table::new(),
            inline: Table::new(),
            edges: Vec::new(),
        }
    }

    /// Registers a structured codec for exactly `T`.
    ///
    /// A second registration for the same type is a configuration error; the
    /// first codec stays in place.
    pub fn register_structured<T: Any>(
        &mut self,
        codec: impl StructuredCodec<T> + Send + Sync + 'static,
    ) -> Result<(), ConfigError> {
        self.structured.insert(
            TypeId::of::<T>(),
            type_name::<T>(),
            Box::new(StructuredSlot {
                codec,
                _marker: PhantomData,
            }),
        )
    }

    /// Registers an inline codec for exactly `T`.
    pub fn register_inline<T: Any>(
        &mut self,
        codec: impl InlineCodec<T> + Send + Sync + 'static,
    ) -> Result<(), ConfigError> {
        self.inline.insert(
            TypeId::of::<T>(),
            type_name::<T>(),
            Box::new(InlineSlot {
                codec,
                _marker: PhantomData,
            }),
        )
    }

    /// Declares that a `Narrow` value may serve as a `Wide` one.
    ///
    /// The edge is consulted by both tables and both directions: an encode
    /// request for `Narrow` may use a codec registered for `Wide` (widening
    /// the value first), and a decode request for `Wide` may use a codec
    /// registered for `Narrow` (widening the result). When several edges
    /// apply, the one registered first wins.
    pub fn register_variant<N: Any, W: Any>(
        &mut self,
        widen: impl Fn(&N) -> W + Send + Sync + 'static,
    ) {
        self.edges.push(VariantEdge {
            narrow: TypeId::of::<N>(),
            wide: TypeId::of::<W>(),
            narrow_name: type_name::<N>(),
            widen: Box::new(move |any| {
                any.downcast_ref::<N>()
                    .map(|narrow| Box::new(widen(narrow)) as Box<dyn Any>)
            }),
        });
    }

    /// Finds a structured codec able to serve `T` in the given direction.
    pub fn lookup_structured<T: Any>(&self, direction: Direction) -> Option<StructuredRef<'_, T>> {
        let requested = TypeId::of::<T>();
        if let Some(codec) = self.structured.exact(requested) {
            return Some(StructuredRef {
                reg: self,
                kind: Resolved::Exact(codec),
                _marker: PhantomData,
            });
        }
        let (kind, codec) = self.scan_edges(requested, direction, |id| self.structured.exact(id))?;
        Some(StructuredRef {
            reg: self,
            kind: match kind {
                EdgeUse::Encode(edge) => Resolved::WidenEncode { edge, codec },
                EdgeUse::Decode(edge) => Resolved::WidenDecode { edge, codec },
            },
            _marker: PhantomData,
        })
    }

    /// Finds an inline codec able to serve `T` in the given direction.
    pub fn lookup_inline<T: Any>(&self, direction: Direction) -> Option<InlineRef<'_, T>> {
        let requested = TypeId::of::<T>();
        if let Some(codec) = self.inline.exact(requested) {
            return Some(InlineRef {
                kind: Resolved::Exact(codec),
                _marker: PhantomData,
            });
        }
        let (kind, codec) = self.scan_edges(requested, direction, |id| self.inline.exact(id))?;
        Some(InlineRef {
            kind: match kind {
                EdgeUse::Encode(edge) => Resolved::WidenEncode { edge, codec },
                EdgeUse::Decode(edge) => Resolved::WidenDecode { edge, codec },
            },
            _marker: PhantomData,
        })
    }

    fn scan_edges<'r, E: ?Sized>(
        &'r self,
        requested: TypeId,
        direction: Direction,
        exact: impl Fn(TypeId) -> Option<&'r E>,
    ) -> Option<(EdgeUse<'r>, &'r E)> {
        for edge in &self.edges {
            match direction {
                Direction::Encode if edge.narrow == requested => {
                    if let Some(codec) = exact(edge.wide) {
                        return Some((EdgeUse::Encode(edge), codec));
                    }
                }
                Direction::Decode if edge.wide == requested => {
                    if let Some(codec) = exact(edge.narrow) {
                        return Some((EdgeUse::Decode(edge), codec));
                    }
                }
                _ => {}
            }
        }
        None
    }

    pub fn can_encode<T: Any>(&self) -> bool {
        self.lookup_structured::<T>(Direction::Encode).is_some()
    }

    pub fn can_decode<T: Any>(&self) -> bool {
        self.lookup_structured::<T>(Direction::Decode).is_some()
    }

    pub fn can_encode_inline<T: Any>(&self) -> bool {
        self.lookup_inline::<T>(Direction::Encode).is_some()
    }

    pub fn can_decode_inline<T: Any>(&self) -> bool {
        self.lookup_inline::<T>(Direction::Decode).is_some()
    }

    /// Serializes a value through the registry: inline codecs first (compact
    /// form preferred), then structured ones.
    pub fn serialize<T: Any>(&self, value: &T) -> Result<ConfigValue, ConfigError> {
        if let Some(codec) = self.lookup_inline::<T>(Direction::Encode) {
            return Ok(ConfigValue::String(codec.encode(value)?));
        }
        if let Some(codec) = self.lookup_structured::<T>(Direction::Encode) {
            return Ok(ConfigValue::Section(codec.encode(value)?));
        }
        Err(ConfigError::NoCodecRegistered(type_name::<T>()))
    }

    /// Serializes a value, degrading to its literal `Display` form when no
    /// codec is registered.
    ///
    /// The literal path is lossy: the string node it produces carries no type
    /// information and a later typed decode of it will fail. It is a last
    /// resort, not a silent success, so it logs a warning.
    pub fn serialize_or_literal<T: Any + Display>(&self, value: &T) -> ConfigValue {
        match self.serialize(value) {
            Ok(node) => node,
            Err(ConfigError::NoCodecRegistered(_)) => {
                log::warn!(
                    "no codec registered for {}; storing lossy literal form",
                    type_name::<T>()
                );
                ConfigValue::String(value.to_string())
            }
            Err(err) => {
                log::warn!(
                    "failed to serialize {}: {err}; storing lossy literal form",
                    type_name::<T>()
                );
                ConfigValue::String(value.to_string())
            }
        }
    }

    /// Deserializes a node by shape: sections route to structured codecs,
    /// strings to inline codecs.
    pub fn deserialize<T: Any>(&self, node: &ConfigValue) -> Result<T, ConfigError> {
        match node {
            ConfigValue::Section(section) => self
                .lookup_structured::<T>(Direction::Decode)
                .ok_or(ConfigError::NoCodecRegistered(type_name::<T>()))?
                .decode(section),
            ConfigValue::String(token) => self
                .lookup_inline::<T>(Direction::Decode)
                .ok_or(ConfigError::NoCodecRegistered(type_name::<T>()))?
                .decode(token),
            other => Err(ConfigError::mismatch(type_name::<T>(), other.kind())),
        }
    }

    /// Non-throwing probe matching [`SerializerRegistry::deserialize`].
    pub fn accepts<T: Any>(&self, node: &ConfigValue) -> bool {
        match node {
            ConfigValue::Section(section) => self
                .lookup_structured::<T>(Direction::Decode)
                .is_some_and(|codec| codec.can_decode(section)),
            ConfigValue::String(token) => self
                .lookup_inline::<T>(Direction::Decode)
                .is_some_and(|codec| codec.can_decode(token)),
            _ => false,
        }
    }
}

enum EdgeUse<'r> {
    Encode(&'r VariantEdge),
    Decode(&'r VariantEdge),
}

enum Resolved<'r, E: ?Sized> {
    Exact(&'r E),
    WidenEncode {
        edge: &'r VariantEdge,
        codec: &'r E,
    },
    WidenDecode {
        edge: &'r VariantEdge,
        codec: &'r E,
    },
}

/// Direction-resolved handle to a structured codec for `T`.
pub struct StructuredRef<'r, T> {
    reg: &'r SerializerRegistry,
    kind: Resolved<'r, dyn ErasedStructured>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Any> StructuredRef<'_, T> {
    pub fn encode(&self, value: &T) -> Result<Section, ConfigError> {
        match &self.kind {
            Resolved::Exact(codec) => codec.encode_any(self.reg, value),
            Resolved::WidenEncode { edge, codec } => {
                let wide = (edge.widen)(value)
                    .ok_or_else(|| ConfigError::mismatch(edge.narrow_name, type_name::<T>()))?;
                codec.encode_any(self.reg, wide.as_ref())
            }
            Resolved::WidenDecode { .. } => Err(ConfigError::NoCodecRegistered(type_name::<T>())),
        }
    }

    pub fn decode(&self, section: &Section) -> Result<T, ConfigError> {
        let decoded = match &self.kind {
            Resolved::Exact(codec) => codec.decode_any(self.reg, section)?,
            Resolved::WidenDecode { edge, codec } => {
                let narrow = codec.decode_any(self.reg, section)?;
                (edge.widen)(narrow.as_ref())
                    .ok_or_else(|| ConfigError::mismatch(type_name::<T>(), edge.narrow_name))?
            }
            Resolved::WidenEncode { .. } => {
                return Err(ConfigError::NoCodecRegistered(type_name::<T>()))
            }
        };
        decoded
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ConfigError::mismatch(type_name::<T>(), "foreign value"))
    }

    pub fn can_decode(&self, section: &Section) -> bool {
        match &self.kind {
            Resolved::Exact(codec) | Resolved::WidenDecode { codec, .. } => {
                codec.can_decode_any(self.reg, section)
            }
            Resolved::WidenEncode { .. } => false,
        }
    }
}

/// Direction-resolved handle to an inline codec for `T`.
pub struct InlineRef<'r, T> {
    kind: Resolved<'r, dyn ErasedInline>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Any> InlineRef<'_, T> {
    pub fn encode(&self, value: &T) -> Result<String, ConfigError> {
        match &self.kind {
            Resolved::Exact(codec) => codec.encode_any(value),
            Resolved::WidenEncode { edge, codec } => {
                let wide = (edge.widen)(value)
                    .ok_or_else(|| ConfigError::mismatch(edge.narrow_name, type_name::<T>()))?;
                codec.encode_any(wide.as_ref())
            }
            Resolved::WidenDecode { .. } => Err(ConfigError::NoCodecRegistered(type_name::<T>())),
        }
    }

    pub fn decode(&self, token: &str) -> Result<T, ConfigError> {
        let decoded = match &self.kind {
            Resolved::Exact(codec) => codec.decode_any(token)?,
            Resolved::WidenDecode { edge, codec } => {
                let narrow = codec.decode_any(token)?;
                (edge.widen)(narrow.as_ref())
                    .ok_or_else(|| ConfigError::mismatch(type_name::<T>(), edge.narrow_name))?
            }
            Resolved::WidenEncode { .. } => {
                return Err(ConfigError::NoCodecRegistered(type_name::<T>()))
            }
        };
        decoded
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ConfigError::mismatch(type_name::<T>(), "foreign value"))
    }

    pub fn can_decode(&self, token: &str) -> bool {
        match &self.kind {
            Resolved::Exact(codec) | Resolved::WidenDecode { codec, .. } => {
                codec.can_decode_any(token)
            }
            Resolved::WidenEncode { .. } => false,
        }
    }
}
