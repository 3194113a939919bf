//! Entry descriptors and the object codec built from them.
//!
//! An [`Entry`] binds one named field of a composite type: a key, a node
//! codec, an accessor, and an optional fallback. [`object_codec`] assembles a
//! [`StructuredCodec`] from a tuple of entries and a constructor; encode
//! writes keys in declaration order (fixing on-disk key order), decode parses
//! every entry fail-fast in the same order and only then calls the
//! constructor, so no partially-built value ever exists.

use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::serializer::{
    InlineCodec, InlineValue, NaturalCodec, SerializerRegistry, StructuredCodec, StructuredValue,
    ValueCodec,
};
use crate::{ConfigError, ConfigValue, Section};

use super::primitives::{FromConfig, ToConfig};
use super::traits::RawStringCodec;

/// One named, typed field binding of a composite type `R`.
pub struct Entry<R, T> {
    key: String,
    codec: Box<dyn ValueCodec<T> + Send + Sync>,
    getter: Box<dyn Fn(&R) -> T + Send + Sync>,
    fallback: Option<T>,
}

impl<R, T: Clone> Entry<R, T> {
    pub fn new(
        codec: impl ValueCodec<T> + Send + Sync + 'static,
        key: impl Into<String>,
        getter: impl Fn(&R) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            codec: Box::new(codec),
            getter: Box::new(getter),
            fallback: None,
        }
    }

    /// Makes the entry optional: a missing or undecodable value yields the
    /// given default instead of failing the composite decode.
    pub fn or_default(mut self, value: T) -> Self {
        self.fallback = Some(value);
        self
    }

    /// Optional entry defaulting to the domain default of `T`.
    pub fn optional(self) -> Self
    where
        T: Default,
    {
        self.or_default(T::default())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn encode_field(&self, reg: &SerializerRegistry, owner: &R) -> ConfigValue {
        self.codec.encode(reg, &(self.getter)(owner))
    }

    pub(crate) fn parse(
        &self,
        reg: &SerializerRegistry,
        section: &Section,
    ) -> Result<T, ConfigError> {
        let Some(node) = section.get(&self.key) else {
            return match &self.fallback {
                Some(default) => Ok(default.clone()),
                None => Err(ConfigError::MissingKey(self.key.clone())),
            };
        };
        match (self.codec.decode(reg, node), &self.fallback) {
            (Ok(value), _) => Ok(value),
            (Err(_), Some(default)) => Ok(default.clone()),
            (Err(err), None) => Err(err),
        }
    }

    pub(crate) fn is_valid(&self, reg: &SerializerRegistry, section: &Section) -> bool {
        if self.fallback.is_some() {
            return true;
        }
        section
            .get(&self.key)
            .is_some_and(|node| self.codec.can_decode(reg, node))
    }
}

/// Entry using the field type's natural conversion (primitives directly,
/// registry-backed types through the registry).
pub fn field<R, T>(
    key: impl Into<String>,
    getter: impl Fn(&R) -> T + Send + Sync + 'static,
) -> Entry<R, T>
where
    T: FromConfig + ToConfig + Clone + 'static,
{
    Entry::new(NaturalCodec::new(), key, getter)
}

/// Entry backed by an explicit inline codec.
pub fn inline_entry<R, T: Clone>(
    codec: impl InlineCodec<T> + Send + Sync + 'static,
    key: impl Into<String>,
    getter: impl Fn(&R) -> T + Send + Sync + 'static,
) -> Entry<R, T>
where
    T: 'static,
{
    Entry::new(InlineValue(codec), key, getter)
}

/// Entry backed by an explicit structured codec.
pub fn structured_entry<R, T: Clone>(
    codec: impl StructuredCodec<T> + Send + Sync + 'static,
    key: impl Into<String>,
    getter: impl Fn(&R) -> T + Send + Sync + 'static,
) -> Entry<R, T>
where
    T: 'static,
{
    Entry::new(StructuredValue(codec), key, getter)
}

/// Node codec for a homogeneous list, one element codec applied per item.
pub struct ListCodec<C>(pub C);

impl<T, C: ValueCodec<T>> ValueCodec<Vec<T>> for ListCodec<C> {
    fn encode(&self, reg: &SerializerRegistry, value: &Vec<T>) -> ConfigValue {
        ConfigValue::List(value.iter().map(|item| self.0.encode(reg, item)).collect())
    }

    fn decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> Result<Vec<T>, ConfigError> {
        let items = node
            .as_list()
            .ok_or_else(|| ConfigError::mismatch("list", node.kind()))?;
        items.iter().map(|item| self.0.decode(reg, item)).collect()
    }

    fn can_decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> bool {
        node.as_list()
            .is_some_and(|items| items.iter().all(|item| self.0.can_decode(reg, item)))
    }
}

/// Builds a list codec from an element codec.
pub fn list_of<C>(element: C) -> ListCodec<C> {
    ListCodec(element)
}

/// Node codec for a map stored as a section: keys through an inline codec,
/// values through a node codec. Key order is preserved both ways.
pub struct MapCodec<KC, VC> {
    keys: KC,
    values: VC,
}

impl<K, V, KC, VC> ValueCodec<IndexMap<K, V>> for MapCodec<KC, VC>
where
    K: Hash + Eq,
    KC: InlineCodec<K>,
    VC: ValueCodec<V>,
{
    fn encode(&self, reg: &SerializerRegistry, value: &IndexMap<K, V>) -> ConfigValue {
        let mut out = Section::new();
        for (key, item) in value {
            out.set(self.keys.encode(key), self.values.encode(reg, item));
        }
        ConfigValue::Section(out)
    }

    fn decode(
        &self,
        reg: &SerializerRegistry,
        node: &ConfigValue,
    ) -> Result<IndexMap<K, V>, ConfigError> {
        let section = node
            .as_section()
            .ok_or_else(|| ConfigError::mismatch("section", node.kind()))?;
        section
            .entries()
            .map(|(key, item)| Ok((self.keys.decode(key)?, self.values.decode(reg, item)?)))
            .collect()
    }

    fn can_decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> bool {
        node.as_section().is_some_and(|section| {
            section
                .entries()
                .all(|(key, item)| self.keys.can_decode(key) && self.values.can_decode(reg, item))
        })
    }
}

/// Map codec with plain string keys.
pub fn map_of<VC>(values: VC) -> MapCodec<RawStringCodec, VC> {
    MapCodec {
        keys: RawStringCodec,
        values,
    }
}

/// Map codec with inline-encoded keys.
pub fn map_of_keyed<KC, VC>(keys: KC, values: VC) -> MapCodec<KC, VC> {
    MapCodec { keys, values }
}

/// Structured codec assembled from a tuple of entries and a constructor.
///
/// Implemented for entry tuples of arity 1 through 16 by a single macro.
pub struct ObjectCodec<R, E, F> {
    entries: E,
    ctor: F,
    _marker: PhantomData<fn() -> R>,
}

/// Assembles a [`StructuredCodec`] for `R` from entry descriptors.
pub fn object_codec<R, E, F>(entries: E, ctor: F) -> ObjectCodec<R, E, F> {
    ObjectCodec {
        entries,
        ctor,
        _marker: PhantomData,
    }
}

macro_rules! impl_object_codec {
    ($(($idx:tt, $ty:ident)),+) => {
        impl<R, F, $($ty: Clone,)+> StructuredCodec<R> for ObjectCodec<R, ($(Entry<R, $ty>,)+), F>
        where
            F: Fn($($ty,)+) -> R,
        {
            fn encode(&self, reg: &SerializerRegistry, value: &R) -> Section {
                let mut section = Section::new();
                $(section.set(
                    self.entries.$idx.key().to_string(),
                    self.entries.$idx.encode_field(reg, value),
                );)+
                section
            }

            fn decode(
                &self,
                reg: &SerializerRegistry,
                section: &Section,
            ) -> Result<R, ConfigError> {
                Ok((self.ctor)($(self.entries.$idx.parse(reg, section)?,)+))
            }

            fn can_decode(&self, reg: &SerializerRegistry, section: &Section) -> bool {
                $(self.entries.$idx.is_valid(reg, section))&&+
            }
        }
    };
}

impl_object_codec!((0, T1));
impl_object_codec!((0, T1), (1, T2));
impl_object_codec!((0, T1), (1, T2), (2, T3));
impl_object_codec!((0, T1), (1, T2), (2, T3), (3, T4));
impl_object_codec!((0, T1), (1, T2), (2, T3), (3, T4), (4, T5));
impl_object_codec!((0, T1), (1, T2), (2, T3), (3, T4), (4, T5), (5, T6));
impl_object_codec!((0, T1), (1, T2), (2, T3), (3, T4), (4, T5), (5, T6), (6, T7));
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9),
    (9, T10)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9),
    (9, T10),
    (10, T11)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9),
    (9, T10),
    (10, T11),
    (11, T12)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9),
    (9, T10),
    (10, T11),
    (11, T12),
    (12, T13)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9),
    (9, T10),
    (10, T11),
    (11, T12),
    (12, T13),
    (13, T14)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9),
    (9, T10),
    (10, T11),
    (11, T12),
    (12, T13),
    (13, T14),
    (14, T15)
);
impl_object_codec!(
    (0, T1),
    (1, T2),
    (2, T3),
    (3, T4),
    (4, T5),
    (5, T6),
    (6, T7),
    (7, T8),
    (8, T9),
    (9, T10),
    (10, T11),
    (11, T12),
    (12, T13),
    (13, T14),
    (14, T15),
    (15, T16)
);
