//! Codec contracts: inline (string token), structured (section), and the
//! node-level [`ValueCodec`] the entry combinators are built on.

use std::marker::PhantomData;

use crate::serializer::SerializerRegistry;
use crate::{ConfigError, ConfigValue, Section};

/// Converts a scalar type to and from a single string token.
///
/// Used for map keys, enum-like types, and compact inline forms.
/// `can_decode` must not panic and must agree with `decode`'s outcome, so it
/// can be used for speculative type probing.
pub trait InlineCodec<T> {
    fn encode(&self, value: &T) -> String;

    fn decode(&self, token: &str) -> Result<T, ConfigError>;

    fn can_decode(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }
}

/// Converts a composite type to and from a [`Section`].
///
/// Sub-fields are resolved through the registry passed to each call, so a
/// codec itself stays a stateless value. `can_decode` is an independent code
/// path with the same success predicate as `decode`; it is the only way a
/// caller may probe capability, since `decode` is never invoked speculatively.
pub trait StructuredCodec<T> {
    fn encode(&self, reg: &SerializerRegistry, value: &T) -> Section;

    fn decode(&self, reg: &SerializerRegistry, section: &Section) -> Result<T, ConfigError>;

    fn can_decode(&self, reg: &SerializerRegistry, section: &Section) -> bool;
}

/// A codec over whole document nodes. Inline and structured codecs are
/// lifted into this via [`InlineValue`] and [`StructuredValue`].
pub trait ValueCodec<T> {
    fn encode(&self, reg: &SerializerRegistry, value: &T) -> ConfigValue;

    fn decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> Result<T, ConfigError>;

    fn can_decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> bool;
}

/// Lifts an [`InlineCodec`] to a [`ValueCodec`] over string nodes.
pub struct InlineValue<C>(pub C);

impl<T, C: InlineCodec<T>> ValueCodec<T> for InlineValue<C> {
    fn encode(&self, _reg: &SerializerRegistry, value: &T) -> ConfigValue {
        ConfigValue::String(self.0.encode(value))
    }

    fn decode(&self, _reg: &SerializerRegistry, node: &ConfigValue) -> Result<T, ConfigError> {
        match node.as_str() {
            Some(token) => self.0.decode(token),
            None => Err(ConfigError::mismatch("inline string", node.kind())),
        }
    }

    fn can_decode(&self, _reg: &SerializerRegistry, node: &ConfigValue) -> bool {
        node.as_str().is_some_and(|token| self.0.can_decode(token))
    }
}

/// Lifts a [`StructuredCodec`] to a [`ValueCodec`] over section nodes.
pub struct StructuredValue<C>(pub C);

impl<T, C: StructuredCodec<T>> ValueCodec<T> for StructuredValue<C> {
    fn encode(&self, reg: &SerializerRegistry, value: &T) -> ConfigValue {
        ConfigValue::Section(self.0.encode(reg, value))
    }

    fn decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> Result<T, ConfigError> {
        match node.as_section() {
            Some(section) => self.0.decode(reg, section),
            None => Err(ConfigError::mismatch("section", node.kind())),
        }
    }

    fn can_decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> bool {
        node.as_section()
            .is_some_and(|section| self.0.can_decode(reg, section))
    }
}

/// Composes an inline and a structured codec for the same type.
///
/// Encoding prefers the compact inline form. Decoding tries inline first
/// (unambiguous for scalar-shaped input) and falls back to the structured
/// codec when the node is a section; this order is part of the contract so
/// both-form types round-trip to their compact representation.
pub struct EitherCodec<I, S> {
    pub inline: I,
    pub structured: S,
}

impl<I, S> EitherCodec<I, S> {
    pub fn new(inline: I, structured: S) -> Self {
        Self { inline, structured }
    }
}

impl<T, I: InlineCodec<T>, S: StructuredCodec<T>> ValueCodec<T> for EitherCodec<I, S> {
    fn encode(&self, _reg: &SerializerRegistry, value: &T) -> ConfigValue {
        ConfigValue::String(self.inline.encode(value))
    }

    fn decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> Result<T, ConfigError> {
        match node {
            ConfigValue::String(token) => self.inline.decode(token),
            ConfigValue::Section(section) => self.structured.decode(reg, section),
            other => Err(ConfigError::mismatch("inline string or section", other.kind())),
        }
    }

    fn can_decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> bool {
        match node {
            ConfigValue::String(token) => self.inline.can_decode(token),
            ConfigValue::Section(section) => self.structured.can_decode(reg, section),
            _ => false,
        }
    }
}

/// Inline codec that passes string tokens through unchanged.
pub struct RawStringCodec;

impl InlineCodec<String> for RawStringCodec {
    fn encode(&self, value: &String) -> String {
        value.clone()
    }

    fn decode(&self, token: &str) -> Result<String, ConfigError> {
        Ok(token.to_string())
    }

    fn can_decode(&self, _token: &str) -> bool {
        true
    }
}

struct FnInlineCodec<T, E, D> {
    enc: E,
    dec: D,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T, E, D> InlineCodec<T> for FnInlineCodec<T, E, D>
where
    E: Fn(&T) -> String,
    D: Fn(&str) -> Result<T, ConfigError>,
{
    fn encode(&self, value: &T) -> String {
        (self.enc)(value)
    }

    fn decode(&self, token: &str) -> Result<T, ConfigError> {
        (self.dec)(token)
    }
}

/// Builds an [`InlineCodec`] from a pair of functions.
pub fn inline_codec<T>(
    enc: impl Fn(&T) -> String + Send + Sync + 'static,
    dec: impl Fn(&str) -> Result<T, ConfigError> + Send + Sync + 'static,
) -> impl InlineCodec<T> + Send + Sync + 'static
where
    T: 'static,
{
    FnInlineCodec {
        enc,
        dec,
        _marker: PhantomData,
    }
}

struct FnStructuredCodec<T, E, D, P> {
    enc: E,
    dec: D,
    probe: P,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T, E, D, P> StructuredCodec<T> for FnStructuredCodec<T, E, D, P>
where
    E: Fn(&SerializerRegistry, &T) -> Section,
    D: Fn(&SerializerRegistry, &Section) -> Result<T, ConfigError>,
    P: Fn(&SerializerRegistry, &Section) -> bool,
{
    fn encode(&self, reg: &SerializerRegistry, value: &T) -> Section {
        (self.enc)(reg, value)
    }

    fn decode(&self, reg: &SerializerRegistry, section: &Section) -> Result<T, ConfigError> {
        (self.dec)(reg, section)
    }

    fn can_decode(&self, reg: &SerializerRegistry, section: &Section) -> bool {
        (self.probe)(reg, section)
    }
}

/// Builds a [`StructuredCodec`] from encode, decode, and probe functions.
pub fn structured_codec<T>(
    enc: impl Fn(&SerializerRegistry, &T) -> Section + Send + Sync + 'static,
    dec: impl Fn(&SerializerRegistry, &Section) -> Result<T, ConfigError> + Send + Sync + 'static,
    probe: impl Fn(&SerializerRegistry, &Section) -> bool + Send + Sync + 'static,
) -> impl StructuredCodec<T> + Send + Sync + 'static
where
    T: 'static,
{
    FnStructuredCodec {
        enc,
        dec,
        probe,
        _marker: PhantomData,
    }
}
