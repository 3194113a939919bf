//! Conversions between primitive Rust values and document nodes.
//!
//! Domain types opt into [`FromConfig`]/[`ToConfig`] by delegating to the
//! registry (`reg.deserialize` / `reg.serialize_or_literal`); primitives
//! convert directly with the coercion rules of the value tree: integers
//! promote to floats, floats truncate on integer reads, and booleans accept
//! numeric and `"true"`/`"false"` forms.

use std::any::type_name;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::serializer::{SerializerRegistry, ValueCodec};
use crate::{ConfigError, ConfigValue, Section};

/// Reads `Self` out of a document node, consulting the registry for
/// non-primitive content.
pub trait FromConfig: Sized {
    fn from_config(value: &ConfigValue, reg: &SerializerRegistry) -> Result<Self, ConfigError>;

    /// Non-throwing probe; must agree with `from_config`'s outcome.
    fn accepts(value: &ConfigValue, reg: &SerializerRegistry) -> bool {
        Self::from_config(value, reg).is_ok()
    }
}

/// Writes `self` into a document node.
pub trait ToConfig {
    fn to_config(&self, reg: &SerializerRegistry) -> ConfigValue;
}

impl FromConfig for bool {
    fn from_config(value: &ConfigValue, _reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::Integer(n) => Ok(*n != 0),
            ConfigValue::Float(n) => Ok(*n != 0.0),
            ConfigValue::String(s) if s == "true" => Ok(true),
            ConfigValue::String(s) if s == "false" => Ok(false),
            other => Err(ConfigError::mismatch("bool", other.kind())),
        }
    }
}

impl ToConfig for bool {
    fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
        ConfigValue::Bool(*self)
    }
}

macro_rules! int_config {
    ($($ty:ty),+) => {$(
        impl FromConfig for $ty {
            fn from_config(
                value: &ConfigValue,
                _reg: &SerializerRegistry,
            ) -> Result<Self, ConfigError> {
                let whole = match value {
                    ConfigValue::Integer(n) => *n,
                    // Same truncation a float-backed number read performs in
                    // the wire formats this tree round-trips through.
                    ConfigValue::Float(n) => *n as i64,
                    other => return Err(ConfigError::mismatch(type_name::<$ty>(), other.kind())),
                };
                <$ty>::try_from(whole).map_err(|_| {
                    ConfigError::mismatch(type_name::<$ty>(), format!("out-of-range integer {whole}"))
                })
            }
        }

        impl ToConfig for $ty {
            fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
                ConfigValue::Integer(*self as i64)
            }
        }
    )+};
}

int_config!(i8, i16, i32, i64, u8, u16, u32);

impl FromConfig for u64 {
    fn from_config(value: &ConfigValue, _reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        let whole = match value {
            ConfigValue::Integer(n) => *n,
            ConfigValue::Float(n) => *n as i64,
            other => return Err(ConfigError::mismatch("u64", other.kind())),
        };
        u64::try_from(whole)
            .map_err(|_| ConfigError::mismatch("u64", format!("out-of-range integer {whole}")))
    }
}

impl ToConfig for u64 {
    fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
        // Values beyond i64 keep their magnitude as a float node instead of
        // wrapping silently.
        match i64::try_from(*self) {
            Ok(n) => ConfigValue::Integer(n),
            Err(_) => ConfigValue::Float(*self as f64),
        }
    }
}

macro_rules! float_config {
    ($($ty:ty),+) => {$(
        impl FromConfig for $ty {
            fn from_config(
                value: &ConfigValue,
                _reg: &SerializerRegistry,
            ) -> Result<Self, ConfigError> {
                match value {
                    ConfigValue::Float(n) => Ok(*n as $ty),
                    ConfigValue::Integer(n) => Ok(*n as $ty),
                    other => Err(ConfigError::mismatch(type_name::<$ty>(), other.kind())),
                }
            }
        }

        impl ToConfig for $ty {
            fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
                ConfigValue::Float(*self as f64)
            }
        }
    )+};
}

float_config!(f32, f64);

impl FromConfig for String {
    fn from_config(value: &ConfigValue, _reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(s) => Ok(s.clone()),
            other => Err(ConfigError::mismatch("string", other.kind())),
        }
    }
}

impl ToConfig for String {
    fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
        ConfigValue::String(self.clone())
    }
}

impl ToConfig for str {
    fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
        ConfigValue::String(self.to_string())
    }
}

impl<T: ToConfig + ?Sized> ToConfig for &T {
    fn to_config(&self, reg: &SerializerRegistry) -> ConfigValue {
        (**self).to_config(reg)
    }
}

impl FromConfig for ConfigValue {
    fn from_config(value: &ConfigValue, _reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        Ok(value.clone())
    }
}

impl ToConfig for ConfigValue {
    fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
        self.clone()
    }
}

impl FromConfig for Section {
    fn from_config(value: &ConfigValue, _reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Section(sec) => Ok(sec.clone()),
            other => Err(ConfigError::mismatch("section", other.kind())),
        }
    }
}

impl ToConfig for Section {
    fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
        ConfigValue::Section(self.clone())
    }
}

impl<T: FromConfig> FromConfig for Vec<T> {
    fn from_config(value: &ConfigValue, reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        let items = value
            .as_list()
            .ok_or_else(|| ConfigError::mismatch("list", value.kind()))?;
        items
            .iter()
            .map(|item| T::from_config(item, reg))
            .collect()
    }

    fn accepts(value: &ConfigValue, reg: &SerializerRegistry) -> bool {
        value
            .as_list()
            .is_some_and(|items| items.iter().all(|item| T::accepts(item, reg)))
    }
}

impl<T: ToConfig> ToConfig for Vec<T> {
    fn to_config(&self, reg: &SerializerRegistry) -> ConfigValue {
        ConfigValue::List(self.iter().map(|item| item.to_config(reg)).collect())
    }
}

impl<T: FromConfig> FromConfig for IndexMap<String, T> {
    fn from_config(value: &ConfigValue, reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        let section = value
            .as_section()
            .ok_or_else(|| ConfigError::mismatch("section", value.kind()))?;
        section
            .entries()
            .map(|(key, node)| Ok((key.to_string(), T::from_config(node, reg)?)))
            .collect()
    }

    fn accepts(value: &ConfigValue, reg: &SerializerRegistry) -> bool {
        value
            .as_section()
            .is_some_and(|sec| sec.values().all(|node| T::accepts(node, reg)))
    }
}

impl<T: ToConfig> ToConfig for IndexMap<String, T> {
    fn to_config(&self, reg: &SerializerRegistry) -> ConfigValue {
        let mut out = Section::new();
        for (key, value) in self {
            out.set(key.clone(), value.to_config(reg));
        }
        ConfigValue::Section(out)
    }
}

/// The natural [`ValueCodec`] of a type: its `FromConfig`/`ToConfig` impls.
///
/// Primitive fields convert directly; registry-backed types route through the
/// registry their impls delegate to.
pub struct NaturalCodec<T>(PhantomData<fn(T) -> T>);

impl<T> NaturalCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for NaturalCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromConfig + ToConfig> ValueCodec<T> for NaturalCodec<T> {
    fn encode(&self, reg: &SerializerRegistry, value: &T) -> ConfigValue {
        value.to_config(reg)
    }

    fn decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> Result<T, ConfigError> {
        T::from_config(node, reg)
    }

    fn can_decode(&self, reg: &SerializerRegistry, node: &ConfigValue) -> bool {
        T::accepts(node, reg)
    }
}
