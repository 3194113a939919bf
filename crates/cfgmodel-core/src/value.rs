//! [`ConfigValue`]: the tagged node type every codec reads from or writes into.

use crate::Section;

/// One node of the configuration document tree.
///
/// Integers and floats are stored separately so the original scalar kind is
/// observable on read; lists and sections preserve their element/key order.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Section(Section),
}

impl ConfigValue {
    /// Short name of the node's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Section(_) => "section",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, ConfigValue::Integer(_) | ConfigValue::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ConfigValue::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ConfigValue::List(_))
    }

    pub fn is_section(&self) -> bool {
        matches!(self, ConfigValue::Section(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer(n) => Some(*n as f64),
            ConfigValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            ConfigValue::Section(sec) => Some(sec),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

macro_rules! from_int {
    ($($ty:ty),+) => {
        $(impl From<$ty> for ConfigValue {
            fn from(value: $ty) -> Self {
                ConfigValue::Integer(value as i64)
            }
        })+
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        ConfigValue::Float(value as f64)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<Section> for ConfigValue {
    fn from(value: Section) -> Self {
        ConfigValue::Section(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        ConfigValue::List(value.into_iter().map(Into::into).collect())
    }
}

/// `None` maps to [`ConfigValue::Null`], which removes a key on `set`.
impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ConfigValue::Null,
        }
    }
}
