//! Namespaced identifiers (`namespace:path`).

use std::fmt;

use cfgmodel_core::serializer::{
    inline_codec, FromConfig, InlineCodec, SerializerRegistry, ToConfig,
};
use cfgmodel_core::{ConfigError, ConfigValue};

/// An identifier consisting of a namespace and a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parses `namespace:path`; the namespace is required here.
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        match token.split_once(':') {
            Some((namespace, path)) => Self::from_parts(token, namespace, path),
            None => Err(ConfigError::malformed(token, "expected namespace:path")),
        }
    }

    /// Parses `namespace:path`, applying the default namespace to bare paths.
    pub fn parse_or_default(token: &str, default_namespace: &str) -> Result<Self, ConfigError> {
        match token.split_once(':') {
            Some((namespace, path)) => Self::from_parts(token, namespace, path),
            None if token.is_empty() => Err(ConfigError::malformed(token, "empty identifier")),
            None => Ok(Self::new(default_namespace, token)),
        }
    }

    fn from_parts(token: &str, namespace: &str, path: &str) -> Result<Self, ConfigError> {
        if namespace.is_empty() || path.is_empty() || path.contains(':') {
            return Err(ConfigError::malformed(token, "expected namespace:path"));
        }
        Ok(Self::new(namespace, path))
    }

    /// Inline codec accepting bare paths under the given default namespace.
    pub fn codec(
        default_namespace: impl Into<String>,
    ) -> impl InlineCodec<Identifier> + Send + Sync + 'static {
        let default_namespace = default_namespace.into();
        inline_codec(
            |id: &Identifier| id.to_string(),
            move |token| Identifier::parse_or_default(token, &default_namespace),
        )
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromConfig for Identifier {
    fn from_config(value: &ConfigValue, reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        reg.deserialize(value)
    }

    fn accepts(value: &ConfigValue, reg: &SerializerRegistry) -> bool {
        reg.accepts::<Identifier>(value)
    }
}

impl ToConfig for Identifier {
    fn to_config(&self, reg: &SerializerRegistry) -> ConfigValue {
        reg.serialize_or_literal(self)
    }
}
