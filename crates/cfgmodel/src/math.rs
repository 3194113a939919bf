//! Example serializable payloads: small vector and color types.
//!
//! Every type here carries a compact inline form (`"x,y,z"` for vectors,
//! `#rrggbb` for colors). `Vec3d` additionally has a structured `{x, y, z}`
//! codec, making it the canonical both-forms type: output prefers the compact
//! token while input accepts either shape.

use std::fmt;
use std::str::FromStr;

use cfgmodel_core::serializer::{
    field, inline_codec, object_codec, EitherCodec, FromConfig, InlineCodec, SerializerRegistry,
    StructuredCodec, ToConfig, ValueCodec,
};
use cfgmodel_core::{ConfigError, ConfigValue};

fn parse_parts<T: FromStr, const N: usize>(token: &str) -> Option<[T; N]> {
    let mut out = Vec::with_capacity(N);
    for part in token.split(',') {
        out.push(part.parse().ok()?);
    }
    <[T; N]>::try_from(out).ok()
}

macro_rules! registry_backed {
    ($($ty:ty),+) => {$(
        impl FromConfig for $ty {
            fn from_config(
                value: &ConfigValue,
                reg: &SerializerRegistry,
            ) -> Result<Self, ConfigError> {
                reg.deserialize(value)
            }

            fn accepts(value: &ConfigValue, reg: &SerializerRegistry) -> bool {
                reg.accepts::<$ty>(value)
            }
        }

        impl ToConfig for $ty {
            fn to_config(&self, reg: &SerializerRegistry) -> ConfigValue {
                reg.serialize_or_literal(self)
            }
        }
    )+};
}

registry_backed!(Vec3d, Vec3i, Vec2d, Vec2i, Color);

/// A three-dimensional vector of doubles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(&self, other: &Vec3d) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(&self, other: &Vec3d) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Truncates each component toward zero.
    pub fn truncate(&self) -> Vec3i {
        Vec3i::new(self.x as i64, self.y as i64, self.z as i64)
    }

    /// Compact `"x,y,z"` codec.
    pub fn codec() -> impl InlineCodec<Vec3d> + Send + Sync {
        inline_codec(|v: &Vec3d| v.to_string(), |token| token.parse())
    }

    /// Verbose `{x: .., y: .., z: ..}` codec.
    pub fn structured() -> impl StructuredCodec<Vec3d> + Send + Sync {
        object_codec(
            (
                field("x", |v: &Vec3d| v.x),
                field("y", |v: &Vec3d| v.y),
                field("z", |v: &Vec3d| v.z),
            ),
            Vec3d::new,
        )
    }

    /// Both-forms node codec for entry fields: compact token out, either
    /// shape in.
    pub fn value_codec() -> impl ValueCodec<Vec3d> + Send + Sync {
        EitherCodec::new(Vec3d::codec(), Vec3d::structured())
    }
}

impl fmt::Display for Vec3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for Vec3d {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let [x, y, z] = parse_parts(token)
            .ok_or_else(|| ConfigError::malformed(token, "expected three comma-separated numbers"))?;
        Ok(Vec3d::new(x, y, z))
    }
}

/// A three-dimensional vector of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec3i {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Vec3i {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn codec() -> impl InlineCodec<Vec3i> + Send + Sync {
        inline_codec(|v: &Vec3i| v.to_string(), |token| token.parse())
    }
}

impl fmt::Display for Vec3i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for Vec3i {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let [x, y, z] = parse_parts(token)
            .ok_or_else(|| ConfigError::malformed(token, "expected three comma-separated integers"))?;
        Ok(Vec3i::new(x, y, z))
    }
}

/// A two-dimensional vector of doubles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Vec2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn codec() -> impl InlineCodec<Vec2d> + Send + Sync {
        inline_codec(|v: &Vec2d| v.to_string(), |token| token.parse())
    }
}

impl fmt::Display for Vec2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Vec2d {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let [x, y] = parse_parts(token)
            .ok_or_else(|| ConfigError::malformed(token, "expected two comma-separated numbers"))?;
        Ok(Vec2d::new(x, y))
    }
}

/// A two-dimensional vector of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2i {
    pub x: i64,
    pub y: i64,
}

impl Vec2i {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn codec() -> impl InlineCodec<Vec2i> + Send + Sync {
        inline_codec(|v: &Vec2i| v.to_string(), |token| token.parse())
    }
}

impl fmt::Display for Vec2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Vec2i {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let [x, y] = parse_parts(token)
            .ok_or_else(|| ConfigError::malformed(token, "expected two comma-separated integers"))?;
        Ok(Vec2i::new(x, y))
    }
}

/// An RGB color, encoded as a `#rrggbb` hex token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Unpacks a `0xRRGGBB` value.
    pub fn from_rgb(rgb: u32) -> Self {
        Self {
            red: (rgb >> 16) as u8,
            green: (rgb >> 8) as u8,
            blue: rgb as u8,
        }
    }

    pub fn to_rgb(&self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    pub fn codec() -> impl InlineCodec<Color> + Send + Sync {
        inline_codec(|c: &Color| c.to_hex(), |token| token.parse())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let hex = token.strip_prefix('#').unwrap_or(token);
        if hex.len() != 6 {
            return Err(ConfigError::malformed(token, "expected six hex digits"));
        }
        let rgb = u32::from_str_radix(hex, 16)
            .map_err(|_| ConfigError::malformed(token, "expected six hex digits"))?;
        Ok(Color::from_rgb(rgb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_token_roundtrip() {
        let v = Vec3d::new(1.5, -2.0, 0.25);
        let parsed: Vec3d = v.to_string().parse().expect("parse");
        assert_eq!(parsed, v);
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::new(0x12, 0xab, 0xff);
        assert_eq!(c.to_hex(), "#12abff");
        assert_eq!("#12abff".parse::<Color>().expect("parse"), c);
        assert_eq!("12ABFF".parse::<Color>().expect("plain hex"), c);
    }
}
