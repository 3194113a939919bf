//! Textual grammar for [`Range`] tokens.
//!
//! ```text
//! all        := "all"
//! exact      := NUMBER
//! roster     := "{" NUMBER ("," NUMBER)* "}"
//! comparison := ("<" | ">") ["="] NUMBER
//! interval   := ("(" | "[") NUMBER "," NUMBER (")" | "]")
//! ```
//!
//! Decoding tries the variants in a fixed order (exact, all, roster,
//! comparison, interval) and returns the first that parses. The order
//! matters: a bare numeric token is always `Exact`, never a degenerate form
//! of another variant. Encoding emits the canonical form of the stored
//! variant and never re-derives a shorter equivalent.

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use cfgmodel_core::serializer::{FromConfig, InlineCodec, SerializerRegistry, ToConfig};
use cfgmodel_core::{ConfigError, ConfigValue};

use crate::Range;

/// Inline codec for [`Range`] over a parseable numeric bound.
pub struct RangeCodec<T>(PhantomData<fn(T) -> T>);

/// Range codec over `i64` bounds.
pub type IntRangeCodec = RangeCodec<i64>;

/// Range codec over `f64` bounds.
pub type FloatRangeCodec = RangeCodec<f64>;

impl<T> RangeCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RangeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InlineCodec<Range<T>> for RangeCodec<T>
where
    T: PartialOrd + Copy + Display + FromStr + 'static,
{
    fn encode(&self, value: &Range<T>) -> String {
        match value {
            Range::All => "all".to_string(),
            Range::Exact(v) => v.to_string(),
            Range::Roster(values) => {
                let body = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{{{body}}}")
            }
            Range::Comparison {
                value,
                greater,
                inclusive,
            } => {
                let op = if *greater { '>' } else { '<' };
                let eq = if *inclusive { "=" } else { "" };
                format!("{op}{eq}{value}")
            }
            Range::Interval {
                lower,
                upper,
                lower_open,
                upper_open,
            } => {
                let open = if *lower_open { '(' } else { '[' };
                let close = if *upper_open { ')' } else { ']' };
                format!("{open}{lower},{upper}{close}")
            }
        }
    }

    fn decode(&self, token: &str) -> Result<Range<T>, ConfigError> {
        if let Ok(value) = token.parse::<T>() {
            return Ok(Range::Exact(value));
        }
        if token == "all" {
            return Ok(Range::All);
        }
        if let Some(roster) = parse_roster(token) {
            return Ok(roster);
        }
        if let Some(comparison) = parse_comparison(token) {
            return Ok(comparison);
        }
        if let Some(interval) = parse_interval(token) {
            return Ok(interval);
        }
        Err(ConfigError::malformed(
            token,
            "not a number, \"all\", roster, comparison, or interval",
        ))
    }
}

/// Ranges read and write their own grammar directly; no registry lookup is
/// involved, so a range-typed field works against any registry.
impl<T> FromConfig for Range<T>
where
    T: PartialOrd + Copy + Display + FromStr + 'static,
{
    fn from_config(value: &ConfigValue, _reg: &SerializerRegistry) -> Result<Self, ConfigError> {
        match value.as_str() {
            Some(token) => RangeCodec::new().decode(token),
            None => Err(ConfigError::mismatch("range token", value.kind())),
        }
    }
}

impl<T> Display for Range<T>
where
    T: PartialOrd + Copy + Display + FromStr + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&RangeCodec::new().encode(self))
    }
}

impl<T> ToConfig for Range<T>
where
    T: PartialOrd + Copy + Display + FromStr + 'static,
{
    fn to_config(&self, _reg: &SerializerRegistry) -> ConfigValue {
        ConfigValue::String(RangeCodec::new().encode(self))
    }
}

fn parse_roster<T: FromStr + PartialOrd + Copy>(token: &str) -> Option<Range<T>> {
    let body = token.strip_prefix('{')?.strip_suffix('}')?;
    if body.is_empty() {
        return None;
    }
    let values = body
        .split(',')
        .map(str::parse)
        .collect::<Result<Vec<T>, _>>()
        .ok()?;
    Some(Range::Roster(values))
}

fn parse_comparison<T: FromStr + PartialOrd + Copy>(token: &str) -> Option<Range<T>> {
    let (greater, rest) = match token.strip_prefix('>') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('<')?),
    };
    let (inclusive, number) = match rest.strip_prefix('=') {
        Some(number) => (true, number),
        None => (false, rest),
    };
    let value = number.parse().ok()?;
    Some(Range::Comparison {
        value,
        greater,
        inclusive,
    })
}

fn parse_interval<T: FromStr + PartialOrd + Copy>(token: &str) -> Option<Range<T>> {
    let (lower_open, rest) = match token.strip_prefix('(') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('[')?),
    };
    // Bracket pairs must match; `(0,2}` is a parse failure, not a variant.
    let (upper_open, body) = match rest.strip_suffix(')') {
        Some(body) => (true, body),
        None => (false, rest.strip_suffix(']')?),
    };
    let (lower, upper) = body.split_once(',')?;
    if upper.contains(',') {
        return None;
    }
    Some(Range::Interval {
        lower: lower.parse().ok()?,
        upper: upper.parse().ok()?,
        lower_open,
        upper_open,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(token: &str) -> Result<Range<i64>, ConfigError> {
        IntRangeCodec::new().decode(token)
    }

    #[test]
    fn bare_number_is_exact_not_any_other_form() {
        assert_eq!(decode("7").expect("exact"), Range::Exact(7));
    }

    #[test]
    fn mismatched_interval_bracket_is_malformed() {
        let err = decode("(0,2}").expect_err("mismatched brackets");
        assert!(matches!(err, ConfigError::MalformedToken { .. }));
    }
}
