//! Range/set predicates over ordered values with a compact textual grammar.
//!
//! A [`Range`] is one of five closed variants (all, exact, roster,
//! comparison, interval), each encodable as a single string token via
//! [`RangeCodec`], an inline codec pluggable into the `cfgmodel-core`
//! registry.

mod codec;
mod range;

pub use codec::{FloatRangeCodec, IntRangeCodec, RangeCodec};
pub use range::Range;
