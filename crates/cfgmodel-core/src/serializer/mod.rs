//! Codec contracts, the type-indexed registry, and the entry combinators.

mod entry;
mod primitives;
mod registry;
mod traits;

pub use entry::{
    field, inline_entry, list_of, map_of, map_of_keyed, object_codec, structured_entry, Entry,
    ListCodec, MapCodec, ObjectCodec,
};
pub use primitives::{FromConfig, NaturalCodec, ToConfig};
pub use registry::{Direction, InlineRef, SerializerRegistry, StructuredRef};
pub use traits::{
    inline_codec, structured_codec, EitherCodec, InlineCodec, InlineValue, RawStringCodec,
    StructuredCodec, StructuredValue, ValueCodec,
};
