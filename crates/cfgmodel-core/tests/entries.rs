//! Entry combinators: required and optional fields, composite decode
//! fail-fast behavior, list and map codecs, and the either-form codec.

use indexmap::IndexMap;

use cfgmodel_core::serializer::{
    field, inline_codec, inline_entry, list_of, map_of, object_codec, EitherCodec, NaturalCodec,
    SerializerRegistry, StructuredCodec, ValueCodec,
};
use cfgmodel_core::{ConfigError, ConfigValue, Section};

#[derive(Debug, Clone, PartialEq)]
struct Settings {
    threshold: i64,
    retries: i64,
}

impl Settings {
    fn new(threshold: i64, retries: i64) -> Self {
        Self { threshold, retries }
    }
}

fn settings_codec() -> impl StructuredCodec<Settings> + Send + Sync {
    object_codec(
        (
            field("threshold", |s: &Settings| s.threshold),
            field("retries", |s: &Settings| s.retries).or_default(5),
        ),
        Settings::new,
    )
}

#[test]
fn decode_matrix_for_required_and_optional_fields() {
    let reg = SerializerRegistry::new();
    let codec = settings_codec();

    let empty = Section::new();
    assert!(matches!(
        codec.decode(&reg, &empty),
        Err(ConfigError::MissingKey(key)) if key == "threshold"
    ));
    assert!(!codec.can_decode(&reg, &empty));

    let required_only = Section::new().with("threshold", 3);
    assert_eq!(
        codec.decode(&reg, &required_only).expect("defaulted"),
        Settings::new(3, 5)
    );
    assert!(codec.can_decode(&reg, &required_only));

    let both = Section::new().with("threshold", 3).with("retries", 9);
    assert_eq!(
        codec.decode(&reg, &both).expect("explicit"),
        Settings::new(3, 9)
    );
}

#[test]
fn optional_field_absorbs_an_undecodable_value() {
    let reg = SerializerRegistry::new();
    let codec = settings_codec();

    let bad_optional = Section::new()
        .with("threshold", 3)
        .with("retries", "not a number");
    assert_eq!(
        codec.decode(&reg, &bad_optional).expect("fallback"),
        Settings::new(3, 5)
    );

    let bad_required = Section::new().with("threshold", "not a number");
    assert!(matches!(
        codec.decode(&reg, &bad_required),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn encode_writes_keys_in_declaration_order() {
    let reg = SerializerRegistry::new();
    let section = settings_codec().encode(&reg, &Settings::new(1, 2));
    assert_eq!(section.keys().collect::<Vec<_>>(), ["threshold", "retries"]);
    assert_eq!(section.get_int("retries").expect("retries"), 2);
}

#[test]
fn inline_entry_reads_and_writes_string_nodes() {
    #[derive(Debug, Clone, PartialEq)]
    struct Wrapper {
        level: u8,
    }

    let reg = SerializerRegistry::new();
    let codec = object_codec(
        (inline_entry(
            inline_codec(
                |level: &u8| format!("L{level}"),
                |token| {
                    token
                        .strip_prefix('L')
                        .and_then(|n| n.parse().ok())
                        .ok_or_else(|| ConfigError::malformed(token, "expected L<digit>"))
                },
            ),
            "level",
            |w: &Wrapper| w.level,
        ),),
        |level| Wrapper { level },
    );

    let section = codec.encode(&reg, &Wrapper { level: 3 });
    assert_eq!(section.get_str("level").expect("level"), "L3");
    assert_eq!(
        codec.decode(&reg, &section).expect("decode"),
        Wrapper { level: 3 }
    );
}

#[test]
fn list_codec_fails_fast_on_a_bad_element() {
    let reg = SerializerRegistry::new();
    let codec = list_of(NaturalCodec::<i64>::new());

    let good = ConfigValue::List(vec![ConfigValue::Integer(1), ConfigValue::Integer(2)]);
    assert_eq!(codec.decode(&reg, &good).expect("decode"), [1, 2]);
    assert!(codec.can_decode(&reg, &good));

    let bad = ConfigValue::List(vec![
        ConfigValue::Integer(1),
        ConfigValue::String("two".to_string()),
    ]);
    assert!(codec.decode(&reg, &bad).is_err());
    assert!(!codec.can_decode(&reg, &bad));
}

#[test]
fn map_codec_preserves_key_order() {
    let reg = SerializerRegistry::new();
    let codec = map_of(NaturalCodec::<i64>::new());

    let mut map = IndexMap::new();
    map.insert("zebra".to_string(), 1i64);
    map.insert("apple".to_string(), 2i64);

    let node = codec.encode(&reg, &map);
    let section = node.as_section().expect("section node");
    assert_eq!(section.keys().collect::<Vec<_>>(), ["zebra", "apple"]);

    let decoded = codec.decode(&reg, &node).expect("decode");
    assert_eq!(decoded, map);
}

#[test]
fn either_codec_prefers_the_compact_form_on_encode() {
    let reg = SerializerRegistry::new();
    let codec = EitherCodec::new(
        inline_codec(
            |s: &Settings| format!("{}/{}", s.threshold, s.retries),
            |token| {
                let (threshold, retries) = token
                    .split_once('/')
                    .ok_or_else(|| ConfigError::malformed(token, "expected threshold/retries"))?;
                Ok(Settings::new(
                    threshold
                        .parse()
                        .map_err(|_| ConfigError::malformed(token, "expected numbers"))?,
                    retries
                        .parse()
                        .map_err(|_| ConfigError::malformed(token, "expected numbers"))?,
                ))
            },
        ),
        settings_codec(),
    );

    let node = codec.encode(&reg, &Settings::new(3, 9));
    assert_eq!(node, ConfigValue::String("3/9".to_string()));

    // Both shapes decode to the same value.
    assert_eq!(
        codec.decode(&reg, &node).expect("inline"),
        Settings::new(3, 9)
    );
    let structured = ConfigValue::Section(Section::new().with("threshold", 3).with("retries", 9));
    assert_eq!(
        codec.decode(&reg, &structured).expect("structured"),
        Settings::new(3, 9)
    );
    assert!(codec.decode(&reg, &ConfigValue::Integer(3)).is_err());
}
