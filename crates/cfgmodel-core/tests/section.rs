//! Document-level behavior of `Section`: ordering, filling, typed reads, and
//! registry-backed writes.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use cfgmodel_core::serializer::{inline_codec, SerializerRegistry};
use cfgmodel_core::{ConfigError, ConfigValue, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Port(u16);

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port {}", self.0)
    }
}

fn port_registry() -> Arc<SerializerRegistry> {
    let mut reg = SerializerRegistry::new();
    reg.register_inline::<Port>(inline_codec(
        |p: &Port| format!(":{}", p.0),
        |token| {
            token
                .strip_prefix(':')
                .and_then(|n| n.parse().ok())
                .map(Port)
                .ok_or_else(|| ConfigError::malformed(token, "expected :port"))
        },
    ))
    .expect("register port codec");
    Arc::new(reg)
}

#[test]
fn keys_iterate_in_insertion_order() {
    let sec = Section::new()
        .with("zebra", 1)
        .with("apple", 2)
        .with("mango", 3);
    assert_eq!(sec.keys().collect::<Vec<_>>(), ["zebra", "apple", "mango"]);
}

#[test]
fn fill_adds_only_missing_keys() {
    let mut target = Section::new().with("host", "localhost").with("port", 80);
    let defaults = Section::new()
        .with("port", 8080)
        .with("timeout", 30)
        .with("retries", 3);

    target.fill(&defaults);

    assert_eq!(target.get_int("port").expect("port"), 80);
    assert_eq!(target.get_int("timeout").expect("timeout"), 30);
    assert_eq!(
        target.keys().collect::<Vec<_>>(),
        ["host", "port", "timeout", "retries"]
    );
}

#[test]
fn fill_overwrite_replaces_in_place() {
    let mut target = Section::new().with("host", "localhost").with("port", 80);
    let incoming = Section::new().with("port", 8080);

    target.fill_overwrite(&incoming);

    assert_eq!(target.get_int("port").expect("port"), 8080);
    assert_eq!(target.keys().collect::<Vec<_>>(), ["host", "port"]);
}

#[test]
fn get_or_swallows_missing_and_mismatched() {
    let sec = Section::new().with("label", "not a number");
    assert_eq!(sec.get_or("label", 7i64), 7);
    assert_eq!(sec.get_or("absent", 7i64), 7);
    assert_eq!(sec.get_or("label", String::new()), "not a number");
}

#[test]
fn typed_getters_distinguish_missing_from_mismatch() {
    let sec = Section::new().with("count", 3);
    assert!(matches!(
        sec.get_str("absent"),
        Err(ConfigError::MissingKey(_))
    ));
    assert!(matches!(
        sec.get_str("count"),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert_eq!(sec.get_int("count").expect("count"), 3);
    assert_eq!(sec.get_float("count").expect("promoted"), 3.0);
}

#[test]
fn clone_is_a_deep_copy() {
    let mut original = Section::new();
    original.get_or_create_section("nested").set("value", 1);

    let mut copy = original.clone();
    copy.get_or_create_section("nested").set("value", 99);

    let nested = original.get_section("nested").expect("nested");
    assert_eq!(nested.get_int("value").expect("value"), 1);
}

#[test]
fn get_list_filtered_skips_unconvertible_elements() {
    let sec = Section::new().with(
        "mixed",
        ConfigValue::List(vec![
            ConfigValue::Integer(1),
            ConfigValue::String("two".to_string()),
            ConfigValue::Integer(3),
        ]),
    );
    assert_eq!(sec.get_list_filtered::<i64>("mixed"), [1, 3]);
    assert!(sec.get_list_filtered::<i64>("absent").is_empty());
    assert!(sec.get_list_as::<i64>("mixed").is_err());
}

#[test]
fn has_as_probes_without_failing() {
    let sec = Section::new().with("flag", "true").with("label", "plain");
    assert!(sec.has_as::<bool>("flag"));
    assert!(!sec.has_as::<bool>("label"));
    assert!(!sec.has_as::<bool>("absent"));
}

#[test]
fn get_or_create_section_shares_the_registry() {
    let reg = port_registry();
    let mut sec = Section::with_registry(reg.clone());
    let nested = sec.get_or_create_section("server");
    assert!(Arc::ptr_eq(nested.registry(), &reg));

    // A second call returns the same section rather than replacing it.
    sec.get_or_create_section("server").set("port", 80);
    assert_eq!(
        sec.get_section("server")
            .expect("server")
            .get_int("port")
            .expect("port"),
        80
    );
}

#[test]
fn set_serialized_uses_the_registered_codec() {
    let mut sec = Section::with_registry(port_registry());
    sec.set_serialized("listen", &Port(8080));
    assert_eq!(sec.get_str("listen").expect("listen"), ":8080");
    assert_eq!(sec.get_as::<String>("listen").expect("string"), ":8080");
}

#[test]
fn set_serialized_without_codec_degrades_to_display_literal() {
    let mut sec = Section::new();
    sec.set_serialized("listen", &Port(8080));
    assert_eq!(sec.get_str("listen").expect("listen"), "port 8080");
}

#[test]
fn set_serialized_list_encodes_each_element() {
    let mut sec = Section::with_registry(port_registry());
    sec.set_serialized_list("ports", &[Port(80), Port(443)]);
    let items = sec.get_list("ports").expect("ports");
    assert_eq!(
        items,
        [
            ConfigValue::String(":80".to_string()),
            ConfigValue::String(":443".to_string()),
        ]
    );
}

#[test]
fn set_serialized_map_encodes_keys_inline() {
    let mut sec = Section::with_registry(port_registry());
    let mut map = IndexMap::new();
    map.insert(Port(80), Port(8080));
    map.insert(Port(443), Port(8443));
    sec.set_serialized_map("forward", &map);

    let nested = sec.get_section("forward").expect("forward");
    assert_eq!(nested.keys().collect::<Vec<_>>(), [":80", ":443"]);
    assert_eq!(nested.get_str(":443").expect("value"), ":8443");
}
