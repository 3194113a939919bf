//! JSON provider: order and kind preservation across a load/save cycle.

use cfgmodel_core::{ConfigValue, Section};
use cfgmodel_json::{JsonError, JsonProvider};

#[test]
fn load_preserves_key_order_and_scalar_kinds() {
    let text = r#"{"zebra": 1, "apple": 2.5, "flag": true, "label": "three"}"#;
    let sec = JsonProvider::load_str(text).expect("load");

    assert_eq!(
        sec.keys().collect::<Vec<_>>(),
        ["zebra", "apple", "flag", "label"]
    );
    assert_eq!(sec.get("zebra"), Some(&ConfigValue::Integer(1)));
    assert_eq!(sec.get("apple"), Some(&ConfigValue::Float(2.5)));
    assert_eq!(sec.get("flag"), Some(&ConfigValue::Bool(true)));
    assert_eq!(
        sec.get("label"),
        Some(&ConfigValue::String("three".to_string()))
    );
}

#[test]
fn save_then_load_is_identity_for_nested_documents() {
    let mut server = Section::new().with("host", "localhost").with("port", 8080);
    server.set(
        "fallbacks",
        ConfigValue::List(vec![ConfigValue::Integer(8081), ConfigValue::Integer(8082)]),
    );
    let doc = Section::new()
        .with("server", server)
        .with("debug", false)
        .with("ratio", 0.5);

    let text = JsonProvider::save_string(&doc);
    let reloaded = JsonProvider::load_str(&text).expect("reload");
    assert_eq!(reloaded, doc);
    assert_eq!(reloaded.keys().collect::<Vec<_>>(), ["server", "debug", "ratio"]);
}

#[test]
fn null_object_members_vanish_on_load() {
    let text = r#"{"keep": 1, "drop": null, "tail": 2}"#;
    let sec = JsonProvider::load_str(text).expect("load");
    assert_eq!(sec.keys().collect::<Vec<_>>(), ["keep", "tail"]);
    assert!(!sec.has("drop"));
}

#[test]
fn nulls_inside_arrays_are_kept() {
    let text = r#"{"items": [1, null, 3]}"#;
    let sec = JsonProvider::load_str(text).expect("load");
    assert_eq!(
        sec.get_list("items").expect("items"),
        [
            ConfigValue::Integer(1),
            ConfigValue::Null,
            ConfigValue::Integer(3),
        ]
    );
}

#[test]
fn top_level_non_object_is_rejected() {
    assert!(matches!(
        JsonProvider::load_str("[1, 2, 3]"),
        Err(JsonError::NotAnObject("array"))
    ));
    assert!(matches!(
        JsonProvider::load_str("not json"),
        Err(JsonError::Parse(_))
    ));
}

#[test]
fn pretty_output_reloads_to_the_same_document() {
    let doc = Section::new()
        .with("name", "demo")
        .with("nested", Section::new().with("value", 1));
    let pretty = JsonProvider::save_string_pretty(&doc);
    assert!(pretty.contains('\n'));
    assert_eq!(JsonProvider::load_str(&pretty).expect("reload"), doc);
}

#[test]
fn bytes_roundtrip_matches_string_roundtrip() {
    let doc = Section::new().with("value", 7);
    let bytes = JsonProvider::save_bytes(&doc);
    assert_eq!(JsonProvider::load_bytes(&bytes).expect("reload"), doc);
}
