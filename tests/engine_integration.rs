mod common;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use common::{person_config, setup_logger, Person};
use json_lib_rs::convert::{
    from_object, to_bean, to_json, to_value, ArrayMode, CycleStrategy, JsonConfig,
    JsonEventListener, Value,
};
use json_lib_rs::convert::naming::CamelCaseTransformer;
use json_lib_rs::convert::processors::{JsonValueProcessor, ProcessorKey};
use json_lib_rs::error::JsonError;
use json_lib_rs::node::JsonNode;
use json_lib_rs::parser::parse;

#[test]
fn parse_serialize_round_trip_is_stable() -> Result<()> {
    setup_logger();
    let text = r#"{"name": "Ada", "scores": [1, 2.5, null], "active": true}"#;
    let first = parse(text)?;
    let value = to_value(&first, &JsonConfig::new())?;
    let second = to_json(&value, &JsonConfig::new())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn rendered_text_parses_back_to_the_same_tree() -> Result<()> {
    let node = parse(r#"{a: 1, b: [true, 'x'], c: {d: null}}"#)?;
    for indent in [0, 2, 4] {
        assert_eq!(parse(&node.to_text(indent))?, node);
    }
    Ok(())
}

#[test]
fn duplicate_keys_accumulate_in_text_and_in_maps() -> Result<()> {
    let parsed = parse(r#"{"a": 1, "a": 2}"#)?;
    let from_text = parsed
        .as_object()
        .and_then(|o| o.get("a"))
        .and_then(JsonNode::as_array)
        .expect("accumulated array");
    assert_eq!(from_text.len(), 2);

    let map = Value::new_map();
    map.insert("a", Value::from(1))?;
    map.insert("a", Value::from(2))?;
    let serialized = to_json(&map, &JsonConfig::new())?;
    assert_eq!(parsed, serialized);
    Ok(())
}

#[test]
fn tolerant_parsing_accepts_javascript_flavored_input() -> Result<()> {
    let node = parse("{a: 1,}")?;
    assert_eq!(node.to_text(0), r#"{"a":1}"#);

    // Elided array elements read as null.
    let node = parse("[1,,3]")?;
    assert_eq!(node.to_text(0), "[1,null,3]");

    let node = parse("{'single': 'quotes'; other = 2}")?;
    assert_eq!(node.to_text(0), r#"{"single":"quotes","other":2}"#);
    Ok(())
}

#[test]
fn pretty_printing_boundary_cases() -> Result<()> {
    assert_eq!(parse("[]")?.to_text(2), "[]");
    assert_eq!(parse("{}")?.to_text(2), "{}");
    assert_eq!(parse("[1]")?.to_text(2), "[1]");
    assert_eq!(parse(r#"{"a": 1}"#)?.to_text(2), "{\"a\": 1}");
    assert_eq!(
        parse(r#"{"a": 1, "b": [1, 2]}"#)?.to_text(2),
        "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}"
    );
    Ok(())
}

#[test]
fn cycles_error_by_default_and_degrade_by_strategy() -> Result<()> {
    setup_logger();
    let map = Value::new_map();
    map.insert("self", map.clone())?;

    assert!(matches!(
        to_json(&map, &JsonConfig::new()),
        Err(JsonError::CycleDetected)
    ));

    let relaxed = JsonConfig::new().with_cycle_strategy(CycleStrategy::Null);
    let node = to_json(&map, &relaxed)?;
    assert_eq!(node.to_text(0), r#"{"self":null}"#);
    Ok(())
}

#[test]
fn nan_and_infinity_never_serialize() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            to_json(&Value::from(bad), &JsonConfig::new()),
            Err(JsonError::InvalidNumber(_))
        ));
    }
}

#[test]
fn bean_round_trip_through_the_node_tree() -> Result<()> {
    setup_logger();
    let person = Person {
        name: "Ada".to_owned(),
        age: 36,
        nickname: Some("countess".to_owned()),
        session_token: "abc".to_owned(),
    };
    let node = to_json(&Value::bean(person), &person_config())?;

    let restored = to_bean(&node, &person_config())?;
    let restored = restored.borrow();
    assert_eq!(restored.get("name"), Some(Value::from("Ada")));
    assert_eq!(restored.get("age"), Some(Value::Int(36)));
    assert_eq!(restored.get("nickname"), Some(Value::from("countess")));
    Ok(())
}

#[test]
fn transient_properties_honor_the_flag() -> Result<()> {
    let person = Person {
        name: "Ada".to_owned(),
        session_token: "secret".to_owned(),
        ..Person::default()
    };
    let node = to_json(&Value::bean(person), &person_config())?;
    assert!(node.as_object().unwrap().get("sessionToken").is_some());

    let person = Person {
        name: "Ada".to_owned(),
        session_token: "secret".to_owned(),
        ..Person::default()
    };
    let config = person_config().with_ignore_transient_fields(true);
    let node = to_json(&Value::bean(person), &config)?;
    assert!(node.as_object().unwrap().get("sessionToken").is_none());
    Ok(())
}

#[test]
fn exclusions_apply_across_and_per_class() -> Result<()> {
    let config = person_config().with_class_excluded("Person", "age");
    let node = to_json(&Value::bean(Person::default()), &config)?;
    let object = node.as_object().unwrap();
    assert!(object.get("name").is_some());
    assert!(object.get("age").is_none());
    Ok(())
}

#[test]
fn value_processors_rewrite_matching_sites() -> Result<()> {
    struct Redact;
    impl JsonValueProcessor for Redact {
        fn process(
            &self,
            _value: &Value,
            _key: Option<&str>,
            _config: &JsonConfig,
        ) -> Result<JsonNode, JsonError> {
            Ok(JsonNode::from("[redacted]"))
        }
    }

    let config = JsonConfig::new()
        .register_value_processor(ProcessorKey::for_any_type("password"), Redact);
    let map = Value::new_map();
    map.insert("user", Value::from("ada"))?;
    map.insert("password", Value::from("hunter2"))?;
    let node = to_json(&map, &config)?;
    let object = node.as_object().unwrap();
    assert_eq!(object.get("user"), Some(&JsonNode::from("ada")));
    assert_eq!(object.get("password"), Some(&JsonNode::from("[redacted]")));
    Ok(())
}

#[derive(Default)]
struct Recording {
    properties: Rc<RefCell<Vec<String>>>,
}

impl JsonEventListener for Recording {
    fn on_property_set(&self, key: &str) {
        self.properties.borrow_mut().push(key.to_owned());
    }
}

#[test]
fn listeners_observe_property_assignment() -> Result<()> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let config = JsonConfig::new().register_listener(Recording {
        properties: seen.clone(),
    });
    let map = Value::new_map();
    map.insert("a", Value::from(1))?;
    map.insert("b", Value::from(2))?;
    to_json(&map, &config)?;
    assert_eq!(*seen.borrow(), ["a", "b"]);
    Ok(())
}

#[test]
fn camel_case_transformer_shapes_deserialized_keys() -> Result<()> {
    let node = parse(r#"{"first name": "Ada", "last-name": "Lovelace"}"#)?;
    let config = JsonConfig::new().with_identifier_transformer(CamelCaseTransformer);
    let Value::Bean(bean) = to_value(&node, &config)? else {
        panic!("expected a bean");
    };
    let bean = bean.borrow();
    assert_eq!(bean.get("firstName"), Some(Value::from("Ada")));
    assert_eq!(bean.get("lastName"), Some(Value::from("Lovelace")));
    Ok(())
}

#[test]
fn set_mode_deduplicates_arrays() -> Result<()> {
    let node = parse("[1, 1, 2, 2, 3]")?;
    let config = JsonConfig::new().with_array_mode(ArrayMode::Set);
    let value = to_value(&node, &config)?;
    let back = to_json(&value, &JsonConfig::new())?;
    assert_eq!(back.to_text(0), "[1,2,3]");
    Ok(())
}

#[test]
fn composites_built_in_code_serialize_in_order() -> Result<()> {
    let array = Value::new_array();
    array.push(Value::from(1))?;
    array.push(Value::from("x"))?;
    let node = to_json(&array, &JsonConfig::new())?;
    assert_eq!(node.to_text(0), r#"[1,"x"]"#);

    let map = Value::map_from([("a", Value::from(1)), ("b", array)]);
    let node = to_json(&map, &JsonConfig::new())?;
    assert_eq!(node.to_text(0), r#"{"a":1,"b":[1,"x"]}"#);
    Ok(())
}

#[test]
fn from_object_treats_strings_as_documents() -> Result<()> {
    let node = from_object(&Value::from("{a: [1, 2],}"), &JsonConfig::new())?;
    assert_eq!(node.to_text(0), r#"{"a":[1,2]}"#);
    Ok(())
}

#[test]
fn function_literals_survive_parse_and_render() -> Result<()> {
    let node = parse(r#"{"handler": function(a, b){ return a + b; }}"#)?;
    let function = node
        .as_object()
        .and_then(|o| o.get("handler"))
        .and_then(JsonNode::as_function)
        .expect("function literal");
    assert_eq!(function.params(), ["a", "b"]);
    assert_eq!(parse(&node.to_text(0))?, node);
    Ok(())
}

#[test]
fn serde_json_interop_preserves_structure() -> Result<()> {
    let node = parse(r#"{"a": 1, "b": [true, "x"], "c": null}"#)?;
    let external: serde_json::Value = (&node).into();
    assert_eq!(external["a"], serde_json::json!(1));
    assert_eq!(external["b"][1], serde_json::json!("x"));

    let back = JsonNode::from(external);
    assert_eq!(back, node);
    Ok(())
}

#[test]
fn serialize_impl_matches_rendered_text() -> Result<()> {
    let node = parse(r#"{"a": [1, null], "b": "x"}"#)?;
    let via_serde = serde_json::to_string(&node)?;
    assert_eq!(via_serde, node.to_text(0));
    Ok(())
}
