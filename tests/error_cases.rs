mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{counter_config, setup_logger};
use json_lib_rs::bean::{JsonBean, PropertyDescriptor};
use json_lib_rs::convert::{to_bean, to_json, JsonConfig, Value};
use json_lib_rs::error::JsonError;
use json_lib_rs::node::{JsonNode, JsonObject};
use json_lib_rs::parser::{parse, parse_with_depth};

#[test]
fn syntax_errors_carry_line_and_column() {
    setup_logger();
    let error = parse("{\n  \"a\": 1,\n  \"b\": }\n").unwrap_err();
    match error {
        JsonError::Syntax { line, column, .. } => {
            assert_eq!(line, 3);
            assert!(column > 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unterminated_strings_and_objects_are_rejected() {
    assert!(matches!(
        parse(r#"{"a": "unterminated"#),
        Err(JsonError::Syntax { .. })
    ));
    assert!(matches!(parse(r#"{"a": 1"#), Err(JsonError::Syntax { .. })));
    assert!(matches!(parse("[1, 2"), Err(JsonError::Syntax { .. })));
}

#[test]
fn trailing_garbage_after_the_document_is_rejected() {
    assert!(matches!(parse("{} extra"), Err(JsonError::Syntax { .. })));
    // Trailing comments and whitespace are fine.
    assert!(parse("{} // done").is_ok());
}

#[test]
fn parser_depth_limit_applies() {
    let deep = format!("{}1{}", "[".repeat(12), "]".repeat(12));
    assert!(matches!(
        parse_with_depth(&deep, 8),
        Err(JsonError::NestingTooDeep(8))
    ));
    assert!(parse_with_depth(&deep, 16).is_ok());
}

#[test]
fn non_string_map_keys_fail_fast() {
    let map = Value::new_map();
    map.insert("good", Value::from(1)).unwrap();
    map.insert(Value::from(false), Value::from(2)).unwrap();
    assert!(matches!(
        to_json(&map, &JsonConfig::new()),
        Err(JsonError::InvalidKey(_))
    ));
}

#[test]
fn null_object_sentinel_rejects_access() {
    let mut sentinel = JsonObject::null_object();
    assert!(matches!(
        sentinel.element("a", JsonNode::Null),
        Err(JsonError::NullObject(_))
    ));
    assert!(matches!(
        sentinel.get_checked("a"),
        Err(JsonError::NullObject(_))
    ));
    assert!(JsonNode::Object(sentinel).is_null());
}

#[test]
fn unknown_root_class_is_reported_by_name() {
    let node = parse("{}").unwrap();
    let config = JsonConfig::new().with_root_class("Missing");
    match to_bean(&node, &config).unwrap_err() {
        JsonError::UnknownClass(name) => assert_eq!(name, "Missing"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn coercion_failures_name_property_and_type() {
    let node = parse(r#"{"count": "forty-two"}"#).unwrap();
    match to_bean(&node, &counter_config()).unwrap_err() {
        JsonError::Coercion {
            property,
            target_type,
            ..
        } => {
            assert_eq!(property, "count");
            assert_eq!(target_type, "i64");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[derive(Debug, Default)]
struct Bounded {
    limit: i64,
}

impl JsonBean for Bounded {
    fn type_name(&self) -> &str {
        "Bounded"
    }

    fn descriptors(&self) -> Vec<PropertyDescriptor> {
        vec![PropertyDescriptor::new("limit", "i64")]
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "limit" => Some(Value::from(self.limit)),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), JsonError> {
        match (name, value) {
            ("limit", Value::Int(n)) if n >= 0 => self.limit = n,
            ("limit", Value::Int(_)) => {
                return Err(JsonError::Structural("limit must not be negative".to_owned()));
            }
            (other, _) => {
                return Err(JsonError::Structural(format!("no property '{other}'")));
            }
        }
        Ok(())
    }
}

#[test]
fn mutator_failures_are_wrapped_with_property_context() {
    let node = parse(r#"{"limit": -5}"#).unwrap();
    let config = JsonConfig::new()
        .with_root_class("Bounded")
        .register_bean_class("Bounded", || {
            Rc::new(RefCell::new(Bounded::default())) as Rc<RefCell<dyn JsonBean>>
        });
    match to_bean(&node, &config).unwrap_err() {
        JsonError::PropertySet {
            property,
            target_type,
            source,
        } => {
            assert_eq!(property, "limit");
            assert_eq!(target_type, "i64");
            assert!(matches!(*source, JsonError::Structural(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn hex_and_malformed_numbers() {
    let node = parse("{value: 0x1F}").unwrap();
    assert_eq!(
        node.as_object().unwrap().get("value"),
        Some(&JsonNode::from(31))
    );
    // A malformed exponent degrades to a bare string, never a number.
    let node = parse("[1e]").unwrap();
    assert_eq!(
        node.as_array().unwrap().get(0),
        Some(&JsonNode::from("1e"))
    );
}

#[test]
fn read_only_properties_are_skipped_not_fatal() {
    #[derive(Debug, Default)]
    struct Sealed {
        id: i64,
    }

    impl JsonBean for Sealed {
        fn type_name(&self) -> &str {
            "Sealed"
        }

        fn descriptors(&self) -> Vec<PropertyDescriptor> {
            vec![PropertyDescriptor::new("id", "i64").read_only()]
        }

        fn get(&self, name: &str) -> Option<Value> {
            match name {
                "id" => Some(Value::from(self.id)),
                _ => None,
            }
        }

        fn set(&mut self, _name: &str, _value: Value) -> Result<(), JsonError> {
            Err(JsonError::Structural("sealed".to_owned()))
        }
    }

    let node = parse(r#"{"id": 9}"#).unwrap();
    let config = JsonConfig::new()
        .with_root_class("Sealed")
        .register_bean_class("Sealed", || {
            Rc::new(RefCell::new(Sealed::default())) as Rc<RefCell<dyn JsonBean>>
        });
    let sealed = to_bean(&node, &config).unwrap();
    // The incoming value never reached the rejected mutator.
    assert_eq!(sealed.borrow().get("id"), Some(Value::Int(0)));
}
