//! Scalar coercion from nodes to typed property values.

use crate::convert::value::Value;
use crate::error::JsonError;
use crate::node::{JsonNode, JsonNumber};

const INT_TYPES: [&str; 10] = [
    "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "usize", "isize",
];

/// Coerces a scalar node into the declared target type of a property.
///
/// Numbers widen freely, integral floats narrow to integers, and strings
/// holding a numeric or boolean literal convert. Anything else is a
/// coercion error naming the property.
pub fn morph(node: &JsonNode, target_type: &str, property: &str) -> Result<Value, JsonError> {
    if INT_TYPES.contains(&target_type) {
        return morph_int(node, target_type, property);
    }
    match target_type {
        "f32" | "f64" => morph_float(node, target_type, property),
        "bool" => morph_bool(node, property),
        "String" | "str" => morph_string(node),
        // Unknown declared types take the value's natural shape.
        _ => Ok(untyped(node)),
    }
}

fn morph_int(node: &JsonNode, target_type: &str, property: &str) -> Result<Value, JsonError> {
    match node {
        JsonNode::Number(JsonNumber::Int(n)) => Ok(Value::Int(*n)),
        JsonNode::Number(JsonNumber::Float(f)) if f.fract() == 0.0 => Ok(Value::Int(*f as i64)),
        JsonNode::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| coercion_error(property, target_type, &e.to_string())),
        other => Err(coercion_error(property, target_type, other.type_name())),
    }
}

fn morph_float(node: &JsonNode, target_type: &str, property: &str) -> Result<Value, JsonError> {
    match node {
        JsonNode::Number(n) => Ok(Value::Float(n.as_f64())),
        JsonNode::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| coercion_error(property, target_type, &e.to_string())),
        other => Err(coercion_error(property, target_type, other.type_name())),
    }
}

fn morph_bool(node: &JsonNode, property: &str) -> Result<Value, JsonError> {
    match node {
        JsonNode::Bool(b) => Ok(Value::Bool(*b)),
        JsonNode::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "off" => Ok(Value::Bool(false)),
            other => Err(coercion_error(property, "bool", other)),
        },
        other => Err(coercion_error(property, "bool", other.type_name())),
    }
}

fn morph_string(node: &JsonNode) -> Result<Value, JsonError> {
    match node {
        JsonNode::String(s) => Ok(Value::Str(s.clone())),
        JsonNode::Null => Ok(Value::Null),
        // Scalars stringify with their rendered form.
        other => Ok(Value::Str(other.to_text(0))),
    }
}

/// The natural value of a scalar node, with no declared type to honor.
fn untyped(node: &JsonNode) -> Value {
    match node {
        JsonNode::Null => Value::Null,
        JsonNode::Bool(b) => Value::Bool(*b),
        JsonNode::Number(JsonNumber::Int(n)) => Value::Int(*n),
        JsonNode::Number(JsonNumber::Float(f)) => Value::Float(*f),
        JsonNode::String(s) => Value::Str(s.clone()),
        JsonNode::Function(f) => Value::Function(f.clone()),
        composite => Value::Node(composite.clone()),
    }
}

fn coercion_error(property: &str, target_type: &str, message: &str) -> JsonError {
    JsonError::Coercion {
        property: property.to_owned(),
        target_type: target_type.to_owned(),
        message: message.to_owned(),
    }
}
