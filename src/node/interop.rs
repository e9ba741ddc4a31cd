//! Interop with the serde data model.
//!
//! [`JsonNode`] implements [`serde::Serialize`], and lossless conversions
//! to and from [`serde_json::Value`] let serde-derived types enter the
//! engine. Function literals map to their string form on the serde side
//! and the null-object sentinel maps to null.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::node::{JsonNode, JsonNumber, JsonObject};

impl Serialize for JsonNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonNode::Null => serializer.serialize_unit(),
            JsonNode::Bool(b) => serializer.serialize_bool(*b),
            JsonNode::Number(JsonNumber::Int(n)) => serializer.serialize_i64(*n),
            JsonNode::Number(JsonNumber::Float(f)) => serializer.serialize_f64(*f),
            JsonNode::String(s) => serializer.serialize_str(s),
            JsonNode::Function(f) => serializer.serialize_str(&f.to_string()),
            JsonNode::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                for element in array {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            JsonNode::Object(object) => {
                if object.is_null_object() {
                    return serializer.serialize_unit();
                }
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object.entries() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<serde_json::Value> for JsonNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonNode::Null,
            serde_json::Value::Bool(b) => JsonNode::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    JsonNode::Number(JsonNumber::Int(i))
                } else if let Some(u) = n.as_u64() {
                    // Out of i64 range; degrade to float like the renderer would.
                    JsonNode::Number(JsonNumber::Float(u as f64))
                } else {
                    JsonNode::Number(JsonNumber::Float(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => JsonNode::String(s),
            serde_json::Value::Array(elements) => {
                JsonNode::Array(elements.into_iter().map(JsonNode::from).collect())
            }
            serde_json::Value::Object(entries) => {
                let mut object = JsonObject::new();
                for (key, value) in entries {
                    // Fresh object, element cannot hit the null-object guard.
                    let _ = object.element(key, JsonNode::from(value));
                }
                JsonNode::Object(object)
            }
        }
    }
}

impl From<&JsonNode> for serde_json::Value {
    fn from(node: &JsonNode) -> Self {
        match node {
            JsonNode::Null => serde_json::Value::Null,
            JsonNode::Bool(b) => serde_json::Value::Bool(*b),
            JsonNode::Number(JsonNumber::Int(n)) => serde_json::Value::from(*n),
            JsonNode::Number(JsonNumber::Float(f)) => serde_json::Value::from(*f),
            JsonNode::String(s) => serde_json::Value::String(s.clone()),
            JsonNode::Function(f) => serde_json::Value::String(f.to_string()),
            JsonNode::Array(array) => {
                serde_json::Value::Array(array.iter().map(serde_json::Value::from).collect())
            }
            JsonNode::Object(object) => {
                if object.is_null_object() {
                    return serde_json::Value::Null;
                }
                let mut map = serde_json::Map::with_capacity(object.len());
                for (key, value) in object.entries() {
                    map.insert(key.clone(), serde_json::Value::from(value));
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
