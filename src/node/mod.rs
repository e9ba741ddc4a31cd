//! The canonical in-memory JSON value representation.
//!
//! A [`JsonNode`] is a tagged variant over null, booleans, numbers,
//! strings, JS function literals, arrays and objects. Objects keep
//! insertion order and support the *accumulate* write (a repeated key
//! turns the slot into an array). The serializer produces this tree, the
//! parser builds it from text, and [`to_text`] renders it back out in
//! compact or pretty form.

mod array;
mod function;
mod interop;
mod number;
mod object;
mod render;

pub use array::JsonArray;
pub use function::JsonFunction;
pub use number::JsonNumber;
pub use object::JsonObject;
pub use render::to_text;

/// A JSON value in the node tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonNode {
    #[default]
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Function(JsonFunction),
    Array(JsonArray),
    Object(JsonObject),
}

impl JsonNode {
    pub fn is_null(&self) -> bool {
        match self {
            JsonNode::Null => true,
            JsonNode::Object(object) => object.is_null_object(),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonNode::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            JsonNode::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(JsonNumber::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(JsonNumber::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonNode::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonNode::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&JsonFunction> {
        match self {
            JsonNode::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The node's JSON category name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonNode::Null => "null",
            JsonNode::Bool(_) => "boolean",
            JsonNode::Number(_) => "number",
            JsonNode::String(_) => "string",
            JsonNode::Function(_) => "function",
            JsonNode::Array(_) => "array",
            JsonNode::Object(_) => "object",
        }
    }

    /// Renders this node as text. Compact when `indent_factor` is 0,
    /// pretty-printed with that indent width otherwise.
    pub fn to_text(&self, indent_factor: usize) -> String {
        to_text(self, indent_factor)
    }
}

impl From<bool> for JsonNode {
    fn from(value: bool) -> Self {
        JsonNode::Bool(value)
    }
}

impl From<i64> for JsonNode {
    fn from(value: i64) -> Self {
        JsonNode::Number(JsonNumber::Int(value))
    }
}

impl From<i32> for JsonNode {
    fn from(value: i32) -> Self {
        JsonNode::Number(JsonNumber::Int(value as i64))
    }
}

impl From<f64> for JsonNode {
    fn from(value: f64) -> Self {
        JsonNode::Number(JsonNumber::Float(value))
    }
}

impl From<&str> for JsonNode {
    fn from(value: &str) -> Self {
        JsonNode::String(value.to_owned())
    }
}

impl From<String> for JsonNode {
    fn from(value: String) -> Self {
        JsonNode::String(value)
    }
}

impl From<JsonNumber> for JsonNode {
    fn from(value: JsonNumber) -> Self {
        JsonNode::Number(value)
    }
}

impl From<JsonArray> for JsonNode {
    fn from(value: JsonArray) -> Self {
        JsonNode::Array(value)
    }
}

impl From<JsonObject> for JsonNode {
    fn from(value: JsonObject) -> Self {
        JsonNode::Object(value)
    }
}
