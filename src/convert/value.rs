//! Dynamic input values and the value classifier.
//!
//! [`Value`] is what callers hand to the serializer: a tagged variant
//! over scalars, shared composites and beans. Composites are behind
//! `Rc<RefCell<..>>` so reference cycles are expressible and every
//! composite has a stable identity for the cycle guard.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::bean::JsonBean;
use crate::error::JsonError;
use crate::node::{JsonFunction, JsonNode};

/// An arbitrary input value for the conversion engine.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Function(JsonFunction),
    Array(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<Vec<(Value, Value)>>>),
    Bean(Rc<RefCell<dyn JsonBean>>),
    /// An already-built node. This is the raw path: the serializer embeds
    /// it as-is, bypassing string re-interpretation.
    Node(JsonNode),
}

/// The JSON category of an input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Function,
    ArrayLike,
    MapLike,
    BeanLike,
    Node,
}

/// Classifies a value into exactly one JSON category.
///
/// Total and side-effect-free. Ties break in priority order:
/// already-a-node > array/map-like > string > number/boolean > bean.
pub fn classify(value: &Value) -> ValueKind {
    match value {
        Value::Node(_) => ValueKind::Node,
        Value::Array(_) => ValueKind::ArrayLike,
        Value::Map(_) => ValueKind::MapLike,
        Value::Str(_) => ValueKind::String,
        Value::Int(_) | Value::Float(_) => ValueKind::Number,
        Value::Bool(_) => ValueKind::Boolean,
        Value::Function(_) => ValueKind::Function,
        Value::Null => ValueKind::Null,
        Value::Bean(_) => ValueKind::BeanLike,
    }
}

impl Value {
    pub fn new_array() -> Self {
        Value::Array(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn new_map() -> Self {
        Value::Map(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn array_from(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn map_from<K: Into<Value>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(Rc::new(RefCell::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn bean(bean: impl JsonBean + 'static) -> Self {
        Value::Bean(Rc::new(RefCell::new(bean)))
    }

    /// Appends to an array value.
    pub fn push(&self, item: Value) -> Result<(), JsonError> {
        match self {
            Value::Array(elements) => {
                elements.borrow_mut().push(item);
                Ok(())
            }
            other => Err(JsonError::Structural(format!(
                "cannot push into {}",
                other.type_name()
            ))),
        }
    }

    /// Appends an entry to a map value. Entries are kept in insertion
    /// order; repeated keys are preserved and accumulate at serialization.
    pub fn insert(&self, key: impl Into<Value>, item: Value) -> Result<(), JsonError> {
        match self {
            Value::Map(entries) => {
                entries.borrow_mut().push((key.into(), item));
                Ok(())
            }
            other => Err(JsonError::Structural(format!(
                "cannot insert into {}",
                other.type_name()
            ))),
        }
    }

    /// The identity of a shared composite, used by the cycle guard.
    /// Scalars and nodes have no identity.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Bean(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            _ => None,
        }
    }

    /// Stable type identifier used for processor lookup.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(_) => "bool".to_owned(),
            Value::Int(_) => "i64".to_owned(),
            Value::Float(_) => "f64".to_owned(),
            Value::Str(_) => "String".to_owned(),
            Value::Function(_) => "function".to_owned(),
            Value::Array(_) => "array".to_owned(),
            Value::Map(_) => "map".to_owned(),
            Value::Bean(bean) => bean.borrow().type_name().to_owned(),
            Value::Node(node) => node.type_name().to_owned(),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for scalars and composites (assumes acyclic
    /// composites); beans compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Bean(a), Value::Bean(b)) => {
                std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
            }
            (Value::Node(a), Value::Node(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(v) => write!(f, "Float({v})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Function(func) => write!(f, "Function({func})"),
            Value::Array(elements) => f.debug_tuple("Array").field(&elements.borrow()).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(&entries.borrow()).finish(),
            Value::Bean(bean) => write!(f, "Bean({})", bean.borrow().type_name()),
            Value::Node(node) => f.debug_tuple("Node").field(node).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_total_over_all_variants() {
        assert_eq!(classify(&Value::Null), ValueKind::Null);
        assert_eq!(classify(&Value::from(true)), ValueKind::Boolean);
        assert_eq!(classify(&Value::from(1)), ValueKind::Number);
        assert_eq!(classify(&Value::from(1.5)), ValueKind::Number);
        assert_eq!(classify(&Value::from("x")), ValueKind::String);
        assert_eq!(classify(&Value::new_array()), ValueKind::ArrayLike);
        assert_eq!(classify(&Value::new_map()), ValueKind::MapLike);
        assert_eq!(classify(&Value::Node(JsonNode::Null)), ValueKind::Node);
        assert_eq!(
            classify(&Value::bean(crate::bean::DynaBean::new())),
            ValueKind::BeanLike
        );
    }

    #[test]
    fn composites_have_stable_identity() {
        let array = Value::new_array();
        let alias = array.clone();
        assert_eq!(array.identity(), alias.identity());
        assert_ne!(array.identity(), Value::new_array().identity());
        assert_eq!(Value::from(1).identity(), None);
    }

    #[test]
    fn equality_is_structural_for_composites() {
        let a = Value::array_from([Value::from(1), Value::from("x")]);
        let b = Value::array_from([Value::from(1), Value::from("x")]);
        assert_eq!(a, b);
        assert_ne!(a, Value::array_from([Value::from(2)]));
    }

    #[test]
    fn numeric_equality_crosses_variants() {
        assert_eq!(Value::from(2), Value::from(2.0));
        assert_ne!(Value::from(2), Value::from(2.5));
    }
}
