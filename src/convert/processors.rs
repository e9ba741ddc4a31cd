//! Pluggable processors that customize individual conversion steps.
//!
//! Value processors replace the serialized form of a single value, bean
//! processors replace the whole object mapping for a bean type, property
//! name processors rename keys on the way out, and default value
//! processors substitute typed defaults for nulls. Registrations are
//! keyed by type name, (type, property) pair, or a `*` wildcard pattern,
//! resolved in that priority order.

use crate::bean::JsonBean;
use crate::convert::{JsonConfig, Value};
use crate::error::JsonError;
use crate::node::JsonNode;

/// Fully replaces the serialized form of a value.
///
/// A registered value processor bypasses further normalization: whatever
/// node it returns is embedded as-is.
pub trait JsonValueProcessor {
    fn process(
        &self,
        value: &Value,
        key: Option<&str>,
        config: &JsonConfig,
    ) -> Result<JsonNode, JsonError>;
}

/// Fully replaces the object mapping for a bean type, skipping
/// descriptor-driven traversal.
pub trait JsonBeanProcessor {
    fn process_bean(&self, bean: &dyn JsonBean, config: &JsonConfig)
        -> Result<JsonNode, JsonError>;
}

/// Renames a property key during serialization.
pub trait PropertyNameProcessor {
    fn process_name(&self, type_name: &str, property: &str) -> String;
}

/// Supplies the substitute node for a null property value, by declared
/// type.
pub trait DefaultValueProcessor {
    fn default_value(&self, type_name: &str) -> JsonNode;
}

/// Stock defaults: numeric types yield `0`, booleans `false`, everything
/// else `null`.
pub struct StockDefaultValueProcessor;

impl DefaultValueProcessor for StockDefaultValueProcessor {
    fn default_value(&self, type_name: &str) -> JsonNode {
        match type_name {
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "usize" | "isize" => {
                JsonNode::from(0)
            }
            "f32" | "f64" => JsonNode::Number(crate::node::JsonNumber::Float(0.0)),
            "bool" => JsonNode::Bool(false),
            _ => JsonNode::Null,
        }
    }
}

/// Registration key for a value processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorKey {
    type_name: Option<String>,
    property: Option<String>,
}

impl ProcessorKey {
    /// Matches every value of the given type.
    pub fn for_type(type_name: &str) -> Self {
        ProcessorKey {
            type_name: Some(type_name.to_owned()),
            property: None,
        }
    }

    /// Matches values of the given type under the given property name.
    pub fn for_property(type_name: &str, property: &str) -> Self {
        ProcessorKey {
            type_name: Some(type_name.to_owned()),
            property: Some(property.to_owned()),
        }
    }

    /// Matches the given property name on any type.
    pub fn for_any_type(property: &str) -> Self {
        ProcessorKey {
            type_name: None,
            property: Some(property.to_owned()),
        }
    }

    /// Resolution score: exact (type, property) beats exact type, which
    /// beats a wildcard pattern match. `None` means no match.
    pub fn match_score(&self, type_name: &str, property: Option<&str>) -> Option<u8> {
        let type_matched = match &self.type_name {
            None => true,
            Some(pattern) if pattern == type_name => true,
            Some(pattern) if wildcard_match(pattern, type_name) => return self
                .property_matches(property)
                .then_some(1),
            _ => return None,
        };
        if !type_matched || !self.property_matches(property) {
            return None;
        }
        match (&self.type_name, &self.property) {
            (Some(_), Some(_)) => Some(3),
            (Some(_), None) => Some(2),
            _ => Some(1),
        }
    }

    fn property_matches(&self, property: Option<&str>) -> bool {
        match (&self.property, property) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted == actual || wildcard_match(wanted, actual),
            (Some(_), None) => false,
        }
    }
}

/// Minimal `*`-only glob matching; the registries deliberately avoid a
/// full regular-expression engine.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == text;
    }
    let mut segments = pattern.split('*');
    let first = segments.next().unwrap_or("");
    if !text.starts_with(first) {
        return false;
    }
    let mut remaining = &text[first.len()..];
    let mut last_segment: Option<&str> = None;
    for segment in segments {
        last_segment = Some(segment);
        if segment.is_empty() {
            continue;
        }
        match remaining.find(segment) {
            Some(index) => remaining = &remaining[index + segment.len()..],
            None => return false,
        }
    }
    // A trailing non-empty segment must sit at the very end.
    match last_segment {
        Some(segment) if !segment.is_empty() => text.ends_with(segment),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matching() {
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("Person*", "PersonBean"));
        assert!(wildcard_match("*Bean", "PersonBean"));
        assert!(wildcard_match("P*Bean", "PersonBean"));
        assert!(!wildcard_match("Car*", "PersonBean"));
        assert!(!wildcard_match("*Bean", "BeanFactory"));
        assert!(wildcard_match("exact", "exact"));
    }

    #[test]
    fn exact_property_key_outranks_type_key() {
        let by_property = ProcessorKey::for_property("Person", "name");
        let by_type = ProcessorKey::for_type("Person");
        let by_pattern = ProcessorKey::for_type("Pers*");

        assert_eq!(by_property.match_score("Person", Some("name")), Some(3));
        assert_eq!(by_type.match_score("Person", Some("name")), Some(2));
        assert_eq!(by_pattern.match_score("Person", Some("name")), Some(1));
        assert_eq!(by_property.match_score("Person", Some("other")), None);
        assert_eq!(by_property.match_score("Car", Some("name")), None);
    }

    #[test]
    fn stock_defaults_by_type() {
        let stock = StockDefaultValueProcessor;
        assert_eq!(stock.default_value("i64"), JsonNode::from(0));
        assert_eq!(stock.default_value("bool"), JsonNode::Bool(false));
        assert_eq!(stock.default_value("String"), JsonNode::Null);
    }
}
