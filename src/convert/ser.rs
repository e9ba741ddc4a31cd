//! Object graph to node tree serialization.

use log::{debug, warn};

use crate::convert::config::{CycleStrategy, JsonConfig};
use crate::convert::cycle::CycleGuard;
use crate::convert::value::{classify, Value, ValueKind};
use crate::error::JsonError;
use crate::node::{JsonArray, JsonNode, JsonNumber, JsonObject};

/// Converts an arbitrary value into a JSON node tree.
///
/// Classification, cycle guarding, processor hooks, exclusion rules and
/// name transforms are all driven by `config`. Returns a fully-formed
/// node or a single error; never a partial result.
pub fn to_json(value: &Value, config: &JsonConfig) -> Result<JsonNode, JsonError> {
    let mut guard = CycleGuard::new();
    // A top-level ignored cycle has no enclosing property to omit.
    Ok(serialize(value, None, config, &mut guard, 0)?.unwrap_or(JsonNode::Null))
}

/// Convenience entry mirroring the classic `fromObject`: strings are
/// parsed as JSON text, everything else is serialized.
pub fn from_object(value: &Value, config: &JsonConfig) -> Result<JsonNode, JsonError> {
    match value {
        Value::Str(text) => crate::parser::parse_with_depth(text, config.max_depth()),
        other => to_json(other, config),
    }
}

/// `Ok(None)` means "omit this property" (the `IgnoreProperty` cycle
/// strategy); every other outcome is a node or a fatal error.
fn serialize(
    value: &Value,
    key: Option<&str>,
    config: &JsonConfig,
    guard: &mut CycleGuard,
    depth: usize,
) -> Result<Option<JsonNode>, JsonError> {
    if depth > config.max_depth() {
        return Err(JsonError::NestingTooDeep(config.max_depth()));
    }
    let kind = classify(value);
    match kind {
        ValueKind::Null => Ok(Some(JsonNode::Null)),
        ValueKind::Boolean => match value {
            Value::Bool(b) => Ok(Some(JsonNode::Bool(*b))),
            _ => unreachable!("classified as boolean"),
        },
        ValueKind::Number => match value {
            Value::Int(n) => Ok(Some(JsonNode::Number(JsonNumber::Int(*n)))),
            Value::Float(f) => {
                let number = JsonNumber::from_f64(*f).inspect_err(|e| config.fire_error(e))?;
                Ok(Some(JsonNode::Number(number)))
            }
            _ => unreachable!("classified as number"),
        },
        ValueKind::String => match value {
            Value::Str(s) => Ok(Some(string_node(s, config))),
            _ => unreachable!("classified as string"),
        },
        ValueKind::Function => match value {
            Value::Function(f) => Ok(Some(JsonNode::Function(f.clone()))),
            _ => unreachable!("classified as function"),
        },
        ValueKind::Node => match value {
            // Raw path: embedded as-is, no re-interpretation.
            Value::Node(node) => Ok(Some(node.clone())),
            _ => unreachable!("classified as node"),
        },
        ValueKind::ArrayLike | ValueKind::MapLike | ValueKind::BeanLike => {
            let Some(identity) = value.identity() else {
                unreachable!("composite values carry an identity");
            };
            if !guard.enter(identity) {
                return cycle_recovery(kind, key, config);
            }
            let result = serialize_composite(value, kind, config, guard, depth);
            guard.leave(identity);
            result
        }
    }
}

fn cycle_recovery(
    kind: ValueKind,
    key: Option<&str>,
    config: &JsonConfig,
) -> Result<Option<JsonNode>, JsonError> {
    match config.cycle_strategy() {
        CycleStrategy::Error => {
            let error = JsonError::CycleDetected;
            config.fire_error(&error);
            Err(error)
        }
        CycleStrategy::Null => Ok(Some(JsonNode::Null)),
        CycleStrategy::IgnoreProperty => {
            debug!(
                "repeated reference under {:?} omitted by cycle strategy",
                key
            );
            Ok(None)
        }
        CycleStrategy::Noop => Ok(Some(match kind {
            ValueKind::ArrayLike => JsonNode::Array(JsonArray::new()),
            _ => JsonNode::Object(JsonObject::new()),
        })),
    }
}

fn serialize_composite(
    value: &Value,
    kind: ValueKind,
    config: &JsonConfig,
    guard: &mut CycleGuard,
    depth: usize,
) -> Result<Option<JsonNode>, JsonError> {
    match kind {
        ValueKind::ArrayLike => serialize_array(value, config, guard, depth),
        ValueKind::MapLike => serialize_map(value, config, guard, depth),
        ValueKind::BeanLike => serialize_bean(value, config, guard, depth),
        _ => unreachable!("not a composite"),
    }
}

fn serialize_array(
    value: &Value,
    config: &JsonConfig,
    guard: &mut CycleGuard,
    depth: usize,
) -> Result<Option<JsonNode>, JsonError> {
    let Value::Array(elements) = value else {
        unreachable!("classified as array-like");
    };
    // Snapshot so recursion never re-borrows the shared cell.
    let snapshot: Vec<Value> = elements.borrow().clone();

    config.fire_array_start();
    let mut array = JsonArray::new();
    for element in &snapshot {
        match serialize(element, None, config, guard, depth + 1)? {
            Some(node) => array.element(node),
            // Inside an array there is no property to omit.
            None => array.element(JsonNode::Null),
        }
    }
    config.fire_array_end();
    Ok(Some(JsonNode::Array(array)))
}

fn serialize_map(
    value: &Value,
    config: &JsonConfig,
    guard: &mut CycleGuard,
    depth: usize,
) -> Result<Option<JsonNode>, JsonError> {
    let Value::Map(entries) = value else {
        unreachable!("classified as map-like");
    };
    let snapshot: Vec<(Value, Value)> = entries.borrow().clone();

    // Keys are validated up front: a bad key fails before any entry of
    // this map is processed.
    let mut keyed: Vec<(String, &Value)> = Vec::with_capacity(snapshot.len());
    for (key, entry_value) in &snapshot {
        keyed.push((map_key(key, config)?, entry_value));
    }

    config.fire_object_start();
    let mut object = JsonObject::new();
    for (key, entry_value) in keyed {
        let node = match config.find_value_processor(&entry_value.type_name(), Some(&key)) {
            Some(processor) => Some(processor.process(entry_value, Some(&key), config)?),
            None => serialize(entry_value, Some(&key), config, guard, depth + 1)?,
        };
        if let Some(node) = node {
            // Repeated map keys accumulate, same as repeated keys in text.
            object.accumulate(&key, node)?;
            config.fire_property_set(&key);
        }
    }
    config.fire_object_end();
    Ok(Some(JsonNode::Object(object)))
}

fn map_key(key: &Value, config: &JsonConfig) -> Result<String, JsonError> {
    match key {
        Value::Str(s) => Ok(s.clone()),
        other if config.allows_non_string_keys() => match other {
            Value::Null => Ok("null".to_owned()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(f) => Ok(JsonNumber::from_f64(*f)?.to_string()),
            composite => Err(JsonError::InvalidKey(composite.type_name())),
        },
        other => Err(JsonError::InvalidKey(other.type_name())),
    }
}

fn serialize_bean(
    value: &Value,
    config: &JsonConfig,
    guard: &mut CycleGuard,
    depth: usize,
) -> Result<Option<JsonNode>, JsonError> {
    let Value::Bean(bean) = value else {
        unreachable!("classified as bean-like");
    };
    let bean = bean.borrow();
    let type_name = bean.type_name().to_owned();

    // A bean-level processor replaces descriptor traversal entirely.
    if let Some(processor) = config.find_bean_processor(&type_name) {
        return Ok(Some(processor.process_bean(&*bean, config)?));
    }

    config.fire_object_start();
    let mut object = JsonObject::new();
    for descriptor in bean.descriptors() {
        if !descriptor.readable {
            debug!(
                "property '{}' of {} has no read accessor, skipping",
                descriptor.name, type_name
            );
            config.fire_warning(&format!(
                "property '{}' has no read accessor",
                descriptor.name
            ));
            continue;
        }
        if descriptor.transient && config.ignores_transient_fields() {
            continue;
        }
        if config.is_excluded(&type_name, &descriptor.name) {
            continue;
        }
        let Some(property_value) = bean.get(&descriptor.name) else {
            warn!(
                "property '{}' of {} yielded no value, skipping",
                descriptor.name, type_name
            );
            continue;
        };

        let key = match config.find_name_processor(&type_name) {
            Some(processor) => processor.process_name(&type_name, &descriptor.name),
            None => descriptor.name.clone(),
        };

        // A registered value processor fully replaces the serialized
        // value and bypasses further normalization.
        let processor = config
            .find_value_processor(&descriptor.type_name, Some(&descriptor.name))
            .or_else(|| config.find_value_processor(&property_value.type_name(), Some(&descriptor.name)));
        let node = match processor {
            Some(processor) => Some(processor.process(&property_value, Some(&descriptor.name), config)?),
            None if matches!(property_value, Value::Null) => {
                Some(config.default_value_for(&descriptor.type_name))
            }
            None => serialize(&property_value, Some(&key), config, guard, depth + 1)?,
        };
        if let Some(node) = node {
            object.element(key.clone(), node)?;
            config.fire_property_set(&key);
        }
    }
    config.fire_object_end();
    Ok(Some(JsonNode::Object(object)))
}

/// A string whose trimmed content is itself JSON-shaped is embedded as
/// structured data when auto-embedding is enabled; function literals
/// additionally require javascript compliance.
fn string_node(text: &str, config: &JsonConfig) -> JsonNode {
    if !config.auto_embeds_json_strings() {
        return JsonNode::String(text.to_owned());
    }
    let trimmed = text.trim();
    if trimmed == "null" {
        return JsonNode::Null;
    }
    let looks_structured = trimmed.starts_with('{') || trimmed.starts_with('[');
    let looks_function = config.is_javascript_compliant() && trimmed.starts_with("function");
    if looks_structured || looks_function {
        match crate::parser::parse_with_depth(trimmed, config.max_depth()) {
            Ok(node) if looks_structured || node.as_function().is_some() => return node,
            // Not actually parseable: keep the literal string.
            _ => {}
        }
    }
    JsonNode::String(text.to_owned())
}
