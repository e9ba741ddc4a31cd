//! Node tree to object materialization.
//!
//! Two entry points: [`to_value`] produces the untyped shape (scalars,
//! arrays, dynamic beans), and [`to_bean`] populates a registered bean
//! class through its property descriptors, coercing scalars to the
//! declared types and descending into nested classes via the class map.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::bean::{DynaBean, JsonBean, PropertyDescriptor};
use crate::convert::coerce;
use crate::convert::config::{ArrayMode, JsonConfig};
use crate::convert::value::Value;
use crate::error::JsonError;
use crate::node::{JsonArray, JsonNode, JsonNumber, JsonObject};

/// Materializes a node tree into untyped values: scalars map directly,
/// arrays follow the configured array mode, and objects become dynamic
/// beans keyed by the transformed property names.
pub fn to_value(node: &JsonNode, config: &JsonConfig) -> Result<Value, JsonError> {
    materialize(node, config, 0)
}

/// Materializes an object node into an instance of the configured root
/// class.
///
/// The root class must be registered via `register_bean_class`; nested
/// properties resolve their classes through the class map, falling back
/// to a registered class matching the descriptor's declared type, and
/// finally to a dynamic bean.
pub fn to_bean(node: &JsonNode, config: &JsonConfig) -> Result<Rc<RefCell<dyn JsonBean>>, JsonError> {
    let Some(object) = node.as_object() else {
        return Err(JsonError::Structural(format!(
            "expected an object node, found {}",
            node.type_name()
        )));
    };
    let Some(root) = config.root_class() else {
        return Err(JsonError::Structural(
            "no root class configured for bean conversion".to_owned(),
        ));
    };
    let Some(factory) = config.bean_factory(root) else {
        return Err(JsonError::UnknownClass(root.to_owned()));
    };
    let bean = factory();
    populate(&bean, object, config, 0)?;
    Ok(bean)
}

fn materialize(node: &JsonNode, config: &JsonConfig, depth: usize) -> Result<Value, JsonError> {
    if depth > config.max_depth() {
        return Err(JsonError::NestingTooDeep(config.max_depth()));
    }
    match node {
        JsonNode::Null => Ok(Value::Null),
        JsonNode::Bool(b) => Ok(Value::Bool(*b)),
        JsonNode::Number(JsonNumber::Int(n)) => Ok(Value::Int(*n)),
        JsonNode::Number(JsonNumber::Float(f)) => Ok(Value::Float(*f)),
        JsonNode::String(s) => Ok(materialize_string(s, config, depth)?),
        JsonNode::Function(f) => Ok(Value::Function(f.clone())),
        JsonNode::Array(array) => {
            let mut items = Vec::with_capacity(array.len());
            for element in array.iter() {
                items.push(materialize(element, config, depth + 1)?);
            }
            Ok(Value::array_from(apply_array_mode(config.array_mode(), items)))
        }
        JsonNode::Object(object) => {
            if object.is_null_object() {
                return Ok(Value::Null);
            }
            let mut bean = DynaBean::new();
            for (key, child) in object.entries() {
                let property = config.transform_key(key);
                let value = materialize(child, config, depth + 1)?;
                bean.set(&property, value)
                    .map_err(|e| e.on_property(&property, "DynaBean"))?;
                config.fire_property_set(&property);
            }
            Ok(Value::bean(bean))
        }
    }
}

/// Strings whose content is itself JSON-shaped are re-interpreted unless
/// jettison compatibility keeps them literal.
fn materialize_string(text: &str, config: &JsonConfig, depth: usize) -> Result<Value, JsonError> {
    if config.is_jettison_compatible() {
        return Ok(Value::Str(text.to_owned()));
    }
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(node) = crate::parser::parse_with_depth(trimmed, config.max_depth()) {
            return materialize(&node, config, depth + 1);
        }
    }
    Ok(Value::Str(text.to_owned()))
}

fn apply_array_mode(mode: ArrayMode, items: Vec<Value>) -> Vec<Value> {
    match mode {
        // ObjectArray survives only as a configuration synonym for List.
        ArrayMode::List | ArrayMode::ObjectArray => items,
        ArrayMode::Set => {
            let mut unique: Vec<Value> = Vec::with_capacity(items.len());
            for item in items {
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
            unique
        }
    }
}

fn populate(
    bean: &Rc<RefCell<dyn JsonBean>>,
    object: &JsonObject,
    config: &JsonConfig,
    depth: usize,
) -> Result<(), JsonError> {
    if depth > config.max_depth() {
        return Err(JsonError::NestingTooDeep(config.max_depth()));
    }
    let (type_name, descriptors, dynamic) = {
        let bean = bean.borrow();
        (bean.type_name().to_owned(), bean.descriptors(), bean.is_dynamic())
    };

    config.fire_object_start();
    for (key, child) in object.entries() {
        let property = config.transform_key(key);
        let descriptor = descriptors.iter().find(|d| d.name == property);

        let Some(descriptor) = descriptor else {
            if dynamic {
                let value = materialize(child, config, depth + 1)?;
                bean.borrow_mut()
                    .set(&property, value)
                    .map_err(|e| e.on_property(&property, &type_name))?;
                config.fire_property_set(&property);
            } else {
                debug!("{} has no property '{}', skipping", type_name, property);
            }
            continue;
        };
        if !descriptor.writable {
            warn!(
                "property '{}' of {} is not writable, skipping",
                property, type_name
            );
            config.fire_warning(&format!("property '{property}' is not writable"));
            continue;
        }

        let value = property_value(descriptor, &property, child, config, depth)?;
        bean.borrow_mut()
            .set(&property, value)
            .map_err(|e| e.on_property(&property, &descriptor.type_name))?;
        config.fire_property_set(&property);
    }
    config.fire_object_end();
    Ok(())
}

fn property_value(
    descriptor: &PropertyDescriptor,
    property: &str,
    child: &JsonNode,
    config: &JsonConfig,
    depth: usize,
) -> Result<Value, JsonError> {
    match child {
        node if node.is_null() => {
            let substitute = config.default_value_for(&descriptor.type_name);
            if !matches!(substitute, JsonNode::Null) {
                warn!(
                    "null for primitive property '{}', substituting type default",
                    property
                );
            }
            coerce::morph(&substitute, &descriptor.type_name, property)
        }
        JsonNode::Array(array) => {
            materialize_elements(array, property, config, depth).map(|items| {
                Value::array_from(apply_array_mode(config.array_mode(), items))
            })
        }
        JsonNode::Object(nested) => {
            let nested_class = config
                .resolve_class(property)
                .map(str::to_owned)
                .or_else(|| {
                    config
                        .has_bean_class(&descriptor.type_name)
                        .then(|| descriptor.type_name.clone())
                });
            match nested_class {
                Some(class) => {
                    let derived = config.derive_with_root(Some(class));
                    nested_bean(nested, &derived, depth).map(Value::Bean)
                }
                None => materialize(child, config, depth + 1),
            }
        }
        JsonNode::Function(f) => Ok(Value::Function(f.clone())),
        scalar => coerce::morph(scalar, &descriptor.type_name, property),
    }
}

/// Array elements deserialize as beans when the class map names a class
/// for the enclosing property, untyped otherwise.
fn materialize_elements(
    array: &JsonArray,
    property: &str,
    config: &JsonConfig,
    depth: usize,
) -> Result<Vec<Value>, JsonError> {
    let element_class = config.resolve_class(property).map(str::to_owned);
    let mut items = Vec::with_capacity(array.len());
    for element in array.iter() {
        let item = match (&element_class, element) {
            (Some(class), JsonNode::Object(nested)) if !nested.is_null_object() => {
                let derived = config.derive_with_root(Some(class.clone()));
                nested_bean(nested, &derived, depth).map(Value::Bean)?
            }
            _ => materialize(element, config, depth + 1)?,
        };
        items.push(item);
    }
    Ok(items)
}

fn nested_bean(
    object: &JsonObject,
    config: &JsonConfig,
    depth: usize,
) -> Result<Rc<RefCell<dyn JsonBean>>, JsonError> {
    let Some(root) = config.root_class() else {
        return Err(JsonError::Structural(
            "no root class configured for bean conversion".to_owned(),
        ));
    };
    let Some(factory) = config.bean_factory(root) else {
        return Err(JsonError::UnknownClass(root.to_owned()));
    };
    let bean = factory();
    populate(&bean, object, config, depth + 1)?;
    Ok(bean)
}
