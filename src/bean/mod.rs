//! The bean capability consumed by the conversion engine.
//!
//! Instead of runtime reflection, a type opts into bean conversion by
//! implementing [`JsonBean`]: it enumerates its property descriptors and
//! exposes get/set accessors by name. [`DynaBean`] is the generic ordered
//! record used when no target class is given — it accepts any property
//! and derives its descriptors from its current contents.

use std::fmt;

use indexmap::IndexMap;

use crate::convert::Value;
use crate::error::JsonError;

/// Metadata for one named property of a bean.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub type_name: String,
    pub readable: bool,
    pub writable: bool,
    pub transient: bool,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        PropertyDescriptor {
            name: name.into(),
            type_name: type_name.into(),
            readable: true,
            writable: true,
            transient: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }
}

/// A composite value accessed through named properties rather than
/// collection semantics.
///
/// `get` returns `None` for unknown or unreadable properties; `set`
/// failures are wrapped by the deserializer with property context.
///
/// Beans are `Debug` so conversion results and errors carrying them can
/// be formatted in diagnostics and assertions.
pub trait JsonBean: fmt::Debug {
    /// Stable type identifier used for processor and registry lookup.
    fn type_name(&self) -> &str;

    fn descriptors(&self) -> Vec<PropertyDescriptor>;

    fn get(&self, name: &str) -> Option<Value>;

    fn set(&mut self, name: &str, value: Value) -> Result<(), JsonError>;

    /// Dynamic beans accept properties that have no descriptor.
    fn is_dynamic(&self) -> bool {
        false
    }
}

/// Factory producing a fresh instance of a registered bean class.
pub type BeanFactory = std::rc::Rc<dyn Fn() -> std::rc::Rc<std::cell::RefCell<dyn JsonBean>>>;

/// The untyped materialization target: an insertion-ordered property bag.
#[derive(Debug, Default)]
pub struct DynaBean {
    properties: IndexMap<String, Value>,
}

impl DynaBean {
    pub fn new() -> Self {
        DynaBean::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &String> {
        self.properties.keys()
    }
}

impl JsonBean for DynaBean {
    fn type_name(&self) -> &str {
        "DynaBean"
    }

    fn descriptors(&self) -> Vec<PropertyDescriptor> {
        self.properties
            .iter()
            .map(|(name, value)| PropertyDescriptor::new(name, value.type_name()))
            .collect()
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), JsonError> {
        self.properties.insert(name.to_owned(), value);
        Ok(())
    }

    fn is_dynamic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynabean_accepts_any_property_in_order() {
        let mut bean = DynaBean::new();
        bean.set("z", Value::from(1)).unwrap();
        bean.set("a", Value::from("x")).unwrap();

        assert_eq!(bean.len(), 2);
        let names: Vec<&String> = bean.property_names().collect();
        assert_eq!(names, ["z", "a"]);
        assert!(bean.is_dynamic());
    }

    #[test]
    fn dynabean_descriptors_follow_contents() {
        let mut bean = DynaBean::new();
        bean.set("count", Value::from(3)).unwrap();
        let descriptors = bean.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "count");
        assert_eq!(descriptors[0].type_name, "i64");
    }

    #[test]
    fn descriptors_accept_owned_and_borrowed_names() {
        let from_owned =
            PropertyDescriptor::new("count".to_owned(), String::from("i64"));
        let from_borrowed = PropertyDescriptor::new("count", "i64");
        assert_eq!(from_owned, from_borrowed);
    }

    #[test]
    fn beans_format_through_the_trait_object() {
        let mut bean = DynaBean::new();
        bean.set("x", Value::from(1)).unwrap();
        let object: &dyn JsonBean = &bean;
        let rendered = format!("{object:?}");
        assert!(rendered.contains("x"));
    }

    #[test]
    fn descriptor_builders_set_flags() {
        let descriptor = PropertyDescriptor::new("secret", "String")
            .write_only()
            .transient();
        assert!(!descriptor.readable);
        assert!(descriptor.writable);
        assert!(descriptor.transient);
    }
}
