//! Per-call conversion configuration.
//!
//! A [`JsonConfig`] is a bag of policies passed by reference through
//! every recursive conversion step: processor registries, exclusion
//! sets, naming transforms, cycle and array strategies, and feature
//! flags. It is built with chainable `with_*` methods, is cheap to
//! clone (strategies sit behind `Rc`), and [`JsonConfig::copy`] supports
//! the recursive narrow-root-class pattern without leaking overrides
//! back to the caller. A config must not be mutated while a conversion
//! using it is in flight.

use std::collections::HashMap;
use std::rc::Rc;

use crate::bean::BeanFactory;
use crate::convert::events::{dispatch, JsonEventListener};
use crate::convert::naming::{JavaIdentifierTransformer, NoopTransformer};
use crate::convert::processors::{
    DefaultValueProcessor, JsonBeanProcessor, JsonValueProcessor, ProcessorKey,
    PropertyNameProcessor, StockDefaultValueProcessor, wildcard_match,
};
use crate::error::JsonError;
use crate::node::JsonNode;

/// Properties excluded from every bean unless explicitly overridden.
pub const DEFAULT_EXCLUDES: [&str; 3] = ["class", "declaringClass", "metaClass"];

/// What to do when the cycle guard reports a repeated reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleStrategy {
    /// Raise a structural error. The default.
    #[default]
    Error,
    /// Substitute a null node at the repeated position.
    Null,
    /// Omit the enclosing property entirely.
    IgnoreProperty,
    /// Substitute an empty node of the repeated composite's kind.
    Noop,
}

/// Target shape for deserialized JSON arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayMode {
    /// An ordered list. The default.
    #[default]
    List,
    /// Deduplicated, preserving first occurrence order.
    Set,
    /// Kept for configuration compatibility; materializes like `List`.
    ObjectArray,
}

#[derive(Clone)]
pub struct JsonConfig {
    cycle_strategy: CycleStrategy,
    array_mode: ArrayMode,
    root_class: Option<String>,
    class_map: Vec<(String, String)>,
    excludes: Vec<String>,
    class_excludes: HashMap<String, Vec<String>>,
    ignore_default_excludes: bool,
    ignore_transient_fields: bool,
    allow_non_string_keys: bool,
    javascript_compliant: bool,
    jettison_compatible: bool,
    auto_embed_json_strings: bool,
    skip_identifier_transform: bool,
    max_depth: usize,
    value_processors: Vec<(ProcessorKey, Rc<dyn JsonValueProcessor>)>,
    bean_processors: HashMap<String, Rc<dyn JsonBeanProcessor>>,
    name_processors: HashMap<String, Rc<dyn PropertyNameProcessor>>,
    default_value_processors: HashMap<String, Rc<dyn DefaultValueProcessor>>,
    identifier_transformer: Rc<dyn JavaIdentifierTransformer>,
    listeners: Vec<Rc<dyn JsonEventListener>>,
    bean_classes: HashMap<String, BeanFactory>,
}

impl Default for JsonConfig {
    fn default() -> Self {
        JsonConfig {
            cycle_strategy: CycleStrategy::default(),
            array_mode: ArrayMode::default(),
            root_class: None,
            class_map: Vec::new(),
            excludes: Vec::new(),
            class_excludes: HashMap::new(),
            ignore_default_excludes: false,
            ignore_transient_fields: false,
            allow_non_string_keys: false,
            javascript_compliant: true,
            jettison_compatible: false,
            auto_embed_json_strings: true,
            skip_identifier_transform: false,
            max_depth: crate::parser::DEFAULT_MAX_DEPTH,
            value_processors: Vec::new(),
            bean_processors: HashMap::new(),
            name_processors: HashMap::new(),
            default_value_processors: HashMap::new(),
            identifier_transformer: Rc::new(NoopTransformer),
            listeners: Vec::new(),
            bean_classes: HashMap::new(),
        }
    }
}

impl JsonConfig {
    pub fn new() -> Self {
        JsonConfig::default()
    }

    /// A deep-enough copy for recursive conversions: overrides applied
    /// to the copy never leak back to the caller's config.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Copy with a different root class, used when descending into a
    /// nested bean property.
    pub(crate) fn derive_with_root(&self, root_class: Option<String>) -> Self {
        let mut derived = self.copy();
        derived.root_class = root_class;
        derived
    }

    // ---- chainable policy setters ------------------------------------

    pub fn with_cycle_strategy(mut self, strategy: CycleStrategy) -> Self {
        self.cycle_strategy = strategy;
        self
    }

    pub fn with_array_mode(mut self, mode: ArrayMode) -> Self {
        self.array_mode = mode;
        self
    }

    pub fn with_root_class(mut self, type_name: &str) -> Self {
        self.root_class = Some(type_name.to_owned());
        self
    }

    /// Maps a property name (exact, or `*` wildcard) to the bean class
    /// used when deserializing that property.
    pub fn with_class_mapping(mut self, property: &str, type_name: &str) -> Self {
        self.class_map.push((property.to_owned(), type_name.to_owned()));
        self
    }

    /// Excludes a property (exact name or `*` wildcard) from every bean.
    pub fn with_excluded(mut self, property: &str) -> Self {
        self.excludes.push(property.to_owned());
        self
    }

    /// Excludes a property for one bean type only.
    pub fn with_class_excluded(mut self, type_name: &str, property: &str) -> Self {
        self.class_excludes
            .entry(type_name.to_owned())
            .or_default()
            .push(property.to_owned());
        self
    }

    pub fn with_ignore_default_excludes(mut self, ignore: bool) -> Self {
        self.ignore_default_excludes = ignore;
        self
    }

    pub fn with_ignore_transient_fields(mut self, ignore: bool) -> Self {
        self.ignore_transient_fields = ignore;
        self
    }

    pub fn with_allow_non_string_keys(mut self, allow: bool) -> Self {
        self.allow_non_string_keys = allow;
        self
    }

    /// When set, function-literal strings are recognized during string
    /// auto-embedding. On by default.
    pub fn with_javascript_compliant(mut self, compliant: bool) -> Self {
        self.javascript_compliant = compliant;
        self
    }

    /// Compatibility toggle: JSON-shaped strings inside documents keep
    /// their literal form during deserialization.
    pub fn with_jettison_compatible(mut self, compatible: bool) -> Self {
        self.jettison_compatible = compatible;
        self
    }

    /// Governs whether strings whose content parses as JSON are embedded
    /// as structured data during serialization. On by default.
    pub fn with_auto_embed_json_strings(mut self, embed: bool) -> Self {
        self.auto_embed_json_strings = embed;
        self
    }

    pub fn with_skip_identifier_transform(mut self, skip: bool) -> Self {
        self.skip_identifier_transform = skip;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_identifier_transformer(
        mut self,
        transformer: impl JavaIdentifierTransformer + 'static,
    ) -> Self {
        self.identifier_transformer = Rc::new(transformer);
        self
    }

    // ---- registries --------------------------------------------------

    pub fn register_value_processor(
        mut self,
        key: ProcessorKey,
        processor: impl JsonValueProcessor + 'static,
    ) -> Self {
        self.value_processors.push((key, Rc::new(processor)));
        self
    }

    pub fn unregister_value_processor(&mut self, key: &ProcessorKey) {
        self.value_processors.retain(|(k, _)| k != key);
    }

    pub fn register_bean_processor(
        mut self,
        type_name: &str,
        processor: impl JsonBeanProcessor + 'static,
    ) -> Self {
        self.bean_processors
            .insert(type_name.to_owned(), Rc::new(processor));
        self
    }

    pub fn unregister_bean_processor(&mut self, type_name: &str) {
        self.bean_processors.remove(type_name);
    }

    pub fn register_name_processor(
        mut self,
        type_name: &str,
        processor: impl PropertyNameProcessor + 'static,
    ) -> Self {
        self.name_processors
            .insert(type_name.to_owned(), Rc::new(processor));
        self
    }

    pub fn unregister_name_processor(&mut self, type_name: &str) {
        self.name_processors.remove(type_name);
    }

    pub fn register_default_value_processor(
        mut self,
        type_name: &str,
        processor: impl DefaultValueProcessor + 'static,
    ) -> Self {
        self.default_value_processors
            .insert(type_name.to_owned(), Rc::new(processor));
        self
    }

    pub fn unregister_default_value_processor(&mut self, type_name: &str) {
        self.default_value_processors.remove(type_name);
    }

    pub fn register_listener(mut self, listener: impl JsonEventListener + 'static) -> Self {
        self.listeners.push(Rc::new(listener));
        self
    }

    /// Registers a bean class under its type name for typed
    /// deserialization.
    pub fn register_bean_class<F>(mut self, type_name: &str, factory: F) -> Self
    where
        F: Fn() -> std::rc::Rc<std::cell::RefCell<dyn crate::bean::JsonBean>> + 'static,
    {
        self.bean_classes
            .insert(type_name.to_owned(), Rc::new(factory));
        self
    }

    // ---- lookups used by the engine ----------------------------------

    pub fn cycle_strategy(&self) -> CycleStrategy {
        self.cycle_strategy
    }

    pub fn array_mode(&self) -> ArrayMode {
        self.array_mode
    }

    pub fn root_class(&self) -> Option<&str> {
        self.root_class.as_deref()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn allows_non_string_keys(&self) -> bool {
        self.allow_non_string_keys
    }

    pub fn is_javascript_compliant(&self) -> bool {
        self.javascript_compliant
    }

    pub fn is_jettison_compatible(&self) -> bool {
        self.jettison_compatible
    }

    pub fn auto_embeds_json_strings(&self) -> bool {
        self.auto_embed_json_strings
    }

    pub fn ignores_transient_fields(&self) -> bool {
        self.ignore_transient_fields
    }

    /// Resolves the target class for a property via the class map:
    /// exact keys first, then `*` wildcard patterns in registration
    /// order.
    pub fn resolve_class(&self, property: &str) -> Option<&str> {
        if let Some((_, class)) = self.class_map.iter().find(|(key, _)| key == property) {
            return Some(class);
        }
        self.class_map
            .iter()
            .find(|(key, _)| wildcard_match(key, property))
            .map(|(_, class)| class.as_str())
    }

    /// Merged exclusion check: static defaults (unless overridden),
    /// global excludes, then per-class excludes.
    pub fn is_excluded(&self, type_name: &str, property: &str) -> bool {
        if !self.ignore_default_excludes && DEFAULT_EXCLUDES.contains(&property) {
            return true;
        }
        if self
            .excludes
            .iter()
            .any(|pattern| wildcard_match(pattern, property))
        {
            return true;
        }
        self.class_excludes
            .get(type_name)
            .is_some_and(|patterns| patterns.iter().any(|p| wildcard_match(p, property)))
    }

    /// Highest-scoring value processor for a (type, property) site.
    /// Earlier registrations win ties.
    pub fn find_value_processor(
        &self,
        type_name: &str,
        property: Option<&str>,
    ) -> Option<Rc<dyn JsonValueProcessor>> {
        self.value_processors
            .iter()
            .filter_map(|(key, processor)| {
                key.match_score(type_name, property)
                    .map(|score| (score, processor))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, processor)| processor.clone())
    }

    pub fn find_bean_processor(&self, type_name: &str) -> Option<Rc<dyn JsonBeanProcessor>> {
        self.bean_processors.get(type_name).cloned()
    }

    pub fn find_name_processor(&self, type_name: &str) -> Option<Rc<dyn PropertyNameProcessor>> {
        self.name_processors.get(type_name).cloned()
    }

    /// The substitute node for a null value of the given declared type.
    pub fn default_value_for(&self, type_name: &str) -> JsonNode {
        match self.default_value_processors.get(type_name) {
            Some(processor) => processor.default_value(type_name),
            None => StockDefaultValueProcessor.default_value(type_name),
        }
    }

    /// Applies the identifier transformer unless skipping is configured.
    pub fn transform_key(&self, key: &str) -> String {
        if self.skip_identifier_transform {
            key.to_owned()
        } else {
            self.identifier_transformer.transform(key)
        }
    }

    pub fn bean_factory(&self, type_name: &str) -> Option<BeanFactory> {
        self.bean_classes.get(type_name).cloned()
    }

    pub fn has_bean_class(&self, type_name: &str) -> bool {
        self.bean_classes.contains_key(type_name)
    }

    // ---- event dispatch ----------------------------------------------

    pub(crate) fn fire_object_start(&self) {
        dispatch(&self.listeners, |l| l.on_object_start());
    }

    pub(crate) fn fire_object_end(&self) {
        dispatch(&self.listeners, |l| l.on_object_end());
    }

    pub(crate) fn fire_array_start(&self) {
        dispatch(&self.listeners, |l| l.on_array_start());
    }

    pub(crate) fn fire_array_end(&self) {
        dispatch(&self.listeners, |l| l.on_array_end());
    }

    pub(crate) fn fire_property_set(&self, key: &str) {
        dispatch(&self.listeners, |l| l.on_property_set(key));
    }

    pub(crate) fn fire_warning(&self, message: &str) {
        dispatch(&self.listeners, |l| l.on_warning(message));
    }

    pub(crate) fn fire_error(&self, error: &JsonError) {
        dispatch(&self.listeners, |l| l.on_error(error));
    }
}
