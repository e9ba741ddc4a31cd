use indexmap::IndexMap;

use crate::error::JsonError;
use crate::node::JsonNode;

/// An insertion-ordered JSON object node.
///
/// A `JsonObject` may be flagged as the *null object* sentinel, which is
/// distinct from an empty object: it renders as `null` and rejects
/// mutation and checked access with [`JsonError::NullObject`].
///
/// Writing twice under the same key goes through [`JsonObject::accumulate`]:
/// the second write converts the slot into an array holding both values,
/// and later writes append. The parser and the map-serialization path rely
/// on this shared behavior.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    entries: IndexMap<String, JsonNode>,
    null_object: bool,
}

impl JsonObject {
    pub fn new() -> Self {
        JsonObject::default()
    }

    /// The null-object sentinel.
    pub fn null_object() -> Self {
        JsonObject {
            entries: IndexMap::new(),
            null_object: true,
        }
    }

    pub fn is_null_object(&self) -> bool {
        self.null_object
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        !self.null_object && self.entries.contains_key(key)
    }

    /// Returns the value under `key`, or `None` if absent or if this is
    /// the null-object sentinel.
    pub fn get(&self, key: &str) -> Option<&JsonNode> {
        if self.null_object {
            return None;
        }
        self.entries.get(key)
    }

    /// Like [`JsonObject::get`], but the null-object sentinel is an error.
    pub fn get_checked(&self, key: &str) -> Result<Option<&JsonNode>, JsonError> {
        self.guard("get")?;
        Ok(self.entries.get(key))
    }

    /// Sets `key` to `value`, overwriting any previous value.
    pub fn element(&mut self, key: impl Into<String>, value: JsonNode) -> Result<(), JsonError> {
        self.guard("element")?;
        self.entries.insert(key.into(), value);
        Ok(())
    }

    /// Accumulates `value` under `key`.
    ///
    /// A first write sets the slot; a second converts it into an array of
    /// prior and new value; further writes append to that array.
    pub fn accumulate(&mut self, key: impl Into<String>, value: JsonNode) -> Result<(), JsonError> {
        self.guard("accumulate")?;
        let key = key.into();
        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, value);
            }
            Some(JsonNode::Array(existing)) => {
                existing.element(value);
            }
            Some(slot) => {
                let prior = std::mem::replace(slot, JsonNode::Null);
                *slot = JsonNode::Array(crate::node::JsonArray::from(vec![prior, value]));
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<JsonNode>, JsonError> {
        self.guard("remove")?;
        Ok(self.entries.shift_remove(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &JsonNode)> {
        self.entries.iter()
    }

    fn guard(&self, operation: &str) -> Result<(), JsonError> {
        if self.null_object {
            return Err(JsonError::NullObject(operation.to_owned()));
        }
        Ok(())
    }
}

impl FromIterator<(String, JsonNode)> for JsonObject {
    fn from_iter<T: IntoIterator<Item = (String, JsonNode)>>(iter: T) -> Self {
        JsonObject {
            entries: iter.into_iter().collect(),
            null_object: false,
        }
    }
}
