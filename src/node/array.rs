use crate::node::JsonNode;

/// An ordered JSON array node.
///
/// Elements keep their original order and `Null` entries are real
/// elements, never skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    elements: Vec<JsonNode>,
}

impl JsonArray {
    pub fn new() -> Self {
        JsonArray::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JsonNode> {
        self.elements.get(index)
    }

    /// Appends an element.
    pub fn element(&mut self, value: JsonNode) {
        self.elements.push(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JsonNode> {
        self.elements.iter()
    }
}

impl From<Vec<JsonNode>> for JsonArray {
    fn from(elements: Vec<JsonNode>) -> Self {
        JsonArray { elements }
    }
}

impl FromIterator<JsonNode> for JsonArray {
    fn from_iter<T: IntoIterator<Item = JsonNode>>(iter: T) -> Self {
        JsonArray {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonNode;
    type IntoIter = std::slice::Iter<'a, JsonNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for JsonArray {
    type Item = JsonNode;
    type IntoIter = std::vec::IntoIter<JsonNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
