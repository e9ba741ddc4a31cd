//! Tolerant JSON text parsing.
//!
//! A hand-written recursive-descent tokenizer that accepts a superset of
//! strict JSON (trailing commas, unquoted keys, single-quoted strings,
//! `;` separators, comments, JS function literals) and builds the node
//! tree. Structural violations raise [`JsonError::Syntax`] with a
//! position-aware message; parsing is not recoverable mid-document.

mod tokenizer;

use crate::error::JsonError;
use crate::node::JsonNode;

pub use tokenizer::JsonTokenizer;

/// Default nesting-depth limit applied by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parses JSON text into a node tree with the default depth limit.
pub fn parse(text: &str) -> Result<JsonNode, JsonError> {
    parse_with_depth(text, DEFAULT_MAX_DEPTH)
}

/// Parses JSON text with an explicit nesting-depth limit.
pub fn parse_with_depth(text: &str, max_depth: usize) -> Result<JsonNode, JsonError> {
    JsonTokenizer::new(text, max_depth).parse_document()
}
