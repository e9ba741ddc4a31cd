use thiserror::Error;

/// Errors raised by the conversion engine.
///
/// A conversion either returns a fully-formed result or exactly one of
/// these errors; there is no partial-success mode. Per-property failures
/// during deserialization are wrapped in [`JsonError::PropertySet`] so the
/// top-level caller sees which property and declared type failed.
#[derive(Error, Debug)]
pub enum JsonError {
    /// Malformed JSON text. Carries the position of the offending token.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// An object graph or node tree that cannot be converted.
    #[error("structural error: {0}")]
    Structural(String),

    /// A reference cycle was detected under the strict cycle strategy.
    #[error("cycle detected in object graph")]
    CycleDetected,

    /// NaN or Infinity encountered during serialization.
    #[error("invalid numeric value: {0}")]
    InvalidNumber(String),

    /// Input nesting exceeds the configured depth limit.
    #[error("nesting depth exceeds limit of {0}")]
    NestingTooDeep(usize),

    /// A map key that is not a string, with non-string keys disallowed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// An accessor or mutator was invoked on the null-object sentinel.
    #[error("null object does not support '{0}'")]
    NullObject(String),

    /// No bean class registered under the requested type name.
    #[error("unknown bean class: {0}")]
    UnknownClass(String),

    /// A scalar could not be morphed into the property's declared type.
    #[error("cannot coerce value for property '{property}' into {target_type}: {message}")]
    Coercion {
        property: String,
        target_type: String,
        message: String,
    },

    /// Failure while setting a single property, wrapped with context.
    #[error("failed to set property '{property}' ({target_type})")]
    PropertySet {
        property: String,
        target_type: String,
        #[source]
        source: Box<JsonError>,
    },
}

impl JsonError {
    /// Wraps an error with the property name and declared type it occurred on.
    pub fn on_property(self, property: &str, target_type: &str) -> JsonError {
        JsonError::PropertySet {
            property: property.to_owned(),
            target_type: target_type.to_owned(),
            source: Box::new(self),
        }
    }
}
