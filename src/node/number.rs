use std::fmt;

use crate::error::JsonError;

/// A JSON number, preserving the source numeric type.
///
/// Integral literals stay `Int` and floating literals stay `Float`, so a
/// document containing `42` and one containing `42.5` keep their shape
/// through the node tree. Equality is numeric across variants:
/// `Int(2) == Float(2.0)`.
#[derive(Debug, Clone, Copy)]
pub enum JsonNumber {
    Int(i64),
    Float(f64),
}

impl JsonNumber {
    /// Builds a floating number, rejecting NaN and Infinity.
    ///
    /// Serialization must fail rather than emit an invalid JSON literal.
    pub fn from_f64(value: f64) -> Result<JsonNumber, JsonError> {
        if value.is_nan() || value.is_infinite() {
            return Err(JsonError::InvalidNumber(value.to_string()));
        }
        Ok(JsonNumber::Float(value))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonNumber::Int(n) => Some(*n),
            JsonNumber::Float(f) if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => {
                Some(*f as i64)
            }
            JsonNumber::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Int(n) => *n as f64,
            JsonNumber::Float(f) => *f,
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, JsonNumber::Int(_))
    }
}

impl PartialEq for JsonNumber {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonNumber::Int(a), JsonNumber::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for JsonNumber {
    /// Renders the numeric literal. Integral floats drop the fractional
    /// part (`2.0` renders as `2`), matching the renderer's trimming.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Int(n) => write!(f, "{}", n),
            JsonNumber::Float(v) => {
                if v.fract() == 0.0 && v.abs() < 1e16 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
        }
    }
}

impl From<i64> for JsonNumber {
    fn from(value: i64) -> Self {
        JsonNumber::Int(value)
    }
}

impl From<i32> for JsonNumber {
    fn from(value: i32) -> Self {
        JsonNumber::Int(value as i64)
    }
}
