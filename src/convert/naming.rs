//! Transformers that turn incoming JSON keys into identifier-style
//! property names during deserialization.

/// Rewrites a JSON key into a property name.
pub trait JavaIdentifierTransformer {
    fn transform(&self, key: &str) -> String;
}

/// Keeps keys untouched. The default.
pub struct NoopTransformer;

impl JavaIdentifierTransformer for NoopTransformer {
    fn transform(&self, key: &str) -> String {
        key.to_owned()
    }
}

/// Drops every character that is not valid in an identifier, including
/// leading digits.
pub struct StripTransformer;

impl JavaIdentifierTransformer for StripTransformer {
    fn transform(&self, key: &str) -> String {
        let mut result = String::with_capacity(key.len());
        for ch in key.chars() {
            if ch == '_' || ch.is_alphabetic() || (ch.is_ascii_digit() && !result.is_empty()) {
                result.push(ch);
            }
        }
        result
    }
}

/// Replaces whitespace runs with a single underscore.
pub struct UnderscoreTransformer;

impl JavaIdentifierTransformer for UnderscoreTransformer {
    fn transform(&self, key: &str) -> String {
        let mut result = String::with_capacity(key.len());
        let mut in_gap = false;
        for ch in key.trim().chars() {
            if ch.is_whitespace() {
                in_gap = true;
                continue;
            }
            if in_gap {
                result.push('_');
                in_gap = false;
            }
            result.push(ch);
        }
        result
    }
}

/// Removes whitespace and delimiters, upper-casing the character that
/// follows each gap: `"my key"` becomes `"myKey"`.
pub struct CamelCaseTransformer;

impl JavaIdentifierTransformer for CamelCaseTransformer {
    fn transform(&self, key: &str) -> String {
        let mut result = String::with_capacity(key.len());
        let mut upper_next = false;
        for ch in key.trim().chars() {
            if ch.is_whitespace() || ch == '-' || ch == '_' || ch == '.' {
                upper_next = !result.is_empty();
                continue;
            }
            if upper_next {
                result.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                result.push(ch);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_keeps_keys() {
        assert_eq!(NoopTransformer.transform("my key"), "my key");
    }

    #[test]
    fn strip_removes_invalid_characters() {
        assert_eq!(StripTransformer.transform("my key!"), "mykey");
        assert_eq!(StripTransformer.transform("9lives"), "lives");
        assert_eq!(StripTransformer.transform("a_b2"), "a_b2");
    }

    #[test]
    fn underscore_joins_whitespace_runs() {
        assert_eq!(UnderscoreTransformer.transform(" my   key "), "my_key");
    }

    #[test]
    fn camel_case_collapses_delimiters() {
        assert_eq!(CamelCaseTransformer.transform("my key"), "myKey");
        assert_eq!(CamelCaseTransformer.transform("first-name"), "firstName");
        assert_eq!(CamelCaseTransformer.transform("already"), "already");
    }
}
