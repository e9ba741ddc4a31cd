use crate::error::JsonError;
use crate::node::{JsonArray, JsonFunction, JsonNode, JsonNumber, JsonObject};

/// Characters that terminate a bare (unquoted) token.
const TOKEN_BREAKERS: &str = ",:]}/\\\"[{;=#";

/// A character scanner with one-token pushback over tolerant JSON text.
///
/// Accepts a superset of strict JSON: single-quoted strings, unquoted
/// keys and bare string tokens, `=`/`=>` as key separators, `;` as an
/// entry separator, trailing separators, comma elision in arrays,
/// `function(a,b){...}` literals and `//` / `/* */` comments. Duplicate
/// object keys accumulate into arrays.
pub struct JsonTokenizer {
    chars: Vec<char>,
    pos: usize,
    max_depth: usize,
}

impl JsonTokenizer {
    pub fn new(text: &str, max_depth: usize) -> Self {
        JsonTokenizer {
            chars: text.chars().collect(),
            pos: 0,
            max_depth,
        }
    }

    /// Parses a complete document; trailing content other than
    /// whitespace and comments is a syntax error.
    pub fn parse_document(&mut self) -> Result<JsonNode, JsonError> {
        let value = self.next_value(0)?;
        if self.next_clean()?.is_some() {
            return Err(self.syntax_error("unexpected trailing content"));
        }
        Ok(value)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn back(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Next significant character, skipping whitespace and comments.
    fn next_clean(&mut self) -> Result<Option<char>, JsonError> {
        loop {
            match self.next() {
                None => return Ok(None),
                Some(c) if c.is_whitespace() => continue,
                Some('/') => match self.peek() {
                    Some('/') => {
                        while let Some(c) = self.next() {
                            if c == '\n' {
                                break;
                            }
                        }
                    }
                    Some('*') => {
                        self.next();
                        loop {
                            match self.next() {
                                None => {
                                    return Err(self.syntax_error("unterminated comment"));
                                }
                                Some('*') if self.peek() == Some('/') => {
                                    self.next();
                                    break;
                                }
                                Some(_) => {}
                            }
                        }
                    }
                    _ => return Ok(Some('/')),
                },
                Some(c) => return Ok(Some(c)),
            }
        }
    }

    fn require_clean(&mut self) -> Result<char, JsonError> {
        self.next_clean()?
            .ok_or_else(|| self.syntax_error("unexpected end of input"))
    }

    fn next_value(&mut self, depth: usize) -> Result<JsonNode, JsonError> {
        if depth > self.max_depth {
            return Err(JsonError::NestingTooDeep(self.max_depth));
        }
        let ch = self.require_clean()?;
        match ch {
            '{' => self.parse_object(depth),
            '[' => self.parse_array(depth),
            '"' | '\'' => Ok(JsonNode::String(self.next_string(ch)?)),
            _ => {
                self.back();
                if self.looks_like_function() {
                    return Ok(JsonNode::Function(self.parse_function()?));
                }
                self.next_bare_token()
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<JsonNode, JsonError> {
        let mut object = JsonObject::new();
        loop {
            let ch = self.require_clean()?;
            if ch == '}' {
                return Ok(JsonNode::Object(object));
            }
            self.back();

            let key = self.next_key(depth)?;

            // Key/value separator: ':', '=' or '=>'.
            match self.require_clean()? {
                ':' => {}
                '=' => {
                    if self.peek() == Some('>') {
                        self.next();
                    }
                }
                _ => return Err(self.syntax_error("expected ':' after object key")),
            }

            let value = self.next_value(depth + 1)?;
            // A repeated key converts the slot into an array (accumulate).
            object.accumulate(key, value)?;

            match self.require_clean()? {
                ',' | ';' => continue,
                '}' => return Ok(JsonNode::Object(object)),
                _ => return Err(self.syntax_error("expected ',' or '}' in object")),
            }
        }
    }

    fn next_key(&mut self, depth: usize) -> Result<String, JsonError> {
        let key = self.next_value(depth + 1)?;
        Ok(match key {
            JsonNode::String(s) => s,
            other => other.to_text(0),
        })
    }

    fn parse_array(&mut self, depth: usize) -> Result<JsonNode, JsonError> {
        let mut array = JsonArray::new();
        loop {
            match self.require_clean()? {
                ']' => return Ok(JsonNode::Array(array)),
                // An empty slot between separators inserts a null.
                ',' | ';' => {
                    array.element(JsonNode::Null);
                    continue;
                }
                _ => {
                    self.back();
                    array.element(self.next_value(depth + 1)?);
                }
            }
            match self.require_clean()? {
                ',' | ';' => continue,
                ']' => return Ok(JsonNode::Array(array)),
                _ => return Err(self.syntax_error("expected ',' or ']' in array")),
            }
        }
    }

    fn next_string(&mut self, quote: char) -> Result<String, JsonError> {
        let mut result = String::new();
        loop {
            let ch = self
                .next()
                .ok_or_else(|| self.syntax_error("unterminated string"))?;
            match ch {
                '\\' => {
                    let escaped = self
                        .next()
                        .ok_or_else(|| self.syntax_error("unterminated string escape"))?;
                    match escaped {
                        'b' => result.push('\u{0008}'),
                        'f' => result.push('\u{000C}'),
                        'n' => result.push('\n'),
                        'r' => result.push('\r'),
                        't' => result.push('\t'),
                        'u' => result.push(self.next_unicode_escape()?),
                        // Tolerant: unknown escapes keep the escaped character.
                        other => result.push(other),
                    }
                }
                c if c == quote => return Ok(result),
                '\n' | '\r' => return Err(self.syntax_error("unterminated string")),
                c => result.push(c),
            }
        }
    }

    fn next_unicode_escape(&mut self) -> Result<char, JsonError> {
        let high = self.next_hex4()?;
        if (0xD800..0xDC00).contains(&high) {
            // Expect a low surrogate to complete the pair.
            if self.next() == Some('\\') && self.next() == Some('u') {
                let low = self.next_hex4()?;
                if (0xDC00..0xE000).contains(&low) {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    if let Some(c) = char::from_u32(code) {
                        return Ok(c);
                    }
                }
            }
            return Err(self.syntax_error("invalid unicode surrogate pair"));
        }
        char::from_u32(high).ok_or_else(|| self.syntax_error("invalid unicode escape"))
    }

    fn next_hex4(&mut self) -> Result<u32, JsonError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let ch = self
                .next()
                .ok_or_else(|| self.syntax_error("unterminated unicode escape"))?;
            let digit = ch
                .to_digit(16)
                .ok_or_else(|| self.syntax_error("invalid hex digit in unicode escape"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn looks_like_function(&self) -> bool {
        let keyword: Vec<char> = "function".chars().collect();
        if self.chars.len() < self.pos + keyword.len() {
            return false;
        }
        if self.chars[self.pos..self.pos + keyword.len()] != keyword[..] {
            return false;
        }
        // The keyword must be followed by '(' (whitespace allowed).
        self.chars[self.pos + keyword.len()..]
            .iter()
            .find(|c| !c.is_whitespace())
            == Some(&'(')
    }

    fn parse_function(&mut self) -> Result<JsonFunction, JsonError> {
        self.pos += "function".len();
        match self.require_clean()? {
            '(' => {}
            _ => return Err(self.syntax_error("expected '(' in function literal")),
        }

        let mut params = Vec::new();
        let mut current = String::new();
        loop {
            let ch = self
                .next()
                .ok_or_else(|| self.syntax_error("unterminated function parameter list"))?;
            match ch {
                ')' => {
                    let name = current.trim();
                    if !name.is_empty() {
                        params.push(name.to_owned());
                    }
                    break;
                }
                ',' => {
                    let name = current.trim();
                    if name.is_empty() {
                        return Err(self.syntax_error("empty function parameter"));
                    }
                    params.push(name.to_owned());
                    current.clear();
                }
                c => current.push(c),
            }
        }

        match self.require_clean()? {
            '{' => {}
            _ => return Err(self.syntax_error("expected '{' in function literal")),
        }

        // Capture the body by brace-depth counting; it must balance.
        let mut body = String::new();
        let mut braces = 1usize;
        loop {
            let ch = self
                .next()
                .ok_or_else(|| self.syntax_error("unbalanced braces in function body"))?;
            match ch {
                '{' => {
                    braces += 1;
                    body.push(ch);
                }
                '}' => {
                    braces -= 1;
                    if braces == 0 {
                        return Ok(JsonFunction::new(params, &body));
                    }
                    body.push(ch);
                }
                c => body.push(c),
            }
        }
    }

    /// Reads a bare token and interprets it as a boolean, null, number
    /// or permissive unquoted string.
    fn next_bare_token(&mut self) -> Result<JsonNode, JsonError> {
        let mut token = String::new();
        while let Some(ch) = self.next() {
            if ch.is_whitespace() || TOKEN_BREAKERS.contains(ch) {
                self.back();
                break;
            }
            token.push(ch);
        }
        if token.is_empty() {
            return Err(self.syntax_error("unexpected character"));
        }

        if token.eq_ignore_ascii_case("true") {
            return Ok(JsonNode::Bool(true));
        }
        if token.eq_ignore_ascii_case("false") {
            return Ok(JsonNode::Bool(false));
        }
        if token.eq_ignore_ascii_case("null") {
            return Ok(JsonNode::Null);
        }

        let numeric_start = token
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_digit() || "-+.".contains(first));
        if numeric_start && let Some(number) = parse_number_token(&token) {
            return Ok(JsonNode::Number(number));
        }
        // Bare identifier-like strings are accepted permissively.
        Ok(JsonNode::String(token))
    }

    fn syntax_error(&self, message: &str) -> JsonError {
        let mut line = 1;
        let mut column = 1;
        for &ch in &self.chars[..self.pos.min(self.chars.len())] {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        JsonError::Syntax {
            message: message.to_owned(),
            line,
            column,
        }
    }
}

fn parse_number_token(token: &str) -> Option<JsonNumber> {
    let unsigned = token.strip_prefix(['-', '+']).unwrap_or(token);
    if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        let magnitude = i64::from_str_radix(hex, 16).ok()?;
        let value = if token.starts_with('-') { -magnitude } else { magnitude };
        return Some(JsonNumber::Int(value));
    }
    if !token.contains(['.', 'e', 'E'])
        && let Ok(value) = token.parse::<i64>()
    {
        return Some(JsonNumber::Int(value));
    }
    let value = token.parse::<f64>().ok()?;
    if value.is_finite() {
        Some(JsonNumber::Float(value))
    } else {
        None
    }
}
