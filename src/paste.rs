//! Parsing for pasted structured text. An ordered fallback chain with a
//! defined terminal no-op: relaxed JSON first (unquoted keys, single
//! quotes, trailing commas), then line-oriented `key = value`, then a
//! `PasteError` the caller reports as a notice while leaving the value
//! tree untouched.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::core::value::{Value, ValueMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteError {
    message: String,
}

impl PasteError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PasteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for PasteError {}

/// Parse pasted text into an object ready for the merge engine.
pub fn parse_paste(text: &str) -> Result<ValueMap, PasteError> {
    if text.trim().is_empty() {
        return Err(PasteError::new("pasted text is empty"));
    }
    if let Ok(Value::Object(map)) = parse_relaxed_value(text) {
        debug!(keys = map.len(), "paste parsed as relaxed JSON");
        return Ok(map);
    }
    if let Some(map) = parse_key_value_lines(text) {
        debug!(keys = map.len(), "paste parsed as key = value lines");
        return Ok(map);
    }
    Err(PasteError::new(
        "pasted text is neither relaxed JSON nor key = value lines",
    ))
}

// ── Relaxed JSON ──────────────────────────────────────────────────────────────

/// Parse a single relaxed-JSON value, requiring the whole input to be
/// consumed. Permits unquoted identifier keys, single-quoted strings,
/// and trailing commas in objects and arrays.
pub(crate) fn parse_relaxed_value(input: &str) -> Result<Value, PasteError> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    let value = parser.parse_value()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(PasteError::new(format!(
            "unexpected trailing input at position {}",
            parser.idx
        )));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    idx: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            idx: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.idx >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.idx += 1;
        }
        ch
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.idx += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PasteError> {
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            _ => Err(PasteError::new(format!(
                "expected '{expected}' at position {}",
                self.idx
            ))),
        }
    }

    fn parse_value(&mut self) -> Result<Value, PasteError> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_list(),
            Some('"') | Some('\'') => {
                let text = self.parse_quoted()?;
                Ok(Value::Text(text))
            }
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if ch.is_ascii_alphabetic() => self.parse_word(),
            _ => Err(PasteError::new(format!(
                "expected a value at position {}",
                self.idx
            ))),
        }
    }

    fn parse_object(&mut self) -> Result<Value, PasteError> {
        self.expect('{')?;
        let mut map = ValueMap::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.idx += 1;
                return Ok(Value::Object(map));
            }
            let key = self.parse_key()?;
            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_ws();
            match self.peek() {
                // Trailing comma before '}' is handled by the loop head.
                Some(',') => {
                    self.idx += 1;
                }
                Some('}') => {}
                _ => {
                    return Err(PasteError::new(format!(
                        "expected ',' or '}}' at position {}",
                        self.idx
                    )));
                }
            }
        }
    }

    fn parse_list(&mut self) -> Result<Value, PasteError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(']') {
                self.idx += 1;
                return Ok(Value::List(items));
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.idx += 1;
                }
                Some(']') => {}
                _ => {
                    return Err(PasteError::new(format!(
                        "expected ',' or ']' at position {}",
                        self.idx
                    )));
                }
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, PasteError> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_quoted(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let start = self.idx;
                while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                    self.idx += 1;
                }
                Ok(self.chars[start..self.idx].iter().collect())
            }
            _ => Err(PasteError::new(format!(
                "expected a key at position {}",
                self.idx
            ))),
        }
    }

    fn parse_quoted(&mut self) -> Result<String, PasteError> {
        let Some(quote) = self.bump() else {
            return Err(PasteError::new("expected a quoted string"));
        };
        let mut out = String::new();
        while let Some(ch) = self.bump() {
            if ch == quote {
                return Ok(out);
            }
            if ch == '\\' {
                let Some(next) = self.bump() else {
                    break;
                };
                match next {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    other => out.push(other),
                }
                continue;
            }
            out.push(ch);
        }
        Err(PasteError::new("unterminated string"))
    }

    fn parse_number(&mut self) -> Result<Value, PasteError> {
        let start = self.idx;
        if self.peek() == Some('-') {
            self.idx += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        {
            self.idx += 1;
        }
        let raw: String = self.chars[start..self.idx].iter().collect();
        raw.parse::<f64>()
            .map(Value::Number)
            .map_err(|_| PasteError::new(format!("invalid number '{raw}'")))
    }

    fn parse_word(&mut self) -> Result<Value, PasteError> {
        let start = self.idx;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.idx += 1;
        }
        let word: String = self.chars[start..self.idx].iter().collect();
        match word.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::None),
            _ => Err(PasteError::new(format!("unexpected word '{word}'"))),
        }
    }
}

// ── key = value lines ─────────────────────────────────────────────────────────

/// Line-oriented fallback. Every non-blank line must match
/// `identifier = value`; one bad line fails the whole format so a partial
/// paste never half-applies. Values are tried as relaxed-JSON first
/// (quoted strings and numbers behave exactly as expected, and structured
/// payloads like `[{...}]` come through as real lists), then taken as a
/// bare string.
fn parse_key_value_lines(text: &str) -> Option<ValueMap> {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    let line_re = LINE_RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+?)\s*$").expect("invalid line pattern")
    });
    let mut map = ValueMap::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let caps = line_re.captures(line)?;
        let key = caps[1].to_string();
        map.insert(key, line_value(&caps[2]));
    }
    if map.is_empty() { None } else { Some(map) }
}

fn line_value(raw: &str) -> Value {
    parse_relaxed_value(raw).unwrap_or_else(|_| Value::Text(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_paste, parse_relaxed_value};
    use crate::core::value::Value;

    #[test]
    fn relaxed_json_permits_the_relaxations() {
        let map = parse_paste("{title: 'T', count: 2, tags: ['a', 'b',],}").expect("parse");
        assert_eq!(map.get("title").and_then(Value::as_text), Some("T"));
        assert_eq!(map.get("count").and_then(Value::as_number), Some(2.0));
        let tags = map.get("tags").and_then(Value::as_list).expect("tags");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn strict_json_still_parses() {
        let map = parse_paste(r#"{"title": "T", "flag": true, "gone": null}"#).expect("parse");
        assert_eq!(map.get("flag"), Some(&Value::Bool(true)));
        assert_eq!(map.get("gone"), Some(&Value::None));
    }

    #[test]
    fn nested_structures_round_trip() {
        let map = parse_paste("{theme: {accent: '#f00'}, sections: [{heading: 'H'}]}")
            .expect("parse");
        let theme = map.get("theme").and_then(Value::as_object).expect("theme");
        assert_eq!(theme.get("accent").and_then(Value::as_text), Some("#f00"));
        let sections = map.get("sections").and_then(Value::as_list).expect("sections");
        assert_eq!(
            sections[0].get("heading").and_then(Value::as_text),
            Some("H")
        );
    }

    #[test]
    fn line_format_is_the_second_fallback() {
        let map = parse_paste("title = \"T2\"\ncount = 3\nslug = hello-world\n").expect("parse");
        assert_eq!(map.get("title").and_then(Value::as_text), Some("T2"));
        assert_eq!(map.get("count").and_then(Value::as_number), Some(3.0));
        // Not quoted, not numeric: a bare string.
        assert_eq!(map.get("slug").and_then(Value::as_text), Some("hello-world"));
    }

    #[test]
    fn line_values_accept_structured_payloads() {
        let map = parse_paste("sections = [{\"heading\":\"H2\",\"body\":\"B2\"}]").expect("parse");
        let sections = map.get("sections").and_then(Value::as_list).expect("sections");
        assert_eq!(
            sections[0].get("heading").and_then(Value::as_text),
            Some("H2")
        );
    }

    #[test]
    fn one_bad_line_fails_the_whole_line_format() {
        assert!(parse_paste("title = T\nnot a pair at all\n").is_err());
    }

    #[test]
    fn garbage_is_an_inert_error() {
        assert!(parse_paste("<html>nope</html>").is_err());
        assert!(parse_paste("   ").is_err());
        // A top-level non-object is not mergeable.
        assert!(parse_paste("[1, 2, 3]").is_err());
    }

    #[test]
    fn blank_lines_are_skipped_in_line_format() {
        let map = parse_paste("\ntitle = \"T\"\n\ncount = 1\n").expect("parse");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn relaxed_value_rejects_trailing_garbage() {
        assert!(parse_relaxed_value("{a: 1} extra").is_err());
        assert!(parse_relaxed_value("'unterminated").is_err());
    }

    #[test]
    fn numbers_parse_with_signs_and_exponents() {
        assert_eq!(
            parse_relaxed_value("-2.5e2").expect("number"),
            Value::Number(-250.0)
        );
    }
}
