//! Default values from initializer expressions.
//!
//! Only literal syntax is understood: numbers, strings, `true`/`false`,
//! `null`, `undefined` and (nested) array literals of those. Nothing is
//! executed, so an initializer from untrusted source can at worst be rejected.
//! Templates without substitutions are kept as their raw source text.
use serde_json::{Number, Value};

use crate::program::{Initializer, InitializerKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    #[error("unsupported initializer: {0}")]
    Unsupported(String),
    #[error("malformed literal at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
}

/// Resolve an initializer. `Ok(None)` means "no default" without complaint
/// (`undefined`).
pub fn evaluate(init: &Initializer) -> Result<Option<Value>, LiteralError> {
    match init.kind {
        InitializerKind::Template => Ok(Some(Value::String(init.text.clone()))),
        InitializerKind::Expression => Err(LiteralError::Unsupported(init.text.trim().to_string())),
        InitializerKind::Literal => evaluate_text(&init.text),
    }
}

/// Parse literal source text.
pub fn evaluate_text(text: &str) -> Result<Option<Value>, LiteralError> {
    let mut p = Parser { src: text, pos: 0 };
    p.skip_trivia();
    let value = p.value()?;
    p.skip_trivia();
    if p.pos < p.src.len() {
        return Err(p.unsupported());
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str { &self.src[self.pos..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn syntax(&self, message: impl Into<String>) -> LiteralError {
        LiteralError::Syntax { offset: self.pos, message: message.into() }
    }

    fn unsupported(&self) -> LiteralError {
        LiteralError::Unsupported(self.src.trim().to_string())
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if trimmed.starts_with("/*") {
                match trimmed[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => self.pos = self.src.len(),
                }
            } else {
                break;
            }
        }
    }

    fn value(&mut self) -> Result<Option<Value>, LiteralError> {
        match self.peek() {
            None => Err(self.syntax("expected a value")),
            Some('(') => {
                self.bump();
                self.skip_trivia();
                let v = self.value()?;
                self.skip_trivia();
                if !self.eat(')') {
                    return Err(self.syntax("expected `)`"));
                }
                Ok(v)
            }
            Some('[') => self.array().map(Some),
            Some(q @ ('"' | '\'')) => self.string(q).map(|s| Some(Value::String(s))),
            Some('-' | '+') => {
                let negative = self.bump() == Some('-');
                self.skip_trivia();
                match self.peek() {
                    Some(c) if c.is_ascii_digit() || c == '.' => {
                        let n = self.number()?;
                        Ok(Some(if negative { negate(n)? } else { n }))
                    }
                    _ => Err(self.unsupported()),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number().map(Some),
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
                let word = self.word();
                match word {
                    "true" => Ok(Some(Value::Bool(true))),
                    "false" => Ok(Some(Value::Bool(false))),
                    "null" => Ok(Some(Value::Null)),
                    "undefined" => Ok(None),
                    _ => Err(self.unsupported()),
                }
            }
            Some(_) => Err(self.unsupported()),
        }
    }

    fn word(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '$') {
            self.bump();
        }
        &src[start..self.pos]
    }

    fn array(&mut self) -> Result<Value, LiteralError> {
        self.bump(); // [
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.eat(']') {
                return Ok(Value::Array(items));
            }
            if self.peek() == Some(',') {
                return Err(self.unsupported()); // holes
            }
            // `undefined` inside an array serializes as null
            items.push(self.value()?.unwrap_or(Value::Null));
            self.skip_trivia();
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                return Ok(Value::Array(items));
            }
            return Err(self.syntax("expected `,` or `]`"));
        }
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.bump();
        let mut out = String::new();
        loop {
            let c = self.bump().ok_or_else(|| self.syntax("unterminated string"))?;
            match c {
                c if c == quote => return Ok(out),
                '\n' => return Err(self.syntax("newline in string")),
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let c = self.bump().ok_or_else(|| self.syntax("unterminated escape"))?;
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\n' => {} // line continuation
            'x' => {
                let code = self.hex_digits(2)?;
                out.push(char::from_u32(code).ok_or_else(|| self.syntax("bad \\x escape"))?);
            }
            'u' => {
                let code = if self.eat('{') {
                    let src = self.src;
                    let start = self.pos;
                    while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                        self.bump();
                    }
                    let digits = &src[start..self.pos];
                    if !self.eat('}') {
                        return Err(self.syntax("expected `}`"));
                    }
                    u32::from_str_radix(digits, 16).map_err(|_| self.syntax("bad \\u escape"))?
                } else {
                    let hi = self.hex_digits(4)?;
                    if (0xD800..0xDC00).contains(&hi) && self.rest().starts_with("\\u") {
                        self.pos += 2;
                        let lo = self.hex_digits(4)?;
                        0x10000 + ((hi - 0xD800) << 10) + (lo.wrapping_sub(0xDC00) & 0x3FF)
                    } else {
                        hi
                    }
                };
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn hex_digits(&mut self, n: usize) -> Result<u32, LiteralError> {
        let digits = self.rest().get(..n).ok_or_else(|| self.syntax("truncated escape"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| self.syntax("bad hex digits"))?;
        self.pos += n;
        Ok(code)
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let radix = match self.rest().get(..2) {
            Some("0x" | "0X") => 16,
            Some("0o" | "0O") => 8,
            Some("0b" | "0B") => 2,
            _ => 10,
        };
        if radix != 10 {
            self.pos += 2;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
            let digits: String = self.src[digits_start..self.pos].chars().filter(|c| *c != '_').collect();
            let n = u64::from_str_radix(&digits, radix).map_err(|_| self.syntax("bad integer literal"))?;
            self.reject_trailing_ident()?;
            return Ok(Value::from(n));
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
            self.bump();
        }
        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        self.reject_trailing_ident()?;

        let text: String = self.src[start..self.pos].chars().filter(|c| *c != '_').collect();
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Value::from(i));
            }
        }
        let f: f64 = text.parse().map_err(|_| self.syntax(format!("bad number `{text}`")))?;
        Number::from_f64(f).map(Value::Number).ok_or_else(|| self.unsupported())
    }

    fn reject_trailing_ident(&self) -> Result<(), LiteralError> {
        match self.peek() {
            // `10n` bigints, `1.toFixed`, ...
            Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => Err(self.unsupported()),
            _ => Ok(()),
        }
    }
}

fn negate(v: Value) -> Result<Value, LiteralError> {
    let n = match &v {
        Value::Number(n) => n,
        _ => return Ok(v),
    };
    if let Some(i) = n.as_i64() {
        if let Some(neg) = i.checked_neg() {
            return Ok(Value::from(neg));
        }
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    Number::from_f64(-f)
        .map(Value::Number)
        .ok_or_else(|| LiteralError::Unsupported(format!("-{n}")))
}

// ------------------------------- Tests ------------------------------------ //
