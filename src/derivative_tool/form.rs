//! The single-field form the expression arrives through.
//!
//! Bodies are `application/x-www-form-urlencoded`: `expression=2x%5E2+%2B+1`.
//! Fields other than `expression` are ignored.

use std::fmt;

/// name of the only form field
pub const EXPRESSION_FIELD: &str = "expression";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// the body has no `expression` field
    MissingField,
    /// a `%` escape that is not two hex digits or does not decode to UTF-8
    InvalidEncoding(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormError::MissingField => write!(f, "Form has no '{}' field", EXPRESSION_FIELD),
            FormError::InvalidEncoding(part) => write!(f, "Invalid form encoding: '{}'", part),
        }
    }
}

impl std::error::Error for FormError {}

/// Raw text of the `expression` field, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub expression: String,
}

impl FormSubmission {
    pub fn new(expression: &str) -> Self {
        FormSubmission {
            expression: expression.to_string(),
        }
    }

    /// Reads the `expression` field from an urlencoded body; the first occurrence wins.
    pub fn from_urlencoded(body: &str) -> Result<Self, FormError> {
        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if decode_component(key)? == EXPRESSION_FIELD {
                return Ok(FormSubmission {
                    expression: decode_component(value)?,
                });
            }
        }
        Err(FormError::MissingField)
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// `+` is a space, `%XX` a byte
fn decode_component(part: &str) -> Result<String, FormError> {
    let bytes = part.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let high = bytes.get(i + 1).copied().and_then(hex_value);
                let low = bytes.get(i + 2).copied().and_then(hex_value);
                match (high, low) {
                    (Some(high), Some(low)) => decoded.push(high * 16 + low),
                    _ => return Err(FormError::InvalidEncoding(part.to_string())),
                }
                i += 2;
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }
    String::from_utf8(decoded).map_err(|_| FormError::InvalidEncoding(part.to_string()))
}
