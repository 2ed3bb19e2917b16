//! Character-class check applied to raw form input before it is treated as an expression.

use log::warn;
use regex::Regex;
use std::sync::LazyLock;

/// message shown when the input contains anything but digits, `x`, operators, brackets and spaces
pub const VALIDATION_MESSAGE: &str = "The function must depend on the variable x only";

static ALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9xX+\-*/^()\s]+$").expect("allowed-character pattern is a valid regex")
});

/// Outcome of [`validate`]; `message` is empty when `ok` is true
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub ok: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn accepted() -> Self {
        ValidationResult {
            ok: true,
            message: String::new(),
        }
    }

    pub fn rejected() -> Self {
        ValidationResult {
            ok: false,
            message: VALIDATION_MESSAGE.to_string(),
        }
    }
}

/// Accepts the text when every character is in `[0-9 x X + - * / ^ ( ) whitespace]`.
/// The empty string is rejected.
pub fn validate(raw: &str) -> ValidationResult {
    if ALLOWED.is_match(raw) {
        ValidationResult::accepted()
    } else {
        warn!("rejected input {:?}", raw);
        ValidationResult::rejected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALLOWED_CHARS: &str = "0123456789xX+-*/^() \t\n";

    fn allowed_text(min_len: usize) -> impl Strategy<Value = String> {
        let chars: Vec<char> = ALLOWED_CHARS.chars().collect();
        proptest::collection::vec(proptest::sample::select(chars), min_len..=40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    fn outside_char() -> impl Strategy<Value = char> {
        any::<char>().prop_filter("character outside the allowed class", |c| {
            !ALLOWED_CHARS.contains(*c) && !c.is_whitespace()
        })
    }

    proptest! {
        #[test]
        fn allowed_text_is_accepted(raw in allowed_text(1)) {
            let result = validate(&raw);
            prop_assert!(result.ok, "{:?} should be accepted", raw);
            prop_assert!(result.message.is_empty());
        }

        #[test]
        fn one_outside_character_is_rejected(
            prefix in allowed_text(0),
            c in outside_char(),
            suffix in allowed_text(0),
        ) {
            let raw = format!("{}{}{}", prefix, c, suffix);
            let result = validate(&raw);
            prop_assert!(!result.ok, "{:?} should be rejected", raw);
            prop_assert_eq!(result.message, VALIDATION_MESSAGE);
        }
    }

    #[test]
    fn test_accepts_allowed_characters() {
        for raw in ["x", "X", "2x^2 + 1", "(x+1)*(x-1)", "x / 2 - 3", "  x\t^ 3\n", "42", "+-*/^()"] {
            let result = validate(raw);
            assert!(result.ok, "{:?} should be accepted", raw);
            assert!(result.message.is_empty());
        }
    }

    #[test]
    fn test_rejects_other_characters() {
        for raw in ["sin(x)", "y", "x, 2", "2.5x", "exp(x)", "x²", "x=1", "pi"] {
            let result = validate(raw);
            assert!(!result.ok, "{:?} should be rejected", raw);
            assert_eq!(result.message, VALIDATION_MESSAGE);
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate(""), ValidationResult::rejected());
    }

    #[test]
    fn test_accepts_whitespace_only() {
        // the class allows whitespace; the resolver then fails to parse it
        assert!(validate("   ").ok);
    }
}
