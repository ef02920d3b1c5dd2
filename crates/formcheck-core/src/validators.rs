// File: src/validators.rs
// Purpose: Value predicates behind each validator kind

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RuleError;

// `\d` is Unicode-aware in the regex crate, browsers treat it as ASCII.
static DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("digits regex is valid"));

static LETTERS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("letters regex is valid"));

/// Value made only of ASCII digits
pub fn is_number(value: &str) -> bool {
    DIGITS_REGEX.is_match(value)
}

/// Value made only of ASCII letters, either case
pub fn is_letters(value: &str) -> bool {
    LETTERS_REGEX.is_match(value)
}

/// Strictly greater than the lower bound
pub fn exceeds_min(value: f64, min: f64) -> bool {
    value > min
}

/// Strictly less than the upper bound
pub fn below_max(value: f64, max: f64) -> bool {
    value < max
}

/// Unanchored search, the way `RegExp.prototype.test` behaves
pub fn matches_pattern(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

/// Compile a `data-validator-pattern` with browser (non-`u` flag) semantics
/// for the Perl classes.
pub fn compile_pattern(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(&ascii_perl_classes(pattern)).map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Rewrite `\d`, `\D`, `\w`, `\W` and `\b` to their ASCII forms. `\s` stays
/// Unicode-aware, as it is in JavaScript.
fn ascii_perl_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push(c);
                    break;
                };
                let replacement = match (in_class, escaped) {
                    (false, 'd') => Some("[0-9]"),
                    (false, 'D') => Some("[^0-9]"),
                    (false, 'w') => Some("[0-9A-Za-z_]"),
                    (false, 'W') => Some("[^0-9A-Za-z_]"),
                    (false, 'b') => Some("(?-u:\\b)"),
                    (true, 'd') => Some("[:digit:]"),
                    (true, 'D') => Some("[:^digit:]"),
                    (true, 'w') => Some("[:word:]"),
                    (true, 'W') => Some("[:^word:]"),
                    _ => None,
                };
                match replacement {
                    Some(ascii) => out.push_str(ascii),
                    None => {
                        out.push(c);
                        out.push(escaped);
                    }
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Parse a `min`/`max` attribute the way JavaScript's `Number()` would.
///
/// An absent or empty attribute imposes no bound. A non-numeric one becomes
/// NaN, which no value compares above or below, so the field always fails.
pub fn parse_bound(name: &'static str, raw: Option<&str>) -> Option<f64> {
    let raw = raw.filter(|raw| !raw.is_empty())?;
    let bound = js_number(raw);
    if bound.is_nan() {
        tracing::warn!(attribute = name, value = raw, "non-numeric bound, no value can satisfy it");
    }
    Some(bound)
}

fn js_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            if digits.is_empty() {
                return f64::NAN;
            }
            return digits
                .chars()
                .try_fold(0.0, |acc, c| {
                    c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
                })
                .unwrap_or(f64::NAN);
        }
    }

    // Rust also accepts `inf`, `infinity` and `nan`; `Number()` does not.
    if text.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}
