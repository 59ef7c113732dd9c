use crate::Value;

/// Largest magnitude below which an `f64` can still carry a fractional part.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

// -----------------------------------------------------------------------------
// Public API

/// Reads an integer out of a number or a numeric string.
///
/// - Numbers are truncated toward zero.
/// - Strings are parsed leniently from their leading characters: surrounding
///   whitespace and a sign are accepted, parsing stops at the first character
///   that is not a digit, and a `0x` prefix selects hexadecimal.
/// - Every other kind, `NaN`, infinities and strings without leading digits
///   yield `None`.
///
/// # Examples
///
/// ```
/// use jm_value::{Value, parse_int};
///
/// assert_eq!(parse_int(&Value::from("20.9")), Some(20.0));
/// assert_eq!(parse_int(&Value::from(" -10px")), Some(-10.0));
/// assert_eq!(parse_int(&Value::from("0x1A")), Some(26.0));
/// assert_eq!(parse_int(&Value::from(20.9)), Some(20.0));
/// assert_eq!(parse_int(&Value::from("abc")), None);
/// assert_eq!(parse_int(&Value::from(true)), None);
/// ```
pub fn parse_int(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => truncate(*n),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Reads a floating point number out of a number or a numeric string.
///
/// Strings are parsed leniently from their leading characters, including an
/// optional exponent and the `Infinity` literal. Every other kind, `NaN`, and
/// strings without a leading number yield `None`.
///
/// # Examples
///
/// ```
/// use jm_value::{Value, parse_float};
///
/// assert_eq!(parse_float(&Value::from("10.12")), Some(10.12));
/// assert_eq!(parse_float(&Value::from("-100")), Some(-100.0));
/// assert_eq!(parse_float(&Value::from("1.5e3kg")), Some(1500.0));
/// assert_eq!(parse_float(&Value::from("def")), None);
/// ```
pub fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if !n.is_nan() => Some(*n),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Internal

fn truncate(n: f64) -> Option<f64> {
    if !n.is_finite() {
        return None;
    }
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&n) {
        Some(n as i64 as f64)
    } else {
        Some(n)
    }
}

/// Splits an optional leading sign, returning `(negative, rest)`.
fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn count_digits(bytes: &[u8], radix: u32) -> usize {
    bytes
        .iter()
        .take_while(|b| char::from(**b).is_digit(radix))
        .count()
}

fn parse_int_prefix(s: &str) -> Option<f64> {
    let (negative, rest) = split_sign(s.trim_start());

    let magnitude = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(hex) => {
            let len = count_digits(hex.as_bytes(), 16);
            if len == 0 {
                return None;
            }
            hex.as_bytes()[..len].iter().fold(0.0, |acc, b| {
                acc * 16.0 + f64::from(char::from(*b).to_digit(16).unwrap_or(0))
            })
        }
        None => {
            let len = count_digits(rest.as_bytes(), 10);
            if len == 0 {
                return None;
            }
            rest[..len].parse::<f64>().ok()?
        }
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let (negative, rest) = split_sign(trimmed);

    if rest.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = rest.as_bytes();
    let int_len = count_digits(bytes, 10);
    let mut end = int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = count_digits(&bytes[end + 1..], 10);
        end += 1 + frac_len;
    }
    if int_len + frac_len == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_len = count_digits(&bytes[cursor.min(bytes.len())..], 10);
        if exp_len > 0 {
            end = cursor + exp_len;
        }
    }

    let magnitude = rest[..end].parse::<f64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// -----------------------------------------------------------------------------
// Tests
