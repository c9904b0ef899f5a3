//! Boundary coercion of form-style numeric fields.
//!
//! Anything missing or unparseable becomes zero so the engine only ever sees
//! finite numbers.

use serde::Deserialize;

/// Horizons saturate here; longer plans add rows but no information.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// A numeric field as it arrives from a form: either a JSON number or the raw
/// text typed into an input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    /// Leading-prefix float parse, `"12.5abc"` reads as `12.5`.
    pub fn to_f64(&self) -> f64 {
        let value = match self {
            FormValue::Number(v) => Some(*v),
            FormValue::Text(text) => float_prefix(text),
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Leading-prefix integer parse, `"10.9"` reads as `10`.
    pub fn to_i64(&self) -> i64 {
        match self {
            FormValue::Number(v) if v.is_finite() => v.trunc() as i64,
            FormValue::Number(_) => 0,
            FormValue::Text(text) => int_prefix(text).unwrap_or(0),
        }
    }
}

/// Any real value: rates, percentages, step-ups.
pub fn number(field: &Option<FormValue>) -> f64 {
    field.as_ref().map_or(0.0, FormValue::to_f64)
}

/// Money amounts, clamped at zero.
pub fn amount(field: &Option<FormValue>) -> f64 {
    number(field).max(0.0)
}

/// Horizons in whole years, saturating into `0..=MAX_HORIZON_YEARS`.
pub fn years(field: &Option<FormValue>) -> u32 {
    let raw = field.as_ref().map_or(0, FormValue::to_i64);
    raw.clamp(0, i64::from(MAX_HORIZON_YEARS)) as u32
}

fn float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        end = skip_digits(bytes, frac_start);
        mantissa_digits += end - frac_start;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }

    let magnitude = bytes[start..end].iter().fold(0i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn skip_digits(bytes: &[u8], mut idx: usize) -> usize {
    while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
        idx += 1;
    }
    idx
}
