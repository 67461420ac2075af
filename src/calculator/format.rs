//! Conversion between display text and numeric values.
//!
//! Numbers are rendered in their shortest round-trip decimal form with no
//! precision cap and no thousand separators, so binary floating-point
//! artifacts (`0.1 + 0.2`) show up exactly as computed.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

/// Magnitude at or above which exponent notation is used.
const EXPONENT_ABOVE: f64 = 1e21;

/// Magnitude below which exponent notation is used.
const EXPONENT_BELOW: f64 = 1e-6;

lazy_static! {
    /// The longest leading part of display text that reads as a number.
    static ref NUMERIC_PREFIX: Regex = Regex::new(
        r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)"
    ).unwrap();
}

/// Format a value for the calculator display.
///
/// - `-0` renders as `"0"`
/// - very large or very small magnitudes use `1e+21` / `1.5e-7` notation
/// - non-finite values render as `Infinity`, `-Infinity` or `NaN`
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (EXPONENT_BELOW..EXPONENT_ABOVE).contains(&magnitude) {
        format!("{}", value)
    } else {
        format_exponent(value)
    }
}

/// Exponent notation with an explicit sign on positive exponents.
fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Parse display text back into a number.
///
/// Reads the longest numeric prefix, so keys typed after an exponent or
/// `Infinity` (`"1e-8."`, `"Infinity5"`) leave the value unchanged.
/// `"NaN"` and text with no numeric prefix are `NaN`.
pub fn parse_display(text: &str) -> f64 {
    let Some(prefix) = NUMERIC_PREFIX.find(text) else {
        if text != "NaN" {
            warn!(text, "Display text is not a number");
        }
        return f64::NAN;
    };
    match prefix.as_str().parse::<f64>() {
        Ok(value) => value,
        Err(e) => {
            warn!(text, error = %e, "Display text is not a number");
            f64::NAN
        }
    }
}
