//! Keystroke parsing for the calculator.
//!
//! Turns typed text such as `"12 + 3.5 = "` into the key events the keypad
//! would produce, so a terminal can drive the engine the same way buttons do.

use lazy_static::lazy_static;
use regex::Regex;

use super::{CalcError, Operator};

lazy_static! {
    /// Splits keystroke text into single digits, whitespace, and single symbols.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?P<digit>[0-9])|(?P<space>\s+)|(?P<symbol>.)"
    ).unwrap();
}

/// One keypad event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A digit. [`CalculatorEngine::input_digit`](super::CalculatorEngine::input_digit)
    /// also accepts runs when driven directly.
    Digit(String),
    /// `.`
    DecimalPoint,
    /// `+ - × ÷`
    Operator(Operator),
    /// `=`
    Equals,
    /// `C`
    Clear,
    /// `±`
    ToggleSign,
    /// `%`
    Percent,
}

impl Key {
    /// Map a single non-digit keypad character to a key.
    pub fn from_symbol(c: char) -> Option<Self> {
        if let Some(op) = Operator::from_char(c) {
            return Some(Self::Operator(op));
        }
        match c {
            '.' => Some(Self::DecimalPoint),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            '±' | 'n' | 'N' => Some(Self::ToggleSign),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }
}

/// Parse keystroke text into key events.
///
/// Every digit becomes its own [`Key::Digit`], exactly as pressing the keys
/// one at a time would; whitespace is ignored. The reported position of an
/// unknown key is its byte offset in `input`.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, CalcError> {
    let mut keys = Vec::new();

    for caps in KEY_TOKEN.captures_iter(input) {
        if let Some(digit) = caps.name("digit") {
            keys.push(Key::Digit(digit.as_str().to_string()));
        } else if let Some(symbol) = caps.name("symbol") {
            let c = symbol.as_str().chars().next().unwrap_or_default();
            let key = Key::from_symbol(c).ok_or(CalcError::UnknownKey {
                key: c,
                position: symbol.start(),
            })?;
            keys.push(key);
        }
    }

    Ok(keys)
}
