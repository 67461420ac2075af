//! The four binary operators understood by the calculator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CalcError;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol shown on the keypad and in previews.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Map a single keypad character to an operator.
    ///
    /// Accepts both the typographic symbols and their ASCII stand-ins.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' | 'x' | 'X' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Apply the operator to `a` and `b`.
    ///
    /// Division by exactly zero is refused; callers recover with `a`.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(a / b),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| CalcError::UnknownOperator(trimmed.to_string()))
            }
            _ => Err(CalcError::UnknownOperator(trimmed.to_string())),
        }
    }
}
