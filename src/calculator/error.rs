//! Errors reported by the calculator engine and the key parser.

use thiserror::Error;

/// Recoverable conditions surfaced to the presentation layer.
///
/// None of these leave the engine in a broken state; the caller decides how
/// (or whether) to show them to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A division whose right operand was exactly zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// A character in keystroke text that does not map to any calculator key.
    #[error("Unknown key {key:?} at position {position}")]
    UnknownKey { key: char, position: usize },

    /// Text that is not one of the four operator symbols.
    #[error("Unknown operator {0:?}")]
    UnknownOperator(String),
}
