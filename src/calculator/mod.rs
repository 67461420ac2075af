//! Calculator engine for the four-function keypad.
//!
//! This module provides:
//! - A state machine driven by keypad events (digits, operators, `=`, ...)
//! - Parsing of typed keystrokes into those events
//! - Snapshots of the state for rendering, and clipboard copy of results

mod clipboard;
mod engine;
mod error;
mod format;
mod history;
mod keys;
mod operator;
mod snapshot;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use engine::{CalculatorEngine, CalculatorState};
pub use error::CalcError;
pub use format::{format_number, parse_display};
pub use history::HistoryEntry;
pub use keys::{Key, parse_keys};
pub use operator::Operator;
pub use snapshot::CalculatorSnapshot;
