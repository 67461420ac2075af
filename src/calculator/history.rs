//! Completed calculations.

use serde::Serialize;
use std::fmt;

use super::Operator;
use super::format::format_number;

/// One completed `=` calculation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub left: f64,
    pub operator: Operator,
    pub right: f64,
    pub result: f64,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            format_number(self.left),
            self.operator,
            format_number(self.right),
            format_number(self.result)
        )
    }
}
