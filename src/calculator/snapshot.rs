//! A point-in-time view of the calculator for rendering.

use serde::Serialize;

use super::{CalculatorEngine, HistoryEntry, Operator};

/// What the presentation layer shows after a key press.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculatorSnapshot {
    /// Current display text.
    pub display: String,
    /// Pending operation, e.g. `"8 ×"`.
    pub preview: Option<String>,
    /// Operator key to highlight.
    pub active_operator: Option<Operator>,
    /// Completed calculations, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Message for the last reported error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculatorSnapshot {
    pub fn capture(engine: &CalculatorEngine) -> Self {
        Self {
            display: engine.display().to_string(),
            preview: engine.preview(),
            active_operator: engine.active_operator(),
            history: engine.history().to_vec(),
            error: None,
        }
    }

    /// Attach an error message to show alongside the display.
    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Keep only the most recent `limit` history entries.
    pub fn truncate_history(mut self, limit: usize) -> Self {
        let excess = self.history.len().saturating_sub(limit);
        self.history.drain(..excess);
        self
    }

    /// Text to put on the clipboard: the display, unless it shows an error.
    pub fn text_for_clipboard(&self) -> Option<&str> {
        match self.error {
            Some(_) => None,
            None => Some(&self.display),
        }
    }
}
