//! Calculator rendering for the terminal.
//!
//! Lays the snapshot out like the keypad's display panel:
//! - The pending operation as a small line above the number
//! - The number itself, right-aligned
//! - An error line when the last key press failed
//! - Optionally, the most recent completed calculations

use crate::calculator::CalculatorSnapshot;
use crate::config::DisplayConfig;

/// Width of the display panel in characters.
const PANEL_WIDTH: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_history: bool,
    pub history_limit: usize,
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for RenderOptions {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            show_history: config.show_history,
            history_limit: config.history_limit,
            width: PANEL_WIDTH,
        }
    }
}

/// Render a snapshot as lines of text.
pub fn render_calculator(snapshot: &CalculatorSnapshot, options: &RenderOptions) -> String {
    let width = options.width;
    let mut lines = Vec::new();

    lines.push(format!(
        "{:>width$}",
        snapshot.preview.as_deref().unwrap_or("")
    ));
    lines.push(format!("{:>width$}", snapshot.display));

    if let Some(ref error) = snapshot.error {
        lines.push(format!("Error: {}", error));
    }

    if options.show_history && options.history_limit > 0 && !snapshot.history.is_empty() {
        lines.push("History:".to_string());
        let skip = snapshot.history.len().saturating_sub(options.history_limit);
        lines.extend(
            snapshot
                .history
                .iter()
                .skip(skip)
                .map(|entry| format!("  {}", entry)),
        );
    }

    lines.join("\n")
}
