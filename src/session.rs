//! Drives a calculator from lines of typed keystrokes.

use tracing::{debug, warn};

use crate::calculator::{
    CalcError, CalculatorEngine, CalculatorSnapshot, Key, copy_to_clipboard, parse_keys,
};
use crate::config::Config;

/// A calculator plus the presentation settings it is shown with.
pub struct Session {
    engine: CalculatorEngine,
    copy_on_evaluate: bool,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: CalculatorEngine::new(),
            copy_on_evaluate: config.clipboard.copy_on_evaluate,
        }
    }

    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Feed one line of keystrokes and return what should be shown.
    ///
    /// Unknown keys reject the whole line before any key is applied.
    /// Calculation errors do not stop the line; the last one is attached to
    /// the returned snapshot.
    pub fn feed(&mut self, line: &str) -> Result<CalculatorSnapshot, CalcError> {
        let keys = parse_keys(line)?;
        debug!(count = keys.len(), "Feeding keys");

        let mut last_error = None;
        for key in &keys {
            match self.engine.press(key) {
                Ok(()) => {
                    if *key == Key::Equals && self.copy_on_evaluate {
                        self.copy_display();
                    }
                }
                Err(e) => last_error = Some(e),
            }
        }

        let snapshot = self.engine.snapshot();
        Ok(match last_error {
            Some(e) => snapshot.with_error(e),
            None => snapshot,
        })
    }

    /// Copy the current display to the clipboard, logging failures.
    pub fn copy_display(&self) {
        if let Err(e) = copy_to_clipboard(self.engine.display()) {
            warn!("{}", e);
        }
    }
}
