//! The calculator state machine.
//!
//! Digits accumulate in a display string; an operator stages the displayed
//! value as the left operand; `=` commits the pending operation into the
//! history. Pressing a second operator before `=` resolves the pending
//! operation first, so chains evaluate left to right.

use serde::Serialize;
use tracing::{debug, warn};

use super::format::{format_number, parse_display};
use super::{CalcError, CalculatorSnapshot, HistoryEntry, Key, Operator};

/// Everything the calculator remembers between key presses.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculatorState {
    /// The number being entered or shown. Never empty; zero is `"0"`.
    pub display_text: String,
    /// Left operand of the operation in progress.
    pub pending_operand: Option<f64>,
    /// Operator awaiting its right operand.
    pub pending_operator: Option<Operator>,
    /// The next digit starts a new number instead of extending the display.
    pub awaiting_fresh_input: bool,
    /// Completed calculations, oldest first.
    pub history: Vec<HistoryEntry>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display_text: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_fresh_input: false,
            history: Vec::new(),
        }
    }
}

/// Owns a [`CalculatorState`] and mutates it in response to key presses.
#[derive(Clone, Debug, Default)]
pub struct CalculatorEngine {
    state: CalculatorState,
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the display and any pending operation. History is kept.
    pub fn clear(&mut self) {
        self.state.display_text = "0".to_string();
        self.state.pending_operand = None;
        self.state.pending_operator = None;
        self.state.awaiting_fresh_input = false;
        debug!("Calculator cleared");
    }

    /// Enter one digit or a run of digits.
    ///
    /// Starts a new number when fresh input is expected, replaces a lone
    /// `"0"`, and appends otherwise. A run that replaces the display loses
    /// its leading zeros, so `"007"` shows `7` just as three separate key
    /// presses would. Characters other than ASCII digits are dropped.
    pub fn input_digit(&mut self, digits: &str) {
        let filtered: String = digits.chars().filter(char::is_ascii_digit).collect();
        if filtered.len() != digits.len() {
            warn!(digits, "Ignoring non-digit characters");
        }
        if filtered.is_empty() {
            return;
        }

        let state = &mut self.state;
        if state.awaiting_fresh_input || state.display_text == "0" {
            state.display_text = without_leading_zeros(&filtered);
            state.awaiting_fresh_input = false;
        } else {
            state.display_text.push_str(&filtered);
        }
        debug!(display = %state.display_text, "Digit input");
    }

    /// Enter a decimal point. A second point in the same number is ignored.
    pub fn input_decimal_point(&mut self) {
        let state = &mut self.state;
        if state.awaiting_fresh_input {
            state.display_text = "0.".to_string();
            state.awaiting_fresh_input = false;
        } else if !state.display_text.contains('.') {
            state.display_text.push('.');
        }
        debug!(display = %state.display_text, "Decimal point input");
    }

    /// Stage `op` as the pending operator.
    ///
    /// The first operator stages the displayed value as the left operand. A
    /// further operator before `=` resolves the pending operation and uses
    /// its result as the new left operand.
    ///
    /// A chained division by zero still stages `op` (keeping the left
    /// operand) and then reports [`CalcError::DivisionByZero`].
    pub fn set_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        let input_value = parse_display(&self.state.display_text);
        let mut outcome = Ok(());

        let state = &mut self.state;
        match (state.pending_operand, state.pending_operator) {
            (None, _) => state.pending_operand = Some(input_value),
            (Some(left), Some(pending)) => {
                let value = match pending.apply(left, input_value) {
                    Ok(value) => value,
                    Err(e) => {
                        warn!(left, right = input_value, "Chained {}", e);
                        outcome = Err(e);
                        left
                    }
                };
                state.display_text = format_number(value);
                state.pending_operand = Some(value);
            }
            (Some(_), None) => {}
        }

        state.pending_operator = Some(op);
        state.awaiting_fresh_input = true;
        debug!(operator = %op, preview = ?self.preview(), "Operator set");
        outcome
    }

    /// Commit the pending operation (`=`).
    ///
    /// Appends the calculation to the history and shows its result. Does
    /// nothing when no operation is pending. On division by zero the left
    /// operand is shown, the pending operation is kept for a new right
    /// operand, and nothing is recorded.
    pub fn evaluate(&mut self) -> Result<(), CalcError> {
        let state = &mut self.state;
        let (Some(left), Some(operator)) = (state.pending_operand, state.pending_operator) else {
            return Ok(());
        };
        let right = parse_display(&state.display_text);

        match operator.apply(left, right) {
            Ok(result) => {
                let entry = HistoryEntry {
                    left,
                    operator,
                    right,
                    result,
                };
                debug!(%entry, "Evaluated");
                state.history.push(entry);
                state.display_text = format_number(result);
                state.pending_operand = None;
                state.pending_operator = None;
                state.awaiting_fresh_input = true;
                Ok(())
            }
            Err(e) => {
                warn!(left, right, "{}", e);
                state.display_text = format_number(left);
                state.awaiting_fresh_input = true;
                Err(e)
            }
        }
    }

    /// Flip the sign of the display. `"0"` is left alone.
    pub fn toggle_sign(&mut self) {
        let text = &mut self.state.display_text;
        if text.as_str() == "0" {
            return;
        }
        if text.starts_with('-') {
            text.remove(0);
        } else {
            text.insert(0, '-');
        }
        debug!(display = %text, "Sign toggled");
    }

    /// Divide the displayed value by 100.
    pub fn percentage(&mut self) {
        let value = parse_display(&self.state.display_text);
        self.state.display_text = format_number(value / 100.0);
        debug!(display = %self.state.display_text, "Percentage applied");
    }

    /// Dispatch a single key event.
    pub fn press(&mut self, key: &Key) -> Result<(), CalcError> {
        match key {
            Key::Digit(digits) => self.input_digit(digits),
            Key::DecimalPoint => self.input_decimal_point(),
            Key::Operator(op) => return self.set_operator(*op),
            Key::Equals => return self.evaluate(),
            Key::Clear => self.clear(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.percentage(),
        }
        Ok(())
    }

    pub fn display(&self) -> &str {
        &self.state.display_text
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.state.pending_operand
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.state.pending_operator
    }

    pub fn is_awaiting_fresh_input(&self) -> bool {
        self.state.awaiting_fresh_input
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Pending operation as `"<operand> <operator>"`, if one is staged.
    pub fn preview(&self) -> Option<String> {
        match (self.state.pending_operand, self.state.pending_operator) {
            (Some(left), Some(op)) => Some(format!("{} {}", format_number(left), op)),
            _ => None,
        }
    }

    /// The operator key that should appear highlighted.
    pub fn active_operator(&self) -> Option<Operator> {
        self.state.pending_operator
    }

    /// Capture everything the presentation layer renders.
    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot::capture(self)
    }
}

/// Strip leading zeros from a digit run, keeping a single `"0"` for all-zero runs.
fn without_leading_zeros(digits: &str) -> String {
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        rest => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::parse_keys;

    /// Feed keystroke text, collecting every error raised along the way.
    fn run(engine: &mut CalculatorEngine, keys: &str) -> Vec<CalcError> {
        parse_keys(keys)
            .unwrap_or_else(|e| panic!("{keys:?} is not valid keystroke text: {e}"))
            .iter()
            .filter_map(|key| engine.press(key).err())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.pending_operand(), None);
        assert_eq!(engine.pending_operator(), None);
        assert!(!engine.is_awaiting_fresh_input());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_digits_replace_leading_zero() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit("0");
        assert_eq!(engine.display(), "0");
        engine.input_digit("7");
        assert_eq!(engine.display(), "7");
        engine.input_digit("42");
        assert_eq!(engine.display(), "742");
    }

    #[test]
    fn test_digit_run_drops_leading_zeros() {
        let mut typed = CalculatorEngine::new();
        run(&mut typed, "007");
        let mut pressed = CalculatorEngine::new();
        run(&mut pressed, "0 0 7");
        assert_eq!(typed.display(), "7");
        assert_eq!(pressed.display(), "7");

        let mut engine = CalculatorEngine::new();
        engine.input_digit("0042");
        assert_eq!(engine.display(), "42");
        engine.input_digit("007");
        assert_eq!(engine.display(), "42007");
        engine.set_operator(Operator::Add).unwrap();
        engine.input_digit("000");
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_decimal_point_after_exponent_display() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "1%%%%");
        assert_eq!(engine.display(), "1e-8");

        assert!(run(&mut engine, ".+1=").is_empty());
        assert_eq!(engine.display(), "1.00000001");
        assert_eq!(engine.history()[0].left, 1e-8);
    }

    #[test]
    fn test_non_digit_characters_dropped() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit("1a2");
        assert_eq!(engine.display(), "12");
        engine.input_digit("x");
        assert_eq!(engine.display(), "12");
    }

    #[test]
    fn test_decimal_point_once() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit("3");
        engine.input_decimal_point();
        engine.input_digit("1");
        engine.input_decimal_point();
        engine.input_digit("4");
        assert_eq!(engine.display(), "3.14");
    }

    #[test]
    fn test_decimal_point_on_zero_appends() {
        let mut engine = CalculatorEngine::new();
        engine.input_decimal_point();
        engine.input_digit("5");
        assert_eq!(engine.display(), "0.5");
    }

    #[test]
    fn test_decimal_point_starts_fresh_number() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "2.5+.");
        assert_eq!(engine.display(), "0.");
        assert!(!engine.is_awaiting_fresh_input());
    }

    #[test]
    fn test_at_most_one_decimal_point_for_all_sequences() {
        const ALPHABET: [&str; 3] = ["1", "0", "."];
        let length = 6;
        let combinations = ALPHABET.len().pow(length);

        for mut code in 0..combinations {
            let mut engine = CalculatorEngine::new();
            engine.clear();
            let mut sequence = String::new();
            for _ in 0..length {
                let symbol = ALPHABET[code % ALPHABET.len()];
                code /= ALPHABET.len();
                sequence.push_str(symbol);
                if symbol == "." {
                    engine.input_decimal_point();
                } else {
                    engine.input_digit(symbol);
                }
            }
            let points = engine.display().matches('.').count();
            assert!(points <= 1, "{sequence} produced {}", engine.display());
            assert!(!engine.display().is_empty());
        }
    }

    #[test]
    fn test_simple_addition() {
        let mut engine = CalculatorEngine::new();
        assert!(run(&mut engine, "12+30=").is_empty());
        assert_eq!(engine.display(), "42");
        assert_eq!(
            engine.history(),
            &[HistoryEntry {
                left: 12.0,
                operator: Operator::Add,
                right: 30.0,
                result: 42.0,
            }]
        );
    }

    #[test]
    fn test_chaining_is_left_associative() {
        let mut engine = CalculatorEngine::new();
        engine.clear();
        engine.input_digit("5");
        engine.set_operator(Operator::Add).unwrap();
        engine.input_digit("3");
        engine.set_operator(Operator::Multiply).unwrap();
        assert_eq!(engine.display(), "8");
        assert_eq!(engine.pending_operand(), Some(8.0));
        engine.input_digit("2");
        engine.evaluate().unwrap();

        assert_eq!(engine.display(), "16");
        assert_eq!(
            engine.history(),
            &[HistoryEntry {
                left: 8.0,
                operator: Operator::Multiply,
                right: 2.0,
                result: 16.0,
            }]
        );
    }

    #[test]
    fn test_operator_press_never_records_history() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "1+2+3+4");
        assert!(engine.history().is_empty());
        assert_eq!(engine.display(), "4");
        assert_eq!(engine.preview().as_deref(), Some("6 +"));
    }

    #[test]
    fn test_repeated_operator_chains_with_displayed_value() {
        // The displayed value doubles as the right operand.
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "5+*");
        assert_eq!(engine.display(), "10");
        assert_eq!(engine.pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn test_evaluate_without_pending_is_noop() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit("9");
        let before = engine.state().clone();
        assert_eq!(engine.evaluate(), Ok(()));
        assert_eq!(engine.state(), &before);

        let mut fresh = CalculatorEngine::new();
        let before = fresh.state().clone();
        assert_eq!(fresh.evaluate(), Ok(()));
        assert_eq!(fresh.state(), &before);
    }

    #[test]
    fn test_division_by_zero_on_evaluate() {
        let mut engine = CalculatorEngine::new();
        engine.clear();
        engine.input_digit("7");
        engine.set_operator(Operator::Divide).unwrap();
        engine.input_digit("0");

        assert_eq!(engine.evaluate(), Err(CalcError::DivisionByZero));
        assert_eq!(engine.display(), "7");
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_engine_usable_after_division_by_zero() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(run(&mut engine, "7/0="), vec![CalcError::DivisionByZero]);
        assert_eq!(engine.pending_operand(), Some(7.0));
        assert_eq!(engine.pending_operator(), Some(Operator::Divide));

        assert!(run(&mut engine, "2=").is_empty());
        assert_eq!(engine.display(), "3.5");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_division_by_zero_while_chaining() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "9/0");
        assert_eq!(
            engine.set_operator(Operator::Add),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(engine.display(), "9");
        assert_eq!(engine.pending_operand(), Some(9.0));
        assert_eq!(engine.pending_operator(), Some(Operator::Add));
        assert!(engine.is_awaiting_fresh_input());

        run(&mut engine, "1=");
        assert_eq!(engine.display(), "10");
    }

    #[test]
    fn test_toggle_sign_round_trip() {
        for start in ["5", "12.5", "0.", "3n", "0.25"] {
            let mut engine = CalculatorEngine::new();
            run(&mut engine, start);
            let original = engine.display().to_string();
            engine.toggle_sign();
            assert_ne!(engine.display(), original);
            engine.toggle_sign();
            assert_eq!(engine.display(), original);
        }
    }

    #[test]
    fn test_toggle_sign_ignores_zero() {
        let mut engine = CalculatorEngine::new();
        engine.toggle_sign();
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_negative_operand() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "4n-6=");
        assert_eq!(engine.display(), "-10");
    }

    #[test]
    fn test_percentage() {
        let mut engine = CalculatorEngine::new();
        engine.clear();
        engine.input_digit("5");
        engine.input_digit("0");
        engine.percentage();
        assert_eq!(engine.display(), "0.5");
    }

    #[test]
    fn test_fresh_input_after_operator_and_evaluate() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "12+");
        assert!(engine.is_awaiting_fresh_input());
        engine.input_digit("3");
        assert_eq!(engine.display(), "3");

        engine.evaluate().unwrap();
        assert_eq!(engine.display(), "15");
        engine.input_digit("4");
        assert_eq!(engine.display(), "4");
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, "2*3=4+");
        engine.clear();
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.pending_operand(), None);
        assert_eq!(engine.pending_operator(), None);
        assert!(!engine.is_awaiting_fresh_input());
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_float_artifacts_not_rounded() {
        let mut engine = CalculatorEngine::new();
        run(&mut engine, ".1+.2=");
        assert_eq!(engine.display(), "0.30000000000000004");
    }

    #[test]
    fn test_preview_and_active_operator() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(engine.preview(), None);
        assert_eq!(engine.active_operator(), None);

        run(&mut engine, "8÷");
        assert_eq!(engine.preview().as_deref(), Some("8 ÷"));
        assert_eq!(engine.active_operator(), Some(Operator::Divide));

        run(&mut engine, "4=");
        assert_eq!(engine.preview(), None);
        assert_eq!(engine.active_operator(), None);
    }
}
