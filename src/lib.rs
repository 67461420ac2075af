//! The four-function calculator from the portfolio page, without the page.
//!
//! [`calculator::CalculatorEngine`] is a headless state machine fed by keypad
//! events; [`session`], [`ui`] and [`config`] make up the terminal front-end.

pub mod calculator;
pub mod config;
pub mod session;
pub mod ui;
