pub mod calculator;

pub use calculator::{RenderOptions, render_calculator};
