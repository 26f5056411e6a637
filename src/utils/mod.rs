// src/utils/mod.rs

pub mod chart;

pub use chart::{chart_series, chart_title, range_inputs, render_svg};
