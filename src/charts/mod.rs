//! Charts module - chart projection and rendering

mod plotter;
mod renderer;

pub use plotter::{ChartProjection, ChartSpec};
pub use renderer::{ChartError, ChartRenderer};
