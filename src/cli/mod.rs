//! CLI module - interactive menu, console and record capture

mod app;
mod capture;
mod console;
mod menu;

pub use app::SalesApp;
pub use console::Console;
