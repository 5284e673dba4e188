//! Data module - record model, CSV persistence and frame conversion

mod loader;
mod processor;
mod record;

pub use loader::{DatasetError, DatasetManager};
pub use record::{CarSale, GroupKey, SaleField};
