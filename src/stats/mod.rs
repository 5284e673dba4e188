//! Stats module - grouped aggregates

mod calculator;

pub use calculator::{Aggregate, AggregateCalculator, AggregateValue, StatsError};
